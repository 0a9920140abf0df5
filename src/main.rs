use anyhow::Context;
use clap::Parser;
use dipladder::cli::output::{self, Notice, OutputMode};
use dipladder::cli::{plan, Cli, Commands};
use dipladder::config::{AppConfig, LoggingConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;

    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            output::notice(Notice::Error, e);
        }
        anyhow::bail!("invalid configuration in {}", cli.config);
    }

    debug!(config = %cli.config, "configuration loaded");

    let mode = OutputMode::from(cli.json);
    match &cli.command {
        Commands::Plan(args) => plan::run_plan(args, &config, mode),
        Commands::Levels(args) => plan::run_levels(args, &config, mode),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},dipladder={}", logging.level, logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
