use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

use crate::domain::{AllocationPolicy, ScheduleInput, SpacingMode, ToleranceMode};
use crate::strategy::ladder::DEFAULT_MAX_LEVELS;
use crate::strategy::reserve::DEFAULT_MAX_INITIAL_SEARCH;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: PlanDefaults,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Plan inputs used when a CLI flag is left out
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanDefaults {
    /// Total investment budget in USD
    pub budget: Decimal,
    /// Starting stock price
    pub start_price: Decimal,
    /// Lowest expected stock price
    pub floor_price: Decimal,
    pub spacing_mode: SpacingMode,
    /// Dollars or percent depending on `spacing_mode`
    pub spacing_value: Decimal,
    pub tolerance_mode: ToleranceMode,
    pub tolerance: Decimal,
    pub policy: AllocationPolicy,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            budget: dec!(100000),
            start_price: dec!(75),
            floor_price: dec!(60),
            spacing_mode: SpacingMode::FixedAmount,
            spacing_value: dec!(2.5),
            tolerance_mode: ToleranceMode::Percent,
            tolerance: dec!(2),
            policy: AllocationPolicy::Reserve,
        }
    }
}

impl PlanDefaults {
    pub fn to_input(&self) -> ScheduleInput {
        ScheduleInput::new(
            self.budget,
            self.start_price,
            self.floor_price,
            self.spacing_mode,
            self.spacing_value,
            self.tolerance,
        )
        .with_tolerance_mode(self.tolerance_mode)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Most ladder steps allowed between start and floor
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,
    /// Largest opening size the reserve planner will try
    #[serde(default = "default_max_initial_search")]
    pub max_initial_search: u64,
}

fn default_max_levels() -> usize {
    DEFAULT_MAX_LEVELS
}

fn default_max_initial_search() -> u64 {
    DEFAULT_MAX_INITIAL_SEARCH
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            max_initial_search: DEFAULT_MAX_INITIAL_SEARCH,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: PlanDefaults::default(),
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default.toml` and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config/default.toml")
    }

    /// Load configuration from a specific file (missing file is fine)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?
            .set_default("engine.max_levels", DEFAULT_MAX_LEVELS as u64)?
            .set_default("engine.max_initial_search", DEFAULT_MAX_INITIAL_SEARCH)?
            .add_source(File::from(path.as_ref()).required(false))
            // Override with environment variables (DIPLADDER_ENGINE__MAX_LEVELS, etc.)
            .add_source(
                Environment::with_prefix("DIPLADDER")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate engine and logging settings
    ///
    /// Plan defaults are checked only after CLI flags are merged over them,
    /// when the resolved input reaches the engine.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.engine.max_levels == 0 {
            errors.push("engine.max_levels must be at least 1".to_string());
        }

        if self.engine.max_initial_search == 0 {
            errors.push("engine.max_initial_search must be at least 1".to_string());
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            errors.push(format!("logging.level '{}' is not a log level", self.logging.level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
