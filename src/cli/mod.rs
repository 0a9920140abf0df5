//! dipladder CLI
//!
//! Commands:
//! - `dipladder plan` - Size purchases down a dip ladder
//! - `dipladder levels` - Show the price ladder only

pub mod output;
pub mod plan;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::AllocationPolicy;

/// Buy-the-dip schedule calculator
#[derive(Parser, Debug)]
#[command(name = "dipladder")]
#[command(author, version, about = "Buy-the-dip purchase schedule calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output as JSON instead of human-readable tables.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the purchase schedule
    Plan(PlanArgs),
    /// Show the price levels between start and floor
    Levels(LadderArgs),
}

/// Price ladder shape. Anything left out comes from the config defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct LadderArgs {
    /// Starting stock price ($)
    #[arg(long)]
    pub start: Option<Decimal>,

    /// Lowest expected stock price ($)
    #[arg(long)]
    pub floor: Option<Decimal>,

    /// Fixed dollar step between levels
    #[arg(long, conflicts_with = "step_pct")]
    pub step_amount: Option<Decimal>,

    /// Percentage drop between levels (e.g. 5 = 5%)
    #[arg(long)]
    pub step_pct: Option<Decimal>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub ladder: LadderArgs,

    /// Total investment budget ($)
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// Max dollars the average cost may sit above the latest level
    #[arg(long, conflicts_with = "tolerance_pct")]
    pub tolerance: Option<Decimal>,

    /// Max percent the average cost may sit above the latest level
    #[arg(long)]
    pub tolerance_pct: Option<Decimal>,

    /// Sizing rule
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Spend as much as the tolerance allows at every level
    Greedy,
    /// Hold back budget so every dip can restore the average
    Reserve,
}

impl From<PolicyArg> for AllocationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Greedy => AllocationPolicy::Greedy,
            PolicyArg::Reserve => AllocationPolicy::Reserve,
        }
    }
}
