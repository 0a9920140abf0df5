pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod strategy;
pub mod validation;

pub use config::{AppConfig, EngineConfig};
pub use domain::{
    AllocationPolicy, Schedule, ScheduleInput, ScheduleRow, SpacingMode, ToleranceMode,
};
pub use error::{InputField, LadderError, Result};
pub use strategy::{build_price_levels, compute_schedule, plan_schedule};
