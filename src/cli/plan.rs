//! `plan` and `levels` command handlers.

use anyhow::Context;
use tracing::info;

use super::output::{self, LevelRow, OutputMode};
use super::{LadderArgs, PlanArgs};
use crate::config::{AppConfig, PlanDefaults};
use crate::domain::{AllocationPolicy, ScheduleInput, SpacingMode, ToleranceMode};
use crate::strategy::{build_price_levels, plan_schedule};

/// Merge CLI flags over the configured defaults.
pub fn resolve_input(args: &PlanArgs, defaults: &PlanDefaults) -> ScheduleInput {
    let mut input = defaults.to_input();
    apply_ladder(&mut input, &args.ladder);

    if let Some(budget) = args.budget {
        input.total_budget = budget;
    }

    if let Some(tolerance) = args.tolerance {
        input.tolerance = tolerance;
        input.tolerance_mode = ToleranceMode::Absolute;
    } else if let Some(tolerance) = args.tolerance_pct {
        input.tolerance = tolerance;
        input.tolerance_mode = ToleranceMode::Percent;
    }

    input
}

fn apply_ladder(input: &mut ScheduleInput, args: &LadderArgs) {
    if let Some(start) = args.start {
        input.start_price = start;
    }
    if let Some(floor) = args.floor {
        input.floor_price = floor;
    }
    if let Some(step) = args.step_amount {
        input.spacing_mode = SpacingMode::FixedAmount;
        input.spacing_value = step;
    } else if let Some(step) = args.step_pct {
        input.spacing_mode = SpacingMode::FixedPercent;
        input.spacing_value = step;
    }
}

pub fn run_plan(args: &PlanArgs, config: &AppConfig, mode: OutputMode) -> anyhow::Result<()> {
    let input = resolve_input(args, &config.defaults);
    let policy: AllocationPolicy = args.policy.map(Into::into).unwrap_or(config.defaults.policy);

    info!(?input, %policy, "planning schedule");

    let schedule = plan_schedule(&input, policy, &config.engine)
        .with_context(|| format!("failed to plan {policy} schedule"))?;

    output::print_schedule(&schedule, mode)
}

pub fn run_levels(args: &LadderArgs, config: &AppConfig, mode: OutputMode) -> anyhow::Result<()> {
    let mut input = config.defaults.to_input();
    apply_ladder(&mut input, args);

    let levels = build_price_levels(
        input.start_price,
        input.floor_price,
        input.spacing_mode,
        input.spacing_value,
        config.engine.max_levels,
    )
    .context("failed to build price ladder")?;

    let rows: Vec<LevelRow> = levels
        .iter()
        .enumerate()
        .map(|(i, price)| LevelRow {
            index: i + 1,
            price: output::money(*price),
        })
        .collect();

    output::print_rows(&rows, mode)
}
