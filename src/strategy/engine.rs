//! Schedule planning entry points

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::domain::{AllocationPolicy, Schedule, ScheduleInput, ScheduleRow, SpacingMode};
use crate::error::Result;
use crate::strategy::allocation::allocate_greedy;
use crate::strategy::ladder::build_price_levels;
use crate::strategy::reserve::allocate_reserve;
use crate::validation::validate_input;

/// Validate `input`, build its ladder and size every level with `policy`
#[instrument(skip(input, engine, policy), fields(policy = %policy))]
pub fn plan_schedule(
    input: &ScheduleInput,
    policy: AllocationPolicy,
    engine: &EngineConfig,
) -> Result<Schedule> {
    validate_input(input)?;

    let levels = build_price_levels(
        input.start_price,
        input.floor_price,
        input.spacing_mode,
        input.spacing_value,
        engine.max_levels,
    )?;

    let rows = match policy {
        AllocationPolicy::Greedy => allocate_greedy(input, &levels),
        AllocationPolicy::Reserve => allocate_reserve(input, &levels, engine.max_initial_search)?,
    };

    let schedule = Schedule {
        input: input.clone(),
        policy,
        rows,
    };

    debug!(
        levels = schedule.rows.len(),
        total_spent = %schedule.total_spent(),
        total_shares = schedule.total_shares(),
        "schedule planned"
    );

    Ok(schedule)
}

/// Greedy schedule with an absolute tolerance and default engine limits
pub fn compute_schedule(
    total_budget: Decimal,
    start_price: Decimal,
    floor_price: Decimal,
    spacing_mode: SpacingMode,
    spacing_value: Decimal,
    tolerance: Decimal,
) -> Result<Vec<ScheduleRow>> {
    let input = ScheduleInput::new(
        total_budget,
        start_price,
        floor_price,
        spacing_mode,
        spacing_value,
        tolerance,
    );
    plan_schedule(&input, AllocationPolicy::Greedy, &EngineConfig::default()).map(|s| s.rows)
}
