//! Reserve-for-dips planning
//!
//! Finds the largest opening purchase such that, buying at every later
//! level only the fewest shares that pull the running average back under
//! that level's ceiling, the whole ladder still fits the budget.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::domain::{ScheduleInput, ScheduleRow};
use crate::error::{LadderError, Result};
use crate::strategy::allocation::ledger_row;
use crate::strategy::calculations::{affordable_shares, CostBasis};

/// Default cap on opening-share candidates
pub const DEFAULT_MAX_INITIAL_SEARCH: u64 = 10_000;

/// Plan the ladder holding back budget for the dips
///
/// Candidates are tried from the largest affordable opening size down, so
/// the first feasible one is the largest.
///
/// # Errors
/// * `NoFeasibleAllocation` when not even one opening share leaves room
///   for the dip buys
#[instrument(target = "allocation", skip(input, levels), fields(level_count = levels.len()))]
pub fn allocate_reserve(
    input: &ScheduleInput,
    levels: &[Decimal],
    max_initial_search: u64,
) -> Result<Vec<ScheduleRow>> {
    let Some(&start) = levels.first() else {
        return Ok(Vec::new());
    };

    let upper = affordable_shares(input.total_budget, start).min(max_initial_search);
    debug!(upper, "searching opening size");

    for opening in (1..=upper).rev() {
        if let Some(buys) = dip_buys(input, levels, opening) {
            debug!(opening, "feasible opening size found");
            return Ok(replay(input, levels, &buys));
        }
    }

    Err(LadderError::NoFeasibleAllocation(format!(
        "budget {} cannot cover the dip buys for any opening size up to {} shares at {}",
        input.total_budget, upper, start
    )))
}

/// Per-level quantities for an opening size, or `None` if the ladder
/// overspends or some ceiling cannot be reached
fn dip_buys(input: &ScheduleInput, levels: &[Decimal], opening: u64) -> Option<Vec<u64>> {
    let mut basis = CostBasis::new();
    let mut buys = Vec::with_capacity(levels.len());

    for (i, &price) in levels.iter().enumerate() {
        let shares = if i == 0 {
            opening
        } else {
            basis.shares_to_restore(price, input.ceiling(price))?
        };
        if !basis.can_afford(price, shares, input.total_budget) {
            return None;
        }
        basis.buy(price, shares);
        buys.push(shares);
    }

    Some(buys)
}

fn replay(input: &ScheduleInput, levels: &[Decimal], buys: &[u64]) -> Vec<ScheduleRow> {
    let mut basis = CostBasis::new();
    levels
        .iter()
        .zip(buys)
        .map(|(&price, &shares)| {
            let cost = basis.buy(price, shares);
            ledger_row(input, &basis, price, shares, cost)
        })
        .collect()
}
