//! Greedy ladder allocation
//!
//! Buys everything affordable at the start price, then at each dip buys the
//! largest whole-share quantity that both fits the remaining budget and
//! leaves the running average within tolerance of the dip. When the two
//! constraints cannot both hold the level is skipped (zero shares) but its
//! row is still emitted. Once the remaining budget falls below a level's
//! price the budget is exhausted and every later level buys nothing.

use rust_decimal::Decimal;
use tracing::{debug, field, instrument, Span};

use crate::domain::{ScheduleInput, ScheduleRow};
use crate::strategy::calculations::{affordable_shares, pct_diff, CostBasis};

#[instrument(
    target = "allocation",
    skip(input, levels),
    fields(
        level_count = levels.len(),
        budget = %input.total_budget,
        total_spent = field::Empty
    )
)]
pub fn allocate_greedy(input: &ScheduleInput, levels: &[Decimal]) -> Vec<ScheduleRow> {
    let mut basis = CostBasis::new();
    let mut rows = Vec::with_capacity(levels.len());
    let mut exhausted = false;

    for (i, &price) in levels.iter().enumerate() {
        let remaining = input.total_budget - basis.cost;
        if !exhausted && remaining < price {
            debug!(%price, %remaining, "budget exhausted");
            exhausted = true;
        }

        let affordable = affordable_shares(remaining, price).min(u64::MAX - basis.shares);

        let shares = if exhausted {
            0
        } else if i == 0 {
            affordable
        } else {
            match basis.shares_to_restore(price, input.ceiling(price)) {
                Some(needed) if needed <= affordable => affordable,
                Some(needed) => {
                    debug!(%price, needed, affordable, "budget too small to restore average; skipping level");
                    0
                }
                None => {
                    debug!(%price, average = %basis.average(), "average cannot reach ceiling; skipping level");
                    0
                }
            }
        };

        let cost = basis.buy(price, shares);
        rows.push(ledger_row(input, &basis, price, shares, cost));
    }

    Span::current().record("total_spent", field::display(basis.cost));
    debug!(shares = basis.shares, average = %basis.average(), "greedy allocation complete");

    rows
}

/// Row describing the position right after buying `bought` shares at `price`
pub(crate) fn ledger_row(
    input: &ScheduleInput,
    basis: &CostBasis,
    price: Decimal,
    bought: u64,
    purchase_cost: Decimal,
) -> ScheduleRow {
    let average = basis.average();
    ScheduleRow {
        price_level: price,
        shares_bought: bought,
        purchase_cost,
        cumulative_shares: basis.shares,
        cumulative_cost: basis.cost,
        running_average_cost: average,
        pct_diff_vs_average: pct_diff(price, average),
        remaining_budget: input.total_budget - basis.cost,
        within_tolerance: basis.is_within(input.ceiling(price)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SpacingMode, ToleranceMode};
    use rust_decimal_macros::dec;

    fn input(budget: Decimal, tolerance: Decimal) -> ScheduleInput {
        ScheduleInput::new(
            budget,
            dec!(100),
            dec!(80),
            SpacingMode::FixedAmount,
            dec!(10),
            tolerance,
        )
    }

    #[test]
    fn test_first_level_takes_whole_budget() {
        let rows = allocate_greedy(&input(dec!(1000), dec!(2)), &[dec!(100), dec!(90), dec!(80)]);

        assert_eq!(rows[0].shares_bought, 10);
        assert_eq!(rows[0].running_average_cost, dec!(100));
        assert_eq!(rows[0].remaining_budget, Decimal::ZERO);
        assert!(rows[1..].iter().all(|r| r.shares_bought == 0));
    }

    #[test]
    fn test_unaffordable_start_buys_nothing() {
        // 95 cannot buy a share at 100, so the budget is exhausted from the start
        let rows = allocate_greedy(&input(dec!(95), dec!(2)), &[dec!(100), dec!(90), dec!(80)]);

        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.shares_bought, 0, "row at {}", row.price_level);
            assert_eq!(row.running_average_cost, Decimal::ZERO);
            assert_eq!(row.remaining_budget, dec!(95));
        }
    }

    #[test]
    fn test_exhausted_budget_stays_exhausted() {
        // 10 @ 100 leaves 85: short of 90, then enough for one share at 80
        let rows = allocate_greedy(&input(dec!(1085), dec!(20)), &[dec!(100), dec!(90), dec!(80)]);

        assert_eq!(rows[0].shares_bought, 10);
        assert_eq!(rows[1].shares_bought, 0);
        assert_eq!(rows[2].shares_bought, 0);
        assert_eq!(rows[2].remaining_budget, dec!(85));
        assert_eq!(rows[2].cumulative_shares, 10);
    }

    #[test]
    fn test_huge_tolerance_does_not_overflow() {
        let mut input = input(dec!(1095), Decimal::MAX);
        let rows = allocate_greedy(&input, &[dec!(100), dec!(90)]);
        assert_eq!(rows[1].shares_bought, 1);
        assert!(rows.iter().all(|r| r.within_tolerance));

        input.tolerance_mode = ToleranceMode::Percent;
        let rows = allocate_greedy(&input, &[dec!(100), dec!(90)]);
        assert_eq!(rows[1].shares_bought, 1);
    }

    #[test]
    fn test_skips_level_when_restore_unaffordable() {
        // 10 @ 100, 95 left. At 90 with tolerance 2 the average needs
        // 40 more shares, only 1 is affordable.
        let rows = allocate_greedy(&input(dec!(1095), dec!(2)), &[dec!(100), dec!(90)]);

        assert_eq!(rows[1].shares_bought, 0);
        assert!(!rows[1].within_tolerance);
        assert_eq!(rows[1].remaining_budget, dec!(95));
    }

    #[test]
    fn test_buys_leftover_within_tolerance() {
        // Ceiling 99 needs (1000 - 990) / 9 = 1.11 -> 2 shares, 1 affordable
        let rows = allocate_greedy(&input(dec!(1095), dec!(9)), &[dec!(100), dec!(90)]);
        assert_eq!(rows[1].shares_bought, 0);

        // Ceiling 100 is already met, so the one affordable share is bought
        let rows = allocate_greedy(&input(dec!(1095), dec!(10)), &[dec!(100), dec!(90)]);
        assert_eq!(rows[1].shares_bought, 1);
        assert_eq!(rows[1].cumulative_cost, dec!(1090));
        assert_eq!(rows[1].remaining_budget, dec!(5));
        assert!(rows[1].within_tolerance);
    }

    #[test]
    fn test_ledger_row_fields() {
        let input = input(dec!(1000), dec!(2));
        let mut basis = CostBasis::new();
        let cost = basis.buy(dec!(100), 8);
        let row = ledger_row(&input, &basis, dec!(100), 8, cost);

        assert_eq!(row.purchase_cost, dec!(800));
        assert_eq!(row.cumulative_shares, 8);
        assert_eq!(row.remaining_budget, dec!(200));
        assert_eq!(row.pct_diff_vs_average, Decimal::ZERO);
        assert!(row.within_tolerance);
    }
}
