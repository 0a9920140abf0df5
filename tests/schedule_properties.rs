use dipladder::{
    compute_schedule, plan_schedule, AllocationPolicy, EngineConfig, LadderError, ScheduleInput,
    SpacingMode,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// (budget, start, floor, spacing mode, spacing value, tolerance), all in cents
/// except the percent step. Ladders stay well under the default level cap.
fn schedule_inputs() -> impl Strategy<Value = ScheduleInput> {
    (100i64..100_000)
        .prop_flat_map(|start| (Just(start), (start / 50).max(1)..=start))
        .prop_flat_map(|(start, floor)| {
            (
                1i64..10_000_000,
                Just(start),
                Just(floor),
                any::<bool>(),
                1i64..400,
                1i64..50,
                0i64..2_000,
            )
        })
        .prop_map(|(budget, start, floor, use_percent, hint, pct, tolerance)| {
            let (mode, spacing) = if use_percent {
                (SpacingMode::FixedPercent, Decimal::from(pct))
            } else {
                let step = ((start - floor) / hint).max(1);
                (SpacingMode::FixedAmount, Decimal::new(step, 2))
            };
            ScheduleInput::new(
                Decimal::new(budget, 2),
                Decimal::new(start, 2),
                Decimal::new(floor, 2),
                mode,
                spacing,
                Decimal::new(tolerance, 2),
            )
        })
}

fn greedy(input: &ScheduleInput) -> Vec<dipladder::ScheduleRow> {
    compute_schedule(
        input.total_budget,
        input.start_price,
        input.floor_price,
        input.spacing_mode,
        input.spacing_value,
        input.tolerance,
    )
    .expect("generated inputs are valid")
}

proptest! {
    #[test]
    fn spend_never_exceeds_budget(input in schedule_inputs()) {
        let rows = greedy(&input);

        let spent: Decimal = rows
            .iter()
            .map(|r| r.price_level * Decimal::from(r.shares_bought))
            .sum();
        prop_assert!(spent <= input.total_budget);

        for row in &rows {
            prop_assert!(row.remaining_budget >= Decimal::ZERO);
            prop_assert_eq!(row.remaining_budget, input.total_budget - row.cumulative_cost);
        }
    }

    #[test]
    fn dip_buys_keep_average_within_tolerance(input in schedule_inputs()) {
        let rows = greedy(&input);

        for row in rows.iter().skip(1).filter(|r| r.shares_bought > 0) {
            let ceiling = row.price_level + input.tolerance;
            prop_assert!(
                row.cumulative_cost <= ceiling * Decimal::from(row.cumulative_shares),
                "average {} above ceiling {} at {}",
                row.running_average_cost,
                ceiling,
                row.price_level
            );
            prop_assert!(row.within_tolerance);
        }
    }

    #[test]
    fn levels_strictly_decrease_to_floor(input in schedule_inputs()) {
        let rows = greedy(&input);

        prop_assert_eq!(rows[0].price_level, input.start_price);
        prop_assert!(rows.windows(2).all(|w| w[1].price_level < w[0].price_level));
        prop_assert_eq!(rows.last().map(|r| r.price_level), Some(input.floor_price));
    }

    #[test]
    fn exhausted_budget_never_recovers(input in schedule_inputs()) {
        let rows = greedy(&input);

        let mut remaining = input.total_budget;
        let mut exhausted = false;
        for row in &rows {
            exhausted |= remaining < row.price_level;
            if exhausted {
                prop_assert_eq!(row.shares_bought, 0, "bought at {} after exhaustion", row.price_level);
            }
            remaining = row.remaining_budget;
        }
    }

    #[test]
    fn schedule_is_idempotent(input in schedule_inputs()) {
        prop_assert_eq!(greedy(&input), greedy(&input));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn reserve_plan_respects_budget_and_tolerance(input in schedule_inputs()) {
        let engine = EngineConfig {
            max_initial_search: 200,
            ..EngineConfig::default()
        };

        match plan_schedule(&input, AllocationPolicy::Reserve, &engine) {
            Ok(schedule) => {
                prop_assert!(schedule.total_spent() <= input.total_budget);
                prop_assert!(schedule.rows[0].shares_bought >= 1);
                prop_assert!(schedule.rows.iter().all(|r| r.within_tolerance));
            }
            Err(LadderError::NoFeasibleAllocation(_)) => {}
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
