use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How successive dip levels are spaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingMode {
    /// Subtract a fixed dollar amount from the previous level
    #[serde(alias = "$", alias = "amount")]
    FixedAmount,
    /// Drop a fixed percentage from the previous level
    #[serde(alias = "%", alias = "percent")]
    FixedPercent,
}

impl std::fmt::Display for SpacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpacingMode::FixedAmount => write!(f, "$"),
            SpacingMode::FixedPercent => write!(f, "%"),
        }
    }
}

/// How the average-cost tolerance is measured against a level's price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceMode {
    /// Average may exceed the level by at most `tolerance` dollars
    #[default]
    Absolute,
    /// Average may exceed the level by at most `tolerance` percent of it
    Percent,
}

/// Which sizing rule walks the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationPolicy {
    /// Spend as much as possible at every level the tolerance allows
    Greedy,
    /// Largest opening buy that still leaves room for every dip buy
    Reserve,
}

impl std::fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationPolicy::Greedy => write!(f, "greedy"),
            AllocationPolicy::Reserve => write!(f, "reserve"),
        }
    }
}

/// One schedule request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub total_budget: Decimal,
    pub start_price: Decimal,
    /// Lowest expected price, last rung of the ladder
    pub floor_price: Decimal,
    pub spacing_mode: SpacingMode,
    /// Dollars or percent depending on `spacing_mode`
    pub spacing_value: Decimal,
    pub tolerance: Decimal,
    #[serde(default)]
    pub tolerance_mode: ToleranceMode,
}

impl ScheduleInput {
    pub fn new(
        total_budget: Decimal,
        start_price: Decimal,
        floor_price: Decimal,
        spacing_mode: SpacingMode,
        spacing_value: Decimal,
        tolerance: Decimal,
    ) -> Self {
        Self {
            total_budget,
            start_price,
            floor_price,
            spacing_mode,
            spacing_value,
            tolerance,
            tolerance_mode: ToleranceMode::Absolute,
        }
    }

    pub fn with_tolerance_mode(mut self, mode: ToleranceMode) -> Self {
        self.tolerance_mode = mode;
        self
    }

    /// Highest running average allowed once `price` has been reached
    ///
    /// Saturates at `Decimal::MAX`, which no average can exceed.
    pub fn ceiling(&self, price: Decimal) -> Decimal {
        let ceiling = match self.tolerance_mode {
            ToleranceMode::Absolute => price.checked_add(self.tolerance),
            ToleranceMode::Percent => (self.tolerance / Decimal::ONE_HUNDRED)
                .checked_add(Decimal::ONE)
                .and_then(|factor| price.checked_mul(factor)),
        };
        ceiling.unwrap_or(Decimal::MAX)
    }
}

/// One rung of a computed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub price_level: Decimal,
    pub shares_bought: u64,
    pub purchase_cost: Decimal,
    pub cumulative_shares: u64,
    pub cumulative_cost: Decimal,
    pub running_average_cost: Decimal,
    /// (price - average) / average, in percent; zero while nothing is held
    pub pct_diff_vs_average: Decimal,
    pub remaining_budget: Decimal,
    /// Running average is at or below the level's ceiling
    pub within_tolerance: bool,
}

/// A full schedule with the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub input: ScheduleInput,
    pub policy: AllocationPolicy,
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn total_spent(&self) -> Decimal {
        self.rows
            .last()
            .map(|r| r.cumulative_cost)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_shares(&self) -> u64 {
        self.rows.last().map(|r| r.cumulative_shares).unwrap_or(0)
    }

    pub fn final_average_cost(&self) -> Decimal {
        self.rows
            .last()
            .map(|r| r.running_average_cost)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn remaining_budget(&self) -> Decimal {
        self.input.total_budget - self.total_spent()
    }

    /// Price levels in ladder order
    pub fn levels(&self) -> Vec<Decimal> {
        self.rows.iter().map(|r| r.price_level).collect()
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
