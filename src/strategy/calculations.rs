//! Centralized cost-basis calculations for ladder sizing
//!
//! Shared by the greedy engine and the reserve planner so both agree on
//! whole-share rounding and on what "within tolerance" means.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

// =============================================================================
// Cost Basis
// =============================================================================

/// Running position built up while walking the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CostBasis {
    /// Shares held so far
    pub shares: u64,
    /// Money spent so far
    pub cost: Decimal,
}

impl CostBasis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted average cost per share (zero while nothing is held)
    pub fn average(&self) -> Decimal {
        if self.shares == 0 {
            return Decimal::ZERO;
        }
        self.cost / Decimal::from(self.shares)
    }

    /// Record a purchase, returning its cost
    pub fn buy(&mut self, price: Decimal, shares: u64) -> Decimal {
        let cost = price * Decimal::from(shares);
        self.shares += shares;
        self.cost += cost;
        cost
    }

    /// Average is at or below `ceiling`
    ///
    /// Compared as `cost <= ceiling * shares` to avoid rounding the division.
    pub fn is_within(&self, ceiling: Decimal) -> bool {
        match ceiling.checked_mul(Decimal::from(self.shares)) {
            Some(limit) => self.cost <= limit,
            // Past Decimal::MAX, so above any cost
            None => true,
        }
    }

    /// Buying `shares` at `price` keeps total spend within `budget`
    pub fn can_afford(&self, price: Decimal, shares: u64, budget: Decimal) -> bool {
        if self.shares.checked_add(shares).is_none() {
            return false;
        }
        price
            .checked_mul(Decimal::from(shares))
            .and_then(|cost| self.cost.checked_add(cost))
            .is_some_and(|total| total <= budget)
    }

    /// Fewest whole shares at `price` that bring the average down to `ceiling`
    ///
    /// From `(cost + q*price) / (shares + q) <= ceiling`:
    /// `q >= (cost - ceiling*shares) / (ceiling - price)`.
    /// Returns `None` when no quantity can do it (ceiling at or below price).
    pub fn shares_to_restore(&self, price: Decimal, ceiling: Decimal) -> Option<u64> {
        if self.is_within(ceiling) {
            return Some(0);
        }

        let headroom = ceiling - price;
        if headroom <= Decimal::ZERO {
            return None;
        }

        let gap = self.cost.checked_sub(ceiling.checked_mul(Decimal::from(self.shares))?)?;
        let needed = gap.checked_div(headroom)?.ceil();
        Some(needed.to_u64().unwrap_or(u64::MAX))
    }
}

// =============================================================================
// Sizing helpers
// =============================================================================

/// Whole shares of `price` that `budget` can pay for
pub fn affordable_shares(budget: Decimal, price: Decimal) -> u64 {
    if budget <= Decimal::ZERO || price <= Decimal::ZERO {
        return 0;
    }
    budget
        .checked_div(price)
        .map(|q| q.floor().to_u64().unwrap_or(u64::MAX))
        .unwrap_or(u64::MAX)
}

/// Distance of `price` from `average` in percent of the average
/// (pct_diff = (price - average) / average * 100)
pub fn pct_diff(price: Decimal, average: Decimal) -> Decimal {
    if average.is_zero() {
        return Decimal::ZERO;
    }
    (price - average) / average * Decimal::ONE_HUNDRED
}
