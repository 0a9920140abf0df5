//! Strategy module
//!
//! Builds dip ladders and sizes the purchase at every level.
//!
//! ## Layout
//!
//! - `ladder` - descending price levels from start to floor
//! - `calculations` - cost basis and whole-share sizing math
//! - `allocation` - greedy sizing (spend all the tolerance allows)
//! - `reserve` - largest opening buy that leaves room for every dip
//! - `engine` - validated entry points tying the above together

pub mod allocation;
pub mod calculations;
pub mod engine;
pub mod ladder;
pub mod reserve;

pub use allocation::allocate_greedy;
pub use calculations::{affordable_shares, pct_diff, CostBasis};
pub use engine::{compute_schedule, plan_schedule};
pub use ladder::{build_price_levels, DEFAULT_MAX_LEVELS};
pub use reserve::{allocate_reserve, DEFAULT_MAX_INITIAL_SEARCH};
