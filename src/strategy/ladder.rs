//! Price ladder construction
//!
//! Builds the descending list of dip levels from the start price down to
//! the floor. Intermediate levels are rounded to cents; the last level is
//! always the floor itself.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::SpacingMode;
use crate::error::{InputField, LadderError, Result};
use crate::validation::{validate_positive, validate_price_range};

/// Default cap on ladder steps
pub const DEFAULT_MAX_LEVELS: usize = 1000;

/// Build the descending price ladder
///
/// Each step is taken from the unrounded previous level, so rounding never
/// compounds. A rounded level that does not drop below the previous one is
/// skipped, keeping the ladder strictly decreasing.
///
/// # Errors
/// * `InvalidInput` on a bad price range or spacing value
/// * `InvalidInput` on `spacing_value` when reaching the floor takes more
///   than `max_levels` steps
pub fn build_price_levels(
    start_price: Decimal,
    floor_price: Decimal,
    spacing_mode: SpacingMode,
    spacing_value: Decimal,
    max_levels: usize,
) -> Result<Vec<Decimal>> {
    validate_price_range(start_price, floor_price)?;
    validate_positive(spacing_value, InputField::SpacingValue)?;

    let mut levels = vec![start_price];
    if start_price == floor_price {
        return Ok(levels);
    }

    let keep = Decimal::ONE - spacing_value / Decimal::ONE_HUNDRED;
    let mut current = start_price;
    let mut steps = 0usize;

    loop {
        if steps >= max_levels {
            return Err(LadderError::invalid(
                InputField::SpacingValue,
                format!(
                    "{}{} spacing needs more than {} levels to get from {} to {}",
                    spacing_value, spacing_mode, max_levels, start_price, floor_price
                ),
            ));
        }
        steps += 1;

        let next = match spacing_mode {
            SpacingMode::FixedAmount => current - spacing_value,
            SpacingMode::FixedPercent => current * keep,
        };
        let rounded = next.round_dp(2);

        if next <= floor_price || rounded <= floor_price {
            levels.push(floor_price);
            break;
        }

        if levels.last().is_some_and(|last| rounded < *last) {
            levels.push(rounded);
        }
        current = next;
    }

    debug!(
        count = levels.len(),
        steps,
        %start_price,
        %floor_price,
        "built price ladder"
    );

    Ok(levels)
}
