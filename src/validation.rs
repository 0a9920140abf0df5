//! Input validation for schedule requests
//!
//! Every check runs before any level is generated, so a rejected request
//! never produces partial rows.

use crate::domain::ScheduleInput;
use crate::error::{InputField, LadderError, Result};
use rust_decimal::Decimal;

/// Validate that a value is strictly positive
///
/// # Arguments
/// * `value` - Value to validate
/// * `field` - Field reported in the error
pub fn validate_positive(value: Decimal, field: InputField) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(LadderError::invalid(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }

    Ok(())
}

/// Validate that a value is zero or positive
pub fn validate_non_negative(value: Decimal, field: InputField) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(LadderError::invalid(
            field,
            format!("cannot be negative, got {}", value),
        ));
    }

    Ok(())
}

/// Validate the start/floor pair
///
/// # Returns
/// * `Ok(())` if both prices are positive and the floor is not above the start
/// * `Err` naming the offending price otherwise
pub fn validate_price_range(start_price: Decimal, floor_price: Decimal) -> Result<()> {
    validate_positive(start_price, InputField::StartPrice)?;
    validate_positive(floor_price, InputField::FloorPrice)?;

    if floor_price > start_price {
        return Err(LadderError::invalid(
            InputField::FloorPrice,
            format!(
                "floor {} cannot be above start price {}",
                floor_price, start_price
            ),
        ));
    }

    Ok(())
}

/// Validate a complete schedule request
pub fn validate_input(input: &ScheduleInput) -> Result<()> {
    validate_positive(input.total_budget, InputField::TotalBudget)?;
    validate_price_range(input.start_price, input.floor_price)?;
    validate_positive(input.spacing_value, InputField::SpacingValue)?;
    validate_non_negative(input.tolerance, InputField::Tolerance)?;
    Ok(())
}
