//! Decimal calculator used by the `calculator` command and the `calc` subcommand.
//!
//! This module provides:
//! - The four arithmetic operations over `Decimal`
//! - `Calculation`, a stored operation with its operands
//! - `CalculationHistory`, the append-only record of past calculations

mod calculation;
mod history;
pub mod operations;

use rust_decimal::Decimal;
use thiserror::Error;

pub use calculation::Calculation;
pub use history::CalculationHistory;
pub use operations::Operation;

/// Errors produced while calculating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The divisor was zero.
    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    /// An operand could not be parsed as a decimal number.
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    /// The result does not fit in a `Decimal`.
    #[error("result of {0} is out of range")]
    Overflow(Operation),
}

/// Parse user input as a decimal number.
///
/// Accepts plain (`12.5`) and scientific (`1.25e1`) notation. Values must
/// fit a 96-bit mantissa with at most 28 fractional digits: plain input
/// that would need rounding is rejected, as is anything that would round
/// to zero. Scientific input is rounded to 28 fractional digits.
pub fn parse_decimal(input: &str) -> Result<Decimal, CalcError> {
    let trimmed = input.trim();
    let invalid = || CalcError::InvalidNumber(trimmed.to_string());

    let value = Decimal::from_str_exact(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid())?;

    if value.is_zero() && has_nonzero_digit(trimmed) {
        return Err(invalid());
    }
    Ok(value)
}

/// Whether the mantissa of a number literal has a digit other than zero.
fn has_nonzero_digit(literal: &str) -> bool {
    literal
        .split(|c: char| c.eq_ignore_ascii_case(&'e'))
        .next()
        .unwrap_or("")
        .chars()
        .any(|c| matches!(c, '1'..='9'))
}

/// Run a single calculation from raw text and describe the outcome.
///
/// Used by the one-shot `calc` subcommand. Errors are rendered as text in
/// the same way the interactive calculator prints them.
pub fn calculate_and_format(number_one: &str, number_two: &str, operation_name: &str) -> String {
    let (a, b) = match (parse_decimal(number_one), parse_decimal(number_two)) {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            return format!(
                "Invalid number input: '{}' or '{}' is not a valid number.",
                number_one, number_two
            )
        }
    };

    let Some(operation) = Operation::from_name(operation_name) else {
        return format!("Unknown operation: {}", operation_name);
    };

    match Calculation::new(a, b, operation).result() {
        Ok(result) => format!(
            "The result of {} {} {} is: {}",
            number_one, operation_name, number_two, result
        ),
        Err(CalcError::DivisionByZero) => "Error: Division by zero is not allowed.".to_string(),
        Err(e) => format!("An unexpected error occurred: {}", e),
    }
}
