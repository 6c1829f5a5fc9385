//! A single stored calculation.

use rust_decimal::Decimal;

use super::{CalcError, Operation};

/// Two operands and the operation to apply to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub number_one: Decimal,
    pub number_two: Decimal,
    pub operation: Operation,
}

impl Calculation {
    /// Create a new calculation.
    pub fn new(number_one: Decimal, number_two: Decimal, operation: Operation) -> Self {
        Self {
            number_one,
            number_two,
            operation,
        }
    }

    /// Perform the operation.
    pub fn result(&self) -> Result<Decimal, CalcError> {
        self.operation.apply(self.number_one, self.number_two)
    }
}
