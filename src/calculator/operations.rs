//! Arithmetic operations over decimal numbers.

use std::fmt;

use rust_decimal::Decimal;

use super::CalcError;

/// The operations the calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations, in menu order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Look up an operation by its command name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// The name users type for this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Apply the operation to two operands.
    pub fn apply(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        match self {
            Self::Add => add(a, b),
            Self::Subtract => subtract(a, b),
            Self::Multiply => multiply(a, b),
            Self::Divide => divide(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_add(b).ok_or(CalcError::Overflow(Operation::Add))
}

pub fn subtract(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_sub(b)
        .ok_or(CalcError::Overflow(Operation::Subtract))
}

pub fn multiply(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_mul(b)
        .ok_or(CalcError::Overflow(Operation::Multiply))
}

/// Divide `a` by `b`.
///
/// The quotient is normalized, so `10 / 2` is `5` rather than `5.0`.
pub fn divide(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    a.checked_div(b)
        .map(|q| q.normalize())
        .ok_or(CalcError::Overflow(Operation::Divide))
}
