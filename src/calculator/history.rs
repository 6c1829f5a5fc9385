//! History of completed calculations.

use super::Calculation;

/// Ordered record of calculations performed during a session.
///
/// Owned by the application and shared with the `calculator` command.
#[derive(Debug, Clone, Default)]
pub struct CalculationHistory {
    calculations: Vec<Calculation>,
}

impl CalculationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a calculation.
    pub fn add(&mut self, calculation: Calculation) {
        self.calculations.push(calculation);
    }

    /// The most recent calculation, if any.
    pub fn get_last(&self) -> Option<&Calculation> {
        self.calculations.last()
    }

    /// All calculations, oldest first.
    pub fn get_all(&self) -> &[Calculation] {
        &self.calculations
    }

    /// Remove every calculation.
    pub fn clear(&mut self) {
        self.calculations.clear();
    }

    pub fn len(&self) -> usize {
        self.calculations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculations.is_empty()
    }
}
