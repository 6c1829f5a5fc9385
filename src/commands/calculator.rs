//! Interactive calculator command.
//!
//! Each invocation asks for one action: an arithmetic operation with two
//! operands, showing the history, clearing it, or leaving. Control then
//! returns to the main prompt.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{Command, CommandContext, CommandError, CommandOutcome};
use crate::calculator::{parse_decimal, CalcError, Calculation, CalculationHistory, Operation};

const OPERATION_PROMPT: &str =
    "Enter operation (add, subtract, multiply, divide, 'history', 'clear_history' or 'exit'): ";

/// Performs arithmetic and manages the calculation history.
pub struct CalculatorCommand {
    history: Rc<RefCell<CalculationHistory>>,
}

impl CalculatorCommand {
    /// Create a calculator that records into `history`.
    pub fn new(history: Rc<RefCell<CalculationHistory>>) -> Self {
        Self { history }
    }

    fn handle_arithmetic(
        &self,
        ctx: &mut CommandContext<'_>,
        operation_name: &str,
    ) -> Result<(), CommandError> {
        let Some(operation) = Operation::from_name(operation_name) else {
            warn!(operation = operation_name, "Invalid operation");
            writeln!(
                ctx.output(),
                "Error: '{}' is not a valid operation. Exiting to main menu.",
                operation_name
            )?;
            return Ok(());
        };

        let num_one = ctx.prompt("Enter first number: ")?;
        let num_two = ctx.prompt("Enter second number: ")?;

        let (a, b) = match (parse_decimal(&num_one), parse_decimal(&num_two)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                error!(%num_one, %num_two, "Invalid number input");
                writeln!(
                    ctx.output(),
                    "Invalid number input: '{}' or '{}' is not a valid number.",
                    num_one,
                    num_two
                )?;
                return Ok(());
            }
        };

        let calculation = Calculation::new(a, b, operation);
        match calculation.result() {
            Ok(result) => {
                info!(%num_one, %operation, %num_two, %result, "Calculated result");
                writeln!(
                    ctx.output(),
                    "The result of {} {} {} is: {}",
                    num_one,
                    operation_name,
                    num_two,
                    result
                )?;
                self.history.borrow_mut().add(calculation);
                debug!("Added calculation to history");
            }
            Err(CalcError::DivisionByZero) => {
                error!("Division by zero is not allowed");
                writeln!(ctx.output(), "Error: Division by zero is not allowed.")?;
            }
            Err(e) => {
                error!(error = %e, "Calculation failed");
                writeln!(ctx.output(), "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn display_history(&self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        let history = self.history.borrow();
        let out = ctx.output();

        if history.is_empty() {
            info!("No calculations in history");
            writeln!(out, "No calculations in history.")?;
            return Ok(());
        }

        info!(count = history.len(), "Displaying calculation history");
        writeln!(out)?;
        writeln!(out, "Calculation History:")?;
        for calc in history.get_all() {
            match calc.result() {
                Ok(result) => writeln!(
                    out,
                    "{} {} {} = {}",
                    calc.number_one, calc.operation, calc.number_two, result
                )?,
                Err(e) => writeln!(
                    out,
                    "{} {} {} = {}",
                    calc.number_one, calc.operation, calc.number_two, e
                )?,
            }
        }
        Ok(())
    }

    fn clear_history(&self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.history.borrow_mut().clear();
        info!("Calculation history cleared");
        writeln!(ctx.output(), "Calculation history cleared.")?;
        Ok(())
    }
}

impl Command for CalculatorCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutcome, CommandError> {
        let operation_name = ctx.prompt(OPERATION_PROMPT)?.to_lowercase();

        match operation_name.as_str() {
            "exit" => {
                info!("Leaving the calculator");
                writeln!(ctx.output(), "Returning to main menu...")?;
            }
            "history" => self.display_history(ctx)?,
            "clear_history" => self.clear_history(ctx)?,
            other => {
                debug!(operation = other, "Arithmetic operation selected");
                self.handle_arithmetic(ctx, other)?;
            }
        }

        Ok(CommandOutcome::Continue)
    }
}
