//! Simple built-in commands: greet, goodbye, menu and exit.

use tracing::info;

use super::{Command, CommandContext, CommandError, CommandOutcome};

/// Message reported when the shell exits.
pub const EXIT_MESSAGE: &str = "Exiting...";

/// Prints a greeting.
#[derive(Debug, Default)]
pub struct GreetCommand;

impl Command for GreetCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutcome, CommandError> {
        writeln!(ctx.output(), "Hello, World!")?;
        Ok(CommandOutcome::Continue)
    }
}

/// Prints a farewell.
#[derive(Debug, Default)]
pub struct GoodbyeCommand;

impl Command for GoodbyeCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutcome, CommandError> {
        writeln!(ctx.output(), "Goodbye")?;
        Ok(CommandOutcome::Continue)
    }
}

/// Lists every registered command.
#[derive(Debug, Default)]
pub struct MenuCommand;

impl Command for MenuCommand {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutcome, CommandError> {
        let names: Vec<String> = ctx
            .registry()
            .list_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let out = ctx.output();
        writeln!(out)?;
        writeln!(out, "Available commands:")?;
        for name in names {
            writeln!(out, " - {}", name)?;
        }
        Ok(CommandOutcome::Continue)
    }
}

/// Ends the session.
#[derive(Debug, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _ctx: &mut CommandContext<'_>,
        _args: &[String],
    ) -> Result<CommandOutcome, CommandError> {
        info!("Exit requested");
        Ok(CommandOutcome::Terminate {
            message: EXIT_MESSAGE.to_string(),
        })
    }
}
