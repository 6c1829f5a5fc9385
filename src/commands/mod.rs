//! Command system for the shell.
//!
//! This module provides:
//! - The `Command` trait every shell command implements
//! - The per-invocation `CommandContext` (input, output, registry access)
//! - The insertion-ordered command registry
//! - The built-in commands

mod builtin;
mod calculator;
mod registry;

use std::fmt;
use std::io::{self, BufRead, Write};

use thiserror::Error;

pub use builtin::{ExitCommand, GoodbyeCommand, GreetCommand, MenuCommand, EXIT_MESSAGE};
pub use calculator::CalculatorCommand;
pub use registry::CommandRegistry;

/// A command that can be invoked from the shell by name.
pub trait Command {
    /// Run the command with the arguments that followed its name.
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<CommandOutcome, CommandError>;

    /// The argument count this command accepts.
    ///
    /// Checked by the dispatcher before `execute` is called.
    fn arity(&self) -> Arity {
        Arity::Any
    }

    /// Whether this command can be invoked at all.
    fn is_executable(&self) -> bool {
        true
    }
}

/// What the shell should do after a command finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep reading commands.
    Continue,
    /// End the session and exit the process with the given message.
    Terminate {
        /// Message reported on exit.
        message: String,
    },
}

/// Errors a command can report back to the dispatcher.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The command failed for a reason of its own.
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    /// Create a generic failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        CommandError::Failed(msg.into())
    }
}

/// Number of arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Any number of arguments.
    Any,
    /// Exactly this many arguments.
    Exact(usize),
    /// Up to this many arguments.
    AtMost(usize),
}

impl Arity {
    /// Check an argument count against this arity.
    ///
    /// Returns a description of the mismatch on failure.
    pub fn check(&self, given: usize) -> Result<(), String> {
        match *self {
            Arity::Any => Ok(()),
            Arity::Exact(expected) if given == expected => Ok(()),
            Arity::Exact(expected) => Err(format!(
                "takes {} {} but {} {} given",
                expected,
                plural(expected, "argument", "arguments"),
                given,
                plural(given, "was", "were"),
            )),
            Arity::AtMost(max) if given <= max => Ok(()),
            Arity::AtMost(max) => Err(format!(
                "takes at most {} {} but {} {} given",
                max,
                plural(max, "argument", "arguments"),
                given,
                plural(given, "was", "were"),
            )),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Any => write!(f, "any"),
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtMost(n) => write!(f, "0..={}", n),
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Read one line, replacing invalid UTF-8 with U+FFFD.
///
/// Returns `None` at end of input.
pub fn read_line_lossy(input: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Everything a command can reach while it runs.
pub struct CommandContext<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    registry: &'a CommandRegistry,
}

impl<'a> CommandContext<'a> {
    /// Create a context over the session's input, output and registry.
    pub fn new(
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        registry: &'a CommandRegistry,
    ) -> Self {
        Self {
            input,
            output,
            registry,
        }
    }

    /// Print a prompt and read one trimmed line of input.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if the input is exhausted.
    pub fn prompt(&mut self, text: &str) -> io::Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        match read_line_lossy(&mut *self.input)? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a response",
            )),
        }
    }

    /// The writer all command output goes to.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// The registry the command was resolved from.
    pub fn registry(&self) -> &CommandRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_arity_any_accepts_everything() {
        assert!(Arity::Any.check(0).is_ok());
        assert!(Arity::Any.check(42).is_ok());
    }

    #[test]
    fn test_arity_exact() {
        assert!(Arity::Exact(2).check(2).is_ok());
        assert_eq!(
            Arity::Exact(0).check(2).unwrap_err(),
            "takes 0 arguments but 2 were given"
        );
        assert_eq!(
            Arity::Exact(1).check(0).unwrap_err(),
            "takes 1 argument but 0 were given"
        );
    }

    #[test]
    fn test_arity_at_most() {
        assert!(Arity::AtMost(1).check(0).is_ok());
        assert!(Arity::AtMost(1).check(1).is_ok());
        assert_eq!(
            Arity::AtMost(1).check(3).unwrap_err(),
            "takes at most 1 argument but 3 were given"
        );
    }

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let registry = CommandRegistry::new();
        let mut input = Cursor::new("  add  \nnext\n");
        let mut output = Vec::new();
        let mut ctx = CommandContext::new(&mut input, &mut output, &registry);

        assert_eq!(ctx.prompt("op: ").unwrap(), "add");
        assert_eq!(ctx.prompt("again: ").unwrap(), "next");
        assert_eq!(String::from_utf8(output).unwrap(), "op: again: ");
    }

    #[test]
    fn test_prompt_eof() {
        let registry = CommandRegistry::new();
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let mut ctx = CommandContext::new(&mut input, &mut output, &registry);

        let err = ctx.prompt("op: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_line_lossy() {
        let mut input = Cursor::new(b"ok\n\xffbad\nlast".to_vec());
        assert_eq!(read_line_lossy(&mut input).unwrap().as_deref(), Some("ok\n"));
        assert_eq!(
            read_line_lossy(&mut input).unwrap().as_deref(),
            Some("\u{fffd}bad\n")
        );
        assert_eq!(read_line_lossy(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_line_lossy(&mut input).unwrap(), None);
    }

    #[test]
    fn test_prompt_accepts_invalid_utf8() {
        let registry = CommandRegistry::new();
        let mut input = Cursor::new(b"\xfe\xff\n".to_vec());
        let mut output = Vec::new();
        let mut ctx = CommandContext::new(&mut input, &mut output, &registry);

        assert_eq!(ctx.prompt("op: ").unwrap(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_command_error_display() {
        assert_eq!(CommandError::failed("boom").to_string(), "boom");
        let err: CommandError = io::Error::new(io::ErrorKind::Other, "pipe").into();
        assert_eq!(err.to_string(), "IO error: pipe");
    }
}
