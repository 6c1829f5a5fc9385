//! The read-dispatch loop.
//!
//! Each line is split into a command name and arguments, resolved against
//! the registry and executed. Lookup and invocation failures print one
//! diagnostic line and the loop keeps going; only a command returning
//! [`CommandOutcome::Terminate`] ends the session.

use std::io::{self, BufRead, Write};

use tracing::{debug, error, info};

use crate::commands::{read_line_lossy, CommandContext, CommandOutcome, CommandRegistry};

/// Prompt printed before each line by default.
pub const DEFAULT_PROMPT: &str = ">>> ";

/// Hint printed once before the loop starts.
pub const USAGE_HINT: &str = "Type 'exit' to exit.";

/// State of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplState {
    /// Reading and dispatching commands.
    #[default]
    Running,
    /// A command asked the session to end.
    Terminated,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// A command terminated the session; the process should exit with `message`.
    Terminated { message: String },
    /// The input stream was closed.
    EndOfInput,
}

/// Reads lines and dispatches them to registered commands.
pub struct Repl<'a> {
    registry: &'a CommandRegistry,
    prompt: String,
    state: ReplState,
}

impl<'a> Repl<'a> {
    /// Create a loop over `registry` with the default prompt.
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            registry,
            prompt: DEFAULT_PROMPT.to_string(),
            state: ReplState::Running,
        }
    }

    /// Use a custom prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Current state of the loop.
    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Run until a command terminates the session or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> io::Result<SessionEnd>
    where
        R: BufRead,
        W: Write,
    {
        self.state = ReplState::Running;

        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            let Some(line) = read_line_lossy(input)? else {
                info!("Input closed, ending session");
                writeln!(output)?;
                return Ok(SessionEnd::EndOfInput);
            };

            match dispatch(self.registry, line.trim(), input, output)? {
                CommandOutcome::Continue => {}
                CommandOutcome::Terminate { message } => {
                    info!("Session terminated by command");
                    self.state = ReplState::Terminated;
                    return Ok(SessionEnd::Terminated { message });
                }
            }
        }
    }
}

/// Split a line into the command name and its arguments.
///
/// A blank line yields an empty name.
pub fn parse_line(line: &str) -> (&str, Vec<String>) {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or("");
    (name, tokens.map(str::to_string).collect())
}

/// Resolve and run the command named on `line`.
///
/// Failures are reported on `output` and turned into
/// [`CommandOutcome::Continue`].
pub fn dispatch(
    registry: &CommandRegistry,
    line: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<CommandOutcome> {
    let (name, args) = parse_line(line);

    let Some(command) = registry.lookup(name) else {
        debug!(command = name, "Command not found");
        writeln!(
            output,
            "Command '{}' not found. Type 'menu' to see available commands.",
            name
        )?;
        return Ok(CommandOutcome::Continue);
    };

    if !command.is_executable() {
        debug!(command = name, "Command is not executable");
        writeln!(output, "The command '{}' cannot be executed.", name)?;
        return Ok(CommandOutcome::Continue);
    }

    if let Err(e) = command.arity().check(args.len()) {
        debug!(command = name, arity = %command.arity(), given = args.len(), "Arity mismatch");
        writeln!(output, "Command '{}' failed due to a type error: {}", name, e)?;
        return Ok(CommandOutcome::Continue);
    }

    debug!(command = name, args = args.len(), "Executing command");
    let mut ctx = CommandContext::new(input, output, registry);
    match command.execute(&mut ctx, &args) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!(command = name, error = %e, "Command failed");
            writeln!(
                output,
                "An error occurred while executing the command '{}': {}",
                name, e
            )?;
            Ok(CommandOutcome::Continue)
        }
    }
}
