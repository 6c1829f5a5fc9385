//! Command registry for the shell.
//!
//! Maps command names to command instances, keeping registration order
//! for listing.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::Command;

/// Registry of all available commands.
///
/// Registering a name that already exists replaces the command but keeps
/// the name's original position in the listing.
#[derive(Default)]
pub struct CommandRegistry {
    /// Registered commands, in registration order.
    commands: Vec<(String, Box<dyn Command>)>,
    /// Position of each name in `commands`.
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `name`, replacing any previous command with that name.
    pub fn register(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => {
                debug!(command = %name, "Replacing registered command");
                self.commands[pos].1 = command;
            }
            None => {
                trace!(command = %name, "Registering command");
                self.index.insert(name.clone(), self.commands.len());
                self.commands.push((name, command));
            }
        }
    }

    /// Look up a command by exact name.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.index
            .get(name)
            .map(|&pos| self.commands[pos].1.as_ref())
    }

    /// Names of all registered commands, in registration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.commands.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Check whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
