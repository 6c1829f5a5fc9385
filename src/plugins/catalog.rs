//! Catalog of command implementations that plugin units can export.

use std::cell::RefCell;
use std::rc::Rc;

use crate::calculator::CalculationHistory;
use crate::commands::{
    CalculatorCommand, Command, ExitCommand, GoodbyeCommand, GreetCommand, MenuCommand,
};

/// Name of the command contract itself; never instantiated.
pub const CONTRACT_NAME: &str = "Command";

/// Builds a fresh command instance.
pub type CommandFactory = fn(&PluginEnv) -> Box<dyn Command>;

/// Shared state handed to commands when they are built.
#[derive(Debug, Clone, Default)]
pub struct PluginEnv {
    /// Calculation history owned by the application.
    pub history: Rc<RefCell<CalculationHistory>>,
}

impl PluginEnv {
    /// Create an environment around the application's history.
    pub fn new(history: Rc<RefCell<CalculationHistory>>) -> Self {
        Self { history }
    }
}

/// Mapping from implementation name to constructor.
#[derive(Clone, Default)]
pub struct PluginCatalog {
    entries: Vec<(String, CommandFactory)>,
}

impl PluginCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of commands shipped with the shell.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("CalculatorCommand", calculator);
        catalog.insert("ExitCommand", exit);
        catalog.insert("GoodbyeCommand", goodbye);
        catalog.insert("GreetCommand", greet);
        catalog.insert("MenuCommand", menu);
        catalog
    }

    /// Add or replace an implementation.
    pub fn insert(&mut self, name: impl Into<String>, factory: CommandFactory) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((name, factory)),
        }
    }

    /// Find the constructor for an implementation name.
    pub fn get(&self, name: &str) -> Option<CommandFactory> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| *factory)
    }

    /// Implementation names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

fn calculator(env: &PluginEnv) -> Box<dyn Command> {
    Box::new(CalculatorCommand::new(Rc::clone(&env.history)))
}

fn exit(_env: &PluginEnv) -> Box<dyn Command> {
    Box::new(ExitCommand)
}

fn goodbye(_env: &PluginEnv) -> Box<dyn Command> {
    Box::new(GoodbyeCommand)
}

fn greet(_env: &PluginEnv) -> Box<dyn Command> {
    Box::new(GreetCommand)
}

fn menu(_env: &PluginEnv) -> Box<dyn Command> {
    Box::new(MenuCommand)
}
