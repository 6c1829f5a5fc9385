//! Application context.
//!
//! Owns the command registry and the calculation history, performs the
//! startup registration (the `menu` command by hand, everything else via
//! plugin discovery) and runs the loop.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::calculator::CalculationHistory;
use crate::commands::{CommandRegistry, MenuCommand};
use crate::config::Settings;
use crate::error::Result;
use crate::plugins::{
    resolve_plugin_root, LoadReport, PluginCatalog, PluginEnv, PluginLoader, RESERVED_COMMAND,
};
use crate::repl::{Repl, SessionEnd, USAGE_HINT};

/// The shell application.
pub struct App {
    /// Application configuration.
    settings: Settings,
    /// All registered commands.
    registry: CommandRegistry,
    /// History shared with the calculator command.
    history: Rc<RefCell<CalculationHistory>>,
    /// Directory the plugins were loaded from.
    plugin_root: PathBuf,
    /// Result of plugin discovery.
    load_report: LoadReport,
}

impl App {
    /// Create the application with the built-in plugin catalog.
    pub fn new(settings: Settings) -> Self {
        Self::with_catalog(settings, &PluginCatalog::builtin())
    }

    /// Create the application with a custom plugin catalog.
    pub fn with_catalog(settings: Settings, catalog: &PluginCatalog) -> Self {
        debug!(environment = %settings.environment, "Creating application");

        let history = Rc::new(RefCell::new(CalculationHistory::new()));
        let env = PluginEnv::new(Rc::clone(&history));

        let mut registry = CommandRegistry::new();
        registry.register(RESERVED_COMMAND, Box::new(MenuCommand));

        let plugin_root = resolve_plugin_root(settings.plugin_dir.as_deref());
        let load_report = PluginLoader::new(&plugin_root, catalog, &env).load_into(&mut registry);

        if load_report.is_clean() {
            info!(
                root = %plugin_root.display(),
                commands = registry.len(),
                "Plugins loaded"
            );
        } else {
            warn!(
                root = %plugin_root.display(),
                failures = load_report.failures.len(),
                "Plugins loaded with errors"
            );
        }

        Self {
            settings,
            registry,
            history,
            plugin_root,
            load_report,
        }
    }

    /// Get the command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Get the calculation history shared with the calculator.
    pub fn history(&self) -> &Rc<RefCell<CalculationHistory>> {
        &self.history
    }

    /// Get the directory plugins were loaded from.
    pub fn plugin_root(&self) -> &Path {
        &self.plugin_root
    }

    /// Get the plugin discovery report.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Run an interactive session over `input` and `output`.
    ///
    /// Plugin load problems are reported first, then the usage hint, then
    /// the loop runs until a command ends the session or input runs out.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<SessionEnd>
    where
        R: BufRead,
        W: Write,
    {
        if let Some(e) = &self.load_report.root_error {
            writeln!(output, "Warning: {}", e)?;
        }
        for failure in &self.load_report.failures {
            writeln!(output, "{}", failure.message())?;
        }

        writeln!(output, "{}", USAGE_HINT)?;

        let mut repl = Repl::new(&self.registry).with_prompt(self.settings.prompt.as_str());
        let end = repl.run(input, output)?;
        debug!(?end, "Session ended");
        Ok(end)
    }
}
