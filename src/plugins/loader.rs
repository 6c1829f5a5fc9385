//! Discovers plugin units on disk and registers their commands.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{PluginCatalog, PluginEnv, PluginError, PluginManifest, CONTRACT_NAME, MANIFEST_FILE};
use crate::commands::CommandRegistry;

/// Units whose path below the plugin root contains this keyword are
/// registered by the application itself and skipped during discovery.
pub const RESERVED_COMMAND: &str = "menu";

/// A directory that carries a plugin manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUnit {
    /// Command name: the directory name, lower-cased.
    pub name: String,
    /// Dotted path below the plugin root, lower-cased (`extras.wave`).
    pub qualified_name: String,
    /// The unit's directory.
    pub dir: PathBuf,
}

impl PluginUnit {
    /// Path of the unit's manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }
}

/// A unit that could not be loaded.
#[derive(Debug)]
pub struct PluginFailure {
    /// Name of the unit.
    pub unit: String,
    /// Why loading failed.
    pub error: PluginError,
}

impl PluginFailure {
    /// One-line description for display.
    pub fn message(&self) -> String {
        format!("Error loading plugin {}: {}", self.unit, self.error)
    }
}

/// Outcome of a discovery pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Command names registered, in registration order.
    pub registered: Vec<String>,
    /// Units skipped because their name is reserved.
    pub skipped: Vec<String>,
    /// Units that failed to load.
    pub failures: Vec<PluginFailure>,
    /// Set when the plugin root itself was unusable.
    pub root_error: Option<PluginError>,
}

impl LoadReport {
    /// Whether every unit loaded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.root_error.is_none()
    }
}

/// Walks a plugin root and registers the commands its units export.
pub struct PluginLoader<'a> {
    root: PathBuf,
    catalog: &'a PluginCatalog,
    env: &'a PluginEnv,
}

impl<'a> PluginLoader<'a> {
    /// Create a loader for `root`.
    pub fn new(root: impl Into<PathBuf>, catalog: &'a PluginCatalog, env: &'a PluginEnv) -> Self {
        Self {
            root: root.into(),
            catalog,
            env,
        }
    }

    /// Find every plugin unit beneath the root, nested units included.
    ///
    /// Entries are visited in file-name order within each directory.
    pub fn discover(&self) -> Result<Vec<PluginUnit>, PluginError> {
        if !self.root.is_dir() {
            return Err(PluginError::RootNotFound(self.root.clone()));
        }

        let mut units = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable plugin path");
                    continue;
                }
            };

            if !entry.file_type().is_dir() || !entry.path().join(MANIFEST_FILE).is_file() {
                continue;
            }

            units.push(PluginUnit {
                name: entry.file_name().to_string_lossy().to_lowercase(),
                qualified_name: qualified_name(&self.root, entry.path()),
                dir: entry.path().to_path_buf(),
            });
        }

        debug!(root = %self.root.display(), count = units.len(), "Discovered plugin units");
        Ok(units)
    }

    /// Register the commands of every unit into `registry`.
    ///
    /// A unit that fails to load is recorded in the report and does not
    /// stop the remaining units from loading.
    pub fn load_into(&self, registry: &mut CommandRegistry) -> LoadReport {
        let mut report = LoadReport::default();

        let units = match self.discover() {
            Ok(units) => units,
            Err(e) => {
                warn!(error = %e, "Plugin discovery failed");
                report.root_error = Some(e);
                return report;
            }
        };

        for unit in units {
            if is_reserved(&unit.qualified_name) {
                debug!(unit = %unit.qualified_name, "Skipping reserved plugin unit");
                report.skipped.push(unit.qualified_name);
                continue;
            }

            match self.load_unit(&unit, registry) {
                Ok(true) => {
                    info!(command = %unit.name, "Registered plugin command");
                    report.registered.push(unit.name);
                }
                Ok(false) => {
                    debug!(unit = %unit.name, "Plugin unit exports no commands");
                }
                Err(error) => {
                    warn!(unit = %unit.name, error = %error, "Failed to load plugin unit");
                    report.failures.push(PluginFailure {
                        unit: unit.name,
                        error,
                    });
                }
            }
        }

        report
    }

    /// Load one unit. Returns whether anything was registered.
    fn load_unit(
        &self,
        unit: &PluginUnit,
        registry: &mut CommandRegistry,
    ) -> Result<bool, PluginError> {
        let manifest = PluginManifest::load(&unit.manifest_path())?;

        let mut registered = false;
        for export in &manifest.exports {
            if export == CONTRACT_NAME {
                continue;
            }
            match self.catalog.get(export) {
                Some(factory) => {
                    debug!(unit = %unit.name, implementation = %export, "Instantiating command");
                    registry.register(unit.name.clone(), factory(self.env));
                    registered = true;
                }
                None => {
                    debug!(unit = %unit.name, export = %export, "Export is not a command");
                }
            }
        }

        Ok(registered)
    }
}

/// Join the path segments of `dir` below `root` with dots.
fn qualified_name(root: &Path, dir: &Path) -> String {
    dir.strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}

/// Case-insensitive check against the reserved keyword.
///
/// A unit nested anywhere under a reserved directory is reserved too.
fn is_reserved(qualified_name: &str) -> bool {
    qualified_name.to_lowercase().contains(RESERVED_COMMAND)
}
