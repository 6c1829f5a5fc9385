//! Plugin discovery.
//!
//! A plugin unit is a directory under the plugin root that contains a
//! `plugin.toml` manifest. The manifest lists the command implementations
//! the unit exports; each name is resolved against a [`PluginCatalog`] of
//! constructors and the resulting command is registered under the unit's
//! directory name.
//!
//! ```text
//! plugins/
//! ├── calculator/plugin.toml   exports = ["CalculatorCommand"]
//! ├── exit/plugin.toml         exports = ["ExitCommand"]
//! └── greet/plugin.toml        exports = ["GreetCommand"]
//! ```

mod catalog;
mod loader;
mod manifest;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use catalog::{CommandFactory, PluginCatalog, PluginEnv, CONTRACT_NAME};
pub use loader::{LoadReport, PluginFailure, PluginLoader, PluginUnit, RESERVED_COMMAND};
pub use manifest::{PluginManifest, MANIFEST_FILE};

/// Conventional name of the plugin directory.
pub const PLUGIN_DIR_NAME: &str = "plugins";

/// Errors raised while discovering or loading plugin units.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin root does not exist or is not a directory.
    #[error("plugin directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A manifest file could not be read.
    #[error("could not read {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest file is not valid.
    #[error("invalid manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Pick the plugin root directory.
///
/// Uses `configured` when given, otherwise `plugins/` next to the running
/// executable, otherwise the `plugins/` directory shipped with the crate.
pub fn resolve_plugin_root(configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(PLUGIN_DIR_NAME)));
    if let Some(dir) = beside_exe {
        if dir.is_dir() {
            return dir;
        }
    }

    Path::new(env!("CARGO_MANIFEST_DIR")).join(PLUGIN_DIR_NAME)
}
