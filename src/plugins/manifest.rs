//! Plugin unit manifest (`plugin.toml`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PluginError;

/// File name that marks a directory as a plugin unit.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Contents of a `plugin.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginManifest {
    /// Names the unit exposes, in declaration order.
    ///
    /// Names that are not command implementations are ignored.
    pub exports: Vec<String>,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PluginManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let contents = fs::read_to_string(path).map_err(|source| PluginError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| PluginError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
