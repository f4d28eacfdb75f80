//! Manifest location on disk
//!
//! Plugin names map to manifest files through an injectable
//! [`ManifestLocator`], so alternate naming schemes can be substituted
//! without touching the loader.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Suffix loadable plugin names carry under the default naming convention
pub const PLUGIN_NAME_SUFFIX: &str = "Plugin";

/// Maps a plugin name to its manifest path under a root directory
pub trait ManifestLocator: Send + Sync {
    /// Resolve the manifest path for `plugin_name` under `root`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPluginName`] when the name cannot be mapped.
    fn manifest_path(&self, root: &Path, plugin_name: &str) -> Result<PathBuf>;
}

/// Locator for the `{stem}-apiplugin.json` convention
///
/// `MessagesPlugin` resolves to
/// `<root>/MessagesPlugin/messages-apiplugin.json`: the configured suffix is
/// stripped and the remainder lowercased to form the filename stem. Names
/// that do not end in the suffix, or whose stem would be empty, are rejected
/// rather than mapped to a malformed path.
pub struct ApiPluginLocator {
    suffix: String,
}

impl Default for ApiPluginLocator {
    fn default() -> Self {
        Self::new(PLUGIN_NAME_SUFFIX)
    }
}

impl ApiPluginLocator {
    /// Locator stripping the given suffix
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl ManifestLocator for ApiPluginLocator {
    fn manifest_path(&self, root: &Path, plugin_name: &str) -> Result<PathBuf> {
        let stem = plugin_name.strip_suffix(&self.suffix).ok_or_else(|| {
            Error::InvalidPluginName(format!(
                "'{plugin_name}' does not end with '{}'",
                self.suffix
            ))
        })?;

        if stem.is_empty() {
            return Err(Error::InvalidPluginName(format!(
                "'{plugin_name}' has no stem before '{}'",
                self.suffix
            )));
        }

        let file = format!("{}-apiplugin.json", stem.to_lowercase());
        Ok(root.join(plugin_name).join(file))
    }
}

/// Default manifest search roots
///
/// `<config>/omni/conduit` and `<data>/omni/conduit` per platform conventions.
#[must_use]
pub fn default_manifest_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        roots.push(config_dir.join("omni").join("conduit"));
    }

    if let Some(data_dir) = directories::BaseDirs::new().map(|d| d.data_dir().to_path_buf()) {
        roots.push(data_dir.join("omni").join("conduit"));
    }

    roots
}
