//! Caller-owned registry of loaded plugins

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::manifest::{LoadedPlugin, PluginArguments};
use crate::{Error, Result};

/// Summary of a registered plugin
#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    /// Plugin name (registry key)
    pub name: String,

    /// Plugin description, if any
    pub description: Option<String>,

    /// Names of the callable operations
    pub operations: Vec<String>,
}

/// Registry of loaded plugins, keyed by plugin name
///
/// The host owns and mutates the registry, one insertion per successful
/// load. Duplicate handling lives here rather than in the loader: an
/// already-registered name keeps its existing plugin.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, LoadedPlugin>,
}

impl PluginRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded plugin
    ///
    /// Returns whether the plugin was inserted; a name that is already
    /// registered is skipped.
    pub fn register(&mut self, plugin: LoadedPlugin) -> bool {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            tracing::debug!(plugin = %name, "plugin already registered, skipping");
            return false;
        }

        tracing::info!(
            plugin = %name,
            operations = plugin.operations().count(),
            "registered plugin"
        );
        self.plugins.insert(name, plugin);
        true
    }

    /// Get a plugin by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LoadedPlugin> {
        self.plugins.get(name)
    }

    /// List all registered plugins
    #[must_use]
    pub fn list(&self) -> Vec<&LoadedPlugin> {
        self.plugins.values().collect()
    }

    /// Summaries of all registered plugins, sorted by name
    #[must_use]
    pub fn info(&self) -> Vec<PluginInfo> {
        let mut info: Vec<PluginInfo> = self
            .plugins
            .values()
            .map(|p| PluginInfo {
                name: p.name().to_string(),
                description: p.description().map(String::from),
                operations: p.operations().map(String::from).collect(),
            })
            .collect();
        info.sort_by(|a, b| a.name.cmp(&b.name));
        info
    }

    /// Number of registered plugins
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugin is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Invoke an operation on a registered plugin
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown plugin or operation, or
    /// whatever the operation itself reports.
    pub async fn invoke(
        &self,
        plugin: &str,
        operation: &str,
        args: &PluginArguments,
    ) -> Result<Value> {
        let Some(found) = self.plugins.get(plugin) else {
            return Err(Error::NotFound(format!("plugin '{plugin}'")));
        };
        found.invoke(operation, args).await
    }
}
