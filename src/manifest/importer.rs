//! Manifest import surface
//!
//! Parsing a manifest document and mapping its operations to callables is the
//! importer's job; the loader only hands it a path plus execution parameters
//! and registers what comes back.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::loader::ExecutionParameters;
use crate::{Error, Result};

/// Key-value argument bundle for a plugin operation
#[derive(Debug, Clone, Default)]
pub struct PluginArguments(HashMap<String, Value>);

impl PluginArguments {
    /// Empty argument bundle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument, returning the bundle for chaining
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an argument
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Value of the named argument, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate over arguments
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of arguments
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bundle is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PluginArguments {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PluginArguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single callable operation of a loaded plugin
#[async_trait]
pub trait PluginFunction: Send + Sync {
    /// What the operation does
    fn description(&self) -> &str {
        ""
    }

    /// Invoke with the given arguments
    async fn invoke(&self, args: &PluginArguments) -> Result<Value>;
}

/// A named, loaded collection of callable operations
///
/// Produced by a [`ManifestImporter`]; operation names are the sanitized
/// identifiers derived from the manifest's operation IDs. The loader hands
/// the plugin to the caller and does not retain it.
#[derive(Clone)]
pub struct LoadedPlugin {
    name: String,
    description: Option<String>,
    functions: HashMap<String, Arc<dyn PluginFunction>>,
}

impl LoadedPlugin {
    /// Empty plugin with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            functions: HashMap::new(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a callable operation
    #[must_use]
    pub fn with_function(
        mut self,
        operation: impl Into<String>,
        function: Arc<dyn PluginFunction>,
    ) -> Self {
        self.functions.insert(operation.into(), function);
        self
    }

    /// Plugin name (registry key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plugin description, if any
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Names of the callable operations
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Look up an operation by name
    #[must_use]
    pub fn get(&self, operation: &str) -> Option<&Arc<dyn PluginFunction>> {
        self.functions.get(operation)
    }

    /// Invoke a named operation
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown operation, or whatever the
    /// operation itself reports.
    pub async fn invoke(&self, operation: &str, args: &PluginArguments) -> Result<Value> {
        let Some(function) = self.functions.get(operation) else {
            return Err(Error::NotFound(format!(
                "operation '{operation}' on plugin '{}'",
                self.name
            )));
        };
        function.invoke(args).await
    }
}

impl fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("name", &self.name)
            .field("operations", &self.functions.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Imports a manifest document and produces the plugin's callable operations
///
/// Implementations own manifest parsing and schema-to-function mapping; they
/// fail on a malformed manifest, an unreachable dependency, or a schema
/// mismatch. Per-dependency auth and overrides arrive through the execution
/// parameters, keyed exactly as the manifest declares its dependencies.
#[async_trait]
pub trait ManifestImporter: Send + Sync {
    /// Import the plugin described by the manifest at `manifest_path`
    ///
    /// # Errors
    ///
    /// Returns an error when the manifest cannot be read, parsed, or mapped
    /// to callable operations.
    async fn import(
        &self,
        name: &str,
        manifest_path: &Path,
        params: &ExecutionParameters,
    ) -> Result<LoadedPlugin>;
}
