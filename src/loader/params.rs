//! Execution parameters handed to the manifest importer

use std::collections::HashMap;

use url::Url;

use crate::auth::AuthStrategy;
use crate::{Error, Result};

/// Execution parameters for one API dependency
#[derive(Debug, Clone, Default)]
pub struct DependencyParameters {
    /// How calls to this dependency authenticate
    pub auth: Option<AuthStrategy>,

    /// Base URL override for this dependency
    pub server_url_override: Option<Url>,
}

/// Auth and overrides per manifest dependency key
///
/// Lookup is exact-match on the key as the manifest declares it; the map
/// never interprets keys, so short identifiers and full base URLs both work.
/// Built once per run and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    entries: HashMap<String, DependencyParameters>,
}

impl DependencyMap {
    /// Empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind parameters to a dependency key
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the key is already bound; each
    /// dependency has at most one binding.
    pub fn bind(
        &mut self,
        key: impl Into<String>,
        params: DependencyParameters,
    ) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::Config(format!(
                "dependency key '{key}' bound more than once"
            )));
        }
        self.entries.insert(key, params);
        Ok(())
    }

    /// Parameters bound to `key`, exact match
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DependencyParameters> {
        self.entries.get(key)
    }

    /// Bound dependency keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of bound dependencies
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dependency is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parameter bundle for one plugin load
///
/// Created fresh per load call and never persisted by the loader. Cloning is
/// cheap: auth strategies are shared behind `Arc` and the client handle is a
/// reference-counted pool.
#[derive(Debug, Clone, Default)]
pub struct ExecutionParameters {
    /// Shared HTTP client for plugin initialization and calls
    pub http_client: Option<reqwest::Client>,

    /// User agent advertised by plugin HTTP calls
    pub user_agent: Option<String>,

    /// Per-dependency auth and overrides
    pub dependencies: DependencyMap,
}
