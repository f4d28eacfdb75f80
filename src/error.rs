//! Error types for the plugin loader

use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building auth bindings or loading plugins
#[derive(Debug, Error)]
pub enum Error {
    /// Required setting missing or invalid; detected before any I/O
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential source failed to produce a token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Plugin name does not follow the manifest naming convention
    #[error("invalid plugin name: {0}")]
    InvalidPluginName(String),

    /// A specific plugin failed to import
    #[error("plugin '{plugin}' failed to load: {source}")]
    Load {
        /// Name of the plugin that failed
        plugin: String,
        /// Underlying cause
        source: Box<Error>,
    },

    /// Plugin or operation not found
    #[error("not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error as a load failure for the named plugin
    #[must_use]
    pub fn load(plugin: impl Into<String>, source: Self) -> Self {
        Self::Load {
            plugin: plugin.into(),
            source: Box::new(source),
        }
    }

    /// Name of the plugin this error is about, if any
    #[must_use]
    pub fn plugin(&self) -> Option<&str> {
        match self {
            Self::Load { plugin, .. } => Some(plugin),
            _ => None,
        }
    }
}
