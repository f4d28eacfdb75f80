//! Conduit - manifest-driven plugin loading with per-dependency auth
//!
//! Loads named plugins from API manifest documents on disk and attaches the
//! right authentication to each API dependency a plugin declares: an OAuth
//! bearer token for organizational single sign-on, or a static API key
//! injected into the outgoing request. Manifest parsing and
//! schema-to-function mapping stay behind the [`ManifestImporter`] seam;
//! this crate owns manifest location, auth binding construction, sequential
//! batch loading, and the registry plugins are invoked through.
//!
//! # Loading flow
//!
//! ```text
//! ┌──────────────┐ validate ┌────────────────┐      ┌───────────────┐
//! │ AuthSettings ├─────────▶│ build_bindings │─────▶│ DependencyMap │
//! └──────────────┘          └───────┬────────┘      └───────┬───────┘
//!                                   │ token acquired               │
//!                                   ▼ once, up front               ▼
//!                          ┌──────────────────┐      ┌─────────────────────┐
//!                          │ CredentialSource │      │ ExecutionParameters │
//!                          └──────────────────┘      └──────────┬──────────┘
//!                                                               │
//!    ┌──────────────┐      ┌──────────────────┐                 │
//!    │ PluginLoader ├─────▶│ ManifestImporter │◀────────────────┘
//!    └──────┬───────┘      └──────────────────┘
//!           │ LoadedPlugin
//!           ▼
//!    ┌────────────────┐
//!    │ PluginRegistry │──▶ invoke(plugin, operation, args)
//!    └────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use conduit_plugins::{
//!     AuthSettings, BatchPolicy, ExecutionParameters, PluginLoader, PluginRegistry,
//!     build_bindings,
//! };
//!
//! let bindings = build_bindings(settings, &credentials).await?;
//! let params = ExecutionParameters {
//!     dependencies: bindings,
//!     ..Default::default()
//! };
//!
//! let loader = PluginLoader::new(manifest_root, importer);
//! let report = loader
//!     .load_many(&["MessagesPlugin", "CalendarPlugin"], &params, BatchPolicy::default())
//!     .await?;
//!
//! let mut registry = PluginRegistry::new();
//! for plugin in report.into_loaded() {
//!     registry.register(plugin);
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod loader;
pub mod manifest;

pub use auth::{
    AuthStrategy, CachedToken, CredentialSource, QueryApiKey, RequestMutator, TokenProvider,
    TokenRequest, build_bindings,
};
pub use config::{ApiKeyBinding, AuthSettings, SsoConfig};
pub use error::{Error, Result};
pub use loader::{
    BatchPolicy, BatchReport, DependencyMap, DependencyParameters, ExecutionParameters,
    PluginInfo, PluginLoader, PluginRegistry,
};
pub use manifest::{
    ApiPluginLocator, LoadedPlugin, ManifestImporter, ManifestLocator, PLUGIN_NAME_SUFFIX,
    PluginArguments, PluginFunction, default_manifest_roots,
};
