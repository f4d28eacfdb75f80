//! Manifest location and import
//!
//! Where plugin manifests live on disk, and the importer seam that turns a
//! manifest document into callable operations.

mod importer;
mod locate;

pub use importer::{LoadedPlugin, ManifestImporter, PluginArguments, PluginFunction};
pub use locate::{
    ApiPluginLocator, ManifestLocator, PLUGIN_NAME_SUFFIX, default_manifest_roots,
};
