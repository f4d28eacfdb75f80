//! Sequential plugin loading with an explicit batch policy

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::params::ExecutionParameters;
use crate::manifest::{ApiPluginLocator, LoadedPlugin, ManifestImporter, ManifestLocator};
use crate::{Error, Result};

/// What to do when a plugin in a batch fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Abort on the first failure; remaining plugins are never attempted
    #[default]
    FailFast,

    /// Attempt every plugin and report per-plugin outcomes
    CollectAll,
}

/// Per-plugin outcomes of a batch load, in load order
#[derive(Debug, Default)]
pub struct BatchReport {
    results: Vec<(String, Result<LoadedPlugin>)>,
}

impl BatchReport {
    /// Per-plugin results in load order
    #[must_use]
    pub fn results(&self) -> &[(String, Result<LoadedPlugin>)] {
        &self.results
    }

    /// Consume the report, keeping only the successfully loaded plugins
    #[must_use]
    pub fn into_loaded(self) -> Vec<LoadedPlugin> {
        self.results
            .into_iter()
            .filter_map(|(_, result)| result.ok())
            .collect()
    }

    /// Names and errors of the plugins that failed
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.results
            .iter()
            .filter_map(|(name, result)| result.as_ref().err().map(|e| (name.as_str(), e)))
    }

    /// Whether every plugin loaded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    /// Number of plugins attempted
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was attempted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Loads named plugins from manifests under a root directory
///
/// Loads are performed one at a time, in caller order. The loader retains no
/// plugin state between calls; loading the same name twice produces two
/// independent plugins, and dedup, when wanted, belongs to the registry.
pub struct PluginLoader {
    root: PathBuf,
    importer: Arc<dyn ManifestImporter>,
    locator: Arc<dyn ManifestLocator>,
}

impl PluginLoader {
    /// Loader over `root` with the default `{stem}-apiplugin.json` locator
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, importer: Arc<dyn ManifestImporter>) -> Self {
        Self {
            root: root.into(),
            importer,
            locator: Arc::new(ApiPluginLocator::default()),
        }
    }

    /// Replace the manifest locator
    #[must_use]
    pub fn with_locator(mut self, locator: Arc<dyn ManifestLocator>) -> Self {
        self.locator = locator;
        self
    }

    /// Root directory manifests are resolved under
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a single named plugin
    ///
    /// Resolves the manifest path and delegates to the importer. The plugin
    /// is either fully produced or not at all; there is no partial result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] carrying the plugin name and the underlying
    /// cause (bad name, unreadable manifest, importer failure).
    pub async fn load_one(
        &self,
        name: &str,
        params: &ExecutionParameters,
    ) -> Result<LoadedPlugin> {
        match self.try_load(name, params).await {
            Ok(plugin) => {
                tracing::info!(plugin = %name, "loaded plugin");
                Ok(plugin)
            }
            Err(e) => {
                tracing::error!(plugin = %name, error = %e, "plugin load failed");
                Err(Error::load(name, e))
            }
        }
    }

    async fn try_load(&self, name: &str, params: &ExecutionParameters) -> Result<LoadedPlugin> {
        let path = self.locator.manifest_path(&self.root, name)?;
        tracing::debug!(plugin = %name, path = %path.display(), "importing manifest");
        self.importer.import(name, &path, params).await
    }

    /// Load plugins in order under the given batch policy
    ///
    /// With [`BatchPolicy::FailFast`] (the default) the first failure
    /// propagates and the remaining names are never attempted. With
    /// [`BatchPolicy::CollectAll`] every name is attempted and the report
    /// carries per-plugin outcomes.
    ///
    /// # Errors
    ///
    /// Under `FailFast`, the first [`Error::Load`] encountered.
    pub async fn load_many(
        &self,
        names: &[&str],
        params: &ExecutionParameters,
        policy: BatchPolicy,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for &name in names {
            let result = self.load_one(name, params).await;
            match policy {
                BatchPolicy::FailFast => {
                    report.results.push((name.to_string(), Ok(result?)));
                }
                BatchPolicy::CollectAll => {
                    report.results.push((name.to_string(), result));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Records import calls and fails for configured names
    #[derive(Default)]
    struct StubImporter {
        fail: HashSet<String>,
        calls: Mutex<Vec<(String, PathBuf)>>,
    }

    impl StubImporter {
        fn failing(names: &[&str]) -> Self {
            Self {
                fail: names.iter().map(ToString::to_string).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn imported(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(name, _)| name.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ManifestImporter for StubImporter {
        async fn import(
            &self,
            name: &str,
            manifest_path: &Path,
            _params: &ExecutionParameters,
        ) -> Result<LoadedPlugin> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), manifest_path.to_path_buf()));
            if self.fail.contains(name) {
                return Err(Error::Config("manifest rejected".to_string()));
            }
            Ok(LoadedPlugin::new(name))
        }
    }

    fn loader(importer: StubImporter) -> (Arc<StubImporter>, PluginLoader) {
        let importer = Arc::new(importer);
        let loader = PluginLoader::new("/plugins", importer.clone());
        (importer, loader)
    }

    #[tokio::test]
    async fn load_one_resolves_the_manifest_path() {
        let (importer, loader) = loader(StubImporter::default());
        let params = ExecutionParameters::default();

        let plugin = loader.load_one("MessagesPlugin", &params).await.unwrap();
        assert_eq!(plugin.name(), "MessagesPlugin");

        let calls = importer.calls.lock().unwrap();
        assert_eq!(
            calls[0].1,
            Path::new("/plugins/MessagesPlugin/messages-apiplugin.json")
        );
    }

    #[tokio::test]
    async fn importer_failure_is_wrapped_with_the_plugin_name() {
        let (_, loader) = loader(StubImporter::failing(&["MessagesPlugin"]));
        let params = ExecutionParameters::default();

        let err = loader.load_one("MessagesPlugin", &params).await.unwrap_err();
        assert_eq!(err.plugin(), Some("MessagesPlugin"));
        let Error::Load { source, .. } = err else {
            panic!("expected a load error");
        };
        assert!(matches!(*source, Error::Config(_)));
    }

    #[tokio::test]
    async fn bad_name_never_reaches_the_importer() {
        let (importer, loader) = loader(StubImporter::default());
        let params = ExecutionParameters::default();

        let err = loader.load_one("nosuffix", &params).await.unwrap_err();
        assert_eq!(err.plugin(), Some("nosuffix"));
        let Error::Load { source, .. } = err else {
            panic!("expected a load error");
        };
        assert!(matches!(*source, Error::InvalidPluginName(_)));
        assert!(importer.imported().is_empty());
    }

    #[tokio::test]
    async fn fail_fast_stops_at_the_first_failure() {
        let (importer, loader) = loader(StubImporter::failing(&["P2Plugin"]));
        let params = ExecutionParameters::default();

        let err = loader
            .load_many(&["P1Plugin", "P2Plugin", "P3Plugin"], &params, BatchPolicy::FailFast)
            .await
            .unwrap_err();

        assert_eq!(err.plugin(), Some("P2Plugin"));
        // P3 was never attempted
        assert_eq!(importer.imported(), vec!["P1Plugin", "P2Plugin"]);
    }

    #[tokio::test]
    async fn collect_all_attempts_every_plugin() {
        let (importer, loader) = loader(StubImporter::failing(&["P2Plugin"]));
        let params = ExecutionParameters::default();

        let report = loader
            .load_many(
                &["P1Plugin", "P2Plugin", "P3Plugin"],
                &params,
                BatchPolicy::CollectAll,
            )
            .await
            .unwrap();

        assert_eq!(importer.imported(), vec!["P1Plugin", "P2Plugin", "P3Plugin"]);
        assert_eq!(report.len(), 3);
        assert!(!report.is_complete());

        let failed: Vec<&str> = report.failures().map(|(name, _)| name).collect();
        assert_eq!(failed, vec!["P2Plugin"]);

        let loaded = report.into_loaded();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name(), "P1Plugin");
        assert_eq!(loaded[1].name(), "P3Plugin");
    }

    #[tokio::test]
    async fn loading_twice_produces_independent_plugins() {
        let (importer, loader) = loader(StubImporter::default());
        let params = ExecutionParameters::default();

        let first = loader.load_one("MessagesPlugin", &params).await.unwrap();
        let second = loader.load_one("MessagesPlugin", &params).await.unwrap();

        assert_eq!(first.name(), second.name());
        assert_eq!(importer.imported().len(), 2);
    }

    #[tokio::test]
    async fn custom_locator_is_honored() {
        struct FlatLocator;

        impl ManifestLocator for FlatLocator {
            fn manifest_path(&self, root: &Path, plugin_name: &str) -> Result<PathBuf> {
                Ok(root.join(format!("{plugin_name}.json")))
            }
        }

        let importer = Arc::new(StubImporter::default());
        let loader = PluginLoader::new("/flat", importer.clone())
            .with_locator(Arc::new(FlatLocator));

        loader
            .load_one("anything", &ExecutionParameters::default())
            .await
            .unwrap();

        let calls = importer.calls.lock().unwrap();
        assert_eq!(calls[0].1, Path::new("/flat/anything.json"));
    }
}
