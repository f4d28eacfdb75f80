//! Shared test utilities
//!
//! A canned credential source and a manifest importer stub standing in for
//! the external OpenAPI SDK: it reads the manifest document, wires each
//! declared operation to the auth bound for its dependency key, and answers
//! invocations with a description of the request it would have sent.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use conduit_plugins::{
    AuthStrategy, CredentialSource, Error, ExecutionParameters, LoadedPlugin, ManifestImporter,
    PLUGIN_NAME_SUFFIX, PluginArguments, PluginFunction, Result, SsoConfig, TokenRequest,
};
use reqwest::header::{AUTHORIZATION, HeaderValue, USER_AGENT};
use reqwest::{Method, Url};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};

/// Credential source handing out a fixed token, counting acquisitions
pub struct CannedCredentials {
    token: String,
    pub calls: AtomicUsize,
}

impl CannedCredentials {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn acquisitions(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialSource for CannedCredentials {
    async fn acquire_token(&self, _request: &TokenRequest) -> Result<SecretString> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SecretString::from(self.token.clone()))
    }
}

/// Manifest document shape understood by the stub importer
#[derive(Deserialize)]
struct StubManifest {
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "apiDependencies")]
    api_dependencies: HashMap<String, StubDependency>,
}

#[derive(Deserialize)]
struct StubDependency {
    #[serde(rename = "baseUrl")]
    base_url: String,
    operations: Vec<StubOperation>,
}

#[derive(Deserialize)]
struct StubOperation {
    id: String,
    path: String,
}

/// Stand-in for the external OpenAPI import SDK
pub struct StubSdkImporter;

#[async_trait]
impl ManifestImporter for StubSdkImporter {
    async fn import(
        &self,
        name: &str,
        manifest_path: &Path,
        params: &ExecutionParameters,
    ) -> Result<LoadedPlugin> {
        let raw = std::fs::read_to_string(manifest_path)?;
        let manifest: StubManifest = serde_json::from_str(&raw)?;

        let mut plugin = LoadedPlugin::new(name);
        if let Some(description) = manifest.description {
            plugin = plugin.with_description(description);
        }

        for (key, dependency) in manifest.api_dependencies {
            let bound = params.dependencies.get(&key);
            let auth = bound.and_then(|p| p.auth.clone());
            let base = bound
                .and_then(|p| p.server_url_override.clone())
                .map_or(dependency.base_url, |url| url.to_string());

            for operation in dependency.operations {
                plugin = plugin.with_function(
                    operation.id,
                    Arc::new(StubCall {
                        url: format!("{base}{}", operation.path),
                        auth: auth.clone(),
                        user_agent: params.user_agent.clone(),
                    }),
                );
            }
        }

        Ok(plugin)
    }
}

/// One wired operation: builds the request it would send and reports it
struct StubCall {
    url: String,
    auth: Option<AuthStrategy>,
    user_agent: Option<String>,
}

#[async_trait]
impl PluginFunction for StubCall {
    async fn invoke(&self, args: &PluginArguments) -> Result<Value> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("bad operation url '{}': {e}", self.url)))?;
        let mut request = reqwest::Request::new(Method::GET, url);

        for (key, value) in args.iter() {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            request.url_mut().query_pairs_mut().append_pair(key, &text);
        }

        if let Some(user_agent) = &self.user_agent {
            let value = HeaderValue::from_str(user_agent)
                .map_err(|e| Error::Config(format!("bad user agent: {e}")))?;
            request.headers_mut().insert(USER_AGENT, value);
        }

        if let Some(auth) = &self.auth {
            auth.apply(&mut request)?;
        }

        Ok(json!({
            "url": request.url().to_string(),
            "authorization": request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            "user_agent": request
                .headers()
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok()),
        }))
    }
}

/// SSO settings covering the given dependency keys
#[must_use]
pub fn graph_sso(dependency_keys: &[&str]) -> SsoConfig {
    SsoConfig {
        client_id: "client-123".to_string(),
        tenant_id: "tenant-456".to_string(),
        scopes: vec!["Mail.Read".to_string()],
        redirect_uri: "http://localhost".to_string(),
        dependency_keys: dependency_keys.iter().map(ToString::to_string).collect(),
        server_url_override: None,
    }
}

/// Write a manifest fixture under `root` following the naming convention
pub fn write_manifest(root: &Path, plugin_name: &str, contents: &str) {
    let stem = plugin_name
        .strip_suffix(PLUGIN_NAME_SUFFIX)
        .expect("fixture plugin names end with the suffix")
        .to_lowercase();
    let dir = root.join(plugin_name);
    std::fs::create_dir_all(&dir).expect("failed to create plugin directory");
    std::fs::write(dir.join(format!("{stem}-apiplugin.json")), contents)
        .expect("failed to write manifest fixture");
}
