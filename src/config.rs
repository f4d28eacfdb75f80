//! Auth settings for manifest plugin loading
//!
//! Settings are explicit structs handed to binding construction; nothing is
//! read from ambient global state. [`SsoConfig::from_env`] exists as a
//! convenience for hosts that configure through the environment.

use secrecy::SecretString;
use url::Url;

use crate::{Error, Result};

/// Single sign-on settings for dependencies using bearer-token auth
#[derive(Debug)]
pub struct SsoConfig {
    /// OAuth client (application) ID
    pub client_id: String,

    /// Directory (tenant) ID
    pub tenant_id: String,

    /// Authorization scopes requested for the token
    pub scopes: Vec<String>,

    /// Redirect URI registered for the client
    pub redirect_uri: String,

    /// Manifest dependency keys the token applies to
    pub dependency_keys: Vec<String>,

    /// Server URL override for those dependencies
    pub server_url_override: Option<Url>,
}

impl SsoConfig {
    /// Read SSO settings from `CONDUIT_SSO_*` environment variables
    ///
    /// Returns `None` when `CONDUIT_SSO_CLIENT_ID` is unset. Scopes and
    /// dependency keys are comma separated; the tenant defaults to `common`
    /// and the redirect URI to `http://localhost`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("CONDUIT_SSO_CLIENT_ID").ok()?;
        let tenant_id =
            std::env::var("CONDUIT_SSO_TENANT_ID").unwrap_or_else(|_| "common".to_string());
        let scopes = std::env::var("CONDUIT_SSO_SCOPES")
            .map(|s| split_csv(&s))
            .unwrap_or_default();
        let redirect_uri = std::env::var("CONDUIT_SSO_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost".to_string());
        let dependency_keys = std::env::var("CONDUIT_SSO_DEPENDENCY_KEYS")
            .map(|s| split_csv(&s))
            .unwrap_or_default();

        Some(Self {
            client_id,
            tenant_id,
            scopes,
            redirect_uri,
            dependency_keys,
            server_url_override: None,
        })
    }
}

/// Static API key injected into outgoing requests for one dependency
#[derive(Debug)]
pub struct ApiKeyBinding {
    /// Manifest dependency key the API key applies to
    pub dependency_key: String,

    /// Query parameter name the key is sent as
    pub query_param: String,

    /// The key itself
    pub api_key: SecretString,

    /// Server URL override for this dependency
    pub server_url_override: Option<Url>,
}

/// Auth settings for a loading run
///
/// Built once per process invocation and consumed by
/// [`build_bindings`](crate::auth::build_bindings).
#[derive(Debug, Default)]
pub struct AuthSettings {
    /// OAuth SSO settings, when any dependency needs bearer auth
    pub sso: Option<SsoConfig>,

    /// Static API key bindings
    pub api_keys: Vec<ApiKeyBinding>,
}

impl AuthSettings {
    /// Check that every prerequisite setting is present and well formed
    ///
    /// Runs before any network call; binding construction refuses to acquire
    /// credentials when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for empty scopes, blank identifiers, an
    /// unparseable redirect URI, or a dependency key bound more than once.
    pub fn validate(&self) -> Result<()> {
        let mut seen_keys = Vec::new();

        if let Some(sso) = &self.sso {
            if sso.client_id.trim().is_empty() {
                return Err(Error::Config("missing SSO client ID".to_string()));
            }
            if sso.tenant_id.trim().is_empty() {
                return Err(Error::Config("missing SSO tenant ID".to_string()));
            }
            if sso.scopes.is_empty() {
                return Err(Error::Config(
                    "missing authorization scopes for single sign-on".to_string(),
                ));
            }
            if Url::parse(&sso.redirect_uri).is_err() {
                return Err(Error::Config(format!(
                    "invalid SSO redirect URI: {}",
                    sso.redirect_uri
                )));
            }
            if sso.dependency_keys.is_empty() {
                return Err(Error::Config(
                    "single sign-on configured without any dependency keys".to_string(),
                ));
            }
            for key in &sso.dependency_keys {
                push_key(&mut seen_keys, key)?;
            }
        }

        for binding in &self.api_keys {
            if binding.query_param.trim().is_empty() {
                return Err(Error::Config(format!(
                    "missing query parameter name for dependency '{}'",
                    binding.dependency_key
                )));
            }
            push_key(&mut seen_keys, &binding.dependency_key)?;
        }

        Ok(())
    }
}

/// Record a dependency key, rejecting blanks and duplicates
fn push_key<'a>(seen: &mut Vec<&'a str>, key: &'a str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::Config("blank dependency key".to_string()));
    }
    if seen.contains(&key) {
        return Err(Error::Config(format!(
            "dependency key '{key}' bound more than once"
        )));
    }
    seen.push(key);
    Ok(())
}

/// Split a comma-separated list, dropping empty segments
fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
