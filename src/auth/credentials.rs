//! Credential acquisition for single-sign-on dependencies
//!
//! Token acquisition is delegated to an injected [`CredentialSource`]. The
//! loader performs a single acquisition per run, before any plugin load, and
//! never retries; the call may suspend for interactive consent or network I/O.

use async_trait::async_trait;
use secrecy::SecretString;
use url::Url;

use crate::config::SsoConfig;
use crate::{Error, Result};

/// Parameters for a token acquisition
#[derive(Debug, Clone)]
pub struct TokenRequest {
    /// OAuth client (application) ID
    pub client_id: String,

    /// Directory (tenant) ID
    pub tenant_id: String,

    /// Authorization scopes to request
    pub scopes: Vec<String>,

    /// Redirect URI registered for the client
    pub redirect_uri: Url,
}

impl TokenRequest {
    /// Build a request from SSO settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the redirect URI does not parse.
    pub fn from_sso(sso: &SsoConfig) -> Result<Self> {
        let redirect_uri = Url::parse(&sso.redirect_uri).map_err(|e| {
            Error::Config(format!("invalid SSO redirect URI '{}': {e}", sso.redirect_uri))
        })?;

        Ok(Self {
            client_id: sso.client_id.clone(),
            tenant_id: sso.tenant_id.clone(),
            scopes: sso.scopes.clone(),
            redirect_uri,
        })
    }
}

/// Source of bearer tokens for single-sign-on dependencies
///
/// Implementations wrap a real credential manager (interactive or cached
/// silent authentication); tests substitute a canned token.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Acquire a token for the given request
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when no token can be produced.
    async fn acquire_token(&self, request: &TokenRequest) -> Result<SecretString>;
}
