//! Build the per-dependency auth map from settings

use std::sync::Arc;

use super::credentials::{CredentialSource, TokenRequest};
use super::strategy::{AuthStrategy, QueryApiKey};
use super::token::CachedToken;
use crate::config::AuthSettings;
use crate::loader::{DependencyMap, DependencyParameters};
use crate::{Error, Result};

/// Build per-dependency auth bindings from settings
///
/// Settings are validated first; the credential source is never consulted
/// when validation fails. With SSO configured, the token is acquired once, up
/// front, and shared by every dependency key it covers: a single attempt, no
/// retry, no refresh mid-run. API-key dependencies get a query-parameter
/// mutator.
///
/// # Errors
///
/// Returns [`Error::Config`] for invalid settings and [`Error::Auth`] when
/// the credential source fails.
pub async fn build_bindings(
    settings: AuthSettings,
    credentials: &dyn CredentialSource,
) -> Result<DependencyMap> {
    settings.validate()?;

    let mut map = DependencyMap::new();

    if let Some(sso) = settings.sso {
        let request = TokenRequest::from_sso(&sso)?;
        tracing::debug!(
            client_id = %request.client_id,
            tenant_id = %request.tenant_id,
            scopes = ?request.scopes,
            "acquiring SSO token"
        );
        let token = credentials
            .acquire_token(&request)
            .await
            .map_err(|e| match e {
                Error::Auth(_) => e,
                other => Error::Auth(other.to_string()),
            })?;

        let provider = Arc::new(CachedToken::new(token));
        for key in sso.dependency_keys {
            map.bind(
                key,
                DependencyParameters {
                    auth: Some(AuthStrategy::Bearer(provider.clone())),
                    server_url_override: sso.server_url_override.clone(),
                },
            )?;
        }
    }

    for binding in settings.api_keys {
        let mutator = QueryApiKey::new(binding.query_param, binding.api_key);
        map.bind(
            binding.dependency_key,
            DependencyParameters {
                auth: Some(AuthStrategy::Mutator(Arc::new(mutator))),
                server_url_override: binding.server_url_override,
            },
        )?;
    }

    tracing::debug!(dependencies = map.len(), "auth bindings built");
    Ok(map)
}
