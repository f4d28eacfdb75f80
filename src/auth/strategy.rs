//! Request-level authentication strategies
//!
//! A dependency authenticates either by attaching a bearer token header or by
//! mutating the outgoing request in place (the API-key-as-query-parameter
//! scheme). Strategies are applied to the concrete [`reqwest::Request`] just
//! before it is sent.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::token::TokenProvider;
use crate::{Error, Result};

/// Mutates an outgoing request in place before it is sent
pub trait RequestMutator: Send + Sync {
    /// Apply the mutation
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be rewritten.
    fn mutate(&self, request: &mut reqwest::Request) -> Result<()>;
}

/// Appends a static API key to the request query string
pub struct QueryApiKey {
    param: String,
    key: SecretString,
}

impl QueryApiKey {
    /// Mutator sending `key` as the `param` query parameter
    #[must_use]
    pub fn new(param: impl Into<String>, key: SecretString) -> Self {
        Self {
            param: param.into(),
            key,
        }
    }
}

impl RequestMutator for QueryApiKey {
    fn mutate(&self, request: &mut reqwest::Request) -> Result<()> {
        request
            .url_mut()
            .query_pairs_mut()
            .append_pair(&self.param, self.key.expose_secret());
        Ok(())
    }
}

/// How calls to one API dependency authenticate
#[derive(Clone)]
pub enum AuthStrategy {
    /// Attach `Authorization: Bearer …` from the token provider
    Bearer(Arc<dyn TokenProvider>),

    /// Mutate the outgoing request (query string, headers) in place
    Mutator(Arc<dyn RequestMutator>),
}

impl AuthStrategy {
    /// Bearer strategy over a token provider
    #[must_use]
    pub fn bearer(provider: impl TokenProvider + 'static) -> Self {
        Self::Bearer(Arc::new(provider))
    }

    /// Mutator strategy over a request mutator
    #[must_use]
    pub fn mutator(mutator: impl RequestMutator + 'static) -> Self {
        Self::Mutator(Arc::new(mutator))
    }

    /// Apply the strategy to an outgoing request
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the token cannot be carried as a header
    /// value, or whatever error the mutator reports.
    pub fn apply(&self, request: &mut reqwest::Request) -> Result<()> {
        match self {
            Self::Bearer(provider) => {
                let token = provider.token();
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|e| {
                            Error::Auth(format!("token is not a valid header value: {e}"))
                        })?;
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
                Ok(())
            }
            Self::Mutator(mutator) => mutator.mutate(request),
        }
    }
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("AuthStrategy::Bearer"),
            Self::Mutator(_) => f.write_str("AuthStrategy::Mutator"),
        }
    }
}
