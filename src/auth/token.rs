//! Token capability handed to bearer-auth dependencies

use secrecy::SecretString;

/// Accessor for the current bearer token
///
/// The token is resolved once per run, before any plugin load; providers hand
/// back the already-acquired value without re-authenticating.
pub trait TokenProvider: Send + Sync {
    /// Current token
    fn token(&self) -> SecretString;
}

/// Token acquired eagerly at binding time and reused for every load
pub struct CachedToken(SecretString);

impl CachedToken {
    /// Wrap an acquired token
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl TokenProvider for CachedToken {
    fn token(&self) -> SecretString {
        self.0.clone()
    }
}
