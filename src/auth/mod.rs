//! Per-dependency authentication
//!
//! Credential acquisition, token capabilities, and the request-level
//! strategies (bearer header vs. request mutation) bound to each manifest
//! dependency key.

mod bindings;
mod credentials;
mod strategy;
mod token;

pub use bindings::build_bindings;
pub use credentials::{CredentialSource, TokenRequest};
pub use strategy::{AuthStrategy, QueryApiKey, RequestMutator};
pub use token::{CachedToken, TokenProvider};
