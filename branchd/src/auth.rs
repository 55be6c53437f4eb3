//! Credential verification
//!
//! The login endpoint and the branch-route header gate both go through the
//! `CredentialVerifier` trait, so a real identity provider can be swapped in
//! without touching any caller. Credentials travel with each request; no
//! ambient global credential state exists anywhere in the service.

use std::sync::Arc;

/// Capability to verify a username/password pair
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// Single static credential pair, the reference deployment's scheme.
/// Overridable through `BRANCHD_USERNAME` / `BRANCHD_PASSWORD`.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_env() -> Self {
        let username = std::env::var("BRANCHD_USERNAME").unwrap_or_else(|_| "barath".to_string());
        let password = std::env::var("BRANCHD_PASSWORD").unwrap_or_else(|_| "12345".to_string());
        Self::new(username, password)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
