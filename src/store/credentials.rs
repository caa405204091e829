//! Provider API credentials.
//!
//! Absence of a token is a valid state, not an error: fetches for that
//! provider are simply gated off until the user supplies one.

use super::StoreDir;
use crate::api::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const CREDENTIALS_KEY: &str = "credentials";

/// Mapping from provider name to an opaque token string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Credentials {
    tokens: HashMap<String, String>,
}

impl Credentials {
    /// Look up the token for a provider.
    ///
    /// News shares the market provider's token: the headlines endpoint is
    /// served by the same API.
    pub fn token(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Market | Provider::News => Provider::Market.key(),
            Provider::Sports => Provider::Sports.key(),
        };
        self.tokens.get(key).map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Store a token for a provider.
    pub fn set_token(&mut self, provider: Provider, token: impl Into<String>) {
        self.tokens.insert(provider.key().to_string(), token.into());
    }

    /// Whether the market token is present (gates market and news fetches).
    pub fn has_market_token(&self) -> bool {
        self.token(Provider::Market).is_some()
    }
}

/// Persistence for provider credentials.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: StoreDir,
}

impl CredentialStore {
    /// Create a credential store over a blob directory.
    pub fn new(dir: StoreDir) -> Self {
        Self { dir }
    }

    /// Load credentials, failing open to the empty mapping.
    pub fn get(&self) -> Credentials {
        self.dir.load_or(CREDENTIALS_KEY, Credentials::default())
    }

    /// Persist credentials. Storage errors are logged and swallowed: a
    /// token the user just typed stays usable in memory either way.
    pub fn set(&self, credentials: &Credentials) {
        if let Err(e) = self.dir.save(CREDENTIALS_KEY, credentials) {
            warn!(error = %e, "Failed to persist credentials");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_token_is_absent() {
        let mut creds = Credentials::default();
        creds.set_token(Provider::Market, "");
        assert_eq!(creds.token(Provider::Market), None);
        assert!(!creds.has_market_token());
    }

    #[test]
    fn test_news_shares_market_token() {
        let mut creds = Credentials::default();
        creds.set_token(Provider::Market, "tok123");
        assert_eq!(creds.token(Provider::News), Some("tok123"));
        assert_eq!(creds.token(Provider::Sports), None);
    }

    #[test]
    fn test_get_fails_open_on_corrupt_blob() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("credentials.json"), "][").unwrap();
        let store = CredentialStore::new(StoreDir::at(tmp.path()));
        assert_eq!(store.get(), Credentials::default());
    }

    #[test]
    fn test_failed_persist_keeps_in_memory_token_usable() {
        let tmp = tempfile::tempdir().unwrap();
        // A store rooted in a directory that does not exist: every write
        // fails and is swallowed.
        let store = CredentialStore::new(StoreDir::at(tmp.path().join("missing")));
        let mut creds = Credentials::default();
        creds.set_token(Provider::Market, "abc");
        store.set(&creds);

        // Disk lost the token, but the in-memory value is still the one
        // callers must keep using.
        assert_eq!(store.get(), Credentials::default());
        assert_eq!(creds.token(Provider::Market), Some("abc"));
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(StoreDir::at(tmp.path()));
        let mut creds = Credentials::default();
        creds.set_token(Provider::Market, "abc");
        store.set(&creds);
        assert_eq!(store.get(), creds);
    }
}
