//! Persisted local state: credentials and user preferences.
//!
//! Everything here is an opaque JSON blob keyed by name in the data
//! directory. Absent or corrupt blobs are replaced by defaults; there is
//! no migration logic. Writes are synchronous and keep the persisted value
//! in lockstep with the in-memory one.

mod credentials;
mod preferences;

pub use credentials::{CredentialStore, Credentials};
pub use preferences::{FollowedTeams, PreferenceStore, Team, Watchlist};

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::warn;

/// A directory of named JSON blobs.
#[derive(Debug, Clone)]
pub struct StoreDir {
    dir: PathBuf,
}

impl StoreDir {
    /// Open the default data directory, creating it if needed.
    pub fn open() -> Result<Self> {
        let dir = crate::config::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open a store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load a blob, substituting the default on any missing or corrupt data.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path(key);
        if !path.exists() {
            return default;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "Corrupt blob, falling back to default");
                    default
                }
            },
            Err(e) => {
                warn!(key, error = %e, "Unreadable blob, falling back to default");
                default
            }
        }
    }

    /// Save a blob synchronously.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path(key), content)?;
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StoreDir::at(tmp.path());
        let value: Vec<String> = store.load_or("absent", vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_load_corrupt_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
        let store = StoreDir::at(tmp.path());
        let value: Vec<u32> = store.load_or("bad", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StoreDir::at(tmp.path());
        store.save("nums", &vec![1u32, 2, 3]).unwrap();
        let value: Vec<u32> = store.load_or("nums", Vec::new());
        assert_eq!(value, vec![1, 2, 3]);
    }
}
