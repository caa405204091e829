//! User preferences: the stock watchlist and followed teams.

use super::StoreDir;
use serde::{Deserialize, Serialize};
use tracing::warn;

const WATCHLIST_KEY: &str = "watchlist";
const TEAMS_KEY: &str = "teams";

/// Default seed symbols for a fresh install.
const DEFAULT_SYMBOLS: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// The ordered set of watched ticker symbols.
///
/// Set semantics with insertion order preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// The seed watchlist used when no blob exists yet.
    pub fn seed() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// An empty watchlist.
    pub fn empty() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Add a symbol. Duplicates are a no-op; returns whether it was added.
    pub fn add(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into().to_uppercase();
        if self.symbols.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    /// Remove a symbol; returns whether it was present.
    pub fn remove(&mut self, symbol: &str) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        self.symbols.len() != before
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// A followed sports team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    /// Stable provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short abbreviation.
    pub abbreviation: String,
    /// League the team plays in.
    pub league: String,
    /// Accent color (hex).
    pub color: String,
    /// Badge image URL, if the provider has one.
    pub badge_url: Option<String>,
}

/// The set of followed teams, unique by id, insertion order preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FollowedTeams {
    teams: Vec<Team>,
}

impl FollowedTeams {
    /// Follow a team. Duplicates (by id) are a no-op; returns whether added.
    pub fn add(&mut self, team: Team) -> bool {
        if self.teams.iter().any(|t| t.id == team.id) {
            return false;
        }
        self.teams.push(team);
        true
    }

    /// Unfollow a team by id; returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != id);
        self.teams.len() != before
    }

    /// Teams in insertion order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }
}

/// Persistence for user preferences.
///
/// Every mutation site saves immediately: the in-memory value and the
/// persisted blob never diverge.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: StoreDir,
}

impl PreferenceStore {
    /// Create a preference store over a blob directory.
    pub fn new(dir: StoreDir) -> Self {
        Self { dir }
    }

    /// Load the watchlist, seeding defaults on first run.
    pub fn load_watchlist(&self) -> Watchlist {
        self.dir.load_or(WATCHLIST_KEY, Watchlist::seed())
    }

    /// Persist the watchlist; storage errors are logged and swallowed.
    pub fn save_watchlist(&self, watchlist: &Watchlist) {
        if let Err(e) = self.dir.save(WATCHLIST_KEY, watchlist) {
            warn!(error = %e, "Failed to persist watchlist");
        }
    }

    /// Load the followed teams, defaulting to none.
    pub fn load_teams(&self) -> FollowedTeams {
        self.dir.load_or(TEAMS_KEY, FollowedTeams::default())
    }

    /// Persist the followed teams; storage errors are logged and swallowed.
    pub fn save_teams(&self, teams: &FollowedTeams) {
        if let Err(e) = self.dir.save(TEAMS_KEY, teams) {
            warn!(error = %e, "Failed to persist followed teams");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn arsenal() -> Team {
        Team {
            id: "133604".to_string(),
            name: "Arsenal".to_string(),
            abbreviation: "ARS".to_string(),
            league: "English Premier League".to_string(),
            color: "#EF0107".to_string(),
            badge_url: None,
        }
    }

    #[test]
    fn test_watchlist_duplicate_add_is_noop() {
        let mut list = Watchlist::empty();
        assert!(list.add("aapl"));
        assert!(!list.add("AAPL"));
        assert_eq!(list.symbols(), &["AAPL".to_string()]);
    }

    #[test]
    fn test_watchlist_preserves_insertion_order() {
        let mut list = Watchlist::empty();
        list.add("TSLA");
        list.add("AAPL");
        list.add("MSFT");
        list.remove("AAPL");
        assert_eq!(
            list.symbols(),
            &["TSLA".to_string(), "MSFT".to_string()]
        );
    }

    #[test]
    fn test_watchlist_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(StoreDir::at(tmp.path()));
        let mut list = Watchlist::empty();
        list.add("AAPL");
        list.add("TSLA");
        store.save_watchlist(&list);
        assert_eq!(store.load_watchlist(), list);
    }

    #[test]
    fn test_watchlist_seeds_on_first_run() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(StoreDir::at(tmp.path()));
        let list = store.load_watchlist();
        assert!(list.contains("AAPL"));
        assert_eq!(list.len(), DEFAULT_SYMBOLS.len());
    }

    #[test]
    fn test_teams_unique_by_id() {
        let mut teams = FollowedTeams::default();
        assert!(teams.add(arsenal()));
        assert!(!teams.add(arsenal()));
        assert_eq!(teams.len(), 1);
        assert!(teams.remove("133604"));
        assert!(teams.is_empty());
    }

    #[test]
    fn test_teams_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(StoreDir::at(tmp.path()));
        let mut teams = FollowedTeams::default();
        teams.add(arsenal());
        store.save_teams(&teams);
        assert_eq!(store.load_teams(), teams);
    }
}
