//! State management for Pulseboard.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern: input and completed fetches dispatch actions, the
//! store reduces them, the UI renders from the store.

mod app_state;
mod news_state;
mod sports_state;
mod stocks_state;

pub use app_state::{AppState, InputMode, View};
pub use news_state::NewsState;
pub use sports_state::{GameOutcome, GameRecord, SportsState, TeamEvents};
pub use stocks_state::StocksState;

use crate::api::{NewsArticle, PriceTick, Quote, SportsTeam, SymbolMatch};
use crate::error::Result;
use crate::refresh::{Domain, RefreshStatus};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    SetInputMode(InputMode),

    // Input buffer editing (search query / token entry)
    InputChar(char),
    InputBackspace,
    /// Enter pressed: select a search result or submit the token.
    Submit,

    // Search completions (tagged for stale-response detection)
    SymbolSearchFinished {
        seq: u64,
        matches: Option<Vec<SymbolMatch>>,
    },
    TeamSearchFinished {
        seq: u64,
        teams: Option<Vec<SportsTeam>>,
    },
    /// Mirror accepted symbol results into display state.
    SymbolResults(Vec<SymbolMatch>),
    /// Mirror accepted team results into display state.
    TeamResults(Vec<SportsTeam>),

    // Refresh
    /// Manual retry for the current view's domain.
    RefreshCurrent,
    StocksFetched(HashMap<String, Quote>),
    SportsFetched(HashMap<String, TeamEvents>),
    NewsFetched(Option<Vec<NewsArticle>>),
    SetStatus(Domain, RefreshStatus),

    // Live ticks
    TickBatch(Vec<PriceTick>),
    StreamConnected(bool),

    // Preferences
    /// Remove the selected watchlist symbol or followed team.
    RemoveSelected,
    CycleNewsCategory,

    // UI
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Stocks domain state.
    pub stocks: StocksState,
    /// Sports domain state.
    pub sports: SportsState,
    /// News domain state.
    pub news: NewsState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            stocks: StocksState::default(),
            sports: SportsState::default(),
            news: NewsState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    ///
    /// Effectful actions (refresh triggers, search lifecycle, preference
    /// mutations) are intercepted by the app before reaching here.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => {
                self.app.current_view = view;
            }
            Action::SetInputMode(mode) => {
                self.app.input_mode = mode;
                self.app.clear_input();
                self.app.search_selected = 0;
                if mode == InputMode::Normal {
                    self.stocks.search_results.clear();
                    self.sports.search_results.clear();
                }
            }

            // Input editing
            Action::InputChar(c) => self.app.push_char(c),
            Action::InputBackspace => self.app.pop_char(),

            // Search result mirrors
            Action::SymbolResults(matches) => {
                self.stocks.search_results = matches;
                self.app.search_selected = 0;
            }
            Action::TeamResults(teams) => {
                self.sports.search_results = teams;
                self.app.search_selected = 0;
            }

            // Merges from completed fetches
            Action::StocksFetched(quotes) => {
                // Per-symbol wholesale replace; absent symbols keep
                // last-known-good snapshots.
                for (symbol, quote) in quotes {
                    self.stocks.quotes.insert(symbol, quote);
                }
                self.stocks.last_updated = Some(chrono::Utc::now());
            }
            Action::SportsFetched(events) => {
                for (team_id, team_events) in events {
                    self.sports.events_by_team.insert(team_id, team_events);
                }
                self.sports.last_updated = Some(chrono::Utc::now());
            }
            Action::NewsFetched(articles) => {
                // Replaced wholesale on success; a failed refetch keeps the
                // previous list.
                if let Some(articles) = articles {
                    self.news.articles = articles;
                    self.news.last_updated = Some(chrono::Utc::now());
                }
            }
            Action::SetStatus(domain, status) => match domain {
                Domain::Stocks => self.stocks.status = status,
                Domain::Sports => self.sports.status = status,
                Domain::News => self.news.status = status,
            },

            // Live ticks
            Action::TickBatch(ticks) => {
                for tick in ticks {
                    self.stocks.apply_tick(&tick);
                }
            }
            Action::StreamConnected(connected) => {
                self.app.stream_connected = connected;
            }

            // UI
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }

            // Effectful actions are handled by the app, not the reducer.
            Action::Submit
            | Action::SymbolSearchFinished { .. }
            | Action::TeamSearchFinished { .. }
            | Action::RefreshCurrent
            | Action::RemoveSelected
            | Action::CycleNewsCategory => {}
        }
    }

    fn scroll(&mut self, delta: i32) {
        if self.app.input_mode == InputMode::Search {
            let len = match self.app.current_view {
                View::Stocks => self.stocks.search_results.len(),
                View::Sports => self.sports.search_results.len(),
                View::News => 0,
            };
            if len > 0 {
                let current = self.app.search_selected as i32;
                self.app.search_selected =
                    ((current + delta).max(0) as usize).min(len.saturating_sub(1));
            }
            return;
        }

        match self.app.current_view {
            View::Stocks => {
                let max = self.stocks.watchlist.len().saturating_sub(1);
                let current = self.stocks.selected_index.unwrap_or(0) as i32;
                self.stocks.selected_index = Some(((current + delta).max(0) as usize).min(max));
            }
            View::Sports => {
                let max = self.sports.teams.len().saturating_sub(1);
                let current = self.sports.selected_index.unwrap_or(0) as i32;
                self.sports.selected_index = Some(((current + delta).max(0) as usize).min(max));
            }
            View::News => {
                let max = self.news.articles.len().saturating_sub(1);
                let current = self.news.selected_index.unwrap_or(0) as i32;
                self.news.selected_index = Some(((current + delta).max(0) as usize).min(max));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    fn quote(price: rust_decimal::Decimal) -> Quote {
        Quote {
            current: price,
            change: Some(dec!(1.0)),
            percent_change: Some(dec!(0.5)),
            high: price,
            low: price,
            open: price,
            previous_close: price,
        }
    }

    #[test]
    fn test_stocks_merge_keeps_last_known_good() {
        let mut store = store();
        store.stocks.watchlist.add("AAPL");
        store.stocks.watchlist.add("MSFT");

        let mut first = HashMap::new();
        first.insert("AAPL".to_string(), quote(dec!(150.0)));
        first.insert("MSFT".to_string(), quote(dec!(300.0)));
        store.reduce(Action::StocksFetched(first));

        // Next refresh only AAPL succeeded; MSFT keeps its old snapshot.
        let mut second = HashMap::new();
        second.insert("AAPL".to_string(), quote(dec!(151.0)));
        store.reduce(Action::StocksFetched(second));

        assert_eq!(store.stocks.quotes["AAPL"].current, dec!(151.0));
        assert_eq!(store.stocks.quotes["MSFT"].current, dec!(300.0));
    }

    #[test]
    fn test_sports_merge_keeps_events_for_absent_teams() {
        let mut store = store();
        let record = GameRecord {
            id: "1".to_string(),
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            home_score: Some(2),
            away_score: Some(1),
            date: "2026-08-22".to_string(),
            time: None,
            outcome: Some(GameOutcome::Win),
        };
        let mut first = HashMap::new();
        first.insert(
            "133604".to_string(),
            TeamEvents {
                recent: vec![record],
                upcoming: vec![],
            },
        );
        store.reduce(Action::SportsFetched(first));

        // Next refresh omitted the team (a fetch failed); the cached
        // events stay visible.
        store.reduce(Action::SportsFetched(HashMap::new()));
        assert_eq!(store.sports.events_by_team["133604"].recent.len(), 1);
    }

    #[test]
    fn test_failed_news_fetch_keeps_previous_articles() {
        let mut store = store();
        let article = NewsArticle {
            id: 1,
            headline: "Old".to_string(),
            source: "Wire".to_string(),
            datetime: 0,
            summary: String::new(),
            url: String::new(),
            category: "general".to_string(),
        };
        store.reduce(Action::NewsFetched(Some(vec![article.clone()])));
        store.reduce(Action::NewsFetched(None));
        assert_eq!(store.news.articles, vec![article]);
    }

    #[test]
    fn test_tick_updates_quote_in_place() {
        let mut store = store();
        store.stocks.watchlist.add("AAPL");
        let mut quotes = HashMap::new();
        quotes.insert("AAPL".to_string(), quote(dec!(150.0)));
        store.reduce(Action::StocksFetched(quotes));

        store.reduce(Action::TickBatch(vec![PriceTick {
            symbol: "AAPL".to_string(),
            price: dec!(152.5),
            volume: dec!(10),
            timestamp: 0,
        }]));
        assert_eq!(store.stocks.quotes["AAPL"].current, dec!(152.5));
    }

    #[test]
    fn test_tick_for_unknown_symbol_is_ignored() {
        let mut store = store();
        store.reduce(Action::TickBatch(vec![PriceTick {
            symbol: "ZZZZ".to_string(),
            price: dec!(1.0),
            volume: dec!(1),
            timestamp: 0,
        }]));
        assert!(store.stocks.quotes.is_empty());
    }

    #[test]
    fn test_scroll_clamps_to_bounds() {
        let mut store = store();
        store.stocks.watchlist.add("AAPL");
        store.stocks.watchlist.add("MSFT");

        store.reduce(Action::ScrollDown);
        store.reduce(Action::ScrollDown);
        store.reduce(Action::ScrollDown);
        assert_eq!(store.stocks.selected_index, Some(1));

        store.reduce(Action::ScrollUp);
        store.reduce(Action::ScrollUp);
        assert_eq!(store.stocks.selected_index, Some(0));
    }

    #[test]
    fn test_leaving_search_mode_clears_results() {
        let mut store = store();
        store.reduce(Action::SymbolResults(vec![SymbolMatch {
            description: "APPLE INC".to_string(),
            display_symbol: "AAPL".to_string(),
            symbol: "AAPL".to_string(),
            kind: "Common Stock".to_string(),
        }]));
        store.reduce(Action::SetInputMode(InputMode::Normal));
        assert!(store.stocks.search_results.is_empty());
    }
}
