//! Configuration settings for Pulseboard.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider API configuration.
    pub api: ApiConfig,
    /// Tick stream reconnection configuration.
    pub stream: StreamConfig,
    /// Polling refresh configuration.
    pub refresh: RefreshConfig,
    /// Search-as-you-type configuration.
    pub search: SearchConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Provider API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Market/news provider base URL.
    pub market_base_url: String,
    /// Market provider trade-tick WebSocket URL.
    pub market_ws_url: String,
    /// Sports provider base URL.
    pub sports_base_url: String,
    /// Sports provider API key (the provider ships a public demo key).
    pub sports_api_key: String,
    /// Request timeout in seconds, applied to every provider request.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            market_base_url: "https://finnhub.io/api/v1".to_string(),
            market_ws_url: "wss://ws.finnhub.io".to_string(),
            sports_base_url: "https://www.thesportsdb.com/api/v1/json".to_string(),
            sports_api_key: "3".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Tick stream reconnection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Initial reconnect delay in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum reconnect delay in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Polling refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Stock quote refresh interval in seconds.
    pub stocks_interval_secs: u64,
    /// Sports events refresh interval in seconds.
    pub sports_interval_secs: u64,
    /// News headlines refresh interval in seconds.
    pub news_interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            stocks_interval_secs: 15,
            sports_interval_secs: 120,
            news_interval_secs: 120,
        }
    }
}

/// Search-as-you-type configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Debounce window for symbol search in milliseconds.
    pub symbol_debounce_ms: u64,
    /// Debounce window for team search in milliseconds.
    pub team_debounce_ms: u64,
    /// Minimum query length for symbol search.
    pub symbol_min_len: usize,
    /// Minimum query length for team search.
    pub team_min_len: usize,
    /// Maximum number of results to display.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            symbol_debounce_ms: 300,
            team_debounce_ms: 400,
            symbol_min_len: 1,
            team_min_len: 2,
            max_results: 10,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for the driver tick (debounce/poll checks).
    pub tick_rate_ms: u64,
    /// Number of past and upcoming events to keep per team.
    pub events_per_team: usize,
    /// Show status bar.
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            events_per_team: 5,
            show_status_bar: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Manually refresh the current view.
    pub refresh: String,
    /// Switch to stocks view.
    pub stocks: String,
    /// Switch to sports view.
    pub sports: String,
    /// Switch to news view.
    pub news: String,
    /// Open search.
    pub search: String,
    /// Remove the selected watchlist symbol or followed team.
    pub remove: String,
    /// Cycle the news category.
    pub category: String,
    /// Open the API token prompt.
    pub token: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            stocks: "1".to_string(),
            sports: "2".to_string(),
            news: "3".to_string(),
            search: "/".to_string(),
            remove: "x".to_string(),
            category: "c".to_string(),
            token: "t".to_string(),
        }
    }
}
