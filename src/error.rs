//! Error types for the Pulseboard application.

use thiserror::Error;

use crate::api::Provider;

/// The main error type for Pulseboard.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// HTTP transport errors (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider endpoint answered with a non-success status
    #[error("{provider} request failed: {endpoint} returned status {status}")]
    Provider {
        provider: Provider,
        endpoint: &'static str,
        status: u16,
    },

    /// WebSocket errors from the tick stream
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Local storage errors (preference/credential blobs)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Create a provider error for a failed endpoint call.
    pub fn provider(provider: Provider, endpoint: &'static str, status: u16) -> Self {
        Self::Provider {
            provider,
            endpoint,
            status,
        }
    }

    /// Check if this error is transient (a retry on the next tick may succeed).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Provider { .. } | Self::WebSocket(_) | Self::Channel(_)
        )
    }
}
