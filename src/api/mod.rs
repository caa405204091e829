//! Provider API clients.
//!
//! Each client is a stateless request builder and response parser for one
//! documented endpoint family. Clients return parsed payloads untransformed;
//! domain interpretation (win/loss from scores, merge policy) lives in the
//! aggregation layer.

mod market;
mod news;
mod sports;
pub mod stream;

pub use market::{MarketClient, Quote, SymbolMatch, SymbolSearchResponse};
pub use news::{NewsArticle, NewsCategory, NewsClient};
pub use sports::{
    EventsResponse, SportsClient, SportsEvent, SportsTeam, TeamSearchResponse,
};
pub use stream::{
    PriceTick, ReconnectingTickStream, StreamEvent, StreamUpdate, TickSource, WsTickSource,
};

use crate::error::{Error, Result};
use std::time::Duration;

/// The three external data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Market,
    Sports,
    News,
}

impl Provider {
    /// Stable key used in the credentials blob.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Sports => "sports",
            Self::News => "news",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Market => write!(f, "Market"),
            Self::Sports => write!(f, "Sports"),
            Self::News => write!(f, "News"),
        }
    }
}

/// Build the shared HTTP client with an explicit per-request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(Error::Http)
}

/// Fail with a domain-tagged error on a non-success status.
pub(crate) fn check_status(
    response: &reqwest::Response,
    provider: Provider,
    endpoint: &'static str,
) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::provider(provider, endpoint, status.as_u16()))
    }
}
