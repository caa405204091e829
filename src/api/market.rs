//! Market data provider client (quotes and symbol search).
//!
//! Endpoints follow the Finnhub REST shape: the token rides along as a
//! query parameter on every request.

use super::{Provider, check_status};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Client for the market data provider.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// A point-in-time quote snapshot for one symbol.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Quote {
    /// Current price.
    #[serde(rename = "c")]
    pub current: Decimal,
    /// Absolute change since previous close.
    #[serde(rename = "d")]
    pub change: Option<Decimal>,
    /// Percent change since previous close.
    #[serde(rename = "dp")]
    pub percent_change: Option<Decimal>,
    /// Day high.
    #[serde(rename = "h")]
    pub high: Decimal,
    /// Day low.
    #[serde(rename = "l")]
    pub low: Decimal,
    /// Day open.
    #[serde(rename = "o")]
    pub open: Decimal,
    /// Previous close.
    #[serde(rename = "pc")]
    pub previous_close: Decimal,
}

/// Response of the symbol search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolSearchResponse {
    pub count: u64,
    #[serde(rename = "result")]
    pub matches: Vec<SymbolMatch>,
}

/// One symbol search match.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SymbolMatch {
    pub description: String,
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MarketClient {
    /// Create a client against a base URL with a user-supplied token.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch the current quote for one symbol.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let response = self
            .http
            .get(format!("{}/quote", self.base_url))
            .query(&[("symbol", symbol), ("token", &self.token)])
            .send()
            .await?;
        check_status(&response, Provider::Market, "quote")?;
        Ok(response.json().await?)
    }

    /// Search symbols matching a free-text query.
    pub async fn search_symbols(&self, query: &str) -> Result<SymbolSearchResponse> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("token", &self.token)])
            .send()
            .await?;
        check_status(&response, Provider::Market, "search")?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn client(server: &mockito::Server) -> MarketClient {
        MarketClient::new(reqwest::Client::new(), server.url(), "test-token")
    }

    #[tokio::test]
    async fn test_quote_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("symbol".into(), "AAPL".into()),
                mockito::Matcher::UrlEncoded("token".into(), "test-token".into()),
            ]))
            .with_body(r#"{"c":150.0,"d":1.5,"dp":1.01,"h":151.0,"l":148.5,"o":149.0,"pc":148.5}"#)
            .create_async()
            .await;

        let quote = client(&server).quote("AAPL").await.unwrap();
        assert_eq!(quote.current, dec!(150.0));
        assert_eq!(quote.change, Some(dec!(1.5)));
        assert_eq!(quote.previous_close, dec!(148.5));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_quote_null_change_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"c":10.0,"d":null,"dp":null,"h":10.0,"l":10.0,"o":10.0,"pc":10.0}"#)
            .create_async()
            .await;

        let quote = client(&server).quote("NEWIPO").await.unwrap();
        assert_eq!(quote.change, None);
        assert_eq!(quote.percent_change, None);
    }

    #[tokio::test]
    async fn test_quote_error_carries_endpoint() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = client(&server).quote("AAPL").await.unwrap_err();
        match err {
            Error::Provider {
                provider,
                endpoint,
                status,
            } => {
                assert_eq!(provider, Provider::Market);
                assert_eq!(endpoint, "quote");
                assert_eq!(status, 429);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_search_symbols() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "apple".into()))
            .with_body(
                r#"{"count":1,"result":[{"description":"APPLE INC","displaySymbol":"AAPL","symbol":"AAPL","type":"Common Stock"}]}"#,
            )
            .create_async()
            .await;

        let response = client(&server).search_symbols("apple").await.unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.matches[0].symbol, "AAPL");
    }
}
