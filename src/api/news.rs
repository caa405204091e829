//! News provider client (headlines by category).
//!
//! Served by the market data provider, so it authenticates with the same
//! token.

use super::{Provider, check_status};
use crate::error::Result;
use serde::Deserialize;

/// Mutually-exclusive news category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsCategory {
    #[default]
    General,
    Business,
    Technology,
}

impl NewsCategory {
    /// Query parameter value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Business => "business",
            Self::Technology => "technology",
        }
    }

    /// The next category in the cycle order.
    pub fn next(&self) -> Self {
        match self {
            Self::General => Self::Business,
            Self::Business => Self::Technology,
            Self::Technology => Self::General,
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "General"),
            Self::Business => write!(f, "Business"),
            Self::Technology => write!(f, "Technology"),
        }
    }
}

/// One news headline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewsArticle {
    pub id: i64,
    pub headline: String,
    pub source: String,
    /// Unix timestamp (seconds).
    pub datetime: i64,
    pub summary: String,
    pub url: String,
    pub category: String,
}

/// Client for the news endpoints.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NewsClient {
    /// Create a client against a base URL with a user-supplied token.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch headlines for one category.
    pub async fn headlines(&self, category: NewsCategory) -> Result<Vec<NewsArticle>> {
        let response = self
            .http
            .get(format!("{}/news", self.base_url))
            .query(&[("category", category.as_str()), ("token", &self.token)])
            .send()
            .await?;
        check_status(&response, Provider::News, "news")?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_cycle_is_closed() {
        let start = NewsCategory::General;
        let mut category = start;
        for _ in 0..3 {
            category = category.next();
        }
        assert_eq!(category, start);
    }

    #[tokio::test]
    async fn test_headlines_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/news")
            .match_query(mockito::Matcher::UrlEncoded(
                "category".into(),
                "business".into(),
            ))
            .with_body(
                r#"[{"id":1,"headline":"Markets rally","source":"Wire","datetime":1700000000,"summary":"...","url":"https://example.com/1","category":"business"}]"#,
            )
            .create_async()
            .await;

        let client = NewsClient::new(reqwest::Client::new(), server.url(), "tok");
        let articles = client.headlines(NewsCategory::Business).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].headline, "Markets rally");
    }

    #[tokio::test]
    async fn test_headlines_error_is_domain_tagged() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/news")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = NewsClient::new(reqwest::Client::new(), server.url(), "tok");
        let err = client.headlines(NewsCategory::General).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Provider {
                provider: Provider::News,
                endpoint: "news",
                status: 500,
            }
        ));
    }
}
