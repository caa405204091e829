//! Sports statistics provider client (team search, past and upcoming events).
//!
//! Endpoints follow the TheSportsDB shape: the API key is a path segment and
//! empty result sets come back as JSON `null` rather than an empty array.

use super::{Provider, check_status};
use crate::error::Result;
use serde::Deserialize;

/// Client for the sports statistics provider.
#[derive(Debug, Clone)]
pub struct SportsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response of the team search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamSearchResponse {
    /// `null` when nothing matched.
    pub teams: Option<Vec<SportsTeam>>,
}

/// A team as returned by the provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SportsTeam {
    #[serde(rename = "idTeam")]
    pub id: String,
    #[serde(rename = "strTeam")]
    pub name: String,
    #[serde(rename = "strTeamShort")]
    pub short_name: Option<String>,
    #[serde(rename = "strLeague")]
    pub league: String,
    #[serde(rename = "strColour1")]
    pub colour: Option<String>,
    #[serde(rename = "strTeamBadge")]
    pub badge_url: Option<String>,
}

/// Response of the past/upcoming events endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
    /// Past events (`eventslast.php`); `null` when none.
    #[serde(default)]
    pub results: Option<Vec<SportsEvent>>,
    /// Upcoming events (`eventsnext.php`); `null` when none.
    #[serde(default)]
    pub events: Option<Vec<SportsEvent>>,
}

impl EventsResponse {
    /// The event list regardless of which endpoint produced it.
    pub fn into_events(self) -> Vec<SportsEvent> {
        self.results.or(self.events).unwrap_or_default()
    }
}

/// A single game record, past or scheduled.
///
/// Scores arrive as strings and are `null` for games not yet played.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SportsEvent {
    #[serde(rename = "idEvent")]
    pub id: String,
    #[serde(rename = "strEvent")]
    pub name: String,
    #[serde(rename = "idHomeTeam")]
    pub home_team_id: String,
    #[serde(rename = "idAwayTeam")]
    pub away_team_id: String,
    #[serde(rename = "strHomeTeam")]
    pub home_team: String,
    #[serde(rename = "strAwayTeam")]
    pub away_team: String,
    #[serde(rename = "intHomeScore")]
    pub home_score: Option<String>,
    #[serde(rename = "intAwayScore")]
    pub away_score: Option<String>,
    #[serde(rename = "dateEvent")]
    pub date: String,
    #[serde(rename = "strTime")]
    pub time: Option<String>,
}

impl SportsClient {
    /// Create a client against a base URL with an API key.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Search teams matching a free-text name query.
    pub async fn search_teams(&self, query: &str) -> Result<TeamSearchResponse> {
        let response = self
            .http
            .get(format!(
                "{}/{}/searchteams.php",
                self.base_url, self.api_key
            ))
            .query(&[("t", query)])
            .send()
            .await?;
        check_status(&response, Provider::Sports, "searchteams")?;
        Ok(response.json().await?)
    }

    /// Fetch the most recent finished events for a team.
    pub async fn last_events(&self, team_id: &str) -> Result<EventsResponse> {
        let response = self
            .http
            .get(format!("{}/{}/eventslast.php", self.base_url, self.api_key))
            .query(&[("id", team_id)])
            .send()
            .await?;
        check_status(&response, Provider::Sports, "eventslast")?;
        Ok(response.json().await?)
    }

    /// Fetch the next scheduled events for a team.
    pub async fn next_events(&self, team_id: &str) -> Result<EventsResponse> {
        let response = self
            .http
            .get(format!("{}/{}/eventsnext.php", self.base_url, self.api_key))
            .query(&[("id", team_id)])
            .send()
            .await?;
        check_status(&response, Provider::Sports, "eventsnext")?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn client(server: &mockito::Server) -> SportsClient {
        SportsClient::new(reqwest::Client::new(), server.url(), "3")
    }

    #[tokio::test]
    async fn test_search_teams_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/3/searchteams.php")
            .match_query(mockito::Matcher::UrlEncoded("t".into(), "Arsenal".into()))
            .with_body(
                r##"{"teams":[{"idTeam":"133604","strTeam":"Arsenal","strTeamShort":"ARS","strLeague":"English Premier League","strColour1":"#EF0107","strTeamBadge":null}]}"##,
            )
            .create_async()
            .await;

        let response = client(&server).search_teams("Arsenal").await.unwrap();
        let teams = response.teams.unwrap();
        assert_eq!(teams[0].id, "133604");
        assert_eq!(teams[0].short_name.as_deref(), Some("ARS"));
    }

    #[tokio::test]
    async fn test_search_teams_null_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/3/searchteams.php")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"teams":null}"#)
            .create_async()
            .await;

        let response = client(&server).search_teams("zzzz").await.unwrap();
        assert!(response.teams.is_none());
    }

    #[tokio::test]
    async fn test_last_events_scores_are_strings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/3/eventslast.php")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "133604".into()))
            .with_body(
                r#"{"results":[{"idEvent":"1","strEvent":"Arsenal vs Chelsea","idHomeTeam":"133604","idAwayTeam":"133610","strHomeTeam":"Arsenal","strAwayTeam":"Chelsea","intHomeScore":"2","intAwayScore":"1","dateEvent":"2026-08-22","strTime":"15:00:00"}]}"#,
            )
            .create_async()
            .await;

        let events = client(&server).last_events("133604").await.unwrap().into_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].home_score.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_lookup_error_is_domain_tagged() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/3/eventsnext.php")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client(&server).next_events("133604").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Provider {
                provider: Provider::Sports,
                endpoint: "eventsnext",
                status: 503,
            }
        ));
    }
}
