//! Parallel fan-out fetch and merge.
//!
//! One request per watchlist symbol or followed team, issued concurrently.
//! A single item's failure yields an absent entry for that item only; the
//! refresh as a whole still succeeds. Callers treat a missing key as "no
//! data yet". Display ordering always follows the persisted preference
//! order, never response arrival order.

use crate::api::{MarketClient, Quote, SportsClient, SportsEvent};
use crate::state::{GameOutcome, GameRecord, TeamEvents};
use crate::store::Team;
use futures::future;
use std::collections::HashMap;
use tracing::warn;

/// Fetch quotes for every watchlist symbol in parallel.
///
/// The merged map only contains symbols whose fetch succeeded.
pub async fn fetch_quotes(client: &MarketClient, symbols: &[String]) -> HashMap<String, Quote> {
    let fetches = symbols.iter().map(|symbol| async move {
        (symbol.clone(), client.quote(symbol).await)
    });

    let mut merged = HashMap::new();
    for (symbol, result) in future::join_all(fetches).await {
        match result {
            Ok(quote) => {
                merged.insert(symbol, quote);
            }
            Err(e) => {
                warn!(symbol, error = %e, "Quote fetch failed, omitting symbol");
            }
        }
    }
    merged
}

/// Fetch recent and upcoming events for every followed team in parallel.
///
/// Each list is capped to the `cap` most recent/next games. A team is
/// absent from the merged map when either of its requests failed: the
/// merge only carries complete snapshots, so a transient half-failure
/// leaves the cached entry untouched instead of replacing one of its
/// lists with an empty one.
pub async fn fetch_team_events(
    client: &SportsClient,
    teams: &[Team],
    cap: usize,
) -> HashMap<String, TeamEvents> {
    let fetches = teams.iter().map(|team| async move {
        let last = client.last_events(&team.id).await;
        let next = client.next_events(&team.id).await;
        (team, last, next)
    });

    let mut merged = HashMap::new();
    for (team, last, next) in future::join_all(fetches).await {
        let (last, next) = match (last, next) {
            (Ok(last), Ok(next)) => (last, next),
            (last, next) => {
                let error = last.err().or(next.err());
                warn!(
                    team = %team.name,
                    error = %error.map(|e| e.to_string()).unwrap_or_default(),
                    "Event fetch failed, omitting team"
                );
                continue;
            }
        };
        merged.insert(
            team.id.clone(),
            TeamEvents {
                recent: convert_events(last.into_events(), &team.id, cap),
                upcoming: convert_events(next.into_events(), &team.id, cap),
            },
        );
    }
    merged
}

/// Convert provider events into game records for one team, capped.
///
/// Win/loss interpretation happens here, not in the client: the provider
/// only hands back raw scores.
fn convert_events(events: Vec<SportsEvent>, team_id: &str, cap: usize) -> Vec<GameRecord> {
    events
        .into_iter()
        .take(cap)
        .map(|event| {
            let home_score = parse_score(event.home_score.as_deref());
            let away_score = parse_score(event.away_score.as_deref());
            let outcome = game_outcome(team_id, &event, home_score, away_score);
            GameRecord {
                id: event.id,
                home_team: event.home_team,
                away_team: event.away_team,
                home_score,
                away_score,
                date: event.date,
                time: event.time,
                outcome,
            }
        })
        .collect()
}

fn parse_score(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse().ok())
}

fn game_outcome(
    team_id: &str,
    event: &SportsEvent,
    home_score: Option<i64>,
    away_score: Option<i64>,
) -> Option<GameOutcome> {
    let (home, away) = (home_score?, away_score?);
    let (own, other) = if event.home_team_id == team_id {
        (home, away)
    } else {
        (away, home)
    };
    Some(match own.cmp(&other) {
        std::cmp::Ordering::Greater => GameOutcome::Win,
        std::cmp::Ordering::Less => GameOutcome::Loss,
        std::cmp::Ordering::Equal => GameOutcome::Draw,
    })
}
