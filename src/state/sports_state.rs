//! Sports domain state.

use crate::api::SportsTeam;
use crate::refresh::RefreshStatus;
use crate::store::FollowedTeams;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Outcome of a finished game from the followed team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "W"),
            Self::Loss => write!(f, "L"),
            Self::Draw => write!(f, "D"),
        }
    }
}

/// An immutable record of a past game or the schedule of a future one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub date: String,
    pub time: Option<String>,
    /// `None` for games not yet played.
    pub outcome: Option<GameOutcome>,
}

/// Recent and upcoming games for one team, capped for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamEvents {
    pub recent: Vec<GameRecord>,
    pub upcoming: Vec<GameRecord>,
}

/// State for followed teams and their event groups.
#[derive(Debug)]
pub struct SportsState {
    /// Followed teams in display order.
    pub teams: FollowedTeams,
    /// Events grouped by team id. A missing key means "no data yet".
    pub events_by_team: HashMap<String, TeamEvents>,
    /// Currently selected team row.
    pub selected_index: Option<usize>,
    /// Refresh status for the domain.
    pub status: RefreshStatus,
    /// Last successful update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
    /// Team search results for the overlay.
    pub search_results: Vec<SportsTeam>,
}

impl Default for SportsState {
    fn default() -> Self {
        Self {
            teams: FollowedTeams::default(),
            events_by_team: HashMap::new(),
            selected_index: None,
            status: RefreshStatus::default(),
            last_updated: None,
            search_results: Vec::new(),
        }
    }
}

impl SportsState {
    /// Whether any event data is cached.
    pub fn has_cache(&self) -> bool {
        !self.events_by_team.is_empty()
    }

    /// The currently selected team's id.
    pub fn selected_team_id(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.teams.teams().get(i))
            .map(|t| t.id.as_str())
    }

    /// Drop cached events for an unfollowed team.
    pub fn evict(&mut self, team_id: &str) {
        self.events_by_team.remove(team_id);
        let len = self.teams.len();
        if let Some(index) = self.selected_index
            && index >= len
        {
            self.selected_index = len.checked_sub(1);
        }
    }
}
