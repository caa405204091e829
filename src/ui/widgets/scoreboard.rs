//! Followed-teams scoreboard widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::state::{GameOutcome, GameRecord, Store, TeamEvents};

use super::watchlist::{render_hint, status_suffix};

/// Scoreboard listing followed teams with recent and upcoming games.
pub struct Scoreboard;

impl Scoreboard {
    /// Render the scoreboard.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let header_cells = ["Team", "League", "Recent", "Next"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.sports.teams.teams().iter().map(|team| {
            let events = store.sports.events_by_team.get(&team.id);

            let (recent, recent_style) = match events {
                Some(events) => recent_summary(events),
                None => ("—".to_string(), Style::default().fg(Color::DarkGray)),
            };
            let next = events
                .map(next_summary)
                .unwrap_or_else(|| "—".to_string());

            let cells = vec![
                Cell::from(format!("{} ({})", team.name, team.abbreviation))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(team.league.as_str()),
                Cell::from(recent).style(recent_style),
                Cell::from(next),
            ];
            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Teams ({}){} ",
                    store.sports.teams.len(),
                    status_suffix(store.sports.status)
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.sports.selected_index);

        frame.render_stateful_widget(table, area, &mut state);

        if store.sports.teams.is_empty() {
            render_hint(frame, area, "No teams followed. Press / to search teams.");
        }
    }
}

/// Compact recent-form summary, most recent game first.
fn recent_summary(events: &TeamEvents) -> (String, Style) {
    if events.recent.is_empty() {
        return ("—".to_string(), Style::default().fg(Color::DarkGray));
    }
    let summary = events
        .recent
        .iter()
        .map(game_summary)
        .collect::<Vec<_>>()
        .join("  ");
    let style = match events.recent.first().and_then(|g| g.outcome) {
        Some(GameOutcome::Win) => Style::default().fg(Color::Green),
        Some(GameOutcome::Loss) => Style::default().fg(Color::Red),
        _ => Style::default(),
    };
    (summary, style)
}

fn game_summary(game: &GameRecord) -> String {
    match (game.outcome, game.home_score, game.away_score) {
        (Some(outcome), Some(home), Some(away)) => format!("{outcome} {home}-{away}"),
        _ => "?".to_string(),
    }
}

/// The next scheduled game, if one is known.
fn next_summary(events: &TeamEvents) -> String {
    match events.upcoming.first() {
        Some(game) => match &game.time {
            Some(time) => format!("{} {}", game.date, time),
            None => game.date.clone(),
        },
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn game(outcome: Option<GameOutcome>, home: Option<i64>, away: Option<i64>) -> GameRecord {
        GameRecord {
            id: "1".to_string(),
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            home_score: home,
            away_score: away,
            date: "2026-09-05".to_string(),
            time: Some("17:30:00".to_string()),
            outcome,
        }
    }

    #[test]
    fn test_recent_summary_joins_outcomes() {
        let events = TeamEvents {
            recent: vec![
                game(Some(GameOutcome::Win), Some(2), Some(1)),
                game(Some(GameOutcome::Draw), Some(0), Some(0)),
            ],
            upcoming: vec![],
        };
        let (summary, _) = recent_summary(&events);
        assert_eq!(summary, "W 2-1  D 0-0");
    }

    #[test]
    fn test_next_summary_includes_time_when_known() {
        let events = TeamEvents {
            recent: vec![],
            upcoming: vec![game(None, None, None)],
        };
        assert_eq!(next_summary(&events), "2026-09-05 17:30:00");
    }
}
