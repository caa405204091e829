//! News feed widget.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::state::Store;

use super::watchlist::{render_hint, status_suffix};

/// Headline table for the active category.
pub struct NewsFeed;

impl NewsFeed {
    /// Render the news feed.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let header_cells = ["Time", "Source", "Headline"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = store.news.articles.iter().map(|article| {
            let cells = vec![
                Cell::from(format_time(article.datetime)).style(Style::default().fg(Color::DarkGray)),
                Cell::from(article.source.as_str()).style(Style::default().fg(Color::Cyan)),
                Cell::from(article.headline.as_str()),
            ];
            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(16),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " News: {}{} · press c to cycle ",
                    store.news.category,
                    status_suffix(store.news.status)
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.news.selected_index);

        frame.render_stateful_widget(table, area, &mut state);

        if !store.app.has_market_token {
            render_hint(frame, area, "No market token. Press t to set one.");
        }
    }
}

fn format_time(unix_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_time() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_time(1_700_000_000), "11-14 22:13");
    }
}
