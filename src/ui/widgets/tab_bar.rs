//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};

/// Tab bar with per-view item counts.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let tabs = [
            ("1", "Stocks", store.stocks.watchlist.len(), View::Stocks),
            ("2", "Sports", store.sports.teams.len(), View::Sports),
            ("3", "News", store.news.articles.len(), View::News),
        ];

        let mut spans = vec![Span::raw(" ")];

        for (key, name, count, view) in tabs {
            let is_selected = store.app.current_view == view;

            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };

            spans.push(Span::styled(
                format!("[{key}] "),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(name, name_style));
            spans.push(Span::styled(
                format!(" ({count})"),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw("  "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
