//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::refresh::RefreshStatus;
use crate::state::{Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let stream_status = if store.app.stream_connected {
            Span::styled("● Live", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Polling", Style::default().fg(Color::DarkGray))
        };

        let (view_status, last_updated) = match store.app.current_view {
            View::Stocks => (store.stocks.status, store.stocks.last_updated),
            View::Sports => (store.sports.status, store.sports.last_updated),
            View::News => (store.news.status, store.news.last_updated),
        };

        let status_span = match view_status {
            RefreshStatus::Idle => Span::raw(""),
            RefreshStatus::Loading => Span::styled(
                " loading… ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            RefreshStatus::Refreshing => Span::styled(
                " refreshing… ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            RefreshStatus::Error => Span::styled(
                " error — press r to retry ",
                Style::default().fg(Color::Red),
            ),
        };

        let updated = last_updated
            .map(|t| format!(" updated {} ", t.format("%H:%M:%S")))
            .unwrap_or_default();

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::DarkGray));

        let left_content = vec![
            Span::styled(
                " Pulseboard ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            stream_status,
            Span::raw(" | "),
            status_span,
            Span::styled(updated, Style::default().fg(Color::DarkGray)),
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint
        let left_len: usize = status_line.spans.iter().map(|s| s.content.len()).sum();
        let right_len = help_hint.content.len();
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
