//! Market API token prompt.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::state::Store;

use super::super::layout::centered_rect;

/// Popup for entering the market provider API token.
pub struct TokenPrompt;

impl TokenPrompt {
    /// Render the token prompt. The token itself is masked.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let popup_area = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup_area);

        let masked = "•".repeat(store.app.input_buffer.chars().count());
        let lines = vec![
            Line::from(Span::raw("Paste your market data API token:")),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Yellow)),
                Span::raw(masked),
                Span::styled("▌", Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save · Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let prompt = Paragraph::new(lines).block(
            Block::default()
                .title(" API Token ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        frame.render_widget(prompt, popup_area);
    }
}
