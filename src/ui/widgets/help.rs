//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            section("Navigation"),
            Line::from(""),
            entry("j/↓  ", "Move down"),
            entry("k/↑  ", "Move up"),
            entry("Enter", "Select/confirm"),
            entry("Esc  ", "Dismiss/cancel"),
            Line::from(""),
            section("Views"),
            Line::from(""),
            entry("1    ", "Stocks view"),
            entry("2    ", "Sports view"),
            entry("3    ", "News view"),
            Line::from(""),
            section("Actions"),
            Line::from(""),
            entry("/    ", "Search symbols or teams"),
            entry("x    ", "Remove selected symbol/team"),
            entry("c    ", "Cycle news category"),
            entry("r    ", "Refresh current view"),
            entry("t    ", "Set market API token"),
            entry("?    ", "Toggle help"),
            entry("q    ", "Quit"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn entry<'a>(key: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key} "), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
