//! Search overlay widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::state::{Store, View};

use super::super::layout::centered_rect;

/// Popup for search-as-you-type symbol and team lookups.
pub struct SearchOverlay;

impl SearchOverlay {
    /// Render the search overlay.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let (title, items) = match store.app.current_view {
            View::Stocks => ("Search Symbols", symbol_items(store)),
            View::Sports => ("Search Teams", team_items(store)),
            View::News => return,
        };

        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        // Query line with a cursor marker
        let query = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(store.app.input_buffer.as_str()),
            Span::styled("▌", Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(query), chunks[0]);

        let has_items = !items.is_empty();
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if has_items {
            state.select(Some(store.app.search_selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}

fn symbol_items(store: &Store) -> Vec<ListItem<'_>> {
    store
        .stocks
        .search_results
        .iter()
        .map(|m| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", m.display_symbol),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(m.description.as_str()),
                Span::styled(
                    format!("  {}", m.kind),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect()
}

fn team_items(store: &Store) -> Vec<ListItem<'_>> {
    store
        .sports
        .search_results
        .iter()
        .map(|t| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<24}", t.name),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(t.league.as_str(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect()
}
