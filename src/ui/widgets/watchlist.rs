//! Watchlist table widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use rust_decimal::Decimal;

use crate::refresh::RefreshStatus;
use crate::state::Store;

/// Watchlist quote table.
pub struct WatchlistTable;

impl WatchlistTable {
    /// Render the watchlist.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let rows_data = store.stocks.rows();

        let header_cells = ["Symbol", "Price", "Change", "% Chg", "High", "Low"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = rows_data.iter().map(|(symbol, quote)| {
            let cells = match quote {
                Some(quote) => {
                    let change_style = change_style(quote.change);
                    vec![
                        Cell::from(*symbol).style(Style::default().add_modifier(Modifier::BOLD)),
                        Cell::from(format!("{:.2}", quote.current)),
                        Cell::from(format_signed(quote.change)).style(change_style),
                        Cell::from(format_percent(quote.percent_change)).style(change_style),
                        Cell::from(format!("{:.2}", quote.high)),
                        Cell::from(format!("{:.2}", quote.low)),
                    ]
                }
                // No snapshot yet: only the symbol is known.
                None => vec![
                    Cell::from(*symbol).style(Style::default().fg(Color::DarkGray)),
                    Cell::from("—"),
                    Cell::from("—"),
                    Cell::from("—"),
                    Cell::from("—"),
                    Cell::from("—"),
                ],
            };
            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Watchlist ({}){} ",
                    store.stocks.watchlist.len(),
                    status_suffix(store.stocks.status)
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.stocks.selected_index);

        frame.render_stateful_widget(table, area, &mut state);

        if store.stocks.watchlist.is_empty() {
            render_hint(frame, area, "Watchlist is empty. Press / to search symbols.");
        } else if !store.app.has_market_token {
            render_hint(frame, area, "No market token. Press t to set one.");
        }
    }
}

fn change_style(change: Option<Decimal>) -> Style {
    match change {
        Some(c) if c > Decimal::ZERO => Style::default().fg(Color::Green),
        Some(c) if c < Decimal::ZERO => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::DarkGray),
    }
}

fn format_signed(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v > Decimal::ZERO => format!("+{v:.2}"),
        Some(v) => format!("{v:.2}"),
        None => "—".to_string(),
    }
}

fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v > Decimal::ZERO => format!("+{v:.2}%"),
        Some(v) => format!("{v:.2}%"),
        None => "—".to_string(),
    }
}

pub(super) fn status_suffix(status: RefreshStatus) -> String {
    match status {
        RefreshStatus::Idle => String::new(),
        other => format!(" · {other}"),
    }
}

pub(super) fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    let line = Line::from(vec![Span::styled(
        hint,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )]);
    let hint_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(2),
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(Paragraph::new(line), hint_area);
}
