//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{HelpPanel, NewsFeed, Scoreboard, SearchOverlay, StatusBar, TabBar, TokenPrompt, WatchlistTable};

use crate::state::{InputMode, Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        // Render status bar
        StatusBar::render(frame, layout.status_area, store);

        // Render tab bar
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current view
        match store.app.current_view {
            View::Stocks => WatchlistTable::render(frame, layout.main_area, store),
            View::Sports => Scoreboard::render(frame, layout.main_area, store),
            View::News => NewsFeed::render(frame, layout.main_area, store),
        }

        // Render input overlays
        match store.app.input_mode {
            InputMode::Search => SearchOverlay::render(frame, frame.area(), store),
            InputMode::Token => TokenPrompt::render(frame, frame.area(), store),
            InputMode::Normal => {}
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
