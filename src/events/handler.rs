//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Clone, Copy)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
}

impl EventHandler {
    /// Create a new event handler with the given key bindings.
    pub fn new(keybindings: KeyBindings) -> Self {
        Self {
            keybindings,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            if let CrosstermEvent::Key(key) = event
                && let Some(action) = self.handle_key(key)
            {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Search | InputMode::Token => self.handle_editing_mode(key, snapshot),
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let input = super::InputEvent::from(key);

        // Global shortcuts
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RefreshCurrent);
        }
        if input.matches(&self.keybindings.token) {
            return Some(Action::SetInputMode(InputMode::Token));
        }

        // View switching
        if input.matches(&self.keybindings.stocks) {
            return Some(Action::SetView(View::Stocks));
        }
        if input.matches(&self.keybindings.sports) {
            return Some(Action::SetView(View::Sports));
        }
        if input.matches(&self.keybindings.news) {
            return Some(Action::SetView(View::News));
        }

        // Navigation
        if input.matches(&self.keybindings.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&self.keybindings.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }

        if key.code == KeyCode::Esc {
            return Some(Action::DismissNotification);
        }

        // View-specific actions
        match snapshot.current_view {
            View::Stocks | View::Sports => {
                if input.matches(&self.keybindings.search) {
                    return Some(Action::SetInputMode(InputMode::Search));
                }
                if input.matches(&self.keybindings.remove) {
                    return Some(Action::RemoveSelected);
                }
                None
            }
            View::News => {
                if input.matches(&self.keybindings.category) {
                    return Some(Action::CycleNewsCategory);
                }
                None
            }
        }
    }

    fn handle_editing_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Up if snapshot.input_mode == InputMode::Search => Some(Action::ScrollUp),
            KeyCode::Down if snapshot.input_mode == InputMode::Search => Some(Action::ScrollDown),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler_with(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default());
        handler.update_store_snapshot(store);
        handler
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_normal_mode_quit() {
        let store = store();
        let handler = handler_with(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_search_mode_chars_edit_buffer() {
        let mut store = store();
        store.reduce(Action::SetInputMode(InputMode::Search));
        let handler = handler_with(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::Submit)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::SetInputMode(InputMode::Normal))
        ));
    }

    #[test]
    fn test_category_cycle_only_in_news_view() {
        let mut store = store();
        let handler = handler_with(&store);
        assert!(handler.handle_key(press(KeyCode::Char('c'))).is_none());

        store.reduce(Action::SetView(View::News));
        let handler = handler_with(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('c'))),
            Some(Action::CycleNewsCategory)
        ));
    }
}
