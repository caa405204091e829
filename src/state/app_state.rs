//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Stocks,
    Sports,
    News,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a search query for the current view's provider.
    Search,
    /// Typing the market provider API token.
    Token,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current search/token input.
    pub input_buffer: String,
    /// Cursor position in input buffer.
    pub cursor_position: usize,
    /// Selected index within the search result list.
    pub search_selected: usize,
    /// Whether the market token is present (gates market and news fetches).
    pub has_market_token: bool,
    /// Whether the live tick stream is connected.
    pub stream_connected: bool,
}

impl AppState {
    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Search | InputMode::Token)
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character to the input buffer.
    pub fn push_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            if let Some((idx, _)) = self.input_buffer[..self.cursor_position]
                .char_indices()
                .next_back()
            {
                self.input_buffer.remove(idx);
                self.cursor_position = idx;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_input_buffer_editing() {
        let mut state = AppState::default();
        state.push_char('a');
        state.push_char('r');
        state.push_char('s');
        assert_eq!(state.input_buffer, "ars");

        state.pop_char();
        assert_eq!(state.input_buffer, "ar");

        state.clear_input();
        assert_eq!(state.input_buffer, "");
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut state = AppState::default();
        state.pop_char();
        assert_eq!(state.input_buffer, "");
    }
}
