//! Input event types and key-binding matching.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => Key::Other,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// Get the character if this is a plain character input.
    pub fn char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter").
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected_ctrl = false;
        let mut expected_alt = false;
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected_ctrl = true,
                "alt" => expected_alt = true,
                _ => expected_key = part,
            }
        }

        if self.modifiers.ctrl != expected_ctrl || self.modifiers.alt != expected_alt {
            return false;
        }

        match expected_key.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "backspace" => self.key == Key::Backspace,
            "tab" => self.key == Key::Tab,
            "up" => self.key == Key::Up,
            "down" => self.key == Key::Down,
            "left" => self.key == Key::Left,
            "right" => self.key == Key::Right,
            s if s.chars().count() == 1 => {
                let c = s.chars().next().unwrap_or('\0');
                self.key == Key::Char(c) || self.key == Key::Char(c.to_ascii_uppercase())
            }
            _ => false,
        }
    }
}
