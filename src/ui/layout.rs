//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area (the active view's table).
    pub main_area: Rect,
    /// Notification area (overlaid on the main content).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
            ])
            .split(area);

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area: chunks[2],
            notification_area: notification_rect(area),
        }
    }
}

/// Notification popup: half the width, centered, clamped for tiny terminals.
fn notification_rect(area: Rect) -> Rect {
    let width = (area.width / 2).max(20).min(area.width);
    let height = 3.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_reserves_two_bar_rows() {
        let layout = Layout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.tab_area.height, 1);
        assert_eq!(layout.main_area.height, 22);
    }

    #[test]
    fn test_notification_rect_fits_tiny_terminal() {
        let rect = notification_rect(Rect::new(0, 0, 10, 2));
        assert!(rect.width <= 10);
        assert!(rect.height <= 2);
    }
}
