//! Color theme definitions for the terminal view
//!
//! Defines colors and styles used by the control, chips and dropdown.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the terminal view
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the keyboard-active row
    pub active_bg: Color,
    /// Foreground color for the keyboard-active row
    pub active_fg: Color,
    /// Color for the matched part of a label
    pub match_highlight: Color,
    /// Color for the cursor indicator and focused borders
    pub cursor: Color,
    /// Color for checked boxes
    pub checked: Color,
    /// Color for chips
    pub chip: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            active_bg: Color::Blue,
            active_fg: Color::White,
            match_highlight: Color::Yellow,
            cursor: Color::Cyan,
            checked: Color::Green,
            chip: Color::Magenta,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Create a light theme
    #[must_use]
    pub const fn light() -> Self {
        Self {
            active_bg: Color::LightBlue,
            active_fg: Color::Black,
            match_highlight: Color::Red,
            cursor: Color::Blue,
            checked: Color::Green,
            chip: Color::Magenta,
            border: Color::Gray,
            dimmed: Color::Gray,
        }
    }

    /// Style for the keyboard-active row
    #[must_use]
    pub fn active_style(&self) -> Style {
        Style::default()
            .bg(self.active_bg)
            .fg(self.active_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for ordinary rows
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the matched part of a label
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for checked boxes
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default().fg(self.checked)
    }

    /// Style for chips
    #[must_use]
    pub fn chip_style(&self) -> Style {
        Style::default().fg(self.chip).add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text (placeholders, subtitles, hints)
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
