//! Search bar widget for query input

use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Marker drawn at the end of the search row; clicking it clears the search
pub const CLEAR_MARKER: &str = "x";

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Cursor position in the query
    cursor: usize,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether the widget has focus
    focused: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            theme,
            focused: true,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Area of the clear marker inside a search bar drawn at `area`
#[must_use]
pub const fn clear_marker_area(area: Rect) -> Option<Rect> {
    if area.width < 4 || area.height < 3 {
        return None;
    }
    Some(Rect::new(area.x + area.width - 3, area.y + 1, 1, 1))
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ");

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_style = Style::default().add_modifier(Modifier::SLOW_BLINK);
        let mut spans = Vec::new();

        if self.query.is_empty() {
            if self.focused {
                spans.push(Span::styled("│", cursor_style));
            }
            spans.push(Span::styled("Search", self.theme.dimmed_style()));
        } else if self.focused {
            let (before, after) = self.query.split_at(self.cursor.min(self.query.len()));
            spans.push(Span::raw(before));
            spans.push(Span::styled("│", cursor_style));
            spans.push(Span::raw(after));
        } else {
            spans.push(Span::raw(self.query));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);

        if let Some(marker) = clear_marker_area(area) {
            buf.set_string(marker.x, marker.y, CLEAR_MARKER, self.theme.dimmed_style());
        }
    }
}
