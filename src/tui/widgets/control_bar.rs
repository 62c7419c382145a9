//! Control bar and chip bar widgets

use crate::controller::{SelectState, Summary};
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The closed control: label, summary, clear button and arrow
pub struct ControlBar<'a, R> {
    state: &'a SelectState<R>,
    theme: &'a Theme,
    focused: bool,
}

impl<'a, R> ControlBar<'a, R> {
    /// Create a new control bar
    #[must_use]
    pub const fn new(state: &'a SelectState<R>, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Area of the clear button inside a control drawn at `area`
#[must_use]
pub const fn clear_button_area(area: Rect) -> Option<Rect> {
    if area.width < 6 || area.height < 3 {
        return None;
    }
    Some(Rect::new(area.x + area.width - 5, area.y + 1, 1, 1))
}

impl<R> Widget for ControlBar<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused || self.state.is_open() {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let title = format!(" {} ", self.state.label());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = match self.state.summary() {
            Summary::Placeholder(text) => Line::from(Span::styled(text, self.theme.dimmed_style())),
            Summary::Count(n) => Line::from(vec![
                Span::styled(format!(" {n} "), self.theme.active_style()),
                Span::raw(" Selected"),
            ]),
        };
        Paragraph::new(line).render(inner, buf);

        if matches!(self.state.summary(), Summary::Count(_))
            && let Some(clear) = clear_button_area(area)
        {
            buf.set_string(clear.x, clear.y, "x", self.theme.dimmed_style());
        }

        if inner.width > 0 {
            let arrow = if self.state.is_open() { "▴" } else { "▾" };
            buf.set_string(
                inner.x + inner.width - 1,
                inner.y,
                arrow,
                self.theme.cursor_style(),
            );
        }
    }
}

/// One chip per selected item
pub struct ChipBar<'a, R> {
    state: &'a SelectState<R>,
    theme: &'a Theme,
}

impl<'a, R> ChipBar<'a, R> {
    /// Create a new chip bar
    #[must_use]
    pub const fn new(state: &'a SelectState<R>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

/// Text drawn for one chip
#[must_use]
pub fn chip_text(label: &str) -> String {
    format!("[{label} x]")
}

/// Horizontal extent of each chip in a row starting at `area`, with its item id
///
/// Chips that do not fit are left out.
#[must_use]
pub fn chip_areas<R>(state: &SelectState<R>, area: Rect) -> Vec<(Rect, String)> {
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);
    let mut areas = Vec::new();

    for item in state.selected_items() {
        let width = u16::try_from(Span::raw(chip_text(&item.label)).width()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > right {
            break;
        }
        areas.push((Rect::new(x, area.y, width, 1), item.id.clone()));
        x = x.saturating_add(width + 1);
    }

    areas
}

impl<R> Widget for ChipBar<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for ((chip, _), item) in chip_areas(self.state, area)
            .into_iter()
            .zip(self.state.selected_items())
        {
            buf.set_string(chip.x, chip.y, chip_text(&item.label), self.theme.chip_style());
        }
    }
}
