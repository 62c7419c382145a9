//! Item list widget for displaying filtered items

use crate::controller::SelectState;
use crate::filter;
use crate::store::Item;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Item list widget that displays filtered items with selection indicators
pub struct ItemList<'a, R> {
    /// Control state
    state: &'a SelectState<R>,
    /// Theme for styling
    theme: &'a Theme,
    /// Title for the list block
    title: String,
    /// First visible row
    offset: usize,
}

impl<'a, R> ItemList<'a, R> {
    /// Create a new item list widget
    #[must_use]
    pub fn new(state: &'a SelectState<R>, theme: &'a Theme) -> Self {
        let filtered = state.filtered().len();
        let total = state.items().len();
        let title = format!(" Items ({filtered}/{total}) ");

        Self {
            state,
            theme,
            title,
            offset: 0,
        }
    }

    /// Set the first visible row
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Split a label into plain and highlighted spans for the current term
    fn label_spans(&self, label: &'a str, base: ratatui::style::Style) -> Vec<Span<'a>> {
        match filter::match_span(label, self.state.term()) {
            Some(range) => vec![
                Span::styled(&label[..range.start], base),
                Span::styled(&label[range.clone()], base.patch(self.theme.match_style())),
                Span::styled(&label[range.end..], base),
            ],
            None => vec![Span::styled(label, base)],
        }
    }

    /// Render a single item
    fn render_item(&self, item: &'a Item<R>, is_active: bool) -> ListItem<'a> {
        let is_selected = self.state.is_selected(&item.id);

        let cursor_char = if is_active { ">" } else { " " };
        let check = if is_selected { "[x]" } else { "[ ]" };

        let text_style = if is_active {
            self.theme.active_style()
        } else {
            self.theme.normal_style()
        };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(check, self.theme.checked_style()),
            Span::raw(" "),
        ];
        spans.extend(self.label_spans(&item.label, text_style));

        if !item.subtitle.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(item.subtitle.as_str(), self.theme.dimmed_style()));
        }

        let line = Line::from(spans);

        if is_active {
            ListItem::new(line).style(self.theme.active_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl<R> Widget for ItemList<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.state.filtered().is_empty() {
            Paragraph::new(Span::styled("No results", self.theme.dimmed_style())).render(inner, buf);
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.offset;
        let end = (start + visible_height).min(self.state.filtered().len());
        let active = self.state.active_index().get();

        let items: Vec<ListItem> = (start..end)
            .filter_map(|row| {
                let item = self.state.filtered().get(row)?;
                Some(self.render_item(item, active == Some(row)))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

/// Scroll offset that keeps the active row inside a window of `height` rows
#[must_use]
pub const fn scroll_offset(current: usize, active: Option<usize>, height: usize) -> usize {
    let Some(active) = active else {
        return current;
    };
    if height == 0 {
        return current;
    }
    if active < current {
        active
    } else if active >= current + height {
        active + 1 - height
    } else {
        current
    }
}
