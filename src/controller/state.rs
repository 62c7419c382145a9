//! Controller state
//!
//! Holds everything that changes under user interaction. Views receive a
//! shared reference; only the controller mutates it.

use crate::config::SelectConfig;
use crate::filter;
use crate::lifecycle::{Lifecycle, Visibility};
use crate::navigation::ActiveIndex;
use crate::selection::Selection;
use crate::store::{Item, ItemStore};

/// What the control shows in place of the selected items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary<'a> {
    /// Nothing selected, show the placeholder text
    Placeholder(&'a str),
    /// Number of selected items
    Count(usize),
}

/// All mutable state of one control
#[derive(Debug)]
pub struct SelectState<R> {
    config: SelectConfig<R>,
    store: ItemStore<R>,
    filtered: Vec<Item<R>>,
    selected: Selection,
    active: ActiveIndex,
    lifecycle: Lifecycle,
    /// Normalized term the filtered list was computed from
    term: String,
    /// Raw text of the search input
    query: String,
    /// Byte offset of the cursor within `query`
    query_cursor: usize,
}

impl<R: Clone> SelectState<R> {
    pub(crate) fn new(config: SelectConfig<R>, records: Vec<R>) -> Self {
        let store = ItemStore::new(config.accessors(), records);
        let filtered = store.items().to_vec();

        Self {
            config,
            store,
            filtered,
            selected: Selection::new(),
            active: ActiveIndex::NONE,
            lifecycle: Lifecycle::default(),
            term: String::new(),
            query: String::new(),
            query_cursor: 0,
        }
    }

    /// Replace the items; clears the selection, the search and the active row
    pub(crate) fn replace_items(&mut self, records: Vec<R>) {
        self.store.replace(self.config.accessors(), records);
        self.filtered = self.store.items().to_vec();
        self.selected.clear();
        self.active.reset();
        self.term.clear();
        self.query_clear();
    }

    /// Recompute the filtered list for a normalized term and reset the active row
    pub(crate) fn refilter(&mut self, term: &str) {
        self.filtered = filter::filter_items(self.store.items(), term);
        self.term = term.to_string();
        self.active.reset();
    }
}

impl<R> SelectState<R> {
    /// Immutable configuration of the control
    #[must_use]
    pub const fn config(&self) -> &SelectConfig<R> {
        &self.config
    }

    /// Label text
    #[must_use]
    pub fn label(&self) -> &str {
        self.config.label()
    }

    /// Placeholder text
    #[must_use]
    pub fn placeholder(&self) -> &str {
        self.config.placeholder()
    }

    /// Whether more than one item may be selected
    #[must_use]
    pub const fn multi(&self) -> bool {
        self.config.multi()
    }

    /// All items in canonical order
    #[must_use]
    pub fn items(&self) -> &[Item<R>] {
        self.store.items()
    }

    /// Items matching the current search, in canonical order
    #[must_use]
    pub fn filtered(&self) -> &[Item<R>] {
        &self.filtered
    }

    /// Selected ids
    #[must_use]
    pub const fn selected(&self) -> &Selection {
        &self.selected
    }

    /// Whether the id is selected
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected items in canonical order
    pub fn selected_items(&self) -> impl Iterator<Item = &Item<R>> {
        self.store
            .items()
            .iter()
            .filter(|item| self.selected.contains(&item.id))
    }

    /// Placeholder or selection count for the control
    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        match self.selected_items().count() {
            0 => Summary::Placeholder(self.config.placeholder()),
            n => Summary::Count(n),
        }
    }

    /// The keyboard-active row
    #[must_use]
    pub const fn active_index(&self) -> ActiveIndex {
        self.active
    }

    /// Item under the active row
    #[must_use]
    pub fn active_item(&self) -> Option<&Item<R>> {
        self.active.get().and_then(|i| self.filtered.get(i))
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    /// Dropdown visibility
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.lifecycle.visibility()
    }

    /// Normalized term of the current filter
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Raw text of the search input
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Byte offset of the cursor in the search input
    #[must_use]
    pub const fn query_cursor(&self) -> usize {
        self.query_cursor
    }

    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.store.contains_id(id)
    }

    pub(crate) const fn selected_mut(&mut self) -> &mut Selection {
        &mut self.selected
    }

    pub(crate) const fn active_mut(&mut self) -> &mut ActiveIndex {
        &mut self.active
    }

    pub(crate) const fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    // ========================================================================
    // Search input editing
    // ========================================================================

    /// Replace the query text, cursor at the end
    pub(crate) fn query_set(&mut self, text: &str) {
        self.query = text.to_string();
        self.query_cursor = self.query.len();
    }

    /// Insert a character at the cursor
    pub(crate) fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove the character before the cursor; `false` if at the start
    pub(crate) fn query_backspace(&mut self) -> bool {
        if self.query_cursor == 0 {
            return false;
        }
        let prev_char_boundary = self.query[..self.query_cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.query.remove(prev_char_boundary);
        self.query_cursor = prev_char_boundary;
        true
    }

    /// Remove the character under the cursor; `false` if at the end
    pub(crate) fn query_delete(&mut self) -> bool {
        if self.query_cursor >= self.query.len() {
            return false;
        }
        self.query.remove(self.query_cursor);
        true
    }

    pub(crate) fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    pub(crate) fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    pub(crate) fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }
}
