//! Headless controller for a dropdown select
//!
//! [`SmartSelect`] owns all mutable state of one control and is the only
//! place that state changes. Every public operation runs to completion,
//! re-renders what it affected through the [`View`], and, when the selection
//! changed, reports the change to the configured callback and to listeners.
//!
//! ```text
//!   input ──► SmartSelect ──► SelectState ──► View (render_*)
//!                 │
//!                 ├──► on_change(&[R])
//!                 └──► EventBus (open / close / search / change)
//! ```

pub mod keys;
mod state;

pub use state::{SelectState, Summary};

use crate::config::{Accessors, FieldAccess, SelectConfig, SelectConfigBuilder};
use crate::filter;
use crate::navigation::Step;
use crate::notify::{ChangePayload, EventBus, SelectEvent, SubscriptionId};
use crate::view::View;
use std::fmt;
use tracing::{debug, warn};

/// A dropdown select control
pub struct SmartSelect<R> {
    state: SelectState<R>,
    view: Box<dyn View<R>>,
    bus: EventBus<R>,
}

impl<R: FieldAccess + Clone + 'static> SmartSelect<R> {
    /// Start building a control that reads `id` and `label` fields
    #[must_use]
    pub fn builder() -> SelectConfigBuilder<R> {
        SelectConfigBuilder::with_default_accessors()
    }
}

impl<R: Clone + 'static> SmartSelect<R> {
    /// Start building a control with custom accessors
    #[must_use]
    pub fn builder_with(accessors: Accessors<R>) -> SelectConfigBuilder<R> {
        SelectConfigBuilder::new().accessors(accessors)
    }

    pub(crate) fn from_parts(config: SelectConfig<R>, view: Box<dyn View<R>>, records: Vec<R>) -> Self {
        let state = SelectState::new(config, records);
        debug!(
            items = state.items().len(),
            multi = state.multi(),
            "smart select created"
        );

        let mut select = Self {
            state,
            view,
            bus: EventBus::default(),
        };
        select.view.render_list(&select.state, "");
        select.render_selection();
        select
    }

    /// Immutable configuration
    #[must_use]
    pub const fn config(&self) -> &SelectConfig<R> {
        self.state.config()
    }

    /// Read-only view of the current state
    #[must_use]
    pub const fn state(&self) -> &SelectState<R> {
        &self.state
    }

    /// Selected ids in selection order
    #[must_use]
    pub fn value(&self) -> Vec<String> {
        self.state.selected().to_vec()
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Register an event listener
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectEvent<R>) + 'static) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    /// Remove an event listener; `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ========================================================================
    // Items and filtering
    // ========================================================================

    /// Replace all items
    ///
    /// Clears the selection and the search, and always reports a change.
    pub fn set_items(&mut self, records: Vec<R>) {
        self.state.replace_items(records);
        debug!(items = self.state.items().len(), "items replaced");

        self.view.render_list(&self.state, "");
        self.render_selection();
        self.emit_change();
    }

    /// Filter the list by a search term
    ///
    /// The term is trimmed and lowercased before matching. Resets the active
    /// row and emits a `search` event; never touches the selection.
    pub fn apply_filter(&mut self, term: &str) {
        let query = filter::normalize_term(term);
        self.state.refilter(&query);
        debug!(query = %query, matches = self.state.filtered().len(), "filter applied");

        self.view.render_list(&self.state, &query);
        self.bus.emit(&SelectEvent::Search { query });
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Toggle the selection of an item
    ///
    /// Empty and unknown ids are ignored. In single-select mode the item
    /// replaces the selection and the dropdown closes.
    pub fn toggle_select(&mut self, id: &str) {
        if id.is_empty() || !self.state.contains_id(id) {
            debug!(id, "ignoring toggle of unknown item");
            return;
        }

        if self.state.multi() {
            self.state.selected_mut().toggle(id);
        } else {
            self.state.selected_mut().replace_with(id);
            self.close();
        }

        self.render_selection();
        self.emit_change();
    }

    /// Clear the selection; does nothing if it is already empty
    pub fn clear_selection(&mut self) {
        if self.state.selected().is_empty() {
            return;
        }

        self.state.selected_mut().clear();
        self.render_selection();
        self.emit_change();
    }

    /// Replace the selection with the known ids among `ids`
    ///
    /// Unknown ids are dropped. Always reports a change, even when the
    /// resulting selection equals the previous one. In single-select mode
    /// only the first known id is kept.
    pub fn set_value<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state.selected_mut().clear();

        for id in ids {
            let id = id.as_ref();
            if !self.state.contains_id(id) {
                debug!(id, "dropping unknown id from value");
                continue;
            }
            if !self.state.multi() && !self.state.selected().is_empty() {
                break;
            }
            self.state.selected_mut().insert(id);
        }

        self.render_selection();
        self.emit_change();
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move the active row one step, wrapping at both ends
    pub fn move_active(&mut self, step: Step) {
        let len = self.state.filtered().len();
        self.state.active_mut().step(step, len);
        self.render_list();
    }

    /// Toggle the item under the active row, if there is one
    pub fn toggle_active(&mut self) {
        if let Some(id) = self.state.active_item().map(|item| item.id.clone()) {
            self.toggle_select(&id);
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the dropdown
    ///
    /// Resets the active row and asks the view to position and focus the
    /// dropdown. Does nothing if already open.
    pub fn open(&mut self) {
        if !self.state.lifecycle_mut().open() {
            return;
        }

        self.state.active_mut().reset();
        debug!("dropdown opened");

        if let Err(e) = self.view.request_reposition() {
            warn!(error = %e, "reposition request failed");
        }
        if let Err(e) = self.view.request_focus() {
            warn!(error = %e, "focus request failed");
        }
        self.render_list();
        self.bus.emit(&SelectEvent::Open);
    }

    /// Close the dropdown and re-render the list; does nothing if already closed
    pub fn close(&mut self) {
        if !self.state.lifecycle_mut().close() {
            return;
        }

        debug!("dropdown closed");
        self.render_list();
        self.bus.emit(&SelectEvent::Close);
    }

    /// Open when closed, close when open
    pub fn toggle(&mut self) {
        if self.state.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// The control itself was clicked
    pub fn click_control(&mut self) {
        self.toggle();
    }

    /// A row of the filtered list was clicked
    ///
    /// In multi-select mode the dropdown stays open, the clicked row becomes
    /// the active row and focus returns to the search input.
    pub fn click_row(&mut self, index: usize) {
        let Some(id) = self.state.filtered().get(index).map(|item| item.id.clone()) else {
            return;
        };

        self.toggle_select(&id);

        if !(self.state.multi() && self.state.is_open()) {
            return;
        }

        self.state.active_mut().set(index);
        self.render_list();
        if let Err(e) = self.view.request_focus() {
            warn!(error = %e, "focus request failed");
        }
    }

    /// The remove button of a chip was clicked
    pub fn click_chip_remove(&mut self, id: &str) {
        self.toggle_select(id);
    }

    /// The clear button of the control was clicked
    pub fn click_clear(&mut self) {
        self.clear_selection();
        self.close();
    }

    /// A click landed outside the control and the dropdown
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// The viewport was resized or scrolled
    pub fn viewport_changed(&mut self) {
        if self.state.is_open()
            && let Err(e) = self.view.request_reposition()
        {
            warn!(error = %e, "reposition request failed");
        }
    }

    // ========================================================================
    // Search input
    // ========================================================================

    /// Replace the search input text and filter by it
    pub fn set_query(&mut self, text: &str) {
        self.state.query_set(text);
        self.refilter_from_query();
    }

    /// Type a character into the search input
    pub fn input_char(&mut self, c: char) {
        self.state.query_push(c);
        self.refilter_from_query();
    }

    /// Delete the character before the search cursor; `false` if nothing changed
    pub fn input_backspace(&mut self) -> bool {
        if !self.state.query_backspace() {
            return false;
        }
        self.refilter_from_query();
        true
    }

    /// Delete the character under the search cursor; `false` if nothing changed
    pub fn input_delete(&mut self) -> bool {
        if !self.state.query_delete() {
            return false;
        }
        self.refilter_from_query();
        true
    }

    /// Move the search cursor left
    pub fn input_cursor_left(&mut self) {
        self.state.query_cursor_left();
    }

    /// Move the search cursor right
    pub fn input_cursor_right(&mut self) {
        self.state.query_cursor_right();
    }

    /// The search clear button was clicked: empty the search and close
    pub fn clear_search(&mut self) {
        self.state.query_clear();
        self.apply_filter("");
        self.close();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn refilter_from_query(&mut self) {
        let query = self.state.query().to_string();
        self.apply_filter(&query);
    }

    fn render_list(&mut self) {
        let term = self.state.term().to_string();
        self.view.render_list(&self.state, &term);
    }

    fn render_selection(&mut self) {
        self.view.render_selection_summary(&self.state);
        self.view.render_chips(&self.state);
    }

    fn emit_change(&mut self) {
        let payload = ChangePayload::compose(self.state.items(), self.state.selected());
        debug!(value = ?payload.value, "selection changed");

        self.state.config().notify_change(&payload.items);
        self.bus.emit(&SelectEvent::Change(payload));
    }
}

impl<R> fmt::Debug for SmartSelect<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartSelect")
            .field("config", self.state.config())
            .field("items", &self.state.items().len())
            .field("selected", self.state.selected())
            .field("visibility", &self.state.visibility())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, RecordingView, ViewCall, fixture_records, record};
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_select(multi: bool) -> (SmartSelect<Value>, EventLog) {
        let mut select = SmartSelect::builder()
            .view(RecordingView::default())
            .multi(multi)
            .items(fixture_records())
            .build()
            .unwrap();
        let log = EventLog::attach(&mut select);
        (select, log)
    }

    #[test]
    fn test_initial_state() {
        let (select, log) = make_select(true);

        assert_eq!(select.state().items().len(), 3);
        assert_eq!(select.state().filtered().len(), 3);
        assert!(select.value().is_empty());
        assert_eq!(select.state().active_index().get(), None);
        assert!(!select.is_open());
        assert!(log.names().is_empty());
    }

    #[test]
    fn test_multi_toggle() {
        let (mut select, log) = make_select(true);

        select.toggle_select("F1");
        select.toggle_select("F2");
        assert_eq!(select.value(), vec!["F1", "F2"]);

        select.toggle_select("F1");
        assert_eq!(select.value(), vec!["F2"]);
        assert_eq!(log.count("change"), 3);
    }

    #[test]
    fn test_toggle_ignores_empty_and_unknown_ids() {
        let (mut select, log) = make_select(true);

        select.toggle_select("");
        select.toggle_select("nope");

        assert!(select.value().is_empty());
        assert_eq!(log.count("change"), 0);
    }

    #[test]
    fn test_single_toggle_closes() {
        let (mut select, log) = make_select(false);

        select.open();
        select.toggle_select("F1");
        assert!(!select.is_open());

        select.open();
        select.toggle_select("F2");
        assert_eq!(select.value(), vec!["F2"]);
        assert!(!select.is_open());
        assert_eq!(
            log.names(),
            vec!["open", "close", "change", "open", "close", "change"]
        );
    }

    #[test]
    fn test_single_toggle_same_item_stays_selected() {
        let (mut select, _log) = make_select(false);

        select.toggle_select("F1");
        select.toggle_select("F1");
        assert_eq!(select.value(), vec!["F1"]);
    }

    #[test]
    fn test_clear_selection() {
        let (mut select, log) = make_select(true);

        select.clear_selection();
        assert_eq!(log.count("change"), 0);

        select.toggle_select("F3");
        select.clear_selection();
        assert!(select.value().is_empty());
        assert_eq!(log.count("change"), 2);
    }

    #[test]
    fn test_set_value_drops_unknown_and_always_notifies() {
        let (mut select, log) = make_select(true);

        select.set_value(["F3", "missing", "F1"]);
        assert_eq!(select.value(), vec!["F3", "F1"]);

        select.set_value(["F3", "F1"]);
        assert_eq!(select.value(), vec!["F3", "F1"]);
        assert_eq!(log.count("change"), 2);

        let last = log.last_change().unwrap();
        assert_eq!(last.items, vec![record("F1", "11111"), record("F3", "BBB1")]);
    }

    #[test]
    fn test_set_value_single_mode_keeps_first() {
        let (mut select, _log) = make_select(false);

        select.set_value(["F2", "F3"]);
        assert_eq!(select.value(), vec!["F2"]);
    }

    #[test]
    fn test_set_items_clears_selection_and_search() {
        let (mut select, log) = make_select(true);
        select.toggle_select("F1");
        select.apply_filter("bbb");
        select.move_active(Step::Next);

        select.set_items(vec![json!({"id": "N1", "label": "New"})]);

        assert!(select.value().is_empty());
        assert_eq!(select.state().filtered().len(), 1);
        assert_eq!(select.state().active_index().get(), None);
        assert_eq!(log.count("change"), 2);
        assert_eq!(log.last_change().unwrap().items, Vec::<Value>::new());
    }

    #[test]
    fn test_apply_filter() {
        let (mut select, log) = make_select(true);
        select.toggle_select("F1");
        select.move_active(Step::Next);

        select.apply_filter("  BBB1 ");

        let ids: Vec<&str> = select.state().filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["F3"]);
        assert_eq!(select.state().active_index().get(), None);
        assert_eq!(select.value(), vec!["F1"]);
        assert_eq!(log.queries(), vec!["bbb1"]);
        assert_eq!(log.count("change"), 1);
    }

    #[test]
    fn test_move_active_wraps() {
        let (mut select, _log) = make_select(true);

        select.move_active(Step::Prev);
        assert_eq!(select.state().active_index().get(), Some(2));
        select.move_active(Step::Next);
        assert_eq!(select.state().active_index().get(), Some(0));

        select.apply_filter("zzz");
        select.move_active(Step::Next);
        assert_eq!(select.state().active_index().get(), None);
    }

    #[test]
    fn test_open_resets_active_and_requests_side_effects() {
        let view = RecordingView::default();
        let calls = view.calls();
        let mut select = SmartSelect::builder()
            .view(view)
            .items(fixture_records())
            .build()
            .unwrap();

        select.move_active(Step::Next);
        select.open();

        assert_eq!(select.state().active_index().get(), None);
        let calls = calls.borrow();
        assert!(calls.contains(&ViewCall::Reposition));
        assert!(calls.contains(&ViewCall::Focus));
    }

    #[test]
    fn test_open_close_idempotent() {
        let (mut select, log) = make_select(true);

        select.open();
        select.open();
        select.close();
        select.close();
        select.toggle();

        assert_eq!(log.names(), vec!["open", "close", "open"]);
    }

    #[test]
    fn test_close_keeps_active_row() {
        let (mut select, _log) = make_select(true);

        select.open();
        select.move_active(Step::Next);
        select.close();
        assert_eq!(select.state().active_index().get(), Some(0));
    }

    #[test]
    fn test_close_renders_once() {
        let view = RecordingView::default();
        let calls = view.calls();
        let mut select = SmartSelect::builder()
            .view(view)
            .items(fixture_records())
            .build()
            .unwrap();

        select.open();
        calls.borrow_mut().clear();
        select.close();
        select.close();

        assert_eq!(*calls.borrow(), vec![ViewCall::List(String::new())]);
    }

    #[test]
    fn test_failed_side_effects_do_not_block_open() {
        let mut select = SmartSelect::builder()
            .view(RecordingView::failing())
            .items(fixture_records())
            .build()
            .unwrap();
        let log = EventLog::attach(&mut select);

        select.open();
        assert!(select.is_open());
        assert_eq!(log.names(), vec!["open"]);
    }

    #[test]
    fn test_on_change_receives_raw_records() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut select = SmartSelect::builder()
            .view(RecordingView::default())
            .items(fixture_records())
            .on_change(move |records: &[Value]| sink.borrow_mut().push(records.to_vec()))
            .build()
            .unwrap();

        select.toggle_select("F2");
        select.clear_selection();

        assert_eq!(
            *seen.borrow(),
            vec![vec![record("F2", "AA2234")], Vec::<Value>::new()]
        );
    }

    #[test]
    fn test_click_row_toggles_filtered_item() {
        let view = RecordingView::default();
        let calls = view.calls();
        let mut select = SmartSelect::builder()
            .view(view)
            .items(fixture_records())
            .build()
            .unwrap();

        select.open();
        select.apply_filter("aa");
        calls.borrow_mut().clear();
        select.click_row(0);
        select.click_row(5);

        assert_eq!(select.value(), vec!["F2"]);
        assert!(select.is_open());
        assert!(calls.borrow().contains(&ViewCall::Focus));
    }

    #[test]
    fn test_click_row_makes_row_active() {
        let (mut select, _log) = make_select(true);
        select.open();

        select.click_row(2);
        assert_eq!(select.value(), vec!["F3"]);
        assert_eq!(select.state().active_index().get(), Some(2));

        select.move_active(Step::Next);
        assert_eq!(select.state().active_index().get(), Some(0));
    }

    #[test]
    fn test_click_row_single_mode_closes_without_active_row() {
        let (mut select, _log) = make_select(false);
        select.open();

        select.click_row(1);
        assert_eq!(select.value(), vec!["F2"]);
        assert!(!select.is_open());
        assert_eq!(select.state().active_index().get(), None);
    }

    #[test]
    fn test_click_clear_and_dismiss() {
        let (mut select, log) = make_select(true);

        select.click_control();
        select.toggle_select("F1");
        select.click_clear();
        assert!(select.value().is_empty());
        assert!(!select.is_open());

        select.dismiss();
        assert_eq!(log.names(), vec!["open", "change", "change", "close"]);
    }

    #[test]
    fn test_viewport_changed_only_when_open() {
        let view = RecordingView::default();
        let calls = view.calls();
        let mut select = SmartSelect::builder()
            .view(view)
            .items(fixture_records())
            .build()
            .unwrap();

        select.viewport_changed();
        assert!(!calls.borrow().contains(&ViewCall::Reposition));

        select.open();
        calls.borrow_mut().clear();
        select.viewport_changed();
        assert_eq!(*calls.borrow(), vec![ViewCall::Reposition]);
    }

    #[test]
    fn test_search_input_editing() {
        let (mut select, log) = make_select(true);

        select.input_char('B');
        select.input_char('b');
        assert_eq!(select.state().query(), "Bb");
        assert_eq!(select.state().filtered().len(), 1);

        assert!(select.input_backspace());
        select.input_cursor_left();
        assert!(!select.input_backspace());
        assert!(select.input_delete());
        assert_eq!(select.state().query(), "");
        assert_eq!(select.state().filtered().len(), 3);
        assert_eq!(log.queries(), vec!["b", "bb", "b", ""]);
    }

    #[test]
    fn test_clear_search() {
        let (mut select, log) = make_select(true);

        select.open();
        select.set_query("aa");
        select.clear_search();

        assert_eq!(select.state().query(), "");
        assert_eq!(select.state().filtered().len(), 3);
        assert!(!select.is_open());
        assert_eq!(log.names(), vec!["open", "search", "search", "close"]);
    }

    #[test]
    fn test_toggle_active() {
        let (mut select, _log) = make_select(true);

        select.toggle_active();
        assert!(select.value().is_empty());

        select.move_active(Step::Prev);
        select.toggle_active();
        assert_eq!(select.value(), vec!["F3"]);
    }
}
