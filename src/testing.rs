//! Testing utilities for smartselect
//!
//! Fixture records, a `RecordingView` that logs every call the controller
//! makes, and an `EventLog` that captures emitted events.
//!
//! Only available when compiled with `cfg(test)`.

use crate::controller::{SelectState, SmartSelect};
use crate::notify::{ChangePayload, SelectEvent};
use crate::view::{View, ViewError};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;

/// Build a raw record with an id and a label
#[must_use]
pub fn record(id: &str, label: &str) -> Value {
    json!({"id": id, "label": label})
}

/// The three accounts used throughout the tests
#[must_use]
pub fn fixture_records() -> Vec<Value> {
    vec![
        record("F1", "11111"),
        record("F2", "AA2234"),
        record("F3", "BBB1"),
    ]
}

/// One call made by the controller on its view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    /// `render_selection_summary`
    Summary,
    /// `render_chips`
    Chips,
    /// `render_list` with the search term
    List(String),
    /// `request_focus`
    Focus,
    /// `request_reposition`
    Reposition,
}

/// View that records calls and can be told to fail side effects
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
    fail_side_effects: bool,
}

impl RecordingView {
    /// View whose focus and reposition requests fail
    #[must_use]
    pub fn failing() -> Self {
        Self {
            calls: Rc::default(),
            fail_side_effects: true,
        }
    }

    /// Shared handle to the recorded calls
    #[must_use]
    pub fn calls(&self) -> Rc<RefCell<Vec<ViewCall>>> {
        Rc::clone(&self.calls)
    }
}

impl<R> View<R> for RecordingView {
    fn render_selection_summary(&mut self, _state: &SelectState<R>) {
        self.calls.borrow_mut().push(ViewCall::Summary);
    }

    fn render_chips(&mut self, _state: &SelectState<R>) {
        self.calls.borrow_mut().push(ViewCall::Chips);
    }

    fn render_list(&mut self, _state: &SelectState<R>, search_term: &str) {
        self.calls
            .borrow_mut()
            .push(ViewCall::List(search_term.to_string()));
    }

    fn request_focus(&mut self) -> Result<(), ViewError> {
        self.calls.borrow_mut().push(ViewCall::Focus);
        if self.fail_side_effects {
            return Err(ViewError::FocusError("no input".to_string()));
        }
        Ok(())
    }

    fn request_reposition(&mut self) -> Result<(), ViewError> {
        self.calls.borrow_mut().push(ViewCall::Reposition);
        if self.fail_side_effects {
            return Err(ViewError::RepositionError("detached".to_string()));
        }
        Ok(())
    }
}

/// Captured events of one control
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SelectEvent<Value>>>>,
}

impl EventLog {
    /// Subscribe a new log to the control
    pub fn attach(select: &mut SmartSelect<Value>) -> Self {
        let log = Self::default();
        let sink = Rc::clone(&log.events);
        select.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    /// Names of all events in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(SelectEvent::name).collect()
    }

    /// Number of events with the given name
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }

    /// Queries of all `search` events
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SelectEvent::Search { query } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Payload of the most recent `change` event
    #[must_use]
    pub fn last_change(&self) -> Option<ChangePayload<Value>> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match event {
                SelectEvent::Change(payload) => Some(payload.clone()),
                _ => None,
            })
    }
}
