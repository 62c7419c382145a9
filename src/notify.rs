//! Change notifier and event subscriptions
//!
//! Listeners subscribe to a control's events and receive them synchronously,
//! in subscription order. Unsubscribing is the teardown for anything a view
//! registered (outside-click handlers, reposition on resize).

use crate::selection::Selection;
use crate::store::Item;

/// Payload of a `change` event
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePayload<R> {
    /// Selected ids in selection order
    pub value: Vec<String>,
    /// Raw records of the selected items in item order
    pub items: Vec<R>,
}

impl<R: Clone> ChangePayload<R> {
    /// Compose the payload for the current selection
    #[must_use]
    pub fn compose(items: &[Item<R>], selected: &Selection) -> Self {
        Self {
            value: selected.to_vec(),
            items: items
                .iter()
                .filter(|item| selected.contains(&item.id))
                .map(|item| item.raw.clone())
                .collect(),
        }
    }
}

/// Notification emitted by a control
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent<R> {
    /// The dropdown opened
    Open,
    /// The dropdown closed
    Close,
    /// A filter was applied with the normalized query
    Search {
        /// Trimmed, lowercased search term
        query: String,
    },
    /// The selection changed
    Change(ChangePayload<R>),
}

impl<R> SelectEvent<R> {
    /// Event name as seen by listeners
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Search { .. } => "search",
            Self::Change(_) => "change",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<R> = Box<dyn FnMut(&SelectEvent<R>)>;

/// Synchronous event dispatcher scoped to one control
pub struct EventBus<R> {
    listeners: Vec<(SubscriptionId, Listener<R>)>,
    next_id: u64,
}

impl<R> Default for EventBus<R> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<R> EventBus<R> {
    /// Register a listener
    pub fn subscribe(&mut self, listener: impl FnMut(&SelectEvent<R>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener
    pub fn emit(&mut self, event: &SelectEvent<R>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl<R> std::fmt::Debug for EventBus<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
