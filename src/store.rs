//! Item store: normalized items derived from caller records

use crate::config::Accessors;
use serde_json::Value;
use tracing::trace;

/// Prefix of the positional id given to records whose id accessor yields nothing
pub const FALLBACK_ID_PREFIX: &str = "ss-";

/// Normalized representation of one selectable record
#[derive(Debug, Clone, PartialEq)]
pub struct Item<R> {
    /// Identifier, never empty
    pub id: String,
    /// Display label, never empty
    pub label: String,
    /// Secondary text, empty when absent
    pub subtitle: String,
    /// Arbitrary caller metadata
    pub meta: Value,
    /// The record this item was derived from
    pub raw: R,
}

/// Map every record through the accessors and drop items without an id or label
///
/// Output order follows input order. Repeated ids are kept; selection treats
/// them as one identifier. A record whose id accessor yields nothing gets the
/// id `ss-{position}`, stable for this pass.
pub fn normalize<R>(accessors: &Accessors<R>, records: impl IntoIterator<Item = R>) -> Vec<Item<R>> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let id = accessors
                .id(&raw)
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("{FALLBACK_ID_PREFIX}{index}"));
            let label = accessors.label(&raw).unwrap_or_default();

            if label.is_empty() {
                trace!(index, id = %id, "dropping record without a label");
                return None;
            }

            Some(Item {
                subtitle: accessors.subtitle(&raw).unwrap_or_default(),
                meta: accessors.meta(&raw),
                id,
                label,
                raw,
            })
        })
        .collect()
}

/// Owner of the canonical item list
#[derive(Debug, Clone)]
pub struct ItemStore<R> {
    items: Vec<Item<R>>,
}

impl<R> Default for ItemStore<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R> ItemStore<R> {
    /// Create a store from records
    pub fn new(accessors: &Accessors<R>, records: impl IntoIterator<Item = R>) -> Self {
        Self {
            items: normalize(accessors, records),
        }
    }

    /// Replace the whole list with freshly normalized records
    pub fn replace(&mut self, accessors: &Accessors<R>, records: impl IntoIterator<Item = R>) {
        self.items = normalize(accessors, records);
    }

    /// All items in canonical order
    #[must_use]
    pub fn items(&self) -> &[Item<R>] {
        &self.items
    }

    /// Whether any item carries the given id
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}
