//! Selection state: the ordered set of selected item ids

use indexmap::IndexSet;

/// Insertion-ordered set of selected ids
///
/// Mutation is crate-private; callers change the selection through the
/// controller so that every change is validated against the item list and
/// reported to listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<String>,
}

impl Selection {
    /// Create an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the id is selected
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected ids in insertion order, owned
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Flip membership of `id`; returns whether it is now selected
    pub(crate) fn toggle(&mut self, id: &str) -> bool {
        if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Make `id` the only selected id
    pub(crate) fn replace_with(&mut self, id: &str) {
        self.ids.clear();
        self.ids.insert(id.to_string());
    }

    pub(crate) fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }
}
