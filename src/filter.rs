//! Filter engine: substring search over id, label and subtitle

use crate::store::Item;
use std::ops::Range;

/// Trim and lowercase a search term
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether an item matches an already-normalized term
///
/// An empty term matches everything.
#[must_use]
pub fn matches<R>(item: &Item<R>, term: &str) -> bool {
    term.is_empty()
        || [item.id.as_str(), item.label.as_str(), item.subtitle.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
}

/// Owned subsequence of `items` matching an already-normalized term
#[must_use]
pub fn filter_items<R: Clone>(items: &[Item<R>], term: &str) -> Vec<Item<R>> {
    items
        .iter()
        .filter(|item| matches(item, term))
        .cloned()
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`
///
/// Used by views to highlight the matched part of a label. Returns `None`
/// for an empty query or when there is no match.
#[must_use]
pub fn match_span(text: &str, query: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    let haystack: Vec<(usize, char)> = text
        .char_indices()
        .flat_map(|(offset, c)| c.to_lowercase().map(move |lower| (offset, lower)))
        .collect();

    haystack
        .windows(needle.len())
        .position(|window| window.iter().map(|&(_, c)| c).eq(needle.iter().copied()))
        .map(|start| {
            let begin = haystack[start].0;
            let last = haystack[start + needle.len() - 1].0;
            let end = last + text[last..].chars().next().map_or(0, char::len_utf8);
            begin..end
        })
}
