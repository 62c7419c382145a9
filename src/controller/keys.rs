//! Keyboard handling
//!
//! Maps backend-neutral keys to controller operations. The control and the
//! search input bind keys differently, so every key is handled in the
//! context of the element that has focus.

use super::SmartSelect;
use crate::navigation::Step;

/// Element that receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The closed control
    #[default]
    Control,
    /// The search input inside the open dropdown
    Search,
}

impl Focus {
    /// Focus that follows from the dropdown visibility
    #[must_use]
    pub const fn for_open(is_open: bool) -> Self {
        if is_open { Self::Search } else { Self::Control }
    }
}

/// A key press, independent of the terminal or windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character (including space)
    Char(char),
    /// Enter / Return
    Enter,
    /// Escape
    Esc,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Backspace
    Backspace,
    /// Forward delete
    Delete,
    /// Clear the whole search input (Ctrl+U)
    ClearLine,
}

/// Result of handling a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key changed the control
    Handled,
    /// The key edited the search text and the list was refiltered
    QueryChanged,
    /// The key has no binding in this context
    Ignored,
}

/// Handle a key press in the given focus context
pub fn handle_key<R: Clone + 'static>(
    select: &mut SmartSelect<R>,
    focus: Focus,
    key: Key,
) -> KeyOutcome {
    match focus {
        Focus::Control => handle_control_key(select, key),
        Focus::Search => handle_search_key(select, key),
    }
}

fn handle_control_key<R: Clone + 'static>(select: &mut SmartSelect<R>, key: Key) -> KeyOutcome {
    match key {
        Key::Enter | Key::Char(' ') => select.toggle(),
        Key::Down => {
            if select.is_open() {
                select.move_active(Step::Next);
            } else {
                select.open();
                if !select.state().filtered().is_empty() {
                    select.move_active(Step::Next);
                }
            }
        }
        Key::Up => {
            if !select.is_open() {
                return KeyOutcome::Ignored;
            }
            select.move_active(Step::Prev);
        }
        Key::Esc => select.close(),
        _ => return KeyOutcome::Ignored,
    }
    KeyOutcome::Handled
}

fn handle_search_key<R: Clone + 'static>(select: &mut SmartSelect<R>, key: Key) -> KeyOutcome {
    match key {
        Key::Down => select.move_active(Step::Next),
        Key::Up => select.move_active(Step::Prev),
        Key::Enter => select.toggle_active(),
        Key::Esc => select.close(),
        Key::Left => select.input_cursor_left(),
        Key::Right => select.input_cursor_right(),
        Key::Char(c) => {
            select.input_char(c);
            return KeyOutcome::QueryChanged;
        }
        Key::Backspace => {
            return if select.input_backspace() {
                KeyOutcome::QueryChanged
            } else {
                KeyOutcome::Ignored
            };
        }
        Key::Delete => {
            return if select.input_delete() {
                KeyOutcome::QueryChanged
            } else {
                KeyOutcome::Ignored
            };
        }
        Key::ClearLine => {
            if select.state().query().is_empty() {
                return KeyOutcome::Ignored;
            }
            select.set_query("");
            return KeyOutcome::QueryChanged;
        }
    }
    KeyOutcome::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, fixture_records};
    use crate::view::NullView;
    use serde_json::Value;

    fn make_select(multi: bool) -> SmartSelect<Value> {
        SmartSelect::builder()
            .view(NullView)
            .multi(multi)
            .items(fixture_records())
            .build()
            .unwrap()
    }

    #[test]
    fn test_control_enter_and_space_toggle() {
        let mut select = make_select(true);

        assert_eq!(handle_key(&mut select, Focus::Control, Key::Enter), KeyOutcome::Handled);
        assert!(select.is_open());
        handle_key(&mut select, Focus::Control, Key::Char(' '));
        assert!(!select.is_open());
    }

    #[test]
    fn test_control_down_opens_on_first_row() {
        let mut select = make_select(true);

        handle_key(&mut select, Focus::Control, Key::Down);
        assert!(select.is_open());
        assert_eq!(select.state().active_index().get(), Some(0));

        handle_key(&mut select, Focus::Control, Key::Down);
        assert_eq!(select.state().active_index().get(), Some(1));
    }

    #[test]
    fn test_control_down_on_empty_list() {
        let mut select = make_select(true);
        select.apply_filter("nothing matches");

        handle_key(&mut select, Focus::Control, Key::Down);
        assert!(select.is_open());
        assert_eq!(select.state().active_index().get(), None);
    }

    #[test]
    fn test_control_up_ignored_when_closed() {
        let mut select = make_select(true);

        assert_eq!(handle_key(&mut select, Focus::Control, Key::Up), KeyOutcome::Ignored);
        assert!(!select.is_open());
    }

    #[test]
    fn test_search_enter_toggles_active_row() {
        let mut select = make_select(true);
        let log = EventLog::attach(&mut select);
        select.open();

        handle_key(&mut select, Focus::Search, Key::Enter);
        assert!(select.value().is_empty());

        handle_key(&mut select, Focus::Search, Key::Up);
        handle_key(&mut select, Focus::Search, Key::Enter);
        assert_eq!(select.value(), vec!["F3"]);
        assert_eq!(log.count("change"), 1);
    }

    #[test]
    fn test_search_typing_filters() {
        let mut select = make_select(true);
        select.open();

        assert_eq!(
            handle_key(&mut select, Focus::Search, Key::Char('a')),
            KeyOutcome::QueryChanged
        );
        assert_eq!(select.state().filtered().len(), 1);

        handle_key(&mut select, Focus::Search, Key::ClearLine);
        assert_eq!(select.state().filtered().len(), 3);
        assert_eq!(
            handle_key(&mut select, Focus::Search, Key::ClearLine),
            KeyOutcome::Ignored
        );
        assert_eq!(
            handle_key(&mut select, Focus::Search, Key::Backspace),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn test_escape_closes() {
        let mut select = make_select(true);
        select.open();

        handle_key(&mut select, Focus::Search, Key::Esc);
        assert!(!select.is_open());
        assert_eq!(Focus::for_open(select.is_open()), Focus::Control);
    }
}
