//! Open/close lifecycle of the dropdown surface

use std::fmt;

/// Visibility of the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Dropdown hidden (initial)
    #[default]
    Closed,
    /// Dropdown shown
    Open,
}

impl Visibility {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Two-state machine; transitions report whether they changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifecycle {
    visibility: Visibility,
}

impl Lifecycle {
    /// Current visibility
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Open)
    }

    /// Transition to `Open`; `false` when already open
    pub const fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.visibility = Visibility::Open;
        true
    }

    /// Transition to `Closed`; `false` when already closed
    pub const fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.visibility = Visibility::Closed;
        true
    }
}
