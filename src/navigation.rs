//! Navigation: the keyboard-active row of the filtered list

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Towards the end of the list (+1)
    Next,
    /// Towards the start of the list (-1)
    Prev,
}

/// Index of the keyboard-active row, `None` when no row is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveIndex(Option<usize>);

impl ActiveIndex {
    /// No active row
    pub const NONE: Self = Self(None);

    /// The active position, if any
    #[must_use]
    pub const fn get(self) -> Option<usize> {
        self.0
    }

    /// Integer form where `-1` means no active row
    #[must_use]
    pub fn as_signed(self) -> isize {
        self.0
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Make `index` the active row
    pub const fn set(&mut self, index: usize) {
        self.0 = Some(index);
    }

    /// Forget the active row
    pub const fn reset(&mut self) {
        self.0 = None;
    }

    /// Move one step within a list of `len` rows, wrapping at both ends
    ///
    /// From no active row, `Next` lands on the first row and `Prev` on the
    /// last. Does nothing when the list is empty.
    pub fn step(&mut self, step: Step, len: usize) {
        if len == 0 {
            return;
        }

        self.0 = Some(match (self.0, step) {
            (None, Step::Next) => 0,
            (None, Step::Prev) => len - 1,
            (Some(current), Step::Next) => (current + 1) % len,
            (Some(current), Step::Prev) => (current + len - 1) % len,
        });
    }
}
