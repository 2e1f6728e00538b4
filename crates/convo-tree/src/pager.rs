//! Previous/next navigation over a list of conversations.

/// Cursor over `len` items. Moves are clamped: stepping past either end
/// is a no-op and reports `false` so the caller skips the redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    index: usize,
    len: usize,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the item to show, `None` when there is nothing to show.
    pub fn current(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    pub fn at_first(&self) -> bool {
        self.index == 0
    }

    pub fn at_last(&self) -> bool {
        self.len == 0 || self.index == self.len - 1
    }

    /// Step back one item. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        if self.at_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one item. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.at_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Adopt a new item count, keeping the index when it is still valid.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}
