//! Selection state and text-change descriptions reported by the host editor.
//!
//! All offsets are UTF-8 byte offsets into the cell's full text.

use std::ops::Range;

/// Current selection of an editor, as `(anchor, head)` offsets.
///
/// `anchor == head` is an empty selection, i.e. a plain cursor. The head may
/// lie before the anchor for backwards selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Offset where the selection started.
    pub anchor: usize,
    /// Offset where the selection ends (cursor position).
    pub head: usize,
}

impl Selection {
    /// Creates a selection spanning `anchor..head`.
    #[must_use]
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Creates an empty selection (a cursor) at `offset`.
    #[must_use]
    pub const fn cursor(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns the selected span with `start <= end`.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.anchor.min(self.head)..self.anchor.max(self.head)
    }
}

/// One replaced span of a document change.
///
/// `start` and `old_len` are in the coordinates of the document *before* the
/// change; `new_len` is the length of the inserted replacement. A pure
/// insertion has `old_len == 0`, a pure deletion `new_len == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// Offset of the replaced span in the pre-change document.
    pub start: usize,
    /// Length of the replaced span.
    pub old_len: usize,
    /// Length of the replacement text.
    pub new_len: usize,
}

impl TextEdit {
    /// Describes replacing `old_len` bytes at `start` with `new_len` bytes.
    #[must_use]
    pub const fn new(start: usize, old_len: usize, new_len: usize) -> Self {
        Self {
            start,
            old_len,
            new_len,
        }
    }

    /// Describes inserting `len` bytes at `at`.
    #[must_use]
    pub const fn insert(at: usize, len: usize) -> Self {
        Self::new(at, 0, len)
    }

    /// Describes deleting `range` from the document.
    ///
    /// An inverted range deletes nothing.
    #[must_use]
    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range.start, range.end.saturating_sub(range.start), 0)
    }

    /// End of the replaced span in pre-change coordinates.
    #[must_use]
    pub const fn old_end(&self) -> usize {
        self.start + self.old_len
    }
}
