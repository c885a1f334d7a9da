//! Decoration sets and the per-document decoration store.
//!
//! A [`DecorationSet`] is the authoritative list of highlighted ranges for one
//! cell editor: sorted ascending, pairwise non-overlapping, every range
//! non-empty. The [`DecorationStore`] owns one set and keeps it consistent
//! between broadcasts:
//!
//! - [`DecorationStore::replace`] swaps the whole set when a new query arrives.
//! - [`DecorationStore::adjust_for_edit`] re-anchors ranges through local text
//!   edits without re-scanning. Ranges touched by an edit are dropped; the next
//!   broadcast restores anything that still matches.

use crate::domain::TextEdit;
use std::ops::Range;

/// One highlighted span, `start..end` with `start < end`, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HighlightRange {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl HighlightRange {
    /// Creates a range. Returns `None` for empty or inverted spans.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`; ranges are non-empty by construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The range as a std [`Range`] for slicing.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether an edit replacing `edit` in pre-change coordinates touches the
    /// text of this range.
    ///
    /// Insertions exactly at either boundary do not touch it.
    const fn touched_by(&self, edit: &TextEdit) -> bool {
        if edit.old_len == 0 {
            self.start < edit.start && edit.start < self.end
        } else {
            self.start < edit.old_end() && edit.start < self.end
        }
    }
}

/// Ordered, non-overlapping set of highlight ranges for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    ranges: Vec<HighlightRange>,
}

impl DecorationSet {
    /// The empty set, i.e. "no highlights".
    #[must_use]
    pub const fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Builds a set from arbitrary ranges.
    ///
    /// Ranges are sorted; a range overlapping its predecessor is dropped so the
    /// non-overlap invariant holds for any input.
    #[must_use]
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = HighlightRange>,
    {
        let mut sorted: Vec<HighlightRange> = ranges.into_iter().collect();
        sorted.sort_unstable();

        let mut kept: Vec<HighlightRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            if kept.last().map_or(true, |prev| prev.end <= range.start) {
                kept.push(range);
            }
        }

        Self { ranges: kept }
    }

    /// Builds a set from ranges the caller guarantees to be ordered and
    /// non-overlapping, such as the output of a left-to-right scan.
    pub(crate) fn from_sorted(ranges: Vec<HighlightRange>) -> Self {
        debug_assert!(ranges.windows(2).all(|w| w[0].end <= w[1].start));
        Self { ranges }
    }

    /// Number of ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` when nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterates ranges in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, HighlightRange> {
        self.ranges.iter()
    }

    /// The ranges as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[HighlightRange] {
        &self.ranges
    }

    /// Maps every range through one document change.
    ///
    /// `edits` are in pre-change coordinates and may arrive in any order.
    /// Ranges entirely before all edits keep their offsets, ranges after an
    /// edit shift by `new_len - old_len`, and ranges touched by an edit are
    /// dropped.
    #[must_use]
    pub fn map_through(&self, edits: &[TextEdit]) -> Self {
        if edits.is_empty() || self.ranges.is_empty() {
            return self.clone();
        }

        let mut edits = edits.to_vec();
        edits.sort_unstable_by_key(|e| (e.start, e.old_len));

        let mut mapped = Vec::with_capacity(self.ranges.len());
        let mut cursor = 0;
        let mut inserted = 0usize;
        let mut removed = 0usize;

        for range in &self.ranges {
            // Accumulate every edit that ends at or before this range.
            while let Some(edit) = edits.get(cursor) {
                let before = if edit.old_len == 0 {
                    edit.start <= range.start
                } else {
                    edit.old_end() <= range.start
                };
                if !before {
                    break;
                }
                inserted += edit.new_len;
                removed += edit.old_len;
                cursor += 1;
            }

            let touched = edits[cursor..]
                .iter()
                .take_while(|edit| edit.start < range.end)
                .any(|edit| range.touched_by(edit));
            if touched {
                continue;
            }

            let start = (range.start + inserted).saturating_sub(removed);
            let end = (range.end + inserted).saturating_sub(removed);
            if let Some(shifted) = HighlightRange::new(start, end) {
                mapped.push(shifted);
            }
        }

        Self { ranges: mapped }
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a HighlightRange;
    type IntoIter = std::slice::Iter<'a, HighlightRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Per-document holder of the current [`DecorationSet`].
#[derive(Debug, Clone, Default)]
pub struct DecorationStore {
    current: DecorationSet,
}

impl DecorationStore {
    /// Creates an empty store, as at document attach.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: DecorationSet::empty(),
        }
    }

    /// The current authoritative set.
    #[must_use]
    pub const fn current(&self) -> &DecorationSet {
        &self.current
    }

    /// Replaces the whole set. Returns `true` if the stored set changed.
    pub fn replace(&mut self, next: DecorationSet) -> bool {
        if self.current == next {
            return false;
        }
        self.current = next;
        true
    }

    /// Re-anchors the stored set through a document change.
    ///
    /// Returns `true` if any range moved or was dropped.
    pub fn adjust_for_edit(&mut self, edits: &[TextEdit]) -> bool {
        let mapped = self.current.map_through(edits);
        self.replace(mapped)
    }
}
