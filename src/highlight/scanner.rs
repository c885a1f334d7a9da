//! Match scanner: computes the decoration set of a whole document.

use super::decorations::{DecorationSet, HighlightRange};
use super::query::Matcher;

/// Scans `text` left to right for every non-overlapping occurrence of
/// `matcher`.
///
/// An absent matcher yields the empty set. Zero-width matches are skipped,
/// and the underlying iterator advances past them, so the scan always
/// terminates and every emitted range is non-empty.
///
/// # Example
///
/// ```rust
/// use highlight_selected::highlight::{scan, Matcher};
///
/// let matcher = Matcher::new("foo", true)?;
/// let set = scan("foo bar foo_bar foofoo foo", Some(&matcher));
/// let spans: Vec<_> = set.iter().map(|r| (r.start, r.end)).collect();
/// assert_eq!(spans, vec![(0, 3), (23, 26)]);
/// # Ok::<(), highlight_selected::HighlightError>(())
/// ```
#[must_use]
pub fn scan(text: &str, matcher: Option<&Matcher>) -> DecorationSet {
    let Some(matcher) = matcher else {
        return DecorationSet::empty();
    };

    let ranges = matcher
        .regex()
        .find_iter(text)
        .filter_map(|m| HighlightRange::new(m.start(), m.end()))
        .collect();

    DecorationSet::from_sorted(ranges)
}
