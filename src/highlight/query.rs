//! Query builder: turns the active editor's selection into a search matcher.
//!
//! The policy, applied in order:
//!
//! 1. Empty selection: with `highlightWordUnderCursor` the maximal run of word
//!    characters touching the cursor becomes the candidate, otherwise no query.
//! 2. Non-empty selection: selections spanning a line break never produce a
//!    query; otherwise the selected text is the candidate.
//! 3. Empty, all-whitespace, or shorter than `minChars` candidates are rejected.
//! 4. The candidate is escaped literally and, with `wholeWords`, word-only
//!    candidates are anchored at word boundaries on both sides.
//!
//! Everything here is a pure function of its inputs.

use crate::domain::{HighlightError, Result, Selection};
use crate::settings::Settings;
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Compiled search target derived from a selection.
///
/// Matching is literal, case-sensitive and global: the scanner reports every
/// non-overlapping occurrence in a document.
#[derive(Clone)]
pub struct Matcher {
    literal: String,
    whole_word: bool,
    regex: Regex,
}

impl Matcher {
    /// Compiles a matcher for `literal`.
    ///
    /// Word-boundary anchoring is only applied when `whole_word` is requested
    /// *and* the literal consists solely of word characters; symbol selections
    /// stay unanchored so they still highlight.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Pattern`] if `literal` is empty or the
    /// compiled pattern exceeds the regex size limit.
    pub fn new(literal: &str, whole_word: bool) -> Result<Self> {
        if literal.is_empty() {
            return Err(HighlightError::Pattern("empty literal".to_string()));
        }

        let whole_word = whole_word && is_word(literal);
        let escaped = regex::escape(literal);
        let pattern = if whole_word {
            format!(r"\b{escaped}\b")
        } else {
            escaped
        };

        let regex = Regex::new(&pattern).map_err(|e| HighlightError::Pattern(e.to_string()))?;

        Ok(Self {
            literal: literal.to_string(),
            whole_word,
            regex,
        })
    }

    /// The unescaped text being searched for.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Whether matches are anchored at word boundaries.
    #[must_use]
    pub const fn whole_word(&self) -> bool {
        self.whole_word
    }

    /// The compiled pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) const fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal && self.whole_word == other.whole_word
    }
}

impl Eq for Matcher {}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("literal", &self.literal)
            .field("whole_word", &self.whole_word)
            .finish()
    }
}

/// Word character exactly as the regex engine's `\w` and `\b` see it.
///
/// Combining marks count; superscripts and vulgar fractions do not.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    regex_syntax::is_word_character(c)
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}

/// Locates the maximal run of word characters touching `offset`.
///
/// A cursor directly before or after a word counts as touching it. Returns
/// `None` if `offset` is out of range, not on a char boundary, or surrounded
/// by non-word characters.
#[must_use]
pub fn word_at(text: &str, offset: usize) -> Option<Range<usize>> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map_or(offset, |(i, _)| i);

    let end = text[offset..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(text.len(), |(i, _)| offset + i);

    (start < end).then_some(start..end)
}

/// Derives the search query for the current selection.
///
/// Returns `None` ("no query") whenever the policy rejects the selection;
/// the caller broadcasts that as a clear.
///
/// # Example
///
/// ```rust
/// use highlight_selected::domain::Selection;
/// use highlight_selected::highlight::build_query;
/// use highlight_selected::Settings;
///
/// let text = "let total = total + 1;";
/// let query = build_query(Selection::new(4, 9), text, &Settings::default()).unwrap();
/// assert_eq!(query.literal(), "total");
/// assert!(query.whole_word());
/// ```
#[must_use]
pub fn build_query(selection: Selection, text: &str, settings: &Settings) -> Option<Matcher> {
    let candidate = if selection.is_empty() {
        if !settings.highlight_word_under_cursor {
            return None;
        }
        let range = word_at(text, selection.head)?;
        &text[range]
    } else {
        let selected = text.get(selection.span())?;
        if selected.contains(['\n', '\r']) {
            tracing::trace!("multi-line selection, no query");
            return None;
        }
        selected
    };

    if candidate.trim().is_empty() || candidate.chars().count() < settings.effective_min_chars() {
        return None;
    }

    match Matcher::new(candidate, settings.whole_words) {
        Ok(matcher) => Some(matcher),
        Err(e) => {
            tracing::debug!(error = %e, candidate_len = candidate.len(), "selection not compilable, no query");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn selected_word_becomes_whole_word_query() {
        let query = build_query(Selection::new(0, 3), "foo bar foo_bar foofoo", &settings()).unwrap();
        assert_eq!(query.literal(), "foo");
        assert!(query.whole_word());
        assert_eq!(query.pattern(), r"\bfoo\b");
    }

    #[test]
    fn backwards_selection_is_equivalent() {
        let text = "alpha beta";
        assert_eq!(
            build_query(Selection::new(10, 6), text, &settings()),
            build_query(Selection::new(6, 10), text, &settings())
        );
    }

    #[test]
    fn short_selection_is_rejected() {
        let settings = Settings {
            min_chars: 3,
            ..settings()
        };
        assert!(build_query(Selection::new(0, 2), "ab cd", &settings).is_none());
    }

    #[test]
    fn min_chars_counts_characters_not_bytes() {
        let settings = Settings {
            min_chars: 2,
            ..settings()
        };
        // "é" is two bytes but one character.
        assert!(build_query(Selection::new(0, 2), "é x", &settings).is_none());
    }

    #[test]
    fn whitespace_selection_is_rejected() {
        assert!(build_query(Selection::new(3, 6), "foo   bar", &settings()).is_none());
    }

    #[test]
    fn multi_line_selection_is_rejected() {
        let text = "foo\nfoo";
        assert!(build_query(Selection::new(0, 7), text, &settings()).is_none());
        assert!(build_query(Selection::new(2, 5), text, &settings()).is_none());
    }

    #[test]
    fn empty_selection_without_word_under_cursor_is_absent() {
        assert!(build_query(Selection::cursor(2), "variable_name", &settings()).is_none());
    }

    #[test]
    fn word_under_cursor_is_used_when_enabled() {
        let settings = Settings {
            highlight_word_under_cursor: true,
            ..settings()
        };
        let text = "x = variable_name + 1";
        let query = build_query(Selection::cursor(9), text, &settings).unwrap();
        assert_eq!(query.literal(), "variable_name");
    }

    #[test]
    fn cursor_touching_word_end_counts() {
        assert_eq!(word_at("foo bar", 3), Some(0..3));
        assert_eq!(word_at("foo bar", 4), Some(4..7));
        assert_eq!(word_at("a + b", 2), None);
        assert_eq!(word_at("", 0), None);
    }

    #[test]
    fn word_at_rejects_invalid_offsets() {
        assert_eq!(word_at("héllo", 2), None);
        assert_eq!(word_at("abc", 10), None);
    }

    #[test]
    fn symbols_are_escaped_and_not_anchored() {
        let query = build_query(Selection::new(1, 3), "a->b", &settings()).unwrap();
        assert_eq!(query.literal(), "->");
        assert!(!query.whole_word());
        assert_eq!(query.pattern(), r"\->");
    }

    #[test]
    fn whole_words_off_leaves_word_unanchored() {
        let settings = Settings {
            whole_words: false,
            ..settings()
        };
        let query = build_query(Selection::new(0, 3), "foo", &settings).unwrap();
        assert!(!query.whole_word());
        assert_eq!(query.pattern(), "foo");
    }

    #[test]
    fn non_word_symbol_in_candidate_disables_anchoring() {
        let text = "x² + x² = 2x²";
        let query = build_query(Selection::new(0, 3), text, &settings()).unwrap();
        assert!(!query.whole_word());

        let spans: Vec<_> = crate::highlight::scan(text, Some(&query))
            .iter()
            .map(|r| (r.start, r.end))
            .collect();
        assert_eq!(spans, vec![(0, 3), (6, 9), (13, 16)]);
    }

    #[test]
    fn combining_marks_are_word_characters() {
        let text = "cafe\u{301} xe\u{301}y e\u{301}";
        let query = build_query(Selection::new(13, 16), text, &settings()).unwrap();
        assert!(query.whole_word());

        let spans: Vec<_> = crate::highlight::scan(text, Some(&query))
            .iter()
            .map(|r| (r.start, r.end))
            .collect();
        assert_eq!(spans, vec![(13, 16)]);
        assert_eq!(word_at(text, 2), Some(0..6));
    }

    #[test]
    fn word_at_stops_at_superscripts() {
        assert_eq!(word_at("x² y", 0), Some(0..1));
        assert_eq!(word_at("x² y", 1), Some(0..1));
    }

    #[test]
    fn out_of_range_selection_is_absent() {
        assert!(build_query(Selection::new(2, 40), "short", &settings()).is_none());
    }
}
