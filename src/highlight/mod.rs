//! Selection-to-highlight core: query building, scanning and decoration state.
//!
//! ```text
//! Selection + text ──► build_query ──► Matcher ──► scan ──► DecorationSet
//!                                                             │
//!                                         DecorationStore ◄───┘ (replace)
//!                                               ▲
//!                                   TextEdit ───┘ (adjust_for_edit)
//! ```
//!
//! # Modules
//!
//! - [`query`]: Selection policy and matcher compilation
//! - [`scanner`]: Whole-document match scanning
//! - [`decorations`]: Range sets and the per-document store

pub mod decorations;
pub mod query;
pub mod scanner;

pub use decorations::{DecorationSet, DecorationStore, HighlightRange};
pub use query::{build_query, is_word_char, word_at, Matcher};
pub use scanner::scan;
