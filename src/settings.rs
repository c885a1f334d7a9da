//! Plugin settings record and loaders.
//!
//! The host's settings registry delivers the plugin settings as a JSON object
//! with camelCase keys. Every key is optional and falls back to its default,
//! so a partially specified object (or `{}`) is always valid.
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::Settings;
//!
//! let settings = Settings::from_json(r#"{ "minChars": 3, "codeCellsOnly": true }"#)?;
//! assert_eq!(settings.min_chars, 3);
//! assert!(settings.code_cells_only);
//! assert_eq!(settings.highlight_color, "#d7d4f0");
//! # Ok::<(), highlight_selected::HighlightError>(())
//! ```

use crate::domain::{HighlightError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Snapshot of the user-facing plugin settings.
///
/// Process-wide and read-only to the core. A new snapshot replaces the old one
/// atomically whenever the host reports a settings change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Background color of matches in the focused editor.
    pub highlight_color: String,

    /// Outline color of matches in the focused editor.
    pub outline_color: String,

    /// Background and outline color of matches in unfocused editors.
    pub highlight_color_blurred: String,

    /// Outline width in pixels.
    pub outline_width: u32,

    /// Draw only the outline, with a transparent background.
    pub outline_only: bool,

    /// Highlight only in code cells; other cells are actively cleared.
    pub code_cells_only: bool,

    /// Minimum selection length, in characters, that triggers highlighting.
    pub min_chars: usize,

    /// Anchor word-like selections at word boundaries.
    pub whole_words: bool,

    /// Debounce delay in milliseconds.
    pub delay: u64,

    /// Start with highlighting enabled.
    pub enable_on_load: bool,

    /// With an empty selection, highlight the word under the cursor.
    pub highlight_word_under_cursor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_color: "#d7d4f0".to_string(),
            outline_color: "#ababab".to_string(),
            highlight_color_blurred: "#e6e4f5".to_string(),
            outline_width: 1,
            outline_only: false,
            code_cells_only: false,
            min_chars: 2,
            whole_words: true,
            delay: 100,
            enable_on_load: true,
            highlight_word_under_cursor: false,
        }
    }
}

impl Settings {
    /// Parses the host's composite settings JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Json`] for malformed JSON or mistyped values and
    /// [`HighlightError::Settings`] for values that fail validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validated()
    }

    /// Parses settings from a TOML document using the same camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Toml`] on parse errors and
    /// [`HighlightError::Settings`] on validation errors.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        settings.validated()
    }

    /// Loads settings from a file. Files ending in `.json` are parsed as JSON,
    /// everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Settings::from_json`] or [`Settings::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Debounce delay as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.delay)
    }

    /// Effective minimum selection length. `0` behaves like `1`.
    #[must_use]
    pub fn effective_min_chars(&self) -> usize {
        self.min_chars.max(1)
    }

    /// Returns `true` if any field feeding the theme differs from `other`.
    ///
    /// Only theme fields trigger an immediate restyle; every other change goes
    /// through the debounced update path.
    #[must_use]
    pub fn theme_differs(&self, other: &Self) -> bool {
        self.highlight_color != other.highlight_color
            || self.outline_color != other.outline_color
            || self.highlight_color_blurred != other.highlight_color_blurred
            || self.outline_width != other.outline_width
            || self.outline_only != other.outline_only
    }

    fn validated(self) -> Result<Self> {
        for (key, value) in [
            ("highlightColor", &self.highlight_color),
            ("outlineColor", &self.outline_color),
            ("highlightColorBlurred", &self.highlight_color_blurred),
        ] {
            if value.trim().is_empty() {
                return Err(HighlightError::Settings(format!("{key} must not be empty")));
            }
        }
        Ok(self)
    }
}
