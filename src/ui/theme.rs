//! Highlight theme derived from settings.
//!
//! The theme has two variants: one for matches in the focused editor and one
//! for every other (blurred) editor. Both are plain data so the host can
//! restyle an editor without touching its decoration ranges.
//!
//! # CSS
//!
//! [`Theme::to_css`] renders the rules the host injects into the page:
//!
//! ```css
//! .jp-HighlightSelected { background-color: #e6e4f5; outline: 1px solid #e6e4f5; }
//! .cm-editor.cm-focused .jp-HighlightSelected { background-color: #d7d4f0; outline: 1px solid #ababab; }
//! ```
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::{Settings, Theme};
//!
//! let settings = Settings { outline_only: true, ..Settings::default() };
//! let theme = Theme::from_settings(&settings);
//! assert_eq!(theme.focused.background_color, "transparent");
//! ```

use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// CSS class carried by every highlight mark.
pub const HIGHLIGHT_CLASS: &str = "jp-HighlightSelected";

/// Selector prefix for marks inside the focused editor.
const FOCUSED_SCOPE: &str = ".cm-editor.cm-focused";

/// Background used when `outlineOnly` is set.
const TRANSPARENT: &str = "transparent";

/// Style of one highlight variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStyle {
    /// Mark background, or `transparent` in outline-only mode.
    pub background_color: String,
    /// Outline width in pixels.
    pub outline_width: u32,
    /// Outline color.
    pub outline_color: String,
}

impl HighlightStyle {
    fn declarations(&self) -> String {
        format!(
            "background-color: {}; outline: {}px solid {};",
            self.background_color, self.outline_width, self.outline_color
        )
    }
}

/// Focused and blurred highlight styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Style of matches in the focused editor.
    pub focused: HighlightStyle,
    /// Style of matches in unfocused editors.
    pub blurred: HighlightStyle,
}

impl Theme {
    /// Derives the theme from a settings snapshot.
    ///
    /// The blurred variant uses `highlightColorBlurred` for both its background
    /// and its outline.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let background = |color: &str| {
            if settings.outline_only {
                TRANSPARENT.to_string()
            } else {
                color.to_string()
            }
        };

        Self {
            focused: HighlightStyle {
                background_color: background(&settings.highlight_color),
                outline_width: settings.outline_width,
                outline_color: settings.outline_color.clone(),
            },
            blurred: HighlightStyle {
                background_color: background(&settings.highlight_color_blurred),
                outline_width: settings.outline_width,
                outline_color: settings.highlight_color_blurred.clone(),
            },
        }
    }

    /// Renders the blurred rule followed by the focused override.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = writeln!(css, ".{HIGHLIGHT_CLASS} {{ {} }}", self.blurred.declarations());
        let _ = writeln!(
            css,
            "{FOCUSED_SCOPE} .{HIGHLIGHT_CLASS} {{ {} }}",
            self.focused.declarations()
        );
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
