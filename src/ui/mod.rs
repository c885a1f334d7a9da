//! Presentation layer: highlight styling.
//!
//! Rendering of marks is owned by the host editor; this layer only derives the
//! style record the host applies to each editor.
//!
//! # Modules
//!
//! - [`theme`]: Focused/blurred highlight styles and CSS rendering

pub mod theme;

pub use theme::{HighlightStyle, Theme, HIGHLIGHT_CLASS};
