//! Domain layer for the highlight-selected plugin.
//!
//! This module contains the core domain types, independent of any particular
//! host editor. The host refers to notebooks and cells by stable identifiers
//! and reports selections and edits in byte offsets.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`cell`]: Notebook/cell identity and handle types
//! - [`edit`]: Selection and text-change descriptions
//!
//! # Examples
//!
//! ```
//! use highlight_selected::domain::{CellId, CellInfo, CellKind, Selection};
//!
//! let cell = CellInfo::new(CellId(1), CellKind::Code);
//! assert!(cell.kind.is_code());
//! assert!(Selection::cursor(4).is_empty());
//! ```

pub mod cell;
pub mod edit;
pub mod error;

pub use cell::{CellId, CellInfo, CellKind, NotebookId, SubscriptionId, TimerToken};
pub use edit::{Selection, TextEdit};
pub use error::{HighlightError, Result};
