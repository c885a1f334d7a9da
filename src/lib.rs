//! highlight-selected: highlight every occurrence of the selected word across a notebook.
//!
//! This crate is the core of a notebook-editor add-on. When the user selects
//! text (or, optionally, just places the cursor on a word) in a cell, every
//! occurrence of that text in every cell of the active notebook is marked:
//! - Queries derived from the selection under a configurable policy
//!   (minimum length, whole-word anchoring, word-under-cursor fallback)
//! - Debounced updates, coalescing bursts of cursor movement into one scan
//! - Per-cell decoration sets kept consistent under ongoing edits
//! - A hot-swappable focused/blurred theme
//! - Optional restriction to code cells

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host editor (notebook widgets, editors, timers)    │  ← External
//! └─────────────────────────────────────────────────────┘
//!              │ Events                  ▲ Actions
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - HighlightRegistry: notebook table + settings     │
//! │  - NotebookController: debounce + fan-out           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌──────────────────────────┐   ┌──────────────────────┐
//! │ Highlight core           │   │ UI (ui/)             │
//! │ (highlight/)             │   │ - Theme              │
//! │ - build_query            │   │ - CSS rules          │
//! │ - scan                   │   └──────────────────────┘
//! │ - DecorationStore        │
//! └──────────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Settings, Host seam (host/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Per-notebook event/action state machine and the registry
//! - [`domain`]: Identifiers, selections, edits, errors
//! - [`highlight`]: Query builder, match scanner, decoration store
//! - [`host`]: Collaborator traits and an in-memory host
//! - [`settings`]: Plugin settings record and loaders
//! - [`ui`]: Highlight theme
//! - [`observability`]: Tracing subscriber with rotating file output
//!
//! # Activation Flow
//!
//! 1. The host loads the plugin settings (JSON from its settings registry).
//! 2. [`initialize`] builds a [`HighlightRegistry`], falling back to defaults
//!    if the settings failed to load.
//! 3. For every opened notebook the host calls `attach`; notifications are
//!    forwarded with `dispatch`, and `dispose` when the notebook closes.
//! 4. Settings changes go through `update_settings` / `load_settings`.
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::domain::{CellId, CellKind, NotebookId, Selection};
//! use highlight_selected::host::memory::MemoryHost;
//! use highlight_selected::{initialize, Settings};
//!
//! let nb = NotebookId(1);
//! let mut host = MemoryHost::new();
//! host.add_notebook(nb).with_cell(CellId(1), CellKind::Code, "foo bar foo_bar foofoo foo");
//!
//! let mut registry = initialize(Settings::from_json(r#"{ "delay": 50 }"#));
//! registry.attach(nb, &mut host);
//!
//! for (id, event) in host.activate(nb, Some(CellId(1))) {
//!     registry.dispatch(id, event, &mut host);
//! }
//! for (id, event) in host.select(CellId(1), Selection::new(0, 3)) {
//!     registry.dispatch(id, event, &mut host);
//! }
//! for (id, event) in host.advance(50) {
//!     registry.dispatch(id, event, &mut host);
//! }
//!
//! let spans: Vec<_> = host.cell(CellId(1)).map_or_else(Vec::new, |cell| {
//!     cell.ranges.iter().map(|r| (r.start, r.end)).collect()
//! });
//! assert_eq!(spans, vec![(0, 3), (23, 26)]);
//! ```

pub mod app;
pub mod domain;
pub mod highlight;
pub mod host;
pub mod settings;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, HighlightRegistry, NotebookController};
pub use domain::{HighlightError, Result};
pub use settings::Settings;
pub use ui::Theme;

/// Activates the plugin with the outcome of the host's settings load.
///
/// A failed load is reported through `tracing::error!` and the plugin starts
/// with default settings; activation itself never fails.
///
/// # Example
///
/// ```rust
/// use highlight_selected::{initialize, HighlightError, Settings};
///
/// let registry = initialize(Err(HighlightError::Settings("unavailable".into())));
/// assert_eq!(registry.settings(), &Settings::default());
/// ```
pub fn initialize(loaded: Result<Settings>) -> HighlightRegistry {
    tracing::debug!("activating highlight-selected");

    let settings = loaded.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load settings, using defaults");
        Settings::default()
    });

    HighlightRegistry::new(settings)
}
