//! Notebook and cell identity types.
//!
//! The host owns the notebook widget tree; the plugin only ever refers to it
//! through these stable identifiers. Handles allocated by the controller
//! ([`SubscriptionId`], [`TimerToken`]) live here too so the host and the
//! controller agree on a single vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an open notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotebookId(pub u64);

/// Stable identifier of a cell, unique across all notebooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

/// Handle for a selection-notification subscription on one cell.
///
/// Allocated by the controller, registered by the host on `Action::Subscribe`
/// and released on `Action::Unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Handle for one armed debounce timer.
///
/// The host echoes it back in `Event::TimerFired`; a token that is no longer
/// pending is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notebook#{}", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// Notebook cell type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Executable source cell.
    Code,
    /// Rendered markdown cell.
    Markdown,
    /// Raw, unrendered cell.
    Raw,
}

impl CellKind {
    /// Returns `true` for code cells.
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::Code)
    }
}

/// Snapshot of one cell as enumerated from the live notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    /// Cell identity.
    pub id: CellId,
    /// Cell type, used by the `codeCellsOnly` filter.
    pub kind: CellKind,
    /// Whether an editor instance is currently attached to the cell.
    ///
    /// Rendered markdown cells typically have no editor until edited.
    pub has_editor: bool,
}

impl CellInfo {
    /// Creates a cell snapshot with an attached editor.
    #[must_use]
    pub const fn new(id: CellId, kind: CellKind) -> Self {
        Self {
            id,
            kind,
            has_editor: true,
        }
    }
}
