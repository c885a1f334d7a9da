//! Collaborator contracts between the plugin and its host editor.
//!
//! The host owns the notebook widget tree, the editors, timers and event
//! delivery. The plugin sees it through two seams:
//!
//! - [`NotebookView`]: read-only snapshot access to one notebook, queried at
//!   the moment an event is handled (cell lists are never cached).
//! - [`Host`]: resolves notebooks to views and executes the [`Action`]s the
//!   controllers emit.
//!
//! [`memory::MemoryHost`] is a complete in-memory host with a virtual clock,
//! used by the test-suite and usable as a reference for real integrations.

pub mod memory;

use crate::app::Action;
use crate::domain::{CellId, CellInfo, NotebookId, Selection};

/// Read access to one notebook's live state.
pub trait NotebookView {
    /// The currently active cell, if any.
    fn active_cell(&self) -> Option<CellId>;

    /// All cells in document order.
    fn cells(&self) -> Vec<CellInfo>;

    /// Full text of the cell's editor, or `None` if no editor is attached.
    fn cell_text(&self, cell: CellId) -> Option<String>;

    /// Current selection of the cell's editor, or `None` if no editor is
    /// attached.
    fn selection(&self, cell: CellId) -> Option<Selection>;
}

/// The host application as seen by the plugin registry.
pub trait Host {
    /// Resolves a notebook to its live view. `None` once the notebook is gone.
    fn view(&self, notebook: NotebookId) -> Option<&dyn NotebookView>;

    /// Executes one controller action for `notebook`.
    fn execute(&mut self, notebook: NotebookId, action: Action);
}

/// View of a notebook that no longer exists on the host side.
///
/// Lets a controller finish its cleanup (cancelling timers, releasing
/// subscriptions) after the host already tore the notebook down.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedView;

impl NotebookView for DetachedView {
    fn active_cell(&self) -> Option<CellId> {
        None
    }

    fn cells(&self) -> Vec<CellInfo> {
        Vec::new()
    }

    fn cell_text(&self, _cell: CellId) -> Option<String> {
        None
    }

    fn selection(&self, _cell: CellId) -> Option<Selection> {
        None
    }
}
