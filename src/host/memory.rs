//! In-memory host with a virtual millisecond clock.
//!
//! Keeps every piece of host-side state the plugin can influence (applied
//! ranges and themes per cell, live subscriptions, pending timers) so tests can
//! assert on what a real editor would display.
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::app::{Event, HighlightRegistry};
//! use highlight_selected::domain::{CellId, CellKind, NotebookId, Selection};
//! use highlight_selected::host::memory::MemoryHost;
//! use highlight_selected::Settings;
//!
//! let nb = NotebookId(1);
//! let mut host = MemoryHost::new();
//! host.add_notebook(nb)
//!     .with_cell(CellId(1), CellKind::Code, "total = total + 1")
//!     .with_cell(CellId(2), CellKind::Code, "print(total)");
//!
//! let mut registry = HighlightRegistry::new(Settings::default());
//! registry.attach(nb, &mut host);
//!
//! for (id, event) in host.activate(nb, Some(CellId(1))) {
//!     registry.dispatch(id, event, &mut host);
//! }
//! for (id, event) in host.select(CellId(1), Selection::new(0, 5)) {
//!     registry.dispatch(id, event, &mut host);
//! }
//! for (id, event) in host.advance(100) {
//!     registry.dispatch(id, event, &mut host);
//! }
//!
//! assert_eq!(host.cell(CellId(1)).map(|c| c.ranges.len()), Some(2));
//! assert_eq!(host.cell(CellId(2)).map(|c| c.ranges.len()), Some(1));
//! ```

use super::{Host, NotebookView};
use crate::app::{Action, Event};
use crate::domain::{CellId, CellInfo, CellKind, NotebookId, Selection, SubscriptionId, TextEdit, TimerToken};
use crate::highlight::DecorationSet;
use crate::ui::Theme;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// One cell with its editor-side state.
#[derive(Debug, Clone)]
pub struct MemoryCell {
    /// Cell identity.
    pub id: CellId,
    /// Cell type.
    pub kind: CellKind,
    /// Editor text.
    pub text: String,
    /// Whether an editor is attached.
    pub has_editor: bool,
    /// Editor selection.
    pub selection: Selection,
    /// Highlight ranges last applied by the plugin.
    pub ranges: DecorationSet,
    /// Theme last applied by the plugin.
    pub theme: Option<Theme>,
}

/// One notebook: ordered cells and the active cell.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotebook {
    /// Cells in document order.
    pub cells: Vec<MemoryCell>,
    /// Active cell, if any.
    pub active: Option<CellId>,
}

impl MemoryNotebook {
    /// Appends a cell with an attached editor and the cursor at offset 0.
    pub fn with_cell(&mut self, id: CellId, kind: CellKind, text: &str) -> &mut Self {
        self.cells.push(MemoryCell {
            id,
            kind,
            text: text.to_string(),
            has_editor: true,
            selection: Selection::cursor(0),
            ranges: DecorationSet::empty(),
            theme: None,
        });
        self
    }

    /// Removes a cell, as when the user deletes it.
    pub fn remove_cell(&mut self, id: CellId) {
        self.cells.retain(|c| c.id != id);
        if self.active == Some(id) {
            self.active = None;
        }
    }

    fn cell(&self, id: CellId) -> Option<&MemoryCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    fn editor(&self, id: CellId) -> Option<&MemoryCell> {
        self.cell(id).filter(|c| c.has_editor)
    }
}

impl NotebookView for MemoryNotebook {
    fn active_cell(&self) -> Option<CellId> {
        self.active
    }

    fn cells(&self) -> Vec<CellInfo> {
        self.cells
            .iter()
            .map(|c| CellInfo {
                id: c.id,
                kind: c.kind,
                has_editor: c.has_editor,
            })
            .collect()
    }

    fn cell_text(&self, cell: CellId) -> Option<String> {
        self.editor(cell).map(|c| c.text.clone())
    }

    fn selection(&self, cell: CellId) -> Option<Selection> {
        self.editor(cell).map(|c| c.selection)
    }
}

/// In-memory host implementation.
#[derive(Debug, Default)]
pub struct MemoryHost {
    notebooks: HashMap<NotebookId, MemoryNotebook>,
    subscriptions: HashMap<SubscriptionId, (NotebookId, CellId)>,
    timers: BTreeMap<TimerToken, (NotebookId, u64)>,
    now_ms: u64,
    executed: Vec<(NotebookId, Action)>,
}

impl MemoryHost {
    /// Creates a host with no notebooks at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty notebook and returns it for population.
    pub fn add_notebook(&mut self, id: NotebookId) -> &mut MemoryNotebook {
        self.notebooks.entry(id).or_default()
    }

    /// Closes a notebook on the host side.
    pub fn remove_notebook(&mut self, id: NotebookId) -> Option<MemoryNotebook> {
        self.notebooks.remove(&id)
    }

    /// Looks up a notebook.
    #[must_use]
    pub fn notebook(&self, id: NotebookId) -> Option<&MemoryNotebook> {
        self.notebooks.get(&id)
    }

    /// Looks up a notebook mutably.
    pub fn notebook_mut(&mut self, id: NotebookId) -> Option<&mut MemoryNotebook> {
        self.notebooks.get_mut(&id)
    }

    /// Finds a cell in any notebook.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&MemoryCell> {
        self.notebooks.values().find_map(|nb| nb.cell(id))
    }

    fn locate_mut(&mut self, id: CellId) -> Option<(NotebookId, &mut MemoryCell)> {
        self.notebooks.iter_mut().find_map(|(nb_id, nb)| {
            nb.cells
                .iter_mut()
                .find(|c| c.id == id)
                .map(|cell| (*nb_id, cell))
        })
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed, unfired timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Cells with a live selection subscription.
    #[must_use]
    pub fn subscribed_cells(&self) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self.subscriptions.values().map(|&(_, cell)| cell).collect();
        cells.sort_unstable();
        cells
    }

    /// Every action executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> &[(NotebookId, Action)] {
        &self.executed
    }

    /// Forgets the executed-action log.
    pub fn clear_executed(&mut self) {
        self.executed.clear();
    }

    /// Changes the active cell and returns the notification to dispatch.
    pub fn activate(&mut self, notebook: NotebookId, cell: Option<CellId>) -> Vec<(NotebookId, Event)> {
        let Some(nb) = self.notebooks.get_mut(&notebook) else {
            return Vec::new();
        };
        nb.active = cell;
        vec![(notebook, Event::ActiveCellChanged { cell })]
    }

    /// Moves a cell's selection and returns one notification per subscriber.
    pub fn select(&mut self, cell: CellId, selection: Selection) -> Vec<(NotebookId, Event)> {
        let Some((_, target)) = self.locate_mut(cell) else {
            return Vec::new();
        };
        target.selection = selection;
        self.notifications_for(cell)
    }

    /// Replaces `range` of the cell's text with `replacement`.
    ///
    /// The document-change notification goes to the owning notebook
    /// unconditionally, since every editor carries the highlight extension.
    /// The selection collapses to the end of the inserted text.
    pub fn edit(&mut self, cell: CellId, range: Range<usize>, replacement: &str) -> Vec<(NotebookId, Event)> {
        let Some((notebook, target)) = self.locate_mut(cell) else {
            return Vec::new();
        };
        if range.start > range.end
            || range.end > target.text.len()
            || !target.text.is_char_boundary(range.start)
            || !target.text.is_char_boundary(range.end)
        {
            return Vec::new();
        }

        let edit = TextEdit::new(range.start, range.end - range.start, replacement.len());
        target.text.replace_range(range.clone(), replacement);
        target.selection = Selection::cursor(range.start + replacement.len());

        vec![(
            notebook,
            Event::DocumentChanged {
                cell,
                edits: vec![edit],
            },
        )]
    }

    /// Advances the clock and returns the timers that fired, in firing order.
    pub fn advance(&mut self, ms: u64) -> Vec<(NotebookId, Event)> {
        self.now_ms += ms;

        let mut due: Vec<(u64, TimerToken, NotebookId)> = self
            .timers
            .iter()
            .filter(|(_, &(_, at))| at <= self.now_ms)
            .map(|(&token, &(notebook, at))| (at, token, notebook))
            .collect();
        due.sort_unstable();

        due.into_iter()
            .map(|(_, token, notebook)| {
                self.timers.remove(&token);
                (notebook, Event::TimerFired { token })
            })
            .collect()
    }

    fn notifications_for(&self, cell: CellId) -> Vec<(NotebookId, Event)> {
        let mut subs: Vec<(&SubscriptionId, &(NotebookId, CellId))> = self
            .subscriptions
            .iter()
            .filter(|(_, &(_, c))| c == cell)
            .collect();
        subs.sort_unstable_by_key(|(id, _)| **id);
        subs.into_iter()
            .map(|(_, &(notebook, _))| (notebook, Event::SelectionChanged { cell }))
            .collect()
    }
}

impl Host for MemoryHost {
    fn view(&self, notebook: NotebookId) -> Option<&dyn NotebookView> {
        self.notebooks
            .get(&notebook)
            .map(|nb| nb as &dyn NotebookView)
    }

    fn execute(&mut self, notebook: NotebookId, action: Action) {
        self.executed.push((notebook, action.clone()));

        match action {
            Action::Subscribe { cell, subscription } => {
                self.subscriptions.insert(subscription, (notebook, cell));
            }
            Action::Unsubscribe { subscription } => {
                self.subscriptions.remove(&subscription);
            }
            Action::ArmTimer { token, delay } => {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                self.timers
                    .insert(token, (notebook, self.now_ms.saturating_add(delay_ms)));
            }
            Action::CancelTimer { token } => {
                self.timers.remove(&token);
            }
            Action::ApplyRanges { cell, ranges } => {
                if let Some((_, target)) = self.locate_mut(cell) {
                    target.ranges = ranges;
                }
            }
            Action::ApplyTheme { cell, theme } => {
                if let Some((_, target)) = self.locate_mut(cell) {
                    target.theme = Some(theme);
                }
            }
        }
    }
}
