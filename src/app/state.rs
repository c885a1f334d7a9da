//! Per-notebook controller state.
//!
//! [`NotebookController`] is the single owner of everything the plugin knows
//! about one notebook: the settings snapshot it runs under, the monitored cell
//! and its subscription handle, the pending debounce timer, and one
//! [`DecorationStore`] per cell editor.
//!
//! The methods here are the building blocks the event handler composes; each
//! appends the host effects it needs to an action list instead of performing
//! them.

use super::actions::Action;
use super::modes::Phase;
use crate::domain::{CellId, NotebookId, SubscriptionId, TextEdit, TimerToken};
use crate::highlight::{build_query, scan, DecorationSet, DecorationStore, Matcher};
use crate::host::NotebookView;
use crate::settings::Settings;
use crate::ui::Theme;
use std::collections::{HashMap, HashSet};

/// State of one open notebook.
#[derive(Debug, Clone)]
pub struct NotebookController {
    /// Notebook this controller drives.
    pub id: NotebookId,

    /// Settings snapshot in effect for this notebook.
    pub settings: Settings,

    /// Runtime on/off switch, initialised from `enableOnLoad`.
    pub enabled: bool,

    phase: Phase,

    /// Cell whose selection notifications drive updates, with the handle of
    /// the subscription delivering them.
    monitored: Option<(CellId, SubscriptionId)>,

    /// Decoration store per cell editor.
    stores: HashMap<CellId, DecorationStore>,

    /// Cells whose editor already received the current theme.
    themed: HashSet<CellId>,

    /// Counter for subscription handles and timer tokens.
    next_handle: u64,
}

impl NotebookController {
    /// Creates an idle controller with no monitored cell.
    #[must_use]
    pub fn new(id: NotebookId, settings: Settings) -> Self {
        Self {
            id,
            enabled: settings.enable_on_load,
            settings,
            phase: Phase::Idle,
            monitored: None,
            stores: HashMap::new(),
            themed: HashSet::new(),
            next_handle: 0,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Cell whose selection is being monitored.
    #[must_use]
    pub fn monitored_cell(&self) -> Option<CellId> {
        self.monitored.map(|(cell, _)| cell)
    }

    /// Current decoration set of `cell`, if the controller tracks it.
    #[must_use]
    pub fn decorations(&self, cell: CellId) -> Option<&DecorationSet> {
        self.stores.get(&cell).map(DecorationStore::current)
    }

    /// Returns `true` once the notebook was disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    /// Theme derived from the current settings.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_settings(&self.settings)
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Switches selection monitoring to `cell`, releasing the previous
    /// subscription first.
    pub(crate) fn watch(&mut self, cell: Option<CellId>, actions: &mut Vec<Action>) {
        if self.monitored_cell() == cell {
            return;
        }

        if let Some((old, subscription)) = self.monitored.take() {
            tracing::debug!(notebook = %self.id, cell = %old, "stop monitoring cell");
            actions.push(Action::Unsubscribe { subscription });
        }

        if let Some(cell) = cell {
            let subscription = SubscriptionId(self.allocate());
            tracing::debug!(notebook = %self.id, cell = %cell, "start monitoring cell");
            actions.push(Action::Subscribe { cell, subscription });
            self.monitored = Some((cell, subscription));
        }
    }

    /// Cancels any pending timer and arms a new one for the debounce delay.
    pub(crate) fn arm(&mut self, actions: &mut Vec<Action>) {
        self.cancel(actions);

        let token = TimerToken(self.allocate());
        let delay = self.settings.debounce();
        tracing::trace!(notebook = %self.id, token = token.0, delay_ms = self.settings.delay, "arming update");
        actions.push(Action::ArmTimer { token, delay });
        self.phase = Phase::Pending(token);
    }

    /// Cancels the pending timer, if any, and returns to idle.
    pub(crate) fn cancel(&mut self, actions: &mut Vec<Action>) {
        if let Some(token) = self.phase.pending() {
            actions.push(Action::CancelTimer { token });
            self.phase = Phase::Idle;
        }
    }

    /// Consumes the pending timer if `token` is the one armed.
    ///
    /// Returns `false` for stale tokens (already cancelled or superseded).
    pub(crate) fn take_timer(&mut self, token: TimerToken) -> bool {
        if self.phase.pending() == Some(token) {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Releases the subscription and timer and drops every store.
    pub(crate) fn dispose(&mut self, actions: &mut Vec<Action>) {
        self.cancel(actions);
        self.watch(None, actions);
        self.stores.clear();
        self.themed.clear();
        self.phase = Phase::Disposed;
    }

    /// Runs the query builder against the active cell's current editor state.
    ///
    /// A disabled controller, a missing active cell or a cell without an
    /// editor all yield no query.
    pub(crate) fn compute_query(&self, view: &dyn NotebookView) -> Option<Matcher> {
        if !self.enabled {
            tracing::debug!(notebook = %self.id, "highlighting disabled, clearing");
            return None;
        }

        let cell = view.active_cell()?;
        let text = view.cell_text(cell)?;
        let selection = view.selection(cell)?;
        build_query(selection, &text, &self.settings)
    }

    /// Fans `query` out to every live cell with an editor.
    ///
    /// With `codeCellsOnly`, non-code cells receive an explicit absent query so
    /// highlights shown before the filter was enabled disappear. Targets are
    /// enumerated from the view at call time; stores of cells that vanished are
    /// dropped.
    pub(crate) fn broadcast(
        &mut self,
        view: &dyn NotebookView,
        query: Option<&Matcher>,
        actions: &mut Vec<Action>,
    ) {
        let _span = tracing::debug_span!(
            "broadcast",
            notebook = %self.id,
            query = ?query.map(Matcher::literal)
        )
        .entered();

        let cells = view.cells();
        let live: HashSet<CellId> = cells
            .iter()
            .filter(|c| c.has_editor)
            .map(|c| c.id)
            .collect();
        self.stores.retain(|id, _| live.contains(id));
        self.themed.retain(|id| live.contains(id));

        let mut theme = None;
        let mut updated = 0usize;

        for cell in cells.iter().filter(|c| c.has_editor) {
            let target = if self.settings.code_cells_only && !cell.kind.is_code() {
                None
            } else {
                query
            };

            let ranges = match target {
                Some(matcher) => view
                    .cell_text(cell.id)
                    .map_or_else(DecorationSet::empty, |text| scan(&text, Some(matcher))),
                None => DecorationSet::empty(),
            };

            if self.themed.insert(cell.id) {
                let theme = theme.get_or_insert_with(|| self.theme()).clone();
                actions.push(Action::ApplyTheme {
                    cell: cell.id,
                    theme,
                });
            }

            let store = self.stores.entry(cell.id).or_default();
            if store.replace(ranges.clone()) {
                updated += 1;
                actions.push(Action::ApplyRanges {
                    cell: cell.id,
                    ranges,
                });
            }
        }

        tracing::debug!(cells = live.len(), updated, "broadcast complete");
    }

    /// Pushes the current theme to every cell with an editor.
    pub(crate) fn restyle(&mut self, view: &dyn NotebookView, actions: &mut Vec<Action>) {
        let theme = self.theme();
        for cell in view.cells().into_iter().filter(|c| c.has_editor) {
            self.themed.insert(cell.id);
            actions.push(Action::ApplyTheme {
                cell: cell.id,
                theme: theme.clone(),
            });
        }
    }

    /// Re-anchors `cell`'s decorations through a document change.
    pub(crate) fn adjust(&mut self, cell: CellId, edits: &[TextEdit], actions: &mut Vec<Action>) {
        let Some(store) = self.stores.get_mut(&cell) else {
            return;
        };
        if store.adjust_for_edit(edits) {
            actions.push(Action::ApplyRanges {
                cell,
                ranges: store.current().clone(),
            });
        }
    }
}
