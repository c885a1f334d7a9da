//! Event handling and state transition logic.
//!
//! This module implements the per-notebook event handler: host notifications
//! come in as [`Event`]s, mutate the [`NotebookController`], and come out as
//! [`Action`]s for the host to execute.
//!
//! # Event Types
//!
//! - **Focus**: `ActiveCellChanged`
//! - **Editor**: `SelectionChanged`, `DocumentChanged`
//! - **Scheduling**: `TimerFired`
//! - **Configuration**: `SettingsChanged`, `Toggle`
//! - **Lifecycle**: `Disposed`
//!
//! Selection and document changes on the monitored cell only (re)arm the
//! debounce timer; the query is computed and broadcast when the timer fires,
//! from the editor state at that moment.
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::app::{handle_event, Action, Event, NotebookController};
//! use highlight_selected::domain::{CellId, NotebookId};
//! use highlight_selected::host::DetachedView;
//! use highlight_selected::Settings;
//!
//! let mut controller = NotebookController::new(NotebookId(1), Settings::default());
//! let actions = handle_event(&mut controller, &DetachedView, &Event::ActiveCellChanged {
//!     cell: Some(CellId(7)),
//! });
//! assert!(matches!(actions[0], Action::Subscribe { cell: CellId(7), .. }));
//! ```

use super::actions::Action;
use super::state::NotebookController;
use crate::domain::{CellId, TextEdit, TimerToken};
use crate::host::NotebookView;
use crate::settings::Settings;

/// Notifications delivered by the host to one notebook's controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The notebook's active cell changed; `None` when no cell is active.
    ActiveCellChanged {
        /// Newly active cell.
        cell: Option<CellId>,
    },

    /// A subscribed cell's selection moved.
    ///
    /// Notifications for any cell other than the monitored one are stale and
    /// ignored.
    SelectionChanged {
        /// Cell whose selection changed.
        cell: CellId,
    },

    /// A cell's text changed.
    ///
    /// Delivered for every cell with an editor. Re-anchors that cell's
    /// decorations; on the monitored cell it also re-arms the update.
    DocumentChanged {
        /// Edited cell.
        cell: CellId,
        /// Replaced spans in pre-change coordinates.
        edits: Vec<TextEdit>,
    },

    /// A timer armed via `Action::ArmTimer` expired.
    TimerFired {
        /// Token of the expired timer.
        token: TimerToken,
    },

    /// The host's settings source reported a new snapshot.
    SettingsChanged(Settings),

    /// Enable/disable highlighting for this notebook.
    Toggle,

    /// The notebook is closing.
    Disposed,
}

/// Processes an event, mutates controller state, and returns actions to execute.
///
/// Never fails: missing cells, missing editors and stale notifications all
/// degrade to no-ops or to clearing highlights. After `Disposed`, every event
/// returns no actions.
pub fn handle_event(
    controller: &mut NotebookController,
    view: &dyn NotebookView,
    event: &Event,
) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_event", notebook = %controller.id, event_type = ?event).entered();

    if controller.is_disposed() {
        tracing::debug!("event after dispose ignored");
        return Vec::new();
    }

    let mut actions = Vec::new();

    match event {
        Event::ActiveCellChanged { cell } => {
            controller.watch(*cell, &mut actions);
            if cell.is_some() {
                controller.arm(&mut actions);
            } else {
                tracing::debug!("no active cell, clearing highlights");
                controller.cancel(&mut actions);
                controller.broadcast(view, None, &mut actions);
            }
        }
        Event::SelectionChanged { cell } => {
            if controller.monitored_cell() == Some(*cell) {
                controller.arm(&mut actions);
            } else {
                tracing::trace!(cell = %cell, "stale selection notification ignored");
            }
        }
        Event::DocumentChanged { cell, edits } => {
            controller.adjust(*cell, edits, &mut actions);
            if controller.monitored_cell() == Some(*cell) {
                controller.arm(&mut actions);
            }
        }
        Event::TimerFired { token } => {
            if controller.take_timer(*token) {
                let query = controller.compute_query(view);
                controller.broadcast(view, query.as_ref(), &mut actions);
            } else {
                tracing::trace!(token = token.0, "stale timer ignored");
            }
        }
        Event::SettingsChanged(settings) => {
            let previous = std::mem::replace(&mut controller.settings, settings.clone());

            if previous.enable_on_load != settings.enable_on_load {
                controller.enabled = settings.enable_on_load;
            }

            if previous.theme_differs(settings) {
                tracing::debug!("theme settings changed, restyling");
                controller.restyle(view, &mut actions);
            }

            if view.active_cell().is_some() {
                controller.arm(&mut actions);
            }
        }
        Event::Toggle => {
            controller.enabled = !controller.enabled;
            tracing::debug!(enabled = controller.enabled, "highlighting toggled");
            controller.arm(&mut actions);
        }
        Event::Disposed => {
            tracing::debug!("notebook disposed");
            controller.dispose(&mut actions);
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::Phase;
    use crate::domain::{CellInfo, CellKind, NotebookId, Selection};
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeView {
        active: Option<CellId>,
        cells: Vec<CellInfo>,
        texts: HashMap<CellId, String>,
        selections: HashMap<CellId, Selection>,
    }

    impl FakeView {
        fn cell(mut self, id: u64, kind: CellKind, text: &str) -> Self {
            self.cells.push(CellInfo::new(CellId(id), kind));
            self.texts.insert(CellId(id), text.to_string());
            self
        }
    }

    impl NotebookView for FakeView {
        fn active_cell(&self) -> Option<CellId> {
            self.active
        }
        fn cells(&self) -> Vec<CellInfo> {
            self.cells.clone()
        }
        fn cell_text(&self, cell: CellId) -> Option<String> {
            self.texts.get(&cell).cloned()
        }
        fn selection(&self, cell: CellId) -> Option<Selection> {
            Some(self.selections.get(&cell).copied().unwrap_or_default())
        }
    }

    fn controller() -> NotebookController {
        NotebookController::new(NotebookId(1), Settings::default())
    }

    fn armed_token(actions: &[Action]) -> TimerToken {
        actions
            .iter()
            .rev()
            .find_map(|a| match a {
                Action::ArmTimer { token, .. } => Some(*token),
                _ => None,
            })
            .expect("an ArmTimer action")
    }

    #[test]
    fn activation_subscribes_and_arms() {
        let mut c = controller();
        let actions = handle_event(&mut c, &FakeView::default(), &Event::ActiveCellChanged { cell: Some(CellId(3)) });
        assert!(matches!(actions[0], Action::Subscribe { cell: CellId(3), .. }));
        assert!(matches!(
            actions[1],
            Action::ArmTimer { delay, .. } if delay == Duration::from_millis(100)
        ));
        assert_eq!(c.monitored_cell(), Some(CellId(3)));
    }

    #[test]
    fn switching_cells_unsubscribes_previous_first() {
        let mut c = controller();
        let view = FakeView::default();
        let first = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let Action::Subscribe { subscription, .. } = first[0] else {
            panic!("expected subscribe");
        };

        let second = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(2)) });
        assert_eq!(second[0], Action::Unsubscribe { subscription });
        assert!(matches!(second[1], Action::Subscribe { cell: CellId(2), .. }));
    }

    #[test]
    fn rearming_cancels_pending_timer() {
        let mut c = controller();
        let view = FakeView::default();
        let first = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let token = armed_token(&first);

        let second = handle_event(&mut c, &view, &Event::SelectionChanged { cell: CellId(1) });
        assert_eq!(second[0], Action::CancelTimer { token });
        assert_eq!(c.phase(), Phase::Pending(armed_token(&second)));
    }

    #[test]
    fn stale_selection_notification_is_ignored() {
        let mut c = controller();
        let view = FakeView::default();
        handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let actions = handle_event(&mut c, &view, &Event::SelectionChanged { cell: CellId(9) });
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut c = controller();
        let view = FakeView::default();
        let first = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let stale = armed_token(&first);
        handle_event(&mut c, &view, &Event::SelectionChanged { cell: CellId(1) });

        let actions = handle_event(&mut c, &view, &Event::TimerFired { token: stale });
        assert!(actions.is_empty());
        assert!(matches!(c.phase(), Phase::Pending(_)));
    }

    #[test]
    fn timer_broadcasts_query_to_all_cells() {
        let mut c = controller();
        let mut view = FakeView::default()
            .cell(1, CellKind::Code, "foo = 1")
            .cell(2, CellKind::Markdown, "uses foo")
            .cell(3, CellKind::Code, "bar");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let actions = handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.decorations(CellId(1)).map(DecorationSetExt::spans), Some(vec![(0, 3)]));
        assert_eq!(c.decorations(CellId(2)).map(DecorationSetExt::spans), Some(vec![(5, 8)]));
        assert_eq!(c.decorations(CellId(3)).map(DecorationSetExt::spans), Some(vec![]));

        let themed = actions.iter().filter(|a| matches!(a, Action::ApplyTheme { .. })).count();
        let ranged = actions.iter().filter(|a| matches!(a, Action::ApplyRanges { .. })).count();
        assert_eq!(themed, 3);
        assert_eq!(ranged, 2);
    }

    #[test]
    fn code_cells_only_clears_other_cells() {
        let mut c = controller();
        let mut view = FakeView::default()
            .cell(1, CellKind::Code, "foo = 1")
            .cell(2, CellKind::Markdown, "uses foo");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });
        assert_eq!(c.decorations(CellId(2)).map(|d| d.len()), Some(1));

        let settings = Settings {
            code_cells_only: true,
            ..Settings::default()
        };
        let armed = handle_event(&mut c, &view, &Event::SettingsChanged(settings));
        assert!(!armed.iter().any(|a| matches!(a, Action::ApplyTheme { .. })));

        let actions = handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });
        assert!(actions.contains(&Action::ApplyRanges {
            cell: CellId(2),
            ranges: crate::highlight::DecorationSet::empty(),
        }));
        assert_eq!(c.decorations(CellId(1)).map(|d| d.len()), Some(1));
    }

    #[test]
    fn losing_active_cell_clears_immediately() {
        let mut c = controller();
        let mut view = FakeView::default().cell(1, CellKind::Code, "foo foo");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });
        assert_eq!(c.decorations(CellId(1)).map(|d| d.len()), Some(2));

        view.active = None;
        let actions = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: None });
        assert!(actions.iter().any(|a| matches!(a, Action::Unsubscribe { .. })));
        assert!(!actions.iter().any(|a| matches!(a, Action::ArmTimer { .. })));
        assert_eq!(c.decorations(CellId(1)).map(|d| d.len()), Some(0));
        assert_eq!(c.monitored_cell(), None);
    }

    #[test]
    fn toggle_disables_and_clears() {
        let mut c = controller();
        let mut view = FakeView::default().cell(1, CellKind::Code, "foo foo");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });

        let armed = handle_event(&mut c, &view, &Event::Toggle);
        assert!(!c.enabled);
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });
        assert_eq!(c.decorations(CellId(1)).map(|d| d.len()), Some(0));
    }

    #[test]
    fn theme_change_restyles_without_touching_ranges() {
        let mut c = controller();
        let mut view = FakeView::default().cell(1, CellKind::Code, "foo foo");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });
        let before = c.decorations(CellId(1)).cloned();

        let settings = Settings {
            highlight_color: "#ff0000".to_string(),
            ..Settings::default()
        };
        let actions = handle_event(&mut c, &view, &Event::SettingsChanged(settings));
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::ApplyTheme { theme, .. } if theme.focused.background_color == "#ff0000"
        )));
        assert!(!actions.iter().any(|a| matches!(a, Action::ApplyRanges { .. })));
        assert_eq!(c.decorations(CellId(1)).cloned(), before);
    }

    #[test]
    fn edits_on_any_cell_reanchor_its_decorations() {
        let mut c = controller();
        let mut view = FakeView::default()
            .cell(1, CellKind::Code, "foo")
            .cell(2, CellKind::Code, "x foo");
        view.active = Some(CellId(1));
        view.selections.insert(CellId(1), Selection::new(0, 3));

        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        handle_event(&mut c, &view, &Event::TimerFired { token: armed_token(&armed) });

        let actions = handle_event(&mut c, &view, &Event::DocumentChanged {
            cell: CellId(2),
            edits: vec![TextEdit::insert(0, 2)],
        });
        assert_eq!(c.decorations(CellId(2)).map(DecorationSetExt::spans), Some(vec![(4, 7)]));
        assert!(!actions.iter().any(|a| matches!(a, Action::ArmTimer { .. })));
    }

    #[test]
    fn dispose_releases_everything_and_ignores_later_events() {
        let mut c = controller();
        let view = FakeView::default();
        let armed = handle_event(&mut c, &view, &Event::ActiveCellChanged { cell: Some(CellId(1)) });
        let token = armed_token(&armed);

        let actions = handle_event(&mut c, &view, &Event::Disposed);
        assert!(actions.contains(&Action::CancelTimer { token }));
        assert!(actions.iter().any(|a| matches!(a, Action::Unsubscribe { .. })));
        assert!(c.is_disposed());

        assert!(handle_event(&mut c, &view, &Event::TimerFired { token }).is_empty());
        assert!(handle_event(&mut c, &view, &Event::Toggle).is_empty());
    }

    trait DecorationSetExt {
        fn spans(&self) -> Vec<(usize, usize)>;
    }

    impl DecorationSetExt for crate::highlight::DecorationSet {
        fn spans(&self) -> Vec<(usize, usize)> {
            self.iter().map(|r| (r.start, r.end)).collect()
        }
    }
}
