//! Process-wide plugin state: the settings snapshot and the notebook table.
//!
//! Controllers are keyed by [`NotebookId`], inserted explicitly when the host
//! attaches a notebook and removed on disposal. Each call resolves the
//! notebook's view from the [`Host`], runs the handler, and executes the
//! resulting actions in order.

use super::actions::Action;
use super::handler::{handle_event, Event};
use super::state::NotebookController;
use crate::domain::{NotebookId, Result};
use crate::host::{DetachedView, Host};
use crate::settings::Settings;
use crate::ui::Theme;
use std::collections::HashMap;

/// Owner of all per-notebook controllers.
#[derive(Debug, Default)]
pub struct HighlightRegistry {
    settings: Settings,
    controllers: HashMap<NotebookId, NotebookController>,
}

impl HighlightRegistry {
    /// Creates a registry running under `settings`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        tracing::debug!(?settings, "highlight registry created");
        Self {
            settings,
            controllers: HashMap::new(),
        }
    }

    /// The current settings snapshot.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Theme derived from the current settings.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_settings(&self.settings)
    }

    /// Controller of an attached notebook.
    #[must_use]
    pub fn controller(&self, notebook: NotebookId) -> Option<&NotebookController> {
        self.controllers.get(&notebook)
    }

    /// Number of attached notebooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns `true` when no notebook is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Starts highlighting a notebook.
    ///
    /// Styles every existing cell editor, then begins monitoring the active
    /// cell if there is one. Attaching an already attached notebook is a no-op.
    pub fn attach<H: Host>(&mut self, notebook: NotebookId, host: &mut H) {
        if self.controllers.contains_key(&notebook) {
            tracing::debug!(notebook = %notebook, "notebook already attached");
            return;
        }

        let mut controller = NotebookController::new(notebook, self.settings.clone());
        let actions = host.view(notebook).map_or_else(Vec::new, |view| {
            let mut actions = Vec::new();
            controller.restyle(view, &mut actions);
            actions.extend(handle_event(
                &mut controller,
                view,
                &Event::ActiveCellChanged {
                    cell: view.active_cell(),
                },
            ));
            actions
        });

        tracing::debug!(notebook = %notebook, "notebook attached");
        self.controllers.insert(notebook, controller);
        Self::execute(host, notebook, actions);
    }

    /// Delivers one host notification to a notebook's controller.
    ///
    /// Events for unknown notebooks are dropped. `Event::Disposed` also
    /// removes the controller from the table.
    pub fn dispatch<H: Host>(&mut self, notebook: NotebookId, event: Event, host: &mut H) {
        let Some(controller) = self.controllers.get_mut(&notebook) else {
            tracing::trace!(notebook = %notebook, "event for unknown notebook dropped");
            return;
        };

        let actions = match host.view(notebook) {
            Some(view) => handle_event(controller, view, &event),
            None => handle_event(controller, &DetachedView, &event),
        };

        if controller.is_disposed() {
            self.controllers.remove(&notebook);
        }

        Self::execute(host, notebook, actions);
    }

    /// Disposes a notebook: cancels its timer, releases its subscription and
    /// forgets its controller.
    pub fn dispose<H: Host>(&mut self, notebook: NotebookId, host: &mut H) {
        self.dispatch(notebook, Event::Disposed, host);
    }

    /// Replaces the settings snapshot and forwards it to every notebook.
    pub fn update_settings<H: Host>(&mut self, settings: Settings, host: &mut H) {
        if settings == self.settings {
            tracing::debug!("settings unchanged");
            return;
        }

        tracing::debug!(?settings, "settings updated");
        self.settings = settings;

        let mut notebooks: Vec<NotebookId> = self.controllers.keys().copied().collect();
        notebooks.sort_unstable();
        for notebook in notebooks {
            self.dispatch(notebook, Event::SettingsChanged(self.settings.clone()), host);
        }
    }

    /// Applies the outcome of a settings load.
    ///
    /// A failed load is logged and the last known-good snapshot stays in
    /// effect; highlighting is never interrupted.
    pub fn load_settings<H: Host>(&mut self, loaded: Result<Settings>, host: &mut H) {
        match loaded {
            Ok(settings) => self.update_settings(settings, host),
            Err(e) => {
                tracing::error!(error = %e, "failed to load settings, keeping previous");
            }
        }
    }

    /// Toggles highlighting for one notebook.
    pub fn toggle<H: Host>(&mut self, notebook: NotebookId, host: &mut H) {
        self.dispatch(notebook, Event::Toggle, host);
    }

    fn execute<H: Host>(host: &mut H, notebook: NotebookId, actions: Vec<Action>) {
        tracing::trace!(notebook = %notebook, action_count = actions.len(), "executing actions");
        for action in actions {
            host.execute(notebook, action);
        }
    }
}
