//! Application layer coordinating notebooks, events, and actions.
//!
//! This module sits between the host editor and the highlight core. It
//! implements the per-notebook controller as an event-driven state machine:
//!
//! ```text
//! Host notification → Event → handle_event → controller mutation → Actions → Host
//!                                                   │
//!                            build_query / scan / DecorationStore
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands executed by the host
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Controller lifecycle phases
//! - [`state`]: Per-notebook controller state
//! - [`registry`]: Notebook table and settings fan-out
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::app::HighlightRegistry;
//! use highlight_selected::domain::{CellId, CellKind, NotebookId};
//! use highlight_selected::host::memory::MemoryHost;
//! use highlight_selected::Settings;
//!
//! let mut host = MemoryHost::new();
//! host.add_notebook(NotebookId(1)).with_cell(CellId(1), CellKind::Code, "x = 1");
//!
//! let mut registry = HighlightRegistry::new(Settings::default());
//! registry.attach(NotebookId(1), &mut host);
//! assert_eq!(registry.len(), 1);
//!
//! registry.dispose(NotebookId(1), &mut host);
//! assert!(registry.is_empty());
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod registry;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::Phase;
pub use registry::HighlightRegistry;
pub use state::NotebookController;
