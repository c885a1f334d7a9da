//! Controller lifecycle phases.
//!
//! # State Machine
//!
//! ```text
//!            arm (selection/edit/settings/toggle)
//!   ┌──────┐ ────────────────────────────────► ┌─────────────────┐
//!   │ Idle │                                   │ Pending(token)  │ ──┐ re-arm:
//!   └──────┘ ◄──────────────────────────────── └─────────────────┘ ◄─┘ cancel + arm
//!      │          TimerFired(token) → broadcast          │
//!      │                                                 │
//!      └──────────────► Disposed ◄───────────────────────┘
//! ```
//!
//! At most one timer is pending per controller. `Disposed` is terminal.

use crate::domain::TimerToken;

/// Lifecycle phase of a notebook controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No update scheduled.
    Idle,

    /// A debounced update is armed under the given token.
    Pending(TimerToken),

    /// The notebook was disposed; every further event is ignored.
    Disposed,
}

impl Phase {
    /// The pending timer, if any.
    #[must_use]
    pub const fn pending(self) -> Option<TimerToken> {
        match self {
            Self::Pending(token) => Some(token),
            Self::Idle | Self::Disposed => None,
        }
    }
}
