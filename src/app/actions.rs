//! Actions representing side effects to be executed by the host.
//!
//! The controller never calls into the host editor. Each handled event yields a
//! `Vec<Action>` that the host executes in order, which keeps the controller a
//! pure state machine and makes every effect observable in tests.
//!
//! # Example
//!
//! ```rust
//! use highlight_selected::app::Action;
//! use highlight_selected::domain::{CellId, SubscriptionId};
//!
//! let actions = vec![
//!     Action::Subscribe { cell: CellId(1), subscription: SubscriptionId(1) },
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::{CellId, SubscriptionId, TimerToken};
use crate::highlight::DecorationSet;
use crate::ui::Theme;
use std::time::Duration;

/// Commands executed by the host on behalf of a notebook controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start delivering selection notifications of `cell` as
    /// `Event::SelectionChanged`, registered under `subscription`.
    Subscribe {
        /// Cell to observe.
        cell: CellId,
        /// Handle to register the listener under.
        subscription: SubscriptionId,
    },

    /// Release a subscription created by [`Action::Subscribe`].
    Unsubscribe {
        /// Handle to release.
        subscription: SubscriptionId,
    },

    /// Arm a one-shot timer; the host delivers `Event::TimerFired { token }`
    /// after `delay`.
    ArmTimer {
        /// Token to echo back when the timer fires.
        token: TimerToken,
        /// Debounce delay.
        delay: Duration,
    },

    /// Cancel a timer armed by [`Action::ArmTimer`]. Cancelling a timer that
    /// already fired is a no-op.
    CancelTimer {
        /// Token of the timer to cancel.
        token: TimerToken,
    },

    /// Replace every highlight mark in the cell's editor with `ranges`.
    ///
    /// An empty set clears all marks.
    ApplyRanges {
        /// Target cell.
        cell: CellId,
        /// The complete new range set.
        ranges: DecorationSet,
    },

    /// Restyle the cell's highlight marks without touching their ranges.
    ApplyTheme {
        /// Target cell.
        cell: CellId,
        /// Style record to apply.
        theme: Theme,
    },
}
