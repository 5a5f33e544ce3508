//! Two-stage confirmation state machine.
//!
//! One [`DialogState`] replaces a pair of per-dialog visibility flags, so
//! the primary and confirmation dialogs can never be open or closed in an
//! invalid combination. Visibility is derived from the state.
//!
//! | State                 | Event          | Next state       |
//! |-----------------------|----------------|------------------|
//! | `Editing`             | submit         | `ConfirmPending` |
//! | `ConfirmPending`      | cancel         | `Editing`        |
//! | `ConfirmPending`      | confirm        | `Committed`      |
//! | any but `Cancelled`   | external close | `Cancelled`      |
//!
//! The completion callback is consumed on first use, so it runs at most
//! once per controller no matter how the workflow ends. In particular an
//! external close after `Committed` still moves to `Cancelled`, but the
//! host hears only the `Committed` ending.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the create workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialogState {
    /// Primary dialog open, user editing the form.
    #[default]
    Editing,
    /// Confirmation dialog open on top of the primary dialog.
    ConfirmPending,
    /// User confirmed; both dialogs closed.
    Committed,
    /// Workflow closed from outside; all dialogs closed.
    Cancelled,
}

impl DialogState {
    /// Whether the primary (create) dialog is shown.
    #[must_use]
    pub const fn primary_open(self) -> bool {
        matches!(self, Self::Editing | Self::ConfirmPending)
    }

    /// Whether the confirmation dialog is shown.
    #[must_use]
    pub const fn confirm_open(self) -> bool {
        matches!(self, Self::ConfirmPending)
    }

    /// Whether the workflow instance has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Editing => "editing",
            Self::ConfirmPending => "confirm-pending",
            Self::Committed => "committed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// User or host interaction driving the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogEvent {
    /// Primary action control pressed.
    Submit,
    /// Confirmation dialog dismissed.
    Cancel,
    /// Confirmation accepted.
    Confirm,
    /// Primary dialog closed from outside (backdrop, escape, host).
    ExternalClose,
}

/// How a workflow instance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// The user confirmed creation.
    Committed,
    /// The workflow was closed without committing.
    Cancelled,
}

/// Result of feeding an event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed.
    Moved {
        /// State before the event.
        from: DialogState,
        /// State after the event.
        to: DialogState,
        /// Set when this transition ran the completion callback.
        completed: Option<Ending>,
    },
    /// The event has no meaning in the current state.
    Ignored,
    /// `submit` was refused by the submit gate.
    Blocked,
}

impl Transition {
    /// Whether the state changed.
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

type CompletionCallback = Box<dyn FnOnce(Ending)>;

/// Owns [`DialogState`] and the host's completion callback.
///
/// No other component mutates the state; everything goes through
/// [`handle`](Self::handle).
pub struct ConfirmationController {
    state: DialogState,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for ConfirmationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationController")
            .field("state", &self.state)
            .field("pending_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl ConfirmationController {
    /// Start a new workflow instance in [`DialogState::Editing`].
    pub fn new(on_complete: impl FnOnce(Ending) + 'static) -> Self {
        Self {
            state: DialogState::Editing,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.state
    }

    /// Feed an event without a submit gate.
    pub fn handle(&mut self, event: DialogEvent) -> Transition {
        self.handle_gated(event, true)
    }

    /// Feed an event. `submit_allowed` is consulted only for
    /// [`DialogEvent::Submit`] from `Editing`.
    pub fn handle_gated(&mut self, event: DialogEvent, submit_allowed: bool) -> Transition {
        let from = self.state;
        let to = match (from, event) {
            (DialogState::Editing, DialogEvent::Submit) => {
                if !submit_allowed {
                    tracing::debug!("submit blocked by gate");
                    return Transition::Blocked;
                }
                DialogState::ConfirmPending
            }
            (DialogState::ConfirmPending, DialogEvent::Cancel) => DialogState::Editing,
            (DialogState::ConfirmPending, DialogEvent::Confirm) => DialogState::Committed,
            // From `Committed` the callback has already been consumed; the
            // state still moves so visibility stays derived from it.
            (
                DialogState::Editing | DialogState::ConfirmPending | DialogState::Committed,
                DialogEvent::ExternalClose,
            ) => DialogState::Cancelled,
            _ => {
                tracing::debug!(state = %from, ?event, "event ignored");
                return Transition::Ignored;
            }
        };
        self.state = to;
        tracing::debug!(%from, %to, ?event, "dialog transition");

        let ending = match to {
            DialogState::Committed => Some(Ending::Committed),
            DialogState::Cancelled => Some(Ending::Cancelled),
            DialogState::Editing | DialogState::ConfirmPending => None,
        };
        let completed = ending.and_then(|ending| {
            self.on_complete.take().map(|callback| {
                callback(ending);
                ending
            })
        });
        Transition::Moved {
            from,
            to,
            completed,
        }
    }
}
