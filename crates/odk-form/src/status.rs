//! Submission status state machine.
//!
//! ```text
//!            ValidationFailed
//!          ┌──────────────────┐
//!          ▼                  │
//!   ──► Idle ──── Begin ───► Submitting ─── Succeed ──► Succeeded
//!          ▲                  │                            │
//!          │                  └──── Fail(msg) ──► Failed   │
//!          │                                        │      │
//!          └──── (Begin / ValidationFailed from any settled state)
//! ```
//!
//! `Submitting` is the only state that accepts `Succeed` / `Fail`, and the
//! only state that refuses `Begin`. That refusal is the in-flight guard.

use std::fmt;

pub const SUBMITTING_MESSAGE: &str = "Submitting...";
pub const SUCCESS_MESSAGE: &str = "Order placed successfully!";
pub const FAILURE_MESSAGE: &str = "Error placing order. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// No status message.
    #[default]
    Idle,
    /// A create-order request is outstanding.
    Submitting,
    Succeeded,
    Failed(String),
}

/// How a host should style the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Success,
    Error,
}

impl SubmissionStatus {
    /// The user-visible status line, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Submitting => Some(SUBMITTING_MESSAGE),
            SubmissionStatus::Succeeded => Some(SUCCESS_MESSAGE),
            SubmissionStatus::Failed(msg) => Some(msg),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            SubmissionStatus::Succeeded => StatusTone::Success,
            SubmissionStatus::Failed(_) => StatusTone::Error,
            SubmissionStatus::Idle | SubmissionStatus::Submitting => StatusTone::Neutral,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Apply `event`, or leave the status untouched and report why not.
    pub fn apply(&mut self, event: StatusEvent) -> Result<(), TransitionError> {
        use SubmissionStatus::*;

        let next = match (&*self, event) {
            (Idle | Succeeded | Failed(_), StatusEvent::ValidationFailed) => Idle,
            (Idle | Succeeded | Failed(_), StatusEvent::Begin) => Submitting,
            (Submitting, StatusEvent::Succeed) => Succeeded,
            (Submitting, StatusEvent::Fail(msg)) => Failed(msg),
            (state, ev) => {
                return Err(TransitionError {
                    from: state.clone(),
                    event: format!("{ev:?}"),
                });
            }
        };
        *self = next;
        Ok(())
    }
}

/// Events that drive [`SubmissionStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// Submit attempted but a field failed validation; clears the message.
    ValidationFailed,
    /// Validation passed and the request is about to be sent.
    Begin,
    Succeed,
    Fail(String),
}

/// Returned when an event cannot be applied in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: SubmissionStatus,
    pub event: String,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal submission transition: {:?} + {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for TransitionError {}
