// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::state::Step;

/// Reasons a wizard action was refused. The wizard state is never changed
/// by a refused action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A required answer was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The answer kind does not fit the current step.
    #[error("unexpected {answer} answer at step {step}")]
    UnexpectedAnswer { step: Step, answer: &'static str },

    /// The shift already has an entry waiting to be resumed.
    #[error("another entry is already in progress")]
    EntryInProgress,

    /// The shift has no in-progress entry to resume.
    #[error("no entry is in progress")]
    NothingToResume,

    /// The shift is completed.
    #[error("shift is completed")]
    ShiftCompleted,

    /// The entry time is not `HH:mm`.
    #[error("time `{0}` is not HH:mm")]
    InvalidTime(String),

    /// The in-progress entry cannot be resumed from its stored state.
    #[error("cannot resume entry: {0}")]
    InvalidContinuation(String),
}
