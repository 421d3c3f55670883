// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry wizard for Shiftlog.
//!
//! Walks an operator through a branching, mode-dependent set of questions.
//! An entry is emitted as soon as its location is known (in progress), so an
//! interrupted session still leaves a record; a later session resumes it and
//! emits the finalized version as an in-place update.
//!
//! The branching lives in [`transition`], a pure function over
//! [`WizardState`]. [`Wizard`] wraps it with entry construction and narrative
//! composition.

pub mod error;
pub mod narrative;
pub mod state;
pub mod transition;
pub mod wizard;

pub use error::WizardError;
pub use state::{Answer, Continuation, Fields, Flow, GUARD_CHECKS, Route, Step, WizardState};
pub use transition::{Transition, transition};
pub use wizard::{Emission, Wizard, manual_entry};
