// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text composition for Shiftlog.
//!
//! Turns raw operator notes into a single professional log sentence. An
//! external [`PolishAdapter`](shiftlog_core::PolishAdapter) is tried first;
//! whenever it is missing, slow, failing, or returns nothing useful, the
//! deterministic [`local_polish`] transform is used instead. Composition never
//! fails from the caller's point of view.

pub mod composer;
pub mod local;

pub use composer::{
    Composer, DEFAULT_TIMEOUT, NO_ENTRIES_SUMMARY, POLISH_DIRECTIVE, SUMMARY_DIRECTIVE,
    SUMMARY_UNAVAILABLE,
};
pub use local::{DEFAULT_MAX_CHARS, local_polish};
