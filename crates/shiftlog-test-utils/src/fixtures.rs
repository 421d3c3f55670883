// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample shifts and entries.

use shiftlog_core::{Entry, EntryDetails, EntryStatus, Shift, ShiftMode};

/// An active shift in the given mode with no entries.
pub fn shift(id: &str, mode: ShiftMode) -> Shift {
    Shift::new(id, "user-1", "2026-10-18", "18:00–06:00", "M/S", mode)
}

pub fn patrol_shift(id: &str) -> Shift {
    shift(id, ShiftMode::SitePatrol)
}

/// A finalized site-patrol entry at 10:00.
pub fn finished_entry(site: &str) -> Entry {
    Entry::new(
        "10:00",
        EntryStatus::InService,
        EntryDetails::SitePatrol { site: site.into() },
        format!("10:00 10-8 at {site} — Patrolled exterior and interior. All secure."),
    )
}
