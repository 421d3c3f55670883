// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the snapshot table and the operation queue.

pub mod queue;
pub mod snapshots;
