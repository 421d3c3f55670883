// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queued shift mutations and their application to a shift document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShiftlogError;
use crate::model::{Entry, Shift, ShiftStatus};
use crate::types::{EntryId, OperationId, ShiftId};

/// A single change to a shift's document.
///
/// `index` is the entry position observed when the mutation was created. It
/// is carried on the wire for the remote store; locally, entries are resolved
/// by id so a position that has shifted since never hits the wrong entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Append { entry: Entry },
    Update { index: usize, entry: Entry },
    Delete { index: usize, entry_id: EntryId },
    Complete { summary: String },
}

impl Mutation {
    pub fn is_update(&self) -> bool {
        matches!(self, Mutation::Update { .. })
    }

    pub fn target_index(&self) -> Option<usize> {
        match self {
            Mutation::Update { index, .. } | Mutation::Delete { index, .. } => Some(*index),
            Mutation::Append { .. } | Mutation::Complete { .. } => None,
        }
    }

    /// The entry payload for appends and updates.
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Mutation::Append { entry } | Mutation::Update { entry, .. } => Some(entry),
            Mutation::Delete { .. } | Mutation::Complete { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Append { .. } => "append",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Complete { .. } => "complete",
        }
    }
}

/// A mutation waiting for remote confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOperation {
    pub id: OperationId,
    pub shift_id: ShiftId,
    pub mutation: Mutation,
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedOperation {
    pub fn new(shift_id: ShiftId, mutation: Mutation) -> Self {
        Self {
            id: OperationId::new(),
            shift_id,
            mutation,
            enqueued_at: Utc::now(),
        }
    }
}

impl Shift {
    /// Applies a mutation in place.
    ///
    /// The same rules hold locally and in test doubles of the remote store:
    /// a completed shift rejects everything, at most one entry may be in
    /// progress, and re-appending an entry id that is already present is a
    /// no-op so a redelivered append never duplicates.
    pub fn apply_mutation(&mut self, mutation: &Mutation) -> Result<(), ShiftlogError> {
        self.ensure_active()?;
        match mutation {
            Mutation::Append { entry } => {
                entry.validate()?;
                if self.position_of(entry.id).is_some() {
                    return Ok(());
                }
                if entry.in_progress && self.in_progress_entry().is_some() {
                    return Err(ShiftlogError::EntryInProgress);
                }
                self.entries.push(entry.clone());
            }
            Mutation::Update { entry, .. } => {
                entry.validate()?;
                let position = self
                    .position_of(entry.id)
                    .ok_or_else(|| ShiftlogError::EntryNotFound(entry.id.to_string()))?;
                if entry.in_progress
                    && self
                        .in_progress_entry()
                        .is_some_and(|(index, _)| index != position)
                {
                    return Err(ShiftlogError::EntryInProgress);
                }
                self.entries[position] = entry.clone();
            }
            Mutation::Delete { entry_id, .. } => {
                let position = self
                    .position_of(*entry_id)
                    .ok_or_else(|| ShiftlogError::EntryNotFound(entry_id.to_string()))?;
                self.entries.remove(position);
            }
            Mutation::Complete { summary } => {
                if self.in_progress_entry().is_some() {
                    return Err(ShiftlogError::EntryInProgress);
                }
                self.summary = Some(summary.clone());
                self.status = ShiftStatus::Completed;
            }
        }
        Ok(())
    }
}
