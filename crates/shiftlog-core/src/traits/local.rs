// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable device-local storage for shift snapshots and the operation queue.

use async_trait::async_trait;

use crate::error::ShiftlogError;
use crate::model::Shift;
use crate::operation::QueuedOperation;
use crate::traits::adapter::PluginAdapter;
use crate::types::{OperationId, ShiftId};

/// Adapter for local persistence.
///
/// The queue must survive process restarts and keep insertion order.
#[async_trait]
pub trait LocalStore: PluginAdapter {
    /// Stores the latest local view of a shift, replacing any previous one.
    async fn save_snapshot(&self, shift: &Shift) -> Result<(), ShiftlogError>;

    /// Loads the last stored view of a shift.
    async fn load_snapshot(&self, shift_id: &ShiftId) -> Result<Option<Shift>, ShiftlogError>;

    /// Appends an operation to the tail of the queue.
    async fn enqueue(&self, operation: &QueuedOperation) -> Result<(), ShiftlogError>;

    /// Pending operations for a shift, oldest first.
    async fn pending(&self, shift_id: &ShiftId) -> Result<Vec<QueuedOperation>, ShiftlogError>;

    /// Removes a confirmed operation. Removing an unknown id is not an error.
    async fn remove(&self, operation_id: &OperationId) -> Result<(), ShiftlogError>;
}
