// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote store trait: the authoritative home of shift documents.

use async_trait::async_trait;

use crate::error::ShiftlogError;
use crate::model::Shift;
use crate::operation::QueuedOperation;
use crate::traits::adapter::PluginAdapter;
use crate::types::ShiftId;

/// Adapter for the remote shift store.
///
/// Delivery is at-least-once: an operation may be sent again after a
/// failure whose outcome was unknown. Implementations pass the operation id
/// along as an idempotency key so the store can drop redeliveries.
#[async_trait]
pub trait RemoteStore: PluginAdapter {
    /// Delivers one queued mutation and returns the shift as the store sees
    /// it afterwards.
    async fn deliver(&self, operation: &QueuedOperation) -> Result<Shift, ShiftlogError>;

    /// Fetches the authoritative shift document.
    async fn fetch_shift(&self, shift_id: &ShiftId) -> Result<Shift, ShiftlogError>;
}
