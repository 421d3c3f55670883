// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Shiftlog crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Identifier of a shift document, assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(pub String);

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable, client-generated identifier of an entry.
///
/// Entries are addressed by this id rather than by position, so deleting an
/// entry never redirects an older queued update to its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-generated identifier of a queued operation.
///
/// Doubles as the idempotency key sent with every delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Remote,
    Storage,
    Polish,
}

/// Connectivity as reported by the platform signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Whether every local mutation has been confirmed by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum QueueState {
    Synced,
    Queued,
}

/// Observable sync indicator. Drives UI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub connectivity: Connectivity,
    pub queue: QueueState,
    /// Number of operations still waiting for delivery.
    pub pending: usize,
}

impl SyncStatus {
    pub fn new(connectivity: Connectivity, pending: usize) -> Self {
        let queue = if pending == 0 {
            QueueState::Synced
        } else {
            QueueState::Queued
        };
        Self {
            connectivity,
            queue,
            pending,
        }
    }

    /// Short label for a status chip: "Offline", "Queued" or "Synced".
    pub fn label(&self) -> &'static str {
        match (self.connectivity, self.queue) {
            (Connectivity::Offline, _) => "Offline",
            (Connectivity::Online, QueueState::Queued) => "Queued",
            (Connectivity::Online, QueueState::Synced) => "Synced",
        }
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self::new(Connectivity::Online, 0)
    }
}

/// A rewrite request for the text-polish collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishRequest {
    /// Fixed style directive passed as the system instruction.
    pub directive: String,
    /// Raw note to rewrite.
    pub text: String,
    /// Upper bound on the reply length, in characters.
    pub max_chars: usize,
}
