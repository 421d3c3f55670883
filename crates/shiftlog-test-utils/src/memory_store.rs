// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory local store for engine tests that do not need durability.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shiftlog_core::{
    AdapterType, HealthStatus, LocalStore, OperationId, PluginAdapter, QueuedOperation, Shift,
    ShiftId, ShiftlogError,
};

#[derive(Default)]
struct Inner {
    snapshots: HashMap<ShiftId, Shift>,
    queue: Vec<QueuedOperation>,
    fail_writes: bool,
}

/// A [`LocalStore`] backed by a `HashMap` and a `Vec`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a storage error.
    pub async fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    /// The whole queue, across shifts.
    pub async fn queued(&self) -> Vec<QueuedOperation> {
        self.inner.lock().await.queue.clone()
    }

    fn write_error() -> ShiftlogError {
        ShiftlogError::Storage {
            source: "memory store write failure injected".into(),
        }
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn save_snapshot(&self, shift: &Shift) -> Result<(), ShiftlogError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(Self::write_error());
        }
        inner.snapshots.insert(shift.id.clone(), shift.clone());
        Ok(())
    }

    async fn load_snapshot(&self, shift_id: &ShiftId) -> Result<Option<Shift>, ShiftlogError> {
        Ok(self.inner.lock().await.snapshots.get(shift_id).cloned())
    }

    async fn enqueue(&self, operation: &QueuedOperation) -> Result<(), ShiftlogError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(Self::write_error());
        }
        if !inner.queue.iter().any(|op| op.id == operation.id) {
            inner.queue.push(operation.clone());
        }
        Ok(())
    }

    async fn pending(&self, shift_id: &ShiftId) -> Result<Vec<QueuedOperation>, ShiftlogError> {
        Ok(self
            .inner
            .lock()
            .await
            .queue
            .iter()
            .filter(|op| &op.shift_id == shift_id)
            .cloned()
            .collect())
    }

    async fn remove(&self, operation_id: &OperationId) -> Result<(), ShiftlogError> {
        self.inner
            .lock()
            .await
            .queue
            .retain(|op| &op.id != operation_id);
        Ok(())
    }
}
