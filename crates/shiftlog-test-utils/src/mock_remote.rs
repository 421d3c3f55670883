// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory stand-in for the remote shift store.
//!
//! Applies mutations with the same rules as the local model, deduplicates
//! on operation id, and can be switched offline, told to fail, or told to
//! hold deliveries until released.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, watch};
use tracing::debug;

use shiftlog_core::{
    AdapterType, HealthStatus, OperationId, PluginAdapter, QueuedOperation, RemoteStore, Shift,
    ShiftId, ShiftlogError,
};

#[derive(Default)]
struct Inner {
    shifts: HashMap<ShiftId, Shift>,
    seen: HashSet<OperationId>,
    attempts: Vec<OperationId>,
    applied: Vec<OperationId>,
    fail_deliveries: usize,
    lose_responses: usize,
    fail_fetches: usize,
}

/// A [`RemoteStore`] holding shifts in memory.
pub struct MockRemote {
    inner: Mutex<Inner>,
    online: AtomicBool,
    fetches: AtomicUsize,
    held: watch::Sender<bool>,
    arrived: Notify,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            online: AtomicBool::new(true),
            fetches: AtomicUsize::new(0),
            held: watch::Sender::new(false),
            arrived: Notify::new(),
        }
    }

    /// Seeds (or replaces) a shift document.
    pub async fn insert_shift(&self, shift: Shift) {
        self.inner.lock().await.shifts.insert(shift.id.clone(), shift);
    }

    /// The store's current view of a shift.
    pub async fn shift(&self, shift_id: &ShiftId) -> Option<Shift> {
        self.inner.lock().await.shifts.get(shift_id).cloned()
    }

    /// While offline every call fails as a transport error.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// The next `n` deliveries fail without touching the store.
    pub async fn fail_next_deliveries(&self, n: usize) {
        self.inner.lock().await.fail_deliveries = n;
    }

    /// The next `n` deliveries are applied but report failure, as when the
    /// response is lost in transit.
    pub async fn lose_next_responses(&self, n: usize) {
        self.inner.lock().await.lose_responses = n;
    }

    /// The next `n` fetches fail.
    pub async fn fail_next_fetches(&self, n: usize) {
        self.inner.lock().await.fail_fetches = n;
    }

    /// Operation ids of every delivery attempt, in arrival order.
    pub async fn attempts(&self) -> Vec<OperationId> {
        self.inner.lock().await.attempts.clone()
    }

    /// Operation ids that changed the store, in order.
    pub async fn applied(&self) -> Vec<OperationId> {
        self.inner.lock().await.applied.clone()
    }

    /// Deliveries park on arrival until [`MockRemote::release_deliveries`].
    pub fn hold_deliveries(&self) {
        self.held.send_replace(true);
    }

    pub fn release_deliveries(&self) {
        self.held.send_replace(false);
    }

    /// Resolves once a delivery is parked by [`MockRemote::hold_deliveries`].
    pub async fn delivery_parked(&self) {
        self.arrived.notified().await;
    }

    /// Number of fetch calls received, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), ShiftlogError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ShiftlogError::remote("network unreachable"))
        }
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockRemote {
    fn name(&self) -> &str {
        "mock-remote"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Remote
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy("offline".into()))
        }
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn deliver(&self, operation: &QueuedOperation) -> Result<Shift, ShiftlogError> {
        self.ensure_online()?;
        let mut held = self.held.subscribe();
        let parked = *held.borrow();
        if parked {
            self.arrived.notify_one();
            held.wait_for(|held| !*held)
                .await
                .map_err(|_| ShiftlogError::remote("delivery gate dropped"))?;
        }
        let mut inner = self.inner.lock().await;
        inner.attempts.push(operation.id);

        if inner.fail_deliveries > 0 {
            inner.fail_deliveries -= 1;
            return Err(ShiftlogError::Remote {
                message: "service unavailable".into(),
                status: Some(503),
                source: None,
            });
        }

        let shift = inner
            .shifts
            .get(&operation.shift_id)
            .cloned()
            .ok_or_else(|| ShiftlogError::Remote {
                message: format!("shift {} not found", operation.shift_id),
                status: Some(404),
                source: None,
            })?;

        let shift = if inner.seen.contains(&operation.id) {
            debug!(operation_id = %operation.id, "duplicate delivery ignored");
            shift
        } else {
            let mut updated = shift;
            updated
                .apply_mutation(&operation.mutation)
                .map_err(|e| ShiftlogError::Remote {
                    message: e.to_string(),
                    status: Some(409),
                    source: None,
                })?;
            inner.seen.insert(operation.id);
            inner.applied.push(operation.id);
            inner.shifts.insert(updated.id.clone(), updated.clone());
            updated
        };

        if inner.lose_responses > 0 {
            inner.lose_responses -= 1;
            return Err(ShiftlogError::Timeout {
                duration: std::time::Duration::from_secs(15),
            });
        }
        Ok(shift)
    }

    async fn fetch_shift(&self, shift_id: &ShiftId) -> Result<Shift, ShiftlogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        let mut inner = self.inner.lock().await;
        if inner.fail_fetches > 0 {
            inner.fail_fetches -= 1;
            return Err(ShiftlogError::Remote {
                message: "internal server error".into(),
                status: Some(500),
                source: None,
            });
        }
        inner
            .shifts
            .get(shift_id)
            .cloned()
            .ok_or_else(|| ShiftlogError::Remote {
                message: format!("shift {shift_id} not found"),
                status: Some(404),
                source: None,
            })
    }
}
