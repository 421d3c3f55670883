// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mutation queue and its delivery loop.

use std::collections::VecDeque;
use std::sync::Arc;

use shiftlog_core::{
    Connectivity, Entry, LocalStore, Mutation, QueuedOperation, RemoteStore, Shift, ShiftId,
    ShiftlogError, SyncStatus,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What happened to a mutation right after it was applied locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The remote store acknowledged it.
    Confirmed,
    /// It waits in the durable queue for the next flush.
    Queued,
}

/// Outcome of one flush pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    pub delivered: usize,
    pub remaining: usize,
    /// Local state was replaced by the remote document.
    pub reconciled: bool,
}

/// Single owner of one shift's local state and pending operations.
///
/// Methods take `&mut self`, so flushes never overlap. Share it across
/// triggers as `Arc<tokio::sync::Mutex<SyncEngine>>`. A flush holds that
/// lock across remote round trips, so readers should follow
/// [`SyncEngine::subscribe_shift`] rather than lock the engine.
pub struct SyncEngine {
    shift: Shift,
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    connectivity: Connectivity,
    queue: VecDeque<QueuedOperation>,
    needs_reconcile: bool,
    status_tx: watch::Sender<SyncStatus>,
    shift_tx: watch::Sender<Shift>,
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("shift_id", &self.shift.id)
            .field("connectivity", &self.connectivity)
            .field("pending", &self.queue.len())
            .field("local", &self.local.name())
            .field("remote", &self.remote.name())
            .finish()
    }
}

impl SyncEngine {
    /// Takes over a freshly created or loaded shift and seeds local storage
    /// with it. Operations already queued for the shift are kept.
    pub async fn start(
        shift: Shift,
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        connectivity: Connectivity,
    ) -> Result<Self, ShiftlogError> {
        local.save_snapshot(&shift).await?;
        let queue: VecDeque<_> = local.pending(&shift.id).await?.into();
        info!(shift_id = %shift.id, pending = queue.len(), "sync engine started");
        Ok(Self::assemble(shift, local, remote, connectivity, queue))
    }

    /// Restores a shift from local storage, fetching it from the remote
    /// store only when no snapshot exists.
    pub async fn open(
        shift_id: &ShiftId,
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        connectivity: Connectivity,
    ) -> Result<Self, ShiftlogError> {
        let queue: VecDeque<_> = local.pending(shift_id).await?.into();
        let shift = match local.load_snapshot(shift_id).await? {
            Some(shift) => shift,
            None => {
                debug!(shift_id = %shift_id, "no local snapshot, fetching shift");
                let mut shift = remote.fetch_shift(shift_id).await?;
                for op in &queue {
                    if let Err(e) = shift.apply_mutation(&op.mutation) {
                        warn!(operation_id = %op.id, error = %e, "queued operation does not apply to fetched shift");
                    }
                }
                local.save_snapshot(&shift).await?;
                shift
            }
        };
        info!(shift_id = %shift_id, pending = queue.len(), "sync engine restored");
        Ok(Self::assemble(shift, local, remote, connectivity, queue))
    }

    fn assemble(
        shift: Shift,
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        connectivity: Connectivity,
        queue: VecDeque<QueuedOperation>,
    ) -> Self {
        let (status_tx, _) = watch::channel(SyncStatus::new(connectivity, queue.len()));
        let (shift_tx, _) = watch::channel(shift.clone());
        Self {
            shift,
            local,
            remote,
            connectivity,
            queue,
            needs_reconcile: false,
            status_tx,
            shift_tx,
        }
    }

    /// The local (optimistic) view of the shift.
    pub fn shift(&self) -> &Shift {
        &self.shift
    }

    pub fn status(&self) -> SyncStatus {
        *self.status_tx.borrow()
    }

    /// Receives every status change.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status_tx.subscribe()
    }

    /// Receives the local shift after every change, without the engine lock.
    pub fn subscribe_shift(&self) -> watch::Receiver<Shift> {
        self.shift_tx.subscribe()
    }

    /// Operations not yet acknowledged, oldest first.
    pub fn pending_operations(&self) -> &VecDeque<QueuedOperation> {
        &self.queue
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Applies a mutation locally, persists it, and tries to deliver it.
    ///
    /// Fails only when the mutation is invalid for the current shift or
    /// local storage fails. A failed delivery is not an error: the operation
    /// stays queued and [`Delivery::Queued`] is returned.
    pub async fn apply(&mut self, mutation: Mutation) -> Result<Delivery, ShiftlogError> {
        let mut next = self.shift.clone();
        next.apply_mutation(&mutation)?;

        let mutation = self.reindexed(mutation);
        let op = QueuedOperation::new(self.shift.id.clone(), mutation);
        self.local.enqueue(&op).await?;
        // From here on the operation is durable and will be delivered even
        // if the snapshot write below fails.
        self.set_shift(next);
        self.queue.push_back(op);
        self.publish();
        self.local.save_snapshot(&self.shift).await?;

        debug!(
            shift_id = %self.shift.id,
            kind = self.queue.back().map(|op| op.mutation.kind()).unwrap_or("?"),
            pending = self.queue.len(),
            "mutation applied locally"
        );

        if self.connectivity == Connectivity::Offline {
            return Ok(Delivery::Queued);
        }
        if self.queue.len() == 1 {
            return self.deliver_single().await;
        }
        let report = self.flush().await?;
        Ok(if report.remaining == 0 {
            Delivery::Confirmed
        } else {
            Delivery::Queued
        })
    }

    /// Delivers the only queued operation and adopts the document the store
    /// returns.
    async fn deliver_single(&mut self) -> Result<Delivery, ShiftlogError> {
        let Some(op) = self.queue.front().cloned() else {
            return Ok(Delivery::Confirmed);
        };
        match self.remote.deliver(&op).await {
            Ok(confirmed) => {
                self.confirm(&op).await?;
                self.adopt(confirmed).await?;
                Ok(Delivery::Confirmed)
            }
            Err(e) => {
                warn!(operation_id = %op.id, error = %e, "delivery failed, operation queued");
                self.publish();
                Ok(Delivery::Queued)
            }
        }
    }

    /// Delivers queued operations in order, one at a time.
    ///
    /// Stops at the first failure, leaving that operation and everything
    /// after it queued in their original order. Once the queue is empty the
    /// authoritative shift is fetched and replaces the local one; a failed
    /// fetch is retried after the next flush.
    pub async fn flush(&mut self) -> Result<FlushReport, ShiftlogError> {
        let mut report = FlushReport::default();
        if self.connectivity == Connectivity::Offline {
            report.remaining = self.queue.len();
            return Ok(report);
        }

        while let Some(op) = self.queue.front().cloned() {
            match self.remote.deliver(&op).await {
                Ok(_) => {
                    self.confirm(&op).await?;
                    report.delivered += 1;
                }
                Err(e) => {
                    warn!(
                        operation_id = %op.id,
                        remaining = self.queue.len(),
                        error = %e,
                        "flush stopped at failed delivery"
                    );
                    report.remaining = self.queue.len();
                    return Ok(report);
                }
            }
        }

        if report.delivered > 0 || self.needs_reconcile {
            report.reconciled = self.reconcile().await?;
        }
        if report.delivered > 0 {
            info!(shift_id = %self.shift.id, delivered = report.delivered, "queue flushed");
        }
        Ok(report)
    }

    /// Records a connectivity change. Going from offline to online flushes
    /// the queue.
    pub async fn set_connectivity(
        &mut self,
        connectivity: Connectivity,
    ) -> Result<Option<FlushReport>, ShiftlogError> {
        let previous = self.connectivity;
        self.connectivity = connectivity;
        self.publish();
        if previous == connectivity {
            return Ok(None);
        }
        info!(from = %previous, to = %connectivity, "connectivity changed");
        if connectivity == Connectivity::Online {
            return self.flush().await.map(Some);
        }
        Ok(None)
    }

    /// Sets or clears the acknowledgement marker on the entry at `index`.
    pub async fn toggle_ten_four(
        &mut self,
        index: usize,
        on: bool,
    ) -> Result<Delivery, ShiftlogError> {
        let mut entry = self.entry_at(index)?.clone();
        entry.set_ten_four(on);
        self.apply(Mutation::Update { index, entry }).await
    }

    /// Rewrites the time and narrative of the entry at `index`.
    pub async fn edit_entry(
        &mut self,
        index: usize,
        time: &str,
        body: &str,
    ) -> Result<Delivery, ShiftlogError> {
        let mut entry = self.entry_at(index)?.clone();
        entry.edit(time, body)?;
        self.apply(Mutation::Update { index, entry }).await
    }

    pub async fn delete_entry(&mut self, index: usize) -> Result<Delivery, ShiftlogError> {
        let entry_id = self.entry_at(index)?.id;
        self.apply(Mutation::Delete { index, entry_id }).await
    }

    /// Ends the shift. Refused while an entry is in progress.
    pub async fn complete_shift(
        &mut self,
        summary: impl Into<String>,
    ) -> Result<Delivery, ShiftlogError> {
        self.apply(Mutation::Complete {
            summary: summary.into(),
        })
        .await
    }

    /// Points an update or delete at the entry's position in the current
    /// shift. Operations are delivered in order, so this is the position the
    /// remote store holds when the operation reaches it.
    fn reindexed(&self, mutation: Mutation) -> Mutation {
        let current = |stale: usize, id| {
            let index = self.shift.position_of(id).unwrap_or(stale);
            if index != stale {
                debug!(entry_id = %id, stale, index, "entry index refreshed");
            }
            index
        };
        match mutation {
            Mutation::Update { index, entry } => Mutation::Update {
                index: current(index, entry.id),
                entry,
            },
            Mutation::Delete { index, entry_id } => Mutation::Delete {
                index: current(index, entry_id),
                entry_id,
            },
            other => other,
        }
    }

    fn set_shift(&mut self, shift: Shift) {
        self.shift = shift;
        self.shift_tx.send_replace(self.shift.clone());
    }

    fn entry_at(&self, index: usize) -> Result<&Entry, ShiftlogError> {
        self.shift
            .entries
            .get(index)
            .ok_or_else(|| ShiftlogError::EntryNotFound(format!("index {index}")))
    }

    /// Drops an acknowledged operation from both queues.
    async fn confirm(&mut self, op: &QueuedOperation) -> Result<(), ShiftlogError> {
        self.local.remove(&op.id).await?;
        if self.queue.front().is_some_and(|front| front.id == op.id) {
            self.queue.pop_front();
        }
        debug!(operation_id = %op.id, "operation confirmed");
        self.publish();
        Ok(())
    }

    async fn reconcile(&mut self) -> Result<bool, ShiftlogError> {
        match self.remote.fetch_shift(&self.shift.id).await {
            Ok(shift) => {
                self.adopt(shift).await?;
                debug!(shift_id = %self.shift.id, "local shift reconciled");
                Ok(true)
            }
            Err(e) => {
                warn!(shift_id = %self.shift.id, error = %e, "reconciliation fetch failed, keeping local state");
                self.needs_reconcile = true;
                Ok(false)
            }
        }
    }

    async fn adopt(&mut self, shift: Shift) -> Result<(), ShiftlogError> {
        if shift.id != self.shift.id {
            return Err(ShiftlogError::remote(format!(
                "remote returned shift {} for {}",
                shift.id, self.shift.id
            )));
        }
        self.set_shift(shift);
        self.needs_reconcile = false;
        self.local.save_snapshot(&self.shift).await
    }

    fn publish(&self) {
        let status = SyncStatus::new(self.connectivity, self.queue.len());
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftlog_test_utils::fixtures::{finished_entry, patrol_shift};
    use shiftlog_test_utils::{MemoryStore, MockRemote};
    use tracing_test::traced_test;

    async fn engine(connectivity: Connectivity) -> (SyncEngine, Arc<MockRemote>) {
        let shift = patrol_shift("u-1");
        let remote = Arc::new(MockRemote::new());
        remote.insert_shift(shift.clone()).await;
        let engine = SyncEngine::start(
            shift,
            Arc::new(MemoryStore::new()),
            remote.clone(),
            connectivity,
        )
        .await
        .unwrap();
        (engine, remote)
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_delivery_is_logged_and_queued() {
        let (mut engine, remote) = engine(Connectivity::Online).await;
        remote.set_online(false);
        let delivery = engine
            .apply(Mutation::Append {
                entry: finished_entry("A"),
            })
            .await
            .unwrap();
        assert_eq!(delivery, Delivery::Queued);
        assert_eq!(engine.status().label(), "Queued");
        assert!(logs_contain("delivery failed, operation queued"));
    }

    #[tokio::test]
    async fn flush_while_offline_makes_no_attempt() {
        let (mut engine, remote) = engine(Connectivity::Offline).await;
        engine
            .apply(Mutation::Append {
                entry: finished_entry("A"),
            })
            .await
            .unwrap();
        let report = engine.flush().await.unwrap();
        assert_eq!(
            report,
            FlushReport {
                delivered: 0,
                remaining: 1,
                reconciled: false
            }
        );
        assert!(remote.attempts().await.is_empty());
    }

    #[tokio::test]
    async fn adopting_a_foreign_shift_is_refused() {
        let (mut engine, _) = engine(Connectivity::Online).await;
        let err = engine.adopt(patrol_shift("other")).await.unwrap_err();
        assert!(matches!(err, ShiftlogError::Remote { .. }));
        assert_eq!(engine.shift().id, ShiftId("u-1".into()));
    }

    #[test]
    fn debug_output_names_collaborators() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (engine, _) = rt.block_on(engine(Connectivity::Offline));
        let debug = format!("{engine:?}");
        assert!(debug.contains("memory"));
        assert!(debug.contains("mock-remote"));
    }
}
