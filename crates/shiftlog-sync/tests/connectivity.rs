// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The connectivity watcher drives flushes on reconnect.

use std::sync::Arc;
use std::time::Duration;

use shiftlog_core::{Connectivity, Mutation};
use shiftlog_sync::{SyncEngine, watch_connectivity};
use shiftlog_test_utils::fixtures::{finished_entry, patrol_shift};
use shiftlog_test_utils::{MemoryStore, MockRemote};
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn reconnect_signal_flushes_the_queue() {
    let shift = patrol_shift("s-watch");
    let remote = Arc::new(MockRemote::new());
    remote.insert_shift(shift.clone()).await;
    let engine = SyncEngine::start(
        shift.clone(),
        Arc::new(MemoryStore::new()),
        remote.clone(),
        Connectivity::Online,
    )
    .await
    .unwrap();
    let mut status = engine.subscribe();
    let engine = Arc::new(Mutex::new(engine));

    let (signal_tx, signal_rx) = watch::channel(Connectivity::Offline);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(watch_connectivity(
        engine.clone(),
        signal_rx,
        cancel.clone(),
    ));

    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|s| s.connectivity == Connectivity::Offline),
    )
    .await
    .unwrap()
    .unwrap();

    for site in ["Lobby A", "Dock 4"] {
        engine
            .lock()
            .await
            .apply(Mutation::Append {
                entry: finished_entry(site),
            })
            .await
            .unwrap();
    }
    assert_eq!(engine.lock().await.pending_operations().len(), 2);
    assert!(remote.attempts().await.is_empty());

    signal_tx.send(Connectivity::Online).unwrap();
    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|s| s.connectivity == Connectivity::Online && s.pending == 0),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(remote.applied().await.len(), 2);
    assert_eq!(remote.shift(&shift.id).await.unwrap().entries.len(), 2);

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn shift_stays_readable_while_a_slow_flush_holds_the_engine() {
    let shift = patrol_shift("s-slow");
    let remote = Arc::new(MockRemote::new());
    remote.insert_shift(shift.clone()).await;
    let mut engine = SyncEngine::start(
        shift,
        Arc::new(MemoryStore::new()),
        remote.clone(),
        Connectivity::Offline,
    )
    .await
    .unwrap();
    let mut status = engine.subscribe();
    let mut shift_rx = engine.subscribe_shift();

    engine
        .apply(Mutation::Append {
            entry: finished_entry("Lobby A"),
        })
        .await
        .unwrap();
    assert!(shift_rx.has_changed().unwrap());
    assert_eq!(shift_rx.borrow_and_update().entries.len(), 1);
    let engine = Arc::new(Mutex::new(engine));

    remote.hold_deliveries();
    let (signal_tx, signal_rx) = watch::channel(Connectivity::Offline);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(watch_connectivity(
        engine.clone(),
        signal_rx,
        cancel.clone(),
    ));
    signal_tx.send(Connectivity::Online).unwrap();

    tokio::time::timeout(Duration::from_secs(5), remote.delivery_parked())
        .await
        .unwrap();
    assert!(engine.try_lock().is_err());
    assert_eq!(shift_rx.borrow().entries[0].site, "Lobby A");

    remote.release_deliveries();
    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|s| s.connectivity == Connectivity::Online && s.pending == 0),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(shift_rx.borrow().entries.len(), 1);

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn watcher_stops_when_signal_is_dropped() {
    let shift = patrol_shift("s-drop");
    let remote = Arc::new(MockRemote::new());
    remote.insert_shift(shift.clone()).await;
    let engine = SyncEngine::start(
        shift,
        Arc::new(MemoryStore::new()),
        remote,
        Connectivity::Online,
    )
    .await
    .unwrap();

    let (signal_tx, signal_rx) = watch::channel(Connectivity::Online);
    let watcher = tokio::spawn(watch_connectivity(
        Arc::new(Mutex::new(engine)),
        signal_rx,
        CancellationToken::new(),
    ));
    drop(signal_tx);
    tokio::time::timeout(Duration::from_secs(5), watcher)
        .await
        .unwrap()
        .unwrap();
}
