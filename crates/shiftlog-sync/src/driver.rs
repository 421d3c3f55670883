// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background task feeding a connectivity signal into a [`SyncEngine`].

use std::sync::Arc;

use shiftlog_core::Connectivity;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::SyncEngine;

/// Forwards connectivity changes to `engine` until `cancel` fires or the
/// signal's sender is dropped.
///
/// The current value is applied first, so an engine created offline flushes
/// as soon as the signal already reads online.
pub async fn watch_connectivity(
    engine: Arc<Mutex<SyncEngine>>,
    mut signal: watch::Receiver<Connectivity>,
    cancel: CancellationToken,
) {
    let initial = *signal.borrow_and_update();
    forward(&engine, initial).await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("connectivity watcher cancelled");
                break;
            }
            changed = signal.changed() => {
                if changed.is_err() {
                    info!("connectivity signal closed, stopping watcher");
                    break;
                }
                let connectivity = *signal.borrow_and_update();
                forward(&engine, connectivity).await;
            }
        }
    }
}

async fn forward(engine: &Mutex<SyncEngine>, connectivity: Connectivity) {
    let mut engine = engine.lock().await;
    match engine.set_connectivity(connectivity).await {
        Ok(Some(report)) => debug!(
            delivered = report.delivered,
            remaining = report.remaining,
            "flush after reconnect"
        ),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "flush after reconnect failed"),
    }
}
