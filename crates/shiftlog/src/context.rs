// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter wiring shared by the subcommands.

use std::sync::Arc;
use std::time::Duration;

use shiftlog_composer::Composer;
use shiftlog_config::model::ShiftlogConfig;
use shiftlog_core::{Connectivity, HealthStatus, PluginAdapter, ShiftId, ShiftlogError};
use shiftlog_openai::OpenAiPolisher;
use shiftlog_remote::HttpRemote;
use shiftlog_storage::SqliteStore;
use shiftlog_sync::SyncEngine;
use tracing::{debug, info};

/// Opens (and migrates) the local queue database.
pub async fn open_store(config: &ShiftlogConfig) -> Result<Arc<SqliteStore>, ShiftlogError> {
    if let Some(parent) = std::path::Path::new(&config.storage.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(ShiftlogError::storage)?;
        }
    }
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    Ok(Arc::new(store))
}

/// Builds the composer, using the chat-completions collaborator when one is
/// configured and local formatting otherwise.
pub fn build_composer(config: &ShiftlogConfig) -> Composer {
    let composer = match OpenAiPolisher::from_config(&config.polish) {
        Some(polisher) => Composer::new(Arc::new(polisher)),
        None => Composer::local_only(),
    };
    composer
        .with_timeout(Duration::from_secs(config.polish.timeout_secs))
        .with_max_chars(config.polish.max_chars)
}

/// Asks the remote store whether it is reachable.
pub async fn probe(remote: &HttpRemote) -> Connectivity {
    match remote.health_check().await {
        Ok(HealthStatus::Healthy) => Connectivity::Online,
        Ok(status) => {
            debug!(?status, "remote store not healthy, working offline");
            Connectivity::Offline
        }
        Err(e) => {
            debug!(error = %e, "health check failed, working offline");
            Connectivity::Offline
        }
    }
}

/// Restores a shift's sync engine with live adapters.
///
/// When the remote store is reachable and `sync.flush_on_start` is set, the
/// queue is flushed before the engine is handed back.
pub async fn open_engine(
    config: &ShiftlogConfig,
    shift_id: &str,
) -> Result<SyncEngine, ShiftlogError> {
    let store = open_store(config).await?;
    let remote = Arc::new(HttpRemote::new(&config.remote)?);
    let connectivity = probe(&remote).await;
    info!(%connectivity, shift_id, "opening shift");

    let mut engine =
        SyncEngine::open(&ShiftId(shift_id.to_string()), store, remote, connectivity).await?;
    if config.sync.flush_on_start && connectivity == Connectivity::Online {
        let report = engine.flush().await?;
        debug!(
            delivered = report.delivered,
            remaining = report.remaining,
            "flushed on open"
        );
    }
    Ok(engine)
}
