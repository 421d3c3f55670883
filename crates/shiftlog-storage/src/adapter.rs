// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the LocalStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use shiftlog_config::model::StorageConfig;
use shiftlog_core::{
    AdapterType, HealthStatus, LocalStore, OperationId, PluginAdapter, QueuedOperation, Shift,
    ShiftId, ShiftlogError,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed local store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules. The
/// database is lazily opened by [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Wraps an already-open database.
    pub fn from_database(config: StorageConfig, db: Database) -> Self {
        Self {
            config,
            db: OnceCell::new_with(Some(db)),
        }
    }

    /// Opens the database at the configured path and runs migrations.
    pub async fn initialize(&self) -> Result<(), ShiftlogError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ShiftlogError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Returns the underlying Database, or an error if not initialized.
    pub fn database(&self) -> Result<&Database, ShiftlogError> {
        self.db.get().ok_or_else(|| ShiftlogError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Every queued operation across all shifts, oldest first.
    pub async fn all_pending(&self) -> Result<Vec<QueuedOperation>, ShiftlogError> {
        queries::queue::all_pending(self.database()?).await
    }

    /// Ids of every shift with a local snapshot.
    pub async fn shift_ids(&self) -> Result<Vec<ShiftId>, ShiftlogError> {
        queries::snapshots::list_ids(self.database()?).await
    }

    /// Checkpoints the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), ShiftlogError> {
        self.database()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftlogError> {
        let db = self.database()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn save_snapshot(&self, shift: &Shift) -> Result<(), ShiftlogError> {
        queries::snapshots::save(self.database()?, shift).await
    }

    async fn load_snapshot(&self, shift_id: &ShiftId) -> Result<Option<Shift>, ShiftlogError> {
        queries::snapshots::load(self.database()?, shift_id).await
    }

    async fn enqueue(&self, operation: &QueuedOperation) -> Result<(), ShiftlogError> {
        let seq = queries::queue::enqueue(self.database()?, operation).await?;
        debug!(
            operation_id = %operation.id,
            shift_id = %operation.shift_id,
            kind = operation.mutation.kind(),
            seq,
            "operation queued"
        );
        Ok(())
    }

    async fn pending(&self, shift_id: &ShiftId) -> Result<Vec<QueuedOperation>, ShiftlogError> {
        queries::queue::pending(self.database()?, shift_id).await
    }

    async fn remove(&self, operation_id: &OperationId) -> Result<(), ShiftlogError> {
        let removed = queries::queue::remove(self.database()?, operation_id).await?;
        debug!(%operation_id, removed, "operation removed from queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftlog_core::{Mutation, ShiftMode};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn sqlite_store_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        assert!(store.initialize().await.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_requires_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn snapshot_and_queue_through_trait_object() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("trait.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        let local: &dyn LocalStore = &store;

        let shift = Shift::new("s-9", "owner", "2026-10-18", "06:00–14:00", "S/G", ShiftMode::Interchange);
        local.save_snapshot(&shift).await.unwrap();
        assert_eq!(local.load_snapshot(&shift.id).await.unwrap(), Some(shift.clone()));

        let op = QueuedOperation::new(
            shift.id.clone(),
            Mutation::Complete {
                summary: "Quiet.".into(),
            },
        );
        local.enqueue(&op).await.unwrap();
        assert_eq!(local.pending(&shift.id).await.unwrap().len(), 1);
        local.remove(&op.id).await.unwrap();
        local.remove(&op.id).await.unwrap();
        assert!(local.pending(&shift.id).await.unwrap().is_empty());

        store.checkpoint().await.unwrap();
    }
}
