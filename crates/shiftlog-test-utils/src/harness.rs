// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` owns a temp SQLite database, a [`MockRemote`] and a
//! [`MockPolisher`]. [`TestHarness::reopen_store`] opens a fresh store on the
//! same file to simulate a process restart.

use std::path::PathBuf;
use std::sync::Arc;

use shiftlog_config::model::StorageConfig;
use shiftlog_core::{Shift, ShiftlogError};
use shiftlog_storage::SqliteStore;

use crate::mock_polisher::MockPolisher;
use crate::mock_remote::MockRemote;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    shifts: Vec<Shift>,
    online: bool,
    replies: Vec<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            shifts: Vec::new(),
            online: true,
            replies: Vec::new(),
        }
    }

    /// Seed the mock remote with a shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Start with the remote unreachable.
    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    /// Script polisher replies.
    pub fn with_polish_replies(mut self, replies: Vec<String>) -> Self {
        self.replies = replies;
        self
    }

    /// Build the test harness, creating the temp database.
    pub async fn build(self) -> Result<TestHarness, ShiftlogError> {
        let temp_dir = tempfile::TempDir::new().map_err(ShiftlogError::storage)?;
        let db_path = temp_dir.path().join("shiftlog-test.db");

        let store = Arc::new(open_store(&db_path).await?);

        let remote = Arc::new(MockRemote::new());
        for shift in self.shifts {
            remote.insert_shift(shift).await;
        }
        remote.set_online(self.online);

        let polisher = Arc::new(MockPolisher::new());
        for reply in &self.replies {
            polisher.push_reply(reply).await;
        }

        Ok(TestHarness {
            store,
            remote,
            polisher,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

async fn open_store(path: &std::path::Path) -> Result<SqliteStore, ShiftlogError> {
    let store = SqliteStore::new(StorageConfig {
        database_path: path.display().to_string(),
        wal_mode: true,
    });
    store.initialize().await?;
    Ok(store)
}

/// A temp SQLite store plus mock collaborators.
pub struct TestHarness {
    pub store: Arc<SqliteStore>,
    pub remote: Arc<MockRemote>,
    pub polisher: Arc<MockPolisher>,
    pub db_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Opens a second store on the same database file, as a restarted
    /// process would.
    pub async fn reopen_store(&self) -> Result<Arc<SqliteStore>, ShiftlogError> {
        Ok(Arc::new(open_store(&self.db_path).await?))
    }
}
