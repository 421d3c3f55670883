// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shiftlog integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without a network or a real remote store.
//!
//! # Components
//!
//! - [`MockRemote`] - In-memory remote store with connectivity and failure injection
//! - [`MemoryStore`] - Non-durable [`LocalStore`](shiftlog_core::LocalStore)
//! - [`MockPolisher`] - Scripted text-polish collaborator
//! - [`TestHarness`] - Temp SQLite store plus mocks, with restart simulation

pub mod fixtures;
pub mod harness;
pub mod memory_store;
pub mod mock_polisher;
pub mod mock_remote;

pub use harness::TestHarness;
pub use memory_store::MemoryStore;
pub use mock_polisher::MockPolisher;
pub use mock_remote::MockRemote;
