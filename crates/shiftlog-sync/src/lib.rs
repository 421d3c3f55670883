// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline-first synchronisation of a shift with the remote store.
//!
//! [`SyncEngine`] applies every mutation to the local shift at once, writes
//! it to durable local storage, and delivers queued operations to the remote
//! store strictly in order. [`watch_connectivity`] drives flushes from a
//! connectivity signal.

pub mod driver;
pub mod engine;

pub use driver::watch_connectivity;
pub use engine::{Delivery, FlushReport, SyncEngine};
