// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Shiftlog.
//!
//! This crate provides the shift and entry data model, queued mutations,
//! error types, and the adapter traits implemented by the storage, remote,
//! and polish crates.

pub mod error;
pub mod model;
pub mod operation;
pub mod traits;
pub mod types;

pub use error::ShiftlogError;
pub use model::{
    Entry, EntryDetails, EntryStatus, EntryType, Shift, ShiftMode, ShiftStatus, TEN_FOUR_SUFFIX,
};
pub use operation::{Mutation, QueuedOperation};
pub use types::{
    AdapterType, Connectivity, EntryId, HealthStatus, OperationId, PolishRequest, QueueState,
    ShiftId, SyncStatus,
};

pub use traits::{LocalStore, PluginAdapter, PolishAdapter, RemoteStore};
