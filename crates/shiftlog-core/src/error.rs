// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Shiftlog.

use thiserror::Error;

/// The primary error type used across all Shiftlog adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ShiftlogError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local storage errors (database open, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Remote store errors (network failure, rejected mutation, bad response).
    #[error("remote error: {message}")]
    Remote {
        message: String,
        /// HTTP status returned by the remote, when one was received.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text polishing collaborator errors.
    #[error("polish error: {message}")]
    Polish {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The shift has been completed and no longer accepts entry mutations.
    #[error("shift {shift_id} is completed")]
    ShiftCompleted { shift_id: String },

    /// A mutation addressed an entry that does not exist.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// Another entry of the shift is still in progress.
    #[error("an entry is already in progress for this shift")]
    EntryInProgress,

    /// The entry payload violates a data-model invariant.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShiftlogError {
    /// Shorthand for a remote error without an HTTP status or source.
    pub fn remote(message: impl Into<String>) -> Self {
        ShiftlogError::Remote {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ShiftlogError::Storage {
            source: Box::new(err),
        }
    }
}
