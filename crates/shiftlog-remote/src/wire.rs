// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and error bodies exchanged with the remote shift store.

use serde::{Deserialize, Serialize};

use shiftlog_core::{Entry, OperationId};

/// Body of `POST /shifts/{id}/entries`, used for both appends and in-place
/// updates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMutationBody<'a> {
    pub entry: &'a Entry,
    pub is_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_index: Option<usize>,
    pub operation_id: OperationId,
}

/// Body of `POST /shifts/{id}/end`.
#[derive(Debug, Clone, Serialize)]
pub struct EndShiftBody<'a> {
    pub summary: &'a str,
}

/// Error payload returned by the store on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "message")]
    pub error: String,
}
