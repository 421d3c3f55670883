// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable FIFO of operations awaiting remote confirmation.
//!
//! Rows are ordered by `seq`; an operation leaves the table only once the
//! remote store has acknowledged it.

use rusqlite::params;
use shiftlog_core::{OperationId, QueuedOperation, ShiftId, ShiftlogError};

use crate::database::Database;

/// Appends an operation to the tail of the queue.
///
/// Enqueueing an operation id that is already queued keeps the original row
/// and its position. Returns the row's sequence number.
pub async fn enqueue(db: &Database, operation: &QueuedOperation) -> Result<i64, ShiftlogError> {
    let operation_id = operation.id.to_string();
    let shift_id = operation.shift_id.0.clone();
    let payload = serde_json::to_string(operation).map_err(ShiftlogError::storage)?;
    let enqueued_at = operation.enqueued_at.to_rfc3339();
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT OR IGNORE INTO operation_queue (operation_id, shift_id, payload, enqueued_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![operation_id, shift_id, payload, enqueued_at],
            )?;
            conn.query_row(
                "SELECT seq FROM operation_queue WHERE operation_id = ?1",
                params![operation_id],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Pending operations for one shift, in enqueue order.
pub async fn pending(
    db: &Database,
    shift_id: &ShiftId,
) -> Result<Vec<QueuedOperation>, ShiftlogError> {
    let shift_id = shift_id.0.clone();
    let payloads = db
        .connection()
        .call(move |conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT payload FROM operation_queue WHERE shift_id = ?1 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(params![shift_id], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    decode_all(payloads)
}

/// Every pending operation across all shifts, in enqueue order.
pub async fn all_pending(db: &Database) -> Result<Vec<QueuedOperation>, ShiftlogError> {
    let payloads = db
        .connection()
        .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT payload FROM operation_queue ORDER BY seq ASC")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    decode_all(payloads)
}

/// Removes a confirmed operation. Returns whether a row was deleted.
pub async fn remove(db: &Database, operation_id: &OperationId) -> Result<bool, ShiftlogError> {
    let operation_id = operation_id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let deleted = conn.execute(
                "DELETE FROM operation_queue WHERE operation_id = ?1",
                params![operation_id],
            )?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of queued operations for a shift.
pub async fn count(db: &Database, shift_id: &ShiftId) -> Result<usize, ShiftlogError> {
    let shift_id = shift_id.0.clone();
    let n = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM operation_queue WHERE shift_id = ?1",
                params![shift_id],
                |row| row.get(0),
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(usize::try_from(n).unwrap_or(0))
}

fn decode_all(payloads: Vec<String>) -> Result<Vec<QueuedOperation>, ShiftlogError> {
    payloads
        .iter()
        .map(|p| serde_json::from_str(p).map_err(ShiftlogError::storage))
        .collect()
}
