// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Last-known shift documents.

use rusqlite::{OptionalExtension, params};
use shiftlog_core::{Shift, ShiftId, ShiftlogError};

use crate::database::Database;

/// Inserts or replaces the snapshot for `shift.id`.
pub async fn save(db: &Database, shift: &Shift) -> Result<(), ShiftlogError> {
    let shift_id = shift.id.0.clone();
    let document = serde_json::to_string(shift).map_err(ShiftlogError::storage)?;
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO shift_snapshots (shift_id, document, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(shift_id) DO UPDATE SET
                    document = excluded.document,
                    updated_at = excluded.updated_at",
                params![shift_id, document],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Loads the snapshot for a shift, if one was saved.
pub async fn load(db: &Database, shift_id: &ShiftId) -> Result<Option<Shift>, ShiftlogError> {
    let id = shift_id.0.clone();
    let document = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            conn.query_row(
                "SELECT document FROM shift_snapshots WHERE shift_id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    document
        .map(|doc| serde_json::from_str(&doc).map_err(ShiftlogError::storage))
        .transpose()
}

/// Ids of every shift with a stored snapshot, most recently updated first.
pub async fn list_ids(db: &Database) -> Result<Vec<ShiftId>, ShiftlogError> {
    db.connection()
        .call(|conn| -> Result<Vec<ShiftId>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT shift_id FROM shift_snapshots ORDER BY updated_at DESC, shift_id",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0).map(ShiftId))?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftlog_core::{Entry, EntryDetails, EntryStatus, ShiftMode};

    fn sample_shift(id: &str) -> Shift {
        let mut shift = Shift::new(id, "owner", "2026-10-18", "18:00–06:00", "M/S", ShiftMode::SitePatrol);
        shift.entries.push(Entry::new(
            "18:05",
            EntryStatus::InService,
            EntryDetails::SitePatrol {
                site: "Dock 4".into(),
            },
            "18:05 10-8 at Dock 4 — All secure.",
        ));
        shift
    }

    #[tokio::test]
    async fn save_then_load_returns_same_document() {
        let db = Database::open_in_memory().await.unwrap();
        let shift = sample_shift("s-1");
        save(&db, &shift).await.unwrap();
        let loaded = load(&db, &shift.id).await.unwrap().unwrap();
        assert_eq!(loaded, shift);
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let db = Database::open_in_memory().await.unwrap();
        let mut shift = sample_shift("s-1");
        save(&db, &shift).await.unwrap();
        shift.entries.clear();
        save(&db, &shift).await.unwrap();
        let loaded = load(&db, &shift.id).await.unwrap().unwrap();
        assert!(loaded.entries.is_empty());
        assert_eq!(list_ids(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn load_unknown_shift_is_none() {
        let db = Database::open_in_memory().await.unwrap();
        let loaded = load(&db, &ShiftId("nope".into())).await.unwrap();
        assert!(loaded.is_none());
    }
}
