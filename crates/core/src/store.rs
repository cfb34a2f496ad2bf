// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed durable queue for offline dispatch/receive intents.
//!
//! The [`QueueStore`] owns two append-mostly tables, one per operation kind.
//! Rows are written once, flipped to `synced` after confirmed remote
//! acceptance, and deleted on the next cleanup pass. Replay order is carried
//! by an explicit `seq` column fed from a persistent counter, so insertion
//! order survives restarts regardless of key assignment.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use std::path::Path;

use crate::error::{Error, Result};
use crate::movement::{DispatchDraft, QueuedDispatch, QueuedReceive, ReceiveDraft};

/// SQL schema for the offline queue database.
pub const SCHEMA: &str = r#"
-- Outgoing dispatch intents
CREATE TABLE IF NOT EXISTS dispatch_queue (
    local_id INTEGER PRIMARY KEY AUTOINCREMENT,
    seq INTEGER NOT NULL,
    payload TEXT NOT NULL,
    queued_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

-- Outgoing receive intents (separate key space)
CREATE TABLE IF NOT EXISTS receive_queue (
    local_id INTEGER PRIMARY KEY AUTOINCREMENT,
    seq INTEGER NOT NULL,
    movement_id TEXT NOT NULL,
    payload TEXT NOT NULL,
    queued_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

-- Monotonic sequence shared by both queues
CREATE TABLE IF NOT EXISTS queue_seq (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    next INTEGER NOT NULL
);
INSERT OR IGNORE INTO queue_seq (id, next) VALUES (1, 1);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_dispatch_pending ON dispatch_queue(synced, seq);
CREATE INDEX IF NOT EXISTS idx_receive_pending ON receive_queue(synced, seq);
"#;

/// Counts of pending (unsynced) rows, per queue table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCounts {
    pub dispatches: usize,
    pub receives: usize,
}

impl PendingCounts {
    /// Total pending rows across both queues.
    pub fn total(&self) -> usize {
        self.dispatches + self.receives
    }
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse a JSON payload column into a draft value.
fn parse_payload<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid payload in column '{column}'"
            ))),
        )
    })
}

/// Durable queue store for offline dispatch and receive operations.
#[derive(Debug)]
pub struct QueueStore {
    /// The underlying SQLite connection.
    conn: Connection,
}

impl QueueStore {
    /// Open the queue store at the given path, creating tables if needed.
    ///
    /// Idempotent. A failure to open or prepare the store surfaces as
    /// [`Error::StorageUnavailable`]; callers should treat that as "offline
    /// submissions cannot be saved" and say so, rather than queue in memory.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        Self::prepare(conn)
    }

    /// Open an in-memory queue store. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        // WAL mode keeps readers unblocked during enqueue bursts
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        Ok(QueueStore { conn })
    }

    /// Claim the next value from the shared monotonic sequence.
    fn next_seq(tx: &Transaction<'_>) -> Result<i64> {
        let seq: i64 = tx.query_row("SELECT next FROM queue_seq WHERE id = 1", [], |row| {
            row.get(0)
        })?;
        tx.execute("UPDATE queue_seq SET next = next + 1 WHERE id = 1", [])?;
        Ok(seq)
    }

    /// Persist a dispatch intent with `synced = false`.
    ///
    /// Returns the store-assigned local id. Errors always propagate; a
    /// swallowed enqueue failure would silently lose the user's submission.
    pub fn enqueue_dispatch(&mut self, payload: &DispatchDraft) -> Result<i64> {
        let json = serde_json::to_string(payload)?;
        let queued_at = Utc::now();

        let tx = self.conn.transaction()?;
        let seq = Self::next_seq(&tx)?;
        tx.execute(
            "INSERT INTO dispatch_queue (seq, payload, queued_at, synced)
             VALUES (?1, ?2, ?3, 0)",
            params![seq, json, queued_at.to_rfc3339()],
        )?;
        let local_id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(local_id)
    }

    /// Persist a receive intent with `synced = false`.
    ///
    /// `movement_id` is the remote identifier of the movement being marked
    /// received; it must already exist server-side by the time this row is
    /// replayed, or the replay fails per-item and retries later.
    pub fn enqueue_receive(&mut self, movement_id: &str, payload: &ReceiveDraft) -> Result<i64> {
        let json = serde_json::to_string(payload)?;
        let queued_at = Utc::now();

        let tx = self.conn.transaction()?;
        let seq = Self::next_seq(&tx)?;
        tx.execute(
            "INSERT INTO receive_queue (seq, movement_id, payload, queued_at, synced)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![seq, movement_id, json, queued_at.to_rfc3339()],
        )?;
        let local_id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(local_id)
    }

    /// All unsynced dispatch rows, in enqueue order.
    pub fn list_pending_dispatches(&self) -> Result<Vec<QueuedDispatch>> {
        let mut stmt = self.conn.prepare(
            "SELECT local_id, seq, payload, queued_at, synced
             FROM dispatch_queue WHERE synced = 0 ORDER BY seq",
        )?;
        let rows = stmt.query_map([], |row| {
            let payload: String = row.get(2)?;
            let queued_at: String = row.get(3)?;
            Ok(QueuedDispatch {
                local_id: row.get(0)?,
                seq: row.get(1)?,
                payload: parse_payload(&payload, "dispatch_queue.payload")?,
                queued_at: parse_timestamp(&queued_at, "dispatch_queue.queued_at")?,
                synced: row.get::<_, i64>(4)? != 0,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// All unsynced receive rows, in enqueue order.
    pub fn list_pending_receives(&self) -> Result<Vec<QueuedReceive>> {
        let mut stmt = self.conn.prepare(
            "SELECT local_id, seq, movement_id, payload, queued_at, synced
             FROM receive_queue WHERE synced = 0 ORDER BY seq",
        )?;
        let rows = stmt.query_map([], |row| {
            let payload: String = row.get(3)?;
            let queued_at: String = row.get(4)?;
            Ok(QueuedReceive {
                local_id: row.get(0)?,
                seq: row.get(1)?,
                movement_id: row.get(2)?,
                payload: parse_payload(&payload, "receive_queue.payload")?,
                queued_at: parse_timestamp(&queued_at, "receive_queue.queued_at")?,
                synced: row.get::<_, i64>(5)? != 0,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Flip `synced` for one dispatch row. A missing row is a no-op.
    pub fn mark_dispatch_synced(&mut self, local_id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE dispatch_queue SET synced = 1 WHERE local_id = ?1",
            [local_id],
        )?;
        Ok(())
    }

    /// Flip `synced` for one receive row. A missing row is a no-op.
    pub fn mark_receive_synced(&mut self, local_id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE receive_queue SET synced = 1 WHERE local_id = ?1",
            [local_id],
        )?;
        Ok(())
    }

    /// Delete all synced rows from both tables in one transaction.
    ///
    /// Returns the number of rows deleted. Queue correctness depends only on
    /// eventual cleanup, so callers may log-and-continue on failure.
    pub fn clear_synced(&mut self) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let dispatches = tx.execute("DELETE FROM dispatch_queue WHERE synced = 1", [])?;
        let receives = tx.execute("DELETE FROM receive_queue WHERE synced = 1", [])?;
        tx.commit()?;
        Ok(dispatches + receives)
    }

    /// Count pending rows per table, for UI badges.
    pub fn pending_counts(&self) -> Result<PendingCounts> {
        let dispatches: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM dispatch_queue WHERE synced = 0",
            [],
            |row| row.get(0),
        )?;
        let receives: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM receive_queue WHERE synced = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(PendingCounts {
            dispatches: dispatches as usize,
            receives: receives as usize,
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
