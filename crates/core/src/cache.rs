// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read cache for last-known remote data.
//!
//! Two flat JSON blobs (`cached-movements.json`, `cached-staff.json`) and a
//! scalar timestamp file, each overwritten wholesale on every successful full
//! remote load. The cache is only for rendering views while offline; it is
//! never consulted on the write path and never touches the queue tables.

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::movement::{Movement, Staff};

/// The last cached snapshot, with explicit `None`s when a blob was never
/// written (or cannot be read back).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedSnapshot {
    pub movements: Option<Vec<Movement>>,
    pub staff: Option<Vec<Staff>>,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Flat-file read cache, one blob per record kind.
pub struct ReadCache {
    dir: PathBuf,
}

impl ReadCache {
    /// Filename for the cached movement list.
    pub const MOVEMENTS_FILE: &'static str = "cached-movements.json";

    /// Filename for the cached staff list.
    pub const STAFF_FILE: &'static str = "cached-staff.json";

    /// Filename for the last successful sync timestamp.
    pub const LAST_SYNC_FILE: &'static str = "last-sync-timestamp";

    /// Open a read cache rooted at the given directory, creating it if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(ReadCache {
            dir: dir.to_path_buf(),
        })
    }

    fn write_blob(&self, filename: &str, contents: &str) -> Result<()> {
        let mut file = std::fs::File::create(self.dir.join(filename))?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    fn read_blob<T: serde::de::DeserializeOwned>(&self, filename: &str) -> Option<T> {
        let path = self.dir.join(filename);
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                // A corrupt blob behaves like no cache at all
                tracing::warn!("unreadable cache blob {}: {}", filename, e);
                None
            }
        }
    }

    /// Overwrite the cached movement list.
    pub fn store_movements(&self, movements: &[Movement]) -> Result<()> {
        let json = serde_json::to_string(movements)?;
        self.write_blob(Self::MOVEMENTS_FILE, &json)
    }

    /// Overwrite the cached staff list.
    pub fn store_staff(&self, staff: &[Staff]) -> Result<()> {
        let json = serde_json::to_string(staff)?;
        self.write_blob(Self::STAFF_FILE, &json)
    }

    /// Record the timestamp of the last successful full remote load.
    pub fn set_last_sync(&self, at: DateTime<Utc>) -> Result<()> {
        self.write_blob(Self::LAST_SYNC_FILE, &at.to_rfc3339())
    }

    /// The cached movement list, or `None` if never populated.
    pub fn movements(&self) -> Option<Vec<Movement>> {
        self.read_blob(Self::MOVEMENTS_FILE)
    }

    /// The cached staff list, or `None` if never populated.
    pub fn staff(&self) -> Option<Vec<Staff>> {
        self.read_blob(Self::STAFF_FILE)
    }

    /// The last successful sync timestamp, or `None` if never recorded.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        let contents = std::fs::read_to_string(self.dir.join(Self::LAST_SYNC_FILE)).ok()?;
        DateTime::parse_from_rfc3339(contents.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    /// The full snapshot. Never fails: missing or unreadable blobs come back
    /// as explicit `None` fields.
    pub fn snapshot(&self) -> CachedSnapshot {
        CachedSnapshot {
            movements: self.movements(),
            staff: self.staff(),
            last_sync: self.last_sync(),
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
