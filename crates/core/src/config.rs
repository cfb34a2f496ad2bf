// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data-directory layout for the local stores.
//!
//! Everything the sync core persists lives under one directory: the queue
//! database plus the read-cache blobs. Embedders and tests inject an explicit
//! root; production callers usually start from [`default_data_dir`].

use std::path::{Path, PathBuf};

/// Filename of the offline queue database.
pub const QUEUE_DB_FILE: &str = "queue.db";

/// Subdirectory holding the read-cache blobs.
pub const CACHE_DIR: &str = "cache";

/// Platform data directory for the application, if one can be resolved.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("godown"))
}

/// Path of the queue database under a data root.
pub fn queue_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(QUEUE_DB_FILE)
}

/// Path of the read-cache directory under a data root.
pub fn cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(CACHE_DIR)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
