// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for gd-core operations.

use thiserror::Error;

/// All possible errors that can occur in gd-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("invalid destination: '{0}'\n  hint: valid destinations are: godown, big_shop, small_shop")]
    InvalidDestination(String),

    #[error("invalid item: '{0}'\n  hint: valid items are: shirt, pant")]
    InvalidItem(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: dispatched, received")]
    InvalidStatus(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gd-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
