// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote data store abstraction.
//!
//! The sync core depends only on three operation shapes against the hosted
//! store: insert a record, patch a record by id, and list a table. The trait
//! is object-safe and returns boxed futures so tests can inject a mock
//! without touching the drain logic.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Remote table holding movement records.
pub const MOVEMENTS_TABLE: &str = "movements";

/// Remote table holding staff records.
pub const STAFF_TABLE: &str = "staff";

/// Error type for remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The remote could not be reached at all.
    #[error("remote unreachable: {0}")]
    Unreachable(String),

    /// An insert was rejected or failed in flight.
    #[error("insert failed: {0}")]
    InsertFailed(String),

    /// An update was rejected or failed in flight.
    #[error("update failed: {0}")]
    UpdateFailed(String),

    /// A listing query failed.
    #[error("select failed: {0}")]
    SelectFailed(String),
}

/// Result type for remote store operations.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Interface to the hosted data store.
///
/// Implementations must not retry internally; the drain loop owns retry
/// policy (every failed item is simply attempted again on the next pass).
pub trait RemoteStore: Send + Sync {
    /// Insert a record, returning the stored record (with its server id).
    fn insert(
        &self,
        table: &str,
        record: Value,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<Value>> + Send + '_>>;

    /// Patch the record with the given id.
    fn update(
        &self,
        table: &str,
        id: &str,
        patch: Value,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<()>> + Send + '_>>;

    /// List every record in a table.
    fn select_all(
        &self,
        table: &str,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<Vec<Value>>> + Send + '_>>;
}
