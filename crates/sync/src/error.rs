// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync layer.

use thiserror::Error;

use crate::remote::RemoteError;

/// All possible errors surfaced by the sync engine and coordinator.
///
/// Per-item remote failures during a drain are absorbed and retried, never
/// raised through this type; only whole-batch conditions reach the caller.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing the pending queue itself failed. The one condition that
    /// warrants a user-visible "sync failed, will retry" notice.
    #[error("failed to read pending queue: {0}")]
    BatchFetch(String),

    /// A local store operation failed outside a drain (enqueue, cache write).
    /// Always surfaced: swallowing an enqueue failure would lose data.
    #[error("queue error: {0}")]
    Store(#[from] gd_core::Error),

    /// A remote operation failed outside the per-item drain loop
    /// (e.g. during an opportunistic full reload).
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// A specialized Result type for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
