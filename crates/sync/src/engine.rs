// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drain logic: replay the pending queues against the remote store.
//!
//! One drain runs at a time process-wide. Each pass replays every pending
//! dispatch before any pending receive, both in enqueue order, isolating
//! failures per item so one bad record never aborts the batch. Items that
//! fail stay pending and are retried on the next pass; retries are unbounded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use gd_core::QueueStore;

use crate::error::{SyncError, SyncResult};
use crate::remote::{RemoteStore, MOVEMENTS_TABLE};
use crate::translate;

/// Counts from one completed drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub dispatches_synced: usize,
    pub receives_synced: usize,
    pub dispatches_failed: usize,
    pub receives_failed: usize,
    /// Synced rows deleted by the cleanup step at the end of the pass.
    pub cleaned: usize,
}

impl DrainReport {
    /// Total items confirmed by the remote this pass.
    pub fn total_synced(&self) -> usize {
        self.dispatches_synced + self.receives_synced
    }

    /// Total items left pending for the next pass.
    pub fn total_failed(&self) -> usize {
        self.dispatches_failed + self.receives_failed
    }
}

/// Result of asking for a drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The pass ran to completion (individual items may still have failed).
    Completed(DrainReport),
    /// Another drain was already in flight; this call did nothing.
    AlreadyRunning,
}

/// Clears the in-flight flag on every exit path.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Replays pending queue items against the remote store.
pub struct SyncEngine<R: RemoteStore> {
    remote: Arc<R>,
    store: Arc<Mutex<QueueStore>>,
    /// Mutual exclusion for [`drain_queues`](Self::drain_queues). Checked and
    /// set before the first suspension point, so overlapping triggers
    /// (reconnect event plus manual button) cannot double-submit the queue.
    in_flight: AtomicBool,
}

impl<R: RemoteStore> SyncEngine<R> {
    /// Create an engine over a shared queue store and remote.
    pub fn new(remote: Arc<R>, store: Arc<Mutex<QueueStore>>) -> Self {
        SyncEngine {
            remote,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a drain is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Drain both pending queues once.
    ///
    /// The caller is responsible for only invoking this while connectivity
    /// reads online; a stale online flag just means every item fails and
    /// stays pending. Returns [`SyncError::BatchFetch`] only when reading the
    /// queues themselves fails; per-item remote failures are logged, counted
    /// in the report, and retried next pass.
    pub async fn drain_queues(&self) -> SyncResult<DrainOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("drain already in flight, skipping");
            return Ok(DrainOutcome::AlreadyRunning);
        }
        let _guard = DrainGuard(&self.in_flight);

        // Fetch both batches up front; a failure here is the only aggregate
        // error this function produces.
        let (dispatches, receives) = {
            let store = self.store.lock().await;
            let dispatches = store
                .list_pending_dispatches()
                .map_err(|e| SyncError::BatchFetch(e.to_string()))?;
            let receives = store
                .list_pending_receives()
                .map_err(|e| SyncError::BatchFetch(e.to_string()))?;
            (dispatches, receives)
        };

        let mut report = DrainReport::default();

        // Dispatches strictly before receives: a receive logically depends
        // on its dispatch being visible server-side.
        for item in &dispatches {
            match self.replay_dispatch(item).await {
                Ok(()) => report.dispatches_synced += 1,
                Err(e) => {
                    tracing::warn!(
                        local_id = item.local_id,
                        "dispatch replay failed, will retry: {}",
                        e
                    );
                    report.dispatches_failed += 1;
                }
            }
        }

        for item in &receives {
            match self.replay_receive(item).await {
                Ok(()) => report.receives_synced += 1,
                Err(e) => {
                    tracing::warn!(
                        local_id = item.local_id,
                        movement_id = %item.movement_id,
                        "receive replay failed, will retry: {}",
                        e
                    );
                    report.receives_failed += 1;
                }
            }
        }

        // Cleanup is housekeeping: tolerated to fail, rows get another
        // chance on the next pass.
        match self.store.lock().await.clear_synced() {
            Ok(cleaned) => report.cleaned = cleaned,
            Err(e) => tracing::warn!("queue cleanup failed: {}", e),
        }

        tracing::info!(
            dispatches = report.dispatches_synced,
            receives = report.receives_synced,
            failed = report.total_failed(),
            cleaned = report.cleaned,
            "drain pass complete"
        );

        Ok(DrainOutcome::Completed(report))
    }

    async fn replay_dispatch(&self, item: &gd_core::QueuedDispatch) -> SyncResult<()> {
        let record = translate::dispatch_to_insert(item).map_err(gd_core::Error::from)?;
        self.remote.insert(MOVEMENTS_TABLE, record).await?;
        self.store
            .lock()
            .await
            .mark_dispatch_synced(item.local_id)?;
        Ok(())
    }

    async fn replay_receive(&self, item: &gd_core::QueuedReceive) -> SyncResult<()> {
        let patch = translate::receive_to_patch(item).map_err(gd_core::Error::from)?;
        self.remote
            .update(MOVEMENTS_TABLE, &item.movement_id, patch)
            .await?;
        self.store.lock().await.mark_receive_synced(item.local_id)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
