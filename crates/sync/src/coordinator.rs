// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The façade the presentation layer talks to.
//!
//! The coordinator composes the queue store, the read cache, the sync engine
//! and the connectivity signal into one API: queue-if-offline submission,
//! manual sync, cache refresh, and the read-only state the UI renders
//! (offline flag, pending badge counts, in-flight flag, last sync error).
//!
//! Everything is owned by this one long-lived instance; there is no hidden
//! process-wide state. Construct it once at application start and hand it
//! by reference to consumers.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, Mutex};

use gd_core::{
    CachedSnapshot, DispatchDraft, Movement, PendingCounts, QueueStore, ReadCache, ReceiveDraft,
    Staff,
};

use crate::connectivity::{ConnectivityObserver, NetworkSignal, Transition};
use crate::engine::{DrainOutcome, DrainReport, SyncEngine};
use crate::error::SyncResult;
use crate::remote::{RemoteStore, MOVEMENTS_TABLE, STAFF_TABLE};

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Offline: the operation was persisted locally. The caller should show
    /// its own optimistic shadow row; `local_id` never leaves this device.
    Queued { local_id: i64 },
    /// Online: nothing was queued. The caller performs the direct remote
    /// write itself (the façade does not duplicate the online write path).
    NotQueued,
}

/// What happened to a sync request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A drain pass completed.
    Synced(DrainReport),
    /// Another drain was already in flight.
    AlreadyRunning,
    /// Currently offline; nothing was attempted.
    Offline,
}

/// UI-facing sync coordinator.
pub struct SyncCoordinator<R: RemoteStore> {
    store: Arc<Mutex<QueueStore>>,
    cache: ReadCache,
    remote: Arc<R>,
    engine: SyncEngine<R>,
    connectivity: watch::Receiver<bool>,
    pending: std::sync::Mutex<PendingCounts>,
    last_sync_error: std::sync::Mutex<Option<String>>,
}

impl<R: RemoteStore> SyncCoordinator<R> {
    /// Build a coordinator over the given stores, remote and signal.
    ///
    /// Reads the initial pending counts from the store, so queued items from
    /// a previous run show in the badge immediately.
    pub fn new(
        store: QueueStore,
        cache: ReadCache,
        remote: Arc<R>,
        signal: &dyn NetworkSignal,
    ) -> SyncResult<Self> {
        let pending = store.pending_counts()?;
        let store = Arc::new(Mutex::new(store));
        let engine = SyncEngine::new(Arc::clone(&remote), Arc::clone(&store));

        Ok(SyncCoordinator {
            store,
            cache,
            remote,
            engine,
            connectivity: signal.watch(),
            pending: std::sync::Mutex::new(pending),
            last_sync_error: std::sync::Mutex::new(None),
        })
    }

    /// Whether the device currently reads offline.
    pub fn is_offline(&self) -> bool {
        !*self.connectivity.borrow()
    }

    /// Whether a drain pass is in flight.
    pub fn is_syncing(&self) -> bool {
        self.engine.is_syncing()
    }

    /// Pending queue counts, recomputed after every enqueue and drain.
    pub fn pending_counts(&self) -> PendingCounts {
        self.pending.lock().map(|p| *p).unwrap_or_default()
    }

    /// The last batch-level sync failure, cleared by the next completed pass.
    pub fn last_sync_error(&self) -> Option<String> {
        self.last_sync_error.lock().map(|e| e.clone()).unwrap_or(None)
    }

    fn set_last_sync_error(&self, error: Option<String>) {
        if let Ok(mut slot) = self.last_sync_error.lock() {
            *slot = error;
        }
    }

    async fn recompute_pending(&self) {
        match self.store.lock().await.pending_counts() {
            Ok(counts) => {
                if let Ok(mut pending) = self.pending.lock() {
                    *pending = counts;
                }
            }
            Err(e) => tracing::warn!("failed to recompute pending counts: {}", e),
        }
    }

    /// Submit a dispatch: queued locally when offline, untouched when online.
    ///
    /// An enqueue failure always surfaces so the UI can tell the user the
    /// offline submission was NOT saved.
    pub async fn submit_dispatch(&self, draft: &DispatchDraft) -> SyncResult<SubmitOutcome> {
        if !self.is_offline() {
            return Ok(SubmitOutcome::NotQueued);
        }

        let local_id = self.store.lock().await.enqueue_dispatch(draft)?;
        self.recompute_pending().await;
        tracing::debug!(local_id, "dispatch queued offline");
        Ok(SubmitOutcome::Queued { local_id })
    }

    /// Submit a receipt confirmation; same contract as [`submit_dispatch`](Self::submit_dispatch).
    pub async fn submit_receive(
        &self,
        movement_id: &str,
        draft: &ReceiveDraft,
    ) -> SyncResult<SubmitOutcome> {
        if !self.is_offline() {
            return Ok(SubmitOutcome::NotQueued);
        }

        let local_id = self.store.lock().await.enqueue_receive(movement_id, draft)?;
        self.recompute_pending().await;
        tracing::debug!(local_id, movement_id, "receive queued offline");
        Ok(SubmitOutcome::Queued { local_id })
    }

    /// Drain the queues now, if online and not already draining.
    pub async fn sync_now(&self) -> SyncResult<SyncOutcome> {
        if self.is_offline() {
            return Ok(SyncOutcome::Offline);
        }

        let result = self.engine.drain_queues().await;
        self.recompute_pending().await;

        match result {
            Ok(DrainOutcome::Completed(report)) => {
                self.set_last_sync_error(None);
                Ok(SyncOutcome::Synced(report))
            }
            Ok(DrainOutcome::AlreadyRunning) => Ok(SyncOutcome::AlreadyRunning),
            Err(e) => {
                self.set_last_sync_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Overwrite the cache wholesale after a successful full remote load.
    ///
    /// Called by the presentation layer, keeping read-path caching
    /// independent of the write-path queue.
    pub fn refresh_cache(&self, movements: &[Movement], staff: &[Staff]) -> SyncResult<()> {
        self.cache.store_movements(movements)?;
        self.cache.store_staff(staff)?;
        self.cache.set_last_sync(Utc::now())?;
        Ok(())
    }

    /// The last cached snapshot, with explicit `None`s if never populated.
    ///
    /// Only for rendering while offline or after a failed remote load; never
    /// a source of truth for writes.
    pub fn get_cached_data(&self) -> CachedSnapshot {
        self.cache.snapshot()
    }

    /// Load both tables from the remote and refresh the cache.
    ///
    /// Rows that fail to decode are skipped with a warning; the authoritative
    /// reload always wins over any local shadow rows.
    pub async fn refresh_from_remote(&self) -> SyncResult<()> {
        let movement_rows = self.remote.select_all(MOVEMENTS_TABLE).await?;
        let staff_rows = self.remote.select_all(STAFF_TABLE).await?;

        let movements = decode_rows::<Movement>(movement_rows, MOVEMENTS_TABLE);
        let staff = decode_rows::<Staff>(staff_rows, STAFF_TABLE);

        self.refresh_cache(&movements, &staff)
    }

    /// React to a connectivity flip.
    ///
    /// Going online triggers exactly one drain attempt and one opportunistic
    /// cache refresh; both failures are advisory. Going offline only logs.
    pub async fn handle_transition(&self, transition: Transition) {
        match transition {
            Transition::Online => {
                tracing::info!("back online, draining queued operations");
                if let Err(e) = self.sync_now().await {
                    tracing::warn!("reconnect sync failed, will retry: {}", e);
                }
                if let Err(e) = self.refresh_from_remote().await {
                    tracing::warn!("cache refresh after reconnect failed: {}", e);
                }
            }
            Transition::Offline => {
                tracing::info!("connection lost, submissions will be queued locally");
            }
        }
    }

    /// Long-running loop: react to every transition until the signal goes away.
    pub async fn watch(&self, mut observer: ConnectivityObserver) {
        while let Some(transition) = observer.next_transition().await {
            self.handle_transition(transition).await;
        }
    }
}

/// Decode remote rows, skipping (and logging) any that do not parse.
fn decode_rows<T: serde::de::DeserializeOwned>(
    rows: Vec<serde_json::Value>,
    table: &str,
) -> Vec<T> {
    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value(row) {
            Ok(value) => decoded.push(value),
            Err(e) => tracing::warn!("skipping undecodable row from '{}': {}", table, e),
        }
    }
    decoded
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
