// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use gd_core::{Destination, DispatchDraft, Item, ReceiveDraft};

use crate::remote::{RemoteError, RemoteResult, RemoteStore};

/// Mock remote store for testing without a real backend.
///
/// Records every call, serves canned rows for `select_all`, and can be
/// programmed to fail specific calls by their zero-based call index (a
/// retried item arrives as a later call, so a programmed failure is
/// naturally one-shot).
pub struct MockRemote {
    /// (table, record) pairs in insert order.
    inserts: Mutex<Vec<(String, Value)>>,
    /// (table, id, patch) triples in update order.
    updates: Mutex<Vec<(String, String, Value)>>,
    /// Tables queried via select_all, in order.
    selects: Mutex<Vec<String>>,
    /// Canned rows served by select_all.
    rows: Mutex<HashMap<String, Vec<Value>>>,
    /// Insert call indices that should fail.
    insert_failures: Mutex<HashSet<usize>>,
    /// Update call indices that should fail.
    update_failures: Mutex<HashSet<usize>>,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
    /// Every call in arrival order, e.g. `insert:movements`.
    call_log: Mutex<Vec<String>>,
    /// When set, inserts park on this gate until released.
    hold: Mutex<Option<Arc<Notify>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        MockRemote {
            inserts: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            selects: Mutex::new(Vec::new()),
            rows: Mutex::new(HashMap::new()),
            insert_failures: Mutex::new(HashSet::new()),
            update_failures: Mutex::new(HashSet::new()),
            insert_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            call_log: Mutex::new(Vec::new()),
            hold: Mutex::new(None),
        }
    }

    /// Program the insert at the given call index to fail.
    pub fn fail_insert(&self, index: usize) {
        self.insert_failures.lock().unwrap().insert(index);
    }

    /// Program the update at the given call index to fail.
    pub fn fail_update(&self, index: usize) {
        self.update_failures.lock().unwrap().insert(index);
    }

    /// Serve canned rows for select_all on a table.
    pub fn set_rows(&self, table: &str, rows: Vec<Value>) {
        self.rows.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Park subsequent inserts until [`release`](Self::release) is called.
    pub fn hold_inserts(&self) {
        *self.hold.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    /// Release parked inserts and stop gating new ones.
    pub fn release(&self) {
        if let Some(gate) = self.hold.lock().unwrap().take() {
            gate.notify_waiters();
        }
    }

    /// All recorded inserts.
    pub fn inserts(&self) -> Vec<(String, Value)> {
        self.inserts.lock().unwrap().clone()
    }

    /// All recorded updates.
    pub fn updates(&self) -> Vec<(String, String, Value)> {
        self.updates.lock().unwrap().clone()
    }

    /// Tables queried via select_all, in order.
    pub fn selects(&self) -> Vec<String> {
        self.selects.lock().unwrap().clone()
    }

    /// Number of insert attempts made, including failed ones.
    pub fn insert_attempts(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of update attempts made, including failed ones.
    pub fn update_attempts(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Every successful call in arrival order.
    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }
}

impl RemoteStore for MockRemote {
    fn insert(
        &self,
        table: &str,
        record: Value,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RemoteResult<Value>> + Send + '_>> {
        let table = table.to_string();
        Box::pin(async move {
            let gate = self.hold.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let index = self.insert_calls.fetch_add(1, Ordering::SeqCst);
            if self.insert_failures.lock().unwrap().contains(&index) {
                return Err(RemoteError::InsertFailed(format!(
                    "mock failure at insert {index}"
                )));
            }

            let mut stored = record.clone();
            if let Some(obj) = stored.as_object_mut() {
                obj.insert("id".to_string(), Value::String(format!("mv-{}", index + 1)));
            }
            self.call_log
                .lock()
                .unwrap()
                .push(format!("insert:{table}"));
            self.inserts.lock().unwrap().push((table, record));
            Ok(stored)
        })
    }

    fn update(
        &self,
        table: &str,
        id: &str,
        patch: Value,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RemoteResult<()>> + Send + '_>> {
        let table = table.to_string();
        let id = id.to_string();
        Box::pin(async move {
            let index = self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.update_failures.lock().unwrap().contains(&index) {
                return Err(RemoteError::UpdateFailed(format!(
                    "mock failure at update {index}"
                )));
            }

            self.call_log
                .lock()
                .unwrap()
                .push(format!("update:{table}:{id}"));
            self.updates.lock().unwrap().push((table, id, patch));
            Ok(())
        })
    }

    fn select_all(
        &self,
        table: &str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RemoteResult<Vec<Value>>> + Send + '_>>
    {
        let table = table.to_string();
        Box::pin(async move {
            self.selects.lock().unwrap().push(table.clone());
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&table)
                .cloned()
                .unwrap_or_default())
        })
    }
}

/// A dispatch draft like the ones the forms produce, optionals unset.
pub fn make_dispatch(bundles_count: u32) -> DispatchDraft {
    DispatchDraft {
        destination: Destination::BigShop,
        item: Item::Shirt,
        bundles_count,
        pieces_per_bundle: None,
        sender_id: "st-1".to_string(),
        sender_name: "Ravi".to_string(),
        fare: None,
        fare_paid_by: None,
        accompanied_by: None,
        transport: None,
        notes: None,
    }
}

/// A receive draft with condition notes set.
pub fn make_receive() -> ReceiveDraft {
    ReceiveDraft {
        received_at: chrono::Utc::now(),
        receiver_id: "st-2".to_string(),
        receiver_name: "Sita".to_string(),
        condition_notes: Some("two bundles damp".to_string()),
    }
}
