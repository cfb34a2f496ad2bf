// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gd-core - local persistence for the godown logistics tracker.
//!
//! This crate owns the offline-first storage layer: a crash-durable queue of
//! not-yet-synced dispatch/receive operations and a read cache of last-known
//! remote data.
//!
//! # Main Components
//!
//! - [`QueueStore`] - SQLite-backed durable queue for offline operations
//! - [`ReadCache`] - flat-file snapshot of remote data for offline reads
//! - [`movement`] - domain types ([`DispatchDraft`](movement::DispatchDraft),
//!   [`Movement`](movement::Movement), etc.)
//! - [`Error`] - error types for all operations
//!
//! The queue and the cache are deliberately independent: a cache read never
//! mutates the queue, a queue write never mutates the cache. They meet only
//! in the sync coordinator one crate up.

pub mod cache;
pub mod config;
pub mod error;
pub mod movement;
pub mod store;

pub use cache::{CachedSnapshot, ReadCache};
pub use error::{Error, Result};
pub use movement::{
    Destination, DispatchDraft, Item, Movement, MovementStatus, QueuedDispatch, QueuedReceive,
    ReceiveDraft, Staff,
};
pub use store::{PendingCounts, QueueStore};
