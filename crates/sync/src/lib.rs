// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! gd-sync - offline-first synchronization for the godown logistics tracker.
//!
//! Dispatch and receive operations submitted while offline are persisted in
//! a durable local queue (gd-core), then replayed against the remote store
//! when connectivity returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Coordinator  │────►│   Engine    │────►│ RemoteStore │
//! │   (façade)   │     │  (drain)    │     │   (trait)   │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌──────────────┐     ┌─────────────┐
//! │  ReadCache   │     │ QueueStore  │  (gd-core)
//! └──────────────┘     └─────────────┘
//! ```
//!
//! # Guarantees
//!
//! - One drain at a time, process-wide
//! - Per-queue replay in enqueue order; all dispatches before any receive
//! - Per-item failure isolation; failed items stay pending and retry
//! - At-least-once delivery; cleanup only after confirmed remote acceptance

pub mod connectivity;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod remote;
pub mod translate;

pub use connectivity::{ConnectivityObserver, NetworkSignal, SharedSignal, Transition};
pub use coordinator::{SubmitOutcome, SyncCoordinator, SyncOutcome};
pub use engine::{DrainOutcome, DrainReport, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use remote::{RemoteError, RemoteResult, RemoteStore, MOVEMENTS_TABLE, STAFF_TABLE};

#[cfg(test)]
mod test_helpers;
