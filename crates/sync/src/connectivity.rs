// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity tracking.
//!
//! The runtime's network-state signal is abstracted behind [`NetworkSignal`];
//! the [`ConnectivityObserver`] turns its raw publishes into transitions,
//! notifying exactly once per flip and never on same-value re-publishes.

use tokio::sync::watch;

/// Source of the current online/offline state.
///
/// Implementations wrap whatever the platform offers (a browser event pair,
/// an interface watcher, a reachability probe). The watch channel carries
/// `true` for online.
pub trait NetworkSignal: Send + Sync {
    /// Instantaneous read of the network state.
    fn currently_online(&self) -> bool;

    /// Subscribe to state publishes.
    fn watch(&self) -> watch::Receiver<bool>;
}

/// A watch-backed signal for embedders and tests to drive directly.
pub struct SharedSignal {
    tx: watch::Sender<bool>,
}

impl SharedSignal {
    /// Create a signal with the given initial state.
    pub fn new(online: bool) -> Self {
        let (tx, _) = watch::channel(online);
        SharedSignal { tx }
    }

    /// Publish a new state. Publishing the current value is harmless; the
    /// observer suppresses it.
    pub fn set_online(&self, online: bool) {
        let _ = self.tx.send(online);
    }
}

impl NetworkSignal for SharedSignal {
    fn currently_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// A connectivity flip, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Online,
    Offline,
}

/// Tracks online/offline transitions over a [`NetworkSignal`].
pub struct ConnectivityObserver {
    rx: watch::Receiver<bool>,
    last: bool,
}

impl ConnectivityObserver {
    /// Create an observer initialized from the signal's current state.
    pub fn new(signal: &dyn NetworkSignal) -> Self {
        let rx = signal.watch();
        let last = signal.currently_online();
        ConnectivityObserver { rx, last }
    }

    /// Instantaneous read of the network state.
    pub fn is_online(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the next actual flip.
    ///
    /// Returns `None` once the signal source is gone.
    pub async fn next_transition(&mut self) -> Option<Transition> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let now = *self.rx.borrow_and_update();
            if now != self.last {
                self.last = now;
                return Some(if now {
                    Transition::Online
                } else {
                    Transition::Offline
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
