// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-payload-type event channel.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T: 'static> {
    alive: Arc<AtomicBool>,
    listener: Listener<T>,
}

impl<T: 'static> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            alive: Arc::clone(&self.alive),
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Typed event channel with synchronous, in-order dispatch.
///
/// Clones share the same channel, so an emitter can be handed into a
/// listener that needs to subscribe or fire re-entrantly.
///
/// # Dispatch semantics
///
/// [`fire`](Self::fire) snapshots the listener list, then re-checks each
/// snapshotted listener immediately before invoking it. A listener disposed
/// mid-fire (before its turn) is skipped; a listener subscribed after the
/// fire started is not invoked for that fire. The list lock is never held
/// across a listener call, so listeners may subscribe and dispose freely.
///
/// There is no buffering: a fire with no subscribers is dropped.
pub struct EventEmitter<T: 'static> {
    entries: Arc<Mutex<Vec<Entry<T>>>>,
}

impl<T: 'static> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventEmitter<T> {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attach a listener; it stays attached until the returned handle is
    /// [`disposed`](Subscription::dispose).
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));
        let mut entries = self.entries.lock();
        entries.retain(|e| e.alive.load(Ordering::SeqCst));
        entries.push(Entry {
            alive: Arc::clone(&alive),
            listener: Arc::new(listener),
        });
        Subscription { alive }
    }

    /// Invoke every currently subscribed listener, in subscription order.
    pub fn fire(&self, payload: &T) {
        let snapshot: Vec<Entry<T>> = {
            let mut entries = self.entries.lock();
            entries.retain(|e| e.alive.load(Ordering::SeqCst));
            entries.clone()
        };
        for entry in snapshot {
            if entry.alive.load(Ordering::SeqCst) {
                (entry.listener)(payload);
            }
        }
    }

    /// Number of currently subscribed listeners.
    pub fn listener_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.alive.load(Ordering::SeqCst))
            .count()
    }
}

/// Handle to an attached listener.
///
/// Unsubscription is explicit, matching host-API `Disposable` semantics:
/// dropping the handle without calling [`dispose`](Self::dispose) leaves the
/// listener attached.
#[must_use = "dropping the handle does not unsubscribe; keep it to dispose later"]
pub struct Subscription {
    alive: Arc<AtomicBool>,
}

impl Subscription {
    /// Detach the listener. Disposing twice is a no-op.
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        !self.alive.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
