//! Singleflight Module
//!
//! Collapses concurrent loads for the same key into one execution.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use tokio::sync::watch;

use crate::cache::ByteView;
use crate::error::{CacheError, Result};

type Outcome = Result<ByteView>;

// == Single Flight ==
/// Per-key in-flight call registry.
///
/// The first caller for a key becomes the leader and runs the compute;
/// everyone else arriving while the call is in flight blocks on the leader's
/// completion channel and receives the identical outcome. The registry entry
/// is removed the moment the call finishes, success or failure, so a failed
/// key is never poisoned and a later call always computes afresh. Removal is
/// tied to the leader's drop, so a leader whose future is dropped mid-load
/// unregisters the call as well.
#[derive(Default)]
pub struct SingleFlight {
    calls: Mutex<HashMap<String, watch::Receiver<Option<Outcome>>>>,
}

enum Role {
    Leader(watch::Sender<Option<Outcome>>),
    Waiter(watch::Receiver<Option<Outcome>>),
}

/// Removes the leader's call record when dropped.
///
/// Held across the compute so the registry is cleaned up even when the
/// leader's future is dropped mid-load (task aborted, client disconnect);
/// otherwise the stale record would turn every later call into a waiter on
/// a dead channel.
struct Unregister<'a> {
    flight: &'a SingleFlight,
    key: &'a str,
}

impl Drop for Unregister<'_> {
    fn drop(&mut self) {
        self.flight.calls.lock().unwrap().remove(self.key);
    }
}

impl SingleFlight {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Executes `compute` for `key`, deduplicating concurrent calls.
    ///
    /// The compute runs outside the registry lock, so in-flight calls for
    /// other keys are never blocked by this one. A waiter's own `compute`
    /// closure is dropped unused.
    pub async fn run<F, Fut>(&self, key: &str, compute: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        let role = {
            let mut calls = self.calls.lock().unwrap();
            match calls.get(key) {
                Some(rx) => Role::Waiter(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    calls.insert(key.to_string(), rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Waiter(mut rx) => loop {
                if let Some(outcome) = rx.borrow_and_update().clone() {
                    return outcome;
                }
                if rx.changed().await.is_err() {
                    // Leader dropped without publishing (its future was
                    // cancelled); check one last time, then report it.
                    if let Some(outcome) = rx.borrow().clone() {
                        return outcome;
                    }
                    return Err(CacheError::Internal(
                        "in-flight load abandoned".to_string(),
                    ));
                }
            },
            Role::Leader(tx) => {
                let _unregister = Unregister { flight: self, key };
                let outcome = compute().await;
                let _ = tx.send(Some(outcome.clone()));
                outcome
            }
        }
    }

    /// Number of calls currently in flight.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}
