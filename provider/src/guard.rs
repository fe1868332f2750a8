//! Recursion guard for synthesis that re-enters itself.
//!
//! A host may ask for a declaration's members while it is already computing
//! them, for example when resolving a type mentioned by a synthesized
//! signature. The guard turns such a nested request into an empty answer.
//! It only tracks calls on the current thread: another thread asking for the
//! same key is an ordinary concurrent request and is not blocked.

use std::thread::{self, ThreadId};

use dashmap::DashSet;

use crate::cache::CacheKey;

/// Tracks in-flight computations per `(thread, key)`.
#[derive(Debug)]
pub struct RecursionGuard {
    name: &'static str,
    in_flight: DashSet<(ThreadId, CacheKey)>,
}

impl RecursionGuard {
    /// Creates a guard; `name` appears in log lines.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            in_flight: DashSet::new(),
        }
    }

    /// Runs `f` unless a call for `key` is already in progress on this
    /// thread, in which case returns `None` without running it.
    ///
    /// The key is released when `f` returns or unwinds.
    pub fn prevent<R>(&self, key: &CacheKey, f: impl FnOnce() -> R) -> Option<R> {
        let slot = (thread::current().id(), key.clone());
        if !self.in_flight.insert(slot.clone()) {
            tracing::debug!(
                guard = self.name,
                declaration = %key.declaration,
                request = key.request.as_str(),
                "reentrant request; answering empty"
            );
            return None;
        }
        let _release = Release {
            set: &self.in_flight,
            slot,
        };
        Some(f())
    }

    #[cfg(test)]
    fn is_active(&self, key: &CacheKey) -> bool {
        self.in_flight
            .contains(&(thread::current().id(), key.clone()))
    }
}

struct Release<'a> {
    set: &'a DashSet<(ThreadId, CacheKey)>,
    slot: (ThreadId, CacheKey),
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.slot);
    }
}
