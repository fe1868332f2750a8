//! Versioned memoization of synthesized members.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use kindgen_model::{DeclarationId, Request, SyntheticMember};

/// Shared, immutable result of one synthesis.
pub type Members = Arc<[SyntheticMember]>;

/// Identifies one memoized synthesis: which declaration, at which host
/// version, for which request kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Declaration identity.
    pub declaration: DeclarationId,
    /// Host modification counter the result was computed from.
    pub version: u64,
    /// Request kind.
    pub request: Request,
}

impl CacheKey {
    /// Creates a key.
    pub fn new(declaration: DeclarationId, version: u64, request: Request) -> Self {
        Self {
            declaration,
            version,
            request,
        }
    }
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

/// Results held for one declaration, all computed from its latest version.
#[derive(Debug)]
struct Slot {
    version: u64,
    by_request: HashMap<Request, Members>,
}

impl Slot {
    fn new(version: u64) -> Self {
        Self {
            version,
            by_request: HashMap::new(),
        }
    }
}

/// Concurrent memo table keyed by [`CacheKey`].
///
/// Each declaration keeps only the results of the newest version seen, so
/// storing a newer version touches that declaration's shard alone and a
/// late result for an older version is never stored.
///
/// No shard lock is held while a value is being computed, so a computation
/// may itself consult the cache. Two threads missing on the same key both
/// compute; the first insertion wins and both observe it.
#[derive(Debug, Default)]
pub struct MemoCache {
    slots: DashMap<DeclarationId, Slot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value for `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<Members> {
        let found = self
            .slots
            .get(&key.declaration)
            .filter(|slot| slot.version == key.version)
            .and_then(|slot| slot.by_request.get(&key.request).map(Arc::clone));
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Stores `value` under `key` unless an entry is already present, and
    /// returns the stored value.
    ///
    /// Storing a newer version drops the declaration's older entries. A key
    /// older than the newest version already seen is not stored, and
    /// `value` is handed back as is.
    pub fn insert(&self, key: CacheKey, value: Members) -> Members {
        let mut slot = self
            .slots
            .entry(key.declaration)
            .or_insert_with(|| Slot::new(key.version));
        if key.version < slot.version {
            return value;
        }
        if key.version > slot.version {
            *slot = Slot::new(key.version);
        }
        Arc::clone(slot.by_request.entry(key.request).or_insert(value))
    }

    /// Returns the memoized value for `key`, computing and storing it on a
    /// miss.
    ///
    /// # Errors
    ///
    /// Propagates the error of `compute`; nothing is stored in that case.
    pub fn get_or_compute<E>(
        &self,
        key: &CacheKey,
        compute: impl FnOnce() -> Result<Members, E>,
    ) -> Result<Members, E> {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let value = compute()?;
        Ok(self.insert(key.clone(), value))
    }

    /// Drops every entry of a declaration, across request kinds, and forgets
    /// its newest version. Returns the number of entries removed.
    pub fn invalidate(&self, id: &DeclarationId) -> usize {
        self.slots
            .remove(id)
            .map_or(0, |(_, slot)| slot.by_request.len())
    }

    /// Drops everything.
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.slots.iter().map(|slot| slot.by_request.len()).sum()
    }

    /// True if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit and miss counts.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(id: &str, version: u64, request: Request) -> CacheKey {
        CacheKey::new(DeclarationId::new(id), version, request)
    }

    fn empty() -> Members {
        Arc::from(Vec::new())
    }

    #[test]
    fn computes_once_per_key() {
        let cache = MemoCache::new();
        let k = key("com.example.Box", 0, Request::Methods);
        let mut calls = 0;
        for _ in 0..3 {
            cache
                .get_or_compute::<()>(&k, || {
                    calls += 1;
                    Ok(empty())
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 1 });
    }

    #[test]
    fn errors_are_not_stored() {
        let cache = MemoCache::new();
        let k = key("com.example.Box", 0, Request::Class);
        assert_eq!(cache.get_or_compute(&k, || Err("boom")), Err("boom"));
        assert!(cache.is_empty());
    }

    #[test]
    fn newer_version_prunes_older_entries() {
        let cache = MemoCache::new();
        cache.insert(key("a.A", 0, Request::Class), empty());
        cache.insert(key("a.A", 0, Request::Methods), empty());
        cache.insert(key("b.B", 0, Request::Class), empty());
        assert_eq!(cache.len(), 3);

        cache.insert(key("a.A", 1, Request::Methods), empty());
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("a.A", 0, Request::Class)).is_none());
        assert!(cache.get(&key("b.B", 0, Request::Class)).is_some());
    }

    #[test]
    fn invalidate_drops_one_declaration() {
        let cache = MemoCache::new();
        cache.insert(key("a.A", 3, Request::Class), empty());
        cache.insert(key("a.A", 3, Request::Methods), empty());
        cache.insert(key("b.B", 0, Request::Class), empty());

        assert_eq!(cache.invalidate(&DeclarationId::new("a.A")), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidate(&DeclarationId::new("a.A")), 0);
    }

    #[test]
    fn first_insertion_wins() {
        let cache = MemoCache::new();
        let k = key("a.A", 0, Request::Methods);
        let first = cache.insert(k.clone(), empty());
        let second = cache.insert(k, empty());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn late_older_insert_is_refused() {
        let cache = MemoCache::new();
        cache.insert(key("a.A", 1, Request::Methods), empty());

        let late: Members = Arc::from(Vec::new());
        let returned = cache.insert(key("a.A", 0, Request::Methods), Arc::clone(&late));
        assert!(Arc::ptr_eq(&returned, &late));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("a.A", 0, Request::Methods)).is_none());
        assert!(cache.get(&key("a.A", 1, Request::Methods)).is_some());
    }

    #[test]
    fn invalidate_forgets_the_newest_version() {
        let cache = MemoCache::new();
        cache.insert(key("a.A", 2, Request::Class), empty());
        cache.invalidate(&DeclarationId::new("a.A"));

        cache.insert(key("a.A", 0, Request::Class), empty());
        assert!(cache.get(&key("a.A", 0, Request::Class)).is_some());
    }
}
