//! Generic TTL cache used for short-lived standings snapshots.
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Small per-process TTL cache; entries expire on access, nothing else evicts them.
pub struct TtlCache<K, V> {
    ttl: Duration,
    map: HashMap<K, (Instant, V)>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            map: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, (Instant::now(), value));
    }

    /// Fresh entry for `key`; an expired entry is dropped and counts as a miss.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let fresh = matches!(self.map.get(key), Some((ts, _)) if ts.elapsed() < self.ttl);
        if !fresh {
            self.map.remove(key);
            self.misses += 1;
            return None;
        }
        self.hits += 1;
        self.map.get(key).map(|(_, v)| v)
    }

    pub fn invalidate(&mut self, key: &K) {
        self.map.remove(key);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
