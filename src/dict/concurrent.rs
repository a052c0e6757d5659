// src/dict/concurrent.rs

//! The lock-striped dictionary backing the shared keyspace.
//!
//! Keys are routed to one of a fixed, power-of-two number of shards by a
//! 32-bit FNV-1 hash. Each shard carries its own reader/writer lock, so
//! operations on keys in different shards never contend, and no
//! operation ever holds more than one shard's lock. A single atomic
//! counter tracks the live-key count without taking any shard lock.

use super::shard::Shard;
use crate::dict::{Dict, Visitor};
use bytes::Bytes;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Minimum (and default) number of shards.
pub const MIN_SHARDS: usize = 16;

/// Largest permitted shard count: the biggest power of two whose mask
/// still fits in a positive 32-bit value.
const MAX_SHARDS: usize = 1 << 30;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1 hash of `key`; the shard router for the whole engine.
fn fnv32(key: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in key {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= u32::from(byte);
    }
    hash
}

/// Rounds a shard-count hint up to the table size actually allocated:
/// the smallest power of two >= the hint, clamped to
/// `[MIN_SHARDS, MAX_SHARDS]`.
fn table_size_for(hint: usize) -> usize {
    hint.clamp(MIN_SHARDS, MAX_SHARDS).next_power_of_two()
}

/// The concurrent [`Dict`]. Cheap to share behind an `Arc`: every
/// operation takes `&self` and synchronizes through the per-shard locks.
///
/// The shard table's length is fixed at construction, so a key's route
/// is stable for the dict's lifetime. `len()` is maintained by lock-free
/// atomics alongside the shard maps rather than transactionally with
/// them, so it can lag a concurrent mutation by an instant; with the
/// dict at rest it is exact.
#[derive(Debug)]
pub struct ConcurrentDict<V> {
    shards: Vec<Shard<V>>,
    len: AtomicUsize,
}

impl<V> ConcurrentDict<V> {
    /// Creates a dict with the default shard count.
    pub fn new() -> Self {
        Self::with_shard_count(MIN_SHARDS)
    }

    /// Creates a dict sized from a shard-count hint. The allocated count
    /// is the smallest power of two covering the hint, never below
    /// [`MIN_SHARDS`].
    pub fn with_shard_count(hint: usize) -> Self {
        let size = table_size_for(hint);
        let shards = (0..size).map(|_| Shard::new()).collect();
        debug!(shards = size, "created concurrent dict");
        Self {
            shards,
            len: AtomicUsize::new(0),
        }
    }

    /// Number of shards in the routing table.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard index for `key`. Valid as a mask because the table length
    /// is always a power of two.
    fn shard_index(&self, key: &[u8]) -> usize {
        (fnv32(key) as usize) & (self.shards.len() - 1)
    }

    fn shard_for(&self, key: &[u8]) -> &Shard<V> {
        &self.shards[self.shard_index(key)]
    }

    /// Current number of live keys.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upserts `key`, returning `true` iff it was newly created. The
    /// counter update happens after the shard lock is released.
    pub fn put(&self, key: Bytes, val: V) -> bool {
        let created = {
            let mut guard = self.shard_for(&key).entries.write();
            guard.insert(key, val).is_none()
        };
        if created {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        created
    }

    /// Inserts only when `key` is absent; an existing value is left
    /// untouched. Returns `true` iff it inserted.
    pub fn put_if_absent(&self, key: Bytes, val: V) -> bool {
        let inserted = {
            let mut guard = self.shard_for(&key).entries.write();
            match guard.entry(key) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(val);
                    true
                }
            }
        };
        if inserted {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        inserted
    }

    /// Overwrites only when `key` is present; never creates the key.
    /// Returns `true` iff it updated.
    pub fn put_if_exists(&self, key: Bytes, val: V) -> bool {
        let mut guard = self.shard_for(&key).entries.write();
        if let Some(slot) = guard.get_mut(&key[..]) {
            *slot = val;
            true
        } else {
            false
        }
    }

    /// Deletes `key` if present, returning `true` iff a key was removed.
    /// Pairs a counter decrement with every successful removal so that
    /// `len()` tracks the live keyspace on both mutation paths.
    pub fn remove(&self, key: &[u8]) -> bool {
        let removed = {
            let mut guard = self.shard_for(key).entries.write();
            guard.remove(key).is_some()
        };
        if removed {
            self.len.fetch_sub(1, Ordering::Relaxed);
        }
        removed
    }

    /// Visits every entry until the visitor returns `false`.
    ///
    /// Each shard's read lock is held for that shard's entire traversal,
    /// so no mutation is observed mid-shard; there is no cross-shard
    /// snapshot. The visitor must not call back into this dict while the
    /// walk is in progress.
    pub fn for_each(&self, visitor: Visitor<'_, V>) {
        for shard in &self.shards {
            let guard = shard.entries.read();
            for (key, val) in guard.iter() {
                if !visitor(key, val) {
                    return;
                }
            }
        }
    }

    /// All keys, in unspecified order.
    pub fn keys(&self) -> Vec<Bytes> {
        let mut keys = Vec::with_capacity(self.len());
        self.for_each(&mut |key, _| {
            keys.push(key.clone());
            true
        });
        keys
    }

    /// `limit` keys drawn with replacement: a uniformly random shard,
    /// then a uniformly random key inside it. Empty shards yield no pick
    /// and are retried. When `limit` covers the whole dict this returns
    /// every key once each instead.
    pub fn random_keys(&self, limit: usize) -> Vec<Bytes> {
        if limit >= self.len() {
            return self.keys();
        }
        let mut rng = SmallRng::from_entropy();
        let shard_count = self.shards.len();
        let mut picked = Vec::with_capacity(limit);
        while picked.len() < limit {
            let shard = &self.shards[rng.gen_range(0..shard_count)];
            if let Some(key) = shard.random_key(&mut rng) {
                picked.push(key);
            }
        }
        picked
    }

    /// Like [`random_keys`](Self::random_keys) but deduplicating:
    /// accumulates uniform picks until `limit` distinct keys are held.
    pub fn random_distinct_keys(&self, limit: usize) -> Vec<Bytes> {
        if limit >= self.len() {
            return self.keys();
        }
        let mut rng = SmallRng::from_entropy();
        let shard_count = self.shards.len();
        let mut picked = HashSet::with_capacity(limit);
        while picked.len() < limit {
            let shard = &self.shards[rng.gen_range(0..shard_count)];
            if let Some(key) = shard.random_key(&mut rng) {
                picked.insert(key);
            }
        }
        picked.into_iter().collect()
    }
}

impl<V: Clone> ConcurrentDict<V> {
    /// Looks up `key` under the owning shard's read lock.
    pub fn get(&self, key: &[u8]) -> Option<V> {
        let guard = self.shard_for(key).entries.read();
        guard.get(key).cloned()
    }
}

impl<V> Default for ConcurrentDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Dict<V> for ConcurrentDict<V> {
    fn get(&self, key: &[u8]) -> Option<V> {
        ConcurrentDict::get(self, key)
    }

    fn len(&self) -> usize {
        ConcurrentDict::len(self)
    }

    fn put(&mut self, key: Bytes, val: V) -> bool {
        ConcurrentDict::put(self, key, val)
    }

    fn put_if_absent(&mut self, key: Bytes, val: V) -> bool {
        ConcurrentDict::put_if_absent(self, key, val)
    }

    fn put_if_exists(&mut self, key: Bytes, val: V) -> bool {
        ConcurrentDict::put_if_exists(self, key, val)
    }

    fn remove(&mut self, key: &[u8]) -> bool {
        ConcurrentDict::remove(self, key)
    }

    fn for_each(&self, visitor: Visitor<'_, V>) {
        ConcurrentDict::for_each(self, visitor)
    }

    fn keys(&self) -> Vec<Bytes> {
        ConcurrentDict::keys(self)
    }

    fn random_keys(&self, limit: usize) -> Vec<Bytes> {
        ConcurrentDict::random_keys(self, limit)
    }

    fn random_distinct_keys(&self, limit: usize) -> Vec<Bytes> {
        ConcurrentDict::random_distinct_keys(self, limit)
    }
}
