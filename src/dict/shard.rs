// src/dict/shard.rs

//! A `Shard` is one independently lockable partition of a
//! [`ConcurrentDict`](super::ConcurrentDict)'s keyspace.

use bytes::Bytes;
use parking_lot::RwLock;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use std::collections::HashMap;

/// One lock-striped slice of the keyspace. A shard is owned by exactly
/// one dict, its lock is never held across another shard's operation,
/// and its map is never exposed past an operation boundary.
#[derive(Debug)]
pub(super) struct Shard<V> {
    pub(super) entries: RwLock<HashMap<Bytes, V>>,
}

impl<V> Shard<V> {
    pub(super) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Picks one key uniformly among the shard's current entries, or
    /// `None` if the shard is empty. The pick is an explicit uniform
    /// choice over the key set, not an artifact of map iteration order.
    pub(super) fn random_key(&self, rng: &mut SmallRng) -> Option<Bytes> {
        let guard = self.entries.read();
        guard.keys().choose(rng).cloned()
    }
}
