// src/dict/simple.rs

//! A single-threaded [`Dict`] backed by one unsynchronized map. Used
//! where the caller holds exclusive access, and as the default backing
//! store for a [`Set`](crate::set::Set).

use crate::dict::{Dict, Visitor};
use bytes::Bytes;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug)]
pub struct SimpleDict<V> {
    entries: HashMap<Bytes, V>,
}

impl<V> SimpleDict<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }
}

impl<V> Default for SimpleDict<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Dict<V> for SimpleDict<V> {
    fn get(&self, key: &[u8]) -> Option<V> {
        self.entries.get(key).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn put(&mut self, key: Bytes, val: V) -> bool {
        self.entries.insert(key, val).is_none()
    }

    fn put_if_absent(&mut self, key: Bytes, val: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(val);
                true
            }
        }
    }

    fn put_if_exists(&mut self, key: Bytes, val: V) -> bool {
        if let Some(slot) = self.entries.get_mut(&key[..]) {
            *slot = val;
            true
        } else {
            false
        }
    }

    fn remove(&mut self, key: &[u8]) -> bool {
        self.entries.remove(key).is_some()
    }

    fn for_each(&self, visitor: Visitor<'_, V>) {
        for (key, val) in &self.entries {
            if !visitor(key, val) {
                break;
            }
        }
    }

    fn keys(&self) -> Vec<Bytes> {
        self.entries.keys().cloned().collect()
    }

    /// Uniform picks over a materialized key list; map iteration order
    /// is not a randomness source.
    fn random_keys(&self, limit: usize) -> Vec<Bytes> {
        if limit >= self.entries.len() {
            return self.keys();
        }
        let mut rng = SmallRng::from_entropy();
        let keys: Vec<&Bytes> = self.entries.keys().collect();
        (0..limit)
            .map(|_| keys[rng.gen_range(0..keys.len())].clone())
            .collect()
    }

    fn random_distinct_keys(&self, limit: usize) -> Vec<Bytes> {
        if limit >= self.entries.len() {
            return self.keys();
        }
        let mut rng = SmallRng::from_entropy();
        self.entries.keys().cloned().choose_multiple(&mut rng, limit)
    }
}
