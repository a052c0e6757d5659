// src/dict/mod.rs

//! The dictionary capability contract and its implementations.
//!
//! [`Dict`] is the operation set every key/value container in the engine
//! must support. Two implementations exist: [`SimpleDict`], a plain
//! unsynchronized map for single-owner contexts, and [`ConcurrentDict`],
//! the lock-striped map that backs the shared keyspace.

pub mod concurrent;
mod shard;
pub mod simple;

pub use concurrent::ConcurrentDict;
pub use simple::SimpleDict;

use bytes::Bytes;

/// Continuation-style visitor for [`Dict::for_each`]. Returning `false`
/// stops the enumeration immediately, even part-way through a shard.
pub type Visitor<'a, V> = &'a mut dyn FnMut(&Bytes, &V) -> bool;

/// The operation set every key/value container must support.
///
/// Keys are binary-safe [`Bytes`]; values are opaque to the container.
/// A lookup miss is an ordinary `None`/`false`, never an error, and
/// every mutating operation reports whether it created, overwrote, or
/// left the key unchanged. Enumeration order is unspecified.
pub trait Dict<V>: Send + Sync {
    /// Looks up `key`. No side effects.
    fn get(&self, key: &[u8]) -> Option<V>;

    /// Current number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upserts `key`. Returns `true` iff the key was newly created.
    fn put(&mut self, key: Bytes, val: V) -> bool;

    /// Inserts only when `key` is absent, leaving an existing value
    /// untouched. Returns `true` iff it inserted.
    fn put_if_absent(&mut self, key: Bytes, val: V) -> bool;

    /// Overwrites only when `key` is present; never creates the key.
    /// Returns `true` iff it updated.
    fn put_if_exists(&mut self, key: Bytes, val: V) -> bool;

    /// Deletes `key` if present. Returns `true` iff a key was removed.
    fn remove(&mut self, key: &[u8]) -> bool;

    /// Enumerates all entries until the visitor returns `false`.
    fn for_each(&self, visitor: Visitor<'_, V>);

    /// All keys, in unspecified order.
    fn keys(&self) -> Vec<Bytes>;

    /// `limit` keys drawn uniformly with replacement, or every key once
    /// each when `limit` covers the whole dict.
    fn random_keys(&self, limit: usize) -> Vec<Bytes>;

    /// `min(limit, len())` keys with no repeats.
    fn random_distinct_keys(&self, limit: usize) -> Vec<Bytes>;
}
