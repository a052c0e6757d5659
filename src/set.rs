// src/set.rs

//! Set semantics over a [`Dict`] backing store: each member is a key
//! whose value is a unit presence marker.

use crate::dict::{ConcurrentDict, Dict, SimpleDict};
use bytes::Bytes;

/// A set of binary-safe strings backed by one owned [`Dict<()>`].
///
/// A member is in the set iff it is a key of the backing dict. The
/// backing implementation is chosen at construction: [`Set::new`] for
/// single-owner use, [`Set::concurrent`] where the set is shared.
pub struct Set {
    dict: Box<dyn Dict<()>>,
}

impl Set {
    /// Empty set over an unsynchronized backing dict.
    pub fn new() -> Self {
        Self {
            dict: Box::new(SimpleDict::new()),
        }
    }

    /// Empty set over a lock-striped backing dict sized from
    /// `shard_hint`.
    pub fn concurrent(shard_hint: usize) -> Self {
        Self {
            dict: Box::new(ConcurrentDict::with_shard_count(shard_hint)),
        }
    }

    /// Builds a concurrent-backed set holding `members`, sized from the
    /// member count.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
    {
        let members: Vec<Bytes> = members.into_iter().collect();
        let mut set = Self::concurrent(members.len());
        for member in members {
            set.add(member);
        }
        set
    }

    /// Current number of members.
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Adds `member`, returning `true` iff it was not already present.
    pub fn add(&mut self, member: Bytes) -> bool {
        self.dict.put_if_absent(member, ())
    }

    /// Removes `member`, returning `true` iff it was present.
    pub fn remove(&mut self, member: &[u8]) -> bool {
        self.dict.remove(member)
    }

    pub fn contains(&self, member: &[u8]) -> bool {
        self.dict.get(member).is_some()
    }

    /// All members, in unspecified order.
    pub fn to_vec(&self) -> Vec<Bytes> {
        self.dict.keys()
    }

    /// Visits every member until the visitor returns `false`.
    pub fn for_each(&self, visitor: &mut dyn FnMut(&Bytes) -> bool) {
        self.dict.for_each(&mut |member, _| visitor(member));
    }

    /// Members present in both `self` and `other`, as a new set. Walks
    /// the smaller operand and probes the larger; neither operand is
    /// mutated.
    pub fn intersect(&self, other: &Set) -> Set {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = Set::new();
        small.for_each(&mut |member| {
            if large.contains(member) {
                result.add(member.clone());
            }
            true
        });
        result
    }

    /// Members present in either operand, as a new set populated from
    /// both. Neither operand is mutated.
    pub fn union(&self, other: &Set) -> Set {
        let mut result = Set::new();
        self.for_each(&mut |member| {
            result.add(member.clone());
            true
        });
        other.for_each(&mut |member| {
            result.add(member.clone());
            true
        });
        result
    }

    /// Members of `self` absent from `other`, as a new set.
    pub fn diff(&self, other: &Set) -> Set {
        let mut result = Set::new();
        self.for_each(&mut |member| {
            if !other.contains(member) {
                result.add(member.clone());
            }
            true
        });
        result
    }

    /// `limit` members drawn with replacement (every member once each
    /// when `limit` covers the whole set).
    pub fn random_members(&self, limit: usize) -> Vec<Bytes> {
        self.dict.random_keys(limit)
    }

    /// Up to `limit` members with no repeats.
    pub fn random_distinct_members(&self, limit: usize) -> Vec<Bytes> {
        self.dict.random_distinct_keys(limit)
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}
