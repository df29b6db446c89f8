// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Borrowed form of a cache key, compared against stored keys without
/// allocating an owned key for every lookup.
pub(crate) trait LookupKey<K> {
    fn matches(&self, key: &K) -> bool;
    fn to_key(self) -> K;
}

struct Slot<K, T> {
    epoch: u64,
    key: K,
    value: T,
}

/// A least-recently-used cache with a linear scan over its slots.
///
/// Meant for tens of entries, where a scan beats hashing the key.
pub(crate) struct LruCache<K, T> {
    slots: Vec<Slot<K, T>>,
    epoch: u64,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, T> LruCache<K, T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            epoch: 0,
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the value stored for `key`, creating it with `make` on a miss.
    /// A miss evicts the slot touched longest ago once the cache is full.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: impl LookupKey<K>,
        make: impl FnOnce() -> T,
    ) -> &T {
        self.epoch += 1;
        let epoch = self.epoch;
        let index = match self.slots.iter().position(|slot| key.matches(&slot.key)) {
            Some(index) => {
                self.hits += 1;
                index
            }
            None => {
                self.misses += 1;
                self.insert(key.to_key(), make())
            }
        };
        let slot = &mut self.slots[index];
        slot.epoch = epoch;
        &slot.value
    }

    fn insert(&mut self, key: K, value: T) -> usize {
        let slot = Slot {
            epoch: self.epoch,
            key,
            value,
        };
        if self.slots.len() < self.capacity {
            self.slots.push(slot);
            return self.slots.len() - 1;
        }
        let oldest = self
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.epoch)
            .map_or(0, |(index, _)| index);
        self.slots[oldest] = slot;
        oldest
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `(hits, misses)` since creation or the last clear.
    pub(crate) fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
