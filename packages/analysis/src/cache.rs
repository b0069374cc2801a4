//! Bounded insertion-order cache.
//!
//! Resolving a class name to its CSS declarations is expensive (it calls out
//! to the rule-generation engine), so resolved results are memoized here.
//! Eviction is strict insertion-order FIFO once the cap is reached; a read
//! re-inserts the entry at the back, approximating LRU.
//!
//! Single-threaded by contract: one cache belongs to one loader/context per
//! active configuration. A host embedding this in a concurrent server must
//! add its own synchronization at the boundary.

use std::hash::Hash;

use indexmap::IndexMap;

pub const DEFAULT_CAPACITY: usize = 16_000;

#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    entries: IndexMap<K, V>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Fetch an entry, moving it to the back of the eviction order.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.entries.shift_remove(key)?;
        let (index, _) = self.entries.insert_full(key.clone(), value);
        self.entries.get_index(index).map(|(_, v)| v)
    }

    /// Insert an entry, evicting from the front when full. Re-inserting an
    /// existing key moves it to the back.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }
}

impl<K: Hash + Eq + Clone, V> Default for BoundedCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
