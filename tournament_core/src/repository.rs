//! Keyed storage for creatures and game sessions

use std::collections::HashMap;
use std::hash::Hash;

/// Storage for values addressed by id
///
/// The arena only needs keyed get/put/remove, so sessions can live in memory
/// or behind any store that can hand out references.
pub trait Repository<K, V> {
    fn get(&self, id: &K) -> Option<&V>;

    fn get_mut(&mut self, id: &K) -> Option<&mut V>;

    /// Insert or replace, returning the previous value
    fn put(&mut self, id: K, value: V) -> Option<V>;

    fn remove(&mut self, id: &K) -> Option<V>;

    fn list(&self) -> Vec<&V>;

    fn contains(&self, id: &K) -> bool {
        self.get(id).is_some()
    }
}

/// A repository backed by a `HashMap`
#[derive(Debug, Clone)]
pub struct InMemoryRepository<K, V> {
    items: HashMap<K, V>,
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        InMemoryRepository {
            items: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Eq + Hash, V> Repository<K, V> for InMemoryRepository<K, V> {
    fn get(&self, id: &K) -> Option<&V> {
        self.items.get(id)
    }

    fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        self.items.get_mut(id)
    }

    fn put(&mut self, id: K, value: V) -> Option<V> {
        self.items.insert(id, value)
    }

    fn remove(&mut self, id: &K) -> Option<V> {
        self.items.remove(id)
    }

    fn list(&self) -> Vec<&V> {
        self.items.values().collect()
    }
}
