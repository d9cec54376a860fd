use std::hash::Hash;

use indexmap::IndexMap;

/// Request-deduplication cache.
///
/// Each distinct key is resolved at most once, no matter how many times it is
/// requested. Entries keep the order in which keys were first resolved.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns the cached value for `key`, calling `resolve` only on a miss.
    ///
    /// A failed resolution caches nothing.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        resolve: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<&V, E> {
        let entry = self.entries.entry(key);
        match entry {
            indexmap::map::Entry::Occupied(occupied) => Ok(occupied.into_mut()),
            indexmap::map::Entry::Vacant(vacant) => {
                let value = resolve(vacant.key())?;
                Ok(vacant.insert(value))
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: Hash + Eq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
