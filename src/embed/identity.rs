//! Reference-identity keyed concurrent maps.
//!
//! Symbols are looked up by the identity of the `Arc` the binding hands out, never by value:
//! two structurally identical symbols coming from different assemblies must map to different
//! embedded definitions. The map keeps the symbol `Arc` alive next to its entry so that the
//! address used as key cannot be reused while the entry exists.

use std::{fmt, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::Result;

/// Identity of a symbol, derived from the address of its shared allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(usize);

impl SymbolKey {
    /// The key of a shared symbol
    #[must_use]
    pub fn of<T>(symbol: &Arc<T>) -> Self {
        SymbolKey(Arc::as_ptr(symbol).cast::<()>() as usize)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

struct IdentityEntry<S, V> {
    _symbol: Arc<S>,
    value: Arc<V>,
}

/// Concurrent get-or-create map from a symbol to the definition created for it
pub struct IdentityMap<S, V> {
    entries: DashMap<SymbolKey, IdentityEntry<S, V>>,
}

impl<S, V> Default for IdentityMap<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, V> IdentityMap<S, V> {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        IdentityMap {
            entries: DashMap::new(),
        }
    }

    /// The value registered for `symbol`, if any
    pub fn get(&self, symbol: &Arc<S>) -> Option<Arc<V>> {
        self.entries
            .get(&SymbolKey::of(symbol))
            .map(|entry| entry.value.clone())
    }

    /// Returns true if a value is registered for `symbol`
    pub fn contains(&self, symbol: &Arc<S>) -> bool {
        self.entries.contains_key(&SymbolKey::of(symbol))
    }

    /// Return the registered value for `symbol`, creating and registering one if needed.
    ///
    /// `create` runs without any lock held, so it may re-enter the map (and other maps). If a
    /// concurrent caller registers first, the candidate is dropped and the registered value is
    /// returned. The flag is true only for the caller whose candidate got registered.
    ///
    /// # Errors
    /// Returns the error of `create`; nothing is registered in that case.
    pub fn get_or_try_insert_with<F>(&self, symbol: &Arc<S>, create: F) -> Result<(Arc<V>, bool)>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(existing) = self.get(symbol) {
            return Ok((existing, false));
        }

        let candidate = Arc::new(create()?);
        match self.entries.entry(SymbolKey::of(symbol)) {
            Entry::Occupied(entry) => Ok((entry.get().value.clone(), false)),
            Entry::Vacant(entry) => {
                entry.insert(IdentityEntry {
                    _symbol: symbol.clone(),
                    value: candidate.clone(),
                });
                Ok((candidate, true))
            }
        }
    }

    /// Snapshot of all registered values, in unspecified order
    pub fn values(&self) -> Vec<Arc<V>> {
        self.entries
            .iter()
            .map(|entry| entry.value().value.clone())
            .collect()
    }

    /// Number of registered values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_not_value() {
        let map: IdentityMap<String, usize> = IdentityMap::new();
        let a = Arc::new("IWidget".to_string());
        let b = Arc::new("IWidget".to_string());

        let (first, created) = map.get_or_try_insert_with(&a, || Ok(1)).unwrap();
        assert!(created);
        assert_eq!(*first, 1);

        let (second, created) = map.get_or_try_insert_with(&b, || Ok(2)).unwrap();
        assert!(created);
        assert_eq!(*second, 2);
        assert_eq!(map.len(), 2);

        assert_ne!(SymbolKey::of(&a), SymbolKey::of(&b));
        assert_eq!(SymbolKey::of(&a), SymbolKey::of(&a.clone()));
    }

    #[test]
    fn test_existing_value_is_returned() {
        let map: IdentityMap<u32, String> = IdentityMap::new();
        let symbol = Arc::new(7);

        let (first, _) = map
            .get_or_try_insert_with(&symbol, || Ok("first".to_string()))
            .unwrap();
        let (second, created) = map
            .get_or_try_insert_with(&symbol, || Ok("second".to_string()))
            .unwrap();

        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(map.contains(&symbol));
    }

    #[test]
    fn test_failed_creation_registers_nothing() {
        let map: IdentityMap<u32, u32> = IdentityMap::new();
        let symbol = Arc::new(1);

        let result = map.get_or_try_insert_with(&symbol, || Err(unreachable_error!("no accessor")));
        assert!(result.is_err());
        assert!(map.is_empty());
        assert!(map.get(&symbol).is_none());
    }

    #[test]
    fn test_concurrent_callers_share_one_value() {
        let map: IdentityMap<u32, usize> = IdentityMap::new();
        let symbol = Arc::new(42);

        let results: Vec<(Arc<usize>, bool)> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let (map, symbol) = (&map, &symbol);
                    s.spawn(move || map.get_or_try_insert_with(symbol, || Ok(i)).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|(_, created)| *created).count(), 1);
        for (value, _) in &results {
            assert!(Arc::ptr_eq(value, &results[0].0));
        }
    }
}
