//! # Shared Registry
//!
//! The single source of truth mapping a key to its canonical shared value.
//!
//! A registry is constructed with a *recipe*: a pure function from key to
//! value that defines the domain of recognized keys. The first request for
//! a key runs the recipe and caches the result behind an [`Arc`]; every
//! later request for an equal key returns a clone of that same `Arc`, so
//! all holders share one allocation.
//!
//! Entries are permanent. There is no removal or eviction - the registry
//! owns its values until it is dropped.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CacheError, CacheResult};

/// Construction recipe: maps a key to its shared value, or `None` when the
/// key is outside the recognized domain.
type Recipe<K, V> = Box<dyn Fn(&K) -> Option<V> + Send + Sync>;

/// A keyed store of shared immutable values with atomic get-or-create.
///
/// # Concurrency
///
/// All operations take `&self`. Lookups of already-cached keys take only a
/// read lock and do not block each other. Insertion of a first-seen key
/// takes the write lock, re-checks for a racing insertion, and runs the
/// recipe while holding the lock, so exactly one value per key can ever
/// exist and every racing caller observes the same `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// let registry: SharedRegistry<String, Sprite> =
///     SharedRegistry::new(|key| Sprite::load(key));
/// let sprite = registry.get_or_create(&"zombie".to_string())?;
/// ```
pub struct SharedRegistry<K, V> {
    /// Canonical value per key. Append-only.
    entries: RwLock<HashMap<K, Arc<V>>>,
    /// Fixed at construction; defines the recognized key domain.
    recipe: Recipe<K, V>,
}

impl<K, V> SharedRegistry<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    /// Creates an empty registry backed by the given construction recipe.
    ///
    /// The recipe must be pure: for a fixed key it must always describe the
    /// same value, since it runs at most once per key.
    ///
    /// # Arguments
    ///
    /// * `recipe` - Returns the value for a key, or `None` for keys outside
    ///   the recognized domain.
    #[must_use]
    pub fn new<F>(recipe: F) -> Self
    where
        F: Fn(&K) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            entries: RwLock::new(HashMap::new()),
            recipe: Box::new(recipe),
        }
    }

    /// Returns the canonical shared value for `key`, creating it on first
    /// request.
    ///
    /// Repeated calls with equal keys are idempotent and return clones of
    /// the same `Arc` (pointer-equal, not merely value-equal).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnrecognizedKey`] when the recipe does not
    /// cover `key`. Failed keys are never cached, so a later call fails
    /// identically rather than observing a sentinel entry.
    pub fn get_or_create(&self, key: &K) -> CacheResult<Arc<V>> {
        // Fast path: shared lock only, no blocking between readers.
        if let Some(value) = self.entries.read().get(key) {
            return Ok(Arc::clone(value));
        }

        let mut entries = self.entries.write();
        // Re-check: another caller may have won the race for the write lock.
        if let Some(value) = entries.get(key) {
            return Ok(Arc::clone(value));
        }

        let value = (self.recipe)(key).ok_or_else(|| CacheError::UnrecognizedKey {
            key: key.to_string(),
        })?;
        let value = Arc::new(value);
        let previous = entries.insert(key.clone(), Arc::clone(&value));
        debug_assert!(previous.is_none(), "two flyweights cached for one key");
        Ok(value)
    }

    /// Returns `true` if a value for `key` has already been created.
    ///
    /// Never runs the recipe.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of distinct values currently cached.
    ///
    /// Non-decreasing over the registry lifetime; grows by exactly one on
    /// each first-seen recognized key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no value has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper_registry() -> SharedRegistry<String, String> {
        SharedRegistry::new(|key: &String| {
            if key.chars().all(char::is_alphabetic) {
                Some(key.to_uppercase())
            } else {
                None
            }
        })
    }

    #[test]
    fn test_identity_dedup() {
        let registry = upper_registry();
        let key = "zombie".to_string();

        let first = registry.get_or_create(&key).unwrap();
        let second = registry.get_or_create(&key).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_keys_distinct_values() {
        let registry = upper_registry();

        let zombie = registry.get_or_create(&"zombie".to_string()).unwrap();
        let bat = registry.get_or_create(&"bat".to_string()).unwrap();

        assert!(!Arc::ptr_eq(&zombie, &bat));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_count_monotonic() {
        let registry = upper_registry();
        assert!(registry.is_empty());

        registry.get_or_create(&"zombie".to_string()).unwrap();
        assert_eq!(registry.len(), 1);

        // Repeat request does not grow the table.
        registry.get_or_create(&"zombie".to_string()).unwrap();
        assert_eq!(registry.len(), 1);

        registry.get_or_create(&"bat".to_string()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unrecognized_key_not_cached() {
        let registry = upper_registry();

        let err = registry.get_or_create(&"bad key 1".to_string()).unwrap_err();
        assert_eq!(
            err,
            CacheError::UnrecognizedKey {
                key: "bad key 1".to_string()
            }
        );

        // Failure left no sentinel behind and fails again the same way.
        assert!(registry.is_empty());
        assert!(!registry.contains(&"bad key 1".to_string()));
        assert!(registry.get_or_create(&"bad key 1".to_string()).is_err());
    }

    #[test]
    fn test_empty_key_is_ordinary() {
        let registry = SharedRegistry::new(|key: &String| Some(format!("<{key}>")));

        let empty = registry.get_or_create(&String::new()).unwrap();
        let again = registry.get_or_create(&String::new()).unwrap();

        assert!(Arc::ptr_eq(&empty, &again));
        assert_eq!(*empty, "<>");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_recipe_runs_once_per_key() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let registry = SharedRegistry::new(move |key: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(key.clone())
        });

        for _ in 0..10 {
            registry.get_or_create(&"brute".to_string()).unwrap();
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
