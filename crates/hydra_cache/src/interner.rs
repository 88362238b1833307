//! # Token Interner
//!
//! Finer-grained deduplication than whole-value flyweights: repeated string
//! fragments (name parts, tag words) are stored once and referenced by a
//! small stable index.
//!
//! The table is append-only. Once a fragment is assigned a [`TokenId`] that
//! id never changes and the sequence is never reordered or compacted, so
//! ids held by long-lived contexts stay valid across later insertions.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Stable index of an interned fragment.
///
/// Ids are issued densely from zero in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TokenId(u32);

impl TokenId {
    /// Returns the raw table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Interner state guarded by one lock: the id table and the reverse map
/// must change together.
struct TokenTable {
    /// Fragments in insertion order. Append-only.
    tokens: Vec<Arc<str>>,
    /// Hashed reverse lookup, fragment to id. The naive form of this table
    /// is a linear scan; hashing preserves the same external contract.
    ids: HashMap<Arc<str>, TokenId>,
}

/// A deduplicating, append-only table of string fragments.
///
/// # Concurrency
///
/// All operations take `&self`. Interning an already-known fragment takes
/// only a read lock; a first-seen fragment takes the write lock and
/// re-checks before appending, so racing callers for the same new fragment
/// all receive the same id and the table grows by one.
///
/// # Example
///
/// ```rust,ignore
/// let interner = TokenInterner::new();
/// let doe_a = interner.intern("Doe");
/// let doe_b = interner.intern("Doe");
/// assert_eq!(doe_a, doe_b);
/// ```
pub struct TokenInterner {
    inner: RwLock<TokenTable>,
}

impl TokenInterner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TokenTable {
                tokens: Vec::new(),
                ids: HashMap::new(),
            }),
        }
    }

    /// Returns the id for `fragment`, appending it on first sight.
    ///
    /// The empty string is an ordinary fragment and receives an id like any
    /// other. Previously issued ids are never invalidated.
    ///
    /// # Panics
    ///
    /// Panics if the table has exhausted the `u32` index space.
    pub fn intern(&self, fragment: &str) -> TokenId {
        if let Some(&id) = self.inner.read().ids.get(fragment) {
            return id;
        }

        let mut table = self.inner.write();
        // Re-check: a racing caller may have appended while we waited.
        if let Some(&id) = table.ids.get(fragment) {
            return id;
        }

        assert!(
            table.tokens.len() < u32::MAX as usize,
            "token table exhausted"
        );
        #[allow(clippy::cast_possible_truncation)]
        let id = TokenId(table.tokens.len() as u32);
        let token: Arc<str> = Arc::from(fragment);
        table.tokens.push(Arc::clone(&token));
        table.ids.insert(token, id);
        id
    }

    /// Resolves an id back to its fragment.
    ///
    /// Returns `None` only for ids this interner never issued.
    #[must_use]
    pub fn resolve(&self, id: TokenId) -> Option<Arc<str>> {
        self.inner.read().tokens.get(id.0 as usize).cloned()
    }

    /// Number of distinct fragments interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().tokens.len()
    }

    /// Returns `true` if nothing has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().tokens.is_empty()
    }
}

impl Default for TokenInterner {
    fn default() -> Self {
        Self::new()
    }
}
