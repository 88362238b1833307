//! # Display Names
//!
//! Composite string values built from highly repetitive fragments
//! ("John Doe", "Jane Doe"). Two representations with one observable
//! contract:
//!
//! - [`InternedName`] stores token ids into a shared [`TokenInterner`],
//!   so a repeated fragment costs one table slot no matter how many names
//!   use it
//! - [`PlainName`] stores the whole string, the baseline the interned
//!   form is measured against
//!
//! Both normalize whitespace on construction (fragments split on any
//! whitespace run, rejoined with single spaces), so `full()` agrees
//! between the two for any input.

use hydra_cache::{TokenId, TokenInterner};

/// A display name stored as fragment ids into a shared interner.
///
/// The interner is passed explicitly at both construction and read time;
/// names built against one interner are only meaningful with that
/// interner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternedName {
    tokens: Vec<TokenId>,
}

impl InternedName {
    /// Interns each whitespace-separated fragment of `full` and records
    /// the ids.
    #[must_use]
    pub fn new(interner: &TokenInterner, full: &str) -> Self {
        Self {
            tokens: full.split_whitespace().map(|f| interner.intern(f)).collect(),
        }
    }

    /// Reconstructs the full name by resolving each id and joining with
    /// single spaces.
    ///
    /// Ids issued by `interner` always resolve; fragments from a foreign
    /// interner are skipped.
    #[must_use]
    pub fn full(&self, interner: &TokenInterner) -> String {
        let fragments: Vec<_> = self
            .tokens
            .iter()
            .filter_map(|&id| interner.resolve(id))
            .collect();
        fragments.join(" ")
    }

    /// Number of fragments in this name.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// The recorded fragment ids, in name order.
    #[must_use]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }
}

/// The non-shared baseline: owns its whole string.
///
/// Whitespace-normalized on construction so it reconstructs identically
/// to [`InternedName`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlainName {
    full: String,
}

impl PlainName {
    /// Stores a normalized copy of `full`.
    #[must_use]
    pub fn new(full: &str) -> Self {
        Self {
            full: full.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }

    /// The stored name.
    #[must_use]
    pub fn full(&self) -> &str {
        &self.full
    }
}
