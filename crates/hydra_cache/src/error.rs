//! # Cache Error Types
//!
//! All errors that can surface from the flyweight core.

use thiserror::Error;

/// Errors that can occur in the flyweight core.
///
/// A second instance appearing for an already-cached key would be an
/// invariant violation, but it is impossible by construction (insertion
/// happens under one write lock with a re-check) and is guarded by
/// `debug_assert!` rather than an error variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The construction recipe does not cover the requested key.
    ///
    /// Nothing is cached for the key; repeated requests fail the same way.
    #[error("key not recognized by recipe: {key}")]
    UnrecognizedKey {
        /// Display form of the rejected key.
        key: String,
    },
}

/// Result type for flyweight core operations.
pub type CacheResult<T> = Result<T, CacheError>;
