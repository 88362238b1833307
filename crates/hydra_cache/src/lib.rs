//! # HYDRA Cache
//!
//! Flyweight storage primitives: share intrinsic state, keep extrinsic
//! state private.
//!
//! ## Architecture Rules
//!
//! 1. **One instance per key** - a distinct key allocates its shared value
//!    exactly once, for the lifetime of the registry
//! 2. **Shared values are immutable** - nothing hands out `&mut` to a
//!    cached value; contexts hold cheap `Arc` clones
//! 3. **Get-or-create is atomic** - racing callers for a new key all
//!    observe the single winning insertion
//!
//! ## Example
//!
//! ```rust,ignore
//! use hydra_cache::SharedRegistry;
//!
//! let registry = SharedRegistry::new(|key: &String| Some(key.to_uppercase()));
//! let a = registry.get_or_create(&"zombie".to_string())?;
//! let b = registry.get_or_create(&"zombie".to_string())?;
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod interner;
pub mod registry;

pub use error::{CacheError, CacheResult};
pub use interner::{TokenId, TokenInterner};
pub use registry::SharedRegistry;
