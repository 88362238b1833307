//! # HYDRA Units
//!
//! The game layer over the flyweight core: unit archetypes (shared,
//! immutable), unit contexts (private, mutable), and display names
//! (fragment-interned or plain).
//!
//! ## Design Principles
//!
//! 1. **Intrinsic vs extrinsic** - kind data (name, sprite, stats) is
//!    shared once per archetype; position, hp, and id are per unit
//! 2. **External configuration** - archetype catalogs load from TOML
//! 3. **No globals** - registries and interners are constructed by the
//!    process entry point and passed by handle
//!
//! ## Example
//!
//! ```rust,ignore
//! use hydra_units::{ArchetypeCatalog, ArchetypeRegistry, UnitSpawner};
//!
//! let registry = ArchetypeRegistry::new(ArchetypeCatalog::builtin());
//! let spawner = UnitSpawner::new(registry);
//! let mut zombie = spawner.spawn("zombie", 10.0, 20.0)?;
//! zombie.move_to(5.0, 5.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod archetype;
pub mod name;
pub mod unit;

pub use archetype::{
    ArchetypeCatalog, ArchetypeDef, ArchetypeRegistry, CatalogError, UnitArchetype,
};
pub use name::{InternedName, PlainName};
pub use unit::{Unit, UnitId, UnitSpawner};
