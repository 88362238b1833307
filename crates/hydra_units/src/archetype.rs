//! # Unit Archetypes
//!
//! The shared half of a unit: everything identical across all units of one
//! kind lives in a [`UnitArchetype`], allocated once per kind and handed
//! out behind `Arc`. The recognized kinds form a catalog, loaded from an
//! external TOML file or from the builtin fallback set.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use hydra_cache::{CacheResult, SharedRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading an archetype catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog file could not be read or parsed.
    #[error("invalid catalog: {0}")]
    InvalidConfig(String),

    /// Two definitions in one document claim the same key.
    #[error("duplicate archetype key: {0}")]
    DuplicateArchetype(String),
}

/// Immutable per-kind attribute data shared by every unit of that kind.
///
/// Constructed once per distinct key by [`ArchetypeRegistry`], read-only
/// thereafter. Contexts hold `Arc<UnitArchetype>` and never copy it.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitArchetype {
    /// Kind name shown in composite reads ("Zombie", "Bat").
    pub name: String,
    /// Visual asset reference.
    pub sprite: String,
    /// Base movement speed in world units per second.
    pub move_speed: f32,
    /// Hit points a fresh unit of this kind starts with.
    pub max_hp: u32,
}

/// One catalog row: an archetype definition keyed for lookup.
///
/// This is the serde-facing shape; the key is stripped off when the row
/// becomes a shared [`UnitArchetype`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeDef {
    /// Lookup key units spawn by ("zombie").
    pub key: String,
    /// Kind name shown to players.
    pub name: String,
    /// Visual asset reference.
    pub sprite: String,
    /// Base movement speed in world units per second.
    pub move_speed: f32,
    /// Starting hit points.
    pub max_hp: u32,
}

/// TOML document shape: a list of `[[archetype]]` tables.
#[derive(Deserialize)]
struct CatalogDoc {
    archetype: Vec<ArchetypeDef>,
}

/// The recognized kind domain: key to archetype definition.
///
/// A catalog is pure data. It becomes the construction recipe of an
/// [`ArchetypeRegistry`]; keys absent from the catalog are unrecognized.
#[derive(Clone, Debug, Default)]
pub struct ArchetypeCatalog {
    defs: HashMap<String, UnitArchetype>,
}

impl ArchetypeCatalog {
    /// The builtin fallback set: zombie, bat, brute.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert_unchecked("zombie", "Zombie", "zombie.png", 1.0, 100);
        catalog.insert_unchecked("bat", "Bat", "bat.png", 2.5, 50);
        catalog.insert_unchecked("brute", "Brute", "brute.png", 0.6, 250);
        catalog
    }

    /// Builds a catalog from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateArchetype`] if two definitions
    /// share a key.
    pub fn from_defs(defs: Vec<ArchetypeDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for def in defs {
            let archetype = UnitArchetype {
                name: def.name,
                sprite: def.sprite,
                move_speed: def.move_speed,
                max_hp: def.max_hp,
            };
            if catalog.defs.insert(def.key.clone(), archetype).is_some() {
                return Err(CatalogError::DuplicateArchetype(def.key));
            }
        }
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// Expected shape:
    ///
    /// ```toml
    /// [[archetype]]
    /// key = "zombie"
    /// name = "Zombie"
    /// sprite = "zombie.png"
    /// move_speed = 1.0
    /// max_hp = 100
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] on malformed TOML and
    /// [`CatalogError::DuplicateArchetype`] on repeated keys.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc =
            toml::from_str(text).map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;
        Self::from_defs(doc.archetype)
    }

    /// Loads a catalog from a TOML file. Done once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] if the file cannot be read
    /// or parsed, [`CatalogError::DuplicateArchetype`] on repeated keys.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::info!(
            "Loaded archetype catalog: {} kinds from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Number of recognized kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if the catalog recognizes no kind at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterates over the recognized keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    fn insert_unchecked(&mut self, key: &str, name: &str, sprite: &str, speed: f32, hp: u32) {
        self.defs.insert(
            key.to_string(),
            UnitArchetype {
                name: name.to_string(),
                sprite: sprite.to_string(),
                move_speed: speed,
                max_hp: hp,
            },
        );
    }
}

/// The archetype flyweight registry: one shared [`UnitArchetype`] per
/// recognized key, created on first spawn of that kind.
///
/// Wraps a [`SharedRegistry`] whose recipe is catalog lookup. No eviction;
/// a created archetype lives as long as the registry.
pub struct ArchetypeRegistry {
    inner: SharedRegistry<String, UnitArchetype>,
}

impl ArchetypeRegistry {
    /// Creates a registry recognizing exactly the kinds in `catalog`.
    ///
    /// The catalog is consumed; the registry is the sole arbiter of kind
    /// sameness from here on.
    #[must_use]
    pub fn new(catalog: ArchetypeCatalog) -> Self {
        Self {
            inner: SharedRegistry::new(move |key: &String| catalog.defs.get(key).cloned()),
        }
    }

    /// Returns the canonical shared archetype for `key`, creating it on
    /// first request.
    ///
    /// # Errors
    ///
    /// Returns [`hydra_cache::CacheError::UnrecognizedKey`] for keys the
    /// catalog does not cover.
    pub fn get(&self, key: &str) -> CacheResult<Arc<UnitArchetype>> {
        self.inner.get_or_create(&key.to_string())
    }

    /// Number of distinct archetypes created so far.
    ///
    /// Counts materialized kinds, not catalog size: a kind never spawned
    /// is never allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no archetype has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
