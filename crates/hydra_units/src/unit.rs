//! # Unit Contexts
//!
//! The private half of a unit: position, hit points, and identity. A unit
//! holds an `Arc` to its shared [`UnitArchetype`] and composes readings
//! from the two halves on demand. Mutating a unit never touches the
//! archetype and never affects sibling units of the same kind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hydra_cache::CacheResult;

use crate::archetype::{ArchetypeRegistry, UnitArchetype};

/// Unique identifier for a spawned unit.
///
/// Ids are never reused within one spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct UnitId(u64);

impl UnitId {
    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A spawned unit: one shared archetype reference plus private state.
///
/// The archetype is read-only through the `Arc`; everything mutable here
/// is extrinsic and belongs to this unit alone.
#[derive(Clone, Debug)]
pub struct Unit {
    id: UnitId,
    archetype: Arc<UnitArchetype>,
    x: f32,
    y: f32,
    hp: u32,
}

impl Unit {
    /// This unit's identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// The shared archetype this unit was spawned from.
    #[inline]
    #[must_use]
    pub fn archetype(&self) -> &Arc<UnitArchetype> {
        &self.archetype
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Current hit points.
    #[inline]
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Returns `true` while the unit has hit points left.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Moves the unit to a new position. Extrinsic only.
    #[inline]
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Applies damage, saturating at zero.
    #[inline]
    pub fn apply_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Current movement speed, derived on read from the shared base speed
    /// and this unit's wounds. Never cached.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_speed(&self) -> f32 {
        let fraction = self.hp as f32 / self.archetype.max_hp.max(1) as f32;
        self.archetype.move_speed * (0.5 + 0.5 * fraction)
    }

    /// One-line status combining shared and private state, composed on
    /// read: `Zombie #3 at (5.0, 5.0) HP 40/100 [zombie.png]`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "{} #{} at ({:.1}, {:.1}) HP {}/{} [{}]",
            self.archetype.name,
            self.id.0,
            self.x,
            self.y,
            self.hp,
            self.archetype.max_hp,
            self.archetype.sprite,
        )
    }
}

/// Spawns units, resolving archetypes through a shared registry.
///
/// An explicit object with its own id counter - constructed by the process
/// entry point and passed by handle, never a process-wide singleton.
pub struct UnitSpawner {
    archetypes: ArchetypeRegistry,
    next_id: AtomicU64,
}

impl UnitSpawner {
    /// Creates a spawner over the given archetype registry.
    #[must_use]
    pub fn new(archetypes: ArchetypeRegistry) -> Self {
        Self {
            archetypes,
            next_id: AtomicU64::new(0),
        }
    }

    /// Spawns a unit of kind `key` at the given position.
    ///
    /// First spawn of a kind creates its shared archetype; every later
    /// spawn of the same kind reuses it. Hit points start at the
    /// archetype's `max_hp`.
    ///
    /// # Errors
    ///
    /// Returns [`hydra_cache::CacheError::UnrecognizedKey`] for kinds the
    /// catalog does not cover; nothing is spawned or cached.
    pub fn spawn(&self, key: &str, x: f32, y: f32) -> CacheResult<Unit> {
        let archetype = self.archetypes.get(key)?;
        let id = UnitId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::debug!("Spawned {} #{} at ({x}, {y})", archetype.name, id.0);
        Ok(Unit {
            id,
            hp: archetype.max_hp,
            archetype,
            x,
            y,
        })
    }

    /// The archetype registry backing this spawner.
    #[must_use]
    pub fn archetypes(&self) -> &ArchetypeRegistry {
        &self.archetypes
    }
}
