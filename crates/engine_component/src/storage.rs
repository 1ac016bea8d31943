//! Sparse-set component storage.
//!
//! A [`SparseSet`] keeps component values in a dense, contiguous array for
//! cache-friendly iteration, paired with:
//!
//! - a sparse index from [`Entity::index`] to the value's dense slot, and
//! - a reverse array from dense slot back to the owning [`Entity`].
//!
//! Lookup, insertion and removal are all O(1). Removal swaps the last value
//! into the vacated slot, so dense order is not stable across removals.

use crate::entity::Entity;

/// Dense storage for one component kind, addressed by entity.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    /// `sparse[entity.index()]` is the dense slot holding that entity's value.
    sparse: Vec<Option<u32>>,
    /// `entities[slot]` owns `values[slot]`.
    entities: Vec<Entity>,
    /// Component values, densely packed.
    values: Vec<T>,
}

impl<T> SparseSet<T> {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense slot for `entity`, if it has a value here. A slot whose owner has
    /// a different generation does not count.
    fn slot(&self, entity: Entity) -> Option<usize> {
        let slot = (*self.sparse.get(entity.index() as usize)?)? as usize;
        (self.entities[slot] == entity).then_some(slot)
    }

    /// Insert a value for `entity`, overwriting any existing one.
    ///
    /// Returns the previous value if the entity already had one.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let index = entity.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }

        if let Some(slot) = self.sparse[index].map(|s| s as usize) {
            if self.entities[slot] == entity {
                return Some(std::mem::replace(&mut self.values[slot], value));
            }
            // Stale owner from an earlier generation: reclaim the slot.
            self.entities[slot] = entity;
            self.values[slot] = value;
            return None;
        }

        let slot = self.values.len();
        self.values.push(value);
        self.entities.push(entity);
        self.sparse[index] = Some(slot as u32);
        None
    }

    /// Remove and return the value for `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        self.sparse[entity.index() as usize] = None;

        let value = self.values.swap_remove(slot);
        self.entities.swap_remove(slot);

        // Re-point the element that was moved into the hole.
        if let Some(&moved) = self.entities.get(slot) {
            self.sparse[moved.index() as usize] = Some(slot as u32);
        }
        Some(value)
    }

    /// Returns `true` if `entity` has a value here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Get a reference to the value for `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.values[slot])
    }

    /// Get a mutable reference to the value for `entity`.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = self.slot(entity)?;
        Some(&mut self.values[slot])
    }

    /// Owners of the dense values, slot for slot.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The dense values.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterate mutably over `(entity, value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.entities.clear();
        self.values.clear();
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
