//! Entity type and allocation utilities.
//!
//! An [`Entity`] is a lightweight `(index, generation)` pair with no inherent
//! data. Indices are recycled once an entity is destroyed; the generation is
//! bumped on every recycle so stale handles never alias a newer entity.

use std::collections::VecDeque;

use crate::error::EcsError;

/// A generational entity handle.
///
/// Entities are pure identifiers: they carry no data of their own. Components
/// are attached to entities to give them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Create an entity from its raw parts.
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index. Used to address sparse storage.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation of the slot at the time this handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Allocates entity handles and tracks which ones are alive.
///
/// Freed indices go to the back of a FIFO queue so a slot is reused as late
/// as possible.
#[derive(Debug)]
pub struct EntityAllocator {
    /// Current generation per index.
    generations: Vec<u32>,
    /// Liveness per index.
    alive: Vec<bool>,
    /// Indices available for reuse.
    free: VecDeque<u32>,
    /// Number of live entities.
    live: usize,
    /// Upper bound on the number of slots.
    max_entities: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::with_max_entities(u32::MAX)
    }
}

impl EntityAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that hands out at most `max_entities` slots.
    #[must_use]
    pub fn with_max_entities(max_entities: u32) -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            free: VecDeque::new(),
            live: 0,
            max_entities,
        }
    }

    /// Allocates a fresh entity handle, recycling a freed index if one is
    /// available.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityLimitReached`] when no index is free and
    /// every slot up to the limit has been handed out.
    pub fn allocate(&mut self) -> Result<Entity, EcsError> {
        if let Some(index) = self.free.pop_front() {
            let slot = index as usize;
            self.alive[slot] = true;
            self.live += 1;
            return Ok(Entity::from_raw_parts(index, self.generations[slot]));
        }

        let index = u32::try_from(self.generations.len())
            .ok()
            .filter(|&index| index < self.max_entities)
            .ok_or(EcsError::EntityLimitReached(self.max_entities))?;
        self.generations.push(0);
        self.alive.push(true);
        self.live += 1;
        Ok(Entity::from_raw_parts(index, 0))
    }

    /// Releases an entity. Its index becomes reusable under a new generation.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = entity.index() as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push_back(entity.index());
        self.live -= 1;
        true
    }

    /// Returns `true` if the handle refers to a live entity.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index() as usize;
        self.alive.get(slot).copied().unwrap_or(false)
            && self.generations[slot] == entity.generation()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Returns the number of slots ever allocated, live or free.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    /// Iterates over all live entities in index order.
    pub fn iter_alive(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(slot, _)| Entity::from_raw_parts(slot as u32, self.generations[slot]))
    }
}
