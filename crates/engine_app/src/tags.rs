//! Tag and group indices.
//!
//! A tag names exactly one entity and an entity carries at most one tag. A
//! group names any number of entities and an entity belongs to at most one
//! group. Both indices keep their forward and reverse maps in step on every
//! mutation.

use std::collections::{BTreeSet, HashMap};

use engine_component::Entity;

/// One-to-one mapping between tag names and entities.
#[derive(Debug, Default)]
pub struct TagIndex {
    by_name: HashMap<String, Entity>,
    by_entity: HashMap<Entity, String>,
}

impl TagIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `entity` with `name`.
    ///
    /// The entity's previous tag is dropped, and if another entity held
    /// `name` it loses it.
    pub fn assign(&mut self, entity: Entity, name: &str) {
        self.remove_entity(entity);
        if let Some(previous) = self.by_name.insert(name.to_owned(), entity) {
            self.by_entity.remove(&previous);
        }
        self.by_entity.insert(entity, name.to_owned());
    }

    /// The entity tagged `name`.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    /// The tag carried by `entity`.
    #[must_use]
    pub fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    /// Drop `entity`'s tag, returning it.
    pub fn remove_entity(&mut self, entity: Entity) -> Option<String> {
        let name = self.by_entity.remove(&entity)?;
        self.by_name.remove(&name);
        Some(name)
    }

    /// Number of tagged entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate `(name, entity)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.by_name.iter().map(|(name, entity)| (name.as_str(), *entity))
    }
}

/// One-to-many mapping from group names to entities.
#[derive(Debug, Default)]
pub struct GroupIndex {
    members: HashMap<String, BTreeSet<Entity>>,
    by_entity: HashMap<Entity, String>,
}

impl GroupIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `entity` into group `name`, leaving any group it was in.
    pub fn assign(&mut self, entity: Entity, name: &str) {
        self.remove_entity(entity);
        self.members
            .entry(name.to_owned())
            .or_default()
            .insert(entity);
        self.by_entity.insert(entity, name.to_owned());
    }

    /// Members of group `name`, in entity order. Empty groups do not exist.
    #[must_use]
    pub fn members(&self, name: &str) -> Option<&BTreeSet<Entity>> {
        self.members.get(name)
    }

    /// The group `entity` belongs to.
    #[must_use]
    pub fn group_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    /// Remove `entity` from its group, returning the group name.
    pub fn remove_entity(&mut self, entity: Entity) -> Option<String> {
        let name = self.by_entity.remove(&entity)?;
        if let Some(set) = self.members.get_mut(&name) {
            set.remove(&entity);
            if set.is_empty() {
                self.members.remove(&name);
            }
        }
        Some(name)
    }

    /// Number of non-empty groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.members.len()
    }

    /// Iterate `(entity, group)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &str)> {
        self.by_entity.iter().map(|(entity, name)| (*entity, name.as_str()))
    }
}
