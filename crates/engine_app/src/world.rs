//! World: the entity manager.
//!
//! The [`World`] owns entity identity, component storage, per-entity
//! signatures, the tag and group indices and the [`SystemRegistry`]. Every
//! structural change (component added or removed, entity destroyed) updates
//! the entity's signature and notifies the registry in the same call, so a
//! system's matched list is never stale.
//!
//! Destruction is deferred: [`World::destroy_entity`] only marks the entity,
//! and [`World::flush`] performs the removal at a safe point between frames.

use engine_component::{
    Component, Components, EcsError, Entity, EntityAllocator, Signature, SparseSet,
};
use engine_system::{RenderContext, System, SystemKind};
use tracing::{debug, trace};

use crate::error::EngineError;
use crate::registry::{SystemEntry, SystemRegistry};
use crate::tags::{GroupIndex, TagIndex};

/// The canonical entity and component state.
#[derive(Debug, Default)]
pub struct World {
    /// Entity handle allocator.
    allocator: EntityAllocator,
    /// Per-kind component storage.
    components: Components,
    /// `signatures[entity.index()]` for every allocated slot.
    signatures: Vec<Signature>,
    /// Registered systems and their matched lists.
    registry: SystemRegistry,
    tags: TagIndex,
    groups: GroupIndex,
    /// Entities marked for destruction at the next flush, in marking order.
    pending_destroy: SparseSet<()>,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), EcsError> {
        if self.allocator.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::UnknownEntity(entity))
        }
    }

    // -- Entity lifecycle --

    /// A world that refuses to hold more than `max_entities` entity slots.
    #[must_use]
    pub fn with_max_entities(max_entities: u32) -> Self {
        Self {
            allocator: EntityAllocator::with_max_entities(max_entities),
            ..Self::default()
        }
    }

    /// Allocate a new entity with an empty signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityLimitReached`] once every index is in use.
    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        let entity = self.allocator.allocate()?;
        let slot = entity.index() as usize;
        if slot >= self.signatures.len() {
            self.signatures.resize(slot + 1, Signature::EMPTY);
        }
        self.signatures[slot] = Signature::EMPTY;
        debug!(%entity, "entity created");
        Ok(entity)
    }

    /// Mark an entity for destruction at the next [`flush`](Self::flush).
    ///
    /// The entity stays fully usable until then. Marking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        if self.pending_destroy.insert(entity, ()).is_none() {
            debug!(%entity, "entity marked for destruction");
        }
        Ok(())
    }

    /// Destroy every entity marked since the last flush: remove all its
    /// components, zero its signature, evict it from the tag and group
    /// indices and from every system, and release its handle.
    ///
    /// Returns the number of entities destroyed.
    pub fn flush(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut destroyed = 0;
        for &entity in pending.entities() {
            if !self.allocator.is_alive(entity) {
                continue;
            }
            self.components.remove_all(entity);
            self.signatures[entity.index() as usize] = Signature::EMPTY;
            self.tags.remove_entity(entity);
            self.groups.remove_entity(entity);
            self.registry.entity_destroyed(entity);
            self.allocator.free(entity);
            destroyed += 1;
            debug!(%entity, "entity destroyed");
        }
        destroyed
    }

    /// Returns `true` if the handle refers to a live entity.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of live entities, including ones pending destruction.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.allocator.live_count()
    }

    /// Number of entities waiting for the next flush.
    #[must_use]
    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    /// Iterate over live entities in index order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.allocator.iter_alive()
    }

    /// The entity's component signature.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self.signatures[entity.index() as usize])
    }

    // -- Component operations --

    /// Attach a component, overwriting any existing one of the same kind.
    ///
    /// Sets the kind's signature bit and adds the entity to every system it
    /// now matches.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.components.insert(entity, value);

        let signature = &mut self.signatures[entity.index() as usize];
        signature.insert(T::KIND);
        let signature = *signature;
        trace!(%entity, kind = %T::KIND, %signature, "component added");

        self.registry.signature_changed(entity, signature);
        Ok(())
    }

    /// Detach a component, returning it.
    ///
    /// Clears the kind's signature bit and removes the entity from every
    /// system it no longer matches.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive, or
    /// [`EcsError::ComponentNotFound`] if it has no such component.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.ensure_alive(entity)?;
        let value = self
            .components
            .remove::<T>(entity)
            .ok_or(EcsError::ComponentNotFound {
                entity,
                kind: T::KIND,
            })?;

        let signature = &mut self.signatures[entity.index() as usize];
        signature.remove(T::KIND);
        let signature = *signature;
        trace!(%entity, kind = %T::KIND, %signature, "component removed");

        self.registry.signature_changed(entity, signature);
        Ok(value)
    }

    /// Returns `true` if the entity has a component of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool, EcsError> {
        Ok(self.signature(entity)?.contains(T::KIND))
    }

    /// The entity's component of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive, or
    /// [`EcsError::ComponentNotFound`] if it has no such component.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.ensure_alive(entity)?;
        self.components
            .get::<T>(entity)
            .ok_or(EcsError::ComponentNotFound {
                entity,
                kind: T::KIND,
            })
    }

    /// The entity's component of type `T`, mutably.
    ///
    /// # Errors
    ///
    /// As for [`get_component`](Self::get_component).
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.ensure_alive(entity)?;
        self.components
            .get_mut::<T>(entity)
            .ok_or(EcsError::ComponentNotFound {
                entity,
                kind: T::KIND,
            })
    }

    /// Read-only access to component storage.
    #[must_use]
    pub fn components(&self) -> &Components {
        &self.components
    }

    // -- Tags and groups --

    /// Tag an entity. See [`TagIndex::assign`] for reassignment rules.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn tag_entity(&mut self, entity: Entity, name: &str) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.tags.assign(entity, name);
        Ok(())
    }

    /// Remove an entity's tag, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn untag_entity(&mut self, entity: Entity) -> Result<Option<String>, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self.tags.remove_entity(entity))
    }

    /// The entity tagged `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::TagNotFound`] if no entity carries the tag.
    pub fn entity_by_tag(&self, name: &str) -> Result<Entity, EcsError> {
        self.tags
            .entity(name)
            .ok_or_else(|| EcsError::TagNotFound(name.to_owned()))
    }

    /// The tag the entity carries, if any.
    #[must_use]
    pub fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.tags.tag_of(entity)
    }

    /// Returns `true` if the entity carries tag `name`.
    #[must_use]
    pub fn entity_has_tag(&self, entity: Entity, name: &str) -> bool {
        self.tags.tag_of(entity) == Some(name)
    }

    /// Put an entity into a group, leaving any group it was in.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn group_entity(&mut self, entity: Entity, name: &str) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.groups.assign(entity, name);
        Ok(())
    }

    /// Remove an entity from its group, returning the group name.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity is not alive.
    pub fn ungroup_entity(&mut self, entity: Entity) -> Result<Option<String>, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self.groups.remove_entity(entity))
    }

    /// Every entity in group `name`, in entity order.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::GroupNotFound`] if the group has no members.
    pub fn entities_by_group(&self, name: &str) -> Result<Vec<Entity>, EcsError> {
        self.groups
            .members(name)
            .map(|set| set.iter().copied().collect())
            .ok_or_else(|| EcsError::GroupNotFound(name.to_owned()))
    }

    /// The group the entity belongs to, if any.
    #[must_use]
    pub fn group_of(&self, entity: Entity) -> Option<&str> {
        self.groups.group_of(entity)
    }

    /// Returns `true` if the entity belongs to group `name`.
    #[must_use]
    pub fn entity_in_group(&self, entity: Entity, name: &str) -> bool {
        self.groups.group_of(entity) == Some(name)
    }

    // -- Systems --

    /// Register a system, matching it against every live entity.
    ///
    /// Re-registering a kind replaces the previous instance in place.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        let signatures = &self.signatures;
        let population = self
            .allocator
            .iter_alive()
            .map(|entity| (entity, signatures[entity.index() as usize]));
        self.registry.register(Box::new(system), population);
    }

    /// Unregister a system.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemNotFound`] if the kind is not registered.
    pub fn remove_system(&mut self, kind: SystemKind) -> Result<(), EngineError> {
        self.registry.unregister(kind).map(|_| ())
    }

    /// Returns `true` if a system of this kind is registered.
    #[must_use]
    pub fn has_system(&self, kind: SystemKind) -> bool {
        self.registry.contains(kind)
    }

    /// The registered system of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemNotFound`] if the kind is not registered.
    pub fn system(&self, kind: SystemKind) -> Result<&dyn System, EngineError> {
        self.registry.get(kind).map(SystemEntry::system)
    }

    /// Entities currently matched by the system of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SystemNotFound`] if the kind is not registered.
    pub fn matched(&self, kind: SystemKind) -> Result<&[Entity], EngineError> {
        self.registry.get(kind).map(SystemEntry::matched)
    }

    /// The system registry.
    #[must_use]
    pub fn systems(&self) -> &SystemRegistry {
        &self.registry
    }

    /// Run every system's update pass. Returns the number of failed passes.
    pub fn update(&mut self, dt: f64) -> usize {
        self.registry.update(&mut self.components, dt)
    }

    /// Run every rendering system. Returns the number of failed passes.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> usize {
        self.registry.render(&self.components, ctx)
    }
}

#[cfg(test)]
mod tests {
    use engine_component::{ComponentKind, RigidBody, Sprite, Transform};
    use engine_math::Vec2;
    use engine_system::{MovementSystem, SpriteRenderSystem};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_create_entity_has_empty_signature() {
        let mut world = World::new();
        let e = world.create_entity().unwrap();
        assert!(world.is_alive(e));
        assert_eq!(world.signature(e).unwrap(), Signature::EMPTY);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_tank_scenario() {
        let mut world = World::new();
        let tank = world.create_entity().unwrap();
        world.add_component(tank, Transform::from_xy(50.0, 50.0)).unwrap();
        world.tag_entity(tank, "tank").unwrap();

        assert_eq!(world.entity_by_tag("tank").unwrap(), tank);
        let t = world.get_component::<Transform>(tank).unwrap();
        assert_eq!(t.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_add_component_sets_bit() {
        let mut world = World::new();
        let e = world.create_entity().unwrap();
        world.add_component(e, RigidBody::REST).unwrap();
        assert!(world.signature(e).unwrap().contains(ComponentKind::RigidBody));
        assert!(world.has_component::<RigidBody>(e).unwrap());
        assert!(!world.has_component::<Sprite>(e).unwrap());
    }

    #[test]
    fn test_add_component_overwrites() {
        let mut world = World::new();
        let e = world.create_entity().unwrap();
        world.add_component(e, Transform::from_xy(1.0, 1.0)).unwrap();
        world.add_component(e, Transform::from_xy(2.0, 2.0)).unwrap();
        assert_eq!(world.components().storage::<Transform>().len(), 1);
        assert_eq!(
            world.get_component::<Transform>(e).unwrap().position,
            Vec2::new(2.0, 2.0)
        );
    }

    #[test]
    fn test_get_missing_component() {
        let mut world = World::new();
        let e = world.create_entity().unwrap();
        assert_eq!(
            world.get_component::<Sprite>(e).unwrap_err(),
            EcsError::ComponentNotFound {
                entity: e,
                kind: ComponentKind::Sprite
            }
        );
        assert!(matches!(
            world.remove_component::<Sprite>(e),
            Err(EcsError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn test_movement_scenario() {
        let mut world = World::new();
        world.add_system(MovementSystem::with_step(Vec2::ONE));
        let e = world.create_entity().unwrap();
        world.add_component(e, Transform::from_xy(50.0, 50.0)).unwrap();

        assert_eq!(world.matched(SystemKind::Movement).unwrap(), &[e]);

        assert_eq!(world.update(0.016), 0);
        assert_eq!(
            world.get_component::<Transform>(e).unwrap().position,
            Vec2::new(51.0, 51.0)
        );
    }

    #[test]
    fn test_remove_component_leaves_system_immediately() {
        let mut world = World::new();
        world.add_system(MovementSystem::new());
        let e = world.create_entity().unwrap();
        world.add_component(e, Transform::default()).unwrap();

        world.remove_component::<Transform>(e).unwrap();
        assert!(!world.signature(e).unwrap().contains(ComponentKind::Transform));
        assert!(world.matched(SystemKind::Movement).unwrap().is_empty());
    }

    #[test]
    fn test_system_added_after_entities_is_populated() {
        let mut world = World::new();
        let a = world.create_entity().unwrap();
        let b = world.create_entity().unwrap();
        world.add_component(a, Transform::default()).unwrap();
        world.add_component(a, Sprite::new("tank", 8, 8)).unwrap();
        world.add_component(b, Transform::default()).unwrap();

        world.add_system(SpriteRenderSystem::new());
        assert_eq!(world.matched(SystemKind::SpriteRender).unwrap(), &[a]);
    }

    #[test]
    fn test_destroy_is_deferred_until_flush() {
        let mut world = World::new();
        world.add_system(MovementSystem::new());
        let e = world.create_entity().unwrap();
        world.add_component(e, Transform::default()).unwrap();
        world.tag_entity(e, "tank").unwrap();
        world.group_entity(e, "player").unwrap();

        world.destroy_entity(e).unwrap();
        world.destroy_entity(e).unwrap();
        assert!(world.is_alive(e));
        assert_eq!(world.pending_destroy_count(), 1);
        assert!(world.get_component::<Transform>(e).is_ok());

        assert_eq!(world.flush(), 1);
        assert!(!world.is_alive(e));
        assert_eq!(world.get_component::<Transform>(e), Err(EcsError::UnknownEntity(e)));
        assert!(world.components().storage::<Transform>().is_empty());
        assert!(world.entity_by_tag("tank").is_err());
        assert!(matches!(
            world.entities_by_group("player"),
            Err(EcsError::GroupNotFound(_))
        ));
        assert!(world.matched(SystemKind::Movement).unwrap().is_empty());
    }

    #[test]
    fn test_mass_destroy_marks_each_entity_once() {
        let mut world = World::new();
        let entities: Vec<_> = (0..5_000).map(|_| world.create_entity().unwrap()).collect();
        for &e in entities.iter().chain(entities.iter().rev()) {
            world.destroy_entity(e).unwrap();
        }
        assert_eq!(world.pending_destroy_count(), entities.len());

        assert_eq!(world.flush(), entities.len());
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.pending_destroy_count(), 0);
        assert_eq!(world.flush(), 0);
    }

    #[test]
    fn test_entity_limit_is_reported() {
        let mut world = World::with_max_entities(1);
        let e = world.create_entity().unwrap();
        assert_eq!(world.create_entity(), Err(EcsError::EntityLimitReached(1)));
        assert_eq!(world.entity_count(), 1);

        world.destroy_entity(e).unwrap();
        world.flush();
        let recycled = world.create_entity().unwrap();
        assert_eq!(recycled.index(), e.index());
        assert!(!world.is_alive(e));
    }

    #[test]
    fn test_operations_on_destroyed_entity_fail() {
        let mut world = World::new();
        let e = world.create_entity().unwrap();
        world.destroy_entity(e).unwrap();
        world.flush();

        assert_eq!(world.add_component(e, RigidBody::REST), Err(EcsError::UnknownEntity(e)));
        assert_eq!(world.destroy_entity(e), Err(EcsError::UnknownEntity(e)));
        assert_eq!(world.tag_entity(e, "x"), Err(EcsError::UnknownEntity(e)));
        assert_eq!(world.signature(e), Err(EcsError::UnknownEntity(e)));
    }

    #[test]
    fn test_recycled_entity_starts_clean() {
        let mut world = World::new();
        let old = world.create_entity().unwrap();
        world.add_component(old, Transform::default()).unwrap();
        world.destroy_entity(old).unwrap();
        world.flush();

        let new = world.create_entity().unwrap();
        assert_eq!(new.index(), old.index());
        assert_eq!(world.signature(new).unwrap(), Signature::EMPTY);
        assert!(world.get_component::<Transform>(new).is_err());
    }

    #[test]
    fn test_groups() {
        let mut world = World::new();
        let a = world.create_entity().unwrap();
        let b = world.create_entity().unwrap();
        world.group_entity(b, "enemies").unwrap();
        world.group_entity(a, "enemies").unwrap();

        assert_eq!(world.entities_by_group("enemies").unwrap(), vec![a, b]);
        assert!(world.entity_in_group(a, "enemies"));
        assert_eq!(world.ungroup_entity(a).unwrap().as_deref(), Some("enemies"));
        assert_eq!(world.entities_by_group("enemies").unwrap(), vec![b]);
    }

    #[test]
    fn test_untag() {
        let mut world = World::new();
        let a = world.create_entity().unwrap();
        world.tag_entity(a, "tank").unwrap();
        assert!(world.entity_has_tag(a, "tank"));
        world.untag_entity(a).unwrap();
        assert_eq!(world.tag_of(a), None);
        assert!(matches!(world.entity_by_tag("tank"), Err(EcsError::TagNotFound(_))));
    }

    #[test]
    fn test_remove_system() {
        let mut world = World::new();
        world.add_system(MovementSystem::new());
        assert!(world.has_system(SystemKind::Movement));
        world.remove_system(SystemKind::Movement).unwrap();
        assert!(!world.has_system(SystemKind::Movement));
        assert!(matches!(
            world.system(SystemKind::Movement),
            Err(EngineError::SystemNotFound(SystemKind::Movement))
        ));
    }

    /// One structural operation in a randomly generated sequence.
    #[derive(Debug, Clone)]
    enum Op {
        Create,
        AddTransform(usize),
        AddBody(usize),
        AddSprite(usize),
        RemoveTransform(usize),
        RemoveSprite(usize),
        Tag(usize, u8),
        Group(usize, u8),
        Destroy(usize),
        Flush,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Create),
            (0..8usize).prop_map(Op::AddTransform),
            (0..8usize).prop_map(Op::AddBody),
            (0..8usize).prop_map(Op::AddSprite),
            (0..8usize).prop_map(Op::RemoveTransform),
            (0..8usize).prop_map(Op::RemoveSprite),
            (0..8usize, 0..3u8).prop_map(|(i, t)| Op::Tag(i, t)),
            (0..8usize, 0..3u8).prop_map(|(i, g)| Op::Group(i, g)),
            (0..8usize).prop_map(Op::Destroy),
            Just(Op::Flush),
        ]
    }

    fn pick(handles: &[Entity], i: usize) -> Option<Entity> {
        handles.get(i % handles.len().max(1)).copied()
    }

    fn apply(world: &mut World, handles: &mut Vec<Entity>, op: Op) {
        // Errors are expected for stale handles; only invariants matter here.
        match op {
            Op::Create => handles.push(world.create_entity().unwrap()),
            Op::AddTransform(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.add_component(e, Transform::default());
                }
            }
            Op::AddBody(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.add_component(e, RigidBody::REST);
                }
            }
            Op::AddSprite(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.add_component(e, Sprite::new("s", 1, 1));
                }
            }
            Op::RemoveTransform(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.remove_component::<Transform>(e);
                }
            }
            Op::RemoveSprite(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.remove_component::<Sprite>(e);
                }
            }
            Op::Tag(i, t) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.tag_entity(e, &format!("tag{t}"));
                }
            }
            Op::Group(i, g) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.group_entity(e, &format!("group{g}"));
                }
            }
            Op::Destroy(i) => {
                if let Some(e) = pick(handles, i) {
                    let _ = world.destroy_entity(e);
                }
            }
            Op::Flush => {
                world.flush();
            }
        }
    }

    fn check_invariants(world: &World, handles: &[Entity]) {
        for entity in world.entities() {
            let signature = world.signature(entity).unwrap();
            assert_eq!(signature, world.components().signature_of(entity));

            for entry in world.systems().iter() {
                assert_eq!(
                    entry.is_matched(entity),
                    signature.matches(entry.required()),
                    "{entity} membership in {} drifted",
                    entry.kind()
                );
            }
            if let Some(tag) = world.tag_of(entity) {
                assert_eq!(world.entity_by_tag(tag).unwrap(), entity);
            }
            if let Some(group) = world.group_of(entity) {
                assert!(world.entities_by_group(group).unwrap().contains(&entity));
            }
        }

        for &entity in handles.iter().filter(|e| !world.is_alive(**e)) {
            assert_eq!(world.tag_of(entity), None);
            assert_eq!(world.group_of(entity), None);
            for entry in world.systems().iter() {
                assert!(!entry.is_matched(entity));
            }
            assert!(world.components().signature_of(entity).is_empty());
        }
    }

    proptest! {
        #[test]
        fn prop_signatures_and_matches_never_drift(ops in prop::collection::vec(op(), 0..96)) {
            let mut world = World::new();
            world.add_system(MovementSystem::new());
            world.add_system(SpriteRenderSystem::new());
            let mut handles = Vec::new();

            for op in ops {
                apply(&mut world, &mut handles, op);
                check_invariants(&world, &handles);
            }
        }
    }
}
