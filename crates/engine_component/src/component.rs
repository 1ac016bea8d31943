//! Core [`Component`] trait, the closed set of component kinds, and the
//! per-kind storage arena.
//!
//! Component kinds are a closed enum rather than open type ids: every kind
//! has exactly one statically typed [`SparseSet`] field in [`Components`],
//! and [`Component`] maps a Rust type to its kind and its field. Nothing is
//! type-erased, so no runtime casts are needed to reach component data.

use crate::builtin::{RigidBody, Sprite, Transform};
use crate::entity::Entity;
use crate::signature::Signature;
use crate::storage::SparseSet;

/// The kinds of component the engine knows about.
///
/// The discriminant is the kind's bit position in a [`Signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentKind {
    Transform = 0,
    RigidBody = 1,
    Sprite = 2,
}

impl ComponentKind {
    /// Every kind, in bit order.
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Transform,
        ComponentKind::RigidBody,
        ComponentKind::Sprite,
    ];

    /// Number of component kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// The kind's signature bit.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// A human-readable name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::RigidBody => "RigidBody",
            ComponentKind::Sprite => "Sprite",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The core component trait.
///
/// Implemented once per [`ComponentKind`]; ties the Rust type to its kind and
/// to its storage inside [`Components`].
pub trait Component: Sized + 'static {
    /// The kind this type is stored as.
    const KIND: ComponentKind;

    /// The storage holding every instance of this component.
    fn storage(components: &Components) -> &SparseSet<Self>;

    /// Mutable access to the storage holding every instance of this component.
    fn storage_mut(components: &mut Components) -> &mut SparseSet<Self>;
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn storage(components: &Components) -> &SparseSet<Self> {
        &components.transforms
    }

    fn storage_mut(components: &mut Components) -> &mut SparseSet<Self> {
        &mut components.transforms
    }
}

impl Component for RigidBody {
    const KIND: ComponentKind = ComponentKind::RigidBody;

    fn storage(components: &Components) -> &SparseSet<Self> {
        &components.rigid_bodies
    }

    fn storage_mut(components: &mut Components) -> &mut SparseSet<Self> {
        &mut components.rigid_bodies
    }
}

impl Component for Sprite {
    const KIND: ComponentKind = ComponentKind::Sprite;

    fn storage(components: &Components) -> &SparseSet<Self> {
        &components.sprites
    }

    fn storage_mut(components: &mut Components) -> &mut SparseSet<Self> {
        &mut components.sprites
    }
}

/// Arena of per-kind component arrays.
///
/// Components are only added and removed through the entity manager, which
/// keeps entity signatures in step with what is stored here. Systems receive
/// this arena directly and may read or mutate component values, but not
/// attach or detach them.
#[derive(Debug, Default)]
pub struct Components {
    transforms: SparseSet<Transform>,
    rigid_bodies: SparseSet<RigidBody>,
    sprites: SparseSet<Sprite>,
}

impl Components {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage for component type `T`.
    #[must_use]
    pub fn storage<T: Component>(&self) -> &SparseSet<T> {
        T::storage(self)
    }

    /// Mutable storage for component type `T`.
    pub fn storage_mut<T: Component>(&mut self) -> &mut SparseSet<T> {
        T::storage_mut(self)
    }

    /// Insert or overwrite `entity`'s `T`, returning the previous value.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
        T::storage_mut(self).insert(entity, value)
    }

    /// Remove and return `entity`'s `T`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(self).remove(entity)
    }

    /// `entity`'s `T`, if present.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::storage(self).get(entity)
    }

    /// `entity`'s `T`, mutably, if present.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    /// Returns `true` if `entity` has a `T`.
    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        T::storage(self).contains(entity)
    }

    /// Returns `true` if `entity` has a component of the given kind.
    #[must_use]
    pub fn contains_kind(&self, kind: ComponentKind, entity: Entity) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(entity),
            ComponentKind::RigidBody => self.rigid_bodies.contains(entity),
            ComponentKind::Sprite => self.sprites.contains(entity),
        }
    }

    /// Remove `entity`'s component of the given kind. Returns `true` if one
    /// was present.
    pub fn remove_kind(&mut self, kind: ComponentKind, entity: Entity) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.remove(entity).is_some(),
            ComponentKind::RigidBody => self.rigid_bodies.remove(entity).is_some(),
            ComponentKind::Sprite => self.sprites.remove(entity).is_some(),
        }
    }

    /// Remove every component `entity` owns. Returns the kinds removed.
    pub fn remove_all(&mut self, entity: Entity) -> Signature {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.remove_kind(*kind, entity))
            .collect()
    }

    /// Signature derived from what is actually stored for `entity`.
    #[must_use]
    pub fn signature_of(&self, entity: Entity) -> Signature {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.contains_kind(*kind, entity))
            .collect()
    }
}
