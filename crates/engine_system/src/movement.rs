//! Movement system: moves every entity with a transform.

use engine_component::{
    Component, ComponentKind, Components, EcsError, Entity, RigidBody, Signature, Transform,
};
use engine_math::Vec2;

use crate::system::{System, SystemKind};

/// Moves every entity that has a [`Transform`].
///
/// Each tick, every matched position is offset by the fixed `step`. Entities
/// that also carry a [`RigidBody`] additionally integrate `velocity * dt`.
#[derive(Debug, Clone, Default)]
pub struct MovementSystem {
    step: Vec2,
}

impl MovementSystem {
    /// A movement system with no fixed step; only rigid bodies move.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A movement system that also drifts every entity by `step` per tick.
    #[must_use]
    pub fn with_step(step: Vec2) -> Self {
        Self { step }
    }

    /// The fixed per-tick offset.
    #[must_use]
    pub fn step(&self) -> Vec2 {
        self.step
    }
}

impl System for MovementSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::Movement
    }

    fn required(&self) -> Signature {
        Signature::new().with(ComponentKind::Transform)
    }

    fn update(
        &mut self,
        entities: &[Entity],
        components: &mut Components,
        dt: f64,
    ) -> Result<(), EcsError> {
        for &entity in entities {
            let velocity = components
                .get::<RigidBody>(entity)
                .map_or(Vec2::ZERO, |body| body.velocity);
            let transform = components.get_mut::<Transform>(entity).ok_or(
                EcsError::ComponentNotFound {
                    entity,
                    kind: Transform::KIND,
                },
            )?;
            transform.position += self.step + velocity * dt as f32;
        }
        Ok(())
    }
}
