//! Built-in component records.

use engine_math::{Transform2D, Vec2};

/// Spatial component. Every visible entity carries one.
pub type Transform = Transform2D;

/// Linear velocity, integrated by the movement system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    /// Velocity in world units per second.
    pub velocity: Vec2,
}

impl RigidBody {
    /// A body at rest.
    pub const REST: Self = Self {
        velocity: Vec2::ZERO,
    };

    /// Create a body with the given velocity.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            velocity: Vec2::new(x, y),
        }
    }
}

/// A textured quad drawn at the entity's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Asset store identifier of the texture.
    pub asset_id: String,
    /// Unscaled width in pixels.
    pub width: u32,
    /// Unscaled height in pixels.
    pub height: u32,
    /// Draw order; lower values are drawn first.
    pub z_index: i32,
}

impl Sprite {
    /// Create a sprite at z-index 0.
    #[must_use]
    pub fn new(asset_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            z_index: 0,
        }
    }

    /// Set the draw order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Unscaled size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}
