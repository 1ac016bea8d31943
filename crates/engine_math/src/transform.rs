//! 2D transform.
//!
//! [`Transform2D`] represents position, rotation, and scale in screen space.
//! Nearly every visible entity carries one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D transform: world position, per-axis scale and rotation in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform2D {
    /// World-space position of the top-left corner.
    pub position: Vec2,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Rotation in degrees, clockwise.
    pub rotation: f32,
}

impl Transform2D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
        rotation: 0.0,
    };

    /// Create a new transform with the given position and default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Shorthand for [`Transform2D::from_position`] with separate coordinates.
    #[must_use]
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_position(Vec2::new(x, y))
    }

    /// Translate the transform by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.position += offset;
        self
    }

    /// Rotate by the given number of degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        self
    }

    /// Apply a uniform scale factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
