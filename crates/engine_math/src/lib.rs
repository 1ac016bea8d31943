//! # engine_math
//!
//! Math types for the 2D ECS engine. Re-exports [`glam`] for vector algebra
//! and defines the screen-space types shared by the component, system and
//! runtime crates.

pub mod color;
pub mod rect;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{IVec2, Vec2};

pub use color::Color;
pub use rect::Rect;
pub use transform::Transform2D;
