//! # engine_system
//!
//! The "S" in ECS: what a system is, and the collaborators it draws with.
//!
//! This crate provides:
//!
//! - [`System`] / [`SystemKind`]: the behaviour contract and the closed set
//!   of system kinds.
//! - [`RenderContext`]: per-frame drawing context handed to render systems.
//! - [`platform`]: the renderer, asset store, input and window contracts the
//!   engine core consumes.
//! - Built-in systems: [`MovementSystem`], [`SpriteRenderSystem`],
//!   [`DebugOverlaySystem`].

pub mod context;
pub mod debug;
pub mod error;
pub mod movement;
pub mod platform;
pub mod sprite;
pub mod system;

#[cfg(test)]
mod test_support;

pub use context::RenderContext;
pub use debug::DebugOverlaySystem;
pub use error::{AssetError, PlatformError, RenderError};
pub use movement::MovementSystem;
pub use platform::{
    AssetStore, FontHandle, InputEvent, InputSource, KeyCode, RendererBackend, TextureHandle,
    WindowHandle, WindowSystem,
};
pub use sprite::SpriteRenderSystem;
pub use system::{System, SystemKind};
