//! Contracts for the collaborators the engine core drives but does not own.
//!
//! Windowing, drawing, asset loading and raw input polling are supplied by a
//! platform layer through these traits. Every fallible call reports failure
//! as a value; the core decides whether that is fatal (window creation at
//! startup) or contained (everything per-frame).

use engine_math::{Color, Rect};

use crate::error::{AssetError, PlatformError, RenderError};

/// Opaque handle to a backend texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque handle to a backend font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Opaque handle to a platform window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

/// Drawing primitives used by render systems and the frame loop.
pub trait RendererBackend {
    /// Fill the whole target with the current draw colour.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Set the colour used by [`clear`](Self::clear) and
    /// [`draw_filled_rect`](Self::draw_filled_rect).
    fn set_draw_color(&mut self, color: Color) -> Result<(), RenderError>;

    /// Fill a rectangle with the current draw colour.
    fn draw_filled_rect(&mut self, rect: Rect) -> Result<(), RenderError>;

    /// Copy a texture onto the target, stretched to `dest`.
    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect) -> Result<(), RenderError>;

    /// Present the finished frame.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Lookup of loaded assets by identifier.
pub trait AssetStore {
    /// The texture registered under `id`.
    fn texture(&self, id: &str) -> Result<TextureHandle, AssetError>;

    /// The font registered under `id`.
    fn font(&self, id: &str) -> Result<FontHandle, AssetError>;
}

/// Key codes the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    F1,
    P,
    Space,
    Up,
    Down,
    Left,
    Right,
    /// Any other key, by platform key code.
    Other(u32),
}

/// Abstract input produced by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the application.
    Quit,
    /// A key was pressed.
    KeyDown(KeyCode),
}

/// A source of input events, drained once per frame.
///
/// [`poll_event`](Self::poll_event) yields pending events one at a time and
/// returns `None` once this frame's events are exhausted. The next frame
/// starts polling again.
pub trait InputSource {
    /// Next pending input event, if any.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Creation and destruction of the platform window.
pub trait WindowSystem {
    /// Open a window. Failure here is fatal to engine startup.
    fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<WindowHandle, PlatformError>;

    /// Close a window opened by [`create_window`](Self::create_window).
    fn destroy_window(&mut self, window: WindowHandle) -> Result<(), PlatformError>;
}
