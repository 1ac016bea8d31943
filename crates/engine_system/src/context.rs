//! Per-frame render context provided to render systems.

use engine_math::{Rect, Vec2};

use crate::platform::{AssetStore, RendererBackend};

/// Everything a render system needs for one frame.
pub struct RenderContext<'a> {
    /// The renderer to draw into.
    pub renderer: &'a mut dyn RendererBackend,
    /// The visible world region; its origin maps to the top-left of the screen.
    pub camera: Rect,
    /// Asset lookup for textures and fonts.
    pub assets: &'a dyn AssetStore,
    /// Whether debug overlays should be drawn.
    pub debug: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context for one render pass.
    #[must_use]
    pub fn new(
        renderer: &'a mut dyn RendererBackend,
        camera: Rect,
        assets: &'a dyn AssetStore,
        debug: bool,
    ) -> Self {
        Self {
            renderer,
            camera,
            assets,
            debug,
        }
    }

    /// Convert a world position into screen space.
    #[must_use]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - Vec2::new(self.camera.x as f32, self.camera.y as f32)
    }

    /// The screen rectangle, for culling draws that land off-screen.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        Rect::from_size(self.camera.w, self.camera.h)
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("camera", &self.camera)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
