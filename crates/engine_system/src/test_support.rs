//! Recording fakes for render system tests.

use std::collections::HashMap;

use engine_math::{Color, Rect};

use crate::error::{AssetError, RenderError};
use crate::platform::{AssetStore, FontHandle, RendererBackend, TextureHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    Color(Color),
    Fill(Rect),
    Texture(TextureHandle, Rect),
    Present,
}

#[derive(Debug, Default)]
pub struct FakeRenderer {
    pub calls: Vec<Call>,
    /// Fail `draw_texture` calls for this handle.
    pub failing_texture: Option<TextureHandle>,
}

impl RendererBackend for FakeRenderer {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> Result<(), RenderError> {
        self.calls.push(Call::Color(color));
        Ok(())
    }

    fn draw_filled_rect(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.calls.push(Call::Fill(rect));
        Ok(())
    }

    fn draw_texture(&mut self, texture: TextureHandle, dest: Rect) -> Result<(), RenderError> {
        if self.failing_texture == Some(texture) {
            return Err(RenderError::Backend("texture copy failed".into()));
        }
        self.calls.push(Call::Texture(texture, dest));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeAssets {
    pub textures: HashMap<String, TextureHandle>,
}

impl FakeAssets {
    pub fn with_texture(mut self, id: &str, handle: u32) -> Self {
        self.textures.insert(id.to_string(), TextureHandle(handle));
        self
    }
}

impl AssetStore for FakeAssets {
    fn texture(&self, id: &str) -> Result<TextureHandle, AssetError> {
        self.textures
            .get(id)
            .copied()
            .ok_or_else(|| AssetError::TextureNotFound(id.to_string()))
    }

    fn font(&self, id: &str) -> Result<FontHandle, AssetError> {
        Err(AssetError::FontNotFound(id.to_string()))
    }
}
