//! Debug overlay: marks every positioned entity when debug mode is on.

use engine_component::{ComponentKind, Components, Entity, Signature, Transform};
use engine_math::{Color, Rect, Vec2};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::system::{System, SystemKind};

/// Side length of the default marker, in pixels.
pub const DEFAULT_MARKER_SIZE: i32 = 20;

/// Draws a filled marker at every entity with a [`Transform`], but only
/// while [`RenderContext::debug`] is set.
#[derive(Debug, Clone)]
pub struct DebugOverlaySystem {
    color: Color,
    marker_size: i32,
}

impl DebugOverlaySystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: Color::DEBUG_RED,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

impl Default for DebugOverlaySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for DebugOverlaySystem {
    fn kind(&self) -> SystemKind {
        SystemKind::DebugOverlay
    }

    fn required(&self) -> Signature {
        Signature::new().with(ComponentKind::Transform)
    }

    fn renders(&self) -> bool {
        true
    }

    fn render(
        &self,
        entities: &[Entity],
        components: &Components,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        if !ctx.debug {
            return Ok(());
        }

        ctx.renderer.set_draw_color(self.color)?;
        let size = Vec2::splat(self.marker_size as f32);
        for &entity in entities {
            let Some(transform) = components.get::<Transform>(entity) else {
                continue;
            };
            let marker = Rect::from_position_size(ctx.to_screen(transform.position), size);
            ctx.renderer.draw_filled_rect(marker)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeAssets, FakeRenderer};

    #[test]
    fn test_silent_without_debug() {
        let mut components = Components::new();
        let entity = Entity::from_raw_parts(0, 0);
        components.insert(entity, Transform::from_xy(20.0, 20.0));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default();
        let mut ctx = RenderContext::new(&mut renderer, Rect::from_size(800, 600), &assets, false);
        DebugOverlaySystem::new()
            .render(&[entity], &components, &mut ctx)
            .unwrap();

        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_marks_entities_in_debug() {
        let mut components = Components::new();
        let entity = Entity::from_raw_parts(0, 0);
        components.insert(entity, Transform::from_xy(20.0, 20.0));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default();
        let mut ctx = RenderContext::new(&mut renderer, Rect::from_size(800, 600), &assets, true);
        DebugOverlaySystem::new()
            .render(&[entity], &components, &mut ctx)
            .unwrap();

        assert_eq!(
            renderer.calls,
            vec![
                Call::Color(Color::DEBUG_RED),
                Call::Fill(Rect::new(20, 20, 20, 20))
            ]
        );
    }
}
