//! Sprite render system: draws textured sprites at their transforms.

use engine_component::{ComponentKind, Components, Entity, Signature, Sprite, Transform};
use engine_math::Rect;
use tracing::{trace, warn};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::system::{System, SystemKind};

/// Draws every entity with a [`Transform`] and a [`Sprite`].
///
/// Sprites are drawn in ascending `z_index`, ties broken by entity so the
/// draw order is deterministic. Sprites whose texture is missing from the
/// asset store are skipped with a warning; sprites entirely outside the
/// camera are culled. A failed draw does not stop the pass: the remaining
/// sprites are still drawn and the first failure is returned at the end.
#[derive(Debug, Clone, Default)]
pub struct SpriteRenderSystem;

impl SpriteRenderSystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl System for SpriteRenderSystem {
    fn kind(&self) -> SystemKind {
        SystemKind::SpriteRender
    }

    fn required(&self) -> Signature {
        Signature::new()
            .with(ComponentKind::Transform)
            .with(ComponentKind::Sprite)
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
        let mut drawables: Vec<(Entity, &Transform, &Sprite)> = entities
            .iter()
            .filter_map(|&entity| {
                let transform = components.get::<Transform>(entity)?;
                let sprite = components.get::<Sprite>(entity)?;
                Some((entity, transform, sprite))
            })
            .collect();
        drawables.sort_by_key(|(entity, _, sprite)| (sprite.z_index, *entity));

        let viewport = ctx.viewport();
        let mut first_failure = None;
        for (entity, transform, sprite) in drawables {
            let dest = Rect::from_position_size(
                ctx.to_screen(transform.position),
                sprite.size() * transform.scale,
            );
            if !dest.intersects(&viewport) {
                continue;
            }

            let texture = match ctx.assets.texture(&sprite.asset_id) {
                Ok(texture) => texture,
                Err(err) => {
                    warn!(%entity, asset_id = %sprite.asset_id, error = %err, "skipping sprite draw");
                    continue;
                }
            };

            trace!(%entity, ?dest, "draw sprite");
            if let Err(err) = ctx.renderer.draw_texture(texture, dest) {
                warn!(%entity, error = %err, "sprite draw failed");
                first_failure.get_or_insert(err);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec2;

    use super::*;
    use crate::platform::TextureHandle;
    use crate::test_support::{Call, FakeAssets, FakeRenderer};

    fn e(index: u32) -> Entity {
        Entity::from_raw_parts(index, 0)
    }

    fn render(
        entities: &[Entity],
        components: &Components,
        renderer: &mut FakeRenderer,
        assets: &FakeAssets,
        camera: Rect,
    ) -> Result<(), RenderError> {
        let mut ctx = RenderContext::new(renderer, camera, assets, false);
        SpriteRenderSystem::new().render(entities, components, &mut ctx)
    }

    #[test]
    fn test_draws_relative_to_camera() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_xy(50.0, 60.0).scaled(2.0));
        components.insert(e(0), Sprite::new("tank", 16, 8));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default().with_texture("tank", 7);
        render(&[e(0)], &components, &mut renderer, &assets, Rect::new(10, 20, 800, 600)).unwrap();

        assert_eq!(
            renderer.calls,
            vec![Call::Texture(TextureHandle(7), Rect::new(40, 40, 32, 16))]
        );
    }

    #[test]
    fn test_z_order() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_xy(0.0, 0.0));
        components.insert(e(0), Sprite::new("top", 4, 4).with_z_index(2));
        components.insert(e(1), Transform::from_xy(0.0, 0.0));
        components.insert(e(1), Sprite::new("bottom", 4, 4).with_z_index(-1));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default()
            .with_texture("top", 1)
            .with_texture("bottom", 2);
        render(&[e(0), e(1)], &components, &mut renderer, &assets, Rect::from_size(100, 100))
            .unwrap();

        let handles: Vec<_> = renderer
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Texture(h, _) => Some(h.0),
                _ => None,
            })
            .collect();
        assert_eq!(handles, vec![2, 1]);
    }

    #[test]
    fn test_missing_texture_is_skipped() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_position(Vec2::ZERO));
        components.insert(e(0), Sprite::new("missing", 4, 4));
        components.insert(e(1), Transform::from_position(Vec2::ZERO));
        components.insert(e(1), Sprite::new("tank", 4, 4));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default().with_texture("tank", 3);
        render(&[e(0), e(1)], &components, &mut renderer, &assets, Rect::from_size(100, 100))
            .unwrap();

        assert_eq!(renderer.calls.len(), 1);
    }

    #[test]
    fn test_off_screen_is_culled() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_xy(500.0, 500.0));
        components.insert(e(0), Sprite::new("tank", 4, 4));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default().with_texture("tank", 3);
        render(&[e(0)], &components, &mut renderer, &assets, Rect::from_size(100, 100)).unwrap();

        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_backend_failure_keeps_drawing_the_rest() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_xy(0.0, 0.0));
        components.insert(e(0), Sprite::new("broken", 4, 4));
        components.insert(e(1), Transform::from_xy(10.0, 0.0));
        components.insert(e(1), Sprite::new("tank", 4, 4));

        let mut renderer = FakeRenderer {
            failing_texture: Some(TextureHandle(9)),
            ..FakeRenderer::default()
        };
        let assets = FakeAssets::default()
            .with_texture("broken", 9)
            .with_texture("tank", 3);
        let result = render(&[e(0), e(1)], &components, &mut renderer, &assets, Rect::from_size(100, 100));

        assert!(matches!(result, Err(RenderError::Backend(_))));
        assert_eq!(
            renderer.calls,
            vec![Call::Texture(TextureHandle(3), Rect::new(10, 0, 4, 4))]
        );
    }

    #[test]
    fn test_huge_scale_does_not_overflow() {
        let mut components = Components::new();
        components.insert(e(0), Transform::from_xy(1.0, 1.0).scaled(1.0e9));
        components.insert(e(0), Sprite::new("tank", 32, 32));

        let mut renderer = FakeRenderer::default();
        let assets = FakeAssets::default().with_texture("tank", 3);
        render(&[e(0)], &components, &mut renderer, &assets, Rect::from_size(800, 600)).unwrap();

        assert_eq!(
            renderer.calls,
            vec![Call::Texture(TextureHandle(3), Rect::new(1, 1, i32::MAX, i32::MAX))]
        );
    }
}
