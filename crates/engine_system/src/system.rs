//! The [`System`] trait and the closed set of system kinds.

use engine_component::{Components, EcsError, Entity, Signature};

use crate::context::RenderContext;
use crate::error::RenderError;

/// The kinds of system the engine can register. At most one instance of each
/// kind is registered at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemKind {
    Movement,
    SpriteRender,
    DebugOverlay,
}

impl SystemKind {
    /// A human-readable name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SystemKind::Movement => "movement",
            SystemKind::SpriteRender => "sprite_render",
            SystemKind::DebugOverlay => "debug_overlay",
        }
    }
}

impl std::fmt::Display for SystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour run over the entities matching a required signature.
///
/// The registry owns the matched entity list and passes it in; a system never
/// scans the entity population itself. Systems may mutate component values
/// but cannot attach, detach or destroy anything: structural changes go
/// through the entity manager between passes.
pub trait System {
    /// Which kind this system is.
    fn kind(&self) -> SystemKind;

    /// Components an entity must own to be matched.
    fn required(&self) -> Signature;

    /// Advance the system by `dt` seconds over its matched entities.
    ///
    /// # Errors
    ///
    /// A failure aborts this system's pass only.
    fn update(
        &mut self,
        _entities: &[Entity],
        _components: &mut Components,
        _dt: f64,
    ) -> Result<(), EcsError> {
        Ok(())
    }

    /// Whether [`render`](Self::render) should be called.
    fn renders(&self) -> bool {
        false
    }

    /// Draw the matched entities.
    ///
    /// # Errors
    ///
    /// A backend failure aborts this system's pass only.
    fn render(
        &self,
        _entities: &[Entity],
        _components: &Components,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}
