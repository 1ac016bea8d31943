//! Input mapping and the built-in event handlers.

use engine_component::RigidBody;
use engine_math::Vec2;
use engine_system::{InputEvent, InputSource, KeyCode};
use tracing::debug;

use crate::error::EngineError;
use crate::events::{Event, EventBus, EventContext};
use crate::tick::GameLoop;
use crate::world::World;

/// Drain this frame's input, applying loop controls and queueing events.
///
/// Quit and Escape stop the loop, F1 toggles the debug overlay and P toggles
/// pause. Every key press is also queued as [`Event::PlayerMove`].
///
/// Returns the number of input events consumed.
pub fn poll_input(
    input: &mut dyn InputSource,
    game_loop: &mut GameLoop,
    bus: &mut EventBus<World>,
) -> usize {
    let mut polled = 0;
    while let Some(event) = input.poll_event() {
        polled += 1;
        debug!(?event, "input");
        match event {
            InputEvent::Quit => game_loop.stop(),
            InputEvent::KeyDown(key) => {
                match key {
                    KeyCode::Escape => game_loop.stop(),
                    KeyCode::F1 => game_loop.toggle_debug(),
                    KeyCode::P => game_loop.toggle_pause(),
                    _ => {}
                }
                bus.emit(Event::PlayerMove(key));
            }
        }
    }
    polled
}

/// Velocity an arrow key asks for, `Vec2::ZERO` for Space, `None` for keys
/// that do not steer.
#[must_use]
pub fn steering(key: KeyCode, speed: f32) -> Option<Vec2> {
    match key {
        KeyCode::Up => Some(Vec2::new(0.0, -speed)),
        KeyCode::Down => Some(Vec2::new(0.0, speed)),
        KeyCode::Left => Some(Vec2::new(-speed, 0.0)),
        KeyCode::Right => Some(Vec2::new(speed, 0.0)),
        KeyCode::Space => Some(Vec2::ZERO),
        _ => None,
    }
}

/// A [`Event::PlayerMove`] handler that sets the velocity of the entity
/// tagged `tag`.
///
/// Fails if no entity carries the tag or it has no [`RigidBody`].
pub fn steer_tagged(
    tag: impl Into<String>,
    speed: f32,
) -> impl FnMut(&mut EventContext<'_, World>, &Event) -> Result<(), EngineError> {
    let tag = tag.into();
    move |ctx: &mut EventContext<'_, World>, event: &Event| {
        let Event::PlayerMove(key) = event else {
            return Ok(());
        };
        let Some(velocity) = steering(*key, speed) else {
            return Ok(());
        };
        let entity = ctx.state.entity_by_tag(&tag)?;
        ctx.state.get_component_mut::<RigidBody>(entity)?.velocity = velocity;
        debug!(%entity, %tag, ?velocity, "steered");
        Ok(())
    }
}

/// The [`Event::DestroyEntity`] handler: marks the target for destruction at
/// the end of the frame.
pub fn destroy_on_event(ctx: &mut EventContext<'_, World>, event: &Event) -> Result<(), EngineError> {
    if let Event::DestroyEntity(entity) = event {
        ctx.state.destroy_entity(*entity)?;
    }
    Ok(())
}
