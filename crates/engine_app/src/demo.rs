//! The demo scene: a steerable tank.

use engine_component::{EcsError, Entity, RigidBody, Sprite, Transform};
use engine_system::{InputEvent, KeyCode};

use crate::events::{EventBus, EventKind};
use crate::headless::ScriptedInput;
use crate::input::steer_tagged;
use crate::world::World;

pub const TANK_TAG: &str = "tank";
pub const PLAYER_GROUP: &str = "player";
pub const TANK_TEXTURE: &str = "tank";
/// Arrow-key speed in world units per second.
pub const TANK_SPEED: f32 = 100.0;
/// Frames the autopilot drives in each direction.
pub const AUTOPILOT_LEG_FRAMES: usize = 60;

/// Spawn the tank at (50, 50), tagged and grouped as the player.
///
/// # Errors
///
/// Fails if the world has no entity slot left.
pub fn spawn_tank(world: &mut World) -> Result<Entity, EcsError> {
    let tank = world.create_entity()?;
    world.tag_entity(tank, TANK_TAG)?;
    world.group_entity(tank, PLAYER_GROUP)?;
    world.add_component(tank, Transform::from_xy(50.0, 50.0))?;
    world.add_component(tank, RigidBody::REST)?;
    world.add_component(tank, Sprite::new(TANK_TEXTURE, 32, 32))?;
    Ok(tank)
}

/// Route arrow keys to the tank.
pub fn subscribe_controls(events: &mut EventBus<World>) {
    events.subscribe(EventKind::PlayerMove, steer_tagged(TANK_TAG, TANK_SPEED));
}

/// Scripted input that drives the tank round a square and then presses
/// Escape, so an unattended demo run always ends.
#[must_use]
pub fn autopilot() -> ScriptedInput {
    let input = ScriptedInput::new();
    for key in [KeyCode::Right, KeyCode::Down, KeyCode::Left, KeyCode::Up] {
        input.push_frame([InputEvent::KeyDown(key)]);
        for _ in 1..AUTOPILOT_LEG_FRAMES {
            input.push_frame(Vec::<InputEvent>::new());
        }
    }
    input.push_frame([InputEvent::KeyDown(KeyCode::Escape)]);
    input
}
