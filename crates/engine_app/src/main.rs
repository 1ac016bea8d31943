//! # engine_app: demo binary
//!
//! Runs the tank scene on the headless platform.
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`RUST_LOG`, default `engine_app=info`).
//! 2. Load [`EngineConfig`] from the file named by `ENGINE_CONFIG`.
//! 3. Open the window, spawn the scene and enter the game loop.
//! 4. The autopilot steers the tank round a square, then presses Escape.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_app::headless::{HeadlessWindowSystem, MemoryAssetStore, NullRenderer};
use engine_app::{Engine, EngineConfig, Platform, SystemClock, demo};

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    info!("engine starting");

    let config = EngineConfig::load().context("loading engine config")?;

    let mut assets = MemoryAssetStore::new();
    assets.add_texture(demo::TANK_TEXTURE);

    let platform = Platform {
        windows: Box::new(HeadlessWindowSystem::new()),
        renderer: Box::new(NullRenderer::new()),
        assets: Box::new(assets),
        input: Box::new(demo::autopilot()),
        clock: Box::new(SystemClock::new()),
    };

    let mut engine = Engine::new(config, platform).context("starting engine")?;
    let tank = demo::spawn_tank(engine.world_mut())?;
    demo::subscribe_controls(engine.events_mut());
    info!(%tank, "scene loaded");

    let frames = engine.run();
    engine.shutdown();

    info!(frames, "engine shut down");
    Ok(())
}
