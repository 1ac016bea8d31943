//! Engine: wires the world, the event bus and the platform into the game
//! loop.

use engine_math::Rect;
use engine_system::{
    AssetStore, DebugOverlaySystem, InputSource, MovementSystem, RenderContext, RendererBackend,
    SpriteRenderSystem, WindowHandle, WindowSystem,
};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{EventBus, EventKind};
use crate::input::{destroy_on_event, poll_input};
use crate::tick::{Clock, GameLoop, LoopState};
use crate::world::World;

/// The collaborators the engine drives but does not implement.
pub struct Platform {
    pub windows: Box<dyn WindowSystem>,
    pub renderer: Box<dyn RendererBackend>,
    pub assets: Box<dyn AssetStore>,
    pub input: Box<dyn InputSource>,
    pub clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}

/// A running engine instance.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    world: World,
    events: EventBus<World>,
    platform: Platform,
    /// `None` once shut down.
    window: Option<WindowHandle>,
    game_loop: GameLoop,
    camera: Rect,
}

impl Engine {
    /// Validate the config, open the window and register the built-in
    /// systems and event handlers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for an invalid config,
    /// [`EngineError::Platform`] if the window cannot be created and
    /// [`EngineError::Initialization`] if the renderer cannot clear the new
    /// window. No window is left open on failure.
    pub fn new(config: EngineConfig, mut platform: Platform) -> Result<Self, EngineError> {
        config.validate()?;

        let window = platform
            .windows
            .create_window(&config.title, config.width, config.height)?;
        info!(
            title = %config.title,
            width = config.width,
            height = config.height,
            target_fps = config.target_fps,
            "window opened"
        );

        let cleared = platform
            .renderer
            .set_draw_color(config.clear_color)
            .and_then(|()| platform.renderer.clear());
        if let Err(err) = cleared {
            error!(error = %err, "renderer failed its first clear");
            if let Err(close_err) = platform.windows.destroy_window(window) {
                warn!(error = %close_err, "failed to destroy window");
            }
            return Err(EngineError::Initialization(format!("renderer unusable: {err}")));
        }

        let mut world = World::new();
        world.add_system(MovementSystem::new());
        world.add_system(SpriteRenderSystem::new());
        world.add_system(DebugOverlaySystem::default());

        let mut events = EventBus::new();
        events.subscribe(EventKind::DestroyEntity, destroy_on_event);

        let game_loop = GameLoop::new(config.frame_duration(), config.max_frames)
            .with_paused(config.paused)
            .with_debug(config.debug);

        Ok(Self {
            camera: config.camera(),
            config,
            world,
            events,
            platform,
            window: Some(window),
            game_loop,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The event bus, for subscribing handlers and emitting events.
    pub fn events_mut(&mut self) -> &mut EventBus<World> {
        &mut self.events
    }

    #[must_use]
    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    /// The visible world region.
    #[must_use]
    pub fn camera(&self) -> Rect {
        self.camera
    }

    /// Ask the loop to stop after the current iteration.
    pub fn stop(&mut self) {
        self.game_loop.stop();
    }

    /// Run one loop iteration and return the loop state afterwards.
    pub fn step(&mut self) -> LoopState {
        if !self.game_loop.is_running() {
            return LoopState::Stopped;
        }
        let frame_start = self.platform.clock.now();

        poll_input(self.platform.input.as_mut(), &mut self.game_loop, &mut self.events);
        self.events.process(&mut self.world);

        let dt = self.game_loop.pacer_mut().delta(frame_start);
        if self.game_loop.is_paused() {
            debug!(frame = self.game_loop.frames(), "paused, skipping update");
        } else {
            self.world.update(dt);
        }

        self.render();

        let destroyed = self.world.flush();
        if destroyed > 0 {
            debug!(destroyed, "flushed destroyed entities");
        }

        let frame = self.game_loop.frames();
        self.game_loop.finish_frame();
        if self.game_loop.is_running() {
            self.game_loop
                .pacer()
                .pace(self.platform.clock.as_ref(), frame_start, frame);
        }
        self.game_loop.state()
    }

    /// Run until the loop stops. Returns the number of frames run.
    pub fn run(&mut self) -> u64 {
        info!(
            target_fps = self.config.target_fps,
            max_frames = self.config.max_frames,
            "starting game loop"
        );
        while self.step() == LoopState::Running {}
        info!(frames = self.game_loop.frames(), "game loop finished");
        self.game_loop.frames()
    }

    fn render(&mut self) {
        let Platform {
            renderer, assets, ..
        } = &mut self.platform;

        if let Err(err) = renderer.set_draw_color(self.config.clear_color) {
            warn!(error = %err, "set draw color failed");
        }
        if let Err(err) = renderer.clear() {
            warn!(error = %err, "clear failed");
        }

        let mut ctx = RenderContext::new(
            renderer.as_mut(),
            self.camera,
            assets.as_ref(),
            self.game_loop.is_debug(),
        );
        let failed = self.world.render(&mut ctx);
        if failed > 0 {
            debug!(failed, "render passes failed this frame");
        }

        if let Err(err) = renderer.present() {
            warn!(error = %err, "present failed");
        }
    }

    /// Close the window. Safe to call more than once; also runs on drop.
    pub fn shutdown(&mut self) {
        let Some(window) = self.window.take() else {
            return;
        };
        match self.platform.windows.destroy_window(window) {
            Ok(()) => info!("engine shut down"),
            Err(err) => error!(error = %err, "failed to destroy window"),
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
