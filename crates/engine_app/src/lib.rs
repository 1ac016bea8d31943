//! # engine_app
//!
//! The runtime core of the engine. It owns the canonical world state, the
//! system registry, the event bus and the fixed-timestep game loop.
//!
//! This crate provides:
//!
//! - [`World`]: entity lifecycle, component attach/detach with signature
//!   tracking, tag and group indices, deferred destruction.
//! - [`SystemRegistry`]: incremental matched lists and ordered dispatch.
//! - [`EventBus`]: deferred publish/subscribe with per-handler failure
//!   isolation.
//! - [`Engine`]: input, events, update, render and pacing in one loop.
//! - [`headless`]: in-memory platform collaborators.

pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod events;
pub mod headless;
pub mod input;
pub mod registry;
pub mod tags;
pub mod tick;
pub mod world;

pub use config::{CONFIG_PATH_ENV, ConfigError, EngineConfig};
pub use engine::{Engine, Platform};
pub use error::EngineError;
pub use events::{Event, EventBus, EventContext, EventHandler, EventKind, ProcessReport};
pub use registry::{SystemEntry, SystemRegistry};
pub use tags::{GroupIndex, TagIndex};
pub use tick::{Clock, FramePacer, GameLoop, LoopState, ManualClock, SystemClock};
pub use world::World;
