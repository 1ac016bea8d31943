//! Runtime error types.

use engine_component::EcsError;
use engine_system::{PlatformError, RenderError, SystemKind};

use crate::config::ConfigError;

/// Errors surfaced by the engine core.
///
/// Only [`Initialization`](Self::Initialization), [`Config`](Self::Config)
/// and [`Platform`](Self::Platform) are fatal, and only while the engine is
/// being constructed. Everything else is contained to the operation, system
/// pass or event handler that produced it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A collaborator could not be set up.
    #[error("engine initialisation failed: {0}")]
    Initialization(String),

    /// The configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An entity manager operation failed.
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// No system of this kind is registered.
    #[error("system '{0}' is not registered")]
    SystemNotFound(SystemKind),

    /// A renderer backend call failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A windowing call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// An event handler reported a failure of its own.
    #[error("event handler failed: {0}")]
    Handler(String),
}
