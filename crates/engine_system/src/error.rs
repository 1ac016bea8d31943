//! Error types for systems and platform collaborators.

/// A drawing call failed in the renderer backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The backend rejected the call.
    #[error("renderer backend error: {0}")]
    Backend(String),
}

/// An asset lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// No texture is registered under this id.
    #[error("texture '{0}' not found")]
    TextureNotFound(String),

    /// No font is registered under this id.
    #[error("font '{0}' not found")]
    FontNotFound(String),
}

/// A windowing operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The window could not be created.
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    /// The window could not be destroyed.
    #[error("failed to destroy window: {0}")]
    WindowDestroy(String),
}
