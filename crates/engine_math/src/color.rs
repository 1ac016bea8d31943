//! RGBA colour.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Default background clear colour.
    pub const CHARCOAL: Self = Self::rgb(21, 21, 21);
    /// Colour used for debug markers.
    pub const DEBUG_RED: Self = Self::rgb(255, 21, 21);

    /// Create a colour from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
