// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tint colors passed through to the drawing backend.

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; `255` is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);
    /// Light gray.
    pub const LIGHT_GRAY: Self = Self::rgb8(200, 200, 200);
    /// Red.
    pub const RED: Self = Self::rgb8(230, 41, 55);
    /// Green.
    pub const GREEN: Self = Self::rgb8(0, 228, 48);
    /// Blue.
    pub const BLUE: Self = Self::rgb8(0, 121, 241);
    /// Yellow.
    pub const YELLOW: Self = Self::rgb8(253, 249, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba8(0, 0, 0, 0);

    /// Creates a color from all four channels.
    #[must_use]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Returns the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
