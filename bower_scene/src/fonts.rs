// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fonts known to a scene.

use alloc::sync::Arc;
use alloc::vec::Vec;

use bower_text::{Font, Monospace};

/// Handle to a font registered with [`FontBook::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(u32);

/// The fonts text nodes can name, plus the fallback used when they name none.
#[derive(Clone)]
pub struct FontBook {
    fallback: Arc<dyn Font>,
    fonts: Vec<Arc<dyn Font>>,
}

impl core::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontBook")
            .field("fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new(Arc::new(Monospace::default()))
    }
}

impl FontBook {
    /// Creates a book whose fallback font is `fallback`.
    pub fn new(fallback: Arc<dyn Font>) -> Self {
        Self {
            fallback,
            fonts: Vec::new(),
        }
    }

    /// Registers a font.
    pub fn insert(&mut self, font: Arc<dyn Font>) -> FontId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "FontId holds 32-bit indices."
        )]
        let id = FontId(self.fonts.len() as u32);
        self.fonts.push(font);
        id
    }

    /// Resolves `id`, falling back to the default font for `None` or unknown ids.
    pub fn resolve(&self, id: Option<FontId>) -> &dyn Font {
        id.and_then(|FontId(idx)| self.fonts.get(idx as usize))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// The fallback font.
    pub fn fallback(&self) -> &dyn Font {
        self.fallback.as_ref()
    }
}
