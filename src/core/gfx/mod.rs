// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Graphics core
//!
//! This module implements the drawing layer of the console: every pixel a
//! script, editor or menu puts on screen goes through [`Gfx`]. The context
//! owns the memory image ([`Ram`]) and the [`Rasterizer`] so that the depth
//! buffer, the span buffers and the framebuffer can only be touched by one
//! drawing call at a time.
//!
//! # Screen
//!
//! - 240×136 pixels, 4 bits per pixel, two pixels per byte
//! - Low nibble holds the even X coordinate
//! - Colors are indices into a 16-entry RGB palette
//!
//! # Color Mapping
//!
//! Every draw call that paints logical colors runs them through the
//! persistent 16-entry remap table in [`Ram::mapping`]. Calls that take a
//! transparent list build a [`PaletteMap`] in which those colors map to
//! [`TRANSPARENT_COLOR`] and are never painted.
//!
//! # Tile Sources
//!
//! Sprites, maps and textured triangles read tiles through the current
//! blit segment ([`BlitMode`]); `print` reads the system font and `font`
//! reads the bank opposite to the blit segment.

use crate::core::config::GfxConfig;
use crate::core::error::Result;
use crate::core::memory::{Ram, FLAGS_BYTES};

mod draw;
pub mod palette;
pub mod primitives;
pub mod render;
pub mod tilesheet;

pub use palette::{map_color, PaletteMap, TRANSPARENT_COLOR};
pub use primitives::{ClipRect, Flip, RemapResult, Rotate, TexVertex, TextureSource, Vertex};
pub use render::{LegacySource, Rasterizer, RemapFn, Sampler, Shader, ShaderContext, TextLayout};
pub use tilesheet::{BlitMode, Bpp, PixelPacking, Segment, TilePtr, TileSheet, TileSheetMut};

/// Graphics context
///
/// # Examples
///
/// ```
/// use ticraster::core::gfx::Gfx;
///
/// let mut gfx = Gfx::new();
/// gfx.cls(0);
/// gfx.rect(0, 0, 8, 8, 5);
///
/// assert_eq!(gfx.pixel(7, 7), 5);
/// assert_eq!(gfx.pixel(8, 8), 0);
/// ```
pub struct Gfx {
    /// Console memory image
    pub(crate) ram: Ram,

    /// Clip, depth and span state
    pub(crate) rasterizer: Rasterizer,

    /// Color used by `reset`
    clear_color: u8,
}

impl Gfx {
    /// Create a context over a fresh memory image
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            rasterizer: Rasterizer::new(),
            clear_color: 0,
        }
    }

    /// Create a context with the palette, blit mode and clear color taken
    /// from `config`
    pub fn with_config(config: &GfxConfig) -> Result<Self> {
        let mut gfx = Self::new();
        gfx.ram.palette = config.parse_palette()?;
        gfx.ram.blit_segment = config.blit_mode().segment();
        gfx.clear_color = config.clear_color & 0x0F;

        log::debug!(
            "Gfx configured: blit segment {}, clear color {}",
            gfx.ram.blit_segment,
            gfx.clear_color
        );
        Ok(gfx)
    }

    /// Start a new frame: full clip, identity remap table, cleared screen
    /// and depth buffer
    pub fn reset(&mut self) {
        self.rasterizer.reset_clip();
        self.ram.reset_mapping();
        self.cls(self.clear_color);
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    /// Current blit mode
    ///
    /// System segments (0 and 1) have no blit mode and report the default.
    pub fn blit_mode(&self) -> BlitMode {
        BlitMode::from_segment(self.ram.blit_segment).unwrap_or_default()
    }

    pub fn set_blit_mode(&mut self, mode: BlitMode) {
        self.ram.blit_segment = mode.segment();
    }

    /// Restrict drawing to a rectangle (clamped to the screen)
    pub fn clip(&mut self, x: i32, y: i32, width: i32, height: i32) {
        log::trace!("clip({}, {}, {}, {})", x, y, width, height);
        self.rasterizer.set_clip(x, y, width, height);
    }

    pub fn reset_clip(&mut self) {
        self.rasterizer.reset_clip();
    }

    /// Clear the clip region and the whole depth buffer
    ///
    /// With a full-screen clip the raw color is written to every pixel;
    /// otherwise the clip rectangle is filled with the remapped color.
    pub fn cls(&mut self, color: u8) {
        log::trace!("cls({})", color);
        let color = color & 0x0F;

        if self.rasterizer.clip().is_full() {
            Rasterizer::fill_screen(&mut self.ram.screen, color);
        } else {
            let clip = self.rasterizer.clip();
            let color = map_color(&self.ram.mapping, color);
            self.rasterizer
                .draw_rect(&mut self.ram.screen, clip.l, clip.t, clip.r - clip.l, clip.b - clip.t, color);
        }

        self.rasterizer.clear_depth();
    }

    /// Set a pixel through the remap table
    pub fn pix(&mut self, x: i32, y: i32, color: u8) {
        let color = map_color(&self.ram.mapping, color);
        self.rasterizer.set_pixel(&mut self.ram.screen, x, y, color);
    }

    /// Read a pixel; 0 outside the screen
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        Rasterizer::get_pixel(&self.ram.screen, x, y)
    }

    /// Read a sprite flag bit; out of range reads are false
    pub fn fget(&self, index: i32, bit: u8) -> bool {
        if index < 0 || index as usize >= FLAGS_BYTES || bit >= 8 {
            return false;
        }
        self.ram.flags[index as usize] & (1 << bit) != 0
    }

    /// Write a sprite flag bit; out of range writes are ignored
    pub fn fset(&mut self, index: i32, bit: u8, value: bool) {
        if index < 0 || index as usize >= FLAGS_BYTES || bit >= 8 {
            return;
        }
        let flags = &mut self.ram.flags[index as usize];
        if value {
            *flags |= 1 << bit;
        } else {
            *flags &= !(1 << bit);
        }
    }

    /// Read a map cell; 0 outside the map
    pub fn mget(&self, x: i32, y: i32) -> u8 {
        self.ram.map_cell(x, y)
    }

    /// Write a map cell; ignored outside the map
    pub fn mset(&mut self, x: i32, y: i32, value: u8) {
        self.ram.set_map_cell(x, y, value);
    }

    /// Buffered `1/z` at a pixel (0 where nothing depth-tested was drawn)
    pub fn depth_at(&self, x: i32, y: i32) -> f32 {
        self.rasterizer.depth(x, y)
    }

    /// Palette map for one call: remap table plus transparent colors
    fn palette_map(&self, transparent: &[u8]) -> PaletteMap {
        PaletteMap::new(&self.ram.mapping, transparent)
    }

    fn map_color(&self, color: u8) -> u8 {
        map_color(&self.ram.mapping, color)
    }
}

impl Default for Gfx {
    fn default() -> Self {
        Self::new()
    }
}
