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

//! Console memory image
//!
//! [`Ram`] holds every buffer the renderer reads from or writes to. The
//! renderer never allocates these itself; it borrows them per call.
//!
//! # Memory Map
//!
//! | Region       | Size          | Format                                  |
//! |--------------|---------------|-----------------------------------------|
//! | screen       | 16320 bytes   | 240×136 pixels, 4bpp, low nibble first  |
//! | palette      | 48 bytes      | 16 RGB triplets                         |
//! | mapping      | 8 bytes       | 16 × 4-bit color remap entries          |
//! | tiles        | 16384 bytes   | 2 banks × 256 tiles × 32 bytes          |
//! | font         | 2048 bytes    | 256 glyphs × 8 bytes, 1bpp              |
//! | map          | 32640 bytes   | 240×136 cells, one tile index per cell  |
//! | flags        | 512 bytes     | one flag byte per sprite                |
//!
//! # Example
//!
//! ```
//! use ticraster::core::memory::Ram;
//!
//! let mut ram = Ram::new();
//! ram.set_map_cell(0, 0, 7);
//! assert_eq!(ram.map_cell_wrapped(240, -136), 7);
//! ```

pub mod packing;

use packing::{peek4, poke4};

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 240;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 136;

/// Packed framebuffer size in bytes (two pixels per byte)
pub const SCREEN_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 2;

/// Tile edge length in pixels
pub const SPRITE_SIZE: usize = 8;

/// Tiles per bank
pub const BANK_SPRITES: usize = 256;

/// Number of tile banks (background, foreground)
pub const SPRITE_BANKS: usize = 2;

/// Bytes in one 8×8 tile at 4bpp
pub const TILE_BYTES: usize = SPRITE_SIZE * SPRITE_SIZE / 2;

/// Tile memory size in bytes
pub const TILES_BYTES: usize = BANK_SPRITES * SPRITE_BANKS * TILE_BYTES;

/// Glyphs per font face
pub const FONT_CHARS: usize = 128;

/// Font memory size (regular + alternate face, 1bpp 8×8 glyphs)
pub const FONT_BYTES: usize = FONT_CHARS * 2 * SPRITE_SIZE;

/// Regular font column width
pub const FONT_WIDTH: i32 = 6;

/// Alternate font column width
pub const ALTFONT_WIDTH: i32 = 4;

/// Font line height
pub const FONT_HEIGHT: i32 = 6;

/// Map width in cells
pub const MAP_WIDTH: usize = 240;

/// Map height in cells
pub const MAP_HEIGHT: usize = 136;

/// Flag memory size (one byte per sprite of both banks)
pub const FLAGS_BYTES: usize = BANK_SPRITES * SPRITE_BANKS;

/// Palette size in colors
pub const PALETTE_SIZE: usize = 16;

/// Blit segment selected at power-on (4bpp, bank 0, page 0)
pub const DEFAULT_BLIT_SEGMENT: u8 = 2;

/// Sweetie-16, the console's default palette
pub const DEFAULT_PALETTE: [u8; PALETTE_SIZE * 3] = [
    0x1a, 0x1c, 0x2c, 0x5d, 0x27, 0x5d, 0xb1, 0x3e, 0x53, 0xef, 0x7d, 0x57, //
    0xff, 0xcd, 0x75, 0xa7, 0xf0, 0x70, 0x38, 0xb7, 0x64, 0x25, 0x71, 0x79, //
    0x29, 0x36, 0x6f, 0x3b, 0x5d, 0xc9, 0x41, 0xa6, 0xf6, 0x73, 0xef, 0xf7, //
    0xf4, 0xf4, 0xf4, 0x94, 0xb0, 0xc2, 0x56, 0x6c, 0x86, 0x33, 0x3c, 0x57, //
];

/// Console memory image
///
/// The byte regions have fixed sizes. Outside the crate they are reachable
/// only as slices, so their length never changes; inside the crate the
/// renderer borrows individual fields so that it can write the screen while
/// reading tiles or the map.
pub struct Ram {
    /// Packed 4bpp framebuffer
    pub(crate) screen: Vec<u8>,

    /// RGB palette, used only when converting the screen to RGBA
    pub palette: [u8; PALETTE_SIZE * 3],

    /// Persistent 16-entry color remap table, packed 4 bits per entry
    pub mapping: [u8; PALETTE_SIZE / 2],

    /// Current blit segment (see `BlitMode`)
    pub blit_segment: u8,

    /// Tile and sprite banks
    pub(crate) tiles: Vec<u8>,

    /// System font, regular face followed by the alternate face
    pub(crate) font: Vec<u8>,

    /// Map cells, row-major
    pub(crate) map: Vec<u8>,

    /// Sprite flags
    pub(crate) flags: Vec<u8>,
}

impl Ram {
    /// Create a zeroed memory image with the default palette, an identity
    /// color remap table and the default blit segment
    pub fn new() -> Self {
        let mut ram = Self {
            screen: vec![0; SCREEN_BYTES],
            palette: DEFAULT_PALETTE,
            mapping: [0; PALETTE_SIZE / 2],
            blit_segment: DEFAULT_BLIT_SEGMENT,
            tiles: vec![0; TILES_BYTES],
            font: vec![0; FONT_BYTES],
            map: vec![0; MAP_WIDTH * MAP_HEIGHT],
            flags: vec![0; FLAGS_BYTES],
        };
        ram.reset_mapping();
        ram
    }

    /// Restore the identity color remap table
    pub fn reset_mapping(&mut self) {
        for i in 0..PALETTE_SIZE {
            poke4(&mut self.mapping, i, i as u8);
        }
    }

    /// Read one entry of the color remap table
    #[inline]
    pub fn mapping_entry(&self, color: u8) -> u8 {
        peek4(&self.mapping, (color & 0x0F) as usize)
    }

    /// Write one entry of the color remap table
    pub fn set_mapping_entry(&mut self, color: u8, value: u8) {
        poke4(&mut self.mapping, (color & 0x0F) as usize, value);
    }

    /// Packed framebuffer, [`SCREEN_BYTES`] long
    pub fn screen(&self) -> &[u8] {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut [u8] {
        &mut self.screen
    }

    /// Tile banks, [`TILES_BYTES`] long
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [u8] {
        &mut self.tiles
    }

    /// Font glyphs, [`FONT_BYTES`] long
    pub fn font(&self) -> &[u8] {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut [u8] {
        &mut self.font
    }

    /// Map cells, `MAP_WIDTH * MAP_HEIGHT` long
    pub fn map(&self) -> &[u8] {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut [u8] {
        &mut self.map
    }

    /// Sprite flags, [`FLAGS_BYTES`] long
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut [u8] {
        &mut self.flags
    }

    /// Read a map cell, returning 0 outside the map
    pub fn map_cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= MAP_WIDTH as i32 || y >= MAP_HEIGHT as i32 {
            return 0;
        }
        self.map[y as usize * MAP_WIDTH + x as usize]
    }

    /// Write a map cell, ignoring writes outside the map
    pub fn set_map_cell(&mut self, x: i32, y: i32, value: u8) {
        if x < 0 || y < 0 || x >= MAP_WIDTH as i32 || y >= MAP_HEIGHT as i32 {
            return;
        }
        self.map[y as usize * MAP_WIDTH + x as usize] = value;
    }

    /// Read a map cell with toroidal wraparound on both axes
    pub fn map_cell_wrapped(&self, x: i32, y: i32) -> u8 {
        let x = x.rem_euclid(MAP_WIDTH as i32) as usize;
        let y = y.rem_euclid(MAP_HEIGHT as i32) as usize;
        self.map[y * MAP_WIDTH + x]
    }

    /// Convert the framebuffer to RGBA8 through the palette
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 4);
        for i in 0..SCREEN_WIDTH * SCREEN_HEIGHT {
            let color = peek4(&self.screen, i) as usize * 3;
            out.extend_from_slice(&self.palette[color..color + 3]);
            out.push(0xFF);
        }
        out
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
