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

//! Palette mapping and transparency

use crate::core::memory::packing::peek4;
use crate::core::memory::PALETTE_SIZE;

/// Sentinel meaning "do not paint this pixel"
///
/// Lies outside the 4-bit color range so it never collides with a color.
pub const TRANSPARENT_COLOR: u8 = 255;

/// Per-call 16-entry color lookup
///
/// # Examples
///
/// ```
/// use ticraster::core::gfx::{PaletteMap, TRANSPARENT_COLOR};
///
/// let identity = [0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE];
/// let map = PaletteMap::new(&identity, &[0, 5]);
/// assert_eq!(map.get(0), TRANSPARENT_COLOR);
/// assert_eq!(map.get(3), 3);
/// assert!(map.is_transparent(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteMap {
    entries: [u8; PALETTE_SIZE],
}

impl PaletteMap {
    /// Build from the packed persistent remap table and a transparent list
    pub fn new(remap: &[u8], transparent: &[u8]) -> Self {
        let mut entries = [0u8; PALETTE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = peek4(remap, i);
        }
        for &color in transparent {
            entries[(color & 0x0F) as usize] = TRANSPARENT_COLOR;
        }
        Self { entries }
    }

    /// Identity mapping with no transparent colors
    pub fn identity() -> Self {
        let mut entries = [0u8; PALETTE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self { entries }
    }

    /// Two-color mapping for 1bpp glyphs: 0 is transparent, 1 is `color`
    pub fn glyph(color: u8) -> Self {
        let mut entries = [TRANSPARENT_COLOR; PALETTE_SIZE];
        entries[1] = color;
        Self { entries }
    }

    #[inline(always)]
    pub fn get(&self, color: u8) -> u8 {
        self.entries[(color & 0x0F) as usize]
    }

    #[inline(always)]
    pub fn is_transparent(&self, color: u8) -> bool {
        self.get(color) == TRANSPARENT_COLOR
    }
}

impl Default for PaletteMap {
    fn default() -> Self {
        Self::identity()
    }
}

/// Map one color through the persistent remap table
#[inline]
pub fn map_color(remap: &[u8], color: u8) -> u8 {
    peek4(remap, (color & 0x0F) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_table() -> [u8; 8] {
        [0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE]
    }

    #[test]
    fn test_palette_map_identity() {
        let map = PaletteMap::new(&identity_table(), &[]);
        assert_eq!(map, PaletteMap::identity());
    }

    #[test]
    fn test_palette_map_masks_transparent_index() {
        let map = PaletteMap::new(&identity_table(), &[0x12]);
        assert!(map.is_transparent(2));
        assert!(!map.is_transparent(0x12 & 0x01));
    }

    #[test]
    fn test_palette_map_uses_remap() {
        let mut table = identity_table();
        table[0] = 0x1C; // color 0 -> 12
        let map = PaletteMap::new(&table, &[]);
        assert_eq!(map.get(0), 12);
        assert_eq!(map_color(&table, 0), 12);
        assert_eq!(map_color(&table, 0x11), 1);
    }

    #[test]
    fn test_glyph_mapping() {
        let map = PaletteMap::glyph(7);
        assert!(map.is_transparent(0));
        assert_eq!(map.get(1), 7);
    }
}
