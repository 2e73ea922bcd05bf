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

//! Text rendering
//!
//! Glyphs are 8×8 tiles addressed locally; the alternate face starts at
//! glyph 128. In proportional mode empty columns are trimmed from both
//! sides of each glyph and the pen advances by the trimmed width plus one.

use super::rasterizer::{cell_origin, visible_cells, Rasterizer};
use crate::core::gfx::palette::{PaletteMap, TRANSPARENT_COLOR};
use crate::core::gfx::tilesheet::{TilePtr, TileSheet};
use crate::core::memory::{FONT_CHARS, SPRITE_SIZE};

const SIZE: i32 = SPRITE_SIZE as i32;

/// Layout parameters for [`Rasterizer::draw_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    /// Column width used by fixed mode and by empty glyphs
    pub width: i32,
    /// Line height
    pub height: i32,
    pub fixed: bool,
    pub scale: i32,
    /// Use the alternate face
    pub alt: bool,
}

fn column_is_empty(glyph: &TilePtr<'_>, mapping: &PaletteMap, col: i32) -> bool {
    (0..SIZE).all(|row| mapping.is_transparent(glyph.pixel(col, row)))
}

impl Rasterizer {
    /// Draw one glyph and return its width in unscaled pixels
    ///
    /// Fixed glyphs are always 8 pixels wide. Fully transparent glyphs are
    /// 0 wide in proportional mode. The width is returned even when the
    /// glyph is clipped away.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char(
        &self,
        screen: &mut [u8],
        glyph: &TilePtr<'_>,
        x: i32,
        y: i32,
        scale: i32,
        fixed: bool,
        mapping: &PaletteMap,
    ) -> i32 {
        let mut start = 0;
        let mut end = SIZE;

        if !fixed {
            while start < SIZE && column_is_empty(glyph, mapping, start) {
                start += 1;
            }
            while end > start && column_is_empty(glyph, mapping, end - 1) {
                end -= 1;
            }
        }
        let width = end - start;

        let cols = visible_cells(x, width, scale, self.clip.l, self.clip.r);
        let rows = visible_cells(y, SIZE, scale, self.clip.t, self.clip.b);

        for i in cols {
            let xs = cell_origin(x, i, scale);
            for row in rows.clone() {
                let color = mapping.get(glyph.pixel(start + i, row));
                if color != TRANSPARENT_COLOR {
                    self.draw_rect(screen, xs, cell_origin(y, row, scale), scale, scale, color);
                }
            }
        }

        width
    }

    /// Draw a string and return the width of its widest line
    ///
    /// `\n` returns the pen to `x` and moves down one line. Bytes are used
    /// as glyph indices directly.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &self,
        screen: &mut [u8],
        font: &TileSheet<'_>,
        text: &str,
        x: i32,
        mut y: i32,
        layout: TextLayout,
        mapping: &PaletteMap,
    ) -> i32 {
        let TextLayout {
            width,
            height,
            fixed,
            scale,
            alt,
        } = layout;

        let mut pos = x;
        let mut max = x;
        let face = if alt { FONT_CHARS as i32 } else { 0 };

        for sym in text.bytes() {
            if sym == b'\n' {
                max = max.max(pos);
                pos = x;
                y = y.saturating_add(height.saturating_mul(scale));
                continue;
            }

            let glyph = font.tile(face + sym as i32, true);
            let size = self.draw_char(screen, &glyph, pos, y, scale, fixed, mapping);
            let advance = if !fixed && size > 0 { size + 1 } else { width };
            pos = pos.saturating_add(advance.saturating_mul(scale));
        }

        max.max(pos).saturating_sub(x)
    }
}
