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

//! Tile and sprite blitting
//!
//! # Orientation
//!
//! Flip and rotate are folded into a 3-bit orientation:
//!
//! ```text
//! bit 0: mirror source X     bit 1: mirror source Y     bit 2: swap axes
//!
//! start   = flip & 0b11
//! rot 90  : ^= 0b001, |= 0b100
//! rot 180 : ^= 0b011
//! rot 270 : ^= 0b010, |= 0b100
//! ```
//!
//! The axis swap is applied after mirroring, so orientation `0b101` reads
//! source pixel `(py, 7 - px)` for destination `(px, py)`.

use super::rasterizer::{cell_origin, visible_cells, Rasterizer};
use crate::core::gfx::palette::{PaletteMap, TRANSPARENT_COLOR};
use crate::core::gfx::primitives::{Flip, Rotate};
use crate::core::gfx::tilesheet::{TilePtr, TileSheet};
use crate::core::memory::SPRITE_SIZE;

const SIZE: i32 = SPRITE_SIZE as i32;

#[inline(always)]
const fn revert(v: i32) -> i32 {
    SIZE - 1 - v
}

/// Fold flip and rotate into a 3-bit orientation
pub(crate) fn orientation(flip: Flip, rotate: Rotate) -> u32 {
    let mut orientation = (flip.bits() & 0b11) as u32;
    match rotate {
        Rotate::None => {}
        Rotate::Rotate90 => orientation ^= 0b001,
        Rotate::Rotate180 => orientation ^= 0b011,
        Rotate::Rotate270 => orientation ^= 0b010,
    }
    if rotate.swaps_axes() {
        orientation |= 0b100;
    }
    orientation
}

/// Source pixel for destination `(px, py)` under an orientation
#[inline(always)]
fn source_pixel(orientation: u32, px: i32, py: i32) -> (i32, i32) {
    match orientation & 0b111 {
        0b000 => (px, py),
        0b010 => (px, revert(py)),
        0b001 => (revert(px), py),
        0b011 => (revert(px), revert(py)),
        0b100 => (py, px),
        0b110 => (revert(py), px),
        0b101 => (py, revert(px)),
        _ => (revert(py), revert(px)),
    }
}

impl Rasterizer {
    /// Draw one 8×8 tile
    ///
    /// # Arguments
    ///
    /// * `screen` - Packed framebuffer
    /// * `tile` - Source tile
    /// * `x`, `y` - Destination of the tile's top-left corner
    /// * `mapping` - Palette map; transparent entries are skipped
    /// * `scale` - Integer upscale factor (values below 1 draw nothing)
    /// * `flip`, `rotate` - Orientation
    ///
    /// # Algorithm
    ///
    /// At scale 1 the destination is intersected with the clip rectangle
    /// once and the remaining sub-rectangle is written without per-pixel
    /// clip checks. Larger scales paint one `scale`×`scale` block per source
    /// pixel whose block overlaps the clip rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_tile(
        &self,
        screen: &mut [u8],
        tile: &TilePtr<'_>,
        x: i32,
        y: i32,
        mapping: &PaletteMap,
        scale: i32,
        flip: Flip,
        rotate: Rotate,
    ) {
        let orientation = orientation(flip, rotate);

        if scale == 1 {
            let sx = self.clip.l.saturating_sub(x).max(0);
            let sy = self.clip.t.saturating_sub(y).max(0);
            let ex = self.clip.r.saturating_sub(x).min(SIZE);
            let ey = self.clip.b.saturating_sub(y).min(SIZE);

            for py in sy..ey {
                for px in sx..ex {
                    let (ix, iy) = source_pixel(orientation, px, py);
                    let color = mapping.get(tile.pixel(ix, iy));
                    if color != TRANSPARENT_COLOR {
                        Self::set_pixel_fast(screen, x + px, y + py, color);
                    }
                }
            }
            return;
        }

        let rows = visible_cells(y, SIZE, scale, self.clip.t, self.clip.b);
        let cols = visible_cells(x, SIZE, scale, self.clip.l, self.clip.r);

        for py in rows {
            for px in cols.clone() {
                let mut ix = if orientation & 0b001 != 0 { revert(px) } else { px };
                let mut iy = if orientation & 0b010 != 0 { revert(py) } else { py };
                if orientation & 0b100 != 0 {
                    std::mem::swap(&mut ix, &mut iy);
                }

                let color = mapping.get(tile.pixel(ix, iy));
                if color != TRANSPARENT_COLOR {
                    let (dx, dy) = (cell_origin(x, px, scale), cell_origin(y, py, scale));
                    self.draw_rect(screen, dx, dy, scale, scale, color);
                }
            }
        }
    }

    /// Draw a `w`×`h` grid of tiles as one sprite
    ///
    /// The tile at grid cell `(i, j)` is chosen so that flipping or rotating
    /// the sprite moves whole tiles as well as their pixels. Tiles are
    /// addressed globally from `index`, one sheet row per grid row.
    /// A negative `index` draws nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_sprite(
        &self,
        screen: &mut [u8],
        sheet: &TileSheet<'_>,
        index: i32,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        mapping: &PaletteMap,
        scale: i32,
        flip: Flip,
        rotate: Rotate,
    ) {
        if index < 0 {
            return;
        }

        if w == 1 && h == 1 {
            let tile = sheet.tile(index, false);
            self.draw_tile(screen, &tile, x, y, mapping, scale, flip, rotate);
            return;
        }

        let step = SIZE.saturating_mul(scale);
        let cols = sheet.segment().sheet_width as i32;
        let both = Flip::HORIZONTAL | Flip::VERTICAL;

        // destination grid is transposed for 90/270
        let (across, down) = if rotate.swaps_axes() { (h, w) } else { (w, h) };
        let dest_cols = visible_cells(x, across, step, self.clip.l, self.clip.r);
        let dest_rows = visible_cells(y, down, step, self.clip.t, self.clip.b);

        for dy in dest_rows {
            for dx in dest_cols.clone() {
                let (i, j) = if rotate.swaps_axes() { (dy, dx) } else { (dx, dy) };
                let mut mx = i;
                let mut my = j;

                if flip == Flip::HORIZONTAL || flip == both {
                    mx = w - 1 - i;
                }
                if flip == Flip::VERTICAL || flip == both {
                    my = h - 1 - j;
                }

                let straight = flip.is_empty() || flip == both;
                match rotate {
                    Rotate::None => {}
                    Rotate::Rotate180 => {
                        mx = w - 1 - mx;
                        my = h - 1 - my;
                    }
                    Rotate::Rotate90 if straight => my = h - 1 - my,
                    Rotate::Rotate90 => mx = w - 1 - mx,
                    Rotate::Rotate270 if straight => mx = w - 1 - mx,
                    Rotate::Rotate270 => my = h - 1 - my,
                }

                let tile = sheet.tile(index.saturating_add(mx).saturating_add(my.saturating_mul(cols)), false);
                self.draw_tile(
                    screen,
                    &tile,
                    cell_origin(x, dx, step),
                    cell_origin(y, dy, step),
                    mapping,
                    scale,
                    flip,
                    rotate,
                );
            }
        }
    }
}
