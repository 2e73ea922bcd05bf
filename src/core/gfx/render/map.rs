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

//! Map rendering
//!
//! Source coordinates wrap toroidally over the 240×136 map, so any integer
//! origin is valid. Only cells that land inside the clip rectangle are read
//! and passed to the remap callback.

use super::rasterizer::{cell_origin, visible_cells, Rasterizer};
use crate::core::gfx::palette::PaletteMap;
use crate::core::gfx::primitives::RemapResult;
use crate::core::gfx::tilesheet::TileSheet;
use crate::core::memory::{MAP_HEIGHT, MAP_WIDTH, SPRITE_SIZE};

/// Per-cell remap callback: `(map_x, map_y, cell)`
pub type RemapFn<'a> = dyn FnMut(i32, i32, &mut RemapResult) + 'a;

impl Rasterizer {
    /// Draw a rectangular region of the map
    ///
    /// # Arguments
    ///
    /// * `screen` - Packed framebuffer
    /// * `sheet` - Tile sheet the map cells index into (local addressing)
    /// * `map` - Map cells, row-major, 240×136
    /// * `x`, `y` - Source origin in map cells (any integer)
    /// * `width`, `height` - Region size in cells
    /// * `sx`, `sy` - Destination in screen pixels
    /// * `mapping` - Palette map
    /// * `scale` - Integer upscale factor
    /// * `remap` - Optional callback that may override each visible cell's
    ///   tile, flip and rotate; it sees wrapped map coordinates
    #[allow(clippy::too_many_arguments)]
    pub fn draw_map(
        &self,
        screen: &mut [u8],
        sheet: &TileSheet<'_>,
        map: &[u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        sx: i32,
        sy: i32,
        mapping: &PaletteMap,
        scale: i32,
        mut remap: Option<&mut RemapFn<'_>>,
    ) {
        let size = (SPRITE_SIZE as i32).saturating_mul(scale);
        let cols = visible_cells(sx, width, size, self.clip.l, self.clip.r);
        let rows = visible_cells(sy, height, size, self.clip.t, self.clip.b);

        for j in rows {
            let mj = (y as i64 + j as i64).rem_euclid(MAP_HEIGHT as i64) as i32;
            for i in cols.clone() {
                let mi = (x as i64 + i as i64).rem_euclid(MAP_WIDTH as i64) as i32;

                let mut cell = RemapResult::new(map[mj as usize * MAP_WIDTH + mi as usize]);
                if let Some(remap) = remap.as_deref_mut() {
                    remap(mi, mj, &mut cell);
                }

                let tile = sheet.tile(cell.index as i32, true);
                self.draw_tile(
                    screen,
                    &tile,
                    cell_origin(sx, i, size),
                    cell_origin(sy, j, size),
                    mapping,
                    scale,
                    cell.flip,
                    cell.rotate,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::primitives::{Flip, Rotate};
    use crate::core::memory::{SCREEN_BYTES, TILES_BYTES};

    /// Tiles 1..=3 filled with their own index as color
    fn solid_tiles() -> Vec<u8> {
        let mut tiles = vec![0u8; TILES_BYTES];
        for t in 1..=3u8 {
            let start = t as usize * 32;
            tiles[start..start + 32].fill(t | (t << 4));
        }
        tiles
    }

    #[test]
    fn test_draw_map_cells() {
        let tiles = solid_tiles();
        let sheet = TileSheet::new(2, &tiles);
        let mut map = vec![0u8; MAP_WIDTH * MAP_HEIGHT];
        map[0] = 1;
        map[1] = 2;
        map[MAP_WIDTH] = 3;

        let mut screen = vec![0u8; SCREEN_BYTES];
        let rasterizer = Rasterizer::new();
        rasterizer.draw_map(
            &mut screen,
            &sheet,
            &map,
            0,
            0,
            2,
            2,
            0,
            0,
            &PaletteMap::identity(),
            1,
            None,
        );

        assert_eq!(Rasterizer::get_pixel(&screen, 3, 3), 1);
        assert_eq!(Rasterizer::get_pixel(&screen, 11, 3), 2);
        assert_eq!(Rasterizer::get_pixel(&screen, 3, 11), 3);
        assert_eq!(Rasterizer::get_pixel(&screen, 11, 11), 0);
    }

    #[test]
    fn test_draw_map_wraps_negative_origin() {
        let tiles = solid_tiles();
        let sheet = TileSheet::new(2, &tiles);
        let mut map = vec![0u8; MAP_WIDTH * MAP_HEIGHT];
        map[(MAP_HEIGHT - 1) * MAP_WIDTH + MAP_WIDTH - 1] = 2;

        let mut screen = vec![0u8; SCREEN_BYTES];
        let rasterizer = Rasterizer::new();
        rasterizer.draw_map(
            &mut screen,
            &sheet,
            &map,
            -1 - MAP_WIDTH as i32 * 3,
            -1,
            1,
            1,
            16,
            16,
            &PaletteMap::identity(),
            2,
            None,
        );

        assert_eq!(Rasterizer::get_pixel(&screen, 16, 16), 2);
        assert_eq!(Rasterizer::get_pixel(&screen, 31, 31), 2);
        assert_eq!(Rasterizer::get_pixel(&screen, 32, 32), 0);
    }

    #[test]
    fn test_draw_map_remap_callback() {
        let tiles = solid_tiles();
        let sheet = TileSheet::new(2, &tiles);
        let map = vec![1u8; MAP_WIDTH * MAP_HEIGHT];
        let mut visited = Vec::new();

        let mut screen = vec![0u8; SCREEN_BYTES];
        let rasterizer = Rasterizer::new();
        let mut remap = |mx: i32, my: i32, cell: &mut RemapResult| {
            visited.push((mx, my));
            if mx == 1 {
                cell.index = 3;
                cell.flip = Flip::HORIZONTAL;
                cell.rotate = Rotate::Rotate90;
            }
        };
        rasterizer.draw_map(
            &mut screen,
            &sheet,
            &map,
            0,
            5,
            2,
            1,
            0,
            0,
            &PaletteMap::identity(),
            1,
            Some(&mut remap as &mut RemapFn<'_>),
        );

        assert_eq!(visited, vec![(0, 5), (1, 5)]);
        assert_eq!(Rasterizer::get_pixel(&screen, 0, 0), 1);
        assert_eq!(Rasterizer::get_pixel(&screen, 8, 0), 3);
    }

    #[test]
    fn test_draw_map_transparent_color() {
        let tiles = solid_tiles();
        let sheet = TileSheet::new(2, &tiles);
        let map = vec![1u8; MAP_WIDTH * MAP_HEIGHT];

        let mut screen = vec![0u8; SCREEN_BYTES];
        let rasterizer = Rasterizer::new();
        let mapping = PaletteMap::new(&[0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE], &[1]);
        rasterizer.draw_map(
            &mut screen, &sheet, &map, 0, 0, 30, 17, 0, 0, &mapping, 1, None,
        );
        assert!(screen.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_map_extreme_arguments() {
        let tiles = solid_tiles();
        let sheet = TileSheet::new(2, &tiles);
        let map = vec![2u8; MAP_WIDTH * MAP_HEIGHT];
        let mut screen = vec![0u8; SCREEN_BYTES];
        let rasterizer = Rasterizer::new();
        let mut calls = 0;
        let mut remap = |_: i32, _: i32, _: &mut RemapResult| calls += 1;

        // a huge region only visits the 30×17 cells on screen
        rasterizer.draw_map(
            &mut screen,
            &sheet,
            &map,
            i32::MAX,
            i32::MIN,
            i32::MAX,
            i32::MAX,
            0,
            0,
            &PaletteMap::identity(),
            1,
            Some(&mut remap as &mut RemapFn<'_>),
        );
        assert_eq!(calls, 30 * 17);
        assert!(screen.iter().all(|&b| b == 0x22));

        let mut screen = vec![0u8; SCREEN_BYTES];
        for (sx, sy, scale) in [(i32::MAX, 0, 1), (i32::MIN, 0, 1), (0, i32::MAX, 4), (i32::MIN, i32::MIN, 1 << 28)] {
            rasterizer.draw_map(
                &mut screen,
                &sheet,
                &map,
                0,
                0,
                4,
                4,
                sx,
                sy,
                &PaletteMap::identity(),
                scale,
                None,
            );
        }
        assert!(screen.iter().all(|&b| b == 0));
    }
}
