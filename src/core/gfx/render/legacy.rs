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

//! Legacy textured triangles
//!
//! Edge-walking rasterizer kept for output compatibility with older
//! content. Each edge is walked top to bottom into the span buffer, which
//! keeps the leftmost X of every row together with its U/V in 16.16 fixed
//! point. Rows are then filled left to right with a constant U/V gradient.
//! There is no depth support and coverage rules differ slightly from the
//! edge-function rasterizer.

use super::rasterizer::{Rasterizer, SpanBuffer};
use crate::core::gfx::palette::{PaletteMap, TRANSPARENT_COLOR};
use crate::core::gfx::primitives::TexVertex;
use crate::core::gfx::tilesheet::TileSheet;
use crate::core::memory::{MAP_HEIGHT, MAP_WIDTH, SCREEN_HEIGHT, SPRITE_SIZE};

const MAP_PIXEL_WIDTH: i32 = (MAP_WIDTH * SPRITE_SIZE) as i32;
const MAP_PIXEL_HEIGHT: i32 = (MAP_HEIGHT * SPRITE_SIZE) as i32;

/// Texture source of the legacy path
#[derive(Clone, Copy)]
pub enum LegacySource<'a> {
    Tiles(TileSheet<'a>),
    Map { sheet: TileSheet<'a>, map: &'a [u8] },
}

/// Walk one edge from its top to its bottom vertex
fn walk_edge(spans: &mut SpanBuffer, v0: &TexVertex, v1: &TexVertex) {
    let (top, bot) = if v1.y < v0.y { (v1, v0) } else { (v0, v1) };

    let dy = bot.y - top.y;
    let mut step_x = bot.x - top.x;
    let mut step_u = bot.u - top.u;
    let mut step_v = bot.v - top.v;

    if dy as i32 != 0 {
        step_x /= dy;
        step_u /= dy;
        step_v /= dy;
    }

    let mut x = top.x;
    let mut y = top.y;
    let mut u = top.u;
    let mut v = top.v;

    if y < 0.0 {
        let skip = -y;
        x += step_x * skip;
        u += step_u * skip;
        v += step_v * skip;
        y = 0.0;
    }

    let bot_y = (bot.y as i32).min(SCREEN_HEIGHT as i32) as f32;
    while y < bot_y {
        spans.record_textured(x as i32, y as i32, u, v);
        x += step_x;
        u += step_u;
        v += step_v;
        y += 1.0;
    }
}

impl Rasterizer {
    /// Draw a textured triangle with the legacy edge-walking algorithm
    ///
    /// A zero determinant (degenerate triangle) draws nothing.
    pub fn draw_textured_triangle_legacy(
        &mut self,
        screen: &mut [u8],
        v: [TexVertex; 3],
        source: LegacySource<'_>,
        mapping: &PaletteMap,
    ) {
        let [v0, v1, v2] = v;

        let denom = (v0.x - v2.x) * (v1.y - v2.y) - (v1.x - v2.x) * (v0.y - v2.y);
        if denom == 0.0 || !denom.is_finite() {
            return;
        }
        let id = 1.0 / denom;
        let dudx = ((v0.u - v2.u) * (v1.y - v2.y) - (v1.u - v2.u) * (v0.y - v2.y)) * id;
        let dvdx = ((v0.v - v2.v) * (v1.y - v2.y) - (v1.v - v2.v) * (v0.y - v2.y)) * id;
        let dudxs = (dudx * 65536.0) as i32;
        let dvdxs = (dvdx * 65536.0) as i32;

        self.spans.reset();
        walk_edge(&mut self.spans, &v0, &v1);
        walk_edge(&mut self.spans, &v1, &v2);
        walk_edge(&mut self.spans, &v2, &v0);

        let clip = self.clip;
        for y in clip.t..clip.b {
            let row = y as usize;
            let mut left = self.spans.left[row];
            let right = self.spans.right[row].min(clip.r);
            if self.spans.right[row].saturating_sub(left) <= 0 {
                continue;
            }

            let mut u = self.spans.u_left[row];
            let mut v = self.spans.v_left[row];
            if left < clip.l {
                let dist = clip.l.saturating_sub(left);
                u = u.wrapping_add(dudxs.wrapping_mul(dist));
                v = v.wrapping_add(dvdxs.wrapping_mul(dist));
                left = clip.l;
            }

            for x in left..right {
                let color = match source {
                    LegacySource::Map { sheet, map } => {
                        let iu = (u >> 16).rem_euclid(MAP_PIXEL_WIDTH);
                        let iv = (v >> 16).rem_euclid(MAP_PIXEL_HEIGHT);
                        let index = map[(iv >> 3) as usize * MAP_WIDTH + (iu >> 3) as usize];
                        sheet.tile(index as i32, true).pixel(iu & 7, iv & 7)
                    }
                    LegacySource::Tiles(sheet) => {
                        let iu = (u >> 16) & (sheet.width() as i32 - 1);
                        let iv = (v >> 16) & (sheet.height() as i32 - 1);
                        sheet.pixel(iu as u32, iv as u32)
                    }
                };

                let color = mapping.get(color);
                if color != TRANSPARENT_COLOR {
                    self.set_pixel(screen, x, y, color);
                }
                u = u.wrapping_add(dudxs);
                v = v.wrapping_add(dvdxs);
            }
        }
    }
}
