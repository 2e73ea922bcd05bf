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

//! Drawing operations
//!
//! Script-facing entry points. Each one builds the palette map for the
//! call, picks the tile sheet it reads from and forwards to the rasterizer.

use super::render::{LegacySource, RemapFn, Sampler, TextLayout};
use super::{Flip, Gfx, PaletteMap, Rotate, TexVertex, TextureSource, TileSheet, Vertex};
use crate::core::memory::{ALTFONT_WIDTH, FONT_HEIGHT, FONT_WIDTH};

/// Segment of the system font
const FONT_SEGMENT: u8 = 1;

impl Gfx {
    /// Fill a rectangle
    pub fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u8) {
        log::trace!("rect({}, {}, {}, {}, {})", x, y, width, height, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_rect(&mut self.ram.screen, x, y, width, height, color);
    }

    /// Draw a rectangle outline
    pub fn rectb(&mut self, x: i32, y: i32, width: i32, height: i32, color: u8) {
        log::trace!("rectb({}, {}, {}, {}, {})", x, y, width, height, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_rect_border(&mut self.ram.screen, x, y, width, height, color);
    }

    /// Draw a sprite of `w`×`h` tiles from the current blit segment
    #[allow(clippy::too_many_arguments)]
    pub fn spr(
        &mut self,
        index: i32,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        transparent: &[u8],
        scale: i32,
        flip: Flip,
        rotate: Rotate,
    ) {
        log::trace!(
            "spr({}, {}, {}, {}x{}, scale {}, {:?}, {:?})",
            index,
            x,
            y,
            w,
            h,
            scale,
            flip,
            rotate
        );
        let mapping = self.palette_map(transparent);
        let sheet = TileSheet::for_segment(self.ram.blit_segment, &self.ram.tiles, &self.ram.font);
        self.rasterizer.draw_sprite(
            &mut self.ram.screen,
            &sheet,
            index,
            x,
            y,
            w,
            h,
            &mapping,
            scale,
            flip,
            rotate,
        );
    }

    /// Draw a region of the map
    ///
    /// `remap` is called for every drawn cell with its wrapped map
    /// coordinates and may replace the tile index, flip and rotate.
    #[allow(clippy::too_many_arguments)]
    pub fn map(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        sx: i32,
        sy: i32,
        transparent: &[u8],
        scale: i32,
        remap: Option<&mut RemapFn<'_>>,
    ) {
        log::trace!(
            "map({}, {}, {}x{} -> {}, {}, scale {}, remap {})",
            x,
            y,
            width,
            height,
            sx,
            sy,
            scale,
            remap.is_some()
        );
        let mapping = self.palette_map(transparent);
        let sheet = TileSheet::for_segment(self.ram.blit_segment, &self.ram.tiles, &self.ram.font);
        self.rasterizer.draw_map(
            &mut self.ram.screen,
            &sheet,
            &self.ram.map,
            x,
            y,
            width,
            height,
            sx,
            sy,
            &mapping,
            scale,
            remap,
        );
    }

    /// Draw text with the tile bank opposite to the blit segment as font
    ///
    /// Returns the width of the widest line in pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn font(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        transparent: &[u8],
        width: i32,
        height: i32,
        fixed: bool,
        scale: i32,
        alt: bool,
    ) -> i32 {
        log::trace!("font({:?}, {}, {}, {}x{}, scale {})", text, x, y, width, height, scale);
        let mapping = self.palette_map(transparent);

        // bank bit sits above the page bits of the segment id
        let mut segment = self.ram.blit_segment >> 1;
        let mut flipmask = 1u8;
        loop {
            segment >>= 1;
            if segment == 0 {
                break;
            }
            flipmask <<= 1;
        }

        let sheet = TileSheet::for_segment(self.ram.blit_segment ^ flipmask, &self.ram.tiles, &self.ram.font);
        let layout = TextLayout {
            width,
            height,
            fixed,
            scale,
            alt,
        };
        self.rasterizer
            .draw_text(&mut self.ram.screen, &sheet, text, x, y, layout, &mapping)
    }

    /// Print text with the system font
    ///
    /// Returns the width of the widest line in pixels.
    pub fn print(&mut self, text: &str, x: i32, y: i32, color: u8, fixed: bool, scale: i32, alt: bool) -> i32 {
        log::trace!("print({:?}, {}, {}, {}, scale {})", text, x, y, color, scale);
        let mapping = PaletteMap::glyph(color);
        let sheet = TileSheet::for_segment(FONT_SEGMENT, &self.ram.tiles, &self.ram.font);

        let mut width = if alt { ALTFONT_WIDTH } else { FONT_WIDTH };
        if !fixed {
            width -= 2;
        }

        let layout = TextLayout {
            width,
            height: FONT_HEIGHT,
            fixed,
            scale,
            alt,
        };
        self.rasterizer
            .draw_text(&mut self.ram.screen, &sheet, text, x, y, layout, &mapping)
    }

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u8) {
        log::trace!("line({}, {}, {}, {}, {})", x0, y0, x1, y1, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_line(&mut self.ram.screen, x0, y0, x1, y1, color);
    }

    /// Filled circle
    pub fn circ(&mut self, x: i32, y: i32, radius: i32, color: u8) {
        self.elli(x, y, radius, radius, color);
    }

    /// Circle outline
    pub fn circb(&mut self, x: i32, y: i32, radius: i32, color: u8) {
        self.ellib(x, y, radius, radius, color);
    }

    /// Filled ellipse
    pub fn elli(&mut self, x: i32, y: i32, a: i32, b: i32, color: u8) {
        log::trace!("elli({}, {}, {}, {}, {})", x, y, a, b, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_ellipse(&mut self.ram.screen, x, y, a, b, color);
    }

    /// Ellipse outline
    pub fn ellib(&mut self, x: i32, y: i32, a: i32, b: i32, color: u8) {
        log::trace!("ellib({}, {}, {}, {}, {})", x, y, a, b, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_ellipse_border(&mut self.ram.screen, x, y, a, b, color);
    }

    /// Filled triangle
    pub fn tri(&mut self, vertices: [Vertex; 3], color: u8) {
        log::trace!("tri({:?}, {})", vertices, color);
        let color = self.map_color(color);
        self.rasterizer
            .draw_triangle(&mut self.ram.screen, vertices, color);
    }

    /// Triangle outline
    pub fn trib(&mut self, vertices: [Vertex; 3], color: u8) {
        log::trace!("trib({:?}, {})", vertices, color);
        let color = self.map_color(color);
        let [a, b, c] = vertices;
        for (p, q) in [(a, b), (b, c), (c, a)] {
            self.rasterizer
                .draw_line(&mut self.ram.screen, p.x, p.y, q.x, q.y, color);
        }
    }

    /// Textured triangle
    ///
    /// `source` selects the texture (see [`TextureSource`]); unknown
    /// selectors draw nothing. With `depth` set and every vertex `z` above
    /// the depth epsilon, texture coordinates are perspective-corrected and
    /// the triangle is depth-tested against the buffer cleared by `cls`.
    pub fn ttri(&mut self, vertices: [TexVertex; 3], source: u8, transparent: &[u8], depth: bool) {
        log::trace!("ttri({:?}, source {}, depth {})", vertices, source, depth);
        let Ok(source) = TextureSource::try_from(source) else {
            log::trace!("ttri: unknown texture source {}, skipped", source);
            return;
        };

        let mapping = self.palette_map(transparent);
        let sheet = TileSheet::for_segment(self.ram.blit_segment, &self.ram.tiles, &self.ram.font);
        let sampler = match source {
            TextureSource::Tiles => Sampler::Tiles(sheet),
            TextureSource::Map => Sampler::Map {
                sheet,
                map: &self.ram.map,
            },
            TextureSource::Screen => Sampler::Screen,
        };

        self.rasterizer
            .draw_textured_triangle(&mut self.ram.screen, vertices, sampler, &mapping, depth);
    }

    /// Textured triangle drawn with the legacy edge-walking algorithm
    ///
    /// Samples the map when `use_map` is set, the current tile sheet
    /// otherwise. Vertex depth is ignored.
    pub fn textri(&mut self, vertices: [TexVertex; 3], use_map: bool, transparent: &[u8]) {
        log::trace!("textri({:?}, use_map {})", vertices, use_map);
        let mapping = self.palette_map(transparent);
        let sheet = TileSheet::for_segment(self.ram.blit_segment, &self.ram.tiles, &self.ram.font);
        let source = if use_map {
            LegacySource::Map {
                sheet,
                map: &self.ram.map,
            }
        } else {
            LegacySource::Tiles(sheet)
        };

        self.rasterizer
            .draw_textured_triangle_legacy(&mut self.ram.screen, vertices, source, &mapping);
    }
}
