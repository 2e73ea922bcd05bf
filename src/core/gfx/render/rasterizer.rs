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

//! Software Rasterizer
//!
//! This module holds the rasterizer context and the framebuffer primitives
//! every other drawing path funnels into.
//!
//! # Framebuffer
//!
//! The framebuffer is borrowed per call as a packed 4bpp byte slice
//! (`240 * 136 / 2` bytes, low nibble = even x). The rasterizer never
//! allocates or retains it, so the screen can live in the console memory
//! image while tiles and the map are borrowed from the same image.
//!
//! # State
//!
//! - Clip rectangle, checked by every clipped write
//! - Depth buffer, one `1/z` value per pixel, written by depth-tested
//!   textured triangles and cleared by screen clears
//! - Span buffers, per-row min/max X scratch space for filled ellipses and
//!   legacy textured triangles

use std::ops::Range;

use crate::core::gfx::primitives::ClipRect;
use crate::core::memory::packing::{peek4, poke4};
use crate::core::memory::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Cells of a run that overlap `[lo, hi)` on one axis
///
/// Cell `k` of `count` covers `[origin + k * step, origin + (k + 1) * step)`.
/// The result is empty when `count` or `step` is not positive. For any
/// returned `k`, `origin + k * step` fits in an `i32`.
pub(crate) fn visible_cells(origin: i32, count: i32, step: i32, lo: i32, hi: i32) -> Range<i32> {
    if count <= 0 || step <= 0 || lo >= hi {
        return 0..0;
    }

    let (origin, step) = (origin as i64, step as i64);
    let first = (lo as i64 - origin).div_euclid(step).max(0);
    let last = (hi as i64 - origin + step - 1).div_euclid(step).min(count as i64);
    if first >= last {
        return 0..0;
    }
    first as i32..last as i32
}

/// Position of cell `k` in a run, see [`visible_cells`]
#[inline(always)]
pub(crate) fn cell_origin(origin: i32, k: i32, step: i32) -> i32 {
    (origin as i64 + k as i64 * step as i64) as i32
}

/// Per-row span accumulator
///
/// Each row tracks the leftmost and rightmost X recorded since the last
/// reset, plus the 16.16 fixed-point U/V at the leftmost X (legacy textured
/// path only).
pub(crate) struct SpanBuffer {
    pub left: [i32; SCREEN_HEIGHT],
    pub right: [i32; SCREEN_HEIGHT],
    pub u_left: [i32; SCREEN_HEIGHT],
    pub v_left: [i32; SCREEN_HEIGHT],
}

impl SpanBuffer {
    fn new() -> Self {
        Self {
            left: [i32::MAX; SCREEN_HEIGHT],
            right: [i32::MIN; SCREEN_HEIGHT],
            u_left: [0; SCREEN_HEIGHT],
            v_left: [0; SCREEN_HEIGHT],
        }
    }

    /// Empty every row
    pub fn reset(&mut self) {
        self.left.fill(i32::MAX);
        self.right.fill(i32::MIN);
    }

    /// Record a point; rows outside the screen are ignored
    #[inline]
    pub fn record(&mut self, x: i32, y: i32) {
        if y < 0 || y >= SCREEN_HEIGHT as i32 {
            return;
        }
        let row = y as usize;
        self.left[row] = self.left[row].min(x);
        self.right[row] = self.right[row].max(x);
    }

    /// Record a point with texture coordinates for the left edge
    #[inline]
    pub fn record_textured(&mut self, x: i32, y: i32, u: f32, v: f32) {
        if y < 0 || y >= SCREEN_HEIGHT as i32 {
            return;
        }
        let row = y as usize;
        if x < self.left[row] {
            self.left[row] = x;
            self.u_left[row] = (u * 65536.0) as i32;
            self.v_left[row] = (v * 65536.0) as i32;
        }
        if x > self.right[row] {
            self.right[row] = x;
        }
    }
}

/// Rasterizer context
///
/// Owns the clip rectangle, the depth buffer and the span scratch buffers.
/// All drawing methods take the framebuffer as `&mut [u8]`.
///
/// # Examples
///
/// ```
/// use ticraster::core::gfx::Rasterizer;
/// use ticraster::core::memory::SCREEN_BYTES;
///
/// let mut screen = vec![0u8; SCREEN_BYTES];
/// let mut rasterizer = Rasterizer::new();
/// rasterizer.set_clip(2, 2, 4, 4);
/// rasterizer.draw_rect(&mut screen, 0, 0, 10, 10, 1);
///
/// assert_eq!(Rasterizer::get_pixel(&screen, 2, 2), 1);
/// assert_eq!(Rasterizer::get_pixel(&screen, 6, 6), 0);
/// ```
pub struct Rasterizer {
    /// Clipping rectangle (right/bottom exclusive)
    pub(crate) clip: ClipRect,

    /// Depth buffer holding interpolated `1/z`, 0 = infinitely far
    pub(crate) zbuffer: Vec<f32>,

    /// Span scratch space, re-initialized by every call that reads it
    pub(crate) spans: Box<SpanBuffer>,
}

impl Rasterizer {
    /// Create a rasterizer with a full-screen clip and a cleared depth buffer
    pub fn new() -> Self {
        Self {
            clip: ClipRect::full(),
            zbuffer: vec![0.0; SCREEN_WIDTH * SCREEN_HEIGHT],
            spans: Box::new(SpanBuffer::new()),
        }
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// Set the clipping rectangle from a position and size
    ///
    /// The rectangle is clamped to the framebuffer.
    pub fn set_clip(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.clip = ClipRect::new(x, y, width, height);
    }

    /// Restore the full-screen clip
    pub fn reset_clip(&mut self) {
        self.clip = ClipRect::full();
    }

    /// Clear the depth buffer
    pub fn clear_depth(&mut self) {
        self.zbuffer.fill(0.0);
    }

    /// Read the depth buffer (0.0 outside the screen)
    pub fn depth(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return 0.0;
        }
        self.zbuffer[y as usize * SCREEN_WIDTH + x as usize]
    }

    /// Write a pixel if it lies inside the clip rectangle
    #[inline(always)]
    pub fn set_pixel(&self, screen: &mut [u8], x: i32, y: i32, color: u8) {
        if !self.clip.contains(x, y) {
            return;
        }
        Self::set_pixel_fast(screen, x, y, color);
    }

    /// Write a pixel without the clip check
    ///
    /// The caller must have proven `(x, y)` lies inside the clip rectangle.
    #[inline(always)]
    pub fn set_pixel_fast(screen: &mut [u8], x: i32, y: i32, color: u8) {
        poke4(screen, y as usize * SCREEN_WIDTH + x as usize, color);
    }

    /// Read a pixel, returning 0 outside the framebuffer
    ///
    /// Reads ignore the clip rectangle.
    #[inline]
    pub fn get_pixel(screen: &[u8], x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return 0;
        }
        peek4(screen, y as usize * SCREEN_WIDTH + x as usize)
    }

    /// Fill `[xl, xr)` on row `y` without clipping
    #[inline]
    pub(crate) fn fill_span(screen: &mut [u8], xl: i32, xr: i32, y: i32, color: u8) {
        for x in xl..xr {
            Self::set_pixel_fast(screen, x, y, color);
        }
    }

    /// Draw a horizontal line of `width` pixels starting at `(x, y)`
    pub fn draw_hline(&self, screen: &mut [u8], x: i32, y: i32, width: i32, color: u8) {
        if y < self.clip.t || y >= self.clip.b {
            return;
        }

        let xl = x.max(self.clip.l);
        let xr = x.saturating_add(width).min(self.clip.r);
        Self::fill_span(screen, xl, xr, y, color);
    }

    /// Draw a vertical line of `height` pixels starting at `(x, y)`
    pub fn draw_vline(&self, screen: &mut [u8], x: i32, y: i32, height: i32, color: u8) {
        if x < self.clip.l || x >= self.clip.r {
            return;
        }

        let yt = y.max(self.clip.t);
        let yb = y.saturating_add(height).min(self.clip.b);
        for y in yt..yb {
            Self::set_pixel_fast(screen, x, y, color);
        }
    }

    /// Fill a rectangle
    pub fn draw_rect(&self, screen: &mut [u8], x: i32, y: i32, width: i32, height: i32, color: u8) {
        let yt = y.max(self.clip.t);
        let yb = y.saturating_add(height).min(self.clip.b);
        for row in yt..yb {
            self.draw_hline(screen, x, row, width, color);
        }
    }

    /// Draw a one-pixel rectangle outline
    pub fn draw_rect_border(
        &self,
        screen: &mut [u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: u8,
    ) {
        if width <= 0 || height <= 0 {
            return;
        }

        self.draw_hline(screen, x, y, width, color);
        self.draw_hline(screen, x, y.saturating_add(height - 1), width, color);
        self.draw_vline(screen, x, y, height, color);
        self.draw_vline(screen, x.saturating_add(width - 1), y, height, color);
    }

    /// Fill the whole framebuffer, ignoring the clip rectangle
    pub fn fill_screen(screen: &mut [u8], color: u8) {
        let color = color & 0x0F;
        screen.fill(color | (color << 4));
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::SCREEN_BYTES;

    fn screen() -> Vec<u8> {
        vec![0u8; SCREEN_BYTES]
    }

    fn count_color(screen: &[u8], color: u8) -> usize {
        (0..SCREEN_WIDTH * SCREEN_HEIGHT)
            .filter(|&i| peek4(screen, i) == color)
            .count()
    }

    #[test]
    fn test_set_pixel_packs_nibbles() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.set_pixel(&mut screen, 0, 0, 0x3);
        rasterizer.set_pixel(&mut screen, 1, 0, 0xC);
        assert_eq!(screen[0], 0xC3);
    }

    #[test]
    fn test_set_pixel_respects_clip() {
        let mut screen = screen();
        let mut rasterizer = Rasterizer::new();
        rasterizer.set_clip(10, 10, 5, 5);

        rasterizer.set_pixel(&mut screen, 9, 10, 7);
        rasterizer.set_pixel(&mut screen, 15, 10, 7);
        rasterizer.set_pixel(&mut screen, 10, 15, 7);
        assert_eq!(count_color(&screen, 7), 0);

        rasterizer.set_pixel(&mut screen, 14, 14, 7);
        assert_eq!(Rasterizer::get_pixel(&screen, 14, 14), 7);
    }

    #[test]
    fn test_get_pixel_outside_screen() {
        let screen = vec![0xFFu8; SCREEN_BYTES];
        assert_eq!(Rasterizer::get_pixel(&screen, -1, 0), 0);
        assert_eq!(Rasterizer::get_pixel(&screen, 240, 0), 0);
        assert_eq!(Rasterizer::get_pixel(&screen, 0, 136), 0);
        assert_eq!(Rasterizer::get_pixel(&screen, 239, 135), 0xF);
    }

    #[test]
    fn test_hline_clamped() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_hline(&mut screen, -10, 5, 20, 4);
        assert_eq!(count_color(&screen, 4), 10);
        assert_eq!(Rasterizer::get_pixel(&screen, 9, 5), 4);
        assert_eq!(Rasterizer::get_pixel(&screen, 10, 5), 0);
    }

    #[test]
    fn test_vline_clamped() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_vline(&mut screen, 3, 130, 20, 6);
        assert_eq!(count_color(&screen, 6), 6);
        rasterizer.draw_vline(&mut screen, 240, 0, 20, 6);
        assert_eq!(count_color(&screen, 6), 6);
    }

    #[test]
    fn test_rect_fill() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_rect(&mut screen, 0, 0, 8, 8, 5);
        assert_eq!(count_color(&screen, 5), 64);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(Rasterizer::get_pixel(&screen, x, y), 5);
            }
        }
    }

    #[test]
    fn test_rect_border() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_rect_border(&mut screen, 10, 10, 4, 3, 2);
        // 4 + 4 top/bottom, 1 + 1 middle row
        assert_eq!(count_color(&screen, 2), 10);
        assert_eq!(Rasterizer::get_pixel(&screen, 11, 11), 0);
    }

    #[test]
    fn test_rect_border_degenerate() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_rect_border(&mut screen, 10, 10, 0, 3, 2);
        rasterizer.draw_rect_border(&mut screen, 10, 10, 3, -1, 2);
        assert_eq!(count_color(&screen, 2), 0);
    }

    #[test]
    fn test_fill_screen() {
        let mut screen = screen();
        Rasterizer::fill_screen(&mut screen, 0x1A);
        assert!(screen.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_visible_cells() {
        assert_eq!(visible_cells(0, 4, 8, 0, 240), 0..4);
        assert_eq!(visible_cells(-10, 4, 8, 0, 240), 1..4);
        assert_eq!(visible_cells(230, 4, 8, 0, 240), 0..2);
        assert_eq!(visible_cells(240, 4, 8, 0, 240), 0..0);
        assert_eq!(visible_cells(0, 4, 0, 0, 240), 0..0);
        assert_eq!(visible_cells(0, -1, 8, 0, 240), 0..0);
    }

    #[test]
    fn test_visible_cells_extreme_runs() {
        assert_eq!(visible_cells(0, i32::MAX, 8, 0, 240), 0..30);
        assert_eq!(visible_cells(i32::MIN, i32::MAX, 8, 0, 240), 268435456..268435486);
        assert_eq!(visible_cells(i32::MAX, 4, 8, 0, 240), 0..0);
        assert_eq!(visible_cells(i32::MIN, 1, i32::MAX, 0, 240), 0..0);

        let cells = visible_cells(i32::MIN, i32::MAX, 8, 0, 240);
        assert_eq!(cell_origin(i32::MIN, cells.start, 8), 0);
        assert_eq!(cell_origin(i32::MIN, cells.end - 1, 8), 232);
    }

    #[test]
    fn test_rect_border_at_extremes() {
        let mut screen = screen();
        let rasterizer = Rasterizer::new();
        rasterizer.draw_rect_border(&mut screen, i32::MAX, i32::MAX, i32::MAX, i32::MAX, 3);
        rasterizer.draw_rect_border(&mut screen, i32::MIN, i32::MIN, i32::MAX, i32::MAX, 3);
        assert_eq!(count_color(&screen, 3), 0);

        rasterizer.draw_rect_border(&mut screen, 5, 5, i32::MAX, i32::MAX, 3);
        assert_eq!(count_color(&screen, 3), (240 - 5) + (136 - 6));
    }

    #[test]
    fn test_span_buffer_record() {
        let mut spans = SpanBuffer::new();
        spans.record(5, 3);
        spans.record(2, 3);
        spans.record(9, 3);
        spans.record(1, -1);
        spans.record(1, 136);
        assert_eq!((spans.left[3], spans.right[3]), (2, 9));
        assert_eq!(spans.left[0], i32::MAX);

        spans.reset();
        assert_eq!((spans.left[3], spans.right[3]), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_span_buffer_textured_left_edge() {
        let mut spans = SpanBuffer::new();
        spans.record_textured(10, 0, 1.0, 2.0);
        spans.record_textured(4, 0, 0.5, 0.25);
        spans.record_textured(12, 0, 9.0, 9.0);
        assert_eq!(spans.left[0], 4);
        assert_eq!(spans.right[0], 12);
        assert_eq!(spans.u_left[0], 32768);
        assert_eq!(spans.v_left[0], 16384);
    }
}
