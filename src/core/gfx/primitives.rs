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

//! Drawing primitive type definitions
//!
//! This module contains the small value types passed to drawing calls: the
//! clip rectangle, tile orientation, map remap results, texture sources and
//! triangle vertices.

use bitflags::bitflags;

use crate::core::memory::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Clipping rectangle
///
/// Right and bottom edges are exclusive. Every constructor clamps the
/// rectangle to the framebuffer, so a pixel `(x, y)` is writable exactly
/// when `l <= x < r && t <= y < b`.
///
/// # Examples
///
/// ```
/// use ticraster::core::gfx::ClipRect;
///
/// let clip = ClipRect::new(-10, 2, 300, 4);
/// assert_eq!((clip.l, clip.t, clip.r, clip.b), (0, 2, 240, 6));
/// assert!(clip.contains(0, 5));
/// assert!(!clip.contains(0, 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    /// Left edge (inclusive)
    pub l: i32,
    /// Top edge (inclusive)
    pub t: i32,
    /// Right edge (exclusive)
    pub r: i32,
    /// Bottom edge (exclusive)
    pub b: i32,
}

impl ClipRect {
    /// Build a clip rectangle from a position and size, clamped to the screen
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            l: x.max(0),
            t: y.max(0),
            r: x.saturating_add(width).min(SCREEN_WIDTH as i32),
            b: y.saturating_add(height).min(SCREEN_HEIGHT as i32),
        }
    }

    /// Clip rectangle covering the whole framebuffer
    pub const fn full() -> Self {
        Self {
            l: 0,
            t: 0,
            r: SCREEN_WIDTH as i32,
            b: SCREEN_HEIGHT as i32,
        }
    }

    /// Check whether the rectangle covers the whole framebuffer
    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }

    /// Check whether the rectangle contains no pixel
    pub fn is_empty(&self) -> bool {
        self.l >= self.r || self.t >= self.b
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.l && y >= self.t && x < self.r && y < self.b
    }

    /// Reject a `w`×`h` box at `(x, y)` that lies entirely outside
    ///
    /// Evaluated in 64 bits, so any position and size is accepted.
    #[inline]
    pub fn rejects(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);
        y + h - 1 < self.t as i64 || x + w - 1 < self.l as i64 || y >= self.b as i64 || x >= self.r as i64
    }
}

impl Default for ClipRect {
    fn default() -> Self {
        Self::full()
    }
}

bitflags! {
    /// Tile mirroring
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flip: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL = 1 << 1;
    }
}

impl Flip {
    /// Build from a raw script value, masked to two bits
    pub fn from_raw(value: i32) -> Self {
        Self::from_bits_truncate((value & 3) as u8)
    }
}

/// Tile rotation, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotate {
    #[default]
    None = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
}

impl Rotate {
    /// Build from a raw script value, masked to two bits
    pub fn from_raw(value: i32) -> Self {
        match value & 3 {
            0 => Rotate::None,
            1 => Rotate::Rotate90,
            2 => Rotate::Rotate180,
            _ => Rotate::Rotate270,
        }
    }

    /// Check whether the rotation swaps the X and Y axes
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotate::Rotate90 | Rotate::Rotate270)
    }
}

/// Per-cell override returned by a map remap callback
///
/// The callback receives the cell's stored tile index already filled in and
/// may replace any of the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapResult {
    pub index: u8,
    pub flip: Flip,
    pub rotate: Rotate,
}

impl RemapResult {
    pub fn new(index: u8) -> Self {
        Self {
            index,
            flip: Flip::empty(),
            rotate: Rotate::None,
        }
    }
}

/// Texture source for textured triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSource {
    /// Current tile sheet, U/V in sheet pixels
    Tiles = 0,
    /// Map, U/V in map pixels (8 per cell)
    Map = 1,
    /// Live framebuffer, U/V in screen pixels
    Screen = 2,
}

impl TryFrom<u8> for TextureSource {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TextureSource::Tiles),
            1 => Ok(TextureSource::Map),
            2 => Ok(TextureSource::Screen),
            other => Err(other),
        }
    }
}

/// Screen-space point with floating-point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Textured triangle vertex
///
/// `z` is the view-space depth; it takes part in perspective correction and
/// depth testing only when every vertex of the triangle has `z > ε`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TexVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
    pub z: f32,
}

impl TexVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { x, y, u, v, z: 0.0 }
    }

    pub const fn with_depth(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn position(&self) -> Vertex {
        Vertex::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_rect_clamps() {
        let clip = ClipRect::new(-5, -5, 10, 10);
        assert_eq!(clip, ClipRect { l: 0, t: 0, r: 5, b: 5 });

        let clip = ClipRect::new(200, 100, 100, 100);
        assert_eq!(clip, ClipRect { l: 200, t: 100, r: 240, b: 136 });
    }

    #[test]
    fn test_clip_rect_saturates() {
        let clip = ClipRect::new(i32::MAX - 1, 0, i32::MAX, 10);
        assert!(clip.is_empty());
    }

    #[test]
    fn test_clip_rejects() {
        let clip = ClipRect::new(10, 10, 10, 10);
        assert!(clip.rejects(0, 0, 10, 10));
        assert!(!clip.rejects(0, 0, 11, 11));
        assert!(clip.rejects(20, 10, 8, 8));
    }

    #[test]
    fn test_clip_rejects_extreme_boxes() {
        let clip = ClipRect::full();
        assert!(clip.rejects(i32::MAX, 0, i32::MAX, 8));
        assert!(clip.rejects(i32::MIN, i32::MIN, 8, 8));
        assert!(clip.rejects(i32::MIN, 0, i32::MAX, 1));
        assert!(!clip.rejects(-8, 0, i32::MAX, 1));
        assert!(!clip.rejects(0, 0, i32::MAX, i32::MAX));
    }

    #[test]
    fn test_flip_masked() {
        assert_eq!(Flip::from_raw(7), Flip::HORIZONTAL | Flip::VERTICAL);
        assert_eq!(Flip::from_raw(4), Flip::empty());
    }

    #[test]
    fn test_rotate_masked() {
        assert_eq!(Rotate::from_raw(5), Rotate::Rotate90);
        assert_eq!(Rotate::from_raw(-1), Rotate::Rotate270);
        assert!(Rotate::Rotate270.swaps_axes());
    }

    #[test]
    fn test_texture_source_try_from() {
        assert_eq!(TextureSource::try_from(2), Ok(TextureSource::Screen));
        assert_eq!(TextureSource::try_from(3), Err(3));
    }
}
