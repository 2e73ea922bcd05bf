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

//! Triangle rasterization
//!
//! Flat and textured triangles share one edge-function scan converter.
//!
//! # Algorithm
//!
//! 1. Intersect the bounding box of the (fractional) vertices with the clip
//!    rectangle and bail out if it is empty
//! 2. Reject triangles whose signed area is below [`AREA_EPSILON`]
//! 3. Swap two vertices if the area is negative, so every edge function is
//!    positive inside the triangle
//! 4. Evaluate the three edge functions at each pixel center (offset by
//!    [`EDGE_BIAS`] so centers lying exactly on a shared edge belong to one
//!    triangle only), stepping them incrementally along each row
//! 5. Shade pixels where all three edge values are non-negative, using the
//!    normalized edge values as barycentric weights
//!
//! # Shaders
//!
//! - Flat: one color for every covered pixel
//! - Textured: interpolate U/V and sample the tile sheet, the map or the
//!   live framebuffer, then map the sample through the palette map
//!
//! When every vertex has a depth above [`DEPTH_EPSILON`] and depth is
//! requested, U/V are interpolated perspective-correctly and each pixel is
//! tested against the depth buffer, which stores interpolated `1/z`.
//!
//! # References
//!
//! - [Scratchapixel: Rasterization](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation)

use super::rasterizer::Rasterizer;
use crate::core::gfx::palette::{PaletteMap, TRANSPARENT_COLOR};
use crate::core::gfx::primitives::{ClipRect, TexVertex, Vertex};
use crate::core::gfx::tilesheet::TileSheet;
use crate::core::memory::{MAP_HEIGHT, MAP_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, SPRITE_SIZE};

/// Smallest signed area treated as a real triangle
pub const AREA_EPSILON: f32 = 1.0e-6;

/// Pixel-center offset that breaks ties on shared edges
pub const EDGE_BIAS: f32 = 1.0e-4;

/// Smallest depth that engages perspective correction
pub const DEPTH_EPSILON: f32 = 1.0e-4;

const MAP_PIXEL_WIDTH: i32 = (MAP_WIDTH * SPRITE_SIZE) as i32;
const MAP_PIXEL_HEIGHT: i32 = (MAP_HEIGHT * SPRITE_SIZE) as i32;

#[inline(always)]
fn edge(a: Vertex, b: Vertex, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Scan-convert a triangle, calling `shade(x, y, weights)` for every
/// covered pixel inside `clip`
///
/// `weights[k]` belongs to `v[k]` whatever the input winding.
pub(crate) fn scan_triangle(clip: ClipRect, v: [Vertex; 3], mut shade: impl FnMut(i32, i32, [f32; 3])) {
    let min_x = v[0].x.min(v[1].x).min(v[2].x).floor();
    let min_y = v[0].y.min(v[1].y).min(v[2].y).floor();
    let max_x = v[0].x.max(v[1].x).max(v[2].x).ceil();
    let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil();

    // an all-NaN box fails the comparison; partial NaN fails the area check
    if !(min_x < max_x && min_y < max_y) {
        return;
    }

    let left = (min_x.max(clip.l as f32)) as i32;
    let top = (min_y.max(clip.t as f32)) as i32;
    let right = (max_x.min(clip.r as f32)) as i32;
    let bottom = (max_y.min(clip.b as f32)) as i32;
    if left >= right || top >= bottom {
        return;
    }

    let mut order = [0usize, 1, 2];
    let mut area = edge(v[0], v[1], v[2].x, v[2].y);
    if area.abs() < AREA_EPSILON || !area.is_finite() {
        return;
    }
    if area < 0.0 {
        order.swap(1, 2);
        area = -area;
    }

    let (v0, v1, v2) = (v[order[0]], v[order[1]], v[order[2]]);
    let edges = [(v1, v2), (v2, v0), (v0, v1)];
    let steps = edges.map(|(a, b)| -(b.y - a.y));
    let inv_area = 1.0 / area;

    let start_x = left as f32 + 0.5 - EDGE_BIAS;
    for y in top..bottom {
        let py = y as f32 + 0.5 - EDGE_BIAS;
        let mut e = edges.map(|(a, b)| edge(a, b, start_x, py));

        for x in left..right {
            if e[0] >= 0.0 && e[1] >= 0.0 && e[2] >= 0.0 {
                let mut weights = [0.0f32; 3];
                for k in 0..3 {
                    weights[order[k]] = e[k] * inv_area;
                }
                shade(x, y, weights);
            }

            for k in 0..3 {
                e[k] += steps[k];
            }
        }
    }
}

/// Texture sampler for textured triangles
#[derive(Clone, Copy)]
pub enum Sampler<'a> {
    /// Sample the tile sheet as one image, wrapped to its size
    Tiles(TileSheet<'a>),
    /// Sample map pixels (8 per cell), wrapped toroidally
    Map { sheet: TileSheet<'a>, map: &'a [u8] },
    /// Sample the framebuffer itself, wrapped to the screen
    Screen,
}

impl Sampler<'_> {
    /// Fetch the raw color index at texel `(u, v)`
    #[inline]
    pub fn sample(&self, screen: &[u8], u: f32, v: f32) -> u8 {
        let iu = u.floor() as i32;
        let iv = v.floor() as i32;

        match self {
            Sampler::Tiles(sheet) => {
                let iu = iu & (sheet.width() as i32 - 1);
                let iv = iv & (sheet.height() as i32 - 1);
                sheet.pixel(iu as u32, iv as u32)
            }
            Sampler::Map { sheet, map } => {
                let iu = iu.rem_euclid(MAP_PIXEL_WIDTH);
                let iv = iv.rem_euclid(MAP_PIXEL_HEIGHT);
                let index = map[(iv >> 3) as usize * MAP_WIDTH + (iu >> 3) as usize];
                sheet.tile(index as i32, true).pixel(iu & 7, iv & 7)
            }
            Sampler::Screen => {
                let iu = iu.rem_euclid(SCREEN_WIDTH as i32);
                let iv = iv.rem_euclid(SCREEN_HEIGHT as i32);
                Rasterizer::get_pixel(screen, iu, iv)
            }
        }
    }
}

/// Per-triangle shader attribute context
///
/// Holds the per-vertex interpolants: `(u, v)` for affine mapping, or
/// `(u/z, v/z, 1/z)` when perspective correction is engaged.
#[derive(Debug, Clone, Copy)]
pub struct ShaderContext {
    attributes: [[f32; 3]; 3],
    perspective: bool,
}

impl ShaderContext {
    pub fn new(vertices: &[TexVertex; 3], depth: bool) -> Self {
        let perspective = depth && vertices.iter().all(|v| v.z > DEPTH_EPSILON);
        let attributes = vertices.map(|v| {
            if perspective {
                let inv_z = 1.0 / v.z;
                [v.u * inv_z, v.v * inv_z, inv_z]
            } else {
                [v.u, v.v, 0.0]
            }
        });
        Self {
            attributes,
            perspective,
        }
    }

    pub fn perspective(&self) -> bool {
        self.perspective
    }

    /// Interpolate `(u, v, 1/z)` for barycentric weights
    #[inline]
    pub fn interpolate(&self, w: [f32; 3]) -> (f32, f32, Option<f32>) {
        let [a, b, c] = self.attributes;
        let lerp = |i: usize| w[0] * a[i] + w[1] * b[i] + w[2] * c[i];

        if self.perspective {
            let inv_z = lerp(2);
            (lerp(0) / inv_z, lerp(1) / inv_z, Some(inv_z))
        } else {
            (lerp(0), lerp(1), None)
        }
    }
}

/// Per-pixel shader
pub enum Shader<'a> {
    Flat(u8),
    Textured {
        sampler: Sampler<'a>,
        mapping: PaletteMap,
        context: ShaderContext,
    },
}

/// Shader output for one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub color: u8,
    /// Interpolated `1/z` when depth testing is engaged
    pub depth: Option<f32>,
}

impl Shader<'_> {
    #[inline]
    pub fn shade(&self, screen: &[u8], weights: [f32; 3]) -> Fragment {
        match self {
            Shader::Flat(color) => Fragment {
                color: *color,
                depth: None,
            },
            Shader::Textured {
                sampler,
                mapping,
                context,
            } => {
                let (u, v, depth) = context.interpolate(weights);
                Fragment {
                    color: mapping.get(sampler.sample(screen, u, v)),
                    depth,
                }
            }
        }
    }
}

impl Rasterizer {
    /// Fill a triangle with one color
    pub fn draw_triangle(&mut self, screen: &mut [u8], v: [Vertex; 3], color: u8) {
        self.shade_triangle(screen, v, &Shader::Flat(color));
    }

    /// Draw a textured triangle
    ///
    /// # Arguments
    ///
    /// * `screen` - Packed framebuffer (also the texture for [`Sampler::Screen`])
    /// * `v` - Vertices with texture coordinates and optional depth
    /// * `sampler` - Texture source
    /// * `mapping` - Palette map applied to every sample
    /// * `depth` - Request perspective correction and depth testing; only
    ///   honored when every vertex has `z > DEPTH_EPSILON`
    pub fn draw_textured_triangle(
        &mut self,
        screen: &mut [u8],
        v: [TexVertex; 3],
        sampler: Sampler<'_>,
        mapping: &PaletteMap,
        depth: bool,
    ) {
        let shader = Shader::Textured {
            sampler,
            mapping: *mapping,
            context: ShaderContext::new(&v, depth),
        };
        self.shade_triangle(screen, v.map(|v| v.position()), &shader);
    }

    /// Run a shader over every covered pixel
    ///
    /// Depth-tested fragments are dropped when their `1/z` is below the
    /// buffered value; the buffer is updated only for painted pixels.
    pub fn shade_triangle(&mut self, screen: &mut [u8], v: [Vertex; 3], shader: &Shader<'_>) {
        let zbuffer = &mut self.zbuffer;

        scan_triangle(self.clip, v, |x, y, weights| {
            let index = y as usize * SCREEN_WIDTH + x as usize;
            let fragment = shader.shade(screen, weights);

            if let Some(depth) = fragment.depth {
                if depth < zbuffer[index] {
                    return;
                }
            }
            if fragment.color == TRANSPARENT_COLOR {
                return;
            }

            Rasterizer::set_pixel_fast(screen, x, y, fragment.color);
            if let Some(depth) = fragment.depth {
                zbuffer[index] = depth;
            }
        });
    }
}
