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

//! Line and ellipse rendering
//!
//! Lines are parametrized along their major axis with the parametric range
//! clipped to the framebuffer before stepping. Ellipses use the integer
//! midpoint algorithm over the bounding rectangle.
//!
//! # References
//!
//! - [A Rasterizing Algorithm for Drawing Curves (Zingl)](http://members.chello.at/easyfilter/bresenham.pdf)

use super::rasterizer::Rasterizer;
use crate::core::memory::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Largest ellipse radius; keeps the midpoint error terms well inside `i64`
/// and the walk short
const MAX_RADIUS: i32 = 1 << 15;

/// Walk the midpoint ellipse inscribed in `(x0, y0)..=(x1, y1)`
///
/// Emits the four symmetric points per step, then finishes the tips of
/// very flat ellipses that the main loop stops short of.
fn trace_ellipse(x0: i64, y0: i64, x1: i64, y1: i64, mut plot: impl FnMut(i64, i64)) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);

    let a = (x1 - x0).abs();
    let b = (y1 - y0).abs();
    let mut b1 = b & 1;
    let mut dx = 4 * (1 - a) * b * b;
    let mut dy = 4 * (b1 + 1) * a * a;
    let mut err = dx + dy + b1 * a * a;

    if x0 > x1 {
        x0 = x1;
        x1 += a;
    }
    if y0 > y1 {
        y0 = y1;
    }
    y0 += (b + 1) / 2;
    y1 = y0 - b1;
    let a8 = 8 * a * a;
    b1 = 8 * b * b;

    loop {
        plot(x1, y0);
        plot(x0, y0);
        plot(x0, y1);
        plot(x1, y1);

        let e2 = 2 * err;
        if e2 <= dy {
            y0 += 1;
            y1 -= 1;
            dy += a8;
            err += dy;
        }
        if e2 >= dx || 2 * err > dy {
            x0 += 1;
            x1 -= 1;
            dx += b1;
            err += dx;
        }
        if x0 > x1 {
            break;
        }
    }

    while y0 - y1 <= b {
        plot(x0 - 1, y0);
        plot(x1 + 1, y0);
        y0 += 1;
        plot(x0 - 1, y1);
        plot(x1 + 1, y1);
        y1 -= 1;
    }
}

impl Rasterizer {
    /// Draw a line between two points with sub-pixel endpoints
    ///
    /// The major axis is the one with the larger delta, so steep and shallow
    /// lines both come out without gaps. The end point is always plotted.
    pub fn draw_line(
        &self,
        screen: &mut [u8],
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: u8,
    ) {
        let dx = x1 - x0;
        let dy = y1 - y0;

        if dx.abs() >= dy.abs() {
            let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };
            let k = if dx != 0.0 { (y1 - y0) / (x1 - x0) } else { 0.0 };

            let start = (x0.floor() as i32).max(0);
            let end = (x1.floor() as i32).min(SCREEN_WIDTH as i32);
            for x in start..end {
                let y = (y0 + k * (x as f32 - x0) + 0.5).floor() as i32;
                self.set_pixel(screen, x, y, color);
            }
            self.set_pixel(screen, x1.floor() as i32, (y1 + 0.5).floor() as i32, color);
        } else {
            let (x0, y0, x1, y1) = if y0 > y1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };
            let k = (x1 - x0) / (y1 - y0);

            let start = (y0.floor() as i32).max(0);
            let end = (y1.floor() as i32).min(SCREEN_HEIGHT as i32);
            for y in start..end {
                let x = (x0 + k * (y as f32 - y0) + 0.5).floor() as i32;
                self.set_pixel(screen, x, y, color);
            }
            self.set_pixel(screen, (x1 + 0.5).floor() as i32, y1.floor() as i32, color);
        }
    }

    /// Draw an ellipse outline centered at `(x, y)` with radii `a`, `b`
    ///
    /// Negative radii, or both radii zero, draw nothing.
    pub fn draw_ellipse_border(&self, screen: &mut [u8], x: i32, y: i32, a: i32, b: i32, color: u8) {
        let Some((x0, y0, x1, y1)) = self.ellipse_bounds(x, y, a, b) else {
            return;
        };

        trace_ellipse(x0, y0, x1, y1, |px, py| {
            if let (Ok(px), Ok(py)) = (i32::try_from(px), i32::try_from(py)) {
                self.set_pixel(screen, px, py, color);
            }
        });
    }

    /// Fill an ellipse centered at `(x, y)` with radii `a`, `b`
    ///
    /// The outline is accumulated into the span buffer and every row is
    /// then filled once, so no pixel is painted twice.
    pub fn draw_ellipse(&mut self, screen: &mut [u8], x: i32, y: i32, a: i32, b: i32, color: u8) {
        let Some((x0, y0, x1, y1)) = self.ellipse_bounds(x, y, a, b) else {
            return;
        };

        self.spans.reset();
        let spans = &mut self.spans;
        trace_ellipse(x0, y0, x1, y1, |px, py| {
            if (0..SCREEN_HEIGHT as i64).contains(&py) {
                let px = px.clamp(i32::MIN as i64 + 1, i32::MAX as i64 - 1) as i32;
                spans.record(px, py as i32);
            }
        });

        let yt = y0.max(self.clip.t as i64) as i32;
        let yb = (y1 + 1).min(self.clip.b as i64) as i32;
        for row in yt..yb {
            let xl = self.spans.left[row as usize].max(self.clip.l);
            let xr = self.spans.right[row as usize].saturating_add(1).min(self.clip.r);
            Self::fill_span(screen, xl, xr, row, color);
        }
    }

    /// Bounding rectangle of a drawable ellipse, or `None` when nothing
    /// could be painted
    ///
    /// Radii are capped at [`MAX_RADIUS`].
    fn ellipse_bounds(&self, x: i32, y: i32, a: i32, b: i32) -> Option<(i64, i64, i64, i64)> {
        if a < 0 || b < 0 || (a == 0 && b == 0) {
            return None;
        }

        let (a, b) = (a.min(MAX_RADIUS), b.min(MAX_RADIUS));
        let (x, y, a, b) = (x as i64, y as i64, a as i64, b as i64);
        let clip = self.clip;
        if y + b < clip.t as i64 || x + a < clip.l as i64 || y - b >= clip.b as i64 || x - a >= clip.r as i64 {
            return None;
        }

        Some((x - a, y - b, x + a, y + b))
    }
}
