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

//! Benchmarks for the rasterizer hot paths

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use ticraster::core::gfx::{Flip, Rotate, TexVertex, TileSheetMut, Vertex};
use ticraster::Gfx;

fn textured_gfx() -> Gfx {
    let mut gfx = Gfx::new();
    let segment = gfx.ram().blit_segment;
    let mut sheet = TileSheetMut::new(segment, gfx.ram_mut().tiles_mut());
    for y in 0..256 {
        for x in 0..128 {
            sheet.set_pixel(x, y, ((x ^ y) & 15) as u8);
        }
    }
    for (i, cell) in gfx.ram_mut().map_mut().iter_mut().enumerate() {
        *cell = (i % 256) as u8;
    }
    gfx
}

fn bench_primitives(c: &mut Criterion) {
    let mut gfx = Gfx::new();

    c.bench_function("cls", |b| b.iter(|| gfx.cls(black_box(3))));
    c.bench_function("rect_full_screen", |b| b.iter(|| gfx.rect(0, 0, 240, 136, black_box(5))));
    c.bench_function("line_diagonal", |b| {
        b.iter(|| gfx.line(0.0, 0.0, black_box(239.0), 135.0, 7))
    });
    c.bench_function("circle_filled_r60", |b| b.iter(|| gfx.circ(120, 68, black_box(60), 9)));
}

fn bench_tiles(c: &mut Criterion) {
    let mut gfx = textured_gfx();

    c.bench_function("spr_4x4_scale1", |b| {
        b.iter(|| gfx.spr(black_box(0), 10, 10, 4, 4, &[0], 1, Flip::HORIZONTAL, Rotate::Rotate90))
    });
    c.bench_function("map_full_screen", |b| {
        b.iter(|| gfx.map(black_box(3), 5, 30, 17, 0, 0, &[], 1, None))
    });
    c.bench_function("print_line", |b| {
        b.iter(|| gfx.print(black_box("THE QUICK BROWN FOX JUMPS"), 0, 0, 12, false, 1, false))
    });
}

fn bench_triangles(c: &mut Criterion) {
    let mut gfx = textured_gfx();
    let flat = [Vertex::new(0.0, 0.0), Vertex::new(239.0, 20.0), Vertex::new(60.0, 135.0)];
    let textured = [
        TexVertex::new(0.0, 0.0, 0.0, 0.0).with_depth(1.0),
        TexVertex::new(239.0, 20.0, 127.0, 0.0).with_depth(2.0),
        TexVertex::new(60.0, 135.0, 0.0, 255.0).with_depth(3.0),
    ];

    c.bench_function("tri_flat", |b| b.iter(|| gfx.tri(black_box(flat), 4)));
    c.bench_function("ttri_tiles_depth", |b| {
        b.iter(|| {
            gfx.cls(0);
            gfx.ttri(black_box(textured), 0, &[], true)
        })
    });
    c.bench_function("ttri_map", |b| b.iter(|| gfx.ttri(black_box(textured), 1, &[], false)));
    c.bench_function("textri_legacy", |b| b.iter(|| gfx.textri(black_box(textured), false, &[])));
}

criterion_group!(benches, bench_primitives, bench_tiles, bench_triangles);
criterion_main!(benches);
