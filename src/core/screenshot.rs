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

//! PNG output of the framebuffer

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::Result;
use crate::core::memory::{Ram, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Convert the screen to RGBA8, upscaled by an integer factor
///
/// A scale of 0 is treated as 1. Returns `(width, height, pixels)`.
pub fn scaled_rgba(ram: &Ram, scale: u32) -> (u32, u32, Vec<u8>) {
    let scale = scale.max(1) as usize;
    let rgba = ram.to_rgba();
    if scale == 1 {
        return (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, rgba);
    }

    let width = SCREEN_WIDTH * scale;
    let height = SCREEN_HEIGHT * scale;
    let mut out = Vec::with_capacity(width * height * 4);
    for row in rgba.chunks_exact(SCREEN_WIDTH * 4) {
        let mut line = Vec::with_capacity(width * 4);
        for pixel in row.chunks_exact(4) {
            for _ in 0..scale {
                line.extend_from_slice(pixel);
            }
        }
        for _ in 0..scale {
            out.extend_from_slice(&line);
        }
    }
    (width as u32, height as u32, out)
}

/// Encode the screen as PNG into any writer
pub fn encode_png<W: Write>(ram: &Ram, writer: W, scale: u32) -> Result<()> {
    let (width, height, rgba) = scaled_rgba(ram, scale);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Save the screen as a PNG file
pub fn write_png(ram: &Ram, path: impl AsRef<Path>, scale: u32) -> Result<()> {
    let file = fs::File::create(path.as_ref())?;
    encode_png(ram, BufWriter::new(file), scale)?;
    log::info!("Wrote {} (scale {})", path.as_ref().display(), scale.max(1));
    Ok(())
}
