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

//! Scene files
//!
//! A scene is a JSON document that fills console memory (tiles, font
//! glyphs, map cells, flags, remap table) and then runs a list of drawing
//! commands against a [`Gfx`] context. It is what the `ticraster render`
//! command consumes.
//!
//! ```json
//! {
//!   "tiles": [{ "index": 1, "pixels": "3333...3333" }],
//!   "map": [{ "x": 0, "y": 0, "tile": 1 }],
//!   "commands": [
//!     { "op": "cls", "color": 0 },
//!     { "op": "map", "x": 0, "y": 0, "w": 30, "h": 17 },
//!     { "op": "print", "text": "HELLO", "x": 4, "y": 4, "color": 12 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GfxError, Result};
use crate::core::gfx::{BlitMode, Bpp, Flip, Gfx, Rotate, Segment, TexVertex, TileSheetMut, Vertex};
use crate::core::memory::SPRITE_SIZE;

/// Hex digits in a tile upload, one per pixel
const TILE_DIGITS: usize = SPRITE_SIZE * SPRITE_SIZE;

fn one() -> i32 {
    1
}

/// One tile written before drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUpload {
    /// Tile index, addressed globally within the segment
    pub index: i32,
    /// Segment to write through; the current blit segment when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<u8>,
    /// 64 hex digits, row-major, one pixel each
    pub pixels: String,
}

impl TileUpload {
    /// Decode the pixel string
    pub fn decode(&self) -> Result<[u8; TILE_DIGITS]> {
        if self.pixels.len() != TILE_DIGITS {
            return Err(GfxError::InvalidTileData(format!(
                "tile {}: expected {} hex digits, got {}",
                self.index,
                TILE_DIGITS,
                self.pixels.len()
            )));
        }

        let mut pixels = [0u8; TILE_DIGITS];
        for (pixel, c) in pixels.iter_mut().zip(self.pixels.chars()) {
            let value = c.to_digit(16).ok_or_else(|| {
                GfxError::InvalidTileData(format!("tile {}: invalid hex digit {:?}", self.index, c))
            })?;
            *pixel = value as u8;
        }
        Ok(pixels)
    }
}

/// One map cell written before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    pub x: i32,
    pub y: i32,
    pub tile: u8,
}

/// One sprite flag bit set before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagBit {
    pub index: i32,
    pub bit: u8,
}

/// Triangle vertex as written in a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneVertex {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub u: f32,
    #[serde(default)]
    pub v: f32,
    #[serde(default)]
    pub z: f32,
}

impl SceneVertex {
    fn position(&self) -> Vertex {
        Vertex::new(self.x, self.y)
    }

    fn textured(&self) -> TexVertex {
        TexVertex::new(self.x, self.y, self.u, self.v).with_depth(self.z)
    }
}

/// Drawing command, tagged by `op`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Cls {
        #[serde(default)]
        color: u8,
    },
    Clip {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    ResetClip,
    Blit {
        bpp: u8,
        #[serde(default)]
        bank: u8,
        #[serde(default)]
        page: u8,
    },
    Remap {
        color: u8,
        value: u8,
    },
    Pix {
        x: i32,
        y: i32,
        color: u8,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: u8,
    },
    Rectb {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: u8,
    },
    Spr {
        index: i32,
        x: i32,
        y: i32,
        #[serde(default = "one")]
        w: i32,
        #[serde(default = "one")]
        h: i32,
        #[serde(default)]
        transparent: Vec<u8>,
        #[serde(default = "one")]
        scale: i32,
        #[serde(default)]
        flip: i32,
        #[serde(default)]
        rotate: i32,
    },
    Map {
        #[serde(default)]
        x: i32,
        #[serde(default)]
        y: i32,
        w: i32,
        h: i32,
        #[serde(default)]
        sx: i32,
        #[serde(default)]
        sy: i32,
        #[serde(default)]
        transparent: Vec<u8>,
        #[serde(default = "one")]
        scale: i32,
    },
    Mset {
        x: i32,
        y: i32,
        tile: u8,
    },
    Print {
        text: String,
        x: i32,
        y: i32,
        #[serde(default = "default_text_color")]
        color: u8,
        #[serde(default)]
        fixed: bool,
        #[serde(default = "one")]
        scale: i32,
        #[serde(default)]
        alt: bool,
    },
    Font {
        text: String,
        x: i32,
        y: i32,
        #[serde(default)]
        transparent: Vec<u8>,
        #[serde(default = "default_glyph_size")]
        width: i32,
        #[serde(default = "default_glyph_size")]
        height: i32,
        #[serde(default)]
        fixed: bool,
        #[serde(default = "one")]
        scale: i32,
        #[serde(default)]
        alt: bool,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: u8,
    },
    Circ {
        x: i32,
        y: i32,
        r: i32,
        color: u8,
    },
    Circb {
        x: i32,
        y: i32,
        r: i32,
        color: u8,
    },
    Elli {
        x: i32,
        y: i32,
        a: i32,
        b: i32,
        color: u8,
    },
    Ellib {
        x: i32,
        y: i32,
        a: i32,
        b: i32,
        color: u8,
    },
    Tri {
        vertices: [SceneVertex; 3],
        color: u8,
    },
    Trib {
        vertices: [SceneVertex; 3],
        color: u8,
    },
    Ttri {
        vertices: [SceneVertex; 3],
        #[serde(default)]
        source: u8,
        #[serde(default)]
        transparent: Vec<u8>,
        #[serde(default)]
        depth: bool,
    },
    Textri {
        vertices: [SceneVertex; 3],
        #[serde(default)]
        use_map: bool,
        #[serde(default)]
        transparent: Vec<u8>,
    },
}

fn default_text_color() -> u8 {
    15
}

fn default_glyph_size() -> i32 {
    SPRITE_SIZE as i32
}

impl DrawCommand {
    /// Run the command
    pub fn execute(&self, gfx: &mut Gfx) {
        match self {
            DrawCommand::Cls { color } => gfx.cls(*color),
            DrawCommand::Clip { x, y, w, h } => gfx.clip(*x, *y, *w, *h),
            DrawCommand::ResetClip => gfx.reset_clip(),
            DrawCommand::Blit { bpp, bank, page } => match Bpp::try_from(*bpp) {
                Ok(bpp) => gfx.set_blit_mode(BlitMode::new(bpp, *bank, *page)),
                Err(bpp) => log::warn!("Ignoring blit command with unsupported bpp {}", bpp),
            },
            DrawCommand::Remap { color, value } => gfx.ram_mut().set_mapping_entry(*color, *value),
            DrawCommand::Pix { x, y, color } => gfx.pix(*x, *y, *color),
            DrawCommand::Rect { x, y, w, h, color } => gfx.rect(*x, *y, *w, *h, *color),
            DrawCommand::Rectb { x, y, w, h, color } => gfx.rectb(*x, *y, *w, *h, *color),
            DrawCommand::Spr {
                index,
                x,
                y,
                w,
                h,
                transparent,
                scale,
                flip,
                rotate,
            } => gfx.spr(
                *index,
                *x,
                *y,
                *w,
                *h,
                transparent,
                *scale,
                Flip::from_raw(*flip),
                Rotate::from_raw(*rotate),
            ),
            DrawCommand::Map {
                x,
                y,
                w,
                h,
                sx,
                sy,
                transparent,
                scale,
            } => gfx.map(*x, *y, *w, *h, *sx, *sy, transparent, *scale, None),
            DrawCommand::Mset { x, y, tile } => gfx.mset(*x, *y, *tile),
            DrawCommand::Print {
                text,
                x,
                y,
                color,
                fixed,
                scale,
                alt,
            } => {
                gfx.print(text, *x, *y, *color, *fixed, *scale, *alt);
            }
            DrawCommand::Font {
                text,
                x,
                y,
                transparent,
                width,
                height,
                fixed,
                scale,
                alt,
            } => {
                gfx.font(text, *x, *y, transparent, *width, *height, *fixed, *scale, *alt);
            }
            DrawCommand::Line { x0, y0, x1, y1, color } => gfx.line(*x0, *y0, *x1, *y1, *color),
            DrawCommand::Circ { x, y, r, color } => gfx.circ(*x, *y, *r, *color),
            DrawCommand::Circb { x, y, r, color } => gfx.circb(*x, *y, *r, *color),
            DrawCommand::Elli { x, y, a, b, color } => gfx.elli(*x, *y, *a, *b, *color),
            DrawCommand::Ellib { x, y, a, b, color } => gfx.ellib(*x, *y, *a, *b, *color),
            DrawCommand::Tri { vertices, color } => gfx.tri(vertices.map(|v| v.position()), *color),
            DrawCommand::Trib { vertices, color } => gfx.trib(vertices.map(|v| v.position()), *color),
            DrawCommand::Ttri {
                vertices,
                source,
                transparent,
                depth,
            } => gfx.ttri(vertices.map(|v| v.textured()), *source, transparent, *depth),
            DrawCommand::Textri {
                vertices,
                use_map,
                transparent,
            } => gfx.textri(vertices.map(|v| v.textured()), *use_map, transparent),
        }
    }
}

/// Scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub tiles: Vec<TileUpload>,
    /// Glyphs, written through the system font segment unless a segment
    /// is given
    pub font: Vec<TileUpload>,
    pub map: Vec<MapCell>,
    pub flags: Vec<FlagBit>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Parse a scene from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let scene = Self::from_json(&text)?;
        log::info!(
            "Loaded scene {}: {} tiles, {} glyphs, {} commands",
            path.as_ref().display(),
            scene.tiles.len(),
            scene.font.len(),
            scene.commands.len()
        );
        Ok(scene)
    }

    /// Fill memory and run every command
    ///
    /// Tile data is validated before anything is written, so an invalid
    /// scene leaves `gfx` untouched.
    pub fn apply(&self, gfx: &mut Gfx) -> Result<()> {
        let blit_segment = gfx.ram().blit_segment;
        let tiles = self
            .tiles
            .iter()
            .map(|t| -> Result<_> { Ok((t.segment.unwrap_or(blit_segment), t.index, t.decode()?)) })
            .collect::<Result<Vec<_>>>()?;
        let glyphs = self
            .font
            .iter()
            .map(|t| -> Result<_> { Ok((t.segment.unwrap_or(1), t.index, t.decode()?)) })
            .collect::<Result<Vec<_>>>()?;

        for (segment, index, pixels) in tiles.iter().chain(glyphs.iter()) {
            upload_tile(gfx, *segment, *index, pixels);
        }
        for cell in &self.map {
            gfx.mset(cell.x, cell.y, cell.tile);
        }
        for flag in &self.flags {
            gfx.fset(flag.index, flag.bit, true);
        }

        for command in &self.commands {
            log::debug!("Scene command: {:?}", command);
            command.execute(gfx);
        }
        Ok(())
    }
}

fn upload_tile(gfx: &mut Gfx, segment: u8, index: i32, pixels: &[u8; TILE_DIGITS]) {
    let ram = gfx.ram_mut();
    let data = if Segment::reads_font(segment) {
        &mut ram.font
    } else {
        &mut ram.tiles
    };

    let mut sheet = TileSheetMut::new(segment, data);
    let mut tile = sheet.tile_mut(index, false);
    for (i, &value) in pixels.iter().enumerate() {
        let (x, y) = ((i % SPRITE_SIZE) as i32, (i / SPRITE_SIZE) as i32);
        tile.set_pixel(x, y, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tile() {
        let upload = TileUpload {
            index: 0,
            segment: None,
            pixels: "0123456789abcdef".repeat(4),
        };
        let pixels = upload.decode().unwrap();
        assert_eq!(pixels[0], 0);
        assert_eq!(pixels[15], 15);
        assert_eq!(pixels[63], 15);
    }

    #[test]
    fn test_decode_tile_errors() {
        let short = TileUpload {
            index: 3,
            segment: None,
            pixels: "00".into(),
        };
        assert!(matches!(short.decode(), Err(GfxError::InvalidTileData(_))));

        let bad = TileUpload {
            index: 3,
            segment: None,
            pixels: "g".repeat(64),
        };
        assert!(matches!(bad.decode(), Err(GfxError::InvalidTileData(_))));
    }

    #[test]
    fn test_command_defaults() {
        let command: DrawCommand = serde_json::from_str(r#"{"op": "spr", "index": 1, "x": 2, "y": 3}"#).unwrap();
        assert_eq!(
            command,
            DrawCommand::Spr {
                index: 1,
                x: 2,
                y: 3,
                w: 1,
                h: 1,
                transparent: vec![],
                scale: 1,
                flip: 0,
                rotate: 0,
            }
        );

        let command: DrawCommand = serde_json::from_str(r#"{"op": "reset_clip"}"#).unwrap();
        assert_eq!(command, DrawCommand::ResetClip);
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result = Scene::from_json(r#"{"commands": [{"op": "teleport"}]}"#);
        assert!(matches!(result, Err(GfxError::Scene(_))));
    }

    #[test]
    fn test_apply_uploads_and_draws() {
        let scene = Scene::from_json(
            r#"{
                "tiles": [{ "index": 1, "pixels": "7777777777777777777777777777777777777777777777777777777777777777" }],
                "map": [{ "x": 0, "y": 0, "tile": 1 }],
                "flags": [{ "index": 1, "bit": 2 }],
                "commands": [
                    { "op": "cls", "color": 2 },
                    { "op": "map", "w": 1, "h": 1 },
                    { "op": "rect", "x": 20, "y": 20, "w": 2, "h": 2, "color": 9 }
                ]
            }"#,
        )
        .unwrap();

        let mut gfx = Gfx::new();
        scene.apply(&mut gfx).unwrap();

        assert_eq!(gfx.pixel(0, 0), 7);
        assert_eq!(gfx.pixel(8, 0), 2);
        assert_eq!(gfx.pixel(21, 21), 9);
        assert!(gfx.fget(1, 2));
    }

    #[test]
    fn test_invalid_tile_leaves_memory_untouched() {
        let scene = Scene {
            tiles: vec![
                TileUpload {
                    index: 0,
                    segment: None,
                    pixels: "f".repeat(64),
                },
                TileUpload {
                    index: 1,
                    segment: None,
                    pixels: "f".repeat(10),
                },
            ],
            commands: vec![DrawCommand::Cls { color: 4 }],
            ..Scene::default()
        };

        let mut gfx = Gfx::new();
        assert!(scene.apply(&mut gfx).is_err());
        assert!(gfx.ram().tiles.iter().all(|&b| b == 0));
        assert_eq!(gfx.pixel(0, 0), 0);
    }

    #[test]
    fn test_font_upload_and_print() {
        let glyph = format!("{}{}", "11100000", "00000000".repeat(7));
        let scene = Scene {
            font: vec![TileUpload {
                index: b'A' as i32,
                segment: None,
                pixels: glyph,
            }],
            commands: vec![DrawCommand::Print {
                text: "A".into(),
                x: 0,
                y: 0,
                color: 6,
                fixed: false,
                scale: 1,
                alt: false,
            }],
            ..Scene::default()
        };

        let mut gfx = Gfx::new();
        scene.apply(&mut gfx).unwrap();
        assert_eq!(gfx.pixel(0, 0), 6);
        assert_eq!(gfx.pixel(2, 0), 6);
        assert_eq!(gfx.pixel(3, 0), 0);
        assert_eq!(gfx.pixel(0, 1), 0);
    }
}
