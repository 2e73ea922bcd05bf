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

//! Scene and configuration files on disk

use std::fs;

use tempfile::tempdir;
use ticraster::core::config::GfxConfig;
use ticraster::core::scene::{DrawCommand, Scene};
use ticraster::core::screenshot;
use ticraster::{Gfx, GfxError};

const SCENE: &str = r#"{
    "tiles": [
        { "index": 1, "pixels": "1111111112222221123333211234432112344321123333211222222111111111" }
    ],
    "map": [
        { "x": 0, "y": 0, "tile": 1 },
        { "x": 1, "y": 0, "tile": 1 }
    ],
    "commands": [
        { "op": "cls", "color": 0 },
        { "op": "map", "w": 2, "h": 1, "sx": 8, "sy": 8 },
        { "op": "spr", "index": 1, "x": 100, "y": 50, "scale": 2, "transparent": [1] },
        { "op": "circ", "x": 60, "y": 80, "r": 10, "color": 6 },
        { "op": "tri", "vertices": [{ "x": 150, "y": 100 }, { "x": 200, "y": 100 }, { "x": 150, "y": 130 }], "color": 9 },
        { "op": "line", "x0": 0, "y0": 135, "x1": 239, "y1": 135, "color": 12 }
    ]
}"#;

#[test]
fn test_scene_file_renders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.json");
    fs::write(&path, SCENE).unwrap();

    let scene = Scene::load(&path).unwrap();
    assert_eq!(scene.commands.len(), 6);

    let mut gfx = Gfx::new();
    scene.apply(&mut gfx).unwrap();

    // map cell (0, 0) at (8, 8): border color 1, center color 4
    assert_eq!(gfx.pixel(8, 8), 1);
    assert_eq!(gfx.pixel(11, 11), 4);
    assert_eq!(gfx.pixel(19, 11), 4);
    // scaled sprite with color 1 transparent
    assert_eq!(gfx.pixel(100, 50), 0);
    assert_eq!(gfx.pixel(102, 52), 2);
    assert_eq!(gfx.pixel(60, 80), 6);
    assert_eq!(gfx.pixel(152, 102), 9);
    assert_eq!(gfx.pixel(120, 135), 12);
}

#[test]
fn test_scene_to_png() {
    let dir = tempdir().unwrap();
    let png_path = dir.path().join("out.png");

    let mut gfx = Gfx::new();
    Scene::from_json(SCENE).unwrap().apply(&mut gfx).unwrap();
    screenshot::write_png(gfx.ram(), &png_path, 2).unwrap();

    let bytes = fs::read(&png_path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR width and height, big endian
    assert_eq!(&bytes[16..20], &480u32.to_be_bytes());
    assert_eq!(&bytes[20..24], &272u32.to_be_bytes());
}

#[test]
fn test_missing_scene_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Scene::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(GfxError::Io(_))));
}

#[test]
fn test_scene_serializes_back() {
    let scene = Scene::from_json(SCENE).unwrap();
    let text = serde_json::to_string(&scene).unwrap();
    let parsed = Scene::from_json(&text).unwrap();
    assert_eq!(parsed, scene);
    assert!(matches!(parsed.commands[0], DrawCommand::Cls { color: 0 }));
}

#[test]
fn test_config_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ticraster.toml");

    let mut config = GfxConfig::default();
    config.clear_color = 3;
    config.blit.bpp = 2;
    config.blit.page = 1;
    config.save(&path).unwrap();

    let loaded = GfxConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let mut gfx = Gfx::with_config(&loaded).unwrap();
    assert_eq!(gfx.ram().blit_segment, 5);
    gfx.reset();
    assert_eq!(gfx.pixel(0, 0), 3);
}

#[test]
fn test_config_fallback_on_bad_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "clear_color = [[[").unwrap();

    assert!(matches!(GfxConfig::load(&path), Err(GfxError::ConfigParse(_))));
    assert_eq!(GfxConfig::load_or_default(&path), GfxConfig::default());
    assert_eq!(GfxConfig::load_or_default(dir.path().join("absent.toml")), GfxConfig::default());
}

#[test]
fn test_config_with_bad_palette_is_rejected() {
    let config = GfxConfig {
        palette: "00ff".into(),
        ..GfxConfig::default()
    };
    assert!(matches!(Gfx::with_config(&config), Err(GfxError::InvalidPalette(_))));
}
