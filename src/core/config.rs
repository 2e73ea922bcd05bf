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

//! Renderer configuration
//!
//! Stored as TOML. Every field has a default, so a partial file only
//! overrides what it names:
//!
//! ```toml
//! palette = "1a1c2c5d275d..."   # 16 RGB colors, 96 hex digits
//! clear_color = 0
//! screenshot_scale = 2
//!
//! [blit]
//! bpp = 4
//! bank = 0
//! page = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GfxError, Result};
use crate::core::gfx::{BlitMode, Bpp};
use crate::core::memory::{DEFAULT_PALETTE, PALETTE_SIZE};

/// Tile sampling mode at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlitConfig {
    /// Bits per pixel: 1, 2 or 4
    pub bpp: u8,
    pub bank: u8,
    pub page: u8,
}

impl Default for BlitConfig {
    fn default() -> Self {
        Self {
            bpp: 4,
            bank: 0,
            page: 0,
        }
    }
}

/// Renderer configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GfxConfig {
    /// RGB palette as 96 hex digits
    pub palette: String,
    pub blit: BlitConfig,
    /// Color used when a frame is reset
    pub clear_color: u8,
    /// Integer upscaling applied to PNG output
    pub screenshot_scale: u32,
}

impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|b| format!("{:02x}", b)).collect(),
            blit: BlitConfig::default(),
            clear_color: 0,
            screenshot_scale: 1,
        }
    }
}

impl GfxConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            log::info!(
                "Using default gfx config ({} failed to load: {})",
                path.as_ref().display(),
                e
            );
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Decode the palette string into 16 RGB triples
    pub fn parse_palette(&self) -> Result<[u8; PALETTE_SIZE * 3]> {
        let hex = self.palette.trim().trim_start_matches('#');
        if hex.len() != PALETTE_SIZE * 6 || !hex.is_ascii() {
            return Err(GfxError::InvalidPalette(format!(
                "expected {} hex digits, got {:?}",
                PALETTE_SIZE * 6,
                hex
            )));
        }

        let mut palette = [0u8; PALETTE_SIZE * 3];
        for (i, byte) in palette.iter_mut().enumerate() {
            let digits = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(digits, 16)
                .map_err(|_| GfxError::InvalidPalette(format!("bad hex digits {:?} at {}", digits, i * 2)))?;
        }
        Ok(palette)
    }

    /// Blit mode described by the `[blit]` table
    ///
    /// An unsupported bit depth falls back to 4bpp.
    pub fn blit_mode(&self) -> BlitMode {
        let bpp = Bpp::try_from(self.blit.bpp).unwrap_or_else(|bpp| {
            log::warn!("Unsupported blit bpp {}, using 4", bpp);
            Bpp::Four
        });
        BlitMode::new(bpp, self.blit.bank, self.blit.page)
    }
}
