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

//! Error types
//!
//! Drawing itself never fails; errors come from the layers around it
//! (configuration, scene files and PNG output).

use std::io;

use thiserror::Error;

/// Errors produced outside the drawing operations
#[derive(Debug, Error)]
pub enum GfxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    #[error("Invalid tile data: {0}")]
    InvalidTileData(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, GfxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_palette_display() {
        let e = GfxError::InvalidPalette("expected 96 hex digits, got 3".into());
        assert_eq!(e.to_string(), "Invalid palette: expected 96 hex digits, got 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let e: GfxError = io::Error::new(io::ErrorKind::NotFound, "scene.json").into();
        assert!(matches!(e, GfxError::Io(_)));
        assert!(e.to_string().contains("scene.json"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Value>("palette = [[[").unwrap_err();
        let e: GfxError = err.into();
        assert!(e.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: GfxError = err.into();
        assert!(matches!(e, GfxError::Scene(_)));
    }
}
