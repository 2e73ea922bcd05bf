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

//! ticraster: an indexed-color software rasterizer for a fantasy console
//!
//! This crate implements the drawing layer of a 240×136, 16-color virtual
//! console: pixels, rectangles, sprites, tile maps, text, lines, ellipses
//! and flat or textured triangles, all painted into a packed 4bpp
//! framebuffer under a clip rectangle and a per-call color mapping.
//!
//! # Architecture
//!
//! - [`core::memory`]: the memory image the renderer reads and writes
//! - [`core::gfx`]: the [`Gfx`] drawing context and the rasterizer behind it
//! - [`core::config`], [`core::scene`], [`core::screenshot`]: configuration,
//!   scene files and PNG output used by the `ticraster` binary
//!
//! # Example
//!
//! ```
//! use ticraster::core::gfx::{Flip, Rotate, Vertex};
//! use ticraster::Gfx;
//!
//! let mut gfx = Gfx::new();
//! gfx.cls(0);
//! gfx.rect(10, 10, 20, 20, 2);
//! gfx.circb(60, 60, 12, 4);
//! gfx.tri([Vertex::new(100.0, 10.0), Vertex::new(140.0, 10.0), Vertex::new(100.0, 50.0)], 6);
//! gfx.spr(0, 200, 100, 1, 1, &[0], 2, Flip::HORIZONTAL, Rotate::None);
//! let width = gfx.print("HELLO", 4, 120, 12, false, 1, false);
//!
//! assert_eq!(gfx.pixel(15, 15), 2);
//! assert!(width >= 0);
//! ```
//!
//! # Error Handling
//!
//! Drawing never fails. Loading configuration and scenes and writing PNG
//! files return [`core::error::Result<T>`], an alias for
//! `Result<T, GfxError>`.

pub mod core;

// Re-export commonly used types
pub use core::error::{GfxError, Result};
pub use core::gfx::Gfx;
