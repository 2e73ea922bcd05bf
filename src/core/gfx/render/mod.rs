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

//! Software rasterization
//!
//! Every primitive is drawn by [`Rasterizer`] into a borrowed 4bpp
//! framebuffer. Source data (tile sheets, the map, palette mappings) is
//! passed per call so the caller decides which memory each draw reads.
//!
//! - `rasterizer`: clip, depth and span state plus pixel/span/rect fills
//! - `sprite`: tiles and multi-tile sprites with flip, rotate and scale
//! - `map`: tile map blits with an optional per-cell remap callback
//! - `text`: proportional and fixed-width glyph strings
//! - `line`: lines and ellipses
//! - `triangle`: edge-function triangles, flat or textured with depth
//! - `legacy`: edge-walking textured triangles for older content

mod legacy;
mod line;
mod map;
mod rasterizer;
mod sprite;
mod text;
mod triangle;

pub use legacy::LegacySource;
pub use map::RemapFn;
pub use rasterizer::Rasterizer;
pub use text::TextLayout;
pub use triangle::{
    Fragment, Sampler, Shader, ShaderContext, AREA_EPSILON, DEPTH_EPSILON, EDGE_BIAS,
};
