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

//! Core rendering components
//!
//! - [`memory`]: console memory image and sub-byte packing
//! - [`gfx`]: drawing context, tile sheets and the software rasterizer
//! - [`config`]: TOML renderer configuration
//! - [`scene`]: JSON scene files driving the drawing context
//! - [`screenshot`]: PNG output of the framebuffer
//! - [`error`]: error types for the fallible layers

pub mod config;
pub mod error;
pub mod gfx;
pub mod memory;
pub mod scene;
pub mod screenshot;
