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

//! Sub-byte pixel packing
//!
//! Console memory stores pixels packed at 1, 2 or 4 bits per pixel, least
//! significant bits first. A pixel index addresses the N-th packed value
//! starting at the beginning of the slice.
//!
//! # Layout
//!
//! ```text
//! 4bpp: byte = index >> 1, shift = (index & 1) * 4, mask = 0x0F
//! 2bpp: byte = index >> 2, shift = (index & 3) * 2, mask = 0x03
//! 1bpp: byte = index >> 3, shift = (index & 7),     mask = 0x01
//! ```

/// Read a 4-bit value
#[inline(always)]
pub fn peek4(data: &[u8], index: usize) -> u8 {
    (data[index >> 1] >> ((index & 1) << 2)) & 0x0F
}

/// Write a 4-bit value (upper bits of `value` are ignored)
#[inline(always)]
pub fn poke4(data: &mut [u8], index: usize, value: u8) {
    let shift = (index & 1) << 2;
    let byte = &mut data[index >> 1];
    *byte = (*byte & !(0x0F << shift)) | ((value & 0x0F) << shift);
}

/// Read a 2-bit value
#[inline(always)]
pub fn peek2(data: &[u8], index: usize) -> u8 {
    (data[index >> 2] >> ((index & 3) << 1)) & 0x03
}

/// Write a 2-bit value (upper bits of `value` are ignored)
#[inline(always)]
pub fn poke2(data: &mut [u8], index: usize, value: u8) {
    let shift = (index & 3) << 1;
    let byte = &mut data[index >> 2];
    *byte = (*byte & !(0x03 << shift)) | ((value & 0x03) << shift);
}

/// Read a 1-bit value
#[inline(always)]
pub fn peek1(data: &[u8], index: usize) -> u8 {
    (data[index >> 3] >> (index & 7)) & 0x01
}

/// Write a 1-bit value (upper bits of `value` are ignored)
#[inline(always)]
pub fn poke1(data: &mut [u8], index: usize, value: u8) {
    let shift = index & 7;
    let byte = &mut data[index >> 3];
    *byte = (*byte & !(0x01 << shift)) | ((value & 0x01) << shift);
}
