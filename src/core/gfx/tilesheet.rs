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

//! Tile-sheet addressing
//!
//! Tile memory can be viewed at 4, 2 or 1 bits per pixel. Lower bit depths
//! expose more pages: the same 32-byte tile slot holds one 8×8 tile at
//! 4bpp, two interleaved 8×8 tiles at 2bpp and four at 1bpp. A *segment*
//! selects one (bit depth, bank, page) view of the memory.
//!
//! # Segments
//!
//! | Id    | View                 | Data  |
//! |-------|----------------------|-------|
//! | 0     | system graphics 1bpp | font  |
//! | 1     | system font 1bpp     | font  |
//! | 2-3   | 4bpp bg/fg           | tiles |
//! | 4-7   | 2bpp p0/p1 bg/fg     | tiles |
//! | 8-15  | 1bpp p0..p3 bg/fg    | tiles |
//!
//! # Addressing
//!
//! *Local* addressing takes the index modulo 256 on a 16×16 grid at the
//! segment's own bank and page. *Global* addressing spreads a sprite index
//! across banks and pages:
//!
//! ```text
//! bank = (index / bank_size + bank_orig) % 2
//! row  = (index % bank_size) / sheet_width % 16
//! page = ((index % bank_size) % sheet_width / 16 + page_orig) % nb_pages
//! col  = (index % bank_size) % sheet_width % 16
//! ```

use crate::core::memory::packing::{peek1, peek2, peek4, poke1, poke2, poke4};
use crate::core::memory::BANK_SPRITES;

const COLS: usize = 16;
const SIZE: usize = 8;

/// Sub-byte pixel packing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelPacking {
    Bpp1,
    Bpp2,
    Bpp4,
}

impl PixelPacking {
    #[inline(always)]
    pub fn peek(self, data: &[u8], index: usize) -> u8 {
        match self {
            PixelPacking::Bpp1 => peek1(data, index),
            PixelPacking::Bpp2 => peek2(data, index),
            PixelPacking::Bpp4 => peek4(data, index),
        }
    }

    #[inline(always)]
    pub fn poke(self, data: &mut [u8], index: usize, value: u8) {
        match self {
            PixelPacking::Bpp1 => poke1(data, index, value),
            PixelPacking::Bpp2 => poke2(data, index, value),
            PixelPacking::Bpp4 => poke4(data, index, value),
        }
    }
}

/// Tile-sheet segment descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub page_orig: u32,
    pub bank_orig: u32,
    pub nb_pages: u32,
    pub bank_size: u32,
    /// Sheet width in tiles (across all pages)
    pub sheet_width: u32,
    /// Width in pixels of one packed tile slot
    pub tile_width: u32,
    /// Bytes per tile slot
    pub ptr_size: usize,
    pub packing: PixelPacking,
}

const fn segment(
    page_orig: u32,
    bank_orig: u32,
    nb_pages: u32,
    bank_size: u32,
    sheet_width: u32,
    tile_width: u32,
    ptr_size: usize,
    packing: PixelPacking,
) -> Segment {
    Segment {
        page_orig,
        bank_orig,
        nb_pages,
        bank_size,
        sheet_width,
        tile_width,
        ptr_size,
        packing,
    }
}

use PixelPacking::{Bpp1, Bpp2, Bpp4};

/// Segment table, indexed by segment id
#[rustfmt::skip]
pub static SEGMENTS: [Segment; 16] = [
    segment(0, 0, 1, 256,  16, 8,  8,  Bpp1), // system gfx
    segment(0, 0, 1, 256,  16, 8,  8,  Bpp1), // system font
    segment(0, 0, 1, 256,  16, 8,  32, Bpp4), // 4bpp p0 bg
    segment(0, 1, 1, 256,  16, 8,  32, Bpp4), // 4bpp p0 fg

    segment(0, 0, 2, 512,  32, 16, 32, Bpp2), // 2bpp p0 bg
    segment(1, 0, 2, 512,  32, 16, 32, Bpp2), // 2bpp p1 bg
    segment(0, 1, 2, 512,  32, 16, 32, Bpp2), // 2bpp p0 fg
    segment(1, 1, 2, 512,  32, 16, 32, Bpp2), // 2bpp p1 fg

    segment(0, 0, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p0 bg
    segment(1, 0, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p1 bg
    segment(2, 0, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p2 bg
    segment(3, 0, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p3 bg
    segment(0, 1, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p0 fg
    segment(1, 1, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p1 fg
    segment(2, 1, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p2 fg
    segment(3, 1, 4, 1024, 64, 32, 32, Bpp1), // 1bpp p3 fg
];

impl Segment {
    /// Look up a segment descriptor (id masked to 0-15)
    pub fn get(id: u8) -> &'static Segment {
        &SEGMENTS[(id & 0x0F) as usize]
    }

    /// Segments 0 and 1 address font memory, all others tile memory
    pub fn reads_font(id: u8) -> bool {
        (id & 0x0F) < 2
    }

    /// Whole-sheet width in pixels
    pub fn sheet_pixel_width(&self) -> u32 {
        COLS as u32 * self.tile_width
    }

    /// Resolve a tile index to `(byte offset, pixel offset)` in the data
    fn locate(&self, index: i32, local: bool) -> (usize, u32) {
        let (bank, page, iy, ix) = if local {
            let index = (index & 255) as u32;
            (self.bank_orig, self.page_orig, index / COLS as u32, index % COLS as u32)
        } else {
            let index = index.max(0) as u32;
            let bank_index = index % self.bank_size;
            let xi = bank_index % self.sheet_width;
            (
                (index / self.bank_size + self.bank_orig) % 2,
                (xi / COLS as u32 + self.page_orig) % self.nb_pages,
                (bank_index / self.sheet_width) % COLS as u32,
                xi % COLS as u32,
            )
        };

        let xbuffer = ix / self.nb_pages;
        let xoffset = ix % self.nb_pages;
        let ptr_offset =
            (bank * COLS as u32 + iy) * COLS as u32 + page * COLS as u32 / self.nb_pages + xbuffer;

        (self.ptr_size * ptr_offset as usize, xoffset * SIZE as u32)
    }

    /// Resolve whole-sheet pixel coordinates to `(byte offset, pixel index)`
    fn locate_pixel(&self, x: u32, y: u32) -> (usize, usize) {
        let x = x & (self.sheet_pixel_width() - 1);
        let y = y & 255;
        let tile_index = ((y >> 3) << 4) + x / self.tile_width;
        let pix_addr = (x & (self.tile_width - 1)) + (y & 7) * self.tile_width;
        (tile_index as usize * self.ptr_size, pix_addr as usize)
    }
}

/// Borrowed read-only view of tile memory through one segment
#[derive(Clone, Copy)]
pub struct TileSheet<'a> {
    segment: &'static Segment,
    data: &'a [u8],
}

impl<'a> TileSheet<'a> {
    pub fn new(segment: u8, data: &'a [u8]) -> Self {
        Self {
            segment: Segment::get(segment),
            data,
        }
    }

    /// View with the data region the segment id reads from
    pub fn for_segment(segment: u8, tiles: &'a [u8], font: &'a [u8]) -> Self {
        Self::new(segment, if Segment::reads_font(segment) { font } else { tiles })
    }

    pub fn segment(&self) -> &'static Segment {
        self.segment
    }

    /// Width of the whole sheet in pixels
    pub fn width(&self) -> u32 {
        self.segment.sheet_pixel_width()
    }

    /// Height of the whole sheet in pixels
    pub fn height(&self) -> u32 {
        256
    }

    /// Get a pointer to one tile
    pub fn tile(&self, index: i32, local: bool) -> TilePtr<'a> {
        let (byte, offset) = self.segment.locate(index, local);
        let byte = byte % self.data.len();
        TilePtr {
            segment: self.segment,
            data: &self.data[byte..byte + self.segment.ptr_size],
            offset,
        }
    }

    /// Read a pixel addressing the sheet as one image (wrapped)
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        let (byte, addr) = self.segment.locate_pixel(x, y);
        let byte = byte % self.data.len();
        self.segment.packing.peek(&self.data[byte..], addr)
    }
}

/// Borrowed writable view of tile memory through one segment
pub struct TileSheetMut<'a> {
    segment: &'static Segment,
    data: &'a mut [u8],
}

impl<'a> TileSheetMut<'a> {
    pub fn new(segment: u8, data: &'a mut [u8]) -> Self {
        Self {
            segment: Segment::get(segment),
            data,
        }
    }

    /// Get a writable pointer to one tile
    pub fn tile_mut(&mut self, index: i32, local: bool) -> TilePtrMut<'_> {
        let (byte, offset) = self.segment.locate(index, local);
        let byte = byte % self.data.len();
        let size = self.segment.ptr_size;
        TilePtrMut {
            segment: self.segment,
            data: &mut self.data[byte..byte + size],
            offset,
        }
    }

    /// Write a pixel addressing the sheet as one image (wrapped)
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) {
        let (byte, addr) = self.segment.locate_pixel(x, y);
        let byte = byte % self.data.len();
        self.segment.packing.poke(&mut self.data[byte..], addr, value);
    }
}

/// Pointer to one tile inside a sheet
///
/// Pixel coordinates are masked to the 8×8 tile.
#[derive(Clone, Copy)]
pub struct TilePtr<'a> {
    segment: &'static Segment,
    data: &'a [u8],
    offset: u32,
}

impl TilePtr<'_> {
    #[inline(always)]
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        let addr = self.offset + (x & 7) as u32 + (y & 7) as u32 * self.segment.tile_width;
        self.segment.packing.peek(self.data, addr as usize)
    }
}

/// Writable pointer to one tile inside a sheet
pub struct TilePtrMut<'a> {
    segment: &'static Segment,
    data: &'a mut [u8],
    offset: u32,
}

impl TilePtrMut<'_> {
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) {
        let addr = self.offset + (x & 7) as u32 + (y & 7) as u32 * self.segment.tile_width;
        self.segment.packing.poke(self.data, addr as usize, value);
    }
}

/// Bit depth used for tile sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bpp {
    One = 1,
    Two = 2,
    Four = 4,
}

impl TryFrom<u8> for Bpp {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Bpp::One),
            2 => Ok(Bpp::Two),
            4 => Ok(Bpp::Four),
            other => Err(other),
        }
    }
}

/// Blit mode: the (bit depth, bank, page) triple behind a segment id
///
/// # Examples
///
/// ```
/// use ticraster::core::gfx::{BlitMode, Bpp};
///
/// let mut mode = BlitMode::new(Bpp::One, 1, 3);
/// assert_eq!(mode.segment(), 15);
///
/// mode.set_bpp(Bpp::Two);
/// assert_eq!(mode.page(), 1);
/// assert_eq!(mode.segment(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitMode {
    bpp: Bpp,
    bank: u8,
    page: u8,
}

impl BlitMode {
    pub fn new(bpp: Bpp, bank: u8, page: u8) -> Self {
        let pages = 4 / bpp as u8;
        Self {
            bpp,
            bank: bank & 1,
            page: page % pages,
        }
    }

    /// Decode a tile segment id (2-15); system segments have no blit mode
    pub fn from_segment(segment: u8) -> Option<Self> {
        match segment {
            2..=3 => Some(Self::new(Bpp::Four, segment - 2, 0)),
            4..=7 => Some(Self::new(Bpp::Two, (segment - 4) / 2, (segment - 4) % 2)),
            8..=15 => Some(Self::new(Bpp::One, (segment - 8) / 4, (segment - 8) % 4)),
            _ => None,
        }
    }

    pub fn bpp(&self) -> Bpp {
        self.bpp
    }

    pub fn bank(&self) -> u8 {
        self.bank
    }

    pub fn page(&self) -> u8 {
        self.page
    }

    /// Pages available at the current bit depth
    pub fn pages(&self) -> u8 {
        4 / self.bpp as u8
    }

    pub fn segment(&self) -> u8 {
        self.pages() * (2 + self.bank) + self.page
    }

    /// Change the bit depth, wrapping the page into the new page count
    pub fn set_bpp(&mut self, bpp: Bpp) {
        self.bpp = bpp;
        self.page %= self.pages();
    }

    /// Sprite index of the first tile of the current bank and page
    pub fn sprite_index_offset(&self) -> i32 {
        self.bank as i32 * self.pages() as i32 * BANK_SPRITES as i32 + self.page as i32 * COLS as i32
    }
}

impl Default for BlitMode {
    fn default() -> Self {
        Self::new(Bpp::Four, 0, 0)
    }
}
