/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Framing of cache containers into tile records
//!
//! Two layouts exist
//!
//! - `Cache????.bin` files written by newer clients start with an 8 byte magic
//!   (`RDP8bmp\0`) followed by a u32 version. Every tile is a 12 byte header
//!   (`cache id`, `cache index`, `width`, `height`) followed by `4*w*h` bytes of
//!   32 bit pixels.
//! - `bcache*.bmc` files have no file header. Every tile is a 20 byte header which
//!   adds the payload length and a parameter word to the fields above. Bit `0x08`
//!   of the parameters marks an RLE compressed payload. Uncompressed tiles occupy
//!   a full 64x64 slot at their depth, even when the tile itself is smaller.
//!
//! All integers are little endian.

use bmc_core::bytestream::ByteCursor;
use bmc_core::log::trace;
use bmc_core::pixel_depth::PixelDepth;

use crate::errors::BmcErrors;

/// Magic bytes at the start of `.bin` containers
pub const BIN_FILE_HEADER: &[u8; 8] = b"RDP8bmp\0";
/// Edge length of the slot every cache tile lives in
pub const TILE_DIMENSION: usize = 64;
/// Parameter bit marking an RLE compressed BMC tile
pub const COMPRESSED_FLAG: u32 = 0x08;

/// The kind of cache container
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContainerKind {
    /// `RDP8bmp` wrapped container, 32 bit tiles only
    Bin,
    /// Headerless container with per tile length and flags
    Bmc
}

impl ContainerKind {
    /// Size of one tile header in bytes
    pub const fn header_size(self) -> usize {
        match self {
            ContainerKind::Bin => 0xC,
            ContainerKind::Bmc => 0x14
        }
    }
    /// Name used in log messages
    pub const fn name(self) -> &'static str {
        match self {
            ContainerKind::Bin => ".BIN",
            ContainerKind::Bmc => ".BMC"
        }
    }
}

/// Probe some bytes to see which container they belong to
///
/// Returns `None` for an empty buffer, any non empty buffer
/// without the BIN magic is treated as a BMC container.
pub fn probe_container(bytes: &[u8]) -> Option<ContainerKind> {
    if bytes.is_empty() {
        return None;
    }
    if bytes.starts_with(BIN_FILE_HEADER) {
        Some(ContainerKind::Bin)
    } else {
        Some(ContainerKind::Bmc)
    }
}

/// Fixed fields preceding every tile payload
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TileHeader {
    pub cache_id:       u32,
    pub cache_index:    u32,
    pub width:          u16,
    pub height:         u16,
    /// Declared payload length, BMC only.
    ///
    /// For BIN containers this holds the implied `4*w*h`
    pub payload_length: u32,
    /// Tile parameters, BMC only, zero for BIN containers
    pub params:         u32
}

impl TileHeader {
    /// Return true if the payload is RLE compressed
    pub const fn is_compressed(&self) -> bool {
        self.params & COMPRESSED_FLAG != 0
    }
    /// Number of pixels the header declares
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
    /// Bytes per pixel implied by an uncompressed BMC payload,
    /// `None` for empty tiles
    pub const fn implied_bytes_per_pixel(&self) -> Option<usize> {
        match self.pixel_count() {
            0 => None,
            count => Some(self.payload_length as usize / count)
        }
    }
}

/// One framed tile, a header plus its payload borrowed from the container
#[derive(Copy, Clone, Debug)]
pub struct TileRecord<'a> {
    pub header:         TileHeader,
    pub payload:        &'a [u8],
    /// Offset of the payload from the start of the tile stream
    pub payload_offset: usize
}

/// A cache container loaded in memory
///
/// Iterating the container yields its tile records in file order.
/// The iterator is finished after the stream is exhausted or after the
/// first framing error.
///
/// # Example
/// ```
/// use bmc_cache::{CacheContainer, ContainerKind};
///
/// let mut file = b"RDP8bmp\0".to_vec();
/// file.extend_from_slice(&6_u32.to_le_bytes());
/// // one 1x1 tile
/// file.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0, 1, 0, 1, 0]);
/// file.extend_from_slice(&[0x10, 0x20, 0x30, 0x00]);
///
/// let mut container = CacheContainer::new(&file).unwrap();
/// assert_eq!(container.kind(), ContainerKind::Bin);
/// assert_eq!(container.version(), Some(6));
///
/// let tile = container.next().unwrap().unwrap();
/// assert_eq!(tile.header.cache_index, 2);
/// assert_eq!(tile.payload, &[0x10, 0x20, 0x30, 0x00]);
/// assert!(container.next().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct CacheContainer<'a> {
    cursor:   ByteCursor<'a>,
    kind:     ContainerKind,
    version:  Option<u32>,
    finished: bool
}

impl<'a> CacheContainer<'a> {
    /// Detect the container kind and position the cursor on the first tile
    ///
    /// # Errors
    /// - [`BmcErrors::EmptySource`] when `bytes` is empty
    /// - [`BmcErrors::Truncated`] when the BIN magic is not followed by a version
    pub fn new(bytes: &'a [u8]) -> Result<CacheContainer<'a>, BmcErrors> {
        let kind = probe_container(bytes).ok_or(BmcErrors::EmptySource)?;

        let mut cursor = ByteCursor::new(bytes);
        let mut version = None;

        if kind == ContainerKind::Bin {
            cursor.skip(BIN_FILE_HEADER.len())?;
            version = Some(cursor.get_u32_le_err()?);
        }
        // tile offsets are relative to the first tile
        let cursor = ByteCursor::new(cursor.remaining_bytes());

        Ok(CacheContainer {
            cursor,
            kind,
            version,
            finished: false
        })
    }
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }
    /// Version stored after the BIN magic, `None` for BMC containers
    pub const fn version(&self) -> Option<u32> {
        self.version
    }
    /// Offset of the next tile from the start of the tile stream
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }
    /// Bytes not yet framed
    pub const fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
    /// The whole tile stream, without the BIN file header
    pub const fn stream(&self) -> &'a [u8] {
        self.cursor.stream()
    }

    fn read_header(&mut self) -> Result<TileHeader, BmcErrors> {
        let mut fields = ByteCursor::new(self.cursor.read_slice(self.kind.header_size())?);

        let cache_id = fields.get_u32_le_err()?;
        let cache_index = fields.get_u32_le_err()?;
        let width = fields.get_u16_le_err()?;
        let height = fields.get_u16_le_err()?;

        let (payload_length, params) = match self.kind {
            ContainerKind::Bin => {
                let implied = 4 * u64::from(width) * u64::from(height);
                (u32::try_from(implied).unwrap_or(u32::MAX), 0)
            }
            ContainerKind::Bmc => (fields.get_u32_le_err()?, fields.get_u32_le_err()?)
        };

        Ok(TileHeader {
            cache_id,
            cache_index,
            width,
            height,
            payload_length,
            params
        })
    }

    /// Number of stream bytes the payload of `header` occupies
    pub fn payload_size(&self, header: &TileHeader) -> usize {
        let declared = header.payload_length as usize;

        match self.kind {
            ContainerKind::Bin => 4 * header.pixel_count(),
            ContainerKind::Bmc if header.is_compressed() => declared,
            ContainerKind::Bmc => {
                // uncompressed tiles fill a whole 64x64 slot at their depth,
                // the leftover after short tiles is legacy data
                match header
                    .implied_bytes_per_pixel()
                    .and_then(PixelDepth::from_bytes_per_pixel)
                {
                    Some(depth) => {
                        let slot = TILE_DIMENSION * TILE_DIMENSION * depth.bytes_per_pixel();
                        declared.max(slot)
                    }
                    None => declared
                }
            }
        }
    }

    fn next_record(&mut self) -> Result<TileRecord<'a>, BmcErrors> {
        let start = self.cursor.position();
        let header = match self.read_header() {
            Ok(header) => header,
            Err(e) => {
                // keep the position at the start of the broken record
                self.cursor.set_position(start)?;
                return Err(e);
            }
        };
        let size = self.payload_size(&header);
        let payload_offset = self.cursor.position();

        let payload = match self.cursor.read_slice(size) {
            Ok(payload) => payload,
            Err(e) => {
                self.cursor.set_position(start)?;
                return Err(e.into());
            }
        };
        trace!(
            "Framed tile {}:{} ({}x{}) with {} payload bytes at {}",
            header.cache_id,
            header.cache_index,
            header.width,
            header.height,
            size,
            payload_offset
        );

        Ok(TileRecord {
            header,
            payload,
            payload_offset
        })
    }
}

impl<'a> Iterator for CacheContainer<'a> {
    type Item = Result<TileRecord<'a>, BmcErrors>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.cursor.eof() {
            return None;
        }
        let record = self.next_record();

        if record.is_err() {
            self.finished = true;
        }
        Some(record)
    }
}
