/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoded tile images

use bmc_core::pixel_depth::PixelDepth;

use crate::container::TileHeader;
use crate::palette::PALETTE_SIZE;

/// How the pixels of a [`TileImage`] are laid out
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelLayout {
    /// One palette index per pixel, preceded by the 1024 byte palette
    Indexed,
    /// Four bytes per pixel, blue, green, red and alpha
    Bgra
}

impl PixelLayout {
    /// Bytes one pixel occupies after the palette prefix
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Indexed => 1,
            PixelLayout::Bgra => 4
        }
    }
    /// Bytes that precede the pixel rows
    pub const fn prefix_size(self) -> usize {
        match self {
            PixelLayout::Indexed => PALETTE_SIZE,
            PixelLayout::Bgra => 0
        }
    }
    /// Byte used to fill area not covered by a tile.
    ///
    /// Opaque white for BGRA pixels, the last palette entry (also white)
    /// for indexed pixels
    pub const fn filler(self) -> u8 {
        0xFF
    }
}

/// A bitmap ready image
///
/// Rows are stored bottom up, the way they are written to a bitmap file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TileImage {
    pub(crate) width:  usize,
    pub(crate) height: usize,
    pub(crate) layout: PixelLayout,
    pub(crate) pixels: Vec<u8>
}

impl TileImage {
    /// Create an image from normalized pixels
    ///
    /// For [`PixelLayout::Indexed`] `pixels` must start with the palette
    pub fn new(width: usize, height: usize, layout: PixelLayout, pixels: Vec<u8>) -> TileImage {
        TileImage {
            width,
            height,
            layout,
            pixels
        }
    }
    pub const fn width(&self) -> usize {
        self.width
    }
    pub const fn height(&self) -> usize {
        self.height
    }
    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }
    /// Bytes in one row of pixels, without bitmap padding
    pub const fn stride(&self) -> usize {
        self.width * self.layout.bytes_per_pixel()
    }
    /// The full buffer, palette included for indexed images
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    /// Pixel rows without the palette prefix
    pub fn data(&self) -> &[u8] {
        self.pixels.get(self.layout.prefix_size()..).unwrap_or(&[])
    }
    /// The palette of an indexed image
    pub fn palette(&self) -> Option<&[u8]> {
        match self.layout {
            PixelLayout::Indexed => self.pixels.get(..PALETTE_SIZE),
            PixelLayout::Bgra => None
        }
    }
    /// Return true if the image holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// One tile recovered from a cache container
#[derive(Clone, Debug)]
pub struct DecodedTile {
    pub header:    TileHeader,
    /// Storage depth of the tile in the container
    pub depth:     PixelDepth,
    /// The tile itself
    pub primary:   TileImage,
    /// Legacy image data found after a short uncompressed tile in its slot.
    ///
    /// Only recovered when [`DecoderOptions::keep_secondary`] is set, `None`
    /// otherwise even for short tiles.
    ///
    /// [`DecoderOptions::keep_secondary`]: bmc_core::options::DecoderOptions::keep_secondary
    pub secondary: Option<TileImage>
}

impl DecodedTile {
    pub const fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }
    pub const fn is_compressed(&self) -> bool {
        self.header.is_compressed()
    }
}
