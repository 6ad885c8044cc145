/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion of raw tile samples into bitmap ready pixels

use bmc_core::pixel_depth::PixelDepth;

use crate::container::ContainerKind;
use crate::palette::PALETTE;
use crate::tile::{PixelLayout, TileImage};

/// BIN pixels are flipped in blocks of this many bytes, one 64 pixel scanline
pub const BIN_CHUNK_SIZE: usize = 256;

/// Expand RGB 565 samples to BGRA
///
/// Channels are widened by replicating their high bits into the
/// freed low bits, alpha is always opaque.
///
/// ```
/// use bmc_cache::pixels::rgb565_to_bgra;
/// // pure red, pure green, pure blue
/// let raw = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00];
/// assert_eq!(
///     rgb565_to_bgra(&raw),
///     [0, 0, 0xFF, 0xFF, 0, 0xFF, 0, 0xFF, 0xFF, 0, 0, 0xFF]
/// );
/// ```
pub fn rgb565_to_bgra(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() * 2);

    for sample in raw.chunks_exact(2) {
        let pixel = u16::from_le_bytes([sample[0], sample[1]]);

        let blue = ((pixel << 3) & 0xF8) | ((pixel >> 2) & 0x07);
        let green = ((pixel >> 3) & 0xFC) | ((pixel >> 9) & 0x03);
        let red = ((pixel >> 8) & 0xF8) | ((pixel >> 13) & 0x07);

        out.extend_from_slice(&[blue as u8, green as u8, red as u8, 0xFF]);
    }
    out
}

/// Convert BGR (`bytes_per_pixel == 3`) or BGRX (`bytes_per_pixel == 4`)
/// samples to BGRA with opaque alpha
pub fn bgr_to_bgra(raw: &[u8], bytes_per_pixel: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() / bytes_per_pixel.max(1) * 4);

    for sample in raw.chunks_exact(bytes_per_pixel.max(3)) {
        out.extend_from_slice(&sample[..3]);
        out.push(0xFF);
    }
    out
}

/// Reverse the order of `chunk` sized blocks, a trailing partial block
/// is dropped
pub fn reverse_chunks(pixels: &[u8], chunk: usize) -> Vec<u8> {
    if chunk == 0 {
        return Vec::new();
    }
    pixels
        .chunks_exact(chunk)
        .rev()
        .flatten()
        .copied()
        .collect()
}

/// Prefix palette indexes with the palette
pub fn with_palette(indexes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(PALETTE.len() + indexes.len());
    out.extend_from_slice(&PALETTE);
    out.extend_from_slice(indexes);
    out
}

/// Turn `width * height` raw samples stored at `depth` into a bitmap ready image
///
/// Tiles from BIN containers are stored top down and get their
/// [`BIN_CHUNK_SIZE`] byte blocks flipped whatever their width.
pub fn normalize(
    raw: &[u8], depth: PixelDepth, width: usize, height: usize, kind: ContainerKind
) -> TileImage {
    let (layout, pixels) = match depth {
        PixelDepth::Indexed => (PixelLayout::Indexed, with_palette(raw)),
        PixelDepth::HighColor => (PixelLayout::Bgra, rgb565_to_bgra(raw)),
        PixelDepth::TrueColor => (PixelLayout::Bgra, bgr_to_bgra(raw, 3)),
        PixelDepth::TrueColorPadded => {
            let pixels = bgr_to_bgra(raw, 4);

            match kind {
                ContainerKind::Bin => (PixelLayout::Bgra, reverse_chunks(&pixels, BIN_CHUNK_SIZE)),
                ContainerKind::Bmc => (PixelLayout::Bgra, pixels)
            }
        }
    };
    TileImage::new(width, height, layout, pixels)
}
