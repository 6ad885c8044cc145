/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel depth of compressed tiles
//!
//! Compressed BMC tiles carry no depth information. Windows names the
//! caches after their depth (`bcache2.bmc`, `bcache22.bmc`, `bcache24.bmc`),
//! which is tried first. Failing that the stream is probed for the width
//! field of a following 64 pixel wide tile.

use bmc_core::log::debug;
use bmc_core::pixel_depth::PixelDepth;

use crate::container::TILE_DIMENSION;
use crate::errors::BmcErrors;

/// Offset of the width field inside a BMC tile header
const WIDTH_FIELD_OFFSET: usize = 8;

/// Depths a probe is attempted with, in order
const PROBE_ORDER: [PixelDepth; 3] = [
    PixelDepth::Indexed,
    PixelDepth::HighColor,
    PixelDepth::TrueColorPadded
];

/// Guess the depth from a cache file name
///
/// ```
/// use bmc_cache::depth::depth_from_file_name;
/// use bmc_core::pixel_depth::PixelDepth;
///
/// assert_eq!(depth_from_file_name("bcache22.bmc"), Some(PixelDepth::HighColor));
/// assert_eq!(depth_from_file_name("BCACHE24.BMC"), Some(PixelDepth::TrueColorPadded));
/// assert_eq!(depth_from_file_name("bcache2.bmc"), Some(PixelDepth::Indexed));
/// assert_eq!(depth_from_file_name("Cache0000.bin"), None);
/// ```
pub fn depth_from_file_name(file_name: &str) -> Option<PixelDepth> {
    let name = file_name.to_ascii_lowercase();

    // order matters, "22.bmc" also contains "2.bmc"
    if name.contains("22.bmc") {
        Some(PixelDepth::HighColor)
    } else if name.contains("24.bmc") {
        Some(PixelDepth::TrueColorPadded)
    } else if name.contains("2.bmc") {
        Some(PixelDepth::Indexed)
    } else {
        None
    }
}

/// Probe the tile stream for the depth of the payload starting at `payload_offset`
///
/// For every candidate depth the u16 found `64*64*depth + 8` bytes into the
/// payload must be `64` for the candidate to be accepted.
pub fn probe_depth(stream: &[u8], payload_offset: usize) -> Option<PixelDepth> {
    PROBE_ORDER.into_iter().find(|depth| {
        let position = payload_offset
            + TILE_DIMENSION * TILE_DIMENSION * depth.bytes_per_pixel()
            + WIDTH_FIELD_OFFSET;

        match stream.get(position..position + 2) {
            Some(&[lo, hi]) => usize::from(u16::from_le_bytes([lo, hi])) == TILE_DIMENSION,
            _ => false
        }
    })
}

/// Resolve the depth compressed tiles of a file are stored at
///
/// # Errors
/// [`BmcErrors::UnknownDepth`] when neither the name nor the probe settle it
pub fn resolve_compressed_depth(
    file_name: Option<&str>, stream: &[u8], payload_offset: usize
) -> Result<PixelDepth, BmcErrors> {
    if let Some(depth) = file_name.and_then(depth_from_file_name) {
        debug!("Depth {:?} taken from the file name", depth);
        return Ok(depth);
    }
    match probe_depth(stream, payload_offset) {
        Some(depth) => {
            debug!("Depth {:?} found by probing offset {}", depth, payload_offset);
            Ok(depth)
        }
        None => Err(BmcErrors::UnknownDepth)
    }
}

#[cfg(test)]
mod tests {
    use bmc_core::pixel_depth::PixelDepth;

    use super::{probe_depth, resolve_compressed_depth};
    use crate::errors::BmcErrors;

    #[test]
    fn probe_finds_next_tile_width() {
        let mut stream = vec![0_u8; 20 + 64 * 64 * 2 + 16];
        // width field of the header following a 2 bpp slot
        stream[20 + 64 * 64 * 2 + 8] = 64;

        assert_eq!(probe_depth(&stream, 20), Some(PixelDepth::HighColor));
    }

    #[test]
    fn probe_prefers_smallest_depth() {
        let mut stream = vec![0_u8; 64 * 64 * 4 + 16];
        stream[64 * 64 + 8] = 64;
        stream[64 * 64 * 4 + 8] = 64;

        assert_eq!(probe_depth(&stream, 0), Some(PixelDepth::Indexed));
    }

    #[test]
    fn name_wins_over_probe() {
        let mut stream = vec![0_u8; 64 * 64 + 16];
        stream[64 * 64 + 8] = 64;

        let depth = resolve_compressed_depth(Some("bcache24.bmc"), &stream, 0).unwrap();
        assert_eq!(depth, PixelDepth::TrueColorPadded);
    }

    #[test]
    fn unknown_depth_when_nothing_matches() {
        let stream = [0_u8; 32];

        assert!(matches!(
            resolve_compressed_depth(Some("cache.bmc"), &stream, 0),
            Err(BmcErrors::UnknownDepth)
        ));
        assert!(matches!(
            resolve_compressed_depth(None, &stream, 0),
            Err(BmcErrors::UnknownDepth)
        ));
    }
}
