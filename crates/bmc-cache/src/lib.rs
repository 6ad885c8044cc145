/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A decoder for RDP persistent bitmap cache files
//!
//! Remote desktop clients keep the bitmaps a server sent them in on disk
//! caches so they don't have to be sent again. This crate recovers those
//! bitmaps as separate 64x64 tiles.
//!
//! # Features
//! - `Cache????.bin` containers (32 bit tiles)
//! - `bcache*.bmc` containers, uncompressed 8, 16, 24 and 32 bit tiles
//! - Interleaved RLE compressed tiles
//! - Recovery of legacy data left behind short tiles
//! - Bitmap output, per tile or as one collage
//!
//! # Example
//! ```no_run
//! use bmc_cache::{BmpEncoder, CacheDecoder};
//!
//! let data = std::fs::read("bcache24.bmc").unwrap();
//!
//! let mut decoder = CacheDecoder::new(&data);
//! decoder.set_file_name("bcache24.bmc");
//!
//! for tile in decoder.decode().unwrap() {
//!     let bmp = BmpEncoder::new(&tile.primary).encode().unwrap();
//!     // write bmp somewhere
//! }
//! ```
//!
//! # Security
//!
//! Cache files are untrusted input, the decoder is fuzz tested to ensure
//! it does not crash on malicious input.
#![macro_use]

pub use crate::bitmap::BmpEncoder;
pub use crate::collage::{CollageBuilder, DEFAULT_STRIPE_WIDTH};
pub use crate::container::{
    probe_container, CacheContainer, ContainerKind, TileHeader, TileRecord
};
pub use crate::decoder::CacheDecoder;
pub use crate::errors::{BmcErrors, ErrorSeverity, RleErrors};
pub use crate::palette::PALETTE;
pub use crate::tile::{DecodedTile, PixelLayout, TileImage};

mod bitmap;
mod collage;
pub mod container;
mod decoder;
pub mod depth;
mod errors;
mod palette;
pub mod pixels;
pub mod rle;
mod tile;
