/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Recovery of tiles from a whole cache container

use bmc_core::log::{debug, info, trace, warn};
use bmc_core::options::DecoderOptions;
use bmc_core::pixel_depth::PixelDepth;

use crate::container::{CacheContainer, ContainerKind, TileRecord, TILE_DIMENSION};
use crate::depth::resolve_compressed_depth;
use crate::errors::{BmcErrors, ErrorSeverity};
use crate::pixels::normalize;
use crate::rle;
use crate::tile::{DecodedTile, PixelLayout, TileImage};

/// Progress is reported every this many tiles
const PROGRESS_INTERVAL: usize = 100;

/// A cache container decoder
///
/// Tiles are decoded in file order. A tile whose stream is corrupt is
/// skipped with a warning, an error in the container layout stops the
/// decoder but keeps the tiles recovered so far.
///
/// # Example
/// ```
/// use bmc_cache::CacheDecoder;
///
/// // one uncompressed 1x1 tile at 8 bits per pixel, padded to a 64x64 slot
/// let mut file = vec![];
/// file.extend_from_slice(&[0; 8]); // cache id and index
/// file.extend_from_slice(&[1, 0, 1, 0]); // width and height
/// file.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]); // length and flags
/// file.resize(file.len() + 64 * 64, 0x2A);
///
/// let mut decoder = CacheDecoder::new(&file);
/// let tiles = decoder.decode().unwrap();
///
/// assert_eq!(tiles.len(), 1);
/// assert_eq!(tiles[0].primary.data(), &[0x2A]);
/// ```
pub struct CacheDecoder<'a> {
    data:             &'a [u8],
    options:          DecoderOptions,
    file_name:        Option<String>,
    kind:             Option<ContainerKind>,
    version:          Option<u32>,
    compressed_depth: Option<PixelDepth>,
    tiles:            Vec<DecodedTile>,
    skipped:          usize,
    decoded_headers:  bool,
    decoded:          bool
}

impl<'a> CacheDecoder<'a> {
    /// Create a decoder for the container in `data`
    pub fn new(data: &'a [u8]) -> CacheDecoder<'a> {
        CacheDecoder::new_with_options(data, DecoderOptions::default())
    }
    /// Create a decoder with specific options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> CacheDecoder<'a> {
        CacheDecoder {
            data,
            options,
            file_name: None,
            kind: None,
            version: None,
            compressed_depth: None,
            tiles: Vec::new(),
            skipped: 0,
            decoded_headers: false,
            decoded: false
        }
    }
    /// Set the name of the file the container was read from.
    ///
    /// The name is the first hint used to find the depth of compressed tiles
    pub fn set_file_name(&mut self, name: &str) -> &mut Self {
        self.file_name = Some(name.to_string());
        self
    }
    /// Identify the container and read its file header
    ///
    /// # Errors
    /// See [`CacheContainer::new`]
    pub fn decode_headers(&mut self) -> Result<(), BmcErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let container = CacheContainer::new(self.data)?;

        self.kind = Some(container.kind());
        self.version = container.version();

        if let Some(version) = self.version {
            info!("Subsequent header version: {}", version);
        }
        info!("Loaded a {} container", container.kind().name());

        self.decoded_headers = true;
        Ok(())
    }
    /// Container kind, `None` before headers are decoded
    pub const fn kind(&self) -> Option<ContainerKind> {
        self.kind
    }
    /// BIN container version, `None` before headers are decoded
    /// and for BMC containers
    pub const fn version(&self) -> Option<u32> {
        self.version
    }
    /// Depth compressed tiles were resolved to, if any were found
    pub const fn compressed_depth(&self) -> Option<PixelDepth> {
        self.compressed_depth
    }
    /// Tiles recovered so far
    pub fn tiles(&self) -> &[DecodedTile] {
        &self.tiles
    }
    pub fn into_tiles(self) -> Vec<DecodedTile> {
        self.tiles
    }
    /// Number of tiles dropped because their stream was corrupt
    pub const fn skipped_tiles(&self) -> usize {
        self.skipped
    }

    /// Decode every tile in the container
    ///
    /// Calling this again returns the tiles of the first call.
    ///
    /// # Errors
    /// Errors of [`ErrorSeverity::Source`] or [`ErrorSeverity::Format`] stop
    /// decoding. Tiles recovered up to that point remain available
    /// through [`tiles`](Self::tiles) and [`into_tiles`](Self::into_tiles).
    pub fn decode(&mut self) -> Result<&[DecodedTile], BmcErrors> {
        if self.decoded {
            return Ok(&self.tiles);
        }
        self.decode_headers()?;
        self.decoded = true;

        let container = CacheContainer::new(self.data)?;
        let kind = container.kind();
        let stream = container.stream();

        for record in container {
            let record = match record {
                Ok(record) => record,
                Err(err) if self.options.strict_mode() => return Err(err),
                Err(err) => {
                    warn!("Stopping after {} tiles: {:?}", self.tiles.len(), err);
                    break;
                }
            };

            match self.decode_tile(kind, stream, &record) {
                Ok(Some(tile)) => {
                    self.tiles.push(tile);

                    if self.tiles.len() % PROGRESS_INTERVAL == 0 {
                        debug!("{} tiles successfully extracted so far", self.tiles.len());
                    }
                }
                Ok(None) => {
                    trace!(
                        "Tile {}:{} is empty",
                        record.header.cache_id,
                        record.header.cache_index
                    );
                }
                Err(err) if err.severity() == ErrorSeverity::Stream => {
                    warn!(
                        "Skipping tile {}:{} at offset {}: {:?}",
                        record.header.cache_id,
                        record.header.cache_index,
                        record.payload_offset,
                        err
                    );
                    self.skipped += 1;
                }
                Err(err) => return Err(err)
            }
            if self.options.tile_limit_reached(self.tiles.len()) {
                debug!("Tile limit of {} reached", self.options.max_tiles());
                break;
            }
        }
        info!("{} tiles successfully extracted in the end", self.tiles.len());

        Ok(&self.tiles)
    }

    fn decode_tile(
        &mut self, kind: ContainerKind, stream: &[u8], record: &TileRecord
    ) -> Result<Option<DecodedTile>, BmcErrors> {
        let header = record.header;
        let (width, height) = (usize::from(header.width), usize::from(header.height));

        let (depth, primary, secondary) = match kind {
            ContainerKind::Bin => {
                if header.pixel_count() == 0 {
                    return Ok(None);
                }
                let depth = PixelDepth::TrueColorPadded;
                let image = normalize(record.payload, depth, width, height, kind);

                // flipping drops a trailing partial chunk
                let expected = header.pixel_count() * PixelLayout::Bgra.bytes_per_pixel();
                if !image.is_empty() && image.data().len() != expected {
                    return Err(BmcErrors::LengthMismatch(expected, image.data().len()));
                }
                (depth, image, None)
            }
            ContainerKind::Bmc if header.is_compressed() => {
                let depth = self.resolve_depth(stream, record.payload_offset)?;
                let expected = TILE_DIMENSION * TILE_DIMENSION * depth.bytes_per_pixel();

                let raw = rle::decompress(
                    record.payload,
                    depth.bytes_per_pixel(),
                    TILE_DIMENSION,
                    TILE_DIMENSION
                )?;
                if raw.len() != expected {
                    return Err(BmcErrors::LengthMismatch(expected, raw.len()));
                }
                let image = normalize(&raw, depth, TILE_DIMENSION, TILE_DIMENSION, kind);

                (depth, image, None)
            }
            ContainerKind::Bmc => {
                let bytes_per_pixel = match header.implied_bytes_per_pixel() {
                    Some(bytes) => bytes,
                    None => return Ok(None)
                };
                let depth = PixelDepth::from_bytes_per_pixel(bytes_per_pixel)
                    .ok_or(BmcErrors::UnsupportedDepth(bytes_per_pixel))?;

                let size = header.pixel_count() * bytes_per_pixel;
                let raw = record
                    .payload
                    .get(..size)
                    .ok_or(BmcErrors::LengthMismatch(size, record.payload.len()))?;

                let image = normalize(raw, depth, width, height, kind);
                let secondary = if self.options.keep_secondary() && height != TILE_DIMENSION {
                    secondary_image(&record.payload[size..], depth, kind)
                } else {
                    None
                };
                (depth, image, secondary)
            }
        };
        if primary.is_empty() {
            return Ok(None);
        }

        Ok(Some(DecodedTile {
            header,
            depth,
            primary,
            secondary
        }))
    }

    /// Depth of compressed tiles, resolved on the first compressed tile
    fn resolve_depth(
        &mut self, stream: &[u8], payload_offset: usize
    ) -> Result<PixelDepth, BmcErrors> {
        if let Some(depth) = self.compressed_depth {
            return Ok(depth);
        }
        let depth = resolve_compressed_depth(self.file_name.as_deref(), stream, payload_offset)?;
        info!("Compressed tiles are stored at {} bits per pixel", depth.bits_per_pixel());

        self.compressed_depth = Some(depth);
        Ok(depth)
    }
}

/// Image data trailing a short tile in its slot, in whole 64 pixel rows
fn secondary_image(rest: &[u8], depth: PixelDepth, kind: ContainerKind) -> Option<TileImage> {
    let row = TILE_DIMENSION * depth.bytes_per_pixel();
    let rows = rest.len() / row;

    if rows == 0 {
        return None;
    }
    Some(normalize(&rest[..rows * row], depth, TILE_DIMENSION, rows, kind))
}
