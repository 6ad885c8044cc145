/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! This module exposes a struct holding the options the cache
//! decoder respects while walking a container.

/// Decoder options
///
/// Options are set builder style, each setter consumes
/// and returns the options.
///
/// # Example
/// ```
/// use bmc_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default()
///     .set_max_tiles(100)
///     .set_keep_secondary(true);
///
/// assert_eq!(options.max_tiles(), 100);
/// assert!(options.keep_secondary());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Stop once this many tiles were recovered from one container.
    ///
    /// - Default value: 0, meaning no limit
    max_tiles:      usize,
    /// Recover the legacy image data stored after short tiles
    /// in their 64x64 slot.
    ///
    /// - Default value: false
    keep_secondary: bool,
    /// Treat a container that ends in the middle of a tile as an error
    /// instead of stopping quietly after the last complete tile.
    ///
    /// - Default value: false
    strict_mode:    bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_tiles:      0,
            keep_secondary: false,
            strict_mode:    false
        }
    }
}

impl DecoderOptions {
    /// Options used by the command line front end
    pub fn new_cmd() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Maximum number of tiles recovered per container, 0 for all of them
    pub const fn max_tiles(&self) -> usize {
        self.max_tiles
    }
    /// Set the maximum number of tiles recovered per container
    ///
    /// A value of zero removes the limit
    #[must_use]
    pub fn set_max_tiles(mut self, tiles: usize) -> Self {
        self.max_tiles = tiles;
        self
    }
    /// Return true if the tile limit was reached for `count` tiles
    pub const fn tile_limit_reached(&self, count: usize) -> bool {
        self.max_tiles != 0 && count >= self.max_tiles
    }

    /// Whether legacy data trailing short tiles is recovered
    pub const fn keep_secondary(&self) -> bool {
        self.keep_secondary
    }
    /// Set whether legacy data trailing short tiles is recovered
    #[must_use]
    pub fn set_keep_secondary(mut self, yes: bool) -> Self {
        self.keep_secondary = yes;
        self
    }

    /// Whether a truncated container is reported as an error
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }
    /// Set whether a truncated container is reported as an error
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
