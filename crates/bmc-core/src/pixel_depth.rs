/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel depths found in bitmap cache tiles

/// The storage depth of one pixel in a cache tile
///
/// The discriminant is the number of bytes one pixel occupies
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelDepth {
    /// 8 bit palette indexes
    Indexed = 1,
    /// 16 bit RGB 565
    HighColor = 2,
    /// 24 bit BGR
    TrueColor = 3,
    /// 32 bit BGR plus an unused byte
    TrueColorPadded = 4
}

impl PixelDepth {
    /// Map a bytes per pixel ratio to a depth, returning `None`
    /// for ratios a cache tile can't hold
    ///
    /// ```
    /// use bmc_core::pixel_depth::PixelDepth;
    /// assert_eq!(PixelDepth::from_bytes_per_pixel(2), Some(PixelDepth::HighColor));
    /// assert_eq!(PixelDepth::from_bytes_per_pixel(5), None);
    /// ```
    pub const fn from_bytes_per_pixel(bytes: usize) -> Option<PixelDepth> {
        match bytes {
            1 => Some(PixelDepth::Indexed),
            2 => Some(PixelDepth::HighColor),
            3 => Some(PixelDepth::TrueColor),
            4 => Some(PixelDepth::TrueColorPadded),
            _ => None
        }
    }
    /// Number of bytes a single pixel occupies
    pub const fn bytes_per_pixel(self) -> usize {
        self as usize
    }
    /// Number of bits a single pixel occupies
    pub const fn bits_per_pixel(self) -> usize {
        self.bytes_per_pixel() * 8
    }
}
