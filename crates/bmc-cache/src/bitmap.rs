/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Minimal uncompressed bitmap writer
//!
//! Indexed images get a `BITMAPINFOHEADER` and the palette, BGRA images a
//! `BITMAPV4HEADER` whose bit fields describe the alpha channel.
//! Rows are written as stored, bottom up.

use bmc_core::bytestream::ByteWriter;

use crate::errors::BmcErrors;
use crate::tile::{PixelLayout, TileImage};

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: usize = 40;
const V4_HEADER_SIZE: usize = 108;

/// `BI_RGB`
const COMPRESSION_NONE: u32 = 0;
/// `BI_BITFIELDS`
const COMPRESSION_BITFIELDS: u32 = 3;
/// `LCS_WINDOWS_COLOR_SPACE`, "Win "
const COLOR_SPACE_WINDOWS: u32 = 0x5769_6E20;

const RED_MASK: u32 = 0x00FF_0000;
const GREEN_MASK: u32 = 0x0000_FF00;
const BLUE_MASK: u32 = 0x0000_00FF;
const ALPHA_MASK: u32 = 0xFF00_0000;

/// Bitmap encoder for a [`TileImage`]
///
/// # Example
/// ```
/// use bmc_cache::{BmpEncoder, PixelLayout, TileImage};
///
/// let image = TileImage::new(1, 1, PixelLayout::Bgra, vec![1, 2, 3, 0xFF]);
/// let bmp = BmpEncoder::new(&image).encode().unwrap();
///
/// assert_eq!(&bmp[..2], b"BM");
/// assert_eq!(bmp.len(), 0x7A + 4);
/// assert_eq!(&bmp[0x7A..], &[1, 2, 3, 0xFF]);
/// ```
pub struct BmpEncoder<'a> {
    image: &'a TileImage
}

impl<'a> BmpEncoder<'a> {
    pub fn new(image: &'a TileImage) -> BmpEncoder<'a> {
        BmpEncoder { image }
    }

    fn info_header_size(&self) -> usize {
        match self.image.layout() {
            PixelLayout::Indexed => INFO_HEADER_SIZE,
            PixelLayout::Bgra => V4_HEADER_SIZE
        }
    }
    /// Offset of the pixel rows from the start of the file
    pub fn pixel_offset(&self) -> usize {
        FILE_HEADER_SIZE + self.info_header_size() + self.image.layout().prefix_size()
    }
    /// Bytes in one row, rounded up to a multiple of four
    pub fn padded_stride(&self) -> usize {
        (self.image.stride() + 3) & !3
    }
    /// Size of the pixel rows in the file
    pub fn image_size(&self) -> usize {
        self.padded_stride() * self.image.height()
    }
    /// Size of the whole file
    pub fn encoded_size(&self) -> usize {
        self.pixel_offset() + self.image_size()
    }

    /// Encode the image into a newly allocated bitmap file
    ///
    /// # Errors
    /// - [`BmcErrors::LengthMismatch`] if the image holds fewer pixels than its
    ///   dimensions say
    /// - a generic error if the dimensions don't fit a bitmap header
    pub fn encode(&self) -> Result<Vec<u8>, BmcErrors> {
        let image = self.image;
        let expected = image.stride() * image.height();

        if image.data().len() < expected {
            return Err(BmcErrors::LengthMismatch(expected, image.data().len()));
        }
        let to_u32 =
            |value: usize| u32::try_from(value).map_err(|_| BmcErrors::from("Too large bitmap"));
        let to_i32 =
            |value: usize| i32::try_from(value).map_err(|_| BmcErrors::from("Too large bitmap"));

        let mut output = vec![0_u8; self.encoded_size()];
        let mut writer = ByteWriter::new(&mut output);

        // BITMAPFILEHEADER
        writer.write_all(b"BM")?;
        writer.write_u32_le_err(to_u32(self.encoded_size())?)?;
        writer.write_u32_le_err(0)?;
        writer.write_u32_le_err(to_u32(self.pixel_offset())?)?;

        writer.write_u32_le_err(to_u32(self.info_header_size())?)?;
        writer.write_i32_le_err(to_i32(image.width())?)?;
        writer.write_i32_le_err(to_i32(image.height())?)?;
        writer.write_u16_le_err(1)?;

        match image.layout() {
            PixelLayout::Indexed => {
                writer.write_u16_le_err(8)?;
                writer.write_u32_le_err(COMPRESSION_NONE)?;
                writer.write_u32_le_err(to_u32(self.image_size())?)?;
                // resolution and colour counts
                writer.write_repeated(0, 16)?;
                writer.write_all(image.palette().unwrap_or(&[]))?;
            }
            PixelLayout::Bgra => {
                writer.write_u16_le_err(32)?;
                writer.write_u32_le_err(COMPRESSION_BITFIELDS)?;
                writer.write_u32_le_err(to_u32(self.image_size())?)?;
                writer.write_repeated(0, 16)?;

                writer.write_u32_le_err(RED_MASK)?;
                writer.write_u32_le_err(GREEN_MASK)?;
                writer.write_u32_le_err(BLUE_MASK)?;
                writer.write_u32_le_err(ALPHA_MASK)?;
                writer.write_u32_le_err(COLOR_SPACE_WINDOWS)?;
                // endpoints and gamma
                writer.write_repeated(0, 48)?;
            }
        }
        let padding = self.padded_stride() - image.stride();

        if image.stride() > 0 {
            for row in image.data()[..expected].chunks_exact(image.stride()) {
                writer.write_all(row)?;
                writer.write_repeated(0, padding)?;
            }
        }
        debug_assert_eq!(writer.bytes_left(), 0);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::BmpEncoder;
    use crate::palette::PALETTE;
    use crate::pixels::with_palette;
    use crate::tile::{PixelLayout, TileImage};

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn indexed_rows_are_padded() {
        let image = TileImage::new(3, 2, PixelLayout::Indexed, with_palette(&[1, 2, 3, 4, 5, 6]));
        let bmp = BmpEncoder::new(&image).encode().unwrap();

        assert_eq!(bmp.len(), 0x436 + 8);
        assert_eq!(u32_at(&bmp, 2), bmp.len() as u32);
        assert_eq!(u32_at(&bmp, 10), 0x436);
        assert_eq!(u32_at(&bmp, 14), 40);
        assert_eq!(u32_at(&bmp, 18), 3);
        assert_eq!(u32_at(&bmp, 22), 2);
        // bit count and compression
        assert_eq!(&bmp[28..30], &[8, 0]);
        assert_eq!(u32_at(&bmp, 30), 0);
        assert_eq!(u32_at(&bmp, 34), 8);
        assert_eq!(&bmp[54..54 + 1024], &PALETTE[..]);
        assert_eq!(&bmp[0x436..], &[1, 2, 3, 0, 4, 5, 6, 0]);
    }

    #[test]
    fn color_header_has_alpha_bitfields() {
        let image = TileImage::new(2, 1, PixelLayout::Bgra, vec![0xAA; 8]);
        let bmp = BmpEncoder::new(&image).encode().unwrap();

        assert_eq!(bmp.len(), 0x7A + 8);
        assert_eq!(u32_at(&bmp, 2), 0x7A + 8);
        assert_eq!(u32_at(&bmp, 10), 0x7A);
        assert_eq!(u32_at(&bmp, 14), 108);
        assert_eq!(&bmp[28..30], &[32, 0]);
        assert_eq!(u32_at(&bmp, 30), 3);
        assert_eq!(u32_at(&bmp, 54), 0x00FF_0000);
        assert_eq!(u32_at(&bmp, 58), 0x0000_FF00);
        assert_eq!(u32_at(&bmp, 62), 0x0000_00FF);
        assert_eq!(u32_at(&bmp, 66), 0xFF00_0000);
        assert_eq!(&bmp[70..74], b" niW");
        assert!(bmp[74..0x7A].iter().all(|&b| b == 0));
    }

    #[test]
    fn short_image_is_rejected() {
        let image = TileImage::new(2, 2, PixelLayout::Bgra, vec![0; 8]);
        assert!(BmpEncoder::new(&image).encode().is_err());
    }
}
