/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use bmc_core::bytestream::ByteIoError;

/// How far an error reaches
///
/// Decoding a batch of files keeps going as long as possible,
/// this tells the caller what has to be thrown away.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorSeverity {
    /// The source could not be read at all, skip the file
    Source,
    /// The container is corrupt, stop processing this file
    Format,
    /// A single tile is corrupt, drop it and move on to the next one
    Stream
}

/// Errors raised while decompressing an interleaved RLE tile
#[derive(Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum RleErrors {
    /// The order stream ended in the middle of an order
    TruncatedStream,
    /// An opcode outside the supported order families
    UnsupportedOrder(u8),
    /// The orders produce more pixels than the tile holds
    ///
    /// The argument is the size the tile is limited to
    Overflow(usize),
    /// The decoder was asked for a pixel size it can't handle
    UnsupportedPixelSize(usize)
}

impl Debug for RleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RleErrors::TruncatedStream => writeln!(f, "Truncated RLE stream"),
            RleErrors::UnsupportedOrder(code) => {
                writeln!(f, "Unsupported RLE order {code:#04X}")
            }
            RleErrors::Overflow(limit) => {
                writeln!(f, "RLE orders overflow the {limit} byte tile")
            }
            RleErrors::UnsupportedPixelSize(size) => {
                writeln!(f, "Cannot decompress pixels of {size} bytes")
            }
        }
    }
}

impl Display for RleErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for RleErrors {}

impl From<ByteIoError> for RleErrors {
    fn from(_: ByteIoError) -> Self {
        RleErrors::TruncatedStream
    }
}

/// Errors that can occur while recovering tiles from a cache file
#[non_exhaustive]
pub enum BmcErrors {
    /// The source holds no bytes
    EmptySource,
    /// A header or payload is longer than what is left of the container
    ///
    /// - 1st argument is the number of bytes needed
    /// - 2nd argument is the number of bytes left
    Truncated(usize, usize),
    /// An uncompressed tile stores a bytes per pixel ratio
    /// outside 1..=4
    UnsupportedDepth(usize),
    /// Neither the file name nor the stream layout reveal the depth of
    /// compressed tiles
    UnknownDepth,
    /// A compressed tile could not be decompressed
    Rle(RleErrors),
    /// A decoded buffer does not have the expected size
    ///
    /// - 1st argument is the expected size
    /// - 2nd argument is the size found
    LengthMismatch(usize, usize),
    /// Generic message
    GenericStatic(&'static str),
    IoErrors(ByteIoError)
}

impl BmcErrors {
    /// Classify this error by what it invalidates
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            BmcErrors::EmptySource => ErrorSeverity::Source,
            BmcErrors::Rle(_) | BmcErrors::LengthMismatch(..) => ErrorSeverity::Stream,
            BmcErrors::Truncated(..)
            | BmcErrors::UnsupportedDepth(_)
            | BmcErrors::UnknownDepth
            | BmcErrors::GenericStatic(_)
            | BmcErrors::IoErrors(_) => ErrorSeverity::Format
        }
    }
}

impl Debug for BmcErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptySource => {
                writeln!(f, "Unable to retrieve file contents, source is empty")
            }
            Self::Truncated(needed, remaining) => {
                writeln!(
                    f,
                    "Truncated container, needed {needed} bytes but only {remaining} remain"
                )
            }
            Self::UnsupportedDepth(bpp) => {
                writeln!(f, "Unexpected bpp ({}) found during processing", bpp * 8)
            }
            Self::UnknownDepth => {
                writeln!(f, "Cannot determine pixel depth of compressed tiles")
            }
            Self::Rle(err) => {
                write!(f, "{:?}", err)
            }
            Self::LengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Decoded tile has {found} bytes, expected {expected}"
                )
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmcErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for BmcErrors {}

impl From<RleErrors> for BmcErrors {
    fn from(value: RleErrors) -> Self {
        BmcErrors::Rle(value)
    }
}

impl From<ByteIoError> for BmcErrors {
    fn from(value: ByteIoError) -> Self {
        match value {
            ByteIoError::NotEnoughBytes(needed, remaining) => {
                BmcErrors::Truncated(needed, remaining)
            }
            _ => BmcErrors::IoErrors(value)
        }
    }
}

impl From<&'static str> for BmcErrors {
    fn from(value: &'static str) -> Self {
        BmcErrors::GenericStatic(value)
    }
}
