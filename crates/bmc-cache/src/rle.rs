/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Interleaved RLE bitmap decompression
//!
//! Compressed cache tiles are a sequence of orders. Each order starts with a
//! code byte that selects the order and may embed its run length,
//! followed by optional length bytes and operands.
//!
//! Code bytes fall in three groups
//!
//! | Codes          | Group   | Run length                                      |
//! |----------------|---------|-------------------------------------------------|
//! | `0x00..=0x9F`  | regular | low 5 bits, `0` means next byte + 32            |
//! | `0xC0..=0xEF`  | lite    | low 4 bits, `0` means next byte + 16            |
//! | `0xF0..=0xFF`  | mega    | little endian u16 after the code                |
//!
//! Foreground/background images count their run in units of eight pixels,
//! a zero embedded length is then followed by a byte holding `run - 1`.
//!
//! Pixels below the first scanline are predicted from the pixel above them,
//! background runs copy it, foreground runs XOR it with the foreground colour.

use bmc_core::bytestream::ByteCursor;

use crate::errors::RleErrors;

/// An RLE order
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Order {
    /// Black on the first scanline, copies of the row above below it
    BackgroundRun,
    /// The foreground colour, XORed with the row above below the first scanline
    ForegroundRun,
    /// Read a new foreground colour, then a foreground run
    SetForegroundRun,
    /// Read two pixels and repeat the pair
    DitheredRun,
    /// Read one pixel and repeat it
    ColorRun,
    /// Choose between background and foreground with a bit mask
    ForegroundBackgroundImage,
    /// Read a new foreground colour, then a foreground/background image
    SetForegroundBackgroundImage,
    /// Foreground/background image of 8 pixels with an implied mask
    SpecialImage { mask: u8 },
    /// Copy pixels from the stream
    ColorImage,
    /// One white pixel
    White,
    /// One black pixel
    Black
}

impl Order {
    /// Return true for orders counting run lengths in units of 8 pixels
    pub const fn is_masked(self) -> bool {
        matches!(
            self,
            Order::ForegroundBackgroundImage | Order::SetForegroundBackgroundImage
        )
    }
}

/// A parsed order code
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OrderHeader {
    pub order:       Order,
    /// Number of pixels the order produces
    pub run_length:  usize,
    /// Bytes the code and its length field occupy
    pub header_size: usize
}

const REGULAR_LENGTH_MASK: u8 = 0x1F;
const LITE_LENGTH_MASK: u8 = 0x0F;

const REGULAR_ORDERS: [Order; 5] = [
    Order::BackgroundRun,
    Order::ForegroundRun,
    Order::ForegroundBackgroundImage,
    Order::ColorRun,
    Order::ColorImage
];

/// Parse the order code at the start of `bytes`
///
/// Only the code and its length bytes are consumed, operands are left in place.
///
/// # Example
/// ```
/// use bmc_cache::rle::{parse_order, Order};
///
/// // color image of 4 pixels
/// let header = parse_order(&[0x84, 1, 2, 3, 4]).unwrap();
/// assert_eq!(header.order, Order::ColorImage);
/// assert_eq!(header.run_length, 4);
/// assert_eq!(header.header_size, 1);
/// ```
pub fn parse_order(bytes: &[u8]) -> Result<OrderHeader, RleErrors> {
    let code = *bytes.first().ok_or(RleErrors::TruncatedStream)?;

    match code {
        0xF0..=0xFF => parse_mega_order(code, bytes),
        0xA0..=0xBF => Err(RleErrors::UnsupportedOrder(code)),
        0xC0..=0xEF => {
            let order = match code >> 4 {
                0xC => Order::SetForegroundRun,
                0xD => Order::SetForegroundBackgroundImage,
                _ => Order::DitheredRun
            };
            embedded_length(order, code & LITE_LENGTH_MASK, 16, bytes)
        }
        _ => {
            let order = REGULAR_ORDERS[usize::from(code >> 5)];
            embedded_length(order, code & REGULAR_LENGTH_MASK, 32, bytes)
        }
    }
}

fn embedded_length(
    order: Order, length: u8, extended_bias: usize, bytes: &[u8]
) -> Result<OrderHeader, RleErrors> {
    let (run_length, header_size) = match (length, order.is_masked()) {
        (0, masked) => {
            let next = usize::from(*bytes.get(1).ok_or(RleErrors::TruncatedStream)?);
            let bias = if masked { 1 } else { extended_bias };
            (next + bias, 2)
        }
        (length, true) => (usize::from(length) * 8, 1),
        (length, false) => (usize::from(length), 1)
    };

    Ok(OrderHeader {
        order,
        run_length,
        header_size
    })
}

fn parse_mega_order(code: u8, bytes: &[u8]) -> Result<OrderHeader, RleErrors> {
    let single = |order: Order, run_length: usize| -> Result<OrderHeader, RleErrors> {
        Ok(OrderHeader {
            order,
            run_length,
            header_size: 1
        })
    };
    let order = match code {
        0xF0 => Order::BackgroundRun,
        0xF1 => Order::ForegroundRun,
        0xF2 => Order::ForegroundBackgroundImage,
        0xF3 => Order::ColorRun,
        0xF4 => Order::ColorImage,
        0xF6 => Order::SetForegroundRun,
        0xF7 => Order::SetForegroundBackgroundImage,
        0xF8 => Order::DitheredRun,
        0xF9 => return single(Order::SpecialImage { mask: 0x03 }, 8),
        0xFA => return single(Order::SpecialImage { mask: 0x05 }, 8),
        0xFD => return single(Order::White, 1),
        0xFE => return single(Order::Black, 1),
        _ => return Err(RleErrors::UnsupportedOrder(code))
    };
    match bytes.get(1..3) {
        Some(&[lo, hi]) => Ok(OrderHeader {
            order,
            run_length: usize::from(u16::from_le_bytes([lo, hi])),
            header_size: 3
        }),
        _ => Err(RleErrors::TruncatedStream)
    }
}

/// Decoder state carried from one order to the next
struct RleState {
    output:     Vec<u8>,
    foreground: [u8; 4],
    unit:       usize,
    row_size:   usize,
    limit:      usize,
    first_line: bool,
    insert_fg:  bool
}

impl RleState {
    fn new(unit: usize, width: usize, height: usize) -> RleState {
        let row_size = width * unit;
        let limit = row_size * height;

        RleState {
            output: Vec::with_capacity(limit),
            foreground: [0xFF; 4],
            unit,
            row_size,
            limit,
            first_line: true,
            insert_fg: false
        }
    }

    /// Make sure `pixels` more pixels fit in the tile
    fn reserve(&self, pixels: usize) -> Result<(), RleErrors> {
        let needed = pixels
            .checked_mul(self.unit)
            .and_then(|bytes| bytes.checked_add(self.output.len()));

        match needed {
            Some(size) if size <= self.limit => Ok(()),
            _ => Err(RleErrors::Overflow(self.limit))
        }
    }

    fn push_foreground(&mut self) {
        self.output.extend_from_slice(&self.foreground[..self.unit]);
    }

    fn push_filled(&mut self, byte: u8) {
        self.output.resize(self.output.len() + self.unit, byte);
    }

    /// Push the pixel one scanline up, optionally XORed with the foreground
    fn push_above(&mut self, xor_foreground: bool) {
        let above = self.output.len() - self.row_size;

        for i in 0..self.unit {
            let mut value = self.output[above + i];
            if xor_foreground {
                value ^= self.foreground[i];
            }
            self.output.push(value);
        }
    }

    fn read_foreground(&mut self, stream: &mut ByteCursor) -> Result<(), RleErrors> {
        let color = stream.read_slice(self.unit)?;
        self.foreground[..self.unit].copy_from_slice(color);
        Ok(())
    }

    fn write_mask(&mut self, mask: u8, pixels: usize) {
        for bit in 0..pixels {
            let set = (mask >> bit) & 1 == 1;

            match (self.first_line, set) {
                (true, true) => self.push_foreground(),
                (true, false) => self.push_filled(0x00),
                (false, set) => self.push_above(set)
            }
        }
    }

    fn apply(&mut self, header: OrderHeader, stream: &mut ByteCursor) -> Result<(), RleErrors> {
        if self.first_line && self.output.len() >= self.row_size {
            self.first_line = false;
            self.insert_fg = false;
        }
        let mut run = header.run_length;

        match header.order {
            Order::BackgroundRun => {
                self.reserve(run)?;

                if self.insert_fg && run > 0 {
                    if self.first_line {
                        self.push_foreground();
                    } else {
                        self.push_above(true);
                    }
                    run -= 1;
                }
                for _ in 0..run {
                    if self.first_line {
                        self.push_filled(0x00);
                    } else {
                        self.push_above(false);
                    }
                }
                self.insert_fg = true;
                return Ok(());
            }
            Order::ForegroundRun | Order::SetForegroundRun => {
                if header.order == Order::SetForegroundRun {
                    self.read_foreground(stream)?;
                }
                self.reserve(run)?;

                for _ in 0..run {
                    if self.first_line {
                        self.push_foreground();
                    } else {
                        self.push_above(true);
                    }
                }
            }
            Order::DitheredRun => {
                let pair = stream.read_slice(self.unit * 2)?;
                self.reserve(run.saturating_mul(2))?;

                for _ in 0..run {
                    self.output.extend_from_slice(pair);
                }
            }
            Order::ColorRun => {
                let color = stream.read_slice(self.unit)?;
                self.reserve(run)?;

                for _ in 0..run {
                    self.output.extend_from_slice(color);
                }
            }
            Order::ForegroundBackgroundImage | Order::SetForegroundBackgroundImage => {
                if header.order == Order::SetForegroundBackgroundImage {
                    self.read_foreground(stream)?;
                }
                self.reserve(run)?;

                while run > 0 {
                    let mask = stream.read_u8_err()?;
                    let pixels = run.min(8);
                    self.write_mask(mask, pixels);
                    run -= pixels;
                }
            }
            Order::SpecialImage { mask } => {
                self.reserve(run)?;
                self.write_mask(mask, run);
            }
            Order::ColorImage => {
                let pixels = stream.read_slice(run * self.unit)?;
                self.reserve(run)?;
                self.output.extend_from_slice(pixels);
            }
            Order::White => {
                self.reserve(1)?;
                self.push_filled(0xFF);
            }
            Order::Black => {
                self.reserve(1)?;
                self.push_filled(0x00);
            }
        }
        self.insert_fg = false;
        Ok(())
    }
}

/// Decompress an interleaved RLE stream of `width * height` pixels, `unit`
/// bytes each.
///
/// Decoding stops at the end of `input`, the returned buffer may be shorter
/// than the tile if the stream doesn't cover it, callers decide what to make
/// of that.
///
/// # Errors
/// - [`RleErrors::UnsupportedPixelSize`] for units outside `1..=4`
/// - [`RleErrors::TruncatedStream`] when an order is cut short
/// - [`RleErrors::UnsupportedOrder`] on an unknown code byte
/// - [`RleErrors::Overflow`] when the orders produce more than the tile holds
pub fn decompress(
    input: &[u8], unit: usize, width: usize, height: usize
) -> Result<Vec<u8>, RleErrors> {
    if !(1..=4).contains(&unit) {
        return Err(RleErrors::UnsupportedPixelSize(unit));
    }
    let mut state = RleState::new(unit, width, height);
    let mut stream = ByteCursor::new(input);

    while !stream.eof() {
        let header = parse_order(stream.remaining_bytes())?;
        stream.skip(header.header_size)?;
        state.apply(header, &mut stream)?;
    }
    Ok(state.output)
}
