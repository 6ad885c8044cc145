/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors raised by the byte cursor
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum ByteIoError {
    /// A read needed more bytes than the stream holds.
    ///
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes left in the stream
    NotEnoughBytes(usize, usize),
    /// Generic message
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// A cursor over an in memory buffer.
///
/// All reads either succeed completely or leave the position
/// untouched, this lets callers report how far into a stream
/// they were when something went wrong.
///
/// # Example
/// ```
/// use bmc_core::bytestream::ByteCursor;
///
/// let mut cursor = ByteCursor::new(&[0x40, 0x00, 1, 2, 3]);
/// assert_eq!(cursor.get_u16_le_err().unwrap(), 64);
/// assert_eq!(cursor.read_slice(3).unwrap(), &[1, 2, 3]);
/// assert!(cursor.eof());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ByteCursor<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteCursor<'a> {
    /// Create a new cursor positioned at the start of `stream`
    pub const fn new(stream: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor {
            stream,
            position: 0
        }
    }
    /// Current read position
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Number of bytes left to read
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }
    /// Return true if there is nothing left to read
    #[inline(always)]
    pub const fn eof(&self) -> bool {
        self.remaining() == 0
    }
    /// Return true if the cursor can satisfy a read of `bytes` bytes
    #[inline(always)]
    pub const fn has(&self, bytes: usize) -> bool {
        self.position.saturating_add(bytes) <= self.stream.len()
    }
    /// The whole underlying buffer, independent of the position
    #[inline(always)]
    pub const fn stream(&self) -> &'a [u8] {
        self.stream
    }
    /// The bytes that have not been read yet
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        self.stream.get(self.position..).unwrap_or(&[])
    }

    #[inline]
    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        if !self.has(num) {
            return Err(ByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        if position > self.stream.len() {
            return Err(ByteIoError::Generic("Cannot seek past the end of the stream"));
        }
        self.position = position;
        Ok(())
    }

    /// Read `num` bytes returning a slice borrowed from the underlying buffer
    #[inline]
    pub fn read_slice(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        let slice = self.peek_at(0, num)?;
        self.position += num;
        Ok(slice)
    }

    /// Look `position` bytes ahead and return a reference
    /// to `num_bytes` from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position.
    #[inline]
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let start = self.position.saturating_add(position);
        let end = start.saturating_add(num_bytes);

        match self.stream.get(start..end) {
            Some(bytes) => Ok(bytes),
            None => Err(ByteIoError::NotEnoughBytes(
                position.saturating_add(num_bytes),
                self.remaining()
            ))
        }
    }

    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let [byte] = self.read_fixed_bytes_or_error::<1>()?;
        Ok(byte)
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.read_slice(N)?);
        Ok(byte_store)
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<'a> ByteCursor<'a>
        {
            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;

                Ok($int_type::from_le_bytes(space))
            }
        }
    };
}

get_single_type!(get_u16_le_err, u16);
get_single_type!(get_u32_le_err, u32);

#[cfg(test)]
mod tests {
    use super::{ByteCursor, ByteIoError};

    #[test]
    fn reads_little_endian_fields() {
        let data = [0x0C, 0x00, 0x00, 0x00, 0x40, 0x00, 0xFF];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.get_u32_le_err().unwrap(), 12);
        assert_eq!(cursor.get_u16_le_err().unwrap(), 64);
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.read_u8_err().unwrap(), 0xFF);
        assert!(cursor.eof());
    }

    #[test]
    fn failed_read_keeps_position() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1).unwrap();

        assert_eq!(
            cursor.get_u32_le_err(),
            Err(ByteIoError::NotEnoughBytes(4, 2))
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.remaining_bytes(), &[2, 3]);
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [9, 8, 7, 6];
        let cursor = ByteCursor::new(&data);

        assert_eq!(cursor.peek_at(2, 2).unwrap(), &[7, 6]);
        assert!(cursor.peek_at(3, 2).is_err());
        assert_eq!(cursor.position(), 0);
    }
}
