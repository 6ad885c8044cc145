/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::mem::size_of;

use crate::bytestream::ByteIoError;

static ERROR_MSG: &str = "No more space";

/// Encapsulates a simple byte writer with
/// support for little endian writes
///
/// The writer never grows the buffer, callers compute the output
/// size first and hand in a buffer of exactly that length.
pub struct ByteWriter<'a> {
    buffer:   &'a mut [u8],
    position: usize
}

impl<'a> ByteWriter<'a> {
    /// Create a new writer for the stream
    pub fn new(data: &'a mut [u8]) -> ByteWriter<'a> {
        ByteWriter {
            buffer:   data,
            position: 0
        }
    }
    /// Return number of unwritten bytes in this stream
    ///
    /// # Example
    /// ```
    /// use bmc_core::bytestream::ByteWriter;
    /// let mut storage = [0;10];
    ///
    /// let writer = ByteWriter::new(&mut storage);
    /// assert_eq!(writer.bytes_left(),10); // no bytes were written
    /// ```
    pub const fn bytes_left(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Return the number of bytes the writer has written
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Check if the byte writer can support
    /// the following write
    pub const fn has(&self, bytes: usize) -> bool {
        self.position.saturating_add(bytes) <= self.buffer.len()
    }

    /// Write a single byte into the bytestream or error out
    /// if there is not enough space
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_all(&[byte])
    }

    /// Write all of `bytes` or nothing at all if they don't fit
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), ByteIoError> {
        match self
            .buffer
            .get_mut(self.position..self.position.saturating_add(bytes.len()))
        {
            Some(space) => {
                space.copy_from_slice(bytes);
                self.position += bytes.len();
                Ok(())
            }
            None => Err(ByteIoError::Generic(ERROR_MSG))
        }
    }

    /// Write `count` copies of `byte`
    pub fn write_repeated(&mut self, byte: u8, count: usize) -> Result<(), ByteIoError> {
        match self
            .buffer
            .get_mut(self.position..self.position.saturating_add(count))
        {
            Some(space) => {
                space.fill(byte);
                self.position += count;
                Ok(())
            }
            None => Err(ByteIoError::Generic(ERROR_MSG))
        }
    }
}

macro_rules! write_single_type {
    ($name:tt,$int_type:tt) => {
        impl<'a> ByteWriter<'a>
        {
            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," write.")]
            #[inline]
            pub fn $name(&mut self, value: $int_type) -> Result<(), ByteIoError>
            {
                const SIZE: usize = size_of::<$int_type>();

                let bytes: [u8; SIZE] = value.to_le_bytes();
                self.write_all(&bytes)
            }
        }
    };
}

write_single_type!(write_u16_le_err, u16);
write_single_type!(write_u32_le_err, u32);
write_single_type!(write_i32_le_err, i32);
