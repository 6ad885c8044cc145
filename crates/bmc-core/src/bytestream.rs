/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader hands out borrowed slices of the buffer it wraps,
//! so framing a fully loaded file never copies or reallocates.
//! The writer fills a caller supplied buffer whose size is known up front.
pub use reader::{ByteCursor, ByteIoError};
pub use writer::ByteWriter;

mod reader;
mod writer;
