/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the bitmap cache crates
//!
//! It currently contains
//!
//! - A zero copy byte cursor and a fixed size byte writer with little endian aware reads and writes
//! - Pixel depth information shared by cache tiles
//! - Decoder options
//! - A logging shim which forwards to the `log` crate when the `log` feature is on
//!
//! This library is `#[no_std]` and allocation free.
//!
//! # Features
//!  - `std`: Build against the standard library.
//!
//!  - `log`: Forward the logging macros in [`log`] to the `log` crate,
//!     when disabled the macros expand to nothing.
//!
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![macro_use]

pub mod bytestream;
#[cfg(not(feature = "log"))]
pub mod log;
#[cfg(feature = "log")]
pub use ::log;
pub mod options;
pub mod pixel_depth;
