/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use bmc_core::options::DecoderOptions;
use clap::ArgMatches;

pub mod global_options;

pub fn get_decoder_options(options: &ArgMatches) -> DecoderOptions {
    let max_tiles = options.get_one::<usize>("count").copied().unwrap_or(0);
    let keep_secondary = options.get_flag("old");
    let strict_mode = options.get_flag("strict");

    DecoderOptions::new_cmd()
        .set_max_tiles(max_tiles)
        .set_keep_secondary(keep_secondary)
        .set_strict_mode(strict_mode)
}
