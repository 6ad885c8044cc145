/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, Level};

/// Export settings shared by every source file
#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub destination:      PathBuf,
    /// Tiles per collage row, `None` when no collage is wanted
    pub collage_width:    Option<usize>,
    pub split:            bool,
    pub export_secondary: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            destination:      PathBuf::new(),
            collage_width:    None,
            split:            false,
            export_secondary: false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(dest) = options.get_one::<PathBuf>("dest") {
        cmd_options.destination = dest.clone();
    }
    if options.get_flag("bitmap") {
        let width = options.get_one::<usize>("width").copied().unwrap_or(64);
        info!("Collage with {} tiles per row requested", width);
        cmd_options.collage_width = Some(width);
    }
    if options.get_flag("split") {
        info!("Output will be split per source file");
        cmd_options.split = true;
    }
    if options.get_flag("old") {
        info!("Old data will also be saved in separate files");
        cmd_options.export_secondary = true;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") || options.get_flag("verbose") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::parse_options;
    use crate::cmd_args::create_cmd_args;

    #[test]
    fn collage_only_when_asked() {
        let matches = create_cmd_args()
            .try_get_matches_from(["bmc-tools", "-s", "x", "-d", "out", "-w", "3"])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.destination, PathBuf::from("out"));
        assert_eq!(options.collage_width, None);

        let matches = create_cmd_args()
            .try_get_matches_from(["bmc-tools", "-s", "x", "-d", "out", "-b", "-w", "3", "-k"])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.collage_width, Some(3));
        assert!(options.split);
    }
}
