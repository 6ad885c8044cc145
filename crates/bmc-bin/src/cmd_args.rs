/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("bmc-tools")
        .about("Recover tiles from RDP bitmap cache files")
        .arg(Arg::new("src")
            .short('s')
            .long("src")
            .help("Cache file or directory to process")
            .long_help("Cache file or directory to process.\nDirectories are searched recursively for .bin and .bmc files.\nMay be given more than once.")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("dest")
            .short('d')
            .long("dest")
            .help("Existing directory where recovered bitmaps are stored")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("count")
            .short('c')
            .long("count")
            .help("Only extract the given number of tiles per file")
            .long_help("Only extract the given number of tiles per file, 0 extracts all of them")
            .value_parser(value_parser!(usize))
            .default_value("0"))
        .arg(Arg::new("old")
            .short('o')
            .long("old")
            .action(ArgAction::SetTrue)
            .help("Also extract the old bitmap data found after short tiles"))
        .arg(Arg::new("bitmap")
            .short('b')
            .long("bitmap")
            .action(ArgAction::SetTrue)
            .help_heading("COLLAGE")
            .help("Also store all tiles of a file in one collage bitmap"))
        .arg(Arg::new("width")
            .short('w')
            .long("width")
            .help_heading("COLLAGE")
            .help("Number of tiles per collage row")
            .value_parser(value_parser!(usize))
            .default_value("64"))
        .arg(Arg::new("split")
            .short('k')
            .long("split")
            .action(ArgAction::SetTrue)
            .help("Store the output of every source file in its own directory"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat files that end in the middle of a tile as errors"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the processed files"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Same as --verbose"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::create_cmd_args;

    #[test]
    fn defaults() {
        let matches = create_cmd_args()
            .try_get_matches_from(["bmc-tools", "-s", "a.bmc", "-d", "out"])
            .unwrap();

        assert_eq!(matches.get_one::<usize>("count"), Some(&0));
        assert_eq!(matches.get_one::<usize>("width"), Some(&64));
        assert!(!matches.get_flag("old"));
        assert!(!matches.get_flag("bitmap"));
    }

    #[test]
    fn sources_repeat() {
        let matches = create_cmd_args()
            .try_get_matches_from(["bmc-tools", "-s", "a.bmc", "--src", "dir", "-d", "out", "-b", "-w", "8"])
            .unwrap();

        let sources: Vec<&PathBuf> = matches.get_many::<PathBuf>("src").unwrap().collect();
        assert_eq!(sources, [&PathBuf::from("a.bmc"), &PathBuf::from("dir")]);
        assert_eq!(matches.get_one::<usize>("width"), Some(&8));
    }

    #[test]
    fn destination_is_required() {
        assert!(create_cmd_args()
            .try_get_matches_from(["bmc-tools", "-s", "a.bmc"])
            .is_err());
    }
}
