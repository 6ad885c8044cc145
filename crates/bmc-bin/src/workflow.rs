/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use bmc_cache::{
    BmcErrors, BmpEncoder, CacheDecoder, CollageBuilder, ContainerKind, DecodedTile,
    ErrorSeverity, TileImage
};
use bmc_core::options::DecoderOptions;
use clap::ArgMatches;
use log::{debug, error, info, warn};

use crate::cmd_parsers::get_decoder_options;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{write_file, CacheFile};
use crate::probe_files::collect_source_files;

/// Errors that end processing of a source file or of the whole run
pub enum WorkflowErrors {
    /// The output directory is missing or can't be written to, fatal for the run
    Destination(PathBuf, String),
    /// A `--src` path is neither a file nor a directory
    InvalidSource(PathBuf),
    /// A directory holds no cache files
    NoCandidates(PathBuf),
    /// A source file could not be read
    Source(PathBuf, std::io::Error),
    /// A source file could not be decoded at all
    Cache(PathBuf, BmcErrors)
}

impl WorkflowErrors {
    /// Return true if the run can't go on after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WorkflowErrors::Destination(..)
                | WorkflowErrors::InvalidSource(_)
                | WorkflowErrors::NoCandidates(_)
        )
    }
}

impl Debug for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowErrors::Destination(path, reason) => {
                writeln!(f, "Destination {path:?} is unusable: {reason}")
            }
            WorkflowErrors::InvalidSource(path) => {
                writeln!(f, "Invalid -s/--src parameter {path:?}, use -h/--help for help")
            }
            WorkflowErrors::NoCandidates(path) => {
                writeln!(f, "No suitable files were found under {path:?}")
            }
            WorkflowErrors::Source(path, err) => {
                writeln!(f, "Unable to read {path:?}: {err}")
            }
            WorkflowErrors::Cache(path, err) => {
                writeln!(f, "Unable to decode {path:?}: {err:?}")
            }
        }
    }
}

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    info!("Creating workflows from input");

    verify_destination(&cmd_opts.destination)?;

    let sources: Vec<PathBuf> = args
        .get_many::<PathBuf>("src")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let files = collect_source_files(&sources)?;
    let options = get_decoder_options(args);

    if options.max_tiles() > 0 {
        info!("At most {} tiles will be processed per file", options.max_tiles());
    }
    let mut exported = 0;

    for file in files {
        match process_file(file, options, cmd_opts) {
            Ok(count) => exported += count,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => error!("{:?}", err)
        }
    }
    info!("Exported {} tiles in total", exported);

    Ok(())
}

fn verify_destination(destination: &Path) -> Result<(), WorkflowErrors> {
    if destination.is_dir() {
        Ok(())
    } else {
        Err(WorkflowErrors::Destination(
            destination.to_path_buf(),
            "destination must be an already existing folder".to_string()
        ))
    }
}

/// Decode one cache file and export its tiles, returning the number of exported tiles
fn process_file(
    file: CacheFile, options: DecoderOptions, cmd_opts: &CmdOptions
) -> Result<usize, WorkflowErrors> {
    let data = file
        .read()
        .map_err(|err| WorkflowErrors::Source(file.path().to_path_buf(), err))?;
    let name = file.name();

    let mut decoder = CacheDecoder::new_with_options(&data, options);
    decoder.set_file_name(&name);

    if let Err(err) = decoder.decode().map(|_| ()) {
        if err.severity() == ErrorSeverity::Source {
            return Err(WorkflowErrors::Cache(file.path().to_path_buf(), err));
        }
        error!(
            "Processing of {:?} stopped after {} tiles: {:?}",
            file.path(),
            decoder.tiles().len(),
            err
        );
    }
    let kind = decoder.kind().unwrap_or(ContainerKind::Bmc);
    let tiles = decoder.into_tiles();

    if tiles.is_empty() {
        warn!("No tiles recovered from {:?}", file.path());
        return Ok(0);
    }
    let directory = output_directory(
        &cmd_opts.destination.join(file.output_directory()),
        &name,
        cmd_opts.split
    )?;

    export_tiles(&tiles, &directory, &name, cmd_opts.export_secondary)?;

    if let Some(width) = cmd_opts.collage_width {
        export_collage(&tiles, kind, width, &directory, &name)?;
    }
    info!("Successfully exported {} files from {:?}", tiles.len(), file.path());

    Ok(tiles.len())
}

/// Directory the outputs of `name` are written to, created if missing
fn output_directory(destination: &Path, name: &str, split: bool) -> Result<PathBuf, WorkflowErrors> {
    let directory = if split {
        destination.join(name)
    } else {
        destination.to_path_buf()
    };

    fs::create_dir_all(&directory)
        .map_err(|err| WorkflowErrors::Destination(directory.clone(), err.to_string()))?;

    Ok(directory)
}

pub(crate) fn tile_file_name(name: &str, index: usize) -> String {
    format!("{name}_{index:04}.bmp")
}

pub(crate) fn old_tile_file_name(name: &str, index: usize) -> String {
    format!("{name}_old_{index:04}.bmp")
}

pub(crate) fn collage_file_name(name: &str) -> String {
    format!("{name}_collage.bmp")
}

fn write_bitmap(image: &TileImage, path: &Path) -> Result<(), WorkflowErrors> {
    let bmp = match BmpEncoder::new(image).encode() {
        Ok(bmp) => bmp,
        Err(err) => {
            warn!("Could not encode {:?}: {:?}", path, err);
            return Ok(());
        }
    };
    debug!("Writing {:?}", path);

    write_file(path, &bmp)
        .map_err(|err| WorkflowErrors::Destination(path.to_path_buf(), err.to_string()))
}

fn export_tiles(
    tiles: &[DecodedTile], directory: &Path, name: &str, secondary: bool
) -> Result<(), WorkflowErrors> {
    for (index, tile) in tiles.iter().enumerate() {
        write_bitmap(&tile.primary, &directory.join(tile_file_name(name, index)))?;

        if let (true, Some(old)) = (secondary, &tile.secondary) {
            write_bitmap(old, &directory.join(old_tile_file_name(name, index)))?;
        }
    }
    Ok(())
}

fn export_collage(
    tiles: &[DecodedTile], kind: ContainerKind, width: usize, directory: &Path, name: &str
) -> Result<(), WorkflowErrors> {
    let collage = CollageBuilder::new(kind)
        .set_stripe_width(width)
        .build(tiles.iter().map(|tile| &tile.primary));

    if let Some(collage) = collage {
        info!(
            "Collage of {}x{} pixels built from {} tiles",
            collage.width(),
            collage.height(),
            tiles.len()
        );
        write_bitmap(&collage, &directory.join(collage_file_name(name)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use bmc_core::options::DecoderOptions;

    use std::ffi::OsString;

    use super::{
        collage_file_name, create_and_exec_workflow_from_cmd, old_tile_file_name, process_file,
        tile_file_name, verify_destination, WorkflowErrors
    };
    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::{parse_options, CmdOptions};
    use crate::file_io::CacheFile;

    /// A BMC container holding one 64x64 indexed tile of `index`
    fn indexed_container(index: u8) -> Vec<u8> {
        let mut container = Vec::new();
        container.extend_from_slice(&[0; 8]);
        container.extend_from_slice(&64_u16.to_le_bytes());
        container.extend_from_slice(&64_u16.to_le_bytes());
        container.extend_from_slice(&(64_u32 * 64).to_le_bytes());
        container.extend_from_slice(&0_u32.to_le_bytes());
        container.resize(container.len() + 64 * 64, index);
        container
    }

    #[test]
    fn output_names() {
        assert_eq!(tile_file_name("bcache24.bmc", 7), "bcache24.bmc_0007.bmp");
        assert_eq!(old_tile_file_name("Cache0000.bin", 12), "Cache0000.bin_old_0012.bmp");
        assert_eq!(collage_file_name("bcache2.bmc"), "bcache2.bmc_collage.bmp");
    }

    #[test]
    fn missing_destination_is_fatal() {
        let err = verify_destination(std::path::Path::new("/nonexistent/bmc/output")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn exports_tiles_secondary_and_collage() {
        let root = std::env::temp_dir().join(format!("bmc-workflow-{}", std::process::id()));
        let (input, destination) = (root.join("in"), root.join("out"));
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&destination).unwrap();

        // 64x32 indexed tile with 32 rows of old data behind it
        let mut container = Vec::new();
        container.extend_from_slice(&[0; 8]);
        container.extend_from_slice(&64_u16.to_le_bytes());
        container.extend_from_slice(&32_u16.to_le_bytes());
        container.extend_from_slice(&(64_u32 * 32).to_le_bytes());
        container.extend_from_slice(&0_u32.to_le_bytes());
        container.resize(container.len() + 64 * 64, 0x10);

        let source = input.join("bcache2.bmc");
        fs::write(&source, &container).unwrap();

        let mut cmd_opts = CmdOptions::new();
        cmd_opts.destination = destination.clone();
        cmd_opts.collage_width = Some(4);
        cmd_opts.split = true;
        cmd_opts.export_secondary = true;

        let options = DecoderOptions::default().set_keep_secondary(true);
        let exported = process_file(CacheFile::new(source), options, &cmd_opts).unwrap();
        assert_eq!(exported, 1);

        let output = destination.join("bcache2.bmc");
        assert!(output.is_dir());
        assert_eq!(
            fs::read(output.join("bcache2.bmc_0000.bmp")).unwrap().len(),
            0x436 + 64 * 32
        );
        assert_eq!(
            fs::read(output.join("bcache2.bmc_old_0000.bmp")).unwrap().len(),
            0x436 + 64 * 32
        );
        assert_eq!(
            fs::read(output.join("bcache2.bmc_collage.bmp")).unwrap().len(),
            0x436 + 256 * 64
        );

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unreadable_source_is_not_fatal() {
        let cmd_opts = CmdOptions::new();
        let missing = CacheFile::new(std::env::temp_dir().join("bmc-missing-source.bmc"));

        let err = process_file(missing, DecoderOptions::default(), &cmd_opts).unwrap_err();
        assert!(matches!(err, WorkflowErrors::Source(..)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn equally_named_sources_do_not_overwrite() {
        let root = std::env::temp_dir().join(format!("bmc-workflow-names-{}", std::process::id()));
        let (input, destination) = (root.join("profiles"), root.join("out"));
        fs::create_dir_all(input.join("userA")).unwrap();
        fs::create_dir_all(input.join("userB")).unwrap();
        fs::create_dir_all(&destination).unwrap();
        fs::write(input.join("userA/bcache2.bmc"), indexed_container(0x11)).unwrap();
        fs::write(input.join("userB/bcache2.bmc"), indexed_container(0x22)).unwrap();

        for split in [false, true] {
            let mut args: Vec<OsString> = vec!["bmc-tools".into(), "-s".into()];
            args.push(input.clone().into());
            args.push("-d".into());
            args.push(destination.clone().into());
            if split {
                args.push("-k".into());
            }
            let matches = create_cmd_args().try_get_matches_from(args).unwrap();
            create_and_exec_workflow_from_cmd(&matches, &parse_options(&matches)).unwrap();

            for (user, index) in [("userA", 0x11), ("userB", 0x22)] {
                let mut directory = destination.join("profiles").join(user);
                if split {
                    directory = directory.join("bcache2.bmc");
                }
                let bmp = fs::read(directory.join("bcache2.bmc_0000.bmp")).unwrap();
                assert_eq!(bmp.len(), 0x436 + 64 * 64);
                assert!(bmp[0x436..].iter().all(|&pixel| pixel == index));
            }
        }
        fs::remove_dir_all(&root).unwrap();
    }
}
