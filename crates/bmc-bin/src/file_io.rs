/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// A cache file on disk
pub struct CacheFile {
    file_path:   PathBuf,
    /// Location of the file relative to the destination directory
    output_path: PathBuf
}

impl CacheFile {
    pub fn new(file_path: PathBuf) -> CacheFile {
        let output_path = file_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| file_path.clone());

        CacheFile {
            file_path,
            output_path
        }
    }
    pub fn path(&self) -> &Path {
        &self.file_path
    }
    /// Place the outputs of this file at `output_path` below the destination
    ///
    /// Files with the same name in different directories keep apart this way
    #[must_use]
    pub fn with_output_path(mut self, output_path: PathBuf) -> CacheFile {
        self.output_path = output_path;
        self
    }
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
    /// Directory below the destination that receives the outputs
    pub fn output_directory(&self) -> &Path {
        self.output_path.parent().unwrap_or_else(|| Path::new(""))
    }
    /// File name used to name outputs and to guess tile depths
    pub fn name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.to_string_lossy().into_owned())
    }
    /// Read the whole file to memory
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        let mut contents = Vec::new();
        BufReader::new(File::open(&self.file_path)?).read_to_end(&mut contents)?;
        Ok(contents)
    }
}

/// Write `data` to a newly created (or truncated) file at `path`
///
/// The file is closed before returning
pub fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(data)?;
    writer.flush()
}
