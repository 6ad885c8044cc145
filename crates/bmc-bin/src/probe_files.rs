/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::file_io::CacheFile;
use crate::workflow::WorkflowErrors;

/// Extensions of files considered cache containers when walking a directory
const CACHE_EXTENSIONS: [&str; 2] = ["bin", "bmc"];

fn is_cache_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            CACHE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Expand the sources given on the command line into the list of files to process
///
/// Files are taken as they are, directories are walked recursively for
/// `.bin` and `.bmc` files. Every file keeps its path relative to the parent
/// of its source as output path, so equally named files found in different
/// directories don't overwrite each other's outputs.
pub fn collect_source_files(sources: &[PathBuf]) -> Result<Vec<CacheFile>, WorkflowErrors> {
    let mut files = Vec::new();
    let mut seen_paths = HashSet::new();
    let mut seen_outputs = HashSet::new();

    for (index, source) in sources.iter().enumerate() {
        let found = if source.is_file() {
            info!("Processing a single file: {:?}", source);
            vec![CacheFile::new(source.clone())]
        } else if source.is_dir() {
            info!("Processing directory {:?}", source);
            let found = walk_directory(source);

            if found.is_empty() {
                return Err(WorkflowErrors::NoCandidates(source.clone()));
            }
            found
        } else {
            return Err(WorkflowErrors::InvalidSource(source.clone()));
        };

        for file in found {
            if !seen_paths.insert(file.path().to_path_buf()) {
                debug!("Skipping {:?}, it was already given", file.path());
                continue;
            }
            let file = if seen_outputs.contains(file.output_path()) {
                // same relative path under another source
                let output = Path::new(&format!("src{index}")).join(file.output_path());
                warn!("Outputs of {:?} are stored under {:?}", file.path(), output);
                file.with_output_path(output)
            } else {
                file
            };
            seen_outputs.insert(file.output_path().to_path_buf());
            files.push(file);
        }
    }
    Ok(files)
}

fn walk_directory(root: &Path) -> Vec<CacheFile> {
    let base = root.parent().unwrap_or_else(|| Path::new(""));
    let mut found = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Walk error: {}", err);
                continue;
            }
        };
        if entry.file_type().is_file() && is_cache_file(entry.path()) {
            debug!("File {:?} has been found", entry.path());

            // only plain components, the output must stay below the destination
            let output: PathBuf = entry
                .path()
                .strip_prefix(base)
                .unwrap_or_else(|_| Path::new(entry.file_name()))
                .components()
                .filter(|part| matches!(part, Component::Normal(_)))
                .collect();

            let output = if output.as_os_str().is_empty() {
                PathBuf::from(entry.file_name())
            } else {
                output
            };
            found.push(CacheFile::new(entry.into_path()).with_output_path(output));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{collect_source_files, is_cache_file};
    use crate::workflow::WorkflowErrors;

    #[test]
    fn extensions_ignore_case() {
        assert!(is_cache_file(Path::new("Cache0000.BIN")));
        assert!(is_cache_file(Path::new("dir/bcache24.bmc")));
        assert!(!is_cache_file(Path::new("bcache24.bmc.bak")));
        assert!(!is_cache_file(Path::new("bmc")));
    }

    #[test]
    fn directories_are_walked() {
        let root = std::env::temp_dir().join(format!("bmc-probe-{}", std::process::id()));
        let nested = root.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("Cache0000.bin"), b"").unwrap();
        fs::write(nested.join("bcache22.BMC"), b"").unwrap();
        fs::write(nested.join("notes.txt"), b"").unwrap();

        let files = collect_source_files(&[root.clone()]).unwrap();
        let paths: Vec<&Path> = files.iter().map(|file| file.path()).collect();
        assert_eq!(paths, [root.join("Cache0000.bin"), nested.join("bcache22.BMC")]);

        let root_name = PathBuf::from(root.file_name().unwrap());
        assert_eq!(files[0].output_path(), root_name.join("Cache0000.bin"));
        assert_eq!(files[1].output_path(), root_name.join("nested/bcache22.BMC"));
        assert_eq!(files[1].output_directory(), root_name.join("nested"));

        let empty = root.join("empty");
        fs::create_dir_all(&empty).unwrap();
        assert!(matches!(
            collect_source_files(&[empty]),
            Err(WorkflowErrors::NoCandidates(_))
        ));
        assert!(matches!(
            collect_source_files(&[root.join("missing")]),
            Err(WorkflowErrors::InvalidSource(_))
        ));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn files_are_taken_as_given() {
        let root = std::env::temp_dir().join(format!("bmc-probe-file-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        let file: PathBuf = root.join("capture.dat");
        fs::write(&file, b"").unwrap();

        let files = collect_source_files(&[file.clone(), file.clone()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), file);
        assert_eq!(files[0].output_path(), Path::new("capture.dat"));
        assert_eq!(files[0].output_directory(), Path::new(""));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn equal_names_get_distinct_outputs() {
        let root = std::env::temp_dir().join(format!("bmc-probe-names-{}", std::process::id()));
        let (first, second) = (root.join("one/profile"), root.join("two/profile"));
        fs::create_dir_all(first.join("userA")).unwrap();
        fs::create_dir_all(first.join("userB")).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("userA/bcache2.bmc"), b"").unwrap();
        fs::write(first.join("userB/bcache2.bmc"), b"").unwrap();
        fs::write(second.join("bcache2.bmc"), b"").unwrap();
        fs::write(second.join("Cache0000.bin"), b"").unwrap();
        fs::write(first.join("bcache2.bmc"), b"").unwrap();

        let files = collect_source_files(&[first, second]).unwrap();
        let outputs: Vec<&Path> = files.iter().map(|file| file.output_path()).collect();

        assert_eq!(
            outputs,
            [
                Path::new("profile/bcache2.bmc"),
                Path::new("profile/userA/bcache2.bmc"),
                Path::new("profile/userB/bcache2.bmc"),
                // uppercase sorts first
                Path::new("profile/Cache0000.bin"),
                Path::new("src1/profile/bcache2.bmc")
            ]
        );

        fs::remove_dir_all(&root).unwrap();
    }
}
