/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports)]

use std::fs::read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod cache;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonContainer {
    Bin,
    Bmc
}

/// A tile of a synthetic container
#[derive(Copy, Clone, Deserialize, Debug)]
pub struct JsonTile {
    pub width:      u16,
    pub height:     u16,
    pub bpp:        usize,
    /// Seed of the pixel pattern
    pub fill:       u8,
    #[serde(default)]
    pub compressed: bool
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    /// File name handed to the decoder
    pub name:           String,
    pub container:      JsonContainer,
    pub tiles:          Vec<JsonTile>,
    pub expected_tiles: usize,
    pub comment:        Option<String>
}

pub fn manifest_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cache.json")
}

pub fn load_manifest() -> Vec<TestEntry> {
    let json_file = read(manifest_path()).unwrap();
    serde_json::from_slice(&json_file).unwrap()
}

/// Pixel bytes of a tile, a ramp starting at the tile's seed
fn pattern(seed: u8, len: usize) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

/// Build the container `entry` describes
pub fn build_container(entry: &TestEntry) -> Vec<u8> {
    let mut file = Vec::new();

    if entry.container == JsonContainer::Bin {
        file.extend_from_slice(b"RDP8bmp\0");
        file.extend_from_slice(&6_u32.to_le_bytes());
    }
    for (index, tile) in entry.tiles.iter().enumerate() {
        file.extend_from_slice(&0_u32.to_le_bytes());
        file.extend_from_slice(&(index as u32).to_le_bytes());
        file.extend_from_slice(&tile.width.to_le_bytes());
        file.extend_from_slice(&tile.height.to_le_bytes());

        let pixels = usize::from(tile.width) * usize::from(tile.height);

        match (entry.container, tile.compressed) {
            (JsonContainer::Bin, _) => {
                file.extend(pattern(tile.fill, pixels * 4));
            }
            (JsonContainer::Bmc, false) => {
                let length = pixels * tile.bpp;
                file.extend_from_slice(&(length as u32).to_le_bytes());
                file.extend_from_slice(&0_u32.to_le_bytes());
                file.extend(pattern(tile.fill, length.max(64 * 64 * tile.bpp)));
            }
            (JsonContainer::Bmc, true) => {
                // one color run covering the whole tile
                let mut stream = vec![0xF3, 0x00, 0x10];
                stream.extend(pattern(tile.fill, tile.bpp));

                file.extend_from_slice(&(stream.len() as u32).to_le_bytes());
                file.extend_from_slice(&0x08_u32.to_le_bytes());
                file.extend(stream);
            }
        }
    }
    file
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
