/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use bmc_cache::{
    BmpEncoder, CacheDecoder, CollageBuilder, ContainerKind, PixelLayout, TileImage
};
use bmc_core::options::DecoderOptions;

use crate::{build_container, hash, load_manifest, JsonContainer, TestEntry};

/// Decode a container and encode every tile as a bitmap
fn decode_to_bitmaps(entry: &TestEntry, options: DecoderOptions) -> Vec<Vec<u8>> {
    let container = build_container(entry);

    let mut decoder = CacheDecoder::new_with_options(&container, options);
    decoder.set_file_name(&entry.name);

    decoder
        .decode()
        .unwrap()
        .iter()
        .map(|tile| BmpEncoder::new(&tile.primary).encode().unwrap())
        .collect()
}

fn expected_bitmap_size(width: usize, height: usize, layout: PixelLayout) -> usize {
    match layout {
        PixelLayout::Indexed => 0x436 + ((width + 3) & !3) * height,
        PixelLayout::Bgra => 0x7A + width * 4 * height
    }
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_manifest() {
    let mut error = false;
    let mut failed = Vec::new();

    for entry in load_manifest() {
        let bitmaps = decode_to_bitmaps(&entry, DecoderOptions::default());

        if bitmaps.len() != entry.expected_tiles {
            error = true;
            eprintln!(
                "Tile count mismatch for {} ({})\nExpected {} but found {}\nConfig:{:#?}\n",
                entry.name,
                entry.comment.as_deref().unwrap_or("no comment"),
                entry.expected_tiles,
                bitmaps.len(),
                entry
            );
            failed.push(entry.name.clone());
            continue;
        }
        for (bitmap, tile) in bitmaps.iter().zip(&entry.tiles) {
            let (width, height) = if tile.compressed {
                (64, 64)
            } else {
                (usize::from(tile.width), usize::from(tile.height))
            };
            let layout = if tile.bpp == 1 {
                PixelLayout::Indexed
            } else {
                PixelLayout::Bgra
            };
            if bitmap.len() != expected_bitmap_size(width, height, layout) {
                error = true;
                eprintln!("Bitmap size mismatch for {}\nConfig:{:#?}\n", entry.name, tile);
                failed.push(entry.name.clone());
            }
        }
    }
    if error {
        panic!("Errors found during test decoding\n {:#?}", failed);
    }
}

#[test]
fn decoding_is_deterministic() {
    for entry in load_manifest() {
        let first: Vec<u128> = decode_to_bitmaps(&entry, DecoderOptions::default())
            .iter()
            .map(|bitmap| hash(bitmap))
            .collect();
        let second: Vec<u128> = decode_to_bitmaps(&entry, DecoderOptions::default())
            .iter()
            .map(|bitmap| hash(bitmap))
            .collect();

        assert_eq!(first, second, "{} decoded differently", entry.name);
    }
}

#[test]
fn tile_cap_applies_to_every_file() {
    let options = DecoderOptions::default().set_max_tiles(1);

    for entry in load_manifest() {
        assert_eq!(decode_to_bitmaps(&entry, options).len(), 1, "{}", entry.name);
    }
}

#[test]
fn old_data_follows_short_tiles() {
    let entry = load_manifest()
        .into_iter()
        .find(|entry| entry.name == "bcache22.bmc")
        .unwrap();
    let container = build_container(&entry);

    let options = DecoderOptions::default().set_keep_secondary(true);
    let mut decoder = CacheDecoder::new_with_options(&container, options);
    decoder.set_file_name(&entry.name);
    let tiles = decoder.decode().unwrap();

    // 64x40 leaves 24 rows of its slot
    let old = tiles[0].secondary.as_ref().unwrap();
    assert_eq!((old.width(), old.height()), (64, 24));
    assert!(tiles[1..].iter().all(|tile| tile.secondary.is_none()));
}

#[test]
fn collage_dimensions() {
    for entry in load_manifest() {
        let container = build_container(&entry);
        let mut decoder = CacheDecoder::new(&container);
        decoder.set_file_name(&entry.name);

        let kind = match entry.container {
            JsonContainer::Bin => ContainerKind::Bin,
            JsonContainer::Bmc => ContainerKind::Bmc
        };
        let tiles = decoder.decode().unwrap();
        let images: Vec<&TileImage> = tiles.iter().map(|tile| &tile.primary).collect();

        for stripe in [1, 2, 64] {
            let collage = CollageBuilder::new(kind)
                .set_stripe_width(stripe)
                .build(images.iter().copied())
                .unwrap();

            assert_eq!(collage.width(), 64 * stripe);
            assert_eq!(collage.height(), 64 * images.len().div_ceil(stripe));

            let bmp = BmpEncoder::new(&collage).encode().unwrap();
            assert_eq!(
                bmp.len(),
                expected_bitmap_size(collage.width(), collage.height(), collage.layout())
            );
        }
    }
}
