/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grid composite of the tiles recovered from one container

use bmc_core::log::warn;

use crate::container::{ContainerKind, TILE_DIMENSION};
use crate::pixels::with_palette;
use crate::tile::{PixelLayout, TileImage};

/// Number of tiles per collage row unless told otherwise
pub const DEFAULT_STRIPE_WIDTH: usize = 64;

/// Builds one image holding every tile on a grid of 64x64 blocks
///
/// Tiles smaller than a block are padded with filler, the last row of
/// the grid is completed with blank blocks. BIN containers store
/// tiles right to left so their rows are reversed.
///
/// # Example
/// ```
/// use bmc_cache::{CollageBuilder, ContainerKind, PixelLayout, TileImage};
///
/// let tile = TileImage::new(64, 64, PixelLayout::Bgra, vec![0; 64 * 64 * 4]);
/// let tiles = vec![tile.clone(), tile.clone(), tile];
///
/// let collage = CollageBuilder::new(ContainerKind::Bmc)
///     .set_stripe_width(2)
///     .build(&tiles)
///     .unwrap();
///
/// assert_eq!(collage.width(), 128);
/// assert_eq!(collage.height(), 128);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct CollageBuilder {
    kind:         ContainerKind,
    stripe_width: usize
}

impl CollageBuilder {
    pub fn new(kind: ContainerKind) -> CollageBuilder {
        CollageBuilder {
            kind,
            stripe_width: DEFAULT_STRIPE_WIDTH
        }
    }
    /// Set the number of tiles per row, at least one
    #[must_use]
    pub fn set_stripe_width(mut self, tiles: usize) -> Self {
        self.stripe_width = tiles.max(1);
        self
    }
    pub const fn stripe_width(&self) -> usize {
        self.stripe_width
    }

    /// Arrange `tiles` on the grid
    ///
    /// The pixel layout of the first tile is used for the collage, tiles with
    /// a different layout are left out. Returns `None` when there is nothing
    /// to arrange.
    pub fn build<'t, I>(&self, tiles: I) -> Option<TileImage>
    where
        I: IntoIterator<Item = &'t TileImage>
    {
        let mut tiles = tiles.into_iter().peekable();
        let layout = tiles.peek()?.layout();

        let mut blocks: Vec<Vec<u8>> = tiles
            .enumerate()
            .filter_map(|(position, tile)| {
                if tile.layout() == layout {
                    Some(pad_block(tile))
                } else {
                    warn!(
                        "Leaving tile {} out of the collage, {:?} pixels don't match {:?}",
                        position,
                        tile.layout(),
                        layout
                    );
                    None
                }
            })
            .collect();

        let row = TILE_DIMENSION * layout.bytes_per_pixel();
        let block_size = row * TILE_DIMENSION;
        let stripes = blocks.len().div_ceil(self.stripe_width);

        blocks.resize(stripes * self.stripe_width, vec![layout.filler(); block_size]);

        let mut pixels = Vec::with_capacity(blocks.len() * block_size);

        for stripe in blocks.chunks_exact_mut(self.stripe_width) {
            if self.kind == ContainerKind::Bin {
                stripe.reverse();
            }
            for y in 0..TILE_DIMENSION {
                for block in stripe.iter() {
                    pixels.extend_from_slice(&block[y * row..(y + 1) * row]);
                }
            }
        }
        if layout == PixelLayout::Indexed {
            pixels = with_palette(&pixels);
        }

        Some(TileImage::new(
            TILE_DIMENSION * self.stripe_width,
            TILE_DIMENSION * stripes,
            layout,
            pixels
        ))
    }
}

/// Copy a tile into a 64x64 block, cropping or padding each row
fn pad_block(tile: &TileImage) -> Vec<u8> {
    let layout = tile.layout();
    let row = TILE_DIMENSION * layout.bytes_per_pixel();
    let stride = tile.stride();

    let mut block = vec![layout.filler(); row * TILE_DIMENSION];

    if stride == 0 {
        return block;
    }
    for (target, source) in block
        .chunks_exact_mut(row)
        .zip(tile.data().chunks_exact(stride))
    {
        let width = stride.min(row);
        target[..width].copy_from_slice(&source[..width]);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::CollageBuilder;
    use crate::container::ContainerKind;
    use crate::pixels::with_palette;
    use crate::tile::{PixelLayout, TileImage};

    fn indexed(width: usize, height: usize, index: u8) -> TileImage {
        TileImage::new(width, height, PixelLayout::Indexed, with_palette(&vec![index; width * height]))
    }

    /// First byte of every 64x64 block on the bottom row of blocks
    fn first_row_markers(collage: &TileImage, blocks: usize) -> Vec<u8> {
        (0..blocks).map(|block| collage.data()[block * 64]).collect()
    }

    #[test]
    fn bmc_tiles_keep_their_order() {
        let tiles = [indexed(64, 64, 1), indexed(64, 64, 2), indexed(64, 64, 3)];
        let collage = CollageBuilder::new(ContainerKind::Bmc)
            .set_stripe_width(2)
            .build(&tiles)
            .unwrap();

        assert_eq!((collage.width(), collage.height()), (128, 128));
        assert_eq!(collage.pixels().len(), 1024 + 128 * 128);
        assert_eq!(first_row_markers(&collage, 2), [1, 2]);

        // second stripe starts after 64 rows of 128 pixels
        let second = &collage.data()[64 * 128..];
        assert_eq!((second[0], second[64]), (3, 0xFF));
    }

    #[test]
    fn bin_stripes_are_reversed() {
        let tiles = [indexed(64, 64, 1), indexed(64, 64, 2), indexed(64, 64, 3)];
        let collage = CollageBuilder::new(ContainerKind::Bin)
            .set_stripe_width(2)
            .build(&tiles)
            .unwrap();

        assert_eq!(first_row_markers(&collage, 2), [2, 1]);

        let second = &collage.data()[64 * 128..];
        assert_eq!((second[0], second[64]), (0xFF, 3));
    }

    #[test]
    fn small_tiles_are_padded() {
        let tiles = [indexed(2, 1, 7)];
        let collage = CollageBuilder::new(ContainerKind::Bmc)
            .set_stripe_width(1)
            .build(&tiles)
            .unwrap();
        let data = collage.data();

        assert_eq!(&data[..3], &[7, 7, 0xFF]);
        assert!(data[64..].iter().all(|&index| index == 0xFF));
    }

    #[test]
    fn mismatched_layouts_are_left_out() {
        let color = TileImage::new(64, 64, PixelLayout::Bgra, vec![0; 64 * 64 * 4]);
        let tiles = [indexed(64, 64, 1), color, indexed(64, 64, 2)];

        let collage = CollageBuilder::new(ContainerKind::Bmc)
            .set_stripe_width(4)
            .build(&tiles)
            .unwrap();

        assert_eq!(collage.layout(), PixelLayout::Indexed);
        assert_eq!(first_row_markers(&collage, 3), [1, 2, 0xFF]);
    }

    #[test]
    fn nothing_to_arrange() {
        let tiles: [TileImage; 0] = [];
        assert!(CollageBuilder::new(ContainerKind::Bmc).build(&tiles).is_none());
        assert_eq!(CollageBuilder::new(ContainerKind::Bmc).set_stripe_width(0).stripe_width(), 1);
    }
}
