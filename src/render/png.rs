//! PNG output for sprite tiles.
//!
//! Encodes tiles through a reusable scratch buffer so a batch of tiles does
//! not allocate a fresh encode buffer per tile. Callers get an owned copy of
//! the encoded bytes.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{CutError, Result};
use crate::types::{PixelBuffer, SpriteTile};

/// PNG encoder with a scratch buffer that is cleared and reused per image.
#[derive(Debug, Default)]
pub struct TileEncoder {
    scratch: Vec<u8>,
}

impl TileEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `pixels` as PNG, returning an owned copy of the bytes.
    pub fn encode(&mut self, pixels: &PixelBuffer) -> Result<Vec<u8>> {
        self.encode_in_place(pixels)?;
        Ok(self.scratch.clone())
    }

    /// Encode `pixels` and write the PNG straight from the scratch buffer.
    pub fn write(&mut self, pixels: &PixelBuffer, path: &Path) -> Result<()> {
        self.encode_in_place(pixels)?;
        fs::write(path, &self.scratch).map_err(|e| CutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
    }

    fn encode_in_place(&mut self, pixels: &PixelBuffer) -> Result<()> {
        self.scratch.clear();
        PngEncoder::new(&mut self.scratch)
            .write_image(
                pixels.as_raw(),
                pixels.width(),
                pixels.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| CutError::Encode {
                message: format!("Failed to encode PNG: {}", e),
            })
    }
}

impl SpriteTile {
    /// Encode this tile's pixels as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        TileEncoder::new().encode(&self.pixels)
    }
}

/// File name for a tile: `<stem>-<index>.png`.
pub fn tile_file_name(stem: &str, index: usize) -> String {
    format!("{}-{}.png", stem, index)
}

/// Write every tile into `dir`, returning the written paths in tile order.
pub fn write_tiles(dir: &Path, stem: &str, tiles: &[SpriteTile]) -> Result<Vec<PathBuf>> {
    let mut encoder = TileEncoder::new();
    let mut written = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let path = dir.join(tile_file_name(stem, tile.index));
        encoder.write(&tile.pixels, &path)?;
        written.push(path);
    }

    Ok(written)
}
