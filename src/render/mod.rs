//! Rendering module for spritecut.
//!
//! Encodes tiles to PNG and describes segmentations as JSON manifests.

mod manifest;
mod png;

pub use manifest::{manifest_file_name, TileEntry, TileManifest};
pub use png::{tile_file_name, write_tiles, TileEncoder};
