//! Sprite tiles emitted by segmentation.

use std::fmt;

use serde::Serialize;

use super::{PixelBuffer, Region};

/// Which extraction branch produced a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    Single,
    Region,
    Grid,
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OriginKind::Single => "single",
            OriginKind::Region => "region",
            OriginKind::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// One detected sprite: its own copy of the pixels plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteTile {
    pub pixels: PixelBuffer,
    pub source: Option<Region>,
    pub index: usize,
    pub origin: OriginKind,
}

impl SpriteTile {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}
