//! spritecut - Sprite sheet segmentation
//!
//! A library for splitting uploaded sprite images into clean sprite tiles:
//! deciding whether an image holds one sprite or a sheet, finding sprite
//! boundaries from transparent gaps or a fixed grid, and cropping each
//! sprite out with padding.

pub mod cli;
pub mod colours;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod segment;
pub mod types;

pub use colours::{summarize_colours, ColourName, ColourShare};
pub use config::{SegmenterConfig, Tuning};
pub use error::{CutError, Result};
pub use render::{write_tiles, TileEncoder, TileManifest};
pub use segment::{
    Classification, Detection, GridSpec, ImageStatistics, RuleName, Segmentation, Segmenter,
};
pub use types::{Colour, OriginKind, PixelBuffer, Region, SpriteTile};
