//! Core domain types for spritecut.
//!
//! - `Colour` - RGBA colour values
//! - `PixelBuffer` - immutable decoded rasters
//! - `Region` - rectangles in source-image coordinates
//! - `SpriteTile` - cropped sprites emitted by segmentation

mod colour;
mod pixel;
mod region;
mod tile;

pub use colour::Colour;
pub use pixel::PixelBuffer;
pub use region::Region;
pub use tile::{OriginKind, SpriteTile};
