//! Sprite sheet segmentation.
//!
//! Turns a decoded image into sprite tiles:
//!
//! 1. `stats` samples transparency over the whole image and its border.
//! 2. `classify` runs the rule chain to decide single / regions / grid.
//! 3. Regions are cropped as found; grid cells are content-filtered and cropped.
//!
//! Segmentation is deterministic and infallible. An image that yields no
//! tiles is a valid outcome, not an error.

pub mod classify;
pub mod content;
pub mod grid;
pub mod regions;
pub mod stats;

pub use classify::{classify, classify_with, Classification, Detection, Rule, RuleName, RULES};
pub use content::{count_content, has_content, region_has_content, ContentCounts};
pub use grid::{detect_grid, extract_grid_cells, GridSpec};
pub use regions::{find_gaps, find_regions};
pub use stats::{compute_statistics, ImageStatistics};

use crate::config::SegmenterConfig;
use crate::types::{OriginKind, PixelBuffer, Region, SpriteTile};

/// Everything learned about one source image.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub statistics: ImageStatistics,
    pub detection: Detection,
    pub rule: RuleName,
    pub tiles: Vec<SpriteTile>,
}

impl Segmentation {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Sprite sheet segmenter. Holds configuration only; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Statistics for `buffer` under this segmenter's thresholds.
    pub fn statistics(&self, buffer: &PixelBuffer) -> ImageStatistics {
        compute_statistics(buffer, &self.config.tuning)
    }

    /// Classify without extracting tiles.
    pub fn classify(&self, buffer: &PixelBuffer) -> Classification {
        let stats = self.statistics(buffer);
        classify(buffer, &stats, &self.config)
    }

    /// Content test with the configured visible-pixel floor.
    pub fn has_content(&self, buffer: &PixelBuffer) -> bool {
        has_content(buffer, self.config.min_pixel_threshold, &self.config.tuning)
    }

    /// Classify `buffer` and extract its tiles.
    pub fn segment(&self, buffer: &PixelBuffer) -> Segmentation {
        let statistics = self.statistics(buffer);
        let Classification { detection, rule } = classify(buffer, &statistics, &self.config);

        let tiles = match &detection {
            Detection::Single => self.single_tile(buffer).into_iter().collect(),
            Detection::Regions { regions } => self.region_tiles(buffer, regions),
            Detection::Grid(grid) => extract_grid_cells(buffer, grid, &self.config),
        };

        Segmentation {
            statistics,
            detection,
            rule,
            tiles,
        }
    }

    /// The whole image as one tile, unless it is too small to be a sprite.
    pub fn single_tile(&self, buffer: &PixelBuffer) -> Option<SpriteTile> {
        let min = self.config.tuning.min_tile_extent;
        if buffer.width() <= min || buffer.height() <= min {
            return None;
        }

        Some(SpriteTile {
            pixels: buffer.clone(),
            source: Some(buffer.bounds()),
            index: 0,
            origin: OriginKind::Single,
        })
    }

    /// Crop found regions, keeping only those that pass the full content test.
    fn region_tiles(&self, buffer: &PixelBuffer, regions: &[Region]) -> Vec<SpriteTile> {
        let tuning = &self.config.tuning;
        let mut tiles = Vec::with_capacity(regions.len());

        for &region in regions {
            if !region_has_content(buffer, region, self.config.min_pixel_threshold, tuning) {
                continue;
            }

            let Some(pixels) = buffer.crop(region) else {
                continue;
            };

            tiles.push(SpriteTile {
                pixels,
                source: Some(region),
                index: tiles.len(),
                origin: OriginKind::Region,
            });
        }

        tiles
    }
}
