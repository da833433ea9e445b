//! Segmenter configuration (spritecut.yaml).
//!
//! Every threshold the segmenter uses lives here as a named default so it
//! can be overridden from a config file without touching the algorithms.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CutError, Result};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "spritecut.yaml";

pub const DEFAULT_CELL_SIZE: u32 = 64;
pub const DEFAULT_MIN_PIXEL_THRESHOLD: u32 = 500;
pub const DEFAULT_MAX_SPRITES: usize = 64;

/// Alpha below this counts as transparent for image statistics.
pub const TRANSPARENT_ALPHA: u8 = 128;
/// Alpha above this counts as visible content.
pub const VISIBLE_ALPHA: u8 = 50;
/// Width of the border band sampled for edge transparency.
pub const EDGE_BAND: u32 = 5;
pub const TRANSPARENCY_RATIO: f64 = 0.05;
pub const EDGE_TRANSPARENCY_RATIO: f64 = 0.5;
/// Images narrower and shorter than this are always one sprite.
pub const SMALL_IMAGE: u32 = 200;
/// Shortest run of empty rows/columns that separates two sprites.
pub const MIN_GAP: u32 = 8;
pub const PADDING: u32 = 2;
/// Tiles must be strictly larger than this on both axes.
pub const MIN_TILE_EXTENT: u32 = 10;
pub const REGION_MIN_PIXELS: u32 = 100;
pub const MIN_COLOURED_PIXELS: u32 = 50;
pub const COLOUR_TOLERANCE: u8 = 15;
pub const MAX_REGIONS: usize = 20;
pub const MAX_GRID_CELLS: u32 = 64;
pub const GRID_SIZES: [u32; 6] = [128, 96, 64, 48, 32, 16];

/// Top-level segmenter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Preferred grid cell size, tried before the fixed candidate list.
    ///
    /// The first candidate that divides both image dimensions decides, so a
    /// hint that fits wins outright: with the default of 64 a 512x256 sheet
    /// is an 8x4 grid of 64px cells, never 4x2 at 128. Set it to 0 to use
    /// the fixed list alone.
    pub cell_size: u32,

    /// Visible-pixel floor for the content test on tiles.
    pub min_pixel_threshold: u32,

    /// Hard cap on tiles extracted from a grid.
    pub max_sprites: usize,

    /// Heuristic thresholds.
    pub tuning: Tuning,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            min_pixel_threshold: DEFAULT_MIN_PIXEL_THRESHOLD,
            max_sprites: DEFAULT_MAX_SPRITES,
            tuning: Tuning::default(),
        }
    }
}

/// Empirical thresholds for statistics, gap detection and grid detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub transparent_alpha: u8,
    pub visible_alpha: u8,
    pub edge_band: u32,
    pub transparency_ratio: f64,
    pub edge_transparency_ratio: f64,
    pub small_image: u32,
    pub min_gap: u32,
    pub padding: u32,
    pub min_tile_extent: u32,
    pub region_min_pixels: u32,
    pub min_coloured_pixels: u32,
    pub colour_tolerance: u8,
    pub max_regions: usize,
    pub max_grid_cells: u32,
    pub grid_sizes: Vec<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            transparent_alpha: TRANSPARENT_ALPHA,
            visible_alpha: VISIBLE_ALPHA,
            edge_band: EDGE_BAND,
            transparency_ratio: TRANSPARENCY_RATIO,
            edge_transparency_ratio: EDGE_TRANSPARENCY_RATIO,
            small_image: SMALL_IMAGE,
            min_gap: MIN_GAP,
            padding: PADDING,
            min_tile_extent: MIN_TILE_EXTENT,
            region_min_pixels: REGION_MIN_PIXELS,
            min_coloured_pixels: MIN_COLOURED_PIXELS,
            colour_tolerance: COLOUR_TOLERANCE,
            max_regions: MAX_REGIONS,
            max_grid_cells: MAX_GRID_CELLS,
            grid_sizes: GRID_SIZES.to_vec(),
        }
    }
}

impl SegmenterConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| CutError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `spritecut.yaml` from `dir` if present, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the segmenter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_sprites == 0 {
            return Err(invalid("max_sprites must be at least 1"));
        }

        let tuning = &self.tuning;
        if tuning.grid_sizes.is_empty() {
            return Err(invalid("tuning.grid_sizes must list at least one cell size"));
        }
        if tuning.grid_sizes.contains(&0) {
            return Err(invalid("tuning.grid_sizes must not contain 0"));
        }
        for (name, ratio) in [
            ("tuning.transparency_ratio", tuning.transparency_ratio),
            ("tuning.edge_transparency_ratio", tuning.edge_transparency_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(invalid(&format!("{} must be between 0 and 1, got {}", name, ratio)));
            }
        }

        Ok(())
    }

    /// Grid cell sizes in the order they are tried: the hint, then the fixed list.
    pub fn grid_candidates(&self) -> Vec<u32> {
        let mut sizes = Vec::with_capacity(self.tuning.grid_sizes.len() + 1);
        if self.cell_size > 0 {
            sizes.push(self.cell_size);
        }
        for &size in &self.tuning.grid_sizes {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
        sizes
    }
}

fn invalid(message: &str) -> CutError {
    CutError::Config {
        message: message.to_string(),
        help: Some(format!("Fix the value in {}", CONFIG_FILE)),
    }
}
