//! Fixed-size grid detection and cell extraction.
//!
//! Detection is a coarse divisibility check against a short list of common
//! tile sizes. It never tries to infer irregular or non-divisor grids.

use serde::Serialize;

use crate::config::{SegmenterConfig, Tuning};
use crate::types::{OriginKind, PixelBuffer, Region, SpriteTile};

use super::content::region_has_content;

/// A uniform grid of square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl GridSpec {
    pub fn cell_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Pixel bounds of the cell at `(col, row)`.
    pub fn cell(&self, col: u32, row: u32) -> Region {
        Region::new(
            col * self.cell_size,
            row * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.cell(col, row)))
    }
}

/// Pick a grid for a `width x height` image.
///
/// The first size in `sizes` that divides both dimensions decides: its
/// grid is accepted if it has at least two columns and a cell count in
/// `[2, max_cells]`, otherwise there is no grid.
pub fn detect_grid(width: u32, height: u32, sizes: &[u32], max_cells: u32) -> Option<GridSpec> {
    let cell_size = sizes
        .iter()
        .copied()
        .find(|&size| size > 0 && width % size == 0 && height % size == 0)?;

    let grid = GridSpec {
        cols: width / cell_size,
        rows: height / cell_size,
        cell_size,
    };

    let accepted = grid.cols >= 2 && grid.rows >= 1 && (2..=max_cells).contains(&grid.cell_count());
    accepted.then_some(grid)
}

/// Crop every grid cell that passes the content test, in row-major order.
///
/// Indices are assigned to accepted tiles only, and extraction stops once
/// `max_sprites` tiles have been produced.
pub fn extract_grid_cells(
    buffer: &PixelBuffer,
    grid: &GridSpec,
    config: &SegmenterConfig,
) -> Vec<SpriteTile> {
    let tuning: &Tuning = &config.tuning;
    let mut tiles = Vec::new();

    for cell in grid.cells() {
        if tiles.len() >= config.max_sprites {
            break;
        }

        if cell.width <= tuning.min_tile_extent || cell.height <= tuning.min_tile_extent {
            continue;
        }

        if !region_has_content(buffer, cell, config.min_pixel_threshold, tuning) {
            continue;
        }

        let Some(pixels) = buffer.crop(cell) else {
            continue;
        };

        tiles.push(SpriteTile {
            pixels,
            source: Some(cell),
            index: tiles.len(),
            origin: OriginKind::Grid,
        });
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRID_SIZES, MAX_GRID_CELLS};
    use image::{Rgba, RgbaImage};

    fn detect(w: u32, h: u32) -> Option<GridSpec> {
        detect_grid(w, h, &GRID_SIZES, MAX_GRID_CELLS)
    }

    #[test]
    fn test_largest_divisor_wins() {
        assert_eq!(
            detect(512, 256),
            Some(GridSpec { cols: 4, rows: 2, cell_size: 128 })
        );
    }

    #[test]
    fn test_skips_non_divisors() {
        // 288 = 3 * 96, 192 = 2 * 96; 128 divides neither
        assert_eq!(
            detect(288, 192),
            Some(GridSpec { cols: 3, rows: 2, cell_size: 96 })
        );
    }

    #[test]
    fn test_single_column_rejected() {
        // 128 divides both but yields one column
        assert_eq!(detect(128, 512), None);
    }

    #[test]
    fn test_too_many_cells_rejected() {
        // 128 -> 16x16 = 256 cells
        assert_eq!(detect(2048, 2048), None);
    }

    #[test]
    fn test_cell_cap_is_inclusive() {
        assert_eq!(
            detect(1024, 1024),
            Some(GridSpec { cols: 8, rows: 8, cell_size: 128 })
        );
    }

    #[test]
    fn test_no_divisor() {
        assert_eq!(detect(301, 250), None);
    }

    #[test]
    fn test_hint_first() {
        let sizes = [64, 128, 96, 48, 32, 16];
        assert_eq!(
            detect_grid(256, 128, &sizes, 64),
            Some(GridSpec { cols: 4, rows: 2, cell_size: 64 })
        );
    }

    #[test]
    fn test_cells_row_major() {
        let grid = GridSpec { cols: 2, rows: 2, cell_size: 16 };
        let cells: Vec<Region> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Region::new(0, 0, 16, 16),
                Region::new(16, 0, 16, 16),
                Region::new(0, 16, 16, 16),
                Region::new(16, 16, 16, 16),
            ]
        );
    }

    fn sheet_with_filled_cells(grid: &GridSpec, filled: &[(u32, u32)]) -> PixelBuffer {
        let w = grid.cols * grid.cell_size;
        let h = grid.rows * grid.cell_size;
        let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
        for &(col, row) in filled {
            let cell = grid.cell(col, row);
            for y in cell.y + 4..cell.bottom() - 4 {
                for x in cell.x + 4..cell.right() - 4 {
                    img.put_pixel(x, y, Rgba([40, 160, 40, 255]));
                }
            }
        }
        PixelBuffer::from_image(img).unwrap()
    }

    #[test]
    fn test_extract_skips_empty_cells_without_index_gaps() {
        let grid = GridSpec { cols: 3, rows: 2, cell_size: 32 };
        let buf = sheet_with_filled_cells(&grid, &[(0, 0), (2, 0), (1, 1)]);

        let tiles = extract_grid_cells(&buf, &grid, &SegmenterConfig::default());

        assert_eq!(tiles.len(), 3);
        let indices: Vec<usize> = tiles.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(tiles[0].source, Some(grid.cell(0, 0)));
        assert_eq!(tiles[1].source, Some(grid.cell(2, 0)));
        assert_eq!(tiles[2].source, Some(grid.cell(1, 1)));
        assert!(tiles.iter().all(|t| t.origin == OriginKind::Grid));
        assert!(tiles.iter().all(|t| (t.width(), t.height()) == (32, 32)));
    }

    #[test]
    fn test_extract_respects_max_sprites() {
        let grid = GridSpec { cols: 4, rows: 1, cell_size: 32 };
        let buf = sheet_with_filled_cells(&grid, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        let config = SegmenterConfig {
            max_sprites: 2,
            ..Default::default()
        };

        let tiles = extract_grid_cells(&buf, &grid, &config);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].source, Some(grid.cell(1, 0)));
    }
}
