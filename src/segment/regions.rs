//! Gap-based region finder.
//!
//! Sheets on a transparent background are cut along runs of empty rows and
//! columns. Each gap contributes its midpoint as a cut line; the cross
//! product of the resulting bands gives candidate cells, which are then
//! content-tested, trimmed to their visible pixels, and padded.

use crate::config::Tuning;
use crate::types::{PixelBuffer, Region};

use super::content::region_has_content;

/// Find trimmed, padded, content-filtered sprite regions.
///
/// Returns an empty list when the image has no gaps at all, or when no
/// candidate cell survives filtering.
pub fn find_regions(buffer: &PixelBuffer, tuning: &Tuning) -> Vec<Region> {
    let (width, height) = buffer.dimensions();

    let row_gaps = find_gaps(height, tuning.min_gap, |y| row_is_empty(buffer, y, tuning));
    let col_gaps = find_gaps(width, tuning.min_gap, |x| column_is_empty(buffer, x, tuning));

    if row_gaps.is_empty() && col_gaps.is_empty() {
        return Vec::new();
    }

    let x_bounds = boundaries(&col_gaps, width);
    let y_bounds = boundaries(&row_gaps, height);

    let mut regions = Vec::new();

    for ys in y_bounds.windows(2) {
        for xs in x_bounds.windows(2) {
            let cell = Region::from_bounds(xs[0], ys[0], xs[1], ys[1]);
            if cell.is_empty() {
                continue;
            }

            if !region_has_content(buffer, cell, tuning.region_min_pixels, tuning) {
                continue;
            }

            let Some(content) = content_bounds(buffer, cell, tuning) else {
                continue;
            };

            let trimmed = content.padded(tuning.padding, width, height);
            if trimmed.width > tuning.min_tile_extent && trimmed.height > tuning.min_tile_extent {
                regions.push(trimmed);
            }
        }
    }

    regions
}

/// Midpoints of every maximal run of empty lines at least `min_gap` long.
pub fn find_gaps(len: u32, min_gap: u32, is_empty: impl Fn(u32) -> bool) -> Vec<u32> {
    let mut gaps = Vec::new();
    let mut run_start: Option<u32> = None;

    for i in 0..len {
        match (is_empty(i), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                push_gap(&mut gaps, start, i, min_gap);
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        push_gap(&mut gaps, start, len, min_gap);
    }

    gaps
}

fn push_gap(gaps: &mut Vec<u32>, start: u32, end: u32, min_gap: u32) {
    let run = end - start;
    if run >= min_gap {
        gaps.push(start + run / 2);
    }
}

/// `[0, ...cuts, extent]`, skipping cuts that would produce empty bands.
fn boundaries(cuts: &[u32], extent: u32) -> Vec<u32> {
    let mut bounds = Vec::with_capacity(cuts.len() + 2);
    bounds.push(0);
    for &cut in cuts {
        if cut > 0 && cut < extent {
            bounds.push(cut);
        }
    }
    bounds.push(extent);
    bounds
}

fn row_is_empty(buffer: &PixelBuffer, y: u32, tuning: &Tuning) -> bool {
    (0..buffer.width()).all(|x| buffer.alpha(x, y) <= tuning.visible_alpha)
}

fn column_is_empty(buffer: &PixelBuffer, x: u32, tuning: &Tuning) -> bool {
    (0..buffer.height()).all(|y| buffer.alpha(x, y) <= tuning.visible_alpha)
}

/// Tight bounding box of visible pixels inside `cell`, or `None` if there are none.
fn content_bounds(buffer: &PixelBuffer, cell: Region, tuning: &Tuning) -> Option<Region> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for y in cell.y..cell.bottom() {
        for x in cell.x..cell.right() {
            if buffer.alpha(x, y) > tuning.visible_alpha {
                found = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    found.then(|| Region::from_bounds(min_x, min_y, max_x + 1, max_y + 1))
}
