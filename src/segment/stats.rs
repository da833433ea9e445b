//! Whole-image transparency statistics.

use serde::Serialize;

use crate::config::Tuning;
use crate::types::PixelBuffer;

/// Read-only transparency summary of one source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageStatistics {
    pub transparent_ratio: f64,
    pub edge_transparent_ratio: f64,
    pub has_transparency: bool,
    pub has_transparent_edges: bool,
}

/// Count transparent pixels over the whole image and within the border band.
///
/// A single pass; the border band is every pixel within `edge_band` of any
/// side, so images thinner than twice the band are all border.
pub fn compute_statistics(buffer: &PixelBuffer, tuning: &Tuning) -> ImageStatistics {
    let (width, height) = buffer.dimensions();
    let band = tuning.edge_band;

    let mut transparent = 0u64;
    let mut edge_total = 0u64;
    let mut edge_transparent = 0u64;

    for y in 0..height {
        let edge_row = y < band || y >= height.saturating_sub(band);
        for x in 0..width {
            let is_transparent = buffer.alpha(x, y) < tuning.transparent_alpha;
            if is_transparent {
                transparent += 1;
            }

            if edge_row || x < band || x >= width.saturating_sub(band) {
                edge_total += 1;
                if is_transparent {
                    edge_transparent += 1;
                }
            }
        }
    }

    let transparent_ratio = ratio(transparent, buffer.pixel_count());
    let edge_transparent_ratio = ratio(edge_transparent, edge_total);

    ImageStatistics {
        transparent_ratio,
        edge_transparent_ratio,
        has_transparency: transparent_ratio > tuning.transparency_ratio,
        has_transparent_edges: edge_transparent_ratio > tuning.edge_transparency_ratio,
    }
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn buffer(img: RgbaImage) -> PixelBuffer {
        PixelBuffer::from_image(img).unwrap()
    }

    #[test]
    fn test_fully_opaque() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let stats = compute_statistics(&buffer(img), &Tuning::default());

        assert_eq!(stats.transparent_ratio, 0.0);
        assert_eq!(stats.edge_transparent_ratio, 0.0);
        assert!(!stats.has_transparency);
        assert!(!stats.has_transparent_edges);
    }

    #[test]
    fn test_fully_transparent() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        let stats = compute_statistics(&buffer(img), &Tuning::default());

        assert_eq!(stats.transparent_ratio, 1.0);
        assert_eq!(stats.edge_transparent_ratio, 1.0);
        assert!(stats.has_transparency);
        assert!(stats.has_transparent_edges);
    }

    #[test]
    fn test_opaque_centre_transparent_border() {
        // 20x20: 10x10 opaque block in the middle, border band untouched
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        for y in 5..15 {
            for x in 5..15 {
                img.put_pixel(x, y, Rgba([200, 10, 10, 255]));
            }
        }
        let stats = compute_statistics(&buffer(img), &Tuning::default());

        assert_eq!(stats.transparent_ratio, 0.75);
        assert_eq!(stats.edge_transparent_ratio, 1.0);
    }

    #[test]
    fn test_alpha_threshold_is_exclusive() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 128]));
        let stats = compute_statistics(&buffer(img), &Tuning::default());
        assert_eq!(stats.transparent_ratio, 0.0);

        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 127]));
        let stats = compute_statistics(&buffer(img), &Tuning::default());
        assert_eq!(stats.transparent_ratio, 1.0);
    }

    #[test]
    fn test_tiny_image_is_all_border() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let stats = compute_statistics(&buffer(img), &Tuning::default());
        assert_eq!(stats.edge_transparent_ratio, 1.0);
    }
}
