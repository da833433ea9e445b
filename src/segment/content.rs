//! Content test: does a patch hold a real drawn subject?
//!
//! Counts visible pixels and, among those, "coloured" pixels that are not
//! near-white or near-black. A patch full of anti-aliased grey or outline
//! black has plenty of visible pixels but no subject.

use crate::config::Tuning;
use crate::types::{PixelBuffer, Region};

/// Pixel counts gathered by the content test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentCounts {
    pub visible: u32,
    pub coloured: u32,
}

impl ContentCounts {
    /// True when both counts clear their floors.
    pub fn passes(&self, min_visible: u32, min_coloured: u32) -> bool {
        self.visible > min_visible && self.coloured > min_coloured
    }
}

/// Count visible and coloured pixels inside `region` of `buffer`.
///
/// Works directly on the source so rejected candidates are never copied.
pub fn count_content(buffer: &PixelBuffer, region: Region, tuning: &Tuning) -> ContentCounts {
    let mut counts = ContentCounts::default();

    for colour in buffer.region_colours(region) {
        if colour.a <= tuning.visible_alpha {
            continue;
        }
        counts.visible += 1;

        if !colour.is_near_white(tuning.colour_tolerance)
            && !colour.is_near_black(tuning.colour_tolerance)
        {
            counts.coloured += 1;
        }
    }

    counts
}

/// Content test over `region` with an explicit visible-pixel floor.
pub fn region_has_content(
    buffer: &PixelBuffer,
    region: Region,
    min_visible: u32,
    tuning: &Tuning,
) -> bool {
    count_content(buffer, region, tuning).passes(min_visible, tuning.min_coloured_pixels)
}

/// Content test over a whole buffer.
pub fn has_content(buffer: &PixelBuffer, min_visible: u32, tuning: &Tuning) -> bool {
    region_has_content(buffer, buffer.bounds(), min_visible, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn filled(w: u32, h: u32, rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::from_image(RgbaImage::from_pixel(w, h, Rgba(rgba))).unwrap()
    }

    #[test]
    fn test_coloured_block_passes() {
        let buf = filled(30, 30, [200, 40, 40, 255]);
        let counts = count_content(&buf, buf.bounds(), &Tuning::default());

        assert_eq!(counts, ContentCounts { visible: 900, coloured: 900 });
        assert!(has_content(&buf, 500, &Tuning::default()));
    }

    #[test]
    fn test_white_block_fails() {
        let buf = filled(30, 30, [250, 250, 250, 255]);
        let counts = count_content(&buf, buf.bounds(), &Tuning::default());

        assert_eq!(counts.visible, 900);
        assert_eq!(counts.coloured, 0);
        assert!(!has_content(&buf, 500, &Tuning::default()));
    }

    #[test]
    fn test_black_outline_fails() {
        let buf = filled(30, 30, [5, 5, 5, 255]);
        assert!(!has_content(&buf, 100, &Tuning::default()));
    }

    #[test]
    fn test_faint_pixels_are_invisible() {
        let buf = filled(30, 30, [200, 40, 40, 50]);
        let counts = count_content(&buf, buf.bounds(), &Tuning::default());
        assert_eq!(counts, ContentCounts::default());
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // 10x10 = 100 visible pixels does not clear a floor of 100
        let buf = filled(10, 10, [200, 40, 40, 255]);
        assert!(!has_content(&buf, 100, &Tuning::default()));
        assert!(has_content(&buf, 99, &Tuning::default()));
    }

    #[test]
    fn test_region_limits_the_count() {
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0]));
        for y in 0..20 {
            for x in 20..40 {
                img.put_pixel(x, y, Rgba([0, 0, 255, 255]));
            }
        }
        let buf = PixelBuffer::from_image(img).unwrap();
        let tuning = Tuning::default();

        assert!(!region_has_content(&buf, Region::new(0, 0, 20, 20), 100, &tuning));
        assert!(region_has_content(&buf, Region::new(20, 0, 20, 20), 100, &tuning));
    }
}
