//! Immutable RGBA pixel buffers.
//!
//! A `PixelBuffer` is the decoded form of a source image: row-major RGBA,
//! 4 bytes per pixel, never mutated after construction. Crops are
//! materialized into new buffers so a tile never aliases its source.

use std::path::Path;

use image::RgbaImage;

use crate::error::{CutError, Result};

use super::{Colour, Region};

/// A decoded, read-only RGBA raster of at least 1x1 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Build from raw row-major RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(CutError::Decode {
                message: format!(
                    "Expected {} bytes for a {}x{} RGBA buffer, got {}",
                    expected,
                    width,
                    height,
                    bytes.len()
                ),
                help: Some("Buffers are row-major with 4 bytes per pixel".to_string()),
            });
        }

        let image = RgbaImage::from_raw(width, height, bytes).ok_or_else(|| CutError::Decode {
            message: format!("Invalid {}x{} RGBA buffer", width, height),
            help: None,
        })?;

        Self::from_image(image)
    }

    /// Wrap an already-decoded image.
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CutError::Decode {
                message: format!(
                    "Image has zero dimensions ({}x{})",
                    image.width(),
                    image.height()
                ),
                help: Some("Input image must have non-zero width and height".to_string()),
            });
        }
        Ok(Self { image })
    }

    /// Decode encoded image bytes (PNG, GIF, WebP, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| CutError::Decode {
                message: format!("Failed to decode image: {}", e),
                help: Some("Check that the upload is a valid image file".to_string()),
            })?
            .to_rgba8();

        Self::from_image(image)
    }

    /// Load and decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|e| CutError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to load image: {}", e),
            })?
            .to_rgba8();

        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Region covering the whole buffer.
    pub fn bounds(&self) -> Region {
        Region::full(self.width(), self.height())
    }

    /// Colour at `(x, y)`. Coordinates must be in bounds.
    pub fn colour(&self, x: u32, y: u32) -> Colour {
        Colour::from_rgba(self.image.get_pixel(x, y).0)
    }

    /// Alpha at `(x, y)`. Coordinates must be in bounds.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[3]
    }

    /// Raw row-major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Iterate every colour inside `region` (clamped to the buffer), row-major.
    pub fn region_colours(&self, region: Region) -> impl Iterator<Item = Colour> + '_ {
        let region = region.clamped(self.width(), self.height());
        (region.y..region.bottom()).flat_map(move |y| {
            (region.x..region.right()).map(move |x| self.colour(x, y))
        })
    }

    /// Copy `region` out into a fresh buffer.
    ///
    /// Returns `None` when the region does not overlap the buffer.
    pub fn crop(&self, region: Region) -> Option<PixelBuffer> {
        let region = region.clamped(self.width(), self.height());
        if region.is_empty() {
            return None;
        }

        let sub = image::imageops::crop_imm(
            &self.image,
            region.x,
            region.y,
            region.width,
            region.height,
        )
        .to_image();

        Some(Self { image: sub })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> PixelBuffer {
        let mut img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
        PixelBuffer::from_image(img).unwrap()
    }

    #[test]
    fn test_from_rgba_valid() {
        let buf = PixelBuffer::from_rgba(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(buf.dimensions(), (2, 1));
        assert_eq!(buf.colour(1, 0), Colour::new(5, 6, 7, 8));
        assert_eq!(buf.alpha(0, 0), 4);
    }

    #[test]
    fn test_from_rgba_wrong_length() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 17]).is_err());
    }

    #[test]
    fn test_from_rgba_zero_dimensions() {
        assert!(PixelBuffer::from_rgba(0, 4, vec![]).is_err());
    }

    #[test]
    fn test_decode_garbage() {
        let err = PixelBuffer::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, CutError::Decode { .. }));
    }

    #[test]
    fn test_crop_copies_pixels() {
        let buf = checker();
        let crop = buf.crop(Region::new(1, 1, 2, 2)).unwrap();
        assert_eq!(crop.dimensions(), (2, 2));
        assert_eq!(crop.colour(0, 0), Colour::rgb(255, 0, 0));
        assert_eq!(crop.colour(1, 1), Colour::rgb(0, 255, 0));
        assert_eq!(crop.colour(1, 0), Colour::new(0, 0, 0, 0));
    }

    #[test]
    fn test_crop_clamps_and_rejects_empty() {
        let buf = checker();
        let crop = buf.crop(Region::new(3, 3, 10, 10)).unwrap();
        assert_eq!(crop.dimensions(), (1, 1));
        assert!(buf.crop(Region::new(4, 0, 2, 2)).is_none());
    }

    #[test]
    fn test_region_colours() {
        let buf = checker();
        let colours: Vec<Colour> = buf.region_colours(Region::new(1, 1, 2, 1)).collect();
        assert_eq!(colours, vec![Colour::rgb(255, 0, 0), Colour::new(0, 0, 0, 0)]);
    }
}
