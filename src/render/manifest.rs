//! JSON manifest describing how an image was segmented.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{CutError, Result};
use crate::segment::{Detection, ImageStatistics, RuleName, Segmentation};
use crate::types::{OriginKind, Region};

use super::png::tile_file_name;

/// Serializable summary of one segmented image.
#[derive(Debug, Clone, Serialize)]
pub struct TileManifest {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub statistics: ImageStatistics,
    pub detection: Detection,
    pub rule: RuleName,
    pub tiles: Vec<TileEntry>,
}

/// One tile in a manifest.
#[derive(Debug, Clone, Serialize)]
pub struct TileEntry {
    pub index: usize,
    pub origin: OriginKind,
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub source: Option<Region>,
}

impl TileManifest {
    /// Describe `segmentation` of an `image` of the given size, tiles named after `stem`.
    pub fn new(
        image: &str,
        (width, height): (u32, u32),
        stem: &str,
        segmentation: &Segmentation,
    ) -> Self {
        let tiles = segmentation
            .tiles
            .iter()
            .map(|tile| TileEntry {
                index: tile.index,
                origin: tile.origin,
                file: tile_file_name(stem, tile.index),
                width: tile.width(),
                height: tile.height(),
                source: tile.source,
            })
            .collect();

        Self {
            image: image.to_string(),
            width,
            height,
            statistics: segmentation.statistics,
            detection: segmentation.detection.clone(),
            rule: segmentation.rule,
            tiles,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CutError::Encode {
            message: format!("Failed to serialize tile manifest: {}", e),
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| CutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write tile manifest: {}", e),
        })
    }
}

/// Manifest file name for an image stem: `<stem>.tiles.json`.
pub fn manifest_file_name(stem: &str) -> String {
    format!("{}.tiles.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segmenter;
    use crate::types::PixelBuffer;
    use image::{Rgba, RgbaImage};

    fn single() -> (PixelBuffer, Segmentation) {
        let img = RgbaImage::from_pixel(32, 16, Rgba([200, 50, 50, 255]));
        let buf = PixelBuffer::from_image(img).unwrap();
        let seg = Segmenter::default().segment(&buf);
        (buf, seg)
    }

    #[test]
    fn test_manifest_entries() {
        let (buf, seg) = single();
        let manifest = TileManifest::new("hero.png", buf.dimensions(), "hero", &seg);

        assert_eq!(manifest.tiles.len(), 1);
        assert_eq!(manifest.tiles[0].file, "hero-0.png");
        assert_eq!(manifest.tiles[0].source, Some(Region::new(0, 0, 32, 16)));
        assert_eq!(manifest.rule, RuleName::SmallImage);
    }

    #[test]
    fn test_manifest_json_shape() {
        let (buf, seg) = single();
        let manifest = TileManifest::new("hero.png", buf.dimensions(), "hero", &seg);
        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(value["detection"]["kind"], "single");
        assert_eq!(value["rule"], "small_image");
        assert_eq!(value["tiles"][0]["origin"], "single");
        assert_eq!(value["tiles"][0]["source"]["width"], 32);
        assert_eq!(value["statistics"]["has_transparency"], false);
    }

    #[test]
    fn test_write_manifest() {
        let (buf, seg) = single();
        let manifest = TileManifest::new("hero.png", buf.dimensions(), "hero", &seg);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(manifest_file_name("hero"));
        manifest.write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"image\": \"hero.png\""));
    }
}
