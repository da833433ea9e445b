//! Sheet-versus-single classification.
//!
//! Classification is an ordered list of rules. Each rule either claims the
//! image with a `Detection` or passes; the first claim wins. Keeping the
//! rules as data lets each one be exercised on its own.

use std::fmt;

use serde::Serialize;

use crate::config::SegmenterConfig;
use crate::types::{PixelBuffer, Region};

use super::grid::{detect_grid, GridSpec};
use super::regions::find_regions;
use super::stats::ImageStatistics;

/// How a source image was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detection {
    /// The whole image is one sprite.
    Single,
    /// Sprites separated by transparent gaps.
    Regions { regions: Vec<Region> },
    /// A uniform tile grid.
    Grid(GridSpec),
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Single => write!(f, "single sprite"),
            Detection::Regions { regions } => write!(f, "{} gap-separated regions", regions.len()),
            Detection::Grid(grid) => write!(
                f,
                "{}x{} grid of {}px cells",
                grid.cols, grid.rows, grid.cell_size
            ),
        }
    }
}

/// Identifies the rule that produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    SmallImage,
    TransparentSheet,
    OpaqueEdges,
    Fallback,
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleName::SmallImage => "small_image",
            RuleName::TransparentSheet => "transparent_sheet",
            RuleName::OpaqueEdges => "opaque_edges",
            RuleName::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Everything a rule may look at.
pub struct ClassifyInput<'a> {
    pub buffer: &'a PixelBuffer,
    pub stats: &'a ImageStatistics,
    pub config: &'a SegmenterConfig,
}

/// One step of the classification chain.
pub struct Rule {
    pub name: RuleName,
    pub apply: fn(&ClassifyInput<'_>) -> Option<Detection>,
}

/// Result of running the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub detection: Detection,
    pub rule: RuleName,
}

/// The classification chain, in priority order.
pub const RULES: [Rule; 4] = [
    Rule {
        name: RuleName::SmallImage,
        apply: small_image,
    },
    Rule {
        name: RuleName::TransparentSheet,
        apply: transparent_sheet,
    },
    Rule {
        name: RuleName::OpaqueEdges,
        apply: opaque_edges,
    },
    Rule {
        name: RuleName::Fallback,
        apply: fallback,
    },
];

/// Classify `buffer` using the default rule chain.
pub fn classify(
    buffer: &PixelBuffer,
    stats: &ImageStatistics,
    config: &SegmenterConfig,
) -> Classification {
    let input = ClassifyInput {
        buffer,
        stats,
        config,
    };
    classify_with(&RULES, &input)
}

/// Run `rules` in order and stop at the first match.
///
/// An empty or exhausted chain classifies as `Single`.
pub fn classify_with(rules: &[Rule], input: &ClassifyInput<'_>) -> Classification {
    rules
        .iter()
        .find_map(|rule| {
            (rule.apply)(input).map(|detection| Classification {
                detection,
                rule: rule.name,
            })
        })
        .unwrap_or(Classification {
            detection: Detection::Single,
            rule: RuleName::Fallback,
        })
}

/// Images small on both axes are one sprite whatever the background.
fn small_image(input: &ClassifyInput<'_>) -> Option<Detection> {
    let limit = input.config.tuning.small_image;
    let (width, height) = input.buffer.dimensions();
    (width < limit && height < limit).then_some(Detection::Single)
}

/// Transparent backgrounds: try gap regions, then a fixed grid.
fn transparent_sheet(input: &ClassifyInput<'_>) -> Option<Detection> {
    if !(input.stats.has_transparency && input.stats.has_transparent_edges) {
        return None;
    }

    let tuning = &input.config.tuning;
    let regions = find_regions(input.buffer, tuning);
    if (1..=tuning.max_regions).contains(&regions.len()) {
        return Some(Detection::Regions { regions });
    }

    let (width, height) = input.buffer.dimensions();
    detect_grid(
        width,
        height,
        &input.config.grid_candidates(),
        tuning.max_grid_cells,
    )
    .map(Detection::Grid)
}

/// Solid edges mean a single sprite on a backdrop.
fn opaque_edges(input: &ClassifyInput<'_>) -> Option<Detection> {
    (!input.stats.has_transparent_edges).then_some(Detection::Single)
}

fn fallback(_input: &ClassifyInput<'_>) -> Option<Detection> {
    Some(Detection::Single)
}
