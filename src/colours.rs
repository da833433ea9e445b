//! Cheap colour summary for fallback classification.
//!
//! Buckets opaque, non-background pixels into twelve named colours using
//! channel comparisons on raw RGB, then reports the dominant buckets.

use std::fmt;

use serde::Serialize;

use crate::config::Tuning;
use crate::types::{Colour, PixelBuffer};

/// Number of buckets reported by [`summarize_colours`].
pub const TOP_COLOURS: usize = 3;

/// Pixels with alpha below this are ignored by the summary.
const OPAQUE_ALPHA: u8 = 128;

/// Named colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourName {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Brown,
    White,
    Gray,
    Black,
}

impl ColourName {
    pub const ALL: [ColourName; 12] = [
        ColourName::Red,
        ColourName::Orange,
        ColourName::Yellow,
        ColourName::Green,
        ColourName::Cyan,
        ColourName::Blue,
        ColourName::Purple,
        ColourName::Pink,
        ColourName::Brown,
        ColourName::White,
        ColourName::Gray,
        ColourName::Black,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColourName::Red => "red",
            ColourName::Orange => "orange",
            ColourName::Yellow => "yellow",
            ColourName::Green => "green",
            ColourName::Cyan => "cyan",
            ColourName::Blue => "blue",
            ColourName::Purple => "purple",
            ColourName::Pink => "pink",
            ColourName::Brown => "brown",
            ColourName::White => "white",
            ColourName::Gray => "gray",
            ColourName::Black => "black",
        }
    }
}

impl fmt::Display for ColourName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a colour summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColourShare {
    pub name: ColourName,
    /// Share of counted pixels, 0-100.
    pub percent: f64,
}

/// Top colour buckets of `buffer`, most common first.
///
/// Transparent pixels and near-white background are skipped. Ties are
/// broken by bucket order so the result is deterministic. Returns an empty
/// list when nothing is counted.
pub fn summarize_colours(buffer: &PixelBuffer, tuning: &Tuning) -> Vec<ColourShare> {
    let mut counts = [0u64; 12];
    let mut total = 0u64;

    for colour in buffer.region_colours(buffer.bounds()) {
        if colour.a < OPAQUE_ALPHA || colour.is_near_white(tuning.colour_tolerance) {
            continue;
        }
        counts[classify_colour(colour) as usize] += 1;
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(ColourName, u64)> = ColourName::ALL
        .iter()
        .map(|&name| (name, counts[name as usize]))
        .filter(|&(_, count)| count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_COLOURS);

    ranked
        .into_iter()
        .map(|(name, count)| ColourShare {
            name,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

/// Bucket a single colour.
pub fn classify_colour(colour: Colour) -> ColourName {
    let (r, g, b) = (colour.r as i32, colour.g as i32, colour.b as i32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let spread = max - min;
    let lightness = (max + min) / 2;

    if max < 40 {
        return ColourName::Black;
    }

    // Low saturation
    if spread < 30 {
        return if lightness > 200 {
            ColourName::White
        } else if lightness < 50 {
            ColourName::Black
        } else {
            ColourName::Gray
        };
    }

    if r == max {
        if b > g {
            // red leaning towards blue
            return if b - g > spread / 2 {
                if lightness > 150 {
                    ColourName::Pink
                } else {
                    ColourName::Purple
                }
            } else if lightness > 170 {
                ColourName::Pink
            } else {
                ColourName::Red
            };
        }

        // red leaning towards green
        let lean = g - b;
        if lean * 4 < spread {
            if lightness > 170 {
                ColourName::Pink
            } else {
                ColourName::Red
            }
        } else if lean * 5 < spread * 4 {
            if max < 170 {
                ColourName::Brown
            } else {
                ColourName::Orange
            }
        } else if max < 140 {
            ColourName::Brown
        } else {
            ColourName::Yellow
        }
    } else if g == max {
        if r - b > spread / 2 {
            ColourName::Yellow
        } else if b - r > spread / 2 {
            ColourName::Cyan
        } else {
            ColourName::Green
        }
    } else if g - r > spread / 2 {
        ColourName::Cyan
    } else if r - g > spread / 2 {
        ColourName::Purple
    } else {
        ColourName::Blue
    }
}
