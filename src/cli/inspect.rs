//! Inspect command implementation.
//!
//! Reports statistics, classification, tile bounds and dominant colours for
//! one image without writing any tiles.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::colours::{summarize_colours, ColourShare};
use crate::error::{CutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::TileManifest;
use crate::segment::Segmenter;
use crate::types::PixelBuffer;

use super::{stem_of, ConfigArgs};

/// Show how an image would be segmented
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image to inspect
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub segmenter: ConfigArgs,
}

/// Segmentation summary plus colour summary.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    #[serde(flatten)]
    pub manifest: TileManifest,
    pub colours: Vec<ColourShare>,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<InspectReport> {
    let cwd = std::env::current_dir()?;
    let segmenter = Segmenter::new(args.segmenter.resolve(&cwd)?);

    let path = &args.file;
    let display = display_path(path);
    printer.status("Inspecting", &display);

    let buffer = PixelBuffer::open(path)?;
    let report = inspect(&buffer, &display, &stem_of(path), &segmenter);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CutError::Encode {
            message: format!("Failed to serialize report: {}", e),
        })?;
        println!("{}", json);
    } else {
        print_report(&report, printer);
    }

    Ok(report)
}

/// Build the report for an already-decoded image.
pub fn inspect(buffer: &PixelBuffer, image: &str, stem: &str, segmenter: &Segmenter) -> InspectReport {
    let segmentation = segmenter.segment(buffer);
    InspectReport {
        manifest: TileManifest::new(image, buffer.dimensions(), stem, &segmentation),
        colours: summarize_colours(buffer, &segmenter.config().tuning),
    }
}

fn print_report(report: &InspectReport, printer: &Printer) {
    let m = &report.manifest;
    let stats = &m.statistics;

    println!("{} {}x{}", printer.bold(&m.image), m.width, m.height);
    println!(
        "  transparency: {:.1}% (edges {:.1}%)",
        stats.transparent_ratio * 100.0,
        stats.edge_transparent_ratio * 100.0
    );
    println!("  detection:    {} via {}", m.detection, m.rule);
    println!("  tiles:        {}", plural(m.tiles.len(), "tile", "tiles"));
    for tile in &m.tiles {
        let bounds = tile
            .source
            .map(|r| format!("{}x{} @ {},{}", r.width, r.height, r.x, r.y))
            .unwrap_or_else(|| format!("{}x{}", tile.width, tile.height));
        println!("    [{:>2}] {} {}", tile.index, tile.origin, printer.dim(&bounds));
    }

    let colours: Vec<String> = report
        .colours
        .iter()
        .map(|c| format!("{} {:.0}%", c.name, c.percent))
        .collect();
    if colours.is_empty() {
        println!("  colours:      none");
    } else {
        println!("  colours:      {}", colours.join(", "));
    }
}
