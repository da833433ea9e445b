//! Slice command implementation.
//!
//! Segments PNG sprite sheets and writes each detected sprite as its own PNG.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{CutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{manifest_file_name, write_tiles, TileManifest};
use crate::segment::{Detection, Segmentation, Segmenter};
use crate::types::{OriginKind, PixelBuffer, SpriteTile};

use super::{stem_of, ConfigArgs};

/// Split images into sprite tiles
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// PNG files or directories of PNG files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for tiles (default: ./tiles). Skipped when walking input directories.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub segmenter: ConfigArgs,

    /// Also write <name>.tiles.json describing the segmentation
    #[arg(long)]
    pub manifest: bool,

    /// Write the whole image as one tile when no sprites are detected
    #[arg(long)]
    pub fallback_single: bool,
}

/// What happened to one input image.
#[derive(Debug)]
pub struct SliceReport {
    pub input: PathBuf,
    pub detection: Detection,
    pub written: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
}

pub fn run(args: SliceArgs, printer: &Printer) -> Result<Vec<SliceReport>> {
    let cwd = std::env::current_dir()?;
    let config = args.segmenter.resolve(&cwd)?;
    let segmenter = Segmenter::new(config);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    // Tiles from earlier runs must not be sliced again
    let existing_output = fs::canonicalize(&output).ok();
    let inputs = collect_inputs(&args.inputs, existing_output.as_deref(), printer)?;
    if inputs.is_empty() {
        return Err(CutError::Parse {
            message: "No PNG files found in the given inputs".to_string(),
            help: Some("Pass PNG files or directories containing them".to_string()),
        });
    }

    fs::create_dir_all(&output).map_err(|e| CutError::Io {
        path: output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut reports = Vec::with_capacity(inputs.len());
    let mut total_tiles = 0;
    let mut stems = HashSet::new();

    for input in &inputs {
        let base = stem_of(input);
        let stem = unique_stem(base.clone(), &mut stems);
        if stem != base {
            printer.warning(
                "Renamed",
                &format!(
                    "{} shares its name with an earlier input; writing {}-*.png",
                    display_path(input),
                    stem
                ),
            );
        }

        let report = slice_file(input, &stem, &output, &segmenter, &args, printer)?;
        total_tiles += report.written.len();
        reports.push(report);
    }

    printer.status(
        "Finished",
        &format!(
            "{} from {} to {}",
            plural(total_tiles, "tile", "tiles"),
            plural(inputs.len(), "image", "images"),
            display_path(&output)
        ),
    );

    Ok(reports)
}

/// Default output directory, relative to the working directory.
const DEFAULT_OUTPUT: &str = "tiles";

/// Reserve a file stem for one input, suffixing `-2`, `-3`, ... on reuse.
///
/// Tile names are `<stem>-<index>`, so distinct stems never produce the
/// same file name.
fn unique_stem(stem: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(stem.clone()) {
        return stem;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", stem, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Segment one image and write its tiles (and manifest) into `output`.
fn slice_file(
    input: &Path,
    stem: &str,
    output: &Path,
    segmenter: &Segmenter,
    args: &SliceArgs,
    printer: &Printer,
) -> Result<SliceReport> {
    let display = display_path(input);
    let buffer = PixelBuffer::open(input)?;
    let (w, h) = buffer.dimensions();

    printer.status("Slicing", &format!("{} ({}x{})", display, w, h));

    let mut segmentation = segmenter.segment(&buffer);
    report_detection(&segmentation, printer);

    if segmentation.is_empty() {
        if args.fallback_single {
            printer.warning(
                "Fallback",
                &format!("no sprites detected in {}; using whole image", display),
            );
            segmentation.tiles.push(whole_image_tile(buffer.clone()));
        } else {
            printer.warning("Skipped", &format!("no sprites detected in {}", display));
        }
    }

    let written = write_tiles(output, stem, &segmentation.tiles)?;
    for path in &written {
        printer.verbose("Wrote", &display_path(path));
    }

    let manifest = if args.manifest {
        let image_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(stem)
            .to_string();
        let path = output.join(manifest_file_name(stem));
        TileManifest::new(&image_name, buffer.dimensions(), stem, &segmentation).write(&path)?;
        printer.verbose("Wrote", &display_path(&path));
        Some(path)
    } else {
        None
    };

    printer.info("Extracted", &plural(written.len(), "tile", "tiles"));

    Ok(SliceReport {
        input: input.to_path_buf(),
        detection: segmentation.detection,
        written,
        manifest,
    })
}

fn report_detection(segmentation: &Segmentation, printer: &Printer) {
    let stats = &segmentation.statistics;
    printer.verbose(
        "Sampled",
        &format!(
            "{:.1}% transparent, {:.1}% transparent edges",
            stats.transparent_ratio * 100.0,
            stats.edge_transparent_ratio * 100.0
        ),
    );
    printer.info(
        "Detected",
        &format!("{} (rule: {})", segmentation.detection, segmentation.rule),
    );
}

/// The caller-side fallback: the untouched source as a single tile.
fn whole_image_tile(buffer: PixelBuffer) -> SpriteTile {
    let bounds = buffer.bounds();
    SpriteTile {
        pixels: buffer,
        source: Some(bounds),
        index: 0,
        origin: OriginKind::Single,
    }
}

/// Expand inputs into a sorted list of image files.
///
/// Files are taken as given (with a warning if not `.png`); directories are
/// walked recursively for `.png` files. `skip` (a canonical path) is left
/// out of every walk.
fn collect_inputs(
    inputs: &[PathBuf],
    skip: Option<&Path>,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            if is_same_dir(input, skip) {
                printer.warning(
                    "Warning",
                    &format!(
                        "{} is also the output directory; existing tiles will be sliced",
                        display_path(input)
                    ),
                );
            }

            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_entry(|entry| {
                    entry.depth() == 0
                        || !entry.file_type().is_dir()
                        || !is_same_dir(entry.path(), skip)
                })
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_png(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            printer.verbose(
                "Scanned",
                &format!("{} in {}", plural(found.len(), "image", "images"), display_path(input)),
            );
            files.extend(found);
        } else if input.is_file() {
            if !is_png(input) {
                printer.warning(
                    "Warning",
                    &format!("{} does not have a .png extension", display_path(input)),
                );
            }
            files.push(input.clone());
        } else {
            return Err(CutError::Io {
                path: input.clone(),
                message: format!("File not found: {}", display_path(input)),
            });
        }
    }

    Ok(files)
}

fn is_same_dir(path: &Path, canonical: Option<&Path>) -> bool {
    canonical.is_some_and(|dir| fs::canonicalize(path).is_ok_and(|p| p == dir))
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
