pub mod completions;
pub mod inspect;
pub mod slice;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::output::Verbosity;

/// spritecut - Split sprite sheets into sprite tiles
#[derive(Parser, Debug)]
#[command(name = "spritecut")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print extra detail
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split images into sprite tiles
    Slice(slice::SliceArgs),

    /// Show how an image would be segmented
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Segmenter options shared by commands.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Config file (default: ./spritecut.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Preferred grid cell size in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Minimum visible pixels for a tile to count as a sprite
    #[arg(long)]
    pub min_pixels: Option<u32>,

    /// Maximum number of tiles taken from a grid
    #[arg(long)]
    pub max_sprites: Option<usize>,
}

impl ConfigArgs {
    /// Load the config file (or defaults) from `dir` and apply flag overrides.
    pub fn resolve(&self, dir: &Path) -> Result<SegmenterConfig> {
        let mut config = SegmenterConfig::discover(self.config.as_deref(), dir)?;

        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(min_pixels) = self.min_pixels {
            config.min_pixel_threshold = min_pixels;
        }
        if let Some(max_sprites) = self.max_sprites {
            config.max_sprites = max_sprites;
        }

        config.validate()?;
        Ok(config)
    }
}

/// File stem used to name outputs, falling back to "sprite".
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sprite")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("spritecut.yaml"), "cell_size: 32\nmax_sprites: 10\n").unwrap();

        let args = ConfigArgs {
            max_sprites: Some(4),
            min_pixels: Some(100),
            ..Default::default()
        };
        let config = args.resolve(dir.path()).unwrap();

        assert_eq!(config.cell_size, 32);
        assert_eq!(config.max_sprites, 4);
        assert_eq!(config.min_pixel_threshold, 100);
    }

    #[test]
    fn test_resolve_rejects_zero_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConfigArgs {
            max_sprites: Some(0),
            ..Default::default()
        };
        assert!(args.resolve(dir.path()).is_err());
    }

    #[test]
    fn test_stem_of() {
        assert_eq!(stem_of(Path::new("sheets/hero.png")), "hero");
        assert_eq!(stem_of(Path::new("")), "sprite");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["spritecut", "-v", "slice", "a.png", "--cell-size", "32"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        match cli.command {
            Commands::Slice(args) => assert_eq!(args.segmenter.cell_size, Some(32)),
            other => panic!("expected slice, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["spritecut", "-v", "-q", "inspect", "a.png"]).is_err());
    }
}
