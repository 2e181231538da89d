//! Command-line argument parsing for the island generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Island generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexisle", about = "Procedural hex-tile island generator")]
pub struct CliArgs {
    /// Noise seed. Omit to draw a random seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Seed for decorative scale jitter.
    #[arg(long)]
    pub jitter_seed: Option<u64>,

    /// Grid rows.
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns.
    #[arg(long)]
    pub cols: Option<u32>,

    /// Spacing added to the tile footprint on both horizontal axes.
    #[arg(long)]
    pub padding: Option<f64>,

    /// RON prefab manifest to use instead of the built-in tiles.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Write a tile occupancy PNG to this path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Write a classification noise PNG to this path.
    #[arg(long)]
    pub noise_png: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.island.seed = Some(seed);
        }
        if let Some(seed) = args.jitter_seed {
            self.island.jitter_seed = Some(seed);
        }
        if let Some(rows) = args.rows {
            self.island.rows = rows;
        }
        if let Some(cols) = args.cols {
            self.island.cols = cols;
        }
        if let Some(p) = args.padding {
            self.island.padding.0 = p;
            self.island.padding.2 = p;
        }
        if let Some(ref path) = args.manifest {
            self.island.manifest = Some(path.clone());
        }
        if let Some(ref path) = args.png {
            self.output.island_png = Some(path.clone());
        }
        if let Some(ref path) = args.noise_png {
            self.output.noise_png = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
