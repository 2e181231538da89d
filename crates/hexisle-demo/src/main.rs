//! Demo binary that generates one hex island and reports it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexisle-demo -- --seed 42 --png island.png` to get a
//! reproducible island and its occupancy image.

mod tiles;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use glam::DVec3;
use hexisle_config::{CliArgs, Config, IslandConfig};
use hexisle_terrain::debug_viz::{DebugImage, render_island_debug, render_noise_debug};
use hexisle_terrain::{
    ClassifierParams, ConfigurationError, GeneratorParams, GridDimensions, IslandMap,
    ManifestError, NoiseField, PrefabError, PrefabManifest, PrefabRegistry, TerrainError,
    TerrainGenerator, VariantId,
};
use tracing::info;

/// Anything that stops the demo from producing an island.
#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to load prefab manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("invalid built-in tile set: {0}")]
    Prefab(#[from] PrefabError),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ConfigurationError> for DemoError {
    fn from(err: ConfigurationError) -> Self {
        DemoError::Terrain(err.into())
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexisle_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), DemoError> {
    let registry = load_registry(&config.island)?;
    let variant_names: Vec<String> = registry
        .variants()
        .iter()
        .map(|p| p.name().to_string())
        .collect();

    let params = generator_params(&config.island)?;
    let mut generator = TerrainGenerator::from_registry(registry, params.clone())?;
    let mut island = IslandMap::new();
    let generated = generator.generate(&mut island)?;
    let stats = generated.stats.clone();
    let extent = generated.extent;

    info!(
        "Island seed {}: {} of {} cells placed, extent {:.2} x {:.2}",
        stats.seed,
        stats.placed(),
        stats.cells_visited,
        extent.width,
        extent.height,
    );
    for (i, name) in variant_names.iter().enumerate() {
        info!(
            "  {name}: {} tiles",
            generated.container.count_variant(VariantId(i))
        );
    }
    info!(
        "Reference view distance: {:.2}",
        extent.reference_distance()
    );

    if let Some(path) = &config.output.island_png {
        let image = render_island_debug(
            &island,
            params.dimensions,
            variant_names.len(),
            config.output.cell_pixels,
        );
        write_png(&image, path)?;
    }

    if let Some(path) = &config.output.noise_png {
        let (min, max) = params.noise_range;
        let field = NoiseField::with_output_range(stats.seed, min, max)?;
        let size = config.output.noise_resolution.max(1);
        let image = render_noise_debug(&field, extent, &params.classifier, size, size);
        write_png(&image, path)?;
    }

    Ok(())
}

/// The manifest's registry when one is configured, else the built-in tiles.
///
/// A manifest carries its own base marker; the configured one only applies
/// to the built-in set.
fn load_registry(island: &IslandConfig) -> Result<PrefabRegistry, DemoError> {
    match &island.manifest {
        Some(path) => Ok(PrefabManifest::load(path)?.into_registry()?),
        None => Ok(tiles::builtin_registry(&island.base_marker)?),
    }
}

fn generator_params(island: &IslandConfig) -> Result<GeneratorParams, ConfigurationError> {
    let params = GeneratorParams {
        seed: island.seed,
        jitter_seed: island.jitter_seed,
        dimensions: GridDimensions::new(island.rows, island.cols)?,
        padding: DVec3::from(island.padding),
        noise_range: (island.noise_min, island.noise_max),
        classifier: ClassifierParams {
            min_threshold: island.min_threshold,
            max_threshold: island.max_threshold,
            frequency_divisor: island.frequency_divisor,
        },
        scale_range: (island.scale_min, island.scale_max),
    };
    params.validate()?;
    Ok(params)
}

fn write_png(image: &DebugImage, path: &Path) -> Result<(), DemoError> {
    let bytes = image.encode_png()?;
    std::fs::write(path, bytes).map_err(|source| DemoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let (w, h) = image.dimensions();
    info!("Wrote {w}x{h} debug image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_maps_to_default_params() {
        let params = generator_params(&IslandConfig::default()).unwrap();
        assert_eq!(params, GeneratorParams::default());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let island = IslandConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            generator_params(&island),
            Err(ConfigurationError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("island.png");
        let noise_path = dir.path().join("noise.png");
        let mut config = Config::default();
        config.island.seed = Some(42);
        config.island.jitter_seed = Some(1);
        config.output.island_png = Some(png_path.clone());
        config.output.noise_png = Some(noise_path.clone());
        config.output.noise_resolution = 32;

        run(&config).unwrap();
        let bytes = std::fs::read(&png_path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(noise_path.exists());
    }

    #[test]
    fn test_missing_manifest_fails() {
        let mut island = IslandConfig::default();
        island.manifest = Some(PathBuf::from("/nonexistent/tiles.ron"));
        assert!(matches!(
            load_registry(&island),
            Err(DemoError::Manifest(ManifestError::ReadError(_)))
        ));
    }
}
