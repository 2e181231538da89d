//! Configuration structs with island defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Island generation settings.
    pub island: IslandConfig,
    /// Debug image output.
    pub output: OutputConfig,
    /// Logging/development settings.
    pub debug: DebugConfig,
}

/// Island generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IslandConfig {
    /// Noise seed. `None` draws a random seed per run (logged for replay).
    pub seed: Option<u32>,
    /// Seed for decorative scale jitter. `None` varies jitter per run.
    pub jitter_seed: Option<u64>,
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Extra spacing added to the measured tile size, per axis (x, y, z).
    pub padding: (f64, f64, f64),
    /// Lower bound of the remapped noise range.
    pub noise_min: f64,
    /// Upper bound of the remapped noise range.
    pub noise_max: f64,
    /// Cells with noise below this are water.
    pub min_threshold: f64,
    /// Top of the variant bands.
    pub max_threshold: f64,
    /// Cell centers are divided by this before sampling noise.
    pub frequency_divisor: f64,
    /// Smallest decorative scale (inclusive).
    pub scale_min: f64,
    /// Largest decorative scale (exclusive).
    pub scale_max: f64,
    /// Mesh nodes whose name contains this are tile bases.
    pub base_marker: String,
    /// Optional RON prefab manifest replacing the built-in tile set.
    pub manifest: Option<PathBuf>,
}

/// Debug image output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a tile occupancy PNG here after generating.
    pub island_png: Option<PathBuf>,
    /// Write a classification noise PNG here after generating.
    pub noise_png: Option<PathBuf>,
    /// Pixels per cell in the occupancy image.
    pub cell_pixels: u32,
    /// Width and height of the noise image.
    pub noise_resolution: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            seed: None,
            jitter_seed: None,
            rows: 32,
            cols: 32,
            padding: (0.0, 0.0, 0.0),
            noise_min: 0.0,
            noise_max: 1.25,
            min_threshold: 0.4,
            max_threshold: 1.25,
            frequency_divisor: 1.8,
            scale_min: 0.8,
            scale_max: 1.8,
            base_marker: "tile".to_string(),
            manifest: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            island_png: None,
            noise_png: None,
            cell_pixels: 8,
            noise_resolution: 256,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// The per-user config directory (`<config_dir>/hexisle`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("hexisle"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
