//! Configuration for the hexisle tools.
//!
//! Island, output and debug settings persist to disk as `config.ron`. CLI
//! flags (via clap) override the loaded values. Missing sections and fields
//! fall back to defaults so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, IslandConfig, OutputConfig};
pub use error::ConfigError;
