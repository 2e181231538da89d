//! Island debug visualization: top-down images of generation results.
//!
//! Provides [`DebugImage`] plus renderers for the placed-tile occupancy map
//! and the raw classification noise. Used by the demo binary to dump PNGs
//! when tuning thresholds.

mod image;
mod renderers;

pub use self::image::{DebugImage, MAX_IMAGE_SIDE};
pub use renderers::{
    WATER_COLOR, noise_to_color, render_island_debug, render_noise_debug, variant_color,
};
