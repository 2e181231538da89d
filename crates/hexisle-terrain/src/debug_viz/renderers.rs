//! Island debug renderers: tile occupancy and classification noise.

use super::image::DebugImage;
use crate::classifier::ClassifierParams;
use crate::container::IslandMap;
use crate::grid::{GridDimensions, GridExtent};
use crate::noise_field::NoiseField;
use crate::prefab::VariantId;

/// Background color for empty cells.
pub const WATER_COLOR: [u8; 4] = [20, 90, 200, 255];

/// Render one square block per cell, colored by variant.
///
/// Columns run along the image X axis and rows along Y. Odd rows are shifted
/// right by half a block, mirroring the grid's brick offset.
pub fn render_island_debug(
    map: &IslandMap,
    dimensions: GridDimensions,
    variant_count: usize,
    cell_px: u32,
) -> DebugImage {
    let cell_px = cell_px.max(1);
    let half = cell_px / 2;
    let width = dimensions.cols.saturating_mul(cell_px).saturating_add(half);
    let height = dimensions.rows.saturating_mul(cell_px);
    let mut image = DebugImage::filled(width, height, WATER_COLOR);

    for tile in map.tiles() {
        let shift = if tile.coord.is_odd_row() { half } else { 0 };
        image.fill_rect(
            tile.coord.col.saturating_mul(cell_px).saturating_add(shift),
            tile.coord.row.saturating_mul(cell_px),
            cell_px,
            cell_px,
            variant_color(tile.variant, variant_count),
        );
    }

    image
}

/// Sample the classification noise over the whole grid extent.
///
/// Pixels below the minimum threshold are drawn as water, the rest with
/// [`noise_to_color`]. Uses the same frequency divisor as the classifier so
/// the picture lines up with placed tiles.
pub fn render_noise_debug(
    field: &NoiseField,
    extent: GridExtent,
    params: &ClassifierParams,
    width: u32,
    height: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let (width, height) = image.dimensions();

    for py in 0..height {
        for px in 0..width {
            let x = (px as f64 / width as f64 - 0.5) * extent.width;
            let z = (py as f64 / height as f64 - 0.5) * extent.height;
            let n = field.sample(x / params.frequency_divisor, z / params.frequency_divisor);
            image.set_pixel(px, py, noise_to_color(n, params));
        }
    }

    image
}

/// Map a classification noise value to a color.
///
/// Below the minimum threshold: blue, darker when deeper. Above: green
/// shading toward brown at the top of the band range.
pub fn noise_to_color(noise: f64, params: &ClassifierParams) -> [u8; 4] {
    if noise < params.min_threshold {
        let t = (noise / params.min_threshold).clamp(0.0, 1.0);
        [0, (40.0 + t * 60.0) as u8, (120.0 + t * 100.0) as u8, 255]
    } else {
        let span = params.max_threshold - params.min_threshold;
        let t = ((noise - params.min_threshold) / span).clamp(0.0, 1.0);
        [
            (60.0 + t * 80.0) as u8,
            (170.0 - t * 80.0) as u8,
            (50.0 + t * 10.0) as u8,
            255,
        ]
    }
}

/// A distinct color per variant, from sandy ground to dark vegetation.
pub fn variant_color(variant: VariantId, variant_count: usize) -> [u8; 4] {
    let t = if variant_count > 1 {
        variant.0 as f64 / (variant_count - 1) as f64
    } else {
        0.0
    };
    [
        (200.0 - t * 170.0) as u8,
        (170.0 - t * 30.0) as u8,
        (100.0 - t * 60.0) as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{PlacedTile, TileContainer};
    use crate::debug_viz::MAX_IMAGE_SIDE;
    use crate::geometry::CellFootprint;
    use crate::grid::{GridCoord, GridLayout};
    use crate::prefab::{NodeDescriptor, PrefabRegistry};
    use glam::DVec3;

    fn tile(row: u32, col: u32, variant: usize) -> PlacedTile {
        let mut reg = PrefabRegistry::new();
        let id = reg
            .register(
                "tile",
                &NodeDescriptor::mesh(
                    "tile",
                    crate::prefab::Aabb::new(DVec3::ZERO, DVec3::ONE),
                    Default::default(),
                ),
            )
            .unwrap();
        PlacedTile {
            coord: GridCoord::new(row, col),
            variant: VariantId(variant),
            noise: 1.0,
            position: DVec3::ZERO,
            decorative_scale: 1.0,
            prefab: reg.get(id).unwrap().clone(),
        }
    }

    #[test]
    fn test_island_image_dimensions() {
        let map = IslandMap::new();
        let image = render_island_debug(&map, GridDimensions::default(), 3, 4);
        assert_eq!(image.dimensions(), (32 * 4 + 2, 32 * 4));
        assert_eq!(image.unique_color_count(), 1);
    }

    #[test]
    fn test_tiles_drawn_with_offset() {
        let mut map = IslandMap::new();
        map.add_child(tile(0, 0, 0));
        map.add_child(tile(1, 0, 2));
        let image = render_island_debug(&map, GridDimensions::default(), 3, 4);

        assert_eq!(image.get_pixel(0, 0), variant_color(VariantId(0), 3));
        // Odd row starts half a block to the right.
        assert_eq!(image.get_pixel(0, 4), WATER_COLOR);
        assert_eq!(image.get_pixel(2, 4), variant_color(VariantId(2), 3));
        assert_eq!(image.unique_color_count(), 3);
    }

    #[test]
    fn test_huge_cell_size_is_clamped() {
        let mut map = IslandMap::new();
        map.add_child(tile(31, 31, 1));
        let image = render_island_debug(&map, GridDimensions::default(), 3, u32::MAX);
        assert_eq!(image.dimensions(), (MAX_IMAGE_SIDE, MAX_IMAGE_SIDE));
        assert_eq!(image.unique_color_count(), 1);
    }

    #[test]
    fn test_variant_colors_distinct() {
        let a = variant_color(VariantId(0), 3);
        let b = variant_color(VariantId(1), 3);
        let c = variant_color(VariantId(2), 3);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, WATER_COLOR);
    }

    #[test]
    fn test_noise_color_water_vs_land() {
        let params = ClassifierParams::default();
        let water = noise_to_color(0.1, &params);
        let land = noise_to_color(0.8, &params);
        assert_eq!(water[0], 0);
        assert!(land[1] > land[2]);
    }

    #[test]
    fn test_noise_debug_has_gradient() {
        let field = NoiseField::with_output_range(42, 0.0, 1.25).unwrap();
        let layout = GridLayout::new(
            CellFootprint::new(1.0, 1.0).unwrap(),
            GridDimensions::default(),
        )
        .unwrap();
        let image = render_noise_debug(&field, layout.extent(), &ClassifierParams::default(), 64, 64);
        assert_eq!(image.dimensions(), (64, 64));
        assert!(image.unique_color_count() > 10);
    }
}
