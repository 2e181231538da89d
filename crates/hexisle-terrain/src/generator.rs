//! Island generation: plan every cell, then materialize into a container.
//!
//! Generation runs in two passes. [`TerrainGenerator::plan`] measures the
//! footprint, lays out the grid and classifies every cell; it is pure and
//! can fail. Only once a plan exists is the destination container cleared
//! and repopulated, so a failed run never leaves a half-built island behind.

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::classifier::{CellDecision, ClassifierParams, TileClassifier};
use crate::container::{PlacedTile, TileContainer};
use crate::error::{ConfigurationError, TerrainError};
use crate::geometry::measure_footprint;
use crate::grid::{GridCoord, GridDimensions, GridExtent, GridLayout};
use crate::noise_field::{NoiseField, OutputRange};
use crate::prefab::{Prefab, PrefabRegistry, VariantId};

/// Default noise output range. The upper bound doubles as the top threshold.
pub const DEFAULT_NOISE_RANGE: (f64, f64) = (0.0, 1.25);

/// Default half-open range for decorative scale jitter.
pub const DEFAULT_DECORATIVE_SCALE: (f64, f64) = (0.8, 1.8);

/// Parameters for one [`TerrainGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorParams {
    /// Noise seed. `None` draws a fresh seed for every run.
    pub seed: Option<u32>,
    /// Seed for decorative scale jitter. `None` seeds from the thread RNG.
    pub jitter_seed: Option<u64>,
    pub dimensions: GridDimensions,
    /// Added to the measured base size on each axis.
    pub padding: DVec3,
    /// Output range the noise field is remapped into.
    pub noise_range: (f64, f64),
    pub classifier: ClassifierParams,
    /// Decorative scale is drawn from `scale_range.0..scale_range.1`.
    pub scale_range: (f64, f64),
}

impl GeneratorParams {
    /// Check everything that does not depend on the prefabs.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        GridDimensions::new(self.dimensions.rows, self.dimensions.cols)?;
        OutputRange::new(self.noise_range.0, self.noise_range.1)?;
        self.classifier.validate()?;
        let (range_min, range_max) = self.noise_range;
        let ClassifierParams {
            min_threshold,
            max_threshold,
            ..
        } = self.classifier;
        if min_threshold < range_min || max_threshold > range_max {
            return Err(ConfigurationError::ThresholdsOutsideNoiseRange {
                min: min_threshold,
                max: max_threshold,
                range_min,
                range_max,
            });
        }
        let (min, max) = self.scale_range;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
            return Err(ConfigurationError::InvalidScaleRange { min, max });
        }
        Ok(())
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            seed: None,
            jitter_seed: None,
            dimensions: GridDimensions::default(),
            padding: DVec3::ZERO,
            noise_range: DEFAULT_NOISE_RANGE,
            classifier: ClassifierParams::default(),
            scale_range: DEFAULT_DECORATIVE_SCALE,
        }
    }
}

/// Counters for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationStats {
    /// Noise seed the run used.
    pub seed: u32,
    pub cells_visited: usize,
    pub outside_boundary: usize,
    pub below_threshold: usize,
    /// Tiles placed, indexed by variant.
    pub placed_per_variant: Vec<usize>,
}

impl GenerationStats {
    /// Total tiles placed.
    pub fn placed(&self) -> usize {
        self.placed_per_variant.iter().sum()
    }
}

/// A surviving cell and its variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedCell {
    pub coord: GridCoord,
    /// World-space center (`x` = world X, `y` = world Z).
    pub center: DVec2,
    pub variant: VariantId,
    pub noise: f64,
}

/// Every decision for one run, computed without touching any container.
#[derive(Clone, Debug)]
pub struct IslandPlan {
    layout: GridLayout,
    cells: Vec<PlannedCell>,
    stats: GenerationStats,
}

impl IslandPlan {
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Surviving cells in enumeration order.
    pub fn cells(&self) -> &[PlannedCell] {
        &self.cells
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// `(cell, variant)` for every surviving cell, sorted by cell.
    pub fn occupancy(&self) -> Vec<(GridCoord, VariantId)> {
        let mut cells: Vec<_> = self.cells.iter().map(|c| (c.coord, c.variant)).collect();
        cells.sort_unstable();
        cells
    }
}

/// Result of [`TerrainGenerator::generate`].
#[derive(Debug)]
pub struct Generated<'c, C> {
    /// The container, now holding exactly this run's tiles.
    pub container: &'c mut C,
    /// Total grid size, for camera framing and reference-point placement.
    pub extent: GridExtent,
    pub stats: GenerationStats,
}

/// Owns the active variant set and places islands into containers.
pub struct TerrainGenerator {
    variants: Vec<Prefab>,
    params: GeneratorParams,
    jitter: ChaCha8Rng,
}

impl TerrainGenerator {
    /// Create a generator for an ordered, non-empty variant list.
    ///
    /// Variant 0 is the reference prefab whose base part sizes the cells.
    pub fn new(variants: Vec<Prefab>, params: GeneratorParams) -> Result<Self, TerrainError> {
        if variants.is_empty() {
            return Err(TerrainError::EmptyVariantList);
        }
        params.validate()?;
        let jitter = match params.jitter_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            variants,
            params,
            jitter,
        })
    }

    /// Create a generator from every variant in `registry`, in registration order.
    pub fn from_registry(
        registry: PrefabRegistry,
        params: GeneratorParams,
    ) -> Result<Self, TerrainError> {
        Self::new(registry.into_variants(), params)
    }

    pub fn variants(&self) -> &[Prefab] {
        &self.variants
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Classify every cell for noise `seed` without placing anything.
    pub fn plan(&self, seed: u32) -> Result<IslandPlan, TerrainError> {
        let footprint = measure_footprint(&self.variants[0], self.params.padding)?;
        let layout = GridLayout::new(footprint, self.params.dimensions)?;
        let (min, max) = self.params.noise_range;
        let noise = NoiseField::with_output_range(seed, min, max)?;
        let classifier = TileClassifier::new(
            &noise,
            self.params.classifier,
            layout.extent(),
            self.variants.len(),
        )?;

        tracing::debug!(
            seed,
            rows = layout.dimensions().rows,
            cols = layout.dimensions().cols,
            cell_width = footprint.width(),
            cell_depth = footprint.depth(),
            variants = self.variants.len(),
            "planning island"
        );

        let mut stats = GenerationStats {
            seed,
            placed_per_variant: vec![0; self.variants.len()],
            ..Default::default()
        };
        let mut cells = Vec::new();

        for (coord, center) in layout.cells() {
            stats.cells_visited += 1;
            match classifier.classify(center)? {
                CellDecision::OutsideBoundary => stats.outside_boundary += 1,
                CellDecision::BelowThreshold { .. } => stats.below_threshold += 1,
                CellDecision::Place { variant, noise } => {
                    stats.placed_per_variant[variant.0] += 1;
                    cells.push(PlannedCell {
                        coord,
                        center,
                        variant,
                        noise,
                    });
                }
            }
        }

        Ok(IslandPlan {
            layout,
            cells,
            stats,
        })
    }

    /// Clear `container` and fill it with a freshly generated island.
    ///
    /// On error the container is not touched.
    pub fn generate<'c, C: TileContainer>(
        &mut self,
        container: &'c mut C,
    ) -> Result<Generated<'c, C>, TerrainError> {
        let seed = match self.params.seed {
            Some(seed) => seed,
            None => {
                let seed: u32 = rand::rng().random();
                tracing::info!(seed, "no noise seed configured, drew a random one");
                seed
            }
        };
        let plan = self.plan(seed)?;
        Ok(self.materialize(plan, container))
    }

    fn materialize<'c, C: TileContainer>(
        &mut self,
        plan: IslandPlan,
        container: &'c mut C,
    ) -> Generated<'c, C> {
        let (scale_min, scale_max) = self.params.scale_range;
        container.clear_children();
        for cell in &plan.cells {
            let scale = self.jitter.random_range(scale_min..scale_max);
            container.add_child(PlacedTile {
                coord: cell.coord,
                variant: cell.variant,
                noise: cell.noise,
                position: DVec3::new(cell.center.x, 0.0, cell.center.y),
                decorative_scale: scale,
                prefab: self.variants[cell.variant.0].instantiate(scale),
            });
        }

        let extent = plan.layout.extent();
        tracing::info!(
            seed = plan.stats.seed,
            placed = plan.stats.placed(),
            outside_boundary = plan.stats.outside_boundary,
            below_threshold = plan.stats.below_threshold,
            width = extent.width,
            height = extent.height,
            "island generated"
        );

        Generated {
            container,
            extent,
            stats: plan.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::DEFAULT_MIN_THRESHOLD;
    use crate::container::IslandMap;
    use crate::prefab::{Aabb, NodeDescriptor, PartRole, PartTransform};

    fn hex_tile() -> NodeDescriptor {
        NodeDescriptor::mesh(
            "hex_tile",
            Aabb::new(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(0.5, 0.1, 0.5)),
            PartTransform::IDENTITY,
        )
    }

    fn prop(name: &str) -> NodeDescriptor {
        NodeDescriptor::mesh(
            name,
            Aabb::new(DVec3::new(-0.1, 0.0, -0.1), DVec3::new(0.1, 0.4, 0.1)),
            PartTransform::from_translation(DVec3::new(0.0, 0.1, 0.0)),
        )
    }

    fn registry() -> PrefabRegistry {
        let mut reg = PrefabRegistry::new();
        reg.register(
            "earth",
            &NodeDescriptor::group("Scene", vec![hex_tile(), prop("rock")]),
        )
        .unwrap();
        reg.register(
            "forest",
            &NodeDescriptor::group("Scene", vec![hex_tile(), prop("trunk"), prop("leaves")]),
        )
        .unwrap();
        reg.register("meadow", &NodeDescriptor::group("Scene", vec![hex_tile()]))
            .unwrap();
        reg
    }

    fn seeded(seed: u32, jitter: u64) -> TerrainGenerator {
        TerrainGenerator::from_registry(
            registry(),
            GeneratorParams {
                seed: Some(seed),
                jitter_seed: Some(jitter),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_every_tile_inside_boundary() {
        let mut generator = seeded(42, 1);
        let mut map = IslandMap::new();
        let out = generator.generate(&mut map).unwrap();
        let radius = out.extent.boundary_radius();
        assert!(!out.container.is_empty(), "Seed 42 should produce some land");
        for tile in out.container.tiles() {
            let d = DVec2::new(tile.position.x, tile.position.z).length();
            assert!(d <= radius, "Tile {:?} at distance {d} > {radius}", tile.coord);
        }
    }

    #[test]
    fn test_every_tile_noise_at_least_min_threshold() {
        let mut generator = seeded(7, 1);
        let mut map = IslandMap::new();
        generator.generate(&mut map).unwrap();

        let field = NoiseField::with_output_range(7, 0.0, 1.25).unwrap();
        for tile in map.tiles() {
            assert!(tile.noise >= DEFAULT_MIN_THRESHOLD);
            let resampled = field.sample(tile.position.x / 1.8, tile.position.z / 1.8);
            assert_eq!(tile.noise, resampled);
        }
    }

    #[test]
    fn test_tiles_are_flat() {
        let mut generator = seeded(3, 1);
        let mut map = IslandMap::new();
        generator.generate(&mut map).unwrap();
        assert!(map.tiles().iter().all(|t| t.position.y == 0.0));
    }

    #[test]
    fn test_same_seed_same_occupancy() {
        let mut a = seeded(1234, 1);
        let mut b = seeded(1234, 999);
        let mut map_a = IslandMap::new();
        let mut map_b = IslandMap::new();
        a.generate(&mut map_a).unwrap();
        b.generate(&mut map_b).unwrap();
        assert_eq!(map_a.occupancy(), map_b.occupancy());
    }

    #[test]
    fn test_jitter_seed_reproduces_scales() {
        let mut a = seeded(5, 77);
        let mut b = seeded(5, 77);
        let mut map_a = IslandMap::new();
        let mut map_b = IslandMap::new();
        a.generate(&mut map_a).unwrap();
        b.generate(&mut map_b).unwrap();
        assert_eq!(map_a, map_b);
    }

    #[test]
    fn test_decorative_scale_applied_to_decorations_only() {
        let mut generator = seeded(11, 2);
        let mut map = IslandMap::new();
        generator.generate(&mut map).unwrap();
        for tile in map.tiles() {
            assert!((0.8..1.8).contains(&tile.decorative_scale));
            for part in tile.prefab.parts() {
                let expected = match part.role {
                    PartRole::Base => DVec3::ONE,
                    PartRole::Decorative => DVec3::splat(tile.decorative_scale),
                };
                assert_eq!(part.transform.scale, expected, "part {}", part.name);
            }
        }
        // Registered prefabs are never mutated.
        for variant in generator.variants() {
            assert!(variant.parts().iter().all(|p| p.transform.scale == DVec3::ONE));
        }
    }

    #[test]
    fn test_variant_matches_prefab() {
        let mut generator = seeded(21, 2);
        let mut map = IslandMap::new();
        generator.generate(&mut map).unwrap();
        let names = ["earth", "forest", "meadow"];
        for tile in map.tiles() {
            assert_eq!(tile.prefab.name(), names[tile.variant.0]);
        }
    }

    #[test]
    fn test_regeneration_replaces_previous_tiles() {
        let mut generator = seeded(8, 3);
        let mut map = IslandMap::new();
        generator.generate(&mut map).unwrap();

        generator.params.seed = Some(9);
        let stats = generator.generate(&mut map).unwrap().stats;
        assert_eq!(map.len(), stats.placed());
        assert_eq!(map.occupancy(), generator.plan(9).unwrap().occupancy());
    }

    #[test]
    fn test_stale_children_cleared() {
        let mut generator = seeded(8, 3);
        let mut tiles: Vec<PlacedTile> = Vec::new();
        generator.generate(&mut tiles).unwrap();
        let first_len = tiles.len();
        generator.generate(&mut tiles).unwrap();
        assert_eq!(tiles.len(), first_len, "Second run must not append to the first");
    }

    #[test]
    fn test_stats_account_for_every_cell() {
        let generator = seeded(99, 0);
        let plan = generator.plan(99).unwrap();
        let stats = plan.stats();
        assert_eq!(stats.cells_visited, 32 * 32);
        assert_eq!(
            stats.outside_boundary + stats.below_threshold + stats.placed(),
            stats.cells_visited
        );
        assert_eq!(stats.placed(), plan.cells().len());
        assert!(stats.outside_boundary > 0, "Corners must fall outside the island");
    }

    #[test]
    fn test_random_seed_is_reported() {
        let mut generator = TerrainGenerator::from_registry(registry(), GeneratorParams::default())
            .unwrap();
        let mut map = IslandMap::new();
        let stats = generator.generate(&mut map).unwrap().stats;
        let replay = generator.plan(stats.seed).unwrap();
        assert_eq!(map.occupancy(), replay.occupancy());
    }

    #[test]
    fn test_empty_variant_list() {
        let result = TerrainGenerator::new(Vec::new(), GeneratorParams::default());
        assert!(matches!(result, Err(TerrainError::EmptyVariantList)));
    }

    #[test]
    fn test_missing_base_leaves_container_untouched() {
        let mut reg = PrefabRegistry::new();
        reg.register("rocks", &prop("rock")).unwrap();
        let mut generator = TerrainGenerator::from_registry(
            reg,
            GeneratorParams {
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();

        let mut map = IslandMap::new();
        seeded(1, 1).generate(&mut map).unwrap();
        let before = map.clone();

        let err = generator.generate(&mut map).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::Configuration(ConfigurationError::MissingBasePart { .. })
        ));
        assert_eq!(map, before);
    }

    #[test]
    fn test_invalid_params_rejected_up_front() {
        let bad_range = GeneratorParams {
            noise_range: (1.0, 1.0),
            ..Default::default()
        };
        assert!(TerrainGenerator::from_registry(registry(), bad_range).is_err());

        let bad_scale = GeneratorParams {
            scale_range: (1.8, 0.8),
            ..Default::default()
        };
        assert!(matches!(
            TerrainGenerator::from_registry(registry(), bad_scale),
            Err(TerrainError::Configuration(
                ConfigurationError::InvalidScaleRange { .. }
            ))
        ));
    }

    #[test]
    fn test_thresholds_must_fit_noise_range() {
        let too_high = GeneratorParams {
            classifier: ClassifierParams {
                max_threshold: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            TerrainGenerator::from_registry(registry(), too_high),
            Err(TerrainError::Configuration(
                ConfigurationError::ThresholdsOutsideNoiseRange { .. }
            ))
        ));

        let too_low = GeneratorParams {
            noise_range: (0.5, 1.25),
            ..Default::default()
        };
        assert!(too_low.validate().is_err());

        // A narrower band range inside the noise range is fine.
        let inside = GeneratorParams {
            classifier: ClassifierParams {
                max_threshold: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(inside.validate().is_ok());
    }

    #[test]
    fn test_huge_footprint_errors_without_touching_container() {
        for size in [1e20, 1e308] {
            let mut reg = PrefabRegistry::new();
            reg.register(
                "giant",
                &NodeDescriptor::mesh(
                    "hex_tile",
                    Aabb::new(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(size, 0.1, size)),
                    PartTransform::IDENTITY,
                ),
            )
            .unwrap();
            let mut generator = TerrainGenerator::from_registry(
                reg,
                GeneratorParams {
                    seed: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();

            let mut map = IslandMap::new();
            seeded(1, 1).generate(&mut map).unwrap();
            let before = map.clone();

            let err = generator.generate(&mut map).unwrap_err();
            assert!(
                matches!(
                    err,
                    TerrainError::Configuration(
                        ConfigurationError::SampleOutOfRange { .. }
                            | ConfigurationError::InvalidExtent { .. }
                    )
                ),
                "size {size}: unexpected {err:?}"
            );
            assert_eq!(map, before);
        }
    }

    #[test]
    fn test_single_variant_fills_every_surviving_cell() {
        let mut reg = PrefabRegistry::new();
        reg.register("only", &hex_tile()).unwrap();
        let generator = TerrainGenerator::from_registry(
            reg,
            GeneratorParams {
                seed: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
        let plan = generator.plan(4).unwrap();
        assert!(plan.cells().iter().all(|c| c.variant == VariantId(0)));
        assert_eq!(plan.stats().placed_per_variant.len(), 1);
    }
}
