//! Destination containers for placed tiles.

use glam::DVec3;

use crate::grid::GridCoord;
use crate::prefab::{Prefab, VariantId};

/// One instantiated tile.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile {
    /// Cell the tile occupies.
    pub coord: GridCoord,
    /// Selected variant.
    pub variant: VariantId,
    /// Noise value that selected the variant.
    pub noise: f64,
    /// World position of the tile origin. Always on the `y = 0` plane.
    pub position: DVec3,
    /// Uniform scale applied to the decorative parts of `prefab`.
    pub decorative_scale: f64,
    /// The instantiated copy of the variant prefab.
    pub prefab: Prefab,
}

/// Anything a generator can populate: a scene node, an ECS parent, a plain list.
pub trait TileContainer {
    /// Remove every child.
    fn clear_children(&mut self);

    /// Attach one tile.
    fn add_child(&mut self, tile: PlacedTile);
}

impl TileContainer for Vec<PlacedTile> {
    fn clear_children(&mut self) {
        self.clear();
    }

    fn add_child(&mut self, tile: PlacedTile) {
        self.push(tile);
    }
}

/// In-memory island: the tiles of the most recent generation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IslandMap {
    tiles: Vec<PlacedTile>,
}

impl IslandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tiles in placement order.
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile at `coord`, if that cell is occupied.
    pub fn tile_at(&self, coord: GridCoord) -> Option<&PlacedTile> {
        self.tiles.iter().find(|t| t.coord == coord)
    }

    /// `(cell, variant)` for every tile, sorted by cell.
    pub fn occupancy(&self) -> Vec<(GridCoord, VariantId)> {
        let mut cells: Vec<_> = self.tiles.iter().map(|t| (t.coord, t.variant)).collect();
        cells.sort_unstable();
        cells
    }

    /// Number of tiles using `variant`.
    pub fn count_variant(&self, variant: VariantId) -> usize {
        self.tiles.iter().filter(|t| t.variant == variant).count()
    }
}

impl TileContainer for IslandMap {
    fn clear_children(&mut self) {
        self.tiles.clear();
    }

    fn add_child(&mut self, tile: PlacedTile) {
        self.tiles.push(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefab::{Aabb, NodeDescriptor, PartTransform, PrefabRegistry};

    fn tile(row: u32, col: u32, variant: usize) -> PlacedTile {
        let mut reg = PrefabRegistry::new();
        let id = reg
            .register(
                "tile",
                &NodeDescriptor::mesh(
                    "tile",
                    Aabb::new(DVec3::ZERO, DVec3::ONE),
                    PartTransform::IDENTITY,
                ),
            )
            .unwrap();
        PlacedTile {
            coord: GridCoord::new(row, col),
            variant: VariantId(variant),
            noise: 0.5,
            position: DVec3::ZERO,
            decorative_scale: 1.0,
            prefab: reg.get(id).unwrap().clone(),
        }
    }

    #[test]
    fn test_occupancy_sorted_by_cell() {
        let mut map = IslandMap::new();
        map.add_child(tile(3, 1, 2));
        map.add_child(tile(0, 2, 0));
        map.add_child(tile(0, 1, 1));

        assert_eq!(
            map.occupancy(),
            vec![
                (GridCoord::new(0, 1), VariantId(1)),
                (GridCoord::new(0, 2), VariantId(0)),
                (GridCoord::new(3, 1), VariantId(2)),
            ]
        );
        assert_eq!(map.count_variant(VariantId(0)), 1);
        assert_eq!(map.tile_at(GridCoord::new(3, 1)).unwrap().variant, VariantId(2));
        assert!(map.tile_at(GridCoord::new(9, 9)).is_none());
    }

    #[test]
    fn test_clear_children_empties_map() {
        let mut map = IslandMap::new();
        map.add_child(tile(0, 0, 0));
        map.clear_children();
        assert!(map.is_empty());
    }
}
