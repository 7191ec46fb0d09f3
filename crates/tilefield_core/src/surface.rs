//! # Tile Surfaces
//!
//! The surface is where tiles are painted and the single source of truth for
//! "is a tile currently painted here". The generators never keep their own
//! copy of presence; neighbor classification reads it from the surface.
//!
//! Hosts plug their renderer-backed tile map in through [`TileSurface`].
//! [`MemorySurface`] is a plain hash-map surface used by tests, benches and
//! headless hosts.

use std::collections::HashMap;

use crate::coord::GridCoord;
use crate::tile::TileId;

/// A tile map the generators paint into.
pub trait TileSurface {
    /// Paints `tile` at `coord`; `None` clears the cell.
    fn set_tile(&mut self, coord: GridCoord, tile: Option<TileId>);

    /// Returns the tile painted at `coord`, if any.
    fn get_tile(&self, coord: GridCoord) -> Option<TileId>;

    /// Returns true if a tile is painted at `coord`.
    #[inline]
    fn has_tile(&self, coord: GridCoord) -> bool {
        self.get_tile(coord).is_some()
    }

    /// World-space position of the cell's origin corner.
    fn cell_to_world(&self, coord: GridCoord) -> (f64, f64);
}

/// Hash-map backed surface.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    /// Painted cells.
    tiles: HashMap<GridCoord, TileId>,
    /// World size of one cell.
    cell_size: f64,
    /// World position of cell (0, 0).
    origin: (f64, f64),
}

impl MemorySurface {
    /// Creates an empty surface with unit cells anchored at the world origin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(1.0, (0.0, 0.0))
    }

    /// Creates an empty surface with the given cell size and world origin.
    #[must_use]
    pub fn with_layout(cell_size: f64, origin: (f64, f64)) -> Self {
        Self {
            tiles: HashMap::new(),
            cell_size,
            origin,
        }
    }

    /// Number of painted cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if nothing is painted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates over painted cells (unordered).
    pub fn painted(&self) -> impl Iterator<Item = (GridCoord, TileId)> + '_ {
        self.tiles.iter().map(|(coord, tile)| (*coord, *tile))
    }

    /// Inclusive `(min, max)` corners of the painted area, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<(GridCoord, GridCoord)> {
        let mut iter = self.tiles.keys();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        for c in iter {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Some((min, max))
    }

    /// Removes every painted tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSurface for MemorySurface {
    fn set_tile(&mut self, coord: GridCoord, tile: Option<TileId>) {
        match tile {
            Some(tile) => {
                self.tiles.insert(coord, tile);
            }
            None => {
                self.tiles.remove(&coord);
            }
        }
    }

    #[inline]
    fn get_tile(&self, coord: GridCoord) -> Option<TileId> {
        self.tiles.get(&coord).copied()
    }

    #[inline]
    fn cell_to_world(&self, coord: GridCoord) -> (f64, f64) {
        (
            self.origin.0 + f64::from(coord.x) * self.cell_size,
            self.origin.1 + f64::from(coord.y) * self.cell_size,
        )
    }
}
