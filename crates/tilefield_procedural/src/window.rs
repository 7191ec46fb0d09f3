//! # Generation Cache and Active Window
//!
//! Two pieces of per-generator state:
//!
//! - [`GenerationCache`]: every cell ever classified and the tile it got
//!   (including "empty"). Entries are never removed, so revisiting an area
//!   reproduces it exactly even if the classifier would now say otherwise.
//! - [`ActiveWindow`]: the cells painted by the most recent pass, in
//!   insertion order and without duplicates.

use std::collections::{HashMap, HashSet};

use tilefield_core::{GridCoord, TileId};

/// Persistent coordinate to tile memory.
#[derive(Clone, Debug, Default)]
pub struct GenerationCache {
    entries: HashMap<GridCoord, Option<TileId>>,
}

impl GenerationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached classification of `coord`.
    ///
    /// The outer `Option` is "was it ever classified", the inner one is the
    /// tile it got.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<Option<TileId>> {
        self.entries.get(&coord).copied()
    }

    /// Returns true if `coord` was classified before.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Records `tile` for `coord` unless an entry already exists.
    ///
    /// Returns true if the entry was inserted.
    pub fn insert_if_absent(&mut self, coord: GridCoord, tile: Option<TileId>) -> bool {
        match self.entries.entry(coord) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(tile);
                true
            }
        }
    }

    /// Replaces the entry for `coord`.
    ///
    /// Only the limit pass does this, to pin decoration tiles.
    pub fn overwrite(&mut self, coord: GridCoord, tile: Option<TileId>) {
        self.entries.insert(coord, tile);
    }

    /// Number of cached cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was classified yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, Option<TileId>)> + '_ {
        self.entries.iter().map(|(coord, tile)| (*coord, *tile))
    }
}

/// Ordered, duplicate-free set of the cells painted by the last pass.
#[derive(Clone, Debug, Default)]
pub struct ActiveWindow {
    order: Vec<GridCoord>,
    members: HashSet<GridCoord>,
}

impl ActiveWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coord` if absent. Returns true if it was added.
    pub fn insert(&mut self, coord: GridCoord) -> bool {
        if self.members.insert(coord) {
            self.order.push(coord);
            true
        } else {
            false
        }
    }

    /// Returns true if `coord` is in the window.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.members.contains(&coord)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.order.iter().copied()
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the window is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Empties the window, returning its cells in insertion order.
    pub fn take(&mut self) -> Vec<GridCoord> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }
}
