//! # Noise Tables
//!
//! Ordered value ranges mapped to tile ids. A table holds one or more sets;
//! a generator picks its set by index. Tables are built once (usually from a
//! TOML file) and are read-only afterwards, so they are shared by `Arc`.
//!
//! ```toml
//! [[sets]]
//! [[sets.layers]]
//! tile = 1
//! min_range = 0.0
//! max_range = 0.45
//!
//! [[sets.layers]]
//! tile = 2
//! min_range = 0.45
//! max_range = 1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tilefield_core::{TileGenError, TileGenResult, TileId};

/// One value range and the tile it produces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Tile produced when the noise value falls in range.
    pub tile: TileId,
    /// Inclusive lower bound, in `[0, 1]`.
    pub min_range: f64,
    /// Inclusive upper bound, in `[0, 1]`.
    pub max_range: f64,
}

impl NoiseLayer {
    /// Creates a layer.
    #[must_use]
    pub const fn new(tile: TileId, min_range: f64, max_range: f64) -> Self {
        Self { tile, min_range, max_range }
    }

    /// Returns true if `value` lies in `[min_range, max_range]`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_range && value <= self.max_range
    }
}

/// Ordered layers; the first layer containing the value wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseSet {
    /// Layers in priority order.
    #[serde(default)]
    pub layers: Vec<NoiseLayer>,
}

impl NoiseSet {
    /// Creates a set from layers in priority order.
    #[must_use]
    pub fn new(layers: Vec<NoiseLayer>) -> Self {
        Self { layers }
    }

    /// Returns the tile of the first layer containing `value`.
    #[inline]
    #[must_use]
    pub fn lookup(&self, value: f64) -> Option<TileId> {
        self.layers.iter().find(|layer| layer.contains(value)).map(|layer| layer.tile)
    }
}

/// All configured noise sets, indexed by set number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseTable {
    /// Sets by index.
    #[serde(default)]
    pub sets: Vec<NoiseSet>,
}

impl NoiseTable {
    /// Builds a validated table.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidNoiseRange`] if any layer range is not
    /// inside `[0, 1]` or has `min_range > max_range`.
    pub fn new(sets: Vec<NoiseSet>) -> TileGenResult<Self> {
        let table = Self { sets };
        table.validate()?;
        Ok(table)
    }

    /// Parses and validates a table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`] on malformed TOML and
    /// [`TileGenError::InvalidNoiseRange`] on bad ranges.
    pub fn from_toml_str(text: &str) -> TileGenResult<Self> {
        let table: Self = toml::from_str(text)
            .map_err(|e| TileGenError::InvalidConfig(format!("Failed to parse noise table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Reads, parses and validates a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`] if the file cannot be read or
    /// parsed, and [`TileGenError::InvalidNoiseRange`] on bad ranges.
    pub fn from_toml_file(path: &Path) -> TileGenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TileGenError::InvalidConfig(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every layer range.
    ///
    /// # Errors
    ///
    /// Returns the first offending layer as [`TileGenError::InvalidNoiseRange`].
    pub fn validate(&self) -> TileGenResult<()> {
        for (set_index, set) in self.sets.iter().enumerate() {
            for (layer_index, layer) in set.layers.iter().enumerate() {
                let in_unit = (0.0..=1.0).contains(&layer.min_range)
                    && (0.0..=1.0).contains(&layer.max_range);
                if !in_unit || layer.min_range > layer.max_range {
                    tracing::warn!(
                        set = set_index,
                        layer = layer_index,
                        min = layer.min_range,
                        max = layer.max_range,
                        "rejecting noise layer range"
                    );
                    return Err(TileGenError::InvalidNoiseRange {
                        set: set_index,
                        layer: layer_index,
                        min: layer.min_range,
                        max: layer.max_range,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the set at `index`, if configured.
    #[inline]
    #[must_use]
    pub fn set(&self, index: usize) -> Option<&NoiseSet> {
        self.sets.get(index)
    }

    /// Number of configured sets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if no set is configured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r"
        [[sets]]
        [[sets.layers]]
        tile = 1
        min_range = 0.0
        max_range = 0.5

        [[sets.layers]]
        tile = 2
        min_range = 0.5
        max_range = 1.0

        [[sets]]
    ";

    #[test]
    fn test_parse_toml() {
        let table = NoiseTable::from_toml_str(TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.set(0).unwrap().layers.len(), 2);
        assert!(table.set(1).unwrap().layers.is_empty());
        assert!(table.set(2).is_none());
    }

    #[test]
    fn test_first_match_wins_on_shared_bound() {
        let table = NoiseTable::from_toml_str(TABLE).unwrap();
        let set = table.set(0).unwrap();
        assert_eq!(set.lookup(0.5), Some(TileId::new(1)));
        assert_eq!(set.lookup(0.0), Some(TileId::new(1)));
        assert_eq!(set.lookup(1.0), Some(TileId::new(2)));
    }

    #[test]
    fn test_gap_yields_empty() {
        let set = NoiseSet::new(vec![
            NoiseLayer::new(TileId::new(1), 0.0, 0.2),
            NoiseLayer::new(TileId::new(2), 0.8, 1.0),
        ]);
        assert_eq!(set.lookup(0.5), None);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = NoiseTable::new(vec![NoiseSet::new(vec![NoiseLayer::new(TileId::new(1), 0.7, 0.2)])])
            .unwrap_err();
        assert!(matches!(err, TileGenError::InvalidNoiseRange { set: 0, layer: 0, .. }));
    }

    #[test]
    fn test_rejects_out_of_unit_range() {
        let err = NoiseTable::new(vec![
            NoiseSet::default(),
            NoiseSet::new(vec![NoiseLayer::new(TileId::new(1), 0.0, 1.5)]),
        ])
        .unwrap_err();
        assert!(matches!(err, TileGenError::InvalidNoiseRange { set: 1, .. }));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = NoiseTable::from_toml_str("sets = 3").unwrap_err();
        assert!(matches!(err, TileGenError::InvalidConfig(_)));
    }
}
