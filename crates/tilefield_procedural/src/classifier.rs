//! # Noise Classification
//!
//! Maps a world position to a tile id:
//!
//! 1. Shift and scale the position: `(p + seed) * amplitude / lacunarity`
//! 2. Sample coherent noise there, remapped and clamped into `[0, 1]`
//! 3. Return the tile of the first layer of the selected set containing it
//!
//! The classifier is a pure function of its inputs and the immutable table,
//! which is what makes the generation cache an optimization only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tilefield_core::{TileGenError, TileGenResult, TileId};

use crate::noise::SimplexNoise;
use crate::noise_table::NoiseTable;

/// Validated sampling parameters.
///
/// Construction rejects a zero or non-finite lacunarity and a non-finite
/// amplitude, so a `NoiseParams` value can never scale a position into NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNoiseParams", into = "RawNoiseParams")]
pub struct NoiseParams {
    seed: i32,
    amplitude: f64,
    lacunarity: f64,
}

/// Unchecked serde mirror of [`NoiseParams`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawNoiseParams {
    seed: i32,
    amplitude: f64,
    lacunarity: f64,
}

impl NoiseParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidLacunarity`] if `lacunarity` is zero or
    /// not finite, and [`TileGenError::InvalidAmplitude`] if `amplitude` is
    /// not finite.
    pub fn new(seed: i32, amplitude: f64, lacunarity: f64) -> TileGenResult<Self> {
        if !amplitude.is_finite() {
            return Err(TileGenError::InvalidAmplitude(amplitude));
        }
        if lacunarity == 0.0 || !lacunarity.is_finite() {
            return Err(TileGenError::InvalidLacunarity(lacunarity));
        }
        Ok(Self { seed, amplitude, lacunarity })
    }

    /// Seed added to both world coordinates before scaling.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Scale numerator.
    #[inline]
    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Scale denominator; never zero.
    #[inline]
    #[must_use]
    pub const fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    /// Maps a world coordinate to noise space.
    #[inline]
    #[must_use]
    pub fn scale(&self, world: f64) -> f64 {
        (world + f64::from(self.seed)) * self.amplitude / self.lacunarity
    }
}

impl TryFrom<RawNoiseParams> for NoiseParams {
    type Error = TileGenError;

    fn try_from(raw: RawNoiseParams) -> Result<Self, Self::Error> {
        Self::new(raw.seed, raw.amplitude, raw.lacunarity)
    }
}

impl From<NoiseParams> for RawNoiseParams {
    fn from(params: NoiseParams) -> Self {
        Self {
            seed: params.seed,
            amplitude: params.amplitude,
            lacunarity: params.lacunarity,
        }
    }
}

/// Noise-to-tile classifier over a shared, read-only table.
#[derive(Clone, Debug)]
pub struct NoiseClassifier {
    table: Arc<NoiseTable>,
    noise: SimplexNoise,
}

impl NoiseClassifier {
    /// Creates a classifier over `table`.
    #[must_use]
    pub fn new(table: Arc<NoiseTable>) -> Self {
        Self {
            table,
            noise: SimplexNoise::default(),
        }
    }

    /// The table this classifier reads.
    #[inline]
    #[must_use]
    pub fn table(&self) -> &Arc<NoiseTable> {
        &self.table
    }

    /// Noise value in `[0, 1]` at a world position.
    #[inline]
    #[must_use]
    pub fn noise_value(&self, params: &NoiseParams, world_x: f64, world_y: f64) -> f64 {
        self.noise.sample_unit(params.scale(world_x), params.scale(world_y))
    }

    /// Classifies a world position with set `set_index`.
    ///
    /// Returns `None` when the value matches no layer, and also when the set
    /// is not configured: a missing set degrades to empty, it never faults.
    #[must_use]
    pub fn classify(
        &self,
        params: &NoiseParams,
        world_x: f64,
        world_y: f64,
        set_index: usize,
    ) -> Option<TileId> {
        let Some(set) = self.table.set(set_index) else {
            tracing::trace!(set_index, sets = self.table.len(), "noise set not configured");
            return None;
        };
        set.lookup(self.noise_value(params, world_x, world_y))
    }

    /// Classifies with unvalidated parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`NoiseParams::new`] validation errors.
    pub fn classify_raw(
        &self,
        seed: i32,
        amplitude: f64,
        lacunarity: f64,
        world_x: f64,
        world_y: f64,
        set_index: usize,
    ) -> TileGenResult<Option<TileId>> {
        let params = NoiseParams::new(seed, amplitude, lacunarity)?;
        Ok(self.classify(&params, world_x, world_y, set_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_table::{NoiseLayer, NoiseSet};

    fn two_band_table() -> Arc<NoiseTable> {
        Arc::new(
            NoiseTable::new(vec![NoiseSet::new(vec![
                NoiseLayer::new(TileId::new(1), 0.0, 0.5),
                NoiseLayer::new(TileId::new(2), 0.5, 1.0),
            ])])
            .unwrap(),
        )
    }

    #[test]
    fn test_zero_lacunarity_rejected() {
        assert_eq!(NoiseParams::new(0, 1.0, 0.0), Err(TileGenError::InvalidLacunarity(0.0)));
        assert!(matches!(
            NoiseParams::new(0, 1.0, f64::NAN),
            Err(TileGenError::InvalidLacunarity(_))
        ));
        assert!(matches!(
            NoiseParams::new(0, f64::INFINITY, 1.0),
            Err(TileGenError::InvalidAmplitude(_))
        ));

        let classifier = NoiseClassifier::new(two_band_table());
        assert!(classifier.classify_raw(0, 1.0, 0.0, 1.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_scale_formula() {
        let params = NoiseParams::new(10, 2.0, 4.0).unwrap();
        assert!((params.scale(6.0) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_is_pure() {
        let classifier = NoiseClassifier::new(two_band_table());
        let params = NoiseParams::new(1234, 1.0, 7.5).unwrap();

        for i in -50..50 {
            let x = f64::from(i) * 1.3;
            let y = f64::from(i) * -0.7;
            let a = classifier.classify(&params, x, y, 0);
            let b = classifier.classify(&params, x, y, 0);
            assert_eq!(a, b);
            assert!(a.is_some(), "Two bands covering [0, 1] always match");
        }
    }

    #[test]
    fn test_missing_set_is_empty() {
        let classifier = NoiseClassifier::new(two_band_table());
        let params = NoiseParams::new(0, 1.0, 1.0).unwrap();
        assert_eq!(classifier.classify(&params, 3.0, 4.0, 9), None);

        let empty = NoiseClassifier::new(Arc::new(NoiseTable::default()));
        assert_eq!(empty.classify(&params, 3.0, 4.0, 0), None);
    }

    #[test]
    fn test_seed_shifts_the_field() {
        let classifier = NoiseClassifier::new(two_band_table());
        let a = NoiseParams::new(0, 1.0, 3.0).unwrap();
        let b = NoiseParams::new(5, 1.0, 3.0).unwrap();

        // seed 5 at x is seed 0 at x + 5
        let shifted = classifier.noise_value(&b, 2.0, 2.0);
        let direct = classifier.noise_value(&a, 7.0, 7.0);
        assert!((shifted - direct).abs() < 1e-12);
    }

    #[test]
    fn test_huge_amplitude_classifies() {
        let classifier = NoiseClassifier::new(two_band_table());
        let params = NoiseParams::new(0, 1.0e10, 1.0).unwrap();

        assert!(classifier.classify(&params, -1.0, -1.0, 0).is_some());
        assert!(classifier.classify(&params, 1.0, 1.0, 0).is_some());
        assert!(classifier.classify(&params, -1.0, 1.0, 0).is_some());
    }

    #[test]
    fn test_params_deserialize_validates() {
        let ok: NoiseParams = toml::from_str("seed = 3\namplitude = 1.0\nlacunarity = 2.0").unwrap();
        assert_eq!(ok.seed(), 3);

        let bad: Result<NoiseParams, _> = toml::from_str("seed = 3\namplitude = 1.0\nlacunarity = 0.0");
        assert!(bad.is_err());
    }
}
