//! # Tilefield Error Types
//!
//! Contract violations that can occur while configuring or driving the
//! generators. Configuration *lookups* (missing noise set, empty layer table)
//! are not errors: they degrade to an empty tile.

use thiserror::Error;

/// Errors that can occur in the tilefield crates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileGenError {
    /// Lacunarity is zero or not finite; the noise scaling would divide by it.
    #[error("invalid lacunarity {0}: must be finite and non-zero")]
    InvalidLacunarity(f64),

    /// Amplitude is not finite.
    #[error("invalid amplitude {0}: must be finite")]
    InvalidAmplitude(f64),

    /// A shape extent or size is negative.
    #[error("negative {what}: {value}")]
    NegativeExtent {
        /// Which parameter was negative.
        what: &'static str,
        /// The offending value.
        value: i32,
    },

    /// A noise layer range is outside [0, 1] or inverted.
    #[error("invalid noise range in set {set}, layer {layer}: [{min}, {max}]")]
    InvalidNoiseRange {
        /// Set index.
        set: usize,
        /// Layer index within the set.
        layer: usize,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for tilefield operations.
pub type TileGenResult<T> = Result<T, TileGenError>;
