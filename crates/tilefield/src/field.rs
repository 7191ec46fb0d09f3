//! # Field Configuration and Driver
//!
//! [`FieldConfig`] describes one field (noise, shape, window mode and
//! optional decoration) and is usually loaded from TOML. [`FieldDriver`] owns
//! the generator built from it and reacts to reference-cell changes.
//!
//! ```text
//! tick(reference)
//!   ├─ reference unchanged? ──> None (no work)
//!   ├─ generate window around reference        (ground surface)
//!   ├─ find + generate limits, if configured   (overlay surface)
//!   ├─ trace boundary outline, if configured   (overlay surface, drawn last)
//!   └─ remember reference ──> Some(report)
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tilefield_core::{GridCoord, TileGenError, TileGenResult, TileId, TileSurface};
use tilefield_procedural::{
    BoundaryTracer, GenerationReport, GridGenerator, GridShape, LimitTiles, NoiseClassifier,
    NoiseParams, NoiseTable, OverlayReport, WindowMode,
};

use crate::structures::StructureConfig;

/// Configuration for one field.
///
/// ```toml
/// seed = 1234
/// amplitude = 1.0
/// lacunarity = 8.0
/// set = 0
/// window_mode = "replace"
///
/// [shape]
/// kind = "cross"
/// x = 40
/// y = 30
/// size = 3
///
/// [[noise.sets]]
/// [[noise.sets.layers]]
/// tile = 1
/// min_range = 0.0
/// max_range = 0.45
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct FieldConfig {
    /// Noise seed.
    #[serde(default)]
    pub seed: i32,
    /// Noise amplitude.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Noise lacunarity; must not be zero.
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f64,
    /// Noise set used by the field.
    #[serde(default)]
    pub set: usize,
    /// Window shape.
    pub shape: GridShape,
    /// Replace or additive regeneration.
    #[serde(default)]
    pub window_mode: WindowMode,
    /// Overlay tiles; no decoration when absent.
    #[serde(default)]
    pub limits: Option<LimitTiles>,
    /// Outline tile; no outline when absent.
    #[serde(default)]
    pub boundary_tile: Option<TileId>,
    /// The noise table.
    #[serde(default)]
    pub noise: NoiseTable,
    /// Structure spawning; disabled when absent.
    #[serde(default)]
    pub structures: Option<StructureConfig>,
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_lacunarity() -> f64 {
    8.0
}

impl FieldConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`] on malformed TOML, and any
    /// error from [`FieldConfig::validate`].
    pub fn from_toml_str(text: &str) -> TileGenResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| TileGenError::InvalidConfig(format!("Failed to parse field config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`] if the file cannot be read or
    /// parsed, and any error from [`FieldConfig::validate`].
    pub fn from_toml_file(path: &Path) -> TileGenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TileGenError::InvalidConfig(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks noise parameters, shape and noise table.
    ///
    /// # Errors
    ///
    /// Returns the first contract violation found.
    pub fn validate(&self) -> TileGenResult<()> {
        self.params()?;
        self.shape.validate()?;
        self.noise.validate()?;
        if let Some(structures) = &self.structures {
            structures.validate()?;
        }
        if self.noise.set(self.set).is_none() {
            tracing::warn!(set = self.set, sets = self.noise.len(), "field set not in noise table, field will be empty");
        }
        Ok(())
    }

    /// Validated noise parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidLacunarity`] or
    /// [`TileGenError::InvalidAmplitude`].
    pub fn params(&self) -> TileGenResult<NoiseParams> {
        NoiseParams::new(self.seed, self.amplitude, self.lacunarity)
    }

    /// A classifier over a shared copy of this configuration's table.
    #[must_use]
    pub fn classifier(&self) -> NoiseClassifier {
        NoiseClassifier::new(Arc::new(self.noise.clone()))
    }
}

/// What one regenerating [`FieldDriver::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Window generation counters.
    pub generation: GenerationReport,
    /// Decoration counters, if decoration is configured.
    pub overlay: Option<OverlayReport>,
    /// Outline cells painted.
    pub outline: usize,
}

/// Regenerates a field whenever the reference cell changes.
#[derive(Clone, Debug)]
pub struct FieldDriver {
    generator: GridGenerator,
    limits: Option<LimitTiles>,
    boundary: Option<BoundaryTracer>,
    last_reference: Option<GridCoord>,
    regenerations: u64,
}

impl FieldDriver {
    /// Builds a driver from `config`.
    ///
    /// # Errors
    ///
    /// Returns any validation error of `config`.
    pub fn new(config: &FieldConfig) -> TileGenResult<Self> {
        Self::with_classifier(config, config.classifier())
    }

    /// Builds a driver that classifies with `classifier` instead of the
    /// configuration's own table.
    ///
    /// # Errors
    ///
    /// Returns any validation error of `config`.
    pub fn with_classifier(config: &FieldConfig, classifier: NoiseClassifier) -> TileGenResult<Self> {
        config.validate()?;
        let generator = GridGenerator::new(classifier, config.params()?, config.set, config.shape)?
            .with_mode(config.window_mode);

        Ok(Self {
            generator,
            limits: config.limits,
            boundary: config.boundary_tile.map(BoundaryTracer::new),
            last_reference: None,
            regenerations: 0,
        })
    }

    /// The underlying generator.
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &GridGenerator {
        &self.generator
    }

    /// The outline tracer, if a boundary tile is configured.
    #[inline]
    #[must_use]
    pub const fn boundary(&self) -> Option<&BoundaryTracer> {
        self.boundary.as_ref()
    }

    /// Last reference cell a tick ran for.
    #[inline]
    #[must_use]
    pub const fn last_reference(&self) -> Option<GridCoord> {
        self.last_reference
    }

    /// Number of ticks that regenerated.
    #[inline]
    #[must_use]
    pub const fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Regenerates around `reference` unless it equals the last reference.
    ///
    /// The first tick always regenerates. Returns `None` when nothing was
    /// done.
    pub fn tick<S, O>(&mut self, reference: GridCoord, ground: &mut S, overlay: &mut O) -> Option<TickReport>
    where
        S: TileSurface + ?Sized,
        O: TileSurface + ?Sized,
    {
        if self.last_reference == Some(reference) {
            return None;
        }

        if let Some(tracer) = self.boundary.as_mut() {
            tracer.clear(overlay);
        }
        let generation = self.generator.generate(reference, ground);
        let overlay_report = self
            .limits
            .as_ref()
            .map(|tiles| self.generator.decorate(ground, overlay, tiles));
        let outline = self
            .boundary
            .as_mut()
            .map_or(0, |tracer| tracer.trace(reference, self.generator.shape(), overlay));

        self.last_reference = Some(reference);
        self.regenerations += 1;

        tracing::info!(
            reference = %reference,
            window = generation.window_len,
            generated = generation.generated,
            regenerations = self.regenerations,
            "field regenerated"
        );

        Some(TickReport {
            generation,
            overlay: overlay_report,
            outline,
        })
    }
}
