//! # Grid Generation
//!
//! Computes the active window around a centre cell for one of three shapes,
//! fills it from the generation cache (classifying cells seen for the first
//! time) and paints it on a surface.
//!
//! Re-centering is always a full recompute of the window. Windows are small,
//! so there is no incremental diff.
//!
//! ## Shapes
//!
//! All loops run `i` outer and `j` inner over inclusive ranges, with half
//! extents computed by truncating integer division:
//!
//! | Shape | Range | Included when |
//! |-------|-------|---------------|
//! | `Standard { x, y }` | `±x/2`, `±y/2` | always |
//! | `Cross { .. }` | `±x/2`, `±y/2` | `\|i - offset_x\| <= size` or `\|j - offset_y\| <= size` |
//! | `Circular { size, Standard }` | `±size` | `sqrt(i² + j²) < size` |
//! | `Circular { size, Squared }` | `±size` | `i² + j² < size` |

use serde::{Deserialize, Serialize};
use tilefield_core::{GridCoord, TileGenError, TileGenResult, TileSurface};

use crate::classifier::{NoiseClassifier, NoiseParams};
use crate::limits::{LimitClassifier, LimitTiles, OverlayReport};
use crate::window::{ActiveWindow, GenerationCache};

/// Inclusion rule of a circular window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircularMode {
    /// Euclidean length below `size`.
    #[default]
    Standard,
    /// Squared length below `size`.
    Squared,
}

/// Window shape, in cells relative to the centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridShape {
    /// Full `(x/2*2 + 1) × (y/2*2 + 1)` rectangle.
    Standard {
        /// Width extent.
        x: i32,
        /// Height extent.
        y: i32,
    },
    /// Two perpendicular bands inside the Standard rectangle.
    Cross {
        /// Width extent.
        x: i32,
        /// Height extent.
        y: i32,
        /// Half width of each band.
        size: i32,
        /// Horizontal shift of the vertical band.
        #[serde(default)]
        offset_x: i32,
        /// Vertical shift of the horizontal band.
        #[serde(default)]
        offset_y: i32,
    },
    /// Disc of radius `size`.
    Circular {
        /// Radius (or squared radius in `Squared` mode).
        size: i32,
        /// Inclusion rule.
        #[serde(default)]
        mode: CircularMode,
    },
}

impl GridShape {
    /// Rejects negative extents and sizes.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::NegativeExtent`] naming the first negative
    /// field.
    pub fn validate(&self) -> TileGenResult<()> {
        let check = |what: &'static str, value: i32| {
            if value < 0 {
                Err(TileGenError::NegativeExtent { what, value })
            } else {
                Ok(())
            }
        };
        match *self {
            Self::Standard { x, y } => {
                check("x", x)?;
                check("y", y)
            }
            Self::Cross { x, y, size, .. } => {
                check("x", x)?;
                check("y", y)?;
                check("size", size)
            }
            Self::Circular { size, .. } => check("size", size),
        }
    }

    /// Half extents of the bounding box.
    #[must_use]
    pub const fn half_extents(&self) -> (i32, i32) {
        match *self {
            Self::Standard { x, y } | Self::Cross { x, y, .. } => (x / 2, y / 2),
            Self::Circular { size, .. } => (size, size),
        }
    }

    /// Returns true if the local offset `(i, j)` is part of the window.
    ///
    /// Offsets outside [`GridShape::half_extents`] are never visited by the
    /// generator, whatever this returns.
    #[must_use]
    pub fn contains_local(&self, i: i32, j: i32) -> bool {
        match *self {
            Self::Standard { .. } => true,
            Self::Cross { size, offset_x, offset_y, .. } => {
                let dx = i64::from(i) - i64::from(offset_x);
                let dy = i64::from(j) - i64::from(offset_y);
                let size = i64::from(size);
                (-size <= dx && dx <= size) || (-size <= dy && dy <= size)
            }
            Self::Circular { size, mode } => {
                let squared = i64::from(i) * i64::from(i) + i64::from(j) * i64::from(j);
                match mode {
                    #[allow(clippy::cast_precision_loss)]
                    CircularMode::Standard => (squared as f64).sqrt() < f64::from(size),
                    CircularMode::Squared => squared < i64::from(size),
                }
            }
        }
    }

    /// Local offsets of the window in generation order.
    #[must_use]
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        let (hx, hy) = self.half_extents();
        let mut offsets = Vec::new();
        for i in -hx..=hx {
            for j in -hy..=hy {
                if self.contains_local(i, j) {
                    offsets.push((i, j));
                }
            }
        }
        offsets
    }
}

/// What happens to the previous window on regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Clear the previous window's cells and empty the window first.
    #[default]
    Replace,
    /// Leave the previous window painted and merge the new one into it.
    Additive,
}

/// Counters from one [`GridGenerator::generate`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Cells of the new window.
    pub visited: usize,
    /// Cells classified for the first time.
    pub generated: usize,
    /// Cells served from the cache.
    pub reused: usize,
    /// Previous-window cells cleared before generating.
    pub cleared: usize,
    /// Window size after the call.
    pub window_len: usize,
}

/// Windowed tile generator.
///
/// Owns its cache, active window and limit buckets. Two generators never
/// share state; the only shared piece is the classifier's noise table.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tilefield_core::{GridCoord, MemorySurface, TileId};
/// use tilefield_procedural::{
///     GridGenerator, GridShape, NoiseClassifier, NoiseLayer, NoiseParams, NoiseSet, NoiseTable,
/// };
///
/// let table = NoiseTable::new(vec![NoiseSet::new(vec![NoiseLayer::new(TileId::new(1), 0.0, 1.0)])])?;
/// let classifier = NoiseClassifier::new(Arc::new(table));
/// let params = NoiseParams::new(42, 1.0, 8.0)?;
///
/// let mut generator = GridGenerator::new(classifier, params, 0, GridShape::Standard { x: 4, y: 4 })?;
/// let mut surface = MemorySurface::new();
/// let report = generator.generate(GridCoord::ORIGIN, &mut surface);
///
/// assert_eq!(report.window_len, 25);
/// assert_eq!(surface.len(), 25);
/// # Ok::<(), tilefield_core::TileGenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GridGenerator {
    classifier: NoiseClassifier,
    params: NoiseParams,
    set_index: usize,
    shape: GridShape,
    mode: WindowMode,
    cache: GenerationCache,
    window: ActiveWindow,
    limits: LimitClassifier,
}

impl GridGenerator {
    /// Creates a generator in [`WindowMode::Replace`].
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::NegativeExtent`] if `shape` is invalid.
    pub fn new(
        classifier: NoiseClassifier,
        params: NoiseParams,
        set_index: usize,
        shape: GridShape,
    ) -> TileGenResult<Self> {
        shape.validate()?;
        Ok(Self {
            classifier,
            params,
            set_index,
            shape,
            mode: WindowMode::default(),
            cache: GenerationCache::new(),
            window: ActiveWindow::new(),
            limits: LimitClassifier::new(),
        })
    }

    /// Sets the window mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the shape used by later calls.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::NegativeExtent`] and keeps the old shape if
    /// `shape` is invalid.
    pub fn set_shape(&mut self, shape: GridShape) -> TileGenResult<()> {
        shape.validate()?;
        self.shape = shape;
        Ok(())
    }

    /// Current shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Current window mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Sampling parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Noise set used for classification.
    #[inline]
    #[must_use]
    pub const fn set_index(&self) -> usize {
        self.set_index
    }

    /// Every cell classified so far.
    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    /// Cells painted by the last pass.
    #[inline]
    #[must_use]
    pub const fn window(&self) -> &ActiveWindow {
        &self.window
    }

    /// Zone buckets from the last [`GridGenerator::find_limits`].
    #[inline]
    #[must_use]
    pub const fn limits(&self) -> &LimitClassifier {
        &self.limits
    }

    /// Recomputes the window around `center` and paints it on `surface`.
    ///
    /// Cached cells are painted from the cache; new cells are classified at
    /// `surface.cell_to_world(coord)` and cached. In [`WindowMode::Replace`]
    /// the previous window is cleared from `surface` first.
    pub fn generate<S: TileSurface + ?Sized>(
        &mut self,
        center: GridCoord,
        surface: &mut S,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();

        if self.mode == WindowMode::Replace {
            for coord in self.window.take() {
                surface.set_tile(coord, None);
                report.cleared += 1;
            }
        }

        let (hx, hy) = self.shape.half_extents();
        for i in -hx..=hx {
            for j in -hy..=hy {
                if !self.shape.contains_local(i, j) {
                    continue;
                }
                let coord = center.offset(i, j);
                report.visited += 1;

                if let Some(tile) = self.cache.get(coord) {
                    surface.set_tile(coord, tile);
                    report.reused += 1;
                } else {
                    let (world_x, world_y) = surface.cell_to_world(coord);
                    let tile = self.classifier.classify(&self.params, world_x, world_y, self.set_index);
                    surface.set_tile(coord, tile);
                    self.cache.insert_if_absent(coord, tile);
                    report.generated += 1;
                }
                self.window.insert(coord);
            }
        }

        report.window_len = self.window.len();
        tracing::debug!(
            center = %center,
            visited = report.visited,
            generated = report.generated,
            reused = report.reused,
            cleared = report.cleared,
            window = report.window_len,
            "window generated"
        );
        report
    }

    /// Rebuilds the zone buckets from the presence on `surface`.
    pub fn find_limits<S: TileSurface + ?Sized>(&mut self, surface: &mut S) {
        self.limits.find_limits(&self.window, &self.cache, surface);
    }

    /// Paints the overlay tiles of the current buckets on `overlay`.
    pub fn generate_limits<S: TileSurface + ?Sized>(
        &mut self,
        overlay: &mut S,
        tiles: &LimitTiles,
    ) -> OverlayReport {
        self.limits.generate_limits(&self.window, &mut self.cache, overlay, tiles)
    }

    /// [`GridGenerator::find_limits`] then [`GridGenerator::generate_limits`].
    ///
    /// Overlay cells decorated for an earlier window that are no longer in
    /// the window are cleared first and counted in
    /// [`OverlayReport::cleared`].
    pub fn decorate<S, O>(&mut self, surface: &mut S, overlay: &mut O, tiles: &LimitTiles) -> OverlayReport
    where
        S: TileSurface + ?Sized,
        O: TileSurface + ?Sized,
    {
        let departed = self.limits.clear_departed(&self.window, overlay, tiles);
        self.find_limits(surface);
        let mut report = self.generate_limits(overlay, tiles);
        report.cleared += departed;
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::noise_table::{NoiseLayer, NoiseSet, NoiseTable};
    use tilefield_core::{MemorySurface, TileId};

    fn full_classifier() -> NoiseClassifier {
        let table = NoiseTable::new(vec![NoiseSet::new(vec![NoiseLayer::new(TileId::new(1), 0.0, 1.0)])])
            .unwrap();
        NoiseClassifier::new(Arc::new(table))
    }

    fn generator(shape: GridShape) -> GridGenerator {
        GridGenerator::new(full_classifier(), NoiseParams::new(7, 1.0, 10.0).unwrap(), 0, shape).unwrap()
    }

    #[test]
    fn test_standard_2x2_is_nine_cells() {
        let offsets = GridShape::Standard { x: 2, y: 2 }.offsets();
        assert_eq!(offsets.len(), 9);
        for i in -1..=1 {
            for j in -1..=1 {
                assert!(offsets.contains(&(i, j)));
            }
        }
        // i outer, j inner
        assert_eq!(offsets[0], (-1, -1));
        assert_eq!(offsets[1], (-1, 0));
    }

    #[test]
    fn test_standard_odd_extent_truncates() {
        // 3 / 2 == 1
        assert_eq!(GridShape::Standard { x: 3, y: 5 }.half_extents(), (1, 2));
        assert_eq!(GridShape::Standard { x: 3, y: 5 }.offsets().len(), 15);
    }

    #[test]
    fn test_cross_bands() {
        let shape = GridShape::Cross { x: 10, y: 10, size: 1, offset_x: 0, offset_y: 0 };
        assert!(!shape.contains_local(5, 5));
        assert!(shape.contains_local(0, 5));
        assert!(shape.contains_local(1, 5));
        assert!(shape.contains_local(-1, 5));
        assert!(!shape.contains_local(2, 5));
        assert!(shape.contains_local(5, 1));
        assert!(shape.contains_local(5, -1));
        assert!(!shape.contains_local(5, -2));
    }

    #[test]
    fn test_cross_offsets_shift_bands() {
        let shape = GridShape::Cross { x: 10, y: 10, size: 0, offset_x: 2, offset_y: -3 };
        assert!(shape.contains_local(2, 4));
        assert!(shape.contains_local(-4, -3));
        assert!(!shape.contains_local(0, 0));
    }

    #[test]
    fn test_circular_modes() {
        let standard = GridShape::Circular { size: 5, mode: CircularMode::Standard };
        assert!(standard.contains_local(3, 0));
        assert!(standard.contains_local(3, 3));
        assert!(!standard.contains_local(5, 0));

        let squared = GridShape::Circular { size: 5, mode: CircularMode::Squared };
        assert!(squared.contains_local(2, 0));
        assert!(squared.contains_local(1, 1));
        assert!(!squared.contains_local(3, 0));
        assert_eq!(squared.offsets().len(), 9 + 4);
    }

    #[test]
    fn test_validate_rejects_negative() {
        assert_eq!(
            GridShape::Standard { x: -1, y: 2 }.validate(),
            Err(TileGenError::NegativeExtent { what: "x", value: -1 })
        );
        assert!(matches!(
            GridShape::Cross { x: 4, y: 4, size: -2, offset_x: 0, offset_y: 0 }.validate(),
            Err(TileGenError::NegativeExtent { what: "size", .. })
        ));
        assert!(GridShape::Circular { size: 0, mode: CircularMode::Standard }.validate().is_ok());

        let result = GridGenerator::new(
            full_classifier(),
            NoiseParams::new(0, 1.0, 1.0).unwrap(),
            0,
            GridShape::Circular { size: -1, mode: CircularMode::Squared },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_shape_keeps_old_on_error() {
        let mut gen = generator(GridShape::Standard { x: 2, y: 2 });
        assert!(gen.set_shape(GridShape::Standard { x: 2, y: -2 }).is_err());
        assert_eq!(*gen.shape(), GridShape::Standard { x: 2, y: 2 });
    }

    #[test]
    fn test_replace_mode_clears_previous_window() {
        let mut gen = generator(GridShape::Standard { x: 2, y: 2 });
        let mut surface = MemorySurface::new();

        let first = gen.generate(GridCoord::ORIGIN, &mut surface);
        assert_eq!(first.generated, 9);
        assert_eq!(first.cleared, 0);

        let second = gen.generate(GridCoord::flat(10, 0), &mut surface);
        assert_eq!(second.cleared, 9);
        assert_eq!(second.window_len, 9);
        assert_eq!(surface.len(), 9);
        assert!(!surface.has_tile(GridCoord::ORIGIN));
        assert_eq!(gen.cache().len(), 18);
    }

    #[test]
    fn test_decorate_clears_overlay_left_behind() {
        let mut gen = generator(GridShape::Standard { x: 4, y: 4 });
        let mut tiles = LimitTiles::default();
        tiles.set(crate::limits::Zone::CornerLeftBot, Some(TileId::new(20)));
        let mut ground = MemorySurface::new();
        let mut overlay = MemorySurface::new();

        gen.generate(GridCoord::ORIGIN, &mut ground);
        let first = gen.decorate(&mut ground, &mut overlay, &tiles);
        assert_eq!(first, OverlayReport { painted: 1, cleared: 0 });

        for step in 1..=10 {
            let center = GridCoord::flat(step * 10, 0);
            gen.generate(center, &mut ground);
            let report = gen.decorate(&mut ground, &mut overlay, &tiles);

            assert_eq!(report, OverlayReport { painted: 1, cleared: 1 });
            assert_eq!(overlay.len(), 1);
            assert_eq!(overlay.get_tile(center.offset(-2, -2)), Some(TileId::new(20)));
        }
        assert_eq!(overlay.get_tile(GridCoord::flat(-2, -2)), None);
    }

    #[test]
    fn test_window_at_range_edge() {
        let mut gen = generator(GridShape::Standard { x: 4, y: 4 });
        let mut surface = MemorySurface::new();

        let report = gen.generate(GridCoord::flat(i32::MAX, i32::MIN), &mut surface);
        assert_eq!(report.window_len, 25);
        assert!(surface.has_tile(GridCoord::flat(i32::MIN + 1, i32::MAX - 1)));
    }

    #[test]
    fn test_additive_mode_merges() {
        let mut gen = generator(GridShape::Standard { x: 2, y: 2 }).with_mode(WindowMode::Additive);
        let mut surface = MemorySurface::new();

        gen.generate(GridCoord::ORIGIN, &mut surface);
        let report = gen.generate(GridCoord::flat(1, 0), &mut surface);

        assert_eq!(report.cleared, 0);
        assert_eq!(report.reused, 6);
        assert_eq!(report.generated, 3);
        assert_eq!(report.window_len, 12);
        assert_eq!(surface.len(), 12);
    }

    #[test]
    fn test_revisit_reuses_cache() {
        let mut gen = generator(GridShape::Circular { size: 3, mode: CircularMode::Standard });
        let mut surface = MemorySurface::new();

        gen.generate(GridCoord::ORIGIN, &mut surface);
        gen.generate(GridCoord::flat(50, 50), &mut surface);
        let back = gen.generate(GridCoord::ORIGIN, &mut surface);

        assert_eq!(back.generated, 0);
        assert_eq!(back.reused, back.visited);
    }

    #[test]
    fn test_window_keeps_center_layer() {
        let mut gen = generator(GridShape::Standard { x: 2, y: 0 });
        let mut surface = MemorySurface::new();
        gen.generate(GridCoord::new(0, 0, 3), &mut surface);
        assert!(gen.window().iter().all(|c| c.layer == 3));
    }

    #[test]
    fn test_shape_from_toml() {
        let shape: GridShape = toml::from_str("kind = \"cross\"\nx = 40\ny = 30\nsize = 3").unwrap();
        assert_eq!(shape, GridShape::Cross { x: 40, y: 30, size: 3, offset_x: 0, offset_y: 0 });

        let shape: GridShape = toml::from_str("kind = \"circular\"\nsize = 4\nmode = \"squared\"").unwrap();
        assert_eq!(shape, GridShape::Circular { size: 4, mode: CircularMode::Squared });
    }
}
