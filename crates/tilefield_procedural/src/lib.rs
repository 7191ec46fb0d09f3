//! # TILEFIELD Procedural Generation
//!
//! Deterministic tile fields generated around a moving centre.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and table always produce the same field
//! 2. **Cached**: A cell is classified once; revisits replay the cache
//! 3. **Windowed**: Only the window around the centre is painted
//! 4. **Decorated**: Window edges get corner / border overlay tiles
//!
//! ## Core Components
//!
//! - [`NoiseClassifier`]: world position to tile id through a [`NoiseTable`]
//! - [`GridGenerator`]: Standard / Cross / Circular windows over a
//!   [`GenerationCache`] and [`ActiveWindow`]
//! - [`LimitClassifier`]: twelve-zone edge classification and overlay painting
//! - [`BoundaryTracer`]: outline of the current window shape
//! - [`resolve_wall_sprite`]: 19-way wall sprite selection
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tilefield_core::{GridCoord, MemorySurface, TileId};
//! use tilefield_procedural::{
//!     GridGenerator, GridShape, LimitTiles, NoiseClassifier, NoiseParams, NoiseTable,
//! };
//!
//! let table = NoiseTable::from_toml_str(
//!     "[[sets]]\n[[sets.layers]]\ntile = 1\nmin_range = 0.0\nmax_range = 1.0\n",
//! )?;
//! let classifier = NoiseClassifier::new(Arc::new(table));
//! let params = NoiseParams::new(1234, 1.0, 8.0)?;
//! let shape = GridShape::Cross { x: 20, y: 20, size: 2, offset_x: 0, offset_y: 0 };
//!
//! let mut generator = GridGenerator::new(classifier, params, 0, shape)?;
//! let mut ground = MemorySurface::new();
//! let mut overlay = MemorySurface::new();
//!
//! generator.generate(GridCoord::ORIGIN, &mut ground);
//! let report = generator.decorate(&mut ground, &mut overlay, &LimitTiles::uniform(TileId::new(9)));
//! assert!(report.painted > 0);
//! # Ok::<(), tilefield_core::TileGenError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod boundary;
pub mod classifier;
pub mod grid;
pub mod limits;
pub mod noise;
pub mod noise_table;
pub mod wall;
pub mod window;

pub use boundary::{outline_offsets, BoundaryTracer};
pub use classifier::{NoiseClassifier, NoiseParams};
pub use grid::{CircularMode, GenerationReport, GridGenerator, GridShape, WindowMode};
pub use limits::{LimitClassifier, LimitTiles, OverlayReport, Zone, ZoneFamily};
pub use noise::{NoiseSeed, SimplexNoise};
pub use noise_table::{NoiseLayer, NoiseSet, NoiseTable};
pub use wall::{paint_wall_sprites, resolve_wall_sprite, wall_sprite_at, Neighborhood, WallSprite, WallSprites};
pub use window::{ActiveWindow, GenerationCache};
