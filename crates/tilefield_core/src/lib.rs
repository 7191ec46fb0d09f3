//! # TILEFIELD Core
//!
//! Value types shared by every tilefield crate:
//!
//! - [`GridCoord`]: integer `(x, y, layer)` cell address
//! - [`TileId`]: opaque tile handle (`Option<TileId>` is "maybe empty")
//! - [`TileSurface`]: the paint/presence collaborator the generators draw into
//! - [`TileGenError`]: contract violations, with the [`TileGenResult`] alias
//!
//! ## Example
//!
//! ```rust
//! use tilefield_core::{GridCoord, MemorySurface, TileId, TileSurface};
//!
//! let mut surface = MemorySurface::new();
//! surface.set_tile(GridCoord::flat(1, 2), Some(TileId::new(7)));
//! assert!(surface.has_tile(GridCoord::flat(1, 2)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod coord;
pub mod error;
pub mod surface;
pub mod tile;

pub use coord::GridCoord;
pub use error::{TileGenError, TileGenResult};
pub use surface::{MemorySurface, TileSurface};
pub use tile::TileId;
