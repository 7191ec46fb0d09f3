//! # TILEFIELD
//!
//! Host-side integration of the tile field engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        host update loop                        │
//! │                    (reference cell per frame)                  │
//! └───────────────┬───────────────────────────────┬────────────────┘
//!                 │                               │
//!       ┌─────────▼─────────┐           ┌─────────▼─────────┐
//!       │   FieldDriver     │           │ StructureSpawner  │
//!       │  one generator    │           │ one generator per │
//!       │  + limits/outline │           │ structure         │
//!       └─────────┬─────────┘           └─────────┬─────────┘
//!                 │                               │
//!       ┌─────────▼───────────────────────────────▼─────────┐
//!       │      tilefield_procedural (GridGenerator)         │
//!       │  NoiseClassifier → GenerationCache → ActiveWindow │
//!       │              → LimitClassifier                    │
//!       └─────────────────────────┬─────────────────────────┘
//!                                 │
//!                     ground / overlay / wall surfaces
//! ```
//!
//! ## Modules
//!
//! - `field`: TOML configuration and the change-triggered driver
//! - `structures`: randomized cross-shaped structures along the path

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod field;
pub mod structures;

pub use tilefield_core as core;
pub use tilefield_procedural as procedural;

pub use field::{FieldConfig, FieldDriver, TickReport};
pub use structures::{SpawnReport, Structure, StructureConfig, StructurePlan, StructureSpawner};
