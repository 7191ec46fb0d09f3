//! Tile handles.

use serde::{Deserialize, Serialize};

/// Opaque handle to a tile definition.
///
/// Two handles are equal iff they reference the same definition. Absence of a
/// tile ("empty") is always expressed as `Option<TileId>::None`, never as a
/// sentinel id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u16);

impl TileId {
    /// Creates a tile handle from its raw id.
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for TileId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}
