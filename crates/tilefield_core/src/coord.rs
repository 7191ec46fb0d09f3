//! # Grid Coordinates
//!
//! Integer cell addresses on the tile plane.

use serde::{Deserialize, Serialize};

/// Address of one tile cell.
///
/// The `layer` component is carried through every operation but never varied
/// by the generators: a window always lives on its centre's layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (columns, grows to the right).
    pub x: i32,
    /// Y coordinate (rows, grows upwards).
    pub y: i32,
    /// Plane the cell lives on.
    #[serde(default)]
    pub layer: i32,
}

impl GridCoord {
    /// The origin cell on layer 0.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Creates a new grid coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, layer: i32) -> Self {
        Self { x, y, layer }
    }

    /// Creates a coordinate on layer 0.
    #[inline]
    #[must_use]
    pub const fn flat(x: i32, y: i32) -> Self {
        Self { x, y, layer: 0 }
    }

    /// Returns the cell `(dx, dy)` away on the same layer.
    ///
    /// Wraps around at the `i32` range.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            layer: self.layer,
        }
    }

    /// Squared planar distance from the origin (layer ignored).
    #[inline]
    #[must_use]
    pub const fn planar_length_squared(self) -> u64 {
        let x = self.x.unsigned_abs() as u64;
        let y = self.y.unsigned_abs() as u64;
        x * x + y * y
    }

    /// Planar distance from the origin (layer ignored).
    #[inline]
    #[must_use]
    pub fn planar_length(self) -> f64 {
        (self.planar_length_squared() as f64).sqrt()
    }
}

impl std::ops::Add for GridCoord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.layer.wrapping_add(rhs.layer),
        )
    }
}

impl std::ops::Sub for GridCoord {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.layer.wrapping_sub(rhs.layer),
        )
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_keeps_layer() {
        let c = GridCoord::new(3, -2, 7);
        assert_eq!(c.offset(-1, 1), GridCoord::new(2, -1, 7));
    }

    #[test]
    fn test_planar_length_ignores_layer() {
        let c = GridCoord::new(3, 4, 99);
        assert_eq!(c.planar_length_squared(), 25);
        assert!((c.planar_length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arithmetic() {
        let a = GridCoord::new(1, 2, 0);
        let b = GridCoord::new(4, -1, 0);
        assert_eq!(a + b, GridCoord::new(5, 1, 0));
        assert_eq!(b - a, GridCoord::new(3, -3, 0));
    }

    #[test]
    fn test_edge_of_range_wraps() {
        let edge = GridCoord::new(i32::MAX, i32::MIN, 2);
        assert_eq!(edge.offset(1, -1), GridCoord::new(i32::MIN, i32::MAX, 2));
        assert_eq!(edge + GridCoord::new(1, 0, 0), GridCoord::new(i32::MIN, i32::MIN, 2));
        assert_eq!(edge - GridCoord::new(0, 1, 0), GridCoord::new(i32::MAX, i32::MAX, 2));

        let far = GridCoord::flat(i32::MIN, i32::MIN);
        assert_eq!(far.planar_length_squared(), 1 << 63);
    }
}
