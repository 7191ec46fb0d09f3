//! # Boundary Outlines
//!
//! Paints a single border tile along the outline of the current window
//! shape, usually on its own surface so it can be toggled as a debug view.
//! Each trace clears the previous outline first.

use tilefield_core::{GridCoord, TileId, TileSurface};

use crate::grid::GridShape;
use crate::window::ActiveWindow;

/// Local outline offsets of `shape`, duplicate-free, in paint order.
///
/// - `Standard`: the four edges of the bounding rectangle.
/// - `Cross`: the arm end caps on the bounding rectangle's edges.
/// - `Circular`: the ring `size <= |v| < size + 1`, for both modes.
#[must_use]
pub fn outline_offsets(shape: &GridShape) -> Vec<(i32, i32)> {
    let mut ring = ActiveWindow::new();
    let mut push = |i: i32, j: i32| {
        ring.insert(GridCoord::flat(i, j));
    };

    match *shape {
        GridShape::Standard { .. } => {
            let (hx, hy) = shape.half_extents();
            for i in -hx..=hx {
                push(i, -hy);
                push(i, hy);
            }
            for j in -hy..=hy {
                push(-hx, j);
                push(hx, j);
            }
        }
        GridShape::Cross { size, offset_x, offset_y, .. } => {
            let (hx, hy) = shape.half_extents();
            for i in -hx..=hx {
                if (i - offset_x).abs() <= size {
                    push(i, -hy);
                    push(i, hy);
                }
            }
            for j in -hy..=hy {
                if (j - offset_y).abs() <= size {
                    push(-hx, j);
                    push(hx, j);
                }
            }
        }
        GridShape::Circular { size, .. } => {
            let radius = f64::from(size);
            for i in -(size + 1)..=size + 1 {
                for j in -(size + 1)..=size + 1 {
                    let length = f64::from(i).hypot(f64::from(j));
                    if length >= radius && length - 1.0 < radius {
                        push(i, j);
                    }
                }
            }
        }
    }

    ring.iter().map(|c| (c.x, c.y)).collect()
}

/// Keeps track of the painted outline so it can be cleared on the next trace.
#[derive(Clone, Debug)]
pub struct BoundaryTracer {
    tile: TileId,
    outline: ActiveWindow,
}

impl BoundaryTracer {
    /// Creates a tracer painting `tile`.
    #[must_use]
    pub fn new(tile: TileId) -> Self {
        Self {
            tile,
            outline: ActiveWindow::new(),
        }
    }

    /// The border tile.
    #[inline]
    #[must_use]
    pub const fn tile(&self) -> TileId {
        self.tile
    }

    /// Cells of the current outline.
    #[inline]
    #[must_use]
    pub const fn outline(&self) -> &ActiveWindow {
        &self.outline
    }

    /// Clears the previous outline and paints the outline of `shape` around
    /// `center`. Returns the number of outline cells.
    pub fn trace<S: TileSurface + ?Sized>(
        &mut self,
        center: GridCoord,
        shape: &GridShape,
        surface: &mut S,
    ) -> usize {
        self.clear(surface);
        for (i, j) in outline_offsets(shape) {
            let coord = center.offset(i, j);
            self.outline.insert(coord);
            surface.set_tile(coord, Some(self.tile));
        }
        tracing::debug!(center = %center, cells = self.outline.len(), "boundary traced");
        self.outline.len()
    }

    /// Removes the current outline from `surface`.
    pub fn clear<S: TileSurface + ?Sized>(&mut self, surface: &mut S) {
        for coord in self.outline.take() {
            surface.set_tile(coord, None);
        }
    }
}
