//! # Limit Classification
//!
//! Autotile decoration for the edge of a painted window. Runs in two phases:
//!
//! 1. **Find**: classify every active cell against the presence of its
//!    neighbors into twelve zone buckets (four outer corners, four inner
//!    corners, four borders). Each family is its own pass with its own
//!    first-match chain, so a cell lands in at most one bucket per family.
//! 2. **Generate**: pin the configured overlay tile of each bucket in the
//!    cache and paint it on the overlay surface.
//!
//! Find reads a complete presence snapshot before generate writes anything.
//!
//! ## Neighbor notation
//!
//! `L`, `R`, `B`, `T` are the cells at `(-1, 0)`, `(1, 0)`, `(0, -1)`,
//! `(0, 1)`; `BL`, `TL`, `BR`, `TR` are the diagonals.

use serde::{Deserialize, Serialize};
use tilefield_core::{GridCoord, TileId, TileSurface};

use crate::window::{ActiveWindow, GenerationCache};

const L: (i32, i32) = (-1, 0);
const R: (i32, i32) = (1, 0);
const B: (i32, i32) = (0, -1);
const T: (i32, i32) = (0, 1);
const BL: (i32, i32) = (-1, -1);
const TL: (i32, i32) = (-1, 1);
const BR: (i32, i32) = (1, -1);
const TR: (i32, i32) = (1, 1);

/// Which of the three classification passes a zone belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoneFamily {
    /// Outer corners.
    Corner,
    /// Inner (concave) corners.
    InnerCorner,
    /// Straight borders.
    Border,
}

impl ZoneFamily {
    /// Families in pass order.
    pub const ALL: [Self; 3] = [Self::Corner, Self::InnerCorner, Self::Border];

    /// The four zones of this family, in first-match order.
    #[must_use]
    pub const fn zones(self) -> [Zone; 4] {
        match self {
            Self::Corner => [
                Zone::CornerLeftBot,
                Zone::CornerLeftTop,
                Zone::CornerRightBot,
                Zone::CornerRightTop,
            ],
            Self::InnerCorner => [
                Zone::InnerLeftBot,
                Zone::InnerLeftTop,
                Zone::InnerRightBot,
                Zone::InnerRightTop,
            ],
            Self::Border => [
                Zone::BorderLeft,
                Zone::BorderRight,
                Zone::BorderBot,
                Zone::BorderTop,
            ],
        }
    }
}

/// One of the twelve decoration buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Outer corner, missing left and bottom.
    CornerLeftBot,
    /// Outer corner, missing left and top.
    CornerLeftTop,
    /// Outer corner, missing right and bottom.
    CornerRightBot,
    /// Outer corner, missing right and top.
    CornerRightTop,
    /// Inner corner opening to the bottom-left diagonal.
    InnerLeftBot,
    /// Inner corner opening to the top-left diagonal.
    InnerLeftTop,
    /// Inner corner opening to the bottom-right diagonal.
    InnerRightBot,
    /// Inner corner opening to the top-right diagonal.
    InnerRightTop,
    /// Left border.
    BorderLeft,
    /// Right border.
    BorderRight,
    /// Bottom border.
    BorderBot,
    /// Top border.
    BorderTop,
}

impl Zone {
    /// All zones, grouped by family in pass order.
    pub const ALL: [Self; 12] = [
        Self::CornerLeftBot,
        Self::CornerLeftTop,
        Self::CornerRightBot,
        Self::CornerRightTop,
        Self::InnerLeftBot,
        Self::InnerLeftTop,
        Self::InnerRightBot,
        Self::InnerRightTop,
        Self::BorderLeft,
        Self::BorderRight,
        Self::BorderBot,
        Self::BorderTop,
    ];

    /// Position in [`Zone::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The pass this zone is classified in.
    #[must_use]
    pub const fn family(self) -> ZoneFamily {
        match self {
            Self::CornerLeftBot | Self::CornerLeftTop | Self::CornerRightBot | Self::CornerRightTop => {
                ZoneFamily::Corner
            }
            Self::InnerLeftBot | Self::InnerLeftTop | Self::InnerRightBot | Self::InnerRightTop => {
                ZoneFamily::InnerCorner
            }
            Self::BorderLeft | Self::BorderRight | Self::BorderBot | Self::BorderTop => {
                ZoneFamily::Border
            }
        }
    }

    /// Neighbors that must be empty and neighbors that must be painted.
    const fn pattern(self) -> (&'static [(i32, i32)], &'static [(i32, i32)]) {
        match self {
            Self::CornerLeftBot => (&[L, B], &[]),
            Self::CornerLeftTop => (&[L, T], &[]),
            Self::CornerRightBot => (&[R, B], &[]),
            Self::CornerRightTop => (&[R, T], &[]),
            Self::InnerLeftBot => (&[BL], &[B, L]),
            Self::InnerLeftTop => (&[TL], &[T, L]),
            Self::InnerRightBot => (&[BR], &[B, R]),
            Self::InnerRightTop => (&[TR], &[T, R]),
            Self::BorderLeft => (&[L], &[B, T]),
            Self::BorderRight => (&[R], &[B, T]),
            Self::BorderBot => (&[B], &[L, R]),
            Self::BorderTop => (&[T], &[L, R]),
        }
    }

    /// Returns true if the neighborhood of `coord` matches this zone.
    fn matches<S: TileSurface + ?Sized>(self, surface: &S, coord: GridCoord) -> bool {
        let (absent, present) = self.pattern();
        absent.iter().all(|&(dx, dy)| !surface.has_tile(coord.offset(dx, dy)))
            && present.iter().all(|&(dx, dy)| surface.has_tile(coord.offset(dx, dy)))
    }
}

/// Overlay tile per zone. Unset zones are left undecorated.
///
/// ```toml
/// corner_left_bot = 20
/// border_top = 31
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitTiles {
    /// Outer corner, left-bottom.
    pub corner_left_bot: Option<TileId>,
    /// Outer corner, left-top.
    pub corner_left_top: Option<TileId>,
    /// Outer corner, right-bottom.
    pub corner_right_bot: Option<TileId>,
    /// Outer corner, right-top.
    pub corner_right_top: Option<TileId>,
    /// Inner corner, left-bottom.
    pub inner_left_bot: Option<TileId>,
    /// Inner corner, left-top.
    pub inner_left_top: Option<TileId>,
    /// Inner corner, right-bottom.
    pub inner_right_bot: Option<TileId>,
    /// Inner corner, right-top.
    pub inner_right_top: Option<TileId>,
    /// Left border.
    pub border_left: Option<TileId>,
    /// Right border.
    pub border_right: Option<TileId>,
    /// Bottom border.
    pub border_bot: Option<TileId>,
    /// Top border.
    pub border_top: Option<TileId>,
}

impl LimitTiles {
    /// Uses the same overlay tile for every zone.
    #[must_use]
    pub const fn uniform(tile: TileId) -> Self {
        let t = Some(tile);
        Self {
            corner_left_bot: t,
            corner_left_top: t,
            corner_right_bot: t,
            corner_right_top: t,
            inner_left_bot: t,
            inner_left_top: t,
            inner_right_bot: t,
            inner_right_top: t,
            border_left: t,
            border_right: t,
            border_bot: t,
            border_top: t,
        }
    }

    /// Overlay tile configured for `zone`.
    #[must_use]
    pub const fn tile(&self, zone: Zone) -> Option<TileId> {
        match zone {
            Zone::CornerLeftBot => self.corner_left_bot,
            Zone::CornerLeftTop => self.corner_left_top,
            Zone::CornerRightBot => self.corner_right_bot,
            Zone::CornerRightTop => self.corner_right_top,
            Zone::InnerLeftBot => self.inner_left_bot,
            Zone::InnerLeftTop => self.inner_left_top,
            Zone::InnerRightBot => self.inner_right_bot,
            Zone::InnerRightTop => self.inner_right_top,
            Zone::BorderLeft => self.border_left,
            Zone::BorderRight => self.border_right,
            Zone::BorderBot => self.border_bot,
            Zone::BorderTop => self.border_top,
        }
    }

    /// Sets the overlay tile for `zone`.
    pub fn set(&mut self, zone: Zone, tile: Option<TileId>) {
        let slot = match zone {
            Zone::CornerLeftBot => &mut self.corner_left_bot,
            Zone::CornerLeftTop => &mut self.corner_left_top,
            Zone::CornerRightBot => &mut self.corner_right_bot,
            Zone::CornerRightTop => &mut self.corner_right_top,
            Zone::InnerLeftBot => &mut self.inner_left_bot,
            Zone::InnerLeftTop => &mut self.inner_left_top,
            Zone::InnerRightBot => &mut self.inner_right_bot,
            Zone::InnerRightTop => &mut self.inner_right_top,
            Zone::BorderLeft => &mut self.border_left,
            Zone::BorderRight => &mut self.border_right,
            Zone::BorderBot => &mut self.border_bot,
            Zone::BorderTop => &mut self.border_top,
        };
        *slot = tile;
    }
}

/// Result of one [`LimitClassifier::generate_limits`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayReport {
    /// Overlay cells painted.
    pub painted: usize,
    /// Bucket cells cleared because they left the window.
    pub cleared: usize,
}

/// The twelve zone buckets of one generator.
#[derive(Clone, Debug, Default)]
pub struct LimitClassifier {
    buckets: [Vec<GridCoord>; 12],
}

impl LimitClassifier {
    /// Creates a classifier with empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells classified into `zone` by the last find pass, in window order.
    #[inline]
    #[must_use]
    pub fn bucket(&self, zone: Zone) -> &[GridCoord] {
        &self.buckets[zone.index()]
    }

    /// The zone of `family` that `coord` was classified into, if any.
    #[must_use]
    pub fn zone_of(&self, coord: GridCoord, family: ZoneFamily) -> Option<Zone> {
        family
            .zones()
            .into_iter()
            .find(|zone| self.bucket(*zone).contains(&coord))
    }

    /// Total cells across all buckets.
    #[must_use]
    pub fn classified(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Rebuilds every bucket from the presence on `surface`.
    ///
    /// Only cells with a painted tile are classified. A cell that matches no
    /// zone of a family is repainted with its cached tile.
    pub fn find_limits<S: TileSurface + ?Sized>(
        &mut self,
        window: &ActiveWindow,
        cache: &GenerationCache,
        surface: &mut S,
    ) {
        for family in ZoneFamily::ALL {
            self.find_family(family, window, cache, surface);
        }

        tracing::debug!(
            window = window.len(),
            corners = self.family_len(ZoneFamily::Corner),
            inner_corners = self.family_len(ZoneFamily::InnerCorner),
            borders = self.family_len(ZoneFamily::Border),
            "limits classified"
        );
    }

    fn find_family<S: TileSurface + ?Sized>(
        &mut self,
        family: ZoneFamily,
        window: &ActiveWindow,
        cache: &GenerationCache,
        surface: &mut S,
    ) {
        let zones = family.zones();
        for zone in zones {
            self.buckets[zone.index()].clear();
        }

        for coord in window.iter() {
            if !surface.has_tile(coord) {
                continue;
            }
            match zones.into_iter().find(|zone| zone.matches(&*surface, coord)) {
                Some(zone) => self.buckets[zone.index()].push(coord),
                None => {
                    if let Some(Some(tile)) = cache.get(coord) {
                        surface.set_tile(coord, Some(tile));
                    }
                }
            }
        }
    }

    fn family_len(&self, family: ZoneFamily) -> usize {
        family.zones().iter().map(|zone| self.bucket(*zone).len()).sum()
    }

    /// Paints every bucket's overlay tile, corners first, then inner corners,
    /// then borders.
    ///
    /// Bucket cells still in `window` get their cache entry overwritten with
    /// the overlay tile; cells that left the window are cleared on `overlay`.
    /// Zones without a configured tile are skipped.
    pub fn generate_limits<S: TileSurface + ?Sized>(
        &self,
        window: &ActiveWindow,
        cache: &mut GenerationCache,
        overlay: &mut S,
        tiles: &LimitTiles,
    ) -> OverlayReport {
        let mut report = OverlayReport::default();

        for zone in Zone::ALL {
            let Some(tile) = tiles.tile(zone) else {
                continue;
            };
            for &coord in self.bucket(zone) {
                if window.contains(coord) {
                    cache.overwrite(coord, Some(tile));
                    overlay.set_tile(coord, Some(tile));
                    report.painted += 1;
                } else {
                    overlay.set_tile(coord, None);
                    report.cleared += 1;
                }
            }
        }

        tracing::debug!(painted = report.painted, cleared = report.cleared, "limits generated");
        report
    }

    /// Clears on `overlay` every bucket cell of a configured zone that is no
    /// longer in `window`. Returns the number of cleared cells.
    ///
    /// Meant to run against the previous buckets, before
    /// [`LimitClassifier::find_limits`] rebuilds them for a moved window.
    pub fn clear_departed<S: TileSurface + ?Sized>(
        &self,
        window: &ActiveWindow,
        overlay: &mut S,
        tiles: &LimitTiles,
    ) -> usize {
        let mut cleared = 0;
        for zone in Zone::ALL {
            if tiles.tile(zone).is_none() {
                continue;
            }
            for &coord in self.bucket(zone) {
                if !window.contains(coord) {
                    overlay.set_tile(coord, None);
                    cleared += 1;
                }
            }
        }
        cleared
    }
}
