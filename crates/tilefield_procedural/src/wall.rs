//! # Wall Sprites
//!
//! Picks one of 19 wall sprites for a wall cell from its 8-neighborhood of
//! cells holding the same wall tile. The decision cascade is order sensitive:
//! end caps, then isolated / filled / cross / T junctions, then outer corners,
//! then straight edges, then the diagonal fallbacks, and finally `Unique`.

use std::collections::HashMap;

use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};
use tilefield_core::{GridCoord, TileGenError, TileId, TileSurface};

/// Sprite variants of a wall tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSprite {
    /// Fully surrounded.
    Center,
    /// Open to the left.
    Left,
    /// Open to the right.
    Right,
    /// Open below.
    Bot,
    /// Open above.
    Top,
    /// Outer corner, open left and below.
    LeftBot,
    /// Outer corner, open left and above.
    LeftTop,
    /// Outer corner, open right and below.
    RightBot,
    /// Outer corner, open right and above.
    RightTop,
    /// Vertical run ending here, continuing up.
    BotEnd,
    /// Vertical run ending here, continuing down.
    TopEnd,
    /// Horizontal run ending here, continuing right.
    LeftEnd,
    /// Horizontal run ending here, continuing left.
    RightEnd,
    /// No usable neighbors.
    Unique,
    /// Four-way junction.
    Cross,
    /// T junction with the stem down.
    TBot,
    /// T junction with the stem up.
    TTop,
    /// T junction with the stem left.
    TLeft,
    /// T junction with the stem right.
    TRight,
}

impl WallSprite {
    /// Every sprite except `Center` sits on the wall's limit.
    #[inline]
    #[must_use]
    pub const fn is_limit(self) -> bool {
        !matches!(self, Self::Center)
    }
}

/// Same-wall presence of the eight neighbors of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighborhood(u8);

impl Neighborhood {
    const fn bit(dx: i32, dy: i32) -> u8 {
        match (dx, dy) {
            (-1, -1) => 1 << 0,
            (0, -1) => 1 << 1,
            (1, -1) => 1 << 2,
            (-1, 0) => 1 << 3,
            (1, 0) => 1 << 4,
            (-1, 1) => 1 << 5,
            (0, 1) => 1 << 6,
            (1, 1) => 1 << 7,
            _ => 0,
        }
    }

    /// Builds a neighborhood by probing each of the eight offsets.
    pub fn from_fn(mut present: impl FnMut(i32, i32) -> bool) -> Self {
        let mut mask = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && present(dx, dy) {
                    mask |= Self::bit(dx, dy);
                }
            }
        }
        Self(mask)
    }

    /// Returns true if the neighbor at `(dx, dy)` holds the same wall.
    #[inline]
    #[must_use]
    pub const fn has(self, dx: i32, dy: i32) -> bool {
        let bit = Self::bit(dx, dy);
        bit != 0 && self.0 & bit != 0
    }
}

/// Resolves the sprite for a wall cell with neighborhood `n`.
#[must_use]
pub fn resolve_wall_sprite(n: Neighborhood) -> WallSprite {
    let (l, r, b, t) = (n.has(-1, 0), n.has(1, 0), n.has(0, -1), n.has(0, 1));
    let (bl, br, tl, tr) = (n.has(-1, -1), n.has(1, -1), n.has(-1, 1), n.has(1, 1));

    if !l && !r && !b && t {
        return WallSprite::BotEnd;
    }
    if !l && !r && !t && b {
        return WallSprite::TopEnd;
    }
    if !b && !t && !l && r {
        return WallSprite::LeftEnd;
    }
    if !b && !t && !r && l {
        return WallSprite::RightEnd;
    }

    let orthogonal = [l, r, b, t];
    let diagonal = [bl, br, tl, tr];
    if !orthogonal.contains(&true) && !diagonal.contains(&true) {
        return WallSprite::Unique;
    }
    if !orthogonal.contains(&false) && !diagonal.contains(&false) {
        return WallSprite::Center;
    }
    if !diagonal.contains(&true) && !orthogonal.contains(&false) {
        return WallSprite::Cross;
    }
    if b && r && l && !bl && !br {
        return WallSprite::TBot;
    }
    if t && r && l && !tl && !tr {
        return WallSprite::TTop;
    }
    if t && b && r && !tr && !br {
        return WallSprite::TRight;
    }
    if t && b && l && !bl && !tl {
        return WallSprite::TLeft;
    }

    if !l && !b && r && t {
        return WallSprite::LeftBot;
    }
    if !l && !t && r && b {
        return WallSprite::LeftTop;
    }
    if !r && !b && l && t {
        return WallSprite::RightBot;
    }
    if !r && !t && l && b {
        return WallSprite::RightTop;
    }

    if !l && b && t {
        return WallSprite::Left;
    }
    if !r && b && t {
        return WallSprite::Right;
    }
    if !b && l && r {
        return WallSprite::Bot;
    }
    if !t && l && r {
        return WallSprite::Top;
    }

    // concave remainders, picked by the missing diagonal
    if !bl && b {
        return WallSprite::RightTop;
    }
    if !tl && t {
        return WallSprite::RightBot;
    }
    if !br && b {
        return WallSprite::LeftTop;
    }
    if !tr && t {
        return WallSprite::LeftBot;
    }

    WallSprite::Unique
}

/// Sprite of the wall cell at `coord`, or `None` if the cell is empty.
///
/// Neighbors count only when they hold the same tile as `coord`.
#[must_use]
pub fn wall_sprite_at<S: TileSurface + ?Sized>(surface: &S, coord: GridCoord) -> Option<WallSprite> {
    let wall = surface.get_tile(coord)?;
    let n = Neighborhood::from_fn(|dx, dy| surface.get_tile(coord.offset(dx, dy)) == Some(wall));
    Some(resolve_wall_sprite(n))
}

/// Sprite to tile mapping used when painting resolved walls.
///
/// ```toml
/// center = 40
/// left = 41
/// unique = 53
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, TileId>")]
pub struct WallSprites {
    tiles: HashMap<WallSprite, TileId>,
}

impl TryFrom<HashMap<String, TileId>> for WallSprites {
    type Error = TileGenError;

    fn try_from(raw: HashMap<String, TileId>) -> Result<Self, Self::Error> {
        let mut tiles = HashMap::with_capacity(raw.len());
        for (name, tile) in raw {
            let sprite = WallSprite::deserialize(name.as_str().into_deserializer()).map_err(
                |e: serde::de::value::Error| {
                    TileGenError::InvalidConfig(format!("Unknown wall sprite '{name}': {e}"))
                },
            )?;
            tiles.insert(sprite, tile);
        }
        Ok(Self { tiles })
    }
}

impl WallSprites {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `sprite` to `tile`.
    #[must_use]
    pub fn with(mut self, sprite: WallSprite, tile: TileId) -> Self {
        self.tiles.insert(sprite, tile);
        self
    }

    /// Tile for `sprite`, if mapped.
    #[inline]
    #[must_use]
    pub fn tile(&self, sprite: WallSprite) -> Option<TileId> {
        self.tiles.get(&sprite).copied()
    }
}

/// Resolves every cell of `cells` on `walls` and paints the mapped sprite
/// tile on `overlay`. Empty cells and unmapped sprites clear the overlay
/// cell. Returns the number of cells painted.
pub fn paint_wall_sprites<S, O, I>(walls: &S, overlay: &mut O, cells: I, sprites: &WallSprites) -> usize
where
    S: TileSurface + ?Sized,
    O: TileSurface + ?Sized,
    I: IntoIterator<Item = GridCoord>,
{
    let mut painted = 0;
    for coord in cells {
        let tile = wall_sprite_at(walls, coord).and_then(|sprite| sprites.tile(sprite));
        if tile.is_some() {
            painted += 1;
        }
        overlay.set_tile(coord, tile);
    }
    painted
}
