//! # Structure Spawning
//!
//! Drops cross-shaped structures into the field as the reference cell roams
//! away from the origin. A new structure is spawned every time the reference
//! gets more than `spawn_distance` cells further out than at the last spawn.
//!
//! Every structure owns its own [`GridGenerator`] (its own cache and window)
//! and its own randomized plan. On every reference change all structures
//! regenerate on the ground surface and redecorate the wall surface.
//!
//! Placement is drawn from a seeded ChaCha8 stream, so the same seed and the
//! same walk produce the same structures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tilefield_core::{GridCoord, TileGenError, TileGenResult, TileSurface};
use tilefield_procedural::{
    paint_wall_sprites, GridGenerator, GridShape, LimitTiles, NoiseClassifier, NoiseParams,
    WallSprites,
};

/// Structure spawning configuration.
///
/// ```toml
/// [structures]
/// seed = 7
/// spawn_distance = 100.0
/// set = 1
///
/// [structures.limits]
/// border_top = 30
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Seed of the placement stream.
    pub seed: u64,
    /// Extra distance from the origin needed between two spawns.
    pub spawn_distance: f64,
    /// Noise set structures are generated with.
    pub set: usize,
    /// Wall overlay tiles.
    pub limits: LimitTiles,
    /// Wall sprite tiles for [`StructureSpawner::paint_sprites`].
    pub sprites: Option<WallSprites>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            spawn_distance: 100.0,
            set: 0,
            limits: LimitTiles::default(),
            sprites: None,
        }
    }
}

impl StructureConfig {
    /// Rejects a negative or non-finite spawn distance.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`].
    pub fn validate(&self) -> TileGenResult<()> {
        if !self.spawn_distance.is_finite() || self.spawn_distance < 0.0 {
            return Err(TileGenError::InvalidConfig(format!(
                "Invalid spawn_distance: {}",
                self.spawn_distance
            )));
        }
        Ok(())
    }
}

/// Randomized placement of one structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructurePlan {
    /// Centre cell.
    pub center: GridCoord,
    /// Width extent, in `[5, 20)`.
    pub x: i32,
    /// Height extent, in `[5, 20)`.
    pub y: i32,
    /// Band half width, in `[1, 10)`.
    pub size: i32,
    /// Vertical band shift, in `[-5, 5)`.
    pub offset_x: i32,
    /// Horizontal band shift, in `[-5, 5)`.
    pub offset_y: i32,
}

impl StructurePlan {
    /// Draws a plan around `reference`.
    pub fn random(rng: &mut impl Rng, reference: GridCoord) -> Self {
        let x = rng.gen_range(5..20);
        let y = rng.gen_range(5..20);
        let center = reference.offset(rng.gen_range(-20..20), rng.gen_range(-20..20));
        let size = rng.gen_range(1..10);
        let offset_x = rng.gen_range(-5..5);
        let offset_y = rng.gen_range(-5..5);
        Self { center, x, y, size, offset_x, offset_y }
    }

    /// The cross shape of this plan.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        GridShape::Cross {
            x: self.x,
            y: self.y,
            size: self.size,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }
}

/// A spawned structure.
#[derive(Clone, Debug)]
pub struct Structure {
    plan: StructurePlan,
    generator: GridGenerator,
}

impl Structure {
    /// Placement of this structure.
    #[inline]
    #[must_use]
    pub const fn plan(&self) -> &StructurePlan {
        &self.plan
    }

    /// The structure's own generator.
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &GridGenerator {
        &self.generator
    }
}

/// What one [`StructureSpawner::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// A structure was spawned this tick.
    pub spawned: bool,
    /// Structures after the tick.
    pub structures: usize,
    /// Wall overlay cells painted across all structures.
    pub walls_painted: usize,
}

/// Spawns and maintains structures along the reference's path.
#[derive(Clone, Debug)]
pub struct StructureSpawner {
    config: StructureConfig,
    classifier: NoiseClassifier,
    params: NoiseParams,
    rng: ChaCha8Rng,
    last_reference: GridCoord,
    last_spawn: GridCoord,
    structures: Vec<Structure>,
}

impl StructureSpawner {
    /// Creates a spawner. Structures classify with `classifier` and
    /// `params` on the configured set.
    ///
    /// # Errors
    ///
    /// Returns [`TileGenError::InvalidConfig`] for a bad spawn distance.
    pub fn new(config: StructureConfig, classifier: NoiseClassifier, params: NoiseParams) -> TileGenResult<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            classifier,
            params,
            rng,
            last_reference: GridCoord::ORIGIN,
            last_spawn: GridCoord::ORIGIN,
            structures: Vec::new(),
        })
    }

    /// Spawned structures, oldest first.
    #[inline]
    #[must_use]
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Reference cell of the last spawn (the origin before any).
    #[inline]
    #[must_use]
    pub const fn last_spawn(&self) -> GridCoord {
        self.last_spawn
    }

    /// Reacts to the reference cell.
    ///
    /// Does nothing and returns `Ok(None)` if `reference` did not change.
    /// Otherwise spawns when far enough out, then regenerates every
    /// structure on `ground` and decorates it on `walls`.
    ///
    /// # Errors
    ///
    /// Returns an error if a spawned structure's generator cannot be built.
    pub fn tick<S, W>(
        &mut self,
        reference: GridCoord,
        ground: &mut S,
        walls: &mut W,
    ) -> TileGenResult<Option<SpawnReport>>
    where
        S: TileSurface + ?Sized,
        W: TileSurface + ?Sized,
    {
        if reference == self.last_reference {
            return Ok(None);
        }

        let mut report = SpawnReport::default();
        if reference.planar_length() > self.last_spawn.planar_length() + self.config.spawn_distance {
            self.spawn(reference)?;
            report.spawned = true;
        }

        for structure in &mut self.structures {
            structure.generator.generate(structure.plan.center, ground);
            report.walls_painted += structure.generator.decorate(ground, walls, &self.config.limits).painted;
        }

        self.last_reference = reference;
        report.structures = self.structures.len();
        Ok(Some(report))
    }

    fn spawn(&mut self, reference: GridCoord) -> TileGenResult<()> {
        let plan = StructurePlan::random(&mut self.rng, reference);
        let generator = GridGenerator::new(self.classifier.clone(), self.params, self.config.set, plan.shape())?;

        tracing::info!(
            center = %plan.center,
            x = plan.x,
            y = plan.y,
            size = plan.size,
            structures = self.structures.len() + 1,
            "structure spawned"
        );

        self.structures.push(Structure { plan, generator });
        self.last_spawn = reference;
        Ok(())
    }

    /// Resolves wall sprites for every structure window cell on `walls` and
    /// paints them on `sprites`. Returns the number of cells painted, or 0
    /// when no sprite tiles are configured.
    pub fn paint_sprites<W, P>(&self, walls: &W, sprites: &mut P) -> usize
    where
        W: TileSurface + ?Sized,
        P: TileSurface + ?Sized,
    {
        let Some(table) = &self.config.sprites else {
            return 0;
        };
        self.structures
            .iter()
            .map(|structure| paint_wall_sprites(walls, sprites, structure.generator.window().iter(), table))
            .sum()
    }
}
