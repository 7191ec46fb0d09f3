//! # TILEFIELD Walk
//!
//! Headless walk through a configured field. Moves a reference cell along a
//! diagonal path, ticks the field driver and the structure spawner every
//! step, then prints the area around the final position as ASCII.
//!
//! Run with: cargo run --bin tilefield_walk -- [config.toml] [steps]

use std::path::Path;
use std::time::Instant;

use tilefield::{FieldConfig, FieldDriver, StructureSpawner};
use tilefield_core::{GridCoord, MemorySurface, TileGenResult, TileSurface};

/// Used when no configuration file is given.
const DEFAULT_CONFIG: &str = r#"
seed = 1234
amplitude = 1.0
lacunarity = 8.0
set = 0
window_mode = "replace"

[shape]
kind = "circular"
size = 14

[limits]
corner_left_bot = 20
corner_left_top = 21
corner_right_bot = 22
corner_right_top = 23
inner_left_bot = 24
inner_left_top = 25
inner_right_bot = 26
inner_right_top = 27
border_left = 28
border_right = 29
border_bot = 30
border_top = 31

[structures]
seed = 7
spawn_distance = 30.0
set = 1

[structures.limits]
border_left = 40
border_right = 40
border_bot = 40
border_top = 40

[[noise.sets]]
[[noise.sets.layers]]
tile = 1
min_range = 0.0
max_range = 0.35

[[noise.sets.layers]]
tile = 2
min_range = 0.35
max_range = 0.65

[[noise.sets.layers]]
tile = 3
min_range = 0.65
max_range = 1.0

[[noise.sets]]
[[noise.sets.layers]]
tile = 4
min_range = 0.3
max_range = 1.0
"#;

const VIEW_RADIUS: i32 = 20;

fn glyph(ground: Option<u16>, overlay: Option<u16>, walls: Option<u16>) -> char {
    if walls.is_some() {
        return '#';
    }
    match (overlay, ground) {
        (Some(20..=23), _) => '+',
        (Some(24..=27), _) => '*',
        (Some(28 | 29), _) => '|',
        (Some(30 | 31), _) => '-',
        (Some(_), _) => '?',
        (None, Some(1)) => '~',
        (None, Some(2)) => '.',
        (None, Some(3)) => '^',
        (None, Some(4)) => 'o',
        (None, Some(_)) => '?',
        (None, None) => ' ',
    }
}

fn main() -> TileGenResult<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => FieldConfig::from_toml_file(Path::new(&path))?,
        None => FieldConfig::from_toml_str(DEFAULT_CONFIG)?,
    };
    let steps: i32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                     TILEFIELD WALK                         ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("Shape: {:?}", config.shape);
    println!("Mode:  {:?}", config.window_mode);
    println!("Steps: {steps}");
    println!();

    let mut driver = FieldDriver::new(&config)?;
    let mut spawner = match &config.structures {
        Some(structures) => Some(StructureSpawner::new(structures.clone(), config.classifier(), config.params()?)?),
        None => None,
    };

    let mut ground = MemorySurface::new();
    let mut overlay = MemorySurface::new();
    let mut walls = MemorySurface::new();

    let start = Instant::now();
    let mut reference = GridCoord::ORIGIN;
    for step in 0..steps {
        // east, drifting north
        reference = GridCoord::flat(step, step / 2);
        driver.tick(reference, &mut ground, &mut overlay);
        if let Some(spawner) = spawner.as_mut() {
            if let Some(report) = spawner.tick(reference, &mut ground, &mut walls)? {
                if report.spawned {
                    println!("  step {step:>4}: structure #{} spawned", report.structures);
                }
            }
        }
    }
    let elapsed = start.elapsed();

    println!();
    for dy in (-VIEW_RADIUS..=VIEW_RADIUS).rev() {
        let row: String = (-VIEW_RADIUS..=VIEW_RADIUS)
            .map(|dx| {
                let c = reference.offset(dx, dy);
                glyph(
                    ground.get_tile(c).map(|t| t.raw()),
                    overlay.get_tile(c).map(|t| t.raw()),
                    walls.get_tile(c).map(|t| t.raw()),
                )
            })
            .collect();
        println!("  {row}");
    }

    println!();
    println!("Walked {steps} steps in {elapsed:?}");
    println!("Regenerations:  {}", driver.regenerations());
    println!("Cached cells:   {}", driver.generator().cache().len());
    println!("Window cells:   {}", driver.generator().window().len());
    println!("Painted ground: {}", ground.len());
    println!("Painted walls:  {}", walls.len());
    if let Some(spawner) = &spawner {
        println!("Structures:     {}", spawner.structures().len());
    }

    Ok(())
}
