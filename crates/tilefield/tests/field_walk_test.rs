//! # Field Walk Integration Test
//!
//! Drives a configured field and its structures along a long path and checks
//! the field stays consistent the whole way.

use std::collections::HashSet;

use tilefield::{FieldConfig, FieldDriver, StructureSpawner};
use tilefield_core::{GridCoord, MemorySurface, TileId, TileSurface};
use tilefield_procedural::{GridShape, WindowMode, WallSprite};

const CONFIG: &str = r#"
seed = 77
amplitude = 1.0
lacunarity = 6.0
window_mode = "replace"
boundary_tile = 99

[shape]
kind = "cross"
x = 24
y = 18
size = 3
offset_x = 1
offset_y = -1

[limits]
corner_left_bot = 20
corner_left_top = 21
corner_right_bot = 22
corner_right_top = 23
border_left = 28
border_right = 29
border_bot = 30
border_top = 31

[structures]
seed = 5
spawn_distance = 25.0
set = 1

[structures.limits]
border_left = 40
border_right = 40
border_bot = 40
border_top = 40
corner_left_bot = 40
corner_left_top = 40
corner_right_bot = 40
corner_right_top = 40

[structures.sprites]
left = 50
right = 51
bot = 52
top = 53
unique = 54
left_bot = 55
left_top = 56
right_bot = 57
right_top = 58

[[noise.sets]]
[[noise.sets.layers]]
tile = 1
min_range = 0.0
max_range = 0.5

[[noise.sets.layers]]
tile = 2
min_range = 0.5
max_range = 1.0

[[noise.sets]]
[[noise.sets.layers]]
tile = 4
min_range = 0.0
max_range = 1.0
"#;

fn path() -> Vec<GridCoord> {
    let mut path = Vec::new();
    for i in 0..80 {
        path.push(GridCoord::flat(i, 0));
    }
    for i in 0..80 {
        path.push(GridCoord::flat(80, i));
    }
    // stand still for a few frames
    for _ in 0..5 {
        path.push(GridCoord::flat(80, 79));
    }
    path
}

#[test]
fn test_config_round_trip_through_toml() {
    let config = FieldConfig::from_toml_str(CONFIG).unwrap();
    assert_eq!(config.window_mode, WindowMode::Replace);
    assert_eq!(
        config.shape,
        GridShape::Cross { x: 24, y: 18, size: 3, offset_x: 1, offset_y: -1 }
    );
    assert_eq!(config.noise.len(), 2);
    let structures = config.structures.unwrap();
    assert_eq!(structures.seed, 5);
    assert_eq!(
        structures.sprites.unwrap().tile(WallSprite::Unique),
        Some(TileId::new(54))
    );
}

#[test]
fn test_walk_keeps_window_cached_and_exact() {
    let config = FieldConfig::from_toml_str(CONFIG).unwrap();
    let mut driver = FieldDriver::new(&config).unwrap();
    let mut ground = MemorySurface::new();
    let mut overlay = MemorySurface::new();

    let mut regenerations = 0;
    for reference in path() {
        if driver.tick(reference, &mut ground, &mut overlay).is_some() {
            regenerations += 1;
        }

        let generator = driver.generator();
        for coord in generator.window().iter() {
            assert!(generator.cache().contains(coord));
        }
        let expected: HashSet<GridCoord> = generator
            .shape()
            .offsets()
            .into_iter()
            .map(|(i, j)| reference.offset(i, j))
            .collect();
        assert_eq!(generator.window().iter().collect::<HashSet<_>>(), expected);
    }

    // standing still does not regenerate
    assert_eq!(regenerations, 160);
    assert_eq!(driver.regenerations(), 160);
}

#[test]
fn test_overlay_follows_the_window() {
    let config = FieldConfig::from_toml_str(CONFIG).unwrap();
    let mut driver = FieldDriver::new(&config).unwrap();
    let mut ground = MemorySurface::new();
    let mut overlay = MemorySurface::new();

    for reference in path() {
        driver.tick(reference, &mut ground, &mut overlay);

        let window = driver.generator().window();
        let outline = driver.boundary().map(|tracer| tracer.outline());
        for (coord, _) in overlay.painted() {
            assert!(
                window.contains(coord) || outline.is_some_and(|o| o.contains(coord)),
                "stale overlay cell {coord} at reference {reference}"
            );
        }
    }
}

#[test]
fn test_overlay_outline_drawn_last() {
    let config = FieldConfig::from_toml_str(CONFIG).unwrap();
    let mut driver = FieldDriver::new(&config).unwrap();
    let mut ground = MemorySurface::new();
    let mut overlay = MemorySurface::new();

    let report = driver.tick(GridCoord::ORIGIN, &mut ground, &mut overlay).unwrap();
    assert!(report.outline > 0);

    // the top cap of the vertical band is on the outline
    assert_eq!(overlay.get_tile(GridCoord::flat(1, 9)), Some(TileId::new(99)));
}

#[test]
fn test_structures_spawn_and_decorate() {
    let config = FieldConfig::from_toml_str(CONFIG).unwrap();
    let structures = config.structures.clone().unwrap();
    let mut spawner = StructureSpawner::new(structures, config.classifier(), config.params().unwrap()).unwrap();

    let mut ground = MemorySurface::new();
    let mut walls = MemorySurface::new();
    let mut sprites = MemorySurface::new();

    let mut spawned = 0;
    for reference in path() {
        if let Some(report) = spawner.tick(reference, &mut ground, &mut walls).unwrap() {
            if report.spawned {
                spawned += 1;
            }
        }
    }

    assert!(spawned >= 4, "expected several structures, got {spawned}");
    assert_eq!(spawner.structures().len(), spawned);
    assert!(!walls.is_empty());

    // every wall tile sits on a structure's window
    for (coord, tile) in walls.painted() {
        assert_eq!(tile, TileId::new(40));
        assert!(spawner.structures().iter().any(|s| s.generator().window().contains(coord)));
    }

    let painted = spawner.paint_sprites(&walls, &mut sprites);
    assert!(painted > 0);
    for (coord, _) in sprites.painted() {
        assert!(walls.has_tile(coord));
    }
}
