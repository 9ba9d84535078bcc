//! Plain-text rendering of generated levels for the terminal.

use dungeon_core::mapgen::{EntityMarker, GeneratedLevel, MarkerKind, SpawnPoints};
use dungeon_core::{Dungeon, Pos, RoomTag};

pub const START_GLYPH: char = 'S';
pub const END_GLYPH: char = 'E';
pub const ENEMY_GLYPH: char = 'e';
pub const TREASURE_GLYPH: char = '$';

/// One line per grid row using the export glyphs (`#`, `.`, `+`).
pub fn render_dungeon(dungeon: &Dungeon) -> Vec<String> {
    render_with_overlay(dungeon, None, &[])
}

/// Grid rows with spawn points and entity markers drawn on top.
pub fn render_level(level: &GeneratedLevel) -> Vec<String> {
    render_with_overlay(&level.dungeon, Some(&level.spawns), &level.markers)
}

fn render_with_overlay(
    dungeon: &Dungeon,
    spawns: Option<&SpawnPoints>,
    markers: &[EntityMarker],
) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = (0..dungeon.height())
        .map(|y| (0..dungeon.width()).map(|x| dungeon.grid.cell(y, x).glyph()).collect())
        .collect();

    let mut put = |pos: Pos, glyph: char| {
        if let Some(cell) =
            rows.get_mut(pos.y as usize).and_then(|row| row.get_mut(pos.x as usize))
        {
            *cell = glyph;
        }
    };
    for marker in markers {
        let glyph = match marker.kind {
            MarkerKind::Enemy => ENEMY_GLYPH,
            MarkerKind::Treasure => TREASURE_GLYPH,
        };
        put(marker.pos, glyph);
    }
    if let Some(spawns) = spawns.filter(|spawns| spawns.start != spawns.end) {
        put(spawns.start, START_GLYPH);
        put(spawns.end, END_GLYPH);
    }

    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}

pub fn summary_lines(level: &GeneratedLevel, seed: u64) -> Vec<String> {
    let dungeon = &level.dungeon;
    let validation = &level.validation;
    let spawns = &level.spawns;
    let mut lines = vec![
        format!(
            "algorithm: {}  size: {}x{}  seed: {seed}",
            level.algorithm.name(),
            dungeon.width(),
            dungeon.height()
        ),
        format!("fingerprint: {:016x}", dungeon.fingerprint()),
        format!(
            "floor: {}  doors: {}  rooms: {}",
            dungeon.floor_count(),
            dungeon.door_count(),
            dungeon.rooms.len()
        ),
        format!(
            "connected: {}  reachable: {}/{}  isolated regions: {}  repaired: {}",
            validation.valid,
            validation.reachable_tiles,
            validation.total_floor_tiles,
            validation.isolated_regions,
            validation.repaired_tiles
        ),
        format!(
            "start: ({}, {})  end: ({}, {})  distance: {}  valid: {}",
            spawns.start.x,
            spawns.start.y,
            spawns.end.x,
            spawns.end.y,
            spawns.distance,
            spawns.valid
        ),
    ];
    for (index, room) in dungeon.rooms.iter().enumerate() {
        if room.tag != RoomTag::Normal {
            lines.push(format!(
                "room {index}: {:?} at ({}, {}) {}x{}",
                room.tag, room.x, room.y, room.width, room.height
            ));
        }
    }
    lines
}
