//! Enemy and treasure marker scatter over a finished dungeon.
//!
//! Reads the grid, rooms, and spawn points; produces its own marker list and
//! never writes back into the dungeon.

use crate::config::MarkerConfig;
use crate::dungeon::{Dungeon, Room};
use crate::rng::DungeonRng;
use crate::types::{CellState, Pos, RoomTag, manhattan};

use super::model::{EntityMarker, MarkerKind, SpawnPoints};

const ATTEMPTS_PER_MARKER: usize = 32;

struct MarkerContext<'a> {
    dungeon: &'a Dungeon,
    spawns: &'a SpawnPoints,
    safe_radius: u32,
}

impl MarkerContext<'_> {
    fn is_free(&self, pos: Pos, markers: &[EntityMarker]) -> bool {
        self.dungeon.grid.get(pos) == CellState::Floor
            && pos != self.spawns.start
            && pos != self.spawns.end
            && !markers.iter().any(|marker| marker.pos == pos)
    }

    fn accepts(&self, kind: MarkerKind, pos: Pos, markers: &[EntityMarker]) -> bool {
        if !self.is_free(pos, markers) {
            return false;
        }
        match kind {
            MarkerKind::Enemy => manhattan(pos, self.spawns.start) > self.safe_radius,
            MarkerKind::Treasure => true,
        }
    }
}

pub fn place_markers(
    dungeon: &Dungeon,
    spawns: &SpawnPoints,
    config: &MarkerConfig,
    rng: &mut DungeonRng,
) -> Vec<EntityMarker> {
    let context = MarkerContext { dungeon, spawns, safe_radius: config.safe_radius };
    let mut markers = Vec::with_capacity(config.enemy_count + config.treasure_count);

    let treasure_rooms: Vec<Room> =
        dungeon.rooms.iter().copied().filter(|room| room.tag == RoomTag::Treasure).collect();
    for treasure_index in 0..config.treasure_count {
        let preferred = treasure_rooms.get(treasure_index).copied();
        let pos = preferred
            .and_then(|room| random_cell_in_room(&context, room, &markers, rng))
            .or_else(|| random_cell(&context, MarkerKind::Treasure, &markers, rng))
            .or_else(|| scan_cell(&context, MarkerKind::Treasure, &markers));
        if let Some(pos) = pos {
            markers.push(EntityMarker { kind: MarkerKind::Treasure, pos });
        }
    }

    for _ in 0..config.enemy_count {
        let pos = random_cell(&context, MarkerKind::Enemy, &markers, rng)
            .or_else(|| scan_cell(&context, MarkerKind::Enemy, &markers));
        if let Some(pos) = pos {
            markers.push(EntityMarker { kind: MarkerKind::Enemy, pos });
        }
    }

    markers.sort_by_key(|marker| (marker.pos.y, marker.pos.x, marker.kind));
    markers
}

fn random_cell_in_room(
    context: &MarkerContext<'_>,
    room: Room,
    markers: &[EntityMarker],
    rng: &mut DungeonRng,
) -> Option<Pos> {
    (0..ATTEMPTS_PER_MARKER).find_map(|_| {
        let pos = Pos {
            y: rng.range(room.y, room.bottom()) as i32,
            x: rng.range(room.x, room.right()) as i32,
        };
        context.accepts(MarkerKind::Treasure, pos, markers).then_some(pos)
    })
}

fn random_cell(
    context: &MarkerContext<'_>,
    kind: MarkerKind,
    markers: &[EntityMarker],
    rng: &mut DungeonRng,
) -> Option<Pos> {
    let grid = &context.dungeon.grid;
    (0..ATTEMPTS_PER_MARKER).find_map(|_| {
        let pos = Pos {
            y: rng.range(1, grid.height() - 2) as i32,
            x: rng.range(1, grid.width() - 2) as i32,
        };
        context.accepts(kind, pos, markers).then_some(pos)
    })
}

fn scan_cell(
    context: &MarkerContext<'_>,
    kind: MarkerKind,
    markers: &[EntityMarker],
) -> Option<Pos> {
    context.dungeon.grid.positions().find(|&pos| context.accepts(kind, pos, markers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_dungeon() -> (Dungeon, SpawnPoints) {
        let mut dungeon = Dungeon::new(30, 20);
        let mut treasure = Room::new(20, 10, 5, 5);
        treasure.tag = RoomTag::Treasure;
        dungeon.carve_room(&Room::new(1, 1, 28, 18));
        dungeon.rooms.push(Room::new(2, 2, 5, 5));
        dungeon.rooms.push(treasure);
        let spawns = SpawnPoints {
            start: Pos { y: 1, x: 1 },
            end: Pos { y: 18, x: 28 },
            distance: 44,
            valid: true,
        };
        (dungeon, spawns)
    }

    #[test]
    fn markers_respect_spawns_and_safe_radius() {
        let (dungeon, spawns) = open_dungeon();
        let config = MarkerConfig { enemy_count: 10, treasure_count: 2, safe_radius: 6 };
        let markers = place_markers(&dungeon, &spawns, &config, &mut DungeonRng::new(11));

        assert_eq!(markers.len(), 12);
        for marker in &markers {
            assert_eq!(dungeon.grid.get(marker.pos), CellState::Floor);
            assert_ne!(marker.pos, spawns.start);
            assert_ne!(marker.pos, spawns.end);
            if marker.kind == MarkerKind::Enemy {
                assert!(manhattan(marker.pos, spawns.start) > 6);
            }
        }
        let mut positions: Vec<Pos> = markers.iter().map(|marker| marker.pos).collect();
        positions.dedup();
        assert_eq!(positions.len(), markers.len(), "markers never share a cell");
    }

    #[test]
    fn first_treasure_lands_in_the_treasure_room() {
        let (dungeon, spawns) = open_dungeon();
        let config = MarkerConfig { enemy_count: 0, treasure_count: 1, safe_radius: 0 };
        let markers = place_markers(&dungeon, &spawns, &config, &mut DungeonRng::new(3));
        assert_eq!(markers.len(), 1);
        assert!(dungeon.rooms[1].contains(markers[0].pos));
    }

    #[test]
    fn crowded_dungeon_places_fewer_markers() {
        let mut dungeon = Dungeon::new(6, 3);
        dungeon.carve_room(&Room::new(1, 1, 4, 1));
        let spawns =
            SpawnPoints { start: Pos { y: 1, x: 1 }, end: Pos { y: 1, x: 4 }, distance: 3, valid: false };
        let config = MarkerConfig { enemy_count: 5, treasure_count: 5, safe_radius: 0 };
        let markers = place_markers(&dungeon, &spawns, &config, &mut DungeonRng::new(1));
        assert_eq!(markers.len(), 2);
    }
}
