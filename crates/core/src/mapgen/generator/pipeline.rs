//! Post-processing stages that turn a raw dungeon into a playable level.

use tracing::debug;

use crate::config::LevelConfig;
use crate::dungeon::Dungeon;
use crate::rng::DungeonRng;

use super::super::connectivity::validate_connectivity;
use super::super::markers::place_markers;
use super::super::model::GeneratedLevel;
use super::super::spawns::place_spawn_points;
use super::super::tagging::tag_rooms;

/// Validation, spawn points, room tags, then entity markers, in that order.
///
/// Tagging only runs for algorithms that produce rooms; the others report
/// `tags: None`.
pub(super) fn finish_level(
    config: &LevelConfig,
    mut dungeon: Dungeon,
    rng: &mut DungeonRng,
) -> GeneratedLevel {
    let validation = validate_connectivity(&mut dungeon.grid, None, config.repair);
    let spawns = place_spawn_points(&dungeon.grid, &config.spawns);

    let tags = if config.algorithm.is_structured() {
        tag_rooms(&mut dungeon.rooms, &config.tagging, rng)
    } else {
        None
    };
    let markers = place_markers(&dungeon, &spawns, &config.markers, rng);

    debug!(
        algorithm = config.algorithm.name(),
        width = config.width,
        height = config.height,
        rooms = dungeon.rooms.len(),
        floor = validation.total_floor_tiles,
        valid = validation.valid,
        spawn_distance = spawns.distance,
        markers = markers.len(),
        fingerprint = dungeon.fingerprint(),
        "level generated"
    );

    GeneratedLevel { algorithm: config.algorithm, dungeon, validation, spawns, tags, markers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Algorithm;
    use crate::dungeon::Room;
    use crate::types::{CellState, Pos, RoomTag};

    fn two_pockets() -> Dungeon {
        let mut dungeon = Dungeon::new(40, 12);
        let left = Room::new(2, 2, 8, 6);
        let right = Room::new(30, 3, 5, 5);
        dungeon.carve_room(&left);
        dungeon.carve_room(&right);
        dungeon.rooms = vec![left, right];
        dungeon
    }

    #[test]
    fn repair_setting_controls_whether_pockets_survive() {
        let mut config = LevelConfig::with_algorithm(Algorithm::Template);
        config.repair = false;
        let kept = finish_level(&config, two_pockets(), &mut DungeonRng::new(1));
        assert!(!kept.validation.valid);
        assert_eq!(kept.validation.isolated_regions, 1);
        assert_eq!(kept.dungeon.grid.get(Pos { y: 4, x: 31 }), CellState::Floor);

        config.repair = true;
        let repaired = finish_level(&config, two_pockets(), &mut DungeonRng::new(1));
        assert!(repaired.validation.valid);
        assert_eq!(repaired.validation.repaired_tiles, 25);
    }

    #[test]
    fn unstructured_algorithms_skip_tagging_even_with_rooms() {
        let config = LevelConfig::with_algorithm(Algorithm::CellularAutomata);
        let level = finish_level(&config, two_pockets(), &mut DungeonRng::new(1));
        assert_eq!(level.tags, None);
        assert!(level.dungeon.rooms.iter().all(|room| room.tag == RoomTag::Normal));
    }
}
