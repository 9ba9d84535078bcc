//! Partition rooms laid over a cellular-automata cave.

use tracing::debug;

use crate::config::HybridConfig;
use crate::dungeon::Dungeon;
use crate::rng::DungeonRng;
use crate::types::CellState;

use super::cave::generate_cave;
use super::connectivity::validate_connectivity;
use super::corridor::connect_rooms_in_sequence;
use super::doors::place_doors;
use super::partition::{PartitionTree, candidate_room};

/// Runs the cave generator, then carves partition rooms only where the
/// room's center was already cave floor and a density roll passes.
///
/// Registered rooms are chained in list order, the result is validated with
/// repair, and doors are placed last.
pub fn generate_hybrid(
    width: usize,
    height: usize,
    config: &HybridConfig,
    rng: &mut DungeonRng,
) -> Dungeon {
    let mut dungeon = generate_cave(width, height, &config.cave, rng);
    let cave = dungeon.grid.clone();

    let tree = PartitionTree::build(width, height, config.min_leaf_size, rng);
    let leaves = tree.leaves();
    for &leaf in &leaves {
        let room = candidate_room(tree.region(leaf), rng);
        if cave.get(room.center()) == CellState::Floor && rng.chance(config.room_density) {
            dungeon.carve_room(&room);
            dungeon.rooms.push(room);
        }
    }
    drop(tree);

    if dungeon.rooms.len() >= 2 {
        connect_rooms_in_sequence(&mut dungeon.grid, &dungeon.rooms, &config.corridor, rng);
    }
    let validation = validate_connectivity(&mut dungeon.grid, None, true);
    let doors = place_doors(&mut dungeon.grid);

    debug!(
        algorithm = "hybrid",
        leaves = leaves.len(),
        rooms = dungeon.rooms.len(),
        repaired = validation.repaired_tiles,
        doors,
        floor = dungeon.floor_count(),
        "hybrid dungeon generated"
    );
    dungeon
}
