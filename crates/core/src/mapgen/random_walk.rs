//! Drunkard's-walk carving from the grid center.

use tracing::debug;

use crate::config::{RandomWalkConfig, floor_target};
use crate::dungeon::Dungeon;
use crate::rng::DungeonRng;
use crate::types::{CellState, Pos};

/// Walks from the center, carving until `coverage` of all cells are floor.
///
/// The start is `(width / 2, height / 2)`; with odd dimensions that sits half
/// a cell off the true center. The walker is clamped to `[1, dimension - 2]`
/// so it never reaches the border. Produces no rooms.
pub fn generate_random_walk(
    width: usize,
    height: usize,
    config: &RandomWalkConfig,
    rng: &mut DungeonRng,
) -> Dungeon {
    let mut dungeon = Dungeon::new(width, height);
    let target = floor_target(width, height, config.coverage);
    let max_x = (width - 2) as i32;
    let max_y = (height - 2) as i32;

    let mut walker = dungeon.grid.center();
    let mut carved = 0_usize;
    let mut steps = 0_usize;
    while carved < target {
        if dungeon.grid.get(walker) == CellState::Wall {
            dungeon.grid.set(walker, CellState::Floor);
            carved += 1;
            if carved >= target {
                break;
            }
        }
        let [north, east, south, west] = walker.cardinal_neighbors();
        let next = match rng.below(4) {
            0 => north,
            1 => east,
            2 => south,
            _ => west,
        };
        walker = Pos { y: next.y.clamp(1, max_y), x: next.x.clamp(1, max_x) };
        steps += 1;
    }

    debug!(algorithm = "random-walk", target, carved, steps, "random walk carved");
    dungeon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_exactly_the_floor_target() {
        let config = RandomWalkConfig::default();
        let dungeon = generate_random_walk(80, 45, &config, &mut DungeonRng::new(2024));
        assert_eq!(dungeon.floor_count(), floor_target(80, 45, 0.35));
        assert!(dungeon.rooms.is_empty());
        assert!(dungeon.grid.border_is_solid());
        assert_eq!(dungeon.door_count(), 0);
    }

    #[test]
    fn center_cell_is_always_carved() {
        let config = RandomWalkConfig { coverage: 0.1 };
        let dungeon = generate_random_walk(31, 21, &config, &mut DungeonRng::new(8));
        assert_eq!(dungeon.grid.get(Pos { y: 10, x: 15 }), CellState::Floor);
    }

    #[test]
    fn zero_coverage_carves_nothing() {
        let config = RandomWalkConfig { coverage: 0.0 };
        let dungeon = generate_random_walk(20, 20, &config, &mut DungeonRng::new(1));
        assert_eq!(dungeon.floor_count(), 0);
    }
}
