//! Start and end placement by double breadth-first search.
//!
//! The first search runs from an arbitrary floor cell; its farthest floor cell
//! becomes the start. The second search runs from the start; its farthest
//! floor cell becomes the end. This approximates the diameter of the walkable
//! graph without favouring the grid center.

use tracing::{debug, warn};

use crate::config::SpawnConfig;
use crate::dungeon::Grid;
use crate::types::{CellState, Pos, manhattan};

use super::grid::{bfs_depths, first_floor_cell};
use super::model::SpawnPoints;

pub fn place_spawn_points(grid: &Grid, config: &SpawnConfig) -> SpawnPoints {
    let Some(seed) = first_floor_cell(grid) else {
        warn!("no floor cells, spawn points fall back to the origin");
        return SpawnPoints { start: Pos::ORIGIN, end: Pos::ORIGIN, distance: 0, valid: false };
    };

    let start = farthest_floor_cell(grid, seed);
    let end = farthest_floor_cell(grid, start);
    let distance = manhattan(start, end);
    let valid = distance >= config.min_distance;
    if valid {
        debug!(?start, ?end, distance, "spawn points placed");
    } else {
        warn!(?start, ?end, distance, min_distance = config.min_distance, "spawn points too close");
    }
    SpawnPoints { start, end, distance, valid }
}

/// Floor cell with the greatest BFS depth from `origin`.
///
/// Doors are walked through but never chosen. Among equally deep cells the
/// first one dequeued wins.
pub fn farthest_floor_cell(grid: &Grid, origin: Pos) -> Pos {
    let mut best = origin;
    let mut best_depth = 0_u32;
    for (pos, depth) in bfs_depths(grid, origin) {
        if depth > best_depth && grid.get(pos) == CellState::Floor {
            best = pos;
            best_depth = depth;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_hall_spawns_at_both_ends() {
        let mut grid = Grid::new(40, 5);
        for x in 1..=38 {
            grid.set(Pos { y: 2, x }, CellState::Floor);
        }
        let spawns = place_spawn_points(&grid, &SpawnConfig::default());
        assert_eq!(spawns.start, Pos { y: 2, x: 38 });
        assert_eq!(spawns.end, Pos { y: 2, x: 1 });
        assert_eq!(spawns.distance, 37);
        assert!(spawns.valid);
    }

    #[test]
    fn short_hall_is_reported_invalid() {
        let mut grid = Grid::new(12, 5);
        for x in 1..=10 {
            grid.set(Pos { y: 2, x }, CellState::Floor);
        }
        let spawns = place_spawn_points(&grid, &SpawnConfig::default());
        assert_eq!(spawns.distance, 9);
        assert!(!spawns.valid);
    }

    #[test]
    fn doors_are_never_chosen_as_endpoints() {
        let mut grid = Grid::new(10, 5);
        for x in 1..=5 {
            grid.set(Pos { y: 2, x }, CellState::Floor);
        }
        grid.set(Pos { y: 2, x: 6 }, CellState::Door);
        let spawns = place_spawn_points(&grid, &SpawnConfig { min_distance: 1 });
        assert_eq!(grid.get(spawns.start), CellState::Floor);
        assert_eq!(grid.get(spawns.end), CellState::Floor);
        assert_eq!(spawns.distance, 4);
    }

    #[test]
    fn ties_go_to_first_dequeued_cell() {
        let mut grid = Grid::new(7, 7);
        for y in 1..=5 {
            grid.set(Pos { y, x: 3 }, CellState::Floor);
        }
        for x in 1..=5 {
            grid.set(Pos { y: 3, x }, CellState::Floor);
        }
        // north, east, south, west expansion: the east arm end is dequeued before south and west
        assert_eq!(farthest_floor_cell(&grid, Pos { y: 1, x: 3 }), Pos { y: 3, x: 5 });
    }

    #[test]
    fn empty_grid_falls_back_to_origin() {
        let spawns = place_spawn_points(&Grid::new(10, 10), &SpawnConfig::default());
        assert_eq!(spawns.start, Pos::ORIGIN);
        assert_eq!(spawns.end, Pos::ORIGIN);
        assert!(!spawns.valid);
    }
}
