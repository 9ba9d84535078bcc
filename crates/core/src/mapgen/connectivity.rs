//! Reachability validation with optional repair of isolated regions.
//!
//! Floor and door cells both count as passable. Validation starts from a
//! requested floor cell or, failing that, the floor cell nearest the grid
//! center.

use tracing::debug;

use crate::dungeon::Grid;
use crate::types::{CellState, Pos};

use super::grid::{flood_fill, nearest_floor_to_center};
use super::model::ValidationResult;

pub fn validate_connectivity(
    grid: &mut Grid,
    start: Option<Pos>,
    repair: bool,
) -> ValidationResult {
    let start = resolve_start(grid, start);
    let mut visited = vec![false; grid.width() * grid.height()];
    let reachable = flood_fill(grid, start, &mut visited, CellState::is_passable);
    let total_floor_tiles = grid.passable_count();
    let reachable_tiles = reachable.len();

    let (isolated_regions, largest_isolated_region) =
        isolated_region_stats(grid, &mut visited.clone());

    let mut result = ValidationResult {
        valid: reachable_tiles == total_floor_tiles,
        start,
        total_floor_tiles,
        reachable_tiles,
        isolated_regions,
        largest_isolated_region,
        repaired_tiles: 0,
    };

    if repair && !result.valid {
        let mut repaired_tiles = 0;
        for pos in grid.positions() {
            if !visited[grid.index(pos)] && grid.get(pos).is_passable() {
                grid.set(pos, CellState::Wall);
                repaired_tiles += 1;
            }
        }
        result.repaired_tiles = repaired_tiles;
        result.total_floor_tiles = grid.passable_count();
        result.valid = result.total_floor_tiles == result.reachable_tiles;
    }

    debug!(
        start = ?result.start,
        reachable = result.reachable_tiles,
        total = result.total_floor_tiles,
        isolated_regions = result.isolated_regions,
        repaired = result.repaired_tiles,
        valid = result.valid,
        "connectivity validated"
    );
    result
}

fn resolve_start(grid: &Grid, requested: Option<Pos>) -> Pos {
    if let Some(pos) = requested
        && grid.get(pos) == CellState::Floor
    {
        return pos;
    }
    nearest_floor_to_center(grid).unwrap_or(Pos::ORIGIN)
}

fn isolated_region_stats(grid: &Grid, visited: &mut [bool]) -> (usize, usize) {
    let mut regions = 0;
    let mut largest = 0;
    for pos in grid.positions() {
        let region = flood_fill(grid, pos, visited, CellState::is_passable);
        if !region.is_empty() {
            regions += 1;
            largest = largest.max(region.len());
        }
    }
    (regions, largest)
}
