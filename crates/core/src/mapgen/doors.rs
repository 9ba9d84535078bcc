//! Door placement at single-tile chokepoints.

use crate::dungeon::Grid;
use crate::types::{CellState, Pos};

/// Converts every qualifying chokepoint to [`CellState::Door`] and returns
/// how many doors were placed.
///
/// All candidates are collected before any cell changes, so a new door never
/// affects whether its neighbour qualifies.
pub fn place_doors(grid: &mut Grid) -> usize {
    let candidates: Vec<Pos> = grid.positions().filter(|&pos| is_chokepoint(grid, pos)).collect();
    for &pos in &candidates {
        grid.set(pos, CellState::Door);
    }
    candidates.len()
}

/// Interior floor cell open along exactly one axis and walled along the other.
pub fn is_chokepoint(grid: &Grid, pos: Pos) -> bool {
    if !grid.is_interior(pos) || grid.get(pos) != CellState::Floor {
        return false;
    }
    let (north, east, south, west) = orthogonal_cells(grid, pos);
    let vertical_open = north != CellState::Wall && south != CellState::Wall;
    let horizontal_open = east != CellState::Wall && west != CellState::Wall;
    let vertical_walled = north == CellState::Wall && south == CellState::Wall;
    let horizontal_walled = east == CellState::Wall && west == CellState::Wall;
    (vertical_open && horizontal_walled) || (horizontal_open && vertical_walled)
}

/// Door cell whose surroundings still match the chokepoint shape.
pub fn door_is_well_formed(grid: &Grid, pos: Pos) -> bool {
    if grid.get(pos) != CellState::Door {
        return false;
    }
    let (north, east, south, west) = orthogonal_cells(grid, pos);
    let vertical_open = north.is_passable() && south.is_passable();
    let horizontal_open = east.is_passable() && west.is_passable();
    let vertical_walled = north == CellState::Wall && south == CellState::Wall;
    let horizontal_walled = east == CellState::Wall && west == CellState::Wall;
    (vertical_open && horizontal_walled) || (horizontal_open && vertical_walled)
}

fn orthogonal_cells(grid: &Grid, pos: Pos) -> (CellState, CellState, CellState, CellState) {
    let [north, east, south, west] = pos.cardinal_neighbors();
    (grid.get(north), grid.get(east), grid.get(south), grid.get(west))
}
