//! Flood-fill and floor-search primitives shared by the cave, validation, and spawn stages.

use std::collections::VecDeque;

use crate::dungeon::Grid;
use crate::types::{CellState, Pos};

/// Iterative 4-connected flood fill from `start` over cells accepted by `accept`.
///
/// Marks `visited` (indexed like the grid) and returns the component in
/// discovery order. Returns an empty vector when `start` is rejected or was
/// already visited.
pub(crate) fn flood_fill(
    grid: &Grid,
    start: Pos,
    visited: &mut [bool],
    accept: impl Fn(CellState) -> bool,
) -> Vec<Pos> {
    if !grid.in_bounds(start) || visited[grid.index(start)] || !accept(grid.get(start)) {
        return Vec::new();
    }

    let mut component = Vec::new();
    let mut stack = vec![start];
    visited[grid.index(start)] = true;
    while let Some(pos) = stack.pop() {
        component.push(pos);
        for next in pos.cardinal_neighbors() {
            if !grid.in_bounds(next) {
                continue;
            }
            let index = grid.index(next);
            if visited[index] || !accept(grid.get(next)) {
                continue;
            }
            visited[index] = true;
            stack.push(next);
        }
    }
    component
}

/// Breadth-first distances from `start` over passable cells.
///
/// Returns cells in FIFO visitation order paired with their depth.
pub(crate) fn bfs_depths(grid: &Grid, start: Pos) -> Vec<(Pos, u32)> {
    let mut order = Vec::new();
    if !grid.in_bounds(start) || !grid.get(start).is_passable() {
        return order;
    }

    let mut seen = vec![false; grid.width() * grid.height()];
    let mut open = VecDeque::from([(start, 0_u32)]);
    seen[grid.index(start)] = true;
    while let Some((pos, depth)) = open.pop_front() {
        order.push((pos, depth));
        for next in pos.cardinal_neighbors() {
            if !grid.in_bounds(next) {
                continue;
            }
            let index = grid.index(next);
            if seen[index] || !grid.get(next).is_passable() {
                continue;
            }
            seen[index] = true;
            open.push_back((next, depth + 1));
        }
    }
    order
}

pub(crate) fn first_floor_cell(grid: &Grid) -> Option<Pos> {
    grid.positions().find(|&pos| grid.get(pos) == CellState::Floor)
}

/// Floor cell nearest the grid center.
///
/// Scans square rings outward from the center (row-major within a ring) out
/// to half the shorter dimension, then falls back to a row-major scan of the
/// whole grid.
pub(crate) fn nearest_floor_to_center(grid: &Grid) -> Option<Pos> {
    let center = grid.center();
    let max_radius = (grid.width().min(grid.height()) / 2) as i32;
    for radius in 0..=max_radius {
        for y in (center.y - radius)..=(center.y + radius) {
            for x in (center.x - radius)..=(center.x + radius) {
                let on_ring = (y - center.y).abs() == radius || (x - center.x).abs() == radius;
                let pos = Pos { y, x };
                if on_ring && grid.get(pos) == CellState::Floor {
                    return Some(pos);
                }
            }
        }
    }
    first_floor_cell(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let width = rows[0].len();
        let mut grid = Grid::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let state = CellState::from_glyph(glyph).expect("test glyph");
                grid.set(Pos { y: y as i32, x: x as i32 }, state);
            }
        }
        grid
    }

    #[test]
    fn flood_fill_stays_inside_its_component() {
        let grid = grid_from_rows(&["#######", "#..#..#", "#..#..#", "#######"]);
        let mut visited = vec![false; grid.width() * grid.height()];
        let left = flood_fill(&grid, Pos { y: 1, x: 1 }, &mut visited, |c| c == CellState::Floor);
        assert_eq!(left.len(), 4);
        let again = flood_fill(&grid, Pos { y: 2, x: 2 }, &mut visited, |c| c == CellState::Floor);
        assert!(again.is_empty(), "visited cells are not filled twice");
    }

    #[test]
    fn bfs_depths_are_fifo_ordered_and_cross_doors() {
        let grid = grid_from_rows(&["#######", "#..+..#", "#######"]);
        let depths = bfs_depths(&grid, Pos { y: 1, x: 1 });
        assert_eq!(depths.len(), 5);
        assert_eq!(depths.last().copied(), Some((Pos { y: 1, x: 5 }, 4)));
        assert!(depths.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[test]
    fn nearest_floor_prefers_center_ring() {
        let grid = grid_from_rows(&["#########", "#.......#", "#...#...#", "#.......#", "#########"]);
        assert_eq!(nearest_floor_to_center(&grid), Some(Pos { y: 1, x: 3 }));
    }

    #[test]
    fn nearest_floor_falls_back_to_row_major_scan() {
        let grid = grid_from_rows(&["#########", "#.#######", "#########", "#########", "#########"]);
        assert_eq!(nearest_floor_to_center(&grid), Some(Pos { y: 1, x: 1 }));
        assert_eq!(nearest_floor_to_center(&Grid::new(9, 5)), None);
    }
}
