//! Cellular-automata caves: random fill, majority smoothing, then keep only
//! the largest connected pocket.

use tracing::debug;

use crate::config::CaveConfig;
use crate::dungeon::{Dungeon, Grid};
use crate::rng::DungeonRng;
use crate::types::{CellState, Pos};

use super::grid::flood_fill;

pub fn generate_cave(
    width: usize,
    height: usize,
    config: &CaveConfig,
    rng: &mut DungeonRng,
) -> Dungeon {
    let mut grid = seed_cave(width, height, config.initial_fill, rng);
    for _ in 0..config.generations {
        grid = evolve(&grid, config.wall_threshold);
    }
    let kept = keep_largest_region(&mut grid);

    debug!(
        algorithm = "cellular-automata",
        generations = config.generations,
        floor = kept,
        "cave generated"
    );
    Dungeon { grid, rooms: Vec::new() }
}

fn seed_cave(width: usize, height: usize, initial_fill: f64, rng: &mut DungeonRng) -> Grid {
    let mut grid = Grid::new(width, height);
    for pos in grid.positions() {
        if grid.is_border(pos) {
            continue;
        }
        let state = if rng.chance(initial_fill) { CellState::Wall } else { CellState::Floor };
        grid.set(pos, state);
    }
    grid
}

/// One simultaneous smoothing step into a fresh buffer.
fn evolve(previous: &Grid, wall_threshold: usize) -> Grid {
    let mut next = Grid::new(previous.width(), previous.height());
    for pos in previous.positions() {
        if previous.is_border(pos) {
            continue;
        }
        let walls = wall_neighbors(previous, pos);
        let state = if walls >= wall_threshold { CellState::Wall } else { CellState::Floor };
        next.set(pos, state);
    }
    next
}

/// Wall cells among the in-grid Moore neighbours; off-grid cells are not counted.
fn wall_neighbors(grid: &Grid, pos: Pos) -> usize {
    let mut walls = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let neighbor = Pos { y: pos.y + dy, x: pos.x + dx };
            if grid.in_bounds(neighbor) && grid.get(neighbor) == CellState::Wall {
                walls += 1;
            }
        }
    }
    walls
}

/// Walls off every floor region except the largest and returns its size.
///
/// Regions are discovered in row-major order; on a tie the first one found is kept.
pub(crate) fn keep_largest_region(grid: &mut Grid) -> usize {
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut largest: Vec<Pos> = Vec::new();
    for pos in grid.positions() {
        let region = flood_fill(grid, pos, &mut visited, |cell| cell == CellState::Floor);
        if region.len() > largest.len() {
            largest = region;
        }
    }

    let mut keep = vec![false; grid.width() * grid.height()];
    for &pos in &largest {
        keep[grid.index(pos)] = true;
    }
    for pos in grid.positions() {
        if !keep[grid.index(pos)] {
            grid.set(pos, CellState::Wall);
        }
    }
    largest.len()
}
