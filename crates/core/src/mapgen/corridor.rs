//! Corridor carving between points and rooms.

use crate::config::{CorridorConfig, CorridorStyle};
use crate::dungeon::{Grid, Room};
use crate::rng::DungeonRng;
use crate::types::{CellState, Pos};

/// Carves a corridor from `from` to `to` in the configured style and width.
///
/// Returns how many wall cells became floor. Writes that would land outside
/// the grid or on its border ring are skipped.
pub fn carve_corridor(
    grid: &mut Grid,
    from: Pos,
    to: Pos,
    config: &CorridorConfig,
    rng: &mut DungeonRng,
) -> usize {
    match config.style {
        CorridorStyle::LShaped => carve_l_shaped(grid, from, to, config.width),
        CorridorStyle::Straight => carve_straight(grid, from, to, config.width),
        CorridorStyle::Waypoint => {
            carve_waypoint(grid, from, to, config.waypoints, config.width, rng)
        }
    }
}

/// Horizontal leg along the source row, then vertical leg along the target column.
pub fn carve_l_shaped(grid: &mut Grid, from: Pos, to: Pos, width: u8) -> usize {
    let mut carved = 0;
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        carved += carve_tile(grid, Pos { y: from.y, x }, width);
    }
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        carved += carve_tile(grid, Pos { y, x: to.x }, width);
    }
    carved
}

/// Rounded linear interpolation with `max(|dx|, |dy|)` steps.
pub fn carve_straight(grid: &mut Grid, from: Pos, to: Pos, width: u8) -> usize {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
    if steps == 0 {
        return 0;
    }

    let mut carved = 0;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let pos = Pos {
            y: (from.y as f64 + dy * t).round() as i32,
            x: (from.x as f64 + dx * t).round() as i32,
        };
        carved += carve_tile(grid, pos, width);
    }
    carved
}

/// Chains L-shaped segments through `count` random points inside the
/// bounding box of `from` and `to`.
pub fn carve_waypoint(
    grid: &mut Grid,
    from: Pos,
    to: Pos,
    count: usize,
    width: u8,
    rng: &mut DungeonRng,
) -> usize {
    let min_x = from.x.min(to.x);
    let min_y = from.y.min(to.y);
    let span_x = from.x.abs_diff(to.x) as usize + 1;
    let span_y = from.y.abs_diff(to.y) as usize + 1;

    // Signed box; endpoints may lie off the grid.
    let mut points = Vec::with_capacity(count + 2);
    points.push(from);
    for _ in 0..count {
        let x = min_x + rng.below(span_x) as i32;
        let y = min_y + rng.below(span_y) as i32;
        points.push(Pos { y, x });
    }
    points.push(to);

    points.windows(2).map(|leg| carve_l_shaped(grid, leg[0], leg[1], width)).sum()
}

pub fn connect_rooms(
    grid: &mut Grid,
    from: &Room,
    to: &Room,
    config: &CorridorConfig,
    rng: &mut DungeonRng,
) -> usize {
    carve_corridor(grid, from.center(), to.center(), config, rng)
}

/// Connects `rooms[0] -> rooms[1] -> ...` in list order.
pub fn connect_rooms_in_sequence(
    grid: &mut Grid,
    rooms: &[Room],
    config: &CorridorConfig,
    rng: &mut DungeonRng,
) -> usize {
    rooms.windows(2).map(|pair| connect_rooms(grid, &pair[0], &pair[1], config, rng)).sum()
}

fn carve_tile(grid: &mut Grid, pos: Pos, width: u8) -> usize {
    let mut carved = carve_cell(grid, pos);
    if width >= 2 {
        carved += carve_cell(grid, Pos { y: pos.y - 1, x: pos.x });
        carved += carve_cell(grid, Pos { y: pos.y + 1, x: pos.x });
    }
    if width >= 3 {
        carved += carve_cell(grid, Pos { y: pos.y, x: pos.x - 1 });
        carved += carve_cell(grid, Pos { y: pos.y, x: pos.x + 1 });
    }
    carved
}

fn carve_cell(grid: &mut Grid, pos: Pos) -> usize {
    if !grid.is_interior(pos) {
        return 0;
    }
    let was_wall = grid.get(pos) == CellState::Wall;
    grid.set(pos, CellState::Floor);
    usize::from(was_wall)
}
