//! Grid, room, and dungeon aggregate shared by every generator and stage.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CellState, Pos, RoomTag};

pub const MIN_GRID_DIMENSION: usize = 3;

/// Row-major rectangle of cells. The outer ring is treated as solid border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocates an all-wall grid.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is below 3, since such a grid has no
    /// interior. Public entry points validate dimensions before reaching here.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= MIN_GRID_DIMENSION && height >= MIN_GRID_DIMENSION,
            "grid dimensions must be at least {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}, got {width}x{height}"
        );
        Self { width, height, cells: vec![CellState::default(); width * height] }
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn center(&self) -> Pos {
        Pos { y: (self.height / 2) as i32, x: (self.width / 2) as i32 }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x as usize == self.width - 1
            || pos.y as usize == self.height - 1
    }

    /// In bounds and not on the border ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.is_border(pos)
    }

    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.width + col]
    }

    /// Cell at `pos`; anything outside the grid reads as wall.
    pub fn get(&self, pos: Pos) -> CellState {
        if !self.in_bounds(pos) {
            return CellState::Wall;
        }
        self.cells[self.index(pos)]
    }

    /// Writes `state` at `pos`. Out-of-grid writes are ignored and report `false`.
    pub fn set(&mut self, pos: Pos, state: CellState) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let index = self.index(pos);
        self.cells[index] = state;
        true
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passable()).count()
    }

    pub fn interior_cell_count(&self) -> usize {
        (self.width - 2) * (self.height - 2)
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn border_is_solid(&self) -> bool {
        self.positions()
            .filter(|&pos| self.is_border(pos))
            .all(|pos| self.get(pos) == CellState::Wall)
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Axis-aligned room rectangle with an optional semantic tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub tag: RoomTag,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height, tag: RoomTag::Normal }
    }

    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn area(self) -> usize {
        self.width * self.height
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (self.y..=self.bottom())
            .flat_map(move |y| (self.x..=self.right()).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }
}

/// A generated level: grid plus the rooms carved into it, in creation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
}

impl Dungeon {
    pub fn new(width: usize, height: usize) -> Self {
        Self { grid: Grid::new(width, height), rooms: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn floor_count(&self) -> usize {
        self.grid.count(CellState::Floor)
    }

    pub fn door_count(&self) -> usize {
        self.grid.count(CellState::Door)
    }

    pub fn carve_room(&mut self, room: &Room) {
        for pos in room.positions() {
            self.grid.set(pos, CellState::Floor);
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.grid.cells().len() + self.rooms.len() * 17);
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            bytes.push(match cell {
                CellState::Wall => 0,
                CellState::Floor => 1,
                CellState::Door => 2,
            });
        }
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.x as u32).to_le_bytes());
            bytes.extend((room.y as u32).to_le_bytes());
            bytes.extend((room.width as u32).to_le_bytes());
            bytes.extend((room.height as u32).to_le_bytes());
            bytes.push(match room.tag {
                RoomTag::Normal => 0,
                RoomTag::Boss => 1,
                RoomTag::Treasure => 2,
                RoomTag::Safe => 3,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
