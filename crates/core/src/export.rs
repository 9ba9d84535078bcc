//! JSON export and import of a dungeon's grid and room geometry.
//!
//! The document carries the row-major cell string (`#`, `.`, `+`) together
//! with its SHA-256 so a hand-edited or truncated file is rejected on load.
//! Room tags are not part of the format; imported rooms come back as
//! [`RoomTag::Normal`](crate::types::RoomTag::Normal).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::check_dimensions;
use crate::dungeon::{Dungeon, Grid, Room};
use crate::error::{DungeonError, Result};
use crate::types::CellState;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DungeonFile {
    pub format_version: u32,
    pub width: usize,
    pub height: usize,
    pub cells: String,
    pub cells_sha256: String,
    pub rooms: Vec<RoomGeometry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomGeometry {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomGeometry {
    /// Non-empty and fully inside a `grid_width` x `grid_height` grid.
    fn to_room(self, index: usize, grid_width: usize, grid_height: usize) -> Result<Room> {
        let fits = |start: usize, len: usize, limit: usize| {
            len > 0 && start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(self.x, self.width, grid_width) || !fits(self.y, self.height, grid_height) {
            return Err(DungeonError::InvalidRoom {
                index,
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(Room::new(self.x, self.y, self.width, self.height))
    }
}

fn cells_sha256(cells: &str) -> String {
    let digest = Sha256::digest(cells.as_bytes());
    format!("{digest:064x}")
}

impl DungeonFile {
    pub fn from_dungeon(dungeon: &Dungeon) -> Self {
        let cells: String = dungeon.grid.cells().iter().map(|cell| cell.glyph()).collect();
        let rooms = dungeon
            .rooms
            .iter()
            .map(|room| RoomGeometry {
                x: room.x,
                y: room.y,
                width: room.width,
                height: room.height,
            })
            .collect();
        Self {
            format_version: FORMAT_VERSION,
            width: dungeon.width(),
            height: dungeon.height(),
            cells_sha256: cells_sha256(&cells),
            cells,
            rooms,
        }
    }

    pub fn into_dungeon(self) -> Result<Dungeon> {
        if self.format_version != FORMAT_VERSION {
            return Err(DungeonError::UnsupportedFormatVersion(self.format_version));
        }
        check_dimensions(self.width, self.height)?;

        let expected = self.width.checked_mul(self.height).ok_or(
            DungeonError::InvalidDimensions { width: self.width, height: self.height },
        )?;
        let actual = self.cells.chars().count();
        if actual != expected {
            return Err(DungeonError::CellCountMismatch { expected, actual });
        }
        let computed = cells_sha256(&self.cells);
        if computed != self.cells_sha256 {
            return Err(DungeonError::ChecksumMismatch {
                expected: self.cells_sha256,
                actual: computed,
            });
        }

        let cells = self
            .cells
            .chars()
            .enumerate()
            .map(|(index, glyph)| {
                CellState::from_glyph(glyph).ok_or(DungeonError::UnknownCell { glyph, index })
            })
            .collect::<Result<Vec<_>>>()?;
        let rooms = self
            .rooms
            .iter()
            .enumerate()
            .map(|(index, room)| room.to_room(index, self.width, self.height))
            .collect::<Result<Vec<_>>>()?;

        Ok(Dungeon { grid: Grid::from_cells(self.width, self.height, cells), rooms })
    }

    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

pub fn export_dungeon(dungeon: &Dungeon) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DungeonFile::from_dungeon(dungeon))?)
}

pub fn import_dungeon(json: &str) -> Result<Dungeon> {
    let file: DungeonFile = serde_json::from_str(json)?;
    file.into_dungeon()
}

pub fn save_dungeon(dungeon: &Dungeon, path: &Path) -> Result<()> {
    DungeonFile::from_dungeon(dungeon).write_atomic(path)
}

pub fn load_dungeon(path: &Path) -> Result<Dungeon> {
    DungeonFile::load(path)?.into_dungeon()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::{Pos, RoomTag};

    fn sample() -> Dungeon {
        let mut dungeon = Dungeon::new(12, 8);
        let room = Room { tag: RoomTag::Boss, ..Room::new(2, 2, 4, 3) };
        dungeon.carve_room(&room);
        dungeon.rooms.push(room);
        dungeon.grid.set(Pos { y: 3, x: 6 }, CellState::Door);
        dungeon
    }

    #[test]
    fn round_trip_keeps_cells_and_geometry_but_drops_tags() {
        let original = sample();
        let json = export_dungeon(&original).expect("export");
        let imported = import_dungeon(&json).expect("import");

        assert_eq!(imported.grid, original.grid);
        assert_eq!(imported.rooms.len(), 1);
        assert_eq!(imported.rooms[0].tag, RoomTag::Normal);
        assert_eq!(Room { tag: RoomTag::Boss, ..imported.rooms[0] }, original.rooms[0]);
    }

    #[test]
    fn tampered_cells_fail_the_checksum() {
        let mut file = DungeonFile::from_dungeon(&sample());
        file.cells.replace_range(0..1, ".");
        assert!(matches!(file.into_dungeon(), Err(DungeonError::ChecksumMismatch { .. })));
    }

    #[test]
    fn truncated_and_unknown_cells_are_rejected() {
        let mut short = DungeonFile::from_dungeon(&sample());
        short.cells.pop();
        short.cells_sha256 = cells_sha256(&short.cells);
        assert!(matches!(
            short.into_dungeon(),
            Err(DungeonError::CellCountMismatch { expected: 96, actual: 95 })
        ));

        let mut odd = DungeonFile::from_dungeon(&sample());
        odd.cells.replace_range(5..6, "~");
        odd.cells_sha256 = cells_sha256(&odd.cells);
        assert!(matches!(odd.into_dungeon(), Err(DungeonError::UnknownCell { glyph: '~', index: 5 })));
    }

    #[test]
    fn empty_or_out_of_grid_rooms_are_rejected() {
        let mut empty = DungeonFile::from_dungeon(&sample());
        empty.rooms[0].width = 0;
        assert!(matches!(
            empty.into_dungeon(),
            Err(DungeonError::InvalidRoom { index: 0, width: 0, .. })
        ));

        let mut outside = DungeonFile::from_dungeon(&sample());
        outside.rooms.push(RoomGeometry { x: 500, y: 1, width: 3, height: 3 });
        assert!(matches!(
            outside.into_dungeon(),
            Err(DungeonError::InvalidRoom { index: 1, x: 500, .. })
        ));

        let mut overhang = DungeonFile::from_dungeon(&sample());
        overhang.rooms[0].height = 7;
        assert!(matches!(overhang.into_dungeon(), Err(DungeonError::InvalidRoom { index: 0, .. })));

        let mut wrapping = DungeonFile::from_dungeon(&sample());
        wrapping.rooms[0].x = usize::MAX;
        assert!(matches!(wrapping.into_dungeon(), Err(DungeonError::InvalidRoom { .. })));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let mut file = DungeonFile::from_dungeon(&sample());
        file.width = usize::MAX;
        file.height = 4;
        assert!(matches!(file.into_dungeon(), Err(DungeonError::InvalidDimensions { .. })));
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let mut file = DungeonFile::from_dungeon(&sample());
        file.format_version = 7;
        assert!(matches!(file.into_dungeon(), Err(DungeonError::UnsupportedFormatVersion(7))));
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("levels").join("level.json");
        let original = sample();

        save_dungeon(&original, &path).expect("save");
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_dungeon(&path).expect("load");
        assert_eq!(loaded.grid, original.grid);
    }
}
