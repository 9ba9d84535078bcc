//! Prefab room templates and the template-placement generator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TemplateConfig;
use crate::dungeon::{Dungeon, Room};
use crate::error::{DungeonError, Result};
use crate::rng::DungeonRng;
use crate::types::{CellState, Pos};

use super::connectivity::validate_connectivity;
use super::corridor::connect_rooms_in_sequence;
use super::doors::place_doors;

const BUILTIN_TEMPLATES: &[(&str, &[&str])] = &[
    ("hall", &["........", "........", "........", "........", "........"]),
    (
        "pillars",
        &[".........", ".#.#.#.#.", ".........", ".........", ".#.#.#.#.", "........."],
    ),
    ("cross", &["##...##", "##...##", ".......", ".......", ".......", "##...##", "##...##"]),
    (
        "ring",
        &[".........", ".........", "..#####..", "..#####..", "..#####..", ".........", "........."],
    ),
    ("alcove", &["#######", "#.....#", "+.....#", "#......", "#.....#", "#######"]),
];

/// Rectangular prefab. Non-wall cells are stamped as floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub width: usize,
    pub height: usize,
    cells: Vec<CellState>,
}

impl Template {
    /// Parses rows of `#` (wall), `.` (floor), and `+` (door-marked floor).
    pub fn parse<S: AsRef<str>>(name: &str, rows: &[S]) -> Result<Self> {
        let invalid =
            |reason: String| DungeonError::InvalidTemplate { name: name.to_string(), reason };

        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 || height == 0 {
            return Err(invalid("template has no cells".to_string()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(invalid(format!("row {y} is not {width} cells wide")));
            }
            for (x, glyph) in row.chars().enumerate() {
                let state = CellState::from_glyph(glyph).ok_or_else(|| {
                    invalid(format!("unknown glyph {glyph:?} at row {y}, column {x}"))
                })?;
                cells.push(state);
            }
        }
        if !cells.iter().any(|cell| cell.is_passable()) {
            return Err(invalid("template has no floor".to_string()));
        }

        Ok(Self { name: name.to_string(), width, height, cells })
    }

    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.width + col]
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TemplateFileEntry {
    name: String,
    rows: Vec<String>,
}

/// Owned list of templates, built-in and externally loaded alike.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, rows)| Template::parse(name, rows))
            .collect::<Result<Vec<_>>>()
            .expect("built-in templates are valid");
        Self { templates }
    }

    /// Parses a JSON array of `{ "name": ..., "rows": [...] }` entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<TemplateFileEntry> = serde_json::from_str(json)?;
        let templates = entries
            .iter()
            .map(|entry| Template::parse(&entry.name, &entry.rows))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { templates })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        let entries: Vec<TemplateFileEntry> = self
            .templates
            .iter()
            .map(|template| TemplateFileEntry {
                name: template.name.clone(),
                rows: template.rows(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    pub fn extend(&mut self, other: TemplateCatalog) {
        self.templates.extend(other.templates);
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Stamps up to `room_count` templates at random positions, chains them with
/// corridors, validates with repair, and places doors.
///
/// Placements may overlap. A room that finds no fitting position within
/// `attempts_per_room` tries is skipped, so the room list can come back short.
pub fn generate_template(
    width: usize,
    height: usize,
    config: &TemplateConfig,
    catalog: &TemplateCatalog,
    rng: &mut DungeonRng,
) -> Result<Dungeon> {
    if catalog.is_empty() {
        return Err(DungeonError::EmptyCatalog);
    }

    let mut dungeon = Dungeon::new(width, height);
    for _ in 0..config.room_count {
        if let Some(room) = place_one(&mut dungeon, config.attempts_per_room, catalog, rng) {
            dungeon.rooms.push(room);
        }
    }
    let shortfall = config.room_count - dungeon.rooms.len();
    if shortfall > 0 {
        warn!(
            requested = config.room_count,
            placed = dungeon.rooms.len(),
            "template placement fell short"
        );
    }

    if dungeon.rooms.len() >= 2 {
        connect_rooms_in_sequence(&mut dungeon.grid, &dungeon.rooms, &config.corridor, rng);
    }
    let validation = validate_connectivity(&mut dungeon.grid, None, true);
    let doors = place_doors(&mut dungeon.grid);

    debug!(
        algorithm = "template",
        rooms = dungeon.rooms.len(),
        shortfall,
        repaired = validation.repaired_tiles,
        doors,
        floor = dungeon.floor_count(),
        "template dungeon generated"
    );
    Ok(dungeon)
}

fn place_one(
    dungeon: &mut Dungeon,
    attempts: usize,
    catalog: &TemplateCatalog,
    rng: &mut DungeonRng,
) -> Option<Room> {
    let width = dungeon.width();
    let height = dungeon.height();
    for _ in 0..attempts {
        let template = &catalog.templates[rng.below(catalog.len())];
        let x = rng.range(1, width - 2);
        let y = rng.range(1, height - 2);
        if x + template.width > width - 1 || y + template.height > height - 1 {
            continue;
        }
        stamp(dungeon, template, x, y);
        return Some(Room::new(x, y, template.width, template.height));
    }
    None
}

fn stamp(dungeon: &mut Dungeon, template: &Template, x: usize, y: usize) {
    for row in 0..template.height {
        for col in 0..template.width {
            if template.cell(row, col).is_passable() {
                let pos = Pos { y: (y + row) as i32, x: (x + col) as i32 };
                dungeon.grid.set(pos, CellState::Floor);
            }
        }
    }
}
