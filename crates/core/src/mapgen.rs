//! Procedural dungeon generation split into per-algorithm and per-stage submodules.

pub mod cave;
pub mod connectivity;
pub mod corridor;
pub mod doors;
pub mod hybrid;
pub mod markers;
pub mod model;
pub mod partition;
pub mod random_walk;
pub mod spawns;
pub mod tagging;
pub mod templates;

mod generator;
mod grid;

pub use cave::generate_cave;
pub use connectivity::validate_connectivity;
pub use corridor::{carve_corridor, connect_rooms, connect_rooms_in_sequence};
pub use doors::place_doors;
pub use generator::MapGenerator;
pub use hybrid::generate_hybrid;
pub use markers::place_markers;
pub use model::{
    EntityMarker, GeneratedLevel, MarkerKind, SpawnPoints, TagSummary, ValidationResult,
};
pub use partition::generate_spatial_partition;
pub use random_walk::generate_random_walk;
pub use spawns::place_spawn_points;
pub use tagging::tag_rooms;
pub use templates::{Template, TemplateCatalog, generate_template};

use crate::config::LevelConfig;
use crate::dungeon::Dungeon;
use crate::error::Result;
use crate::rng::DungeonRng;

/// Runs the configured generator alone, without post-processing.
pub fn generate_dungeon(
    config: &LevelConfig,
    catalog: &TemplateCatalog,
    rng: &mut DungeonRng,
) -> Result<Dungeon> {
    MapGenerator::new(*config, catalog)?.generate_dungeon(rng)
}

/// Full pipeline: generate, validate, place spawns, tag rooms, scatter markers.
pub fn generate_level(
    config: &LevelConfig,
    catalog: &TemplateCatalog,
    rng: &mut DungeonRng,
) -> Result<GeneratedLevel> {
    MapGenerator::new(*config, catalog)?.generate(rng)
}
