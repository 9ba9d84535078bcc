pub mod config;
pub mod dungeon;
pub mod error;
pub mod export;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use config::{Algorithm, CorridorStyle, LevelConfig};
pub use dungeon::{Dungeon, Grid, Room};
pub use error::{DungeonError, Result};
pub use export::{export_dungeon, import_dungeon, load_dungeon, save_dungeon};
pub use mapgen::{GeneratedLevel, MapGenerator, TemplateCatalog, generate_dungeon, generate_level};
pub use rng::DungeonRng;
pub use types::*;
