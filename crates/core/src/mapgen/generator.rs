//! High-level generation orchestration: dispatches to one of the five
//! algorithms and hands the raw dungeon to the post-processing pipeline.

mod pipeline;

use crate::config::{Algorithm, LevelConfig};
use crate::dungeon::Dungeon;
use crate::error::Result;
use crate::rng::DungeonRng;

use super::cave::generate_cave;
use super::hybrid::generate_hybrid;
use super::model::GeneratedLevel;
use super::partition::generate_spatial_partition;
use super::random_walk::generate_random_walk;
use super::templates::{TemplateCatalog, generate_template};

pub struct MapGenerator<'a> {
    config: LevelConfig,
    catalog: &'a TemplateCatalog,
}

impl<'a> MapGenerator<'a> {
    /// Validates `config` once so every later `generate` call can assume it.
    pub fn new(config: LevelConfig, catalog: &'a TemplateCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, catalog })
    }

    /// Raw generator output, before validation, spawns, tags, and markers.
    pub fn generate_dungeon(&self, rng: &mut DungeonRng) -> Result<Dungeon> {
        let LevelConfig { width, height, .. } = self.config;
        let dungeon = match self.config.algorithm {
            Algorithm::RandomWalk => {
                generate_random_walk(width, height, &self.config.random_walk, rng)
            }
            Algorithm::SpatialPartition => {
                generate_spatial_partition(width, height, &self.config.partition, rng)
            }
            Algorithm::CellularAutomata => generate_cave(width, height, &self.config.cave, rng),
            Algorithm::Hybrid => generate_hybrid(width, height, &self.config.hybrid, rng),
            Algorithm::Template => {
                generate_template(width, height, &self.config.template, self.catalog, rng)?
            }
        };
        Ok(dungeon)
    }

    pub fn generate(&self, rng: &mut DungeonRng) -> Result<GeneratedLevel> {
        let dungeon = self.generate_dungeon(rng)?;
        Ok(pipeline::finish_level(&self.config, dungeon, rng))
    }
}
