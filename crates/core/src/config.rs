//! Plain-data configuration consumed by generator entry points.
//!
//! Every section deserializes with defaults filled in, so a partial TOML or
//! JSON document only needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::dungeon::MIN_GRID_DIMENSION;
use crate::error::{DungeonError, Result};

/// Smallest room side a partition leaf must be able to hold.
pub const MIN_ROOM_SIZE: usize = 4;
pub const MAX_CORRIDOR_WIDTH: u8 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    RandomWalk,
    #[default]
    SpatialPartition,
    CellularAutomata,
    Hybrid,
    Template,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::RandomWalk,
        Algorithm::SpatialPartition,
        Algorithm::CellularAutomata,
        Algorithm::Hybrid,
        Algorithm::Template,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::RandomWalk => "random-walk",
            Self::SpatialPartition => "spatial-partition",
            Self::CellularAutomata => "cellular-automata",
            Self::Hybrid => "hybrid",
            Self::Template => "template",
        }
    }

    /// Algorithms that produce discrete rooms, doors, and room tags.
    pub fn is_structured(self) -> bool {
        matches!(self, Self::SpatialPartition | Self::Hybrid | Self::Template)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorridorStyle {
    #[default]
    LShaped,
    Straight,
    Waypoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    pub style: CorridorStyle,
    /// 1 = single tile, 2 adds north/south neighbours, 3 adds east/west too.
    pub width: u8,
    /// Intermediate points for [`CorridorStyle::Waypoint`].
    pub waypoints: usize,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self { style: CorridorStyle::LShaped, width: 1, waypoints: 2 }
    }
}

impl CorridorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CORRIDOR_WIDTH).contains(&self.width) {
            return Err(DungeonError::InvalidConfig(format!(
                "corridor width must be within 1..={MAX_CORRIDOR_WIDTH}, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    /// Fraction of all cells (border included) the walker must carve.
    pub coverage: f64,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self { coverage: 0.35 }
    }
}

impl RandomWalkConfig {
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        check_probability("random_walk.coverage", self.coverage)?;
        let target = floor_target(width, height, self.coverage);
        let interior = (width - 2) * (height - 2);
        if target > interior {
            return Err(DungeonError::InvalidConfig(format!(
                "random walk coverage {} needs {target} floor cells but only {interior} interior cells exist",
                self.coverage
            )));
        }
        Ok(())
    }
}

/// Number of floor cells the random walk stops at.
pub fn floor_target(width: usize, height: usize, coverage: f64) -> usize {
    ((width * height) as f64 * coverage).floor() as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    pub min_leaf_size: usize,
    pub corridor: CorridorConfig,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self { min_leaf_size: 10, corridor: CorridorConfig::default() }
    }
}

impl PartitionConfig {
    pub fn validate(&self) -> Result<()> {
        check_leaf_size("partition.min_leaf_size", self.min_leaf_size)?;
        self.corridor.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Probability that an interior cell starts as wall.
    pub initial_fill: f64,
    pub generations: usize,
    /// Wall neighbours (of 8) at which a cell becomes wall.
    pub wall_threshold: usize,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self { initial_fill: 0.45, generations: 4, wall_threshold: 4 }
    }
}

impl CaveConfig {
    pub fn validate(&self) -> Result<()> {
        check_probability("cave.initial_fill", self.initial_fill)?;
        if self.wall_threshold > 8 {
            return Err(DungeonError::InvalidConfig(format!(
                "cave.wall_threshold must be within 0..=8, got {}",
                self.wall_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    pub min_leaf_size: usize,
    /// Probability that an eligible leaf actually receives its room.
    pub room_density: f64,
    pub cave: CaveConfig,
    pub corridor: CorridorConfig,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            min_leaf_size: 10,
            room_density: 0.3,
            cave: CaveConfig::default(),
            corridor: CorridorConfig::default(),
        }
    }
}

impl HybridConfig {
    pub fn validate(&self) -> Result<()> {
        self.cave.validate()?;
        check_leaf_size("hybrid.min_leaf_size", self.min_leaf_size)?;
        check_probability("hybrid.room_density", self.room_density)?;
        self.corridor.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub room_count: usize,
    pub attempts_per_room: usize,
    pub corridor: CorridorConfig,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { room_count: 8, attempts_per_room: 50, corridor: CorridorConfig::default() }
    }
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.attempts_per_room == 0 {
            return Err(DungeonError::InvalidConfig(
                "template.attempts_per_room must be positive".to_string(),
            ));
        }
        self.corridor.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_distance: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { min_distance: 25 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    pub treasure_count: usize,
    pub safe_count: usize,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self { treasure_count: 2, safe_count: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub enemy_count: usize,
    pub treasure_count: usize,
    /// Enemies never spawn within this Manhattan distance of the start.
    pub safe_radius: u32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { enemy_count: 6, treasure_count: 3, safe_radius: 4 }
    }
}

/// Everything one generation request needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    pub algorithm: Algorithm,
    /// Convert unreachable floor to wall during validation.
    pub repair: bool,
    pub random_walk: RandomWalkConfig,
    pub partition: PartitionConfig,
    pub cave: CaveConfig,
    pub hybrid: HybridConfig,
    pub template: TemplateConfig,
    pub spawns: SpawnConfig,
    pub tagging: TaggingConfig,
    pub markers: MarkerConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 45,
            algorithm: Algorithm::default(),
            repair: true,
            random_walk: RandomWalkConfig::default(),
            partition: PartitionConfig::default(),
            cave: CaveConfig::default(),
            hybrid: HybridConfig::default(),
            template: TemplateConfig::default(),
            spawns: SpawnConfig::default(),
            tagging: TaggingConfig::default(),
            markers: MarkerConfig::default(),
        }
    }
}

impl LevelConfig {
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self { algorithm, ..Self::default() }
    }

    /// Validates the dimensions and the section the chosen algorithm reads.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        match self.algorithm {
            Algorithm::RandomWalk => self.random_walk.validate(self.width, self.height),
            Algorithm::SpatialPartition => self.partition.validate(),
            Algorithm::CellularAutomata => self.cave.validate(),
            Algorithm::Hybrid => self.hybrid.validate(),
            Algorithm::Template => self.template.validate(),
        }
    }
}

pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
        return Err(DungeonError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DungeonError::InvalidProbability { name, value });
    }
    Ok(())
}

fn check_leaf_size(name: &str, value: usize) -> Result<()> {
    if value < MIN_ROOM_SIZE + 2 {
        return Err(DungeonError::InvalidConfig(format!(
            "{name} must be at least {}, got {value}",
            MIN_ROOM_SIZE + 2
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LevelConfig::default();
        assert_eq!((config.width, config.height), (80, 45));
        assert_eq!(config.random_walk.coverage, 0.35);
        assert_eq!(config.partition.min_leaf_size, 10);
        assert_eq!(config.cave, CaveConfig { initial_fill: 0.45, generations: 4, wall_threshold: 4 });
        assert_eq!(config.hybrid.room_density, 0.3);
        assert_eq!(config.spawns.min_distance, 25);
        assert_eq!(config.tagging, TaggingConfig { treasure_count: 2, safe_count: 1 });
        assert_eq!(config.partition.corridor.style, CorridorStyle::LShaped);
        assert_eq!(config.partition.corridor.width, 1);
        for algorithm in Algorithm::ALL {
            LevelConfig::with_algorithm(algorithm).validate().expect("defaults are valid");
        }
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let config = LevelConfig { width: 2, ..LevelConfig::default() };
        assert!(matches!(config.validate(), Err(DungeonError::InvalidDimensions { .. })));
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let mut config = LevelConfig::with_algorithm(Algorithm::CellularAutomata);
        config.cave.initial_fill = 1.5;
        assert!(matches!(config.validate(), Err(DungeonError::InvalidProbability { .. })));
    }

    #[test]
    fn random_walk_section_checks_dimensions_on_its_own() {
        let section = RandomWalkConfig::default();
        assert!(matches!(section.validate(1, 1), Err(DungeonError::InvalidDimensions { .. })));
        assert!(matches!(section.validate(0, 45), Err(DungeonError::InvalidDimensions { .. })));
        section.validate(80, 45).expect("default section is valid");
    }

    #[test]
    fn rejects_unreachable_random_walk_coverage() {
        let mut config = LevelConfig::with_algorithm(Algorithm::RandomWalk);
        config.random_walk.coverage = 0.99;
        assert!(matches!(config.validate(), Err(DungeonError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_corridor_width_and_leaf_size() {
        let mut config = LevelConfig::default();
        config.partition.corridor.width = 4;
        assert!(config.validate().is_err());
        config.partition.corridor.width = 2;
        config.partition.min_leaf_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: LevelConfig =
            serde_json::from_str(r#"{"algorithm":"hybrid","hybrid":{"room_density":0.5}}"#)
                .expect("partial config should parse");
        assert_eq!(config.algorithm, Algorithm::Hybrid);
        assert_eq!(config.hybrid.room_density, 0.5);
        assert_eq!(config.hybrid.min_leaf_size, 10);
        assert_eq!(config.width, 80);
    }
}
