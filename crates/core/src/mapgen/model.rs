//! Result values produced by validation, spawn placement, tagging, and marker placement.

use serde::{Deserialize, Serialize};

use crate::config::Algorithm;
use crate::dungeon::Dungeon;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub start: Pos,
    /// Passable (floor and door) cells after any repair.
    pub total_floor_tiles: usize,
    pub reachable_tiles: usize,
    /// Regions found unreachable from `start`, counted before repair.
    pub isolated_regions: usize,
    pub largest_isolated_region: usize,
    pub repaired_tiles: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoints {
    pub start: Pos,
    pub end: Pos,
    pub distance: u32,
    pub valid: bool,
}

/// Room indices that received each non-normal tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    pub boss: Option<usize>,
    pub treasure: Vec<usize>,
    pub safe: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Enemy,
    Treasure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMarker {
    pub kind: MarkerKind,
    pub pos: Pos,
}

/// Output of the full generation pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub algorithm: Algorithm,
    pub dungeon: Dungeon,
    pub validation: ValidationResult,
    pub spawns: SpawnPoints,
    /// `None` when the algorithm has no rooms to tag.
    pub tags: Option<TagSummary>,
    pub markers: Vec<EntityMarker>,
}
