//! Error types for configuration misuse and the export codec.

use std::{io, result};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("grid dimensions must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("template '{name}' is invalid: {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("template catalog is empty")]
    EmptyCatalog,

    #[error("unknown cell glyph {glyph:?} at index {index}")]
    UnknownCell { glyph: char, index: usize },

    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("cell checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("room {index} at ({x}, {y}) sized {width}x{height} does not fit the grid")]
    InvalidRoom { index: usize, x: usize, y: usize, width: usize, height: usize },

    #[error("unsupported export format version {0}")]
    UnsupportedFormatVersion(u32),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, DungeonError>;
