//! TOML-backed [`LevelConfig`] loading with command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::{Algorithm, LevelConfig};

pub fn load(path: &Path) -> Result<LevelConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: LevelConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn to_toml(config: &LevelConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize level config")
}

/// Values given on the command line take precedence over the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub algorithm: Option<Algorithm>,
    pub no_repair: bool,
}

impl LevelOverrides {
    pub fn apply(self, mut config: LevelConfig) -> LevelConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if self.no_repair {
            config.repair = false;
        }
        config
    }
}

pub fn resolve(path: Option<&Path>, overrides: LevelOverrides) -> Result<LevelConfig> {
    let base = match path {
        Some(path) => load(path)?,
        None => LevelConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("invalid level configuration")?;
    Ok(config)
}
