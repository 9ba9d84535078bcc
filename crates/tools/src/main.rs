//! Command-line front end for the dungeon generator.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dungeon_core::config::SpawnConfig;
use dungeon_core::mapgen::{place_spawn_points, validate_connectivity};
use dungeon_core::{
    Algorithm, DungeonRng, TemplateCatalog, generate_level, load_dungeon, save_dungeon,
};
use dungeon_tools::ascii::{render_dungeon, render_level, summary_lines};
use dungeon_tools::level_config_file::{self, LevelOverrides};
use dungeon_tools::seed::SeedChoice;
use tracing::{Level, info, subscriber};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "dungeon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging for every generation stage
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a level and print it
    Generate {
        /// TOML level configuration; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// random-walk, spatial-partition, cellular-automata, hybrid, or template
        #[arg(short, long, value_parser = parse_algorithm)]
        algorithm: Option<Algorithm>,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        /// Fixed seed; a wall-clock seed is used when omitted
        #[arg(short, long)]
        seed: Option<u64>,

        /// Extra JSON template catalog appended to the built-in templates
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Keep unreachable floor instead of walling it off
        #[arg(long)]
        no_repair: bool,

        /// Write the dungeon as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only the summary, not the map
        #[arg(long)]
        no_map: bool,
    },

    /// Load an exported dungeon and report its connectivity and spawn points
    Inspect {
        input: PathBuf,

        #[arg(long, default_value_t = SpawnConfig::default().min_distance)]
        min_distance: u32,
    },

    /// List the template catalog
    Templates {
        /// Extra JSON template catalog appended to the built-in templates
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Print each template's rows
        #[arg(long)]
        show: bool,
    },
}

fn parse_algorithm(raw: &str) -> Result<Algorithm, String> {
    Algorithm::ALL.into_iter().find(|algorithm| algorithm.name() == raw).ok_or_else(|| {
        let names: Vec<&str> = Algorithm::ALL.iter().map(|algorithm| algorithm.name()).collect();
        format!("unknown algorithm '{raw}', expected one of: {}", names.join(", "))
    })
}

fn load_catalog(extra: Option<&Path>) -> Result<TemplateCatalog> {
    let mut catalog = TemplateCatalog::builtin();
    if let Some(path) = extra {
        let loaded = TemplateCatalog::load(path)
            .with_context(|| format!("failed to load template catalog {}", path.display()))?;
        info!(path = %path.display(), templates = loaded.len(), "loaded extra templates");
        catalog.extend(loaded);
    }
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let fmt_subscriber =
        FmtSubscriber::builder().with_max_level(log_level).with_writer(io::stderr).finish();
    subscriber::set_global_default(fmt_subscriber).context("failed to install logger")?;

    match cli.command {
        Commands::Generate {
            config,
            algorithm,
            width,
            height,
            seed,
            templates,
            no_repair,
            output,
            no_map,
        } => {
            let overrides = LevelOverrides { width, height, algorithm, no_repair };
            let config = level_config_file::resolve(config.as_deref(), overrides)?;
            let catalog = load_catalog(templates.as_deref())?;
            let seed = SeedChoice::resolve(seed);
            info!(
                seed = seed.value(),
                source = seed.source(),
                algorithm = config.algorithm.name(),
                "generating level"
            );

            let mut rng = DungeonRng::new(seed.value());
            let level =
                generate_level(&config, &catalog, &mut rng).context("level generation failed")?;

            if !no_map {
                for row in render_level(&level) {
                    println!("{row}");
                }
            }
            for line in summary_lines(&level, seed.value()) {
                println!("{line}");
            }
            if let Some(path) = output {
                save_dungeon(&level.dungeon, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "dungeon exported");
            }
        }
        Commands::Inspect { input, min_distance } => {
            let mut dungeon = load_dungeon(&input)
                .with_context(|| format!("failed to load dungeon {}", input.display()))?;
            let validation = validate_connectivity(&mut dungeon.grid, None, false);
            let spawns = place_spawn_points(&dungeon.grid, &SpawnConfig { min_distance });

            for row in render_dungeon(&dungeon) {
                println!("{row}");
            }
            println!(
                "size: {}x{}  rooms: {}",
                dungeon.width(),
                dungeon.height(),
                dungeon.rooms.len()
            );
            println!("fingerprint: {:016x}", dungeon.fingerprint());
            println!(
                "connected: {}  reachable: {}/{}  isolated regions: {} (largest {})",
                validation.valid,
                validation.reachable_tiles,
                validation.total_floor_tiles,
                validation.isolated_regions,
                validation.largest_isolated_region
            );
            println!(
                "start: ({}, {})  end: ({}, {})  distance: {}  valid: {}",
                spawns.start.x,
                spawns.start.y,
                spawns.end.x,
                spawns.end.y,
                spawns.distance,
                spawns.valid
            );
        }
        Commands::Templates { templates, show } => {
            let catalog = load_catalog(templates.as_deref())?;
            for template in catalog.templates() {
                println!("{} ({}x{})", template.name, template.width, template.height);
                if show {
                    for row in template.rows() {
                        println!("  {row}");
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn algorithm_names_parse_back() {
        for algorithm in Algorithm::ALL {
            assert_eq!(parse_algorithm(algorithm.name()), Ok(algorithm));
        }
        let err = parse_algorithm("maze").expect_err("unknown name");
        assert!(err.contains("spatial-partition"), "error should list valid names: {err}");
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "dungeon",
            "--verbose",
            "generate",
            "--algorithm",
            "hybrid",
            "--seed",
            "42",
            "--width",
            "60",
        ])
        .expect("flags should parse");
        assert!(cli.verbose);
        let Commands::Generate { algorithm, seed, width, height, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(algorithm, Some(Algorithm::Hybrid));
        assert_eq!(seed, Some(42));
        assert_eq!((width, height), (Some(60), None));
    }
}
