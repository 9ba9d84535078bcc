//! Multi-seed invariant sweep across every generation algorithm.

use std::collections::VecDeque;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::config::MarkerConfig;
use dungeon_core::mapgen::doors::door_is_well_formed;
use dungeon_core::mapgen::{GeneratedLevel, MarkerKind};
use dungeon_core::{
    Algorithm, CellState, DungeonRng, Grid, LevelConfig, TemplateCatalog, generate_level, manhattan,
};
use dungeon_tools::seed::sweep_seed;
use tracing::{Level, debug, info, subscriber};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base seed the per-level seeds are derived from
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Levels generated per algorithm
    #[arg(short, long, default_value_t = 200)]
    levels: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    subscriber::set_global_default(FmtSubscriber::builder().with_max_level(log_level).finish())?;

    info!(seed = args.seed, levels = args.levels, "starting invariant sweep");
    let catalog = TemplateCatalog::builtin();
    for algorithm in Algorithm::ALL {
        let config = LevelConfig::with_algorithm(algorithm);
        let mut invalid_spawns = 0_u64;
        for index in 0..args.levels {
            let seed = sweep_seed(args.seed, index);
            let level = generate_level(&config, &catalog, &mut DungeonRng::new(seed))?;
            if let Err(violation) = check_level(&config, &level) {
                bail!("{} seed={seed}: {violation}", algorithm.name());
            }
            if !level.spawns.valid {
                invalid_spawns += 1;
            }
            debug!(
                algorithm = algorithm.name(),
                seed,
                fingerprint = level.dungeon.fingerprint(),
                "level ok"
            );
        }
        info!(
            algorithm = algorithm.name(),
            levels = args.levels,
            invalid_spawns,
            "algorithm passed"
        );
    }

    println!("Sweep completed successfully.");
    Ok(())
}

fn check_level(config: &LevelConfig, level: &GeneratedLevel) -> Result<(), String> {
    let grid = &level.dungeon.grid;
    if !grid.border_is_solid() {
        return Err("border ring contains non-wall cells".to_string());
    }
    if !level.algorithm.is_structured() && grid.count(CellState::Door) > 0 {
        return Err("unstructured algorithm produced doors".to_string());
    }
    if let Some(pos) = grid
        .positions()
        .find(|&pos| grid.get(pos) == CellState::Door && !door_is_well_formed(grid, pos))
    {
        return Err(format!("door at {pos:?} is not a chokepoint"));
    }
    if let Some(room) = level.dungeon.rooms.iter().find(|room| room.width < 4 || room.height < 4)
    {
        return Err(format!("room {room:?} is smaller than 4x4"));
    }

    let spawns = level.spawns;
    if spawns.valid {
        if manhattan(spawns.start, spawns.end) < config.spawns.min_distance {
            return Err("valid spawns closer than the minimum distance".to_string());
        }
        if grid.get(spawns.start) != CellState::Floor || grid.get(spawns.end) != CellState::Floor {
            return Err("spawn point off the floor".to_string());
        }
    }
    check_markers(config.markers, level, grid)?;

    if config.repair && passable_components(grid) > 1 {
        return Err("repaired level still has isolated floor".to_string());
    }
    if level.validation.reachable_tiles != level.validation.total_floor_tiles && config.repair {
        return Err(format!(
            "validation reports {} of {} tiles reachable",
            level.validation.reachable_tiles, level.validation.total_floor_tiles
        ));
    }
    Ok(())
}

fn check_markers(config: MarkerConfig, level: &GeneratedLevel, grid: &Grid) -> Result<(), String> {
    for marker in &level.markers {
        if grid.get(marker.pos) != CellState::Floor {
            return Err(format!("marker {marker:?} is not on floor"));
        }
        if marker.pos == level.spawns.start || marker.pos == level.spawns.end {
            return Err(format!("marker {marker:?} sits on a spawn point"));
        }
        if marker.kind == MarkerKind::Enemy
            && manhattan(marker.pos, level.spawns.start) <= config.safe_radius
        {
            return Err(format!("enemy {marker:?} inside the safe radius"));
        }
    }
    Ok(())
}

fn passable_components(grid: &Grid) -> usize {
    let mut seen = vec![false; grid.width() * grid.height()];
    let mut components = 0;
    for origin in grid.positions() {
        let index = origin.y as usize * grid.width() + origin.x as usize;
        if seen[index] || !grid.get(origin).is_passable() {
            continue;
        }
        components += 1;
        seen[index] = true;
        let mut open = VecDeque::from([origin]);
        while let Some(pos) = open.pop_front() {
            for next in pos.cardinal_neighbors() {
                if !grid.in_bounds(next) || !grid.get(next).is_passable() {
                    continue;
                }
                let next_index = next.y as usize * grid.width() + next.x as usize;
                if !seen[next_index] {
                    seen[next_index] = true;
                    open.push_back(next);
                }
            }
        }
    }
    components
}
