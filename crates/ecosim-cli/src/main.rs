//! `ecosim` - run a grid-world organism simulation from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout)]

mod render;
mod session;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use ecosim_core::{Direction, SimulationConfig};
use ecosim_world::World;
use std::path::PathBuf;
use tracing::{info, warn};

/// Ecosim - a deterministic predator/prey/plant simulation
#[derive(Parser, Debug)]
#[command(name = "ecosim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (default: built-in config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of turns to run
    #[arg(short, long)]
    turns: Option<u64>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Only the human acts
    #[arg(long)]
    no_ai: bool,

    /// Disable breeding and plant spreading
    #[arg(long)]
    no_breeding: bool,

    /// Print the grid after every turn
    #[arg(short, long)]
    grid: bool,

    /// Human moves, one per turn, comma separated (e.g. `r,r,up,left`)
    #[arg(short, long, value_delimiter = ',')]
    moves: Vec<Direction>,

    /// Turns of this run (from 1) on which the human arms immortality
    #[arg(long, value_delimiter = ',')]
    immortal_at: Vec<u64>,

    /// Resume from a snapshot instead of populating a new world
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save a snapshot when done (`.json` for JSON, anything else for binary)
    #[arg(long)]
    save: Option<PathBuf>,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => session::load_config(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(turns) = self.turns {
            config.num_turns = turns;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if self.no_ai {
            config.rules.ai_acts = false;
        }
        if self.no_breeding {
            config.rules.ai_reproduces = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Queue the scripted human commands for turn `step` (from 0) of this run
    fn steer_human(&self, world: &mut World, step: u64) {
        if let Some(&direction) = self.moves.get(step as usize) {
            if !world.command_human(direction) {
                warn!(step, %direction, "No human to move");
            }
        }
        if self.immortal_at.contains(&(step + 1)) && !world.arm_immortality() {
            warn!(step, "Immortality unavailable");
        }
    }
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();
    let config = args.simulation_config()?;

    let mut world = match &args.load {
        Some(path) => session::load_world(path)?,
        None => World::from_config(&config)?,
    };
    info!(
        width = world.width(),
        height = world.height(),
        organisms = world.organism_count(),
        turns = config.num_turns,
        "Starting simulation"
    );

    if args.grid {
        print!("{}", render::render_grid(&world));
    }

    for step in 0..config.num_turns {
        args.steer_human(&mut world, step);
        world.simulate(&config.rules);

        println!("Turn {}", world.time());
        for line in world.logs() {
            println!("  {line}");
        }
        if args.grid {
            print!("{}", render::render_grid(&world));
        }
    }

    println!("{}", render::summary(&world));

    if let Some(path) = &args.save {
        session::save_world(&world, path)?;
        info!(path = %path.display(), "Snapshot saved");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::{Kind, Position, TileId};
    use ecosim_world::Organism;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "ecosim",
            "--turns",
            "7",
            "--seed",
            "3",
            "--width",
            "9",
            "--height",
            "4",
            "--no-ai",
            "--no-breeding",
        ])
        .unwrap();
        let config = args.simulation_config().unwrap();

        assert_eq!(config.num_turns, 7);
        assert_eq!(config.seed, 3);
        assert_eq!((config.world.width, config.world.height), (9, 4));
        assert!(!config.rules.ai_acts);
        assert!(!config.rules.ai_reproduces);
    }

    #[test]
    fn test_scripted_moves_steer_the_human() {
        let args = Args::try_parse_from([
            "ecosim",
            "--no-ai",
            "--moves",
            "r,down,l",
            "--immortal-at",
            "2",
        ])
        .unwrap();
        assert_eq!(args.moves, vec![Direction::Right, Direction::Down, Direction::Left]);
        let rules = args.simulation_config().unwrap().rules;

        let mut world = World::new(3, 3, 0);
        let human = world
            .add_organism(Organism::new(Kind::Human), TileId(0))
            .unwrap();

        for step in 0..2 {
            args.steer_human(&mut world, step);
            world.simulate(&rules);
        }
        let organism = world.organism(human).unwrap();
        assert_eq!(world.grid().position_of(organism.tile), Position::new(1, 1));
        assert!(organism.is_immortal());

        args.steer_human(&mut world, 2);
        world.simulate(&rules);
        let organism = world.organism(human).unwrap();
        assert_eq!(world.grid().position_of(organism.tile), Position::new(0, 1));
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        assert!(Args::try_parse_from(["ecosim", "--moves", "up,sideways"]).is_err());
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let args = Args::try_parse_from(["ecosim", "--width", "0"]).unwrap();
        assert!(args.simulation_config().is_err());
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::try_parse_from(["ecosim"]).unwrap();
        assert_eq!(args.simulation_config().unwrap(), SimulationConfig::default());
    }
}
