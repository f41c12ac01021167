use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sea_battle::{
    greeting, init_logging, ConsoleObserver, ConsoleSource, Game, GameConfig, Side,
    TargetingStrategy, INTERACTIVE_AI_DELAY_MS,
};

/// Sea battle against the computer on a small square board.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON file with game settings")]
    config: Option<PathBuf>,
    #[arg(long, help = "Board side length")]
    size: Option<usize>,
    #[arg(long, value_delimiter = ',', help = "Ship lengths, e.g. 3,2,2,1,1,1,1")]
    ships: Option<Vec<usize>>,
    #[arg(long, help = "Pause before each computer shot, in milliseconds")]
    delay_ms: Option<u64>,
    #[arg(long, help = "Disable the pause before computer shots")]
    no_delay: bool,
}

impl Cli {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(ships) = &self.ships {
            config.ship_lengths = ships.clone();
        }
        if let Some(ms) = self.delay_ms {
            config.ai_delay_ms = Some(ms);
        }
        if self.no_delay {
            config.ai_delay_ms = Some(0);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.game_config()?;

    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = if let Some(s) = cli.seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut game = Game::from_config(
        &mut rng,
        &config,
        TargetingStrategy::human(ConsoleSource::stdio()),
        TargetingStrategy::automated(),
    )?;

    println!("{}", greeting(config.size));
    let delay = Duration::from_millis(config.ai_delay_ms_or(INTERACTIVE_AI_DELAY_MS));
    let mut observer = ConsoleObserver::new(Side::First, delay);
    game.run(&mut rng, &mut observer)?;
    Ok(())
}
