use rand::{rngs::SmallRng, SeedableRng};
use sea_battle::{random_board, Game, GameConfig, Side, Silent, TargetingStrategy};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    sea_battle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Usage: {} <seed1> <seed2> [size]", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let mut config = GameConfig::default();
    if let Some(size) = args.get(3) {
        config.size = size.parse()?;
    }
    config.validate()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let b1 = random_board(&mut rng1, &config)?;
    let b2 = random_board(&mut rng2, &config)?;
    let mut game = Game::new(
        (b1, TargetingStrategy::automated()),
        (b2, TargetingStrategy::automated()),
    );

    let winner = game.run(&mut rng1, &mut Silent)?;

    let side_name = |side: Side| match side {
        Side::First => "player1",
        Side::Second => "player2",
    };
    let result = json!({
        "player1": {
            "shots": game.shots_fired(Side::First),
            "ships_lost": game.board(Side::First).destroyed_count(),
        },
        "player2": {
            "shots": game.shots_fired(Side::Second),
            "ships_lost": game.board(Side::Second).destroyed_count(),
        },
        "winner": side_name(winner),
        "turns": game.turns(),
        "size": config.size,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
