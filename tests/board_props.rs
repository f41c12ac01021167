use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use sea_battle::{
    random_board, random_ship, Board, Coordinate, GameConfig, ShotError, ShotOutcome,
};

fn touching(a: Coordinate, b: Coordinate) -> bool {
    (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1
}

fn generated(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    random_board(&mut rng, &GameConfig::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placed_ships_never_touch(seed in any::<u64>(), tries in 1usize..60) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(8);
        for _ in 0..tries {
            let length = rng.random_range(1..=4);
            let _ = board.add_ship(random_ship(&mut rng, 8, length));
        }
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            for cell in a.cells() {
                prop_assert!(!board.out_of_bounds(cell));
            }
            for b in &ships[i + 1..] {
                for ca in a.cells() {
                    for cb in b.cells() {
                        prop_assert!(!touching(ca, cb), "{:?} touches {:?}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn repeated_shot_is_rejected_without_effect(seed in any::<u64>(), x in 0i32..6, y in 0i32..6) {
        let mut board = generated(seed);
        let target = Coordinate::new(x, y);
        board.shot(target).unwrap();
        let busy = board.busy().clone();
        let chain = board.last_hit_chain().to_vec();
        let ships = board.ships().to_vec();
        let cell = board.cell(target);

        prop_assert_eq!(board.shot(target), Err(ShotError::AlreadyTargeted(target)));
        prop_assert_eq!(board.busy(), &busy);
        prop_assert_eq!(board.last_hit_chain(), &chain[..]);
        prop_assert_eq!(board.ships(), &ships[..]);
        prop_assert_eq!(board.cell(target), cell);
    }

    #[test]
    fn hits_wear_ships_down_one_at_a_time(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = generated(seed);
        let total: usize = board.ships().iter().map(|s| s.remaining_hits()).sum();
        let mut hits = 0;
        for _ in 0..80 {
            let target = Coordinate::new(rng.random_range(0..6), rng.random_range(0..6));
            let before: Vec<usize> = board.ships().iter().map(|s| s.remaining_hits()).collect();
            let Ok(outcome) = board.shot(target) else { continue };
            let after: Vec<usize> = board.ships().iter().map(|s| s.remaining_hits()).collect();
            let drops: usize = before.iter().zip(&after).map(|(b, a)| b - a).sum();
            match outcome {
                ShotOutcome::Miss => prop_assert_eq!(drops, 0),
                ShotOutcome::Hit | ShotOutcome::Sunk => {
                    prop_assert_eq!(drops, 1);
                    hits += 1;
                }
            }
            let sunk = board.ships().iter().filter(|s| s.is_sunk()).count();
            prop_assert_eq!(board.destroyed_count(), sunk);
            prop_assert_eq!(board.defeated(), sunk == board.ships().len());
        }
        let left: usize = board.ships().iter().map(|s| s.remaining_hits()).sum();
        prop_assert_eq!(left + hits, total);
    }
}
