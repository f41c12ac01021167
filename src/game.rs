//! Turn loop for two sides, each owning a board and a targeting strategy.

use core::fmt;
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    board::Board,
    common::{Coordinate, ShotError, ShotOutcome},
    config::GameConfig,
    fleet::{random_board, FleetError},
    player::TargetingStrategy,
};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// An accepted shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub shooter: Side,
    pub target: Coordinate,
    pub outcome: ShotOutcome,
}

/// Errors that end a game early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A human source ran out of input.
    InputClosed(Side),
    /// The automated strategy picked a coordinate the board refused.
    StrategyDefect(Side, ShotError),
    /// The strategy found no open cell to fire at.
    NoTargetAvailable(Side),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InputClosed(side) => write!(f, "{:?} side closed its input", side),
            GameError::StrategyDefect(side, e) => {
                write!(f, "automated {:?} side chose an invalid target: {}", side, e)
            }
            GameError::NoTargetAvailable(side) => {
                write!(f, "{:?} side has no cell left to target", side)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Hooks for presentation. Every method defaults to doing nothing.
pub trait GameObserver {
    /// Called before each shot is requested.
    fn on_turn(&mut self, _game: &Game) {}

    /// Called before an automated side picks its target.
    fn before_automated_shot(&mut self, _side: Side) {}

    fn on_shot(&mut self, _game: &Game, _report: &ShotReport) {}

    fn on_rejected(&mut self, _side: Side, _coord: Coordinate, _error: ShotError) {}

    fn on_game_over(&mut self, _game: &Game, _winner: Side) {}
}

/// Observer that ignores every event.
pub struct Silent;

impl GameObserver for Silent {}

struct Seat {
    board: Board,
    strategy: TargetingStrategy,
    shots: usize,
}

/// A game in progress.
pub struct Game {
    seats: [Seat; 2],
    to_move: Side,
    turns: usize,
}

impl Game {
    /// Start a game from two populated boards. `Side::First` moves first.
    pub fn new(
        first: (Board, TargetingStrategy),
        second: (Board, TargetingStrategy),
    ) -> Self {
        let seat = |(board, strategy): (Board, TargetingStrategy)| Seat {
            board,
            strategy,
            shots: 0,
        };
        Game {
            seats: [seat(first), seat(second)],
            to_move: Side::First,
            turns: 0,
        }
    }

    /// Generate a random board for each side and start a game.
    pub fn from_config<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        first: TargetingStrategy,
        second: TargetingStrategy,
    ) -> Result<Self, FleetError> {
        let first_board = random_board(rng, config)?;
        let second_board = random_board(rng, config)?;
        Ok(Self::new((first_board, first), (second_board, second)))
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// The board owned by `side`.
    pub fn board(&self, side: Side) -> &Board {
        &self.seats[side.index()].board
    }

    /// True if `side` is played by the automated strategy.
    pub fn is_automated(&self, side: Side) -> bool {
        self.seats[side.index()].strategy.is_automated()
    }

    /// Accepted shots fired by `side`.
    pub fn shots_fired(&self, side: Side) -> usize {
        self.seats[side.index()].shots
    }

    /// Completed turns: how many times the move has passed to the other
    /// side. A run of hits by one side counts once.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// The side whose opponent has lost every ship, if any.
    pub fn winner(&self) -> Option<Side> {
        if self.board(Side::Second).defeated() {
            Some(Side::First)
        } else if self.board(Side::First).defeated() {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Resolve one accepted shot by the side to move.
    ///
    /// Refused human coordinates are reported back to the source and asked
    /// again without passing the turn. The turn passes unless the shot was
    /// a plain hit.
    pub fn play_shot<R: Rng + ?Sized, O: GameObserver + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<ShotReport, GameError> {
        let shooter = self.to_move;
        let [first, second] = &mut self.seats;
        let (own, opponent) = match shooter {
            Side::First => (first, second),
            Side::Second => (second, first),
        };

        let (target, outcome) = loop {
            if own.strategy.is_automated() {
                observer.before_automated_shot(shooter);
            }
            let target = own
                .strategy
                .next_target(&opponent.board.target_view(), rng)
                .ok_or(if own.strategy.is_automated() {
                    GameError::NoTargetAvailable(shooter)
                } else {
                    GameError::InputClosed(shooter)
                })?;
            match opponent.board.shot(target) {
                Ok(outcome) => break (target, outcome),
                Err(e) if own.strategy.is_automated() => {
                    return Err(GameError::StrategyDefect(shooter, e));
                }
                Err(e) => {
                    warn!("{:?} side: {}", shooter, e);
                    own.strategy.rejected(target, e);
                    observer.on_rejected(shooter, target, e);
                }
            }
        };
        own.shots += 1;

        if !outcome.repeats_turn() {
            self.to_move = shooter.opponent();
            self.turns += 1;
        }
        let report = ShotReport {
            shooter,
            target,
            outcome,
        };
        debug!("{:?}", report);
        observer.on_shot(self, &report);
        Ok(report)
    }

    /// Play until one fleet is destroyed and return the winner.
    pub fn run<R: Rng + ?Sized, O: GameObserver + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<Side, GameError> {
        loop {
            if let Some(winner) = self.winner() {
                info!(
                    "{:?} side wins after {} shots",
                    winner,
                    self.shots_fired(winner)
                );
                observer.on_game_over(self, winner);
                return Ok(winner);
            }
            observer.on_turn(self);
            self.play_shot(rng, observer)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ScriptedSource;
    use crate::ship::{Orientation, Ship};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn board_with(ships: &[Ship]) -> Board {
        let mut board = Board::new(6);
        for ship in ships {
            board.add_ship(*ship).unwrap();
        }
        board.reset_for_play();
        board
    }

    #[derive(Default)]
    struct Recorder {
        rejected: Vec<(Coordinate, ShotError)>,
        shots: Vec<ShotReport>,
    }

    impl GameObserver for Recorder {
        fn on_shot(&mut self, _game: &Game, report: &ShotReport) {
            self.shots.push(*report);
        }

        fn on_rejected(&mut self, _side: Side, coord: Coordinate, error: ShotError) {
            self.rejected.push((coord, error));
        }
    }

    #[test]
    fn hit_repeats_and_sunk_passes() {
        let second = board_with(&[
            Ship::new(c(0, 0), 2, Orientation::Vertical),
            Ship::new(c(4, 4), 1, Orientation::Vertical),
        ]);
        let first = board_with(&[Ship::new(c(5, 0), 1, Orientation::Vertical)]);
        let mut game = Game::new(
            (
                first,
                TargetingStrategy::human(ScriptedSource::new([c(0, 0), c(0, 1)])),
            ),
            (second, TargetingStrategy::automated()),
        );
        let mut rng = SmallRng::seed_from_u64(1);
        let mut obs = Recorder::default();

        let r = game.play_shot(&mut rng, &mut obs).unwrap();
        assert_eq!(r.outcome, ShotOutcome::Hit);
        assert_eq!(game.to_move(), Side::First);
        assert_eq!(game.turns(), 0);

        let r = game.play_shot(&mut rng, &mut obs).unwrap();
        assert_eq!(r.outcome, ShotOutcome::Sunk);
        assert_eq!(game.to_move(), Side::Second);
        assert_eq!(game.turns(), 1);
        assert_eq!(game.shots_fired(Side::First), 2);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn refused_coordinates_do_not_pass_turn() {
        let second = board_with(&[Ship::new(c(3, 3), 1, Orientation::Vertical)]);
        let first = board_with(&[Ship::new(c(0, 0), 1, Orientation::Vertical)]);
        let mut game = Game::new(
            (
                first,
                TargetingStrategy::human(ScriptedSource::new([
                    c(6, 0),
                    c(1, 1),
                    c(1, 1),
                    c(3, 3),
                ])),
            ),
            (second, TargetingStrategy::automated()),
        );
        let mut rng = SmallRng::seed_from_u64(2);
        let mut obs = Recorder::default();

        let r = game.play_shot(&mut rng, &mut obs).unwrap();
        assert_eq!(r.target, c(1, 1));
        assert_eq!(r.outcome, ShotOutcome::Miss);
        assert_eq!(obs.rejected, vec![(c(6, 0), ShotError::OutOfBounds(c(6, 0)))]);

        // automated side misses or hits, then control returns
        while game.to_move() == Side::Second {
            game.play_shot(&mut rng, &mut obs).unwrap();
            if game.winner().is_some() {
                return;
            }
        }
        let r = game.play_shot(&mut rng, &mut obs).unwrap();
        assert_eq!(r.target, c(3, 3));
        assert_eq!(
            obs.rejected.last(),
            Some(&(c(1, 1), ShotError::AlreadyTargeted(c(1, 1))))
        );
        assert_eq!(game.winner(), Some(Side::First));
        assert_eq!(game.shots_fired(Side::First), 2);
    }

    #[test]
    fn closed_input_ends_game() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = GameConfig::default();
        let mut game = Game::from_config(
            &mut rng,
            &config,
            TargetingStrategy::human(ScriptedSource::new([])),
            TargetingStrategy::automated(),
        )
        .unwrap();
        assert_eq!(
            game.run(&mut rng, &mut Silent),
            Err(GameError::InputClosed(Side::First))
        );
    }

    #[test]
    fn automated_game_finishes() {
        let mut rng = SmallRng::seed_from_u64(4);
        let config = GameConfig::default();
        let mut game = Game::from_config(
            &mut rng,
            &config,
            TargetingStrategy::automated(),
            TargetingStrategy::automated(),
        )
        .unwrap();
        let winner = game.run(&mut rng, &mut Silent).unwrap();
        assert!(game.board(winner.opponent()).defeated());
        assert!(!game.board(winner).defeated());
        assert!(game.shots_fired(winner) <= 36);
        let total = game.shots_fired(Side::First) + game.shots_fired(Side::Second);
        assert!(game.turns() >= 1 && game.turns() <= total);
    }
}
