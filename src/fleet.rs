//! Random fleet placement.

use core::fmt;
use log::{debug, info};
use rand::Rng;

use crate::board::Board;
use crate::config::GameConfig;
use crate::common::Coordinate;
use crate::ship::{Orientation, Ship};

/// Fleet generation gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    /// A single board ran out of placement attempts.
    AttemptBudgetExhausted { attempts: usize },
    /// Every fresh board ran out of attempts.
    RestartsExhausted { restarts: usize },
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::AttemptBudgetExhausted { attempts } => {
                write!(f, "fleet placement failed after {} attempts", attempts)
            }
            FleetError::RestartsExhausted { restarts } => {
                write!(f, "no board could be generated in {} restarts", restarts)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FleetError {}

/// A uniformly random ship of `length` with its bow on the board.
pub fn random_ship<R: Rng + ?Sized>(rng: &mut R, size: usize, length: usize) -> Ship {
    let bow = Coordinate::new(
        rng.random_range(0..size as i32),
        rng.random_range(0..size as i32),
    );
    let orientation = if rng.random() {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    Ship::new(bow, length, orientation)
}

/// Make one attempt at placing the whole fleet on a fresh board.
///
/// Each ship is retried at random positions until it fits. The attempt
/// counter is shared by the whole fleet; once it passes
/// `config.attempt_budget` the board is abandoned. On success the board has
/// been reset for play.
pub fn generate_board<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
) -> Result<Board, FleetError> {
    let mut board = Board::new(config.size);
    if config.size == 0 {
        return Err(FleetError::AttemptBudgetExhausted { attempts: 0 });
    }
    let mut attempts = 0usize;
    for &length in &config.ship_lengths {
        loop {
            attempts += 1;
            if attempts > config.attempt_budget {
                debug!("fleet generation starved after {} attempts", attempts - 1);
                return Err(FleetError::AttemptBudgetExhausted {
                    attempts: attempts - 1,
                });
            }
            if board.add_ship(random_ship(rng, config.size, length)).is_ok() {
                break;
            }
        }
    }
    board.reset_for_play();
    debug!("fleet placed in {} attempts", attempts);
    Ok(board)
}

/// Generate boards from scratch until one succeeds, giving up after
/// `config.max_board_restarts` fresh boards.
pub fn random_board<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
) -> Result<Board, FleetError> {
    let restarts = config.max_board_restarts.max(1);
    for attempt in 1..=restarts {
        match generate_board(rng, config) {
            Ok(board) => {
                info!("generated {}x{} board on try {}", config.size, config.size, attempt);
                return Ok(board);
            }
            Err(FleetError::AttemptBudgetExhausted { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(FleetError::RestartsExhausted { restarts })
}
