use alloc::boxed::Box;
use alloc::collections::VecDeque;
use rand::Rng;

use crate::{
    ai,
    board::TargetView,
    common::{Coordinate, ShotError},
};

/// Supplier of coordinates typed by a person (or scripted in their place).
pub trait TargetSource {
    /// Next coordinate to fire at, or `None` once input is exhausted.
    /// Malformed input is handled inside the source by asking again.
    fn next_target(&mut self) -> Option<Coordinate>;

    /// The last coordinate was refused by the board; it did not cost a turn.
    fn rejected(&mut self, _coord: Coordinate, _error: ShotError) {}
}

/// How a side chooses where to shoot.
pub enum TargetingStrategy {
    /// Coordinates come from outside the game.
    Human(Box<dyn TargetSource>),
    /// Hunt/target search over the opponent's public state.
    Automated,
}

impl TargetingStrategy {
    pub fn human<S: TargetSource + 'static>(source: S) -> Self {
        TargetingStrategy::Human(Box::new(source))
    }

    pub fn automated() -> Self {
        TargetingStrategy::Automated
    }

    pub fn is_automated(&self) -> bool {
        matches!(self, TargetingStrategy::Automated)
    }

    /// Request the next coordinate. The strategy sees only the opponent's
    /// busy cells and unresolved hits, never its ships.
    pub fn next_target<R: Rng + ?Sized>(
        &mut self,
        opponent: &TargetView<'_>,
        rng: &mut R,
    ) -> Option<Coordinate> {
        match self {
            TargetingStrategy::Human(source) => source.next_target(),
            TargetingStrategy::Automated => ai::select_target(opponent, rng),
        }
    }

    /// Report a refused coordinate back to a human source.
    pub fn rejected(&mut self, coord: Coordinate, error: ShotError) {
        if let TargetingStrategy::Human(source) = self {
            source.rejected(coord, error);
        }
    }
}

/// A [`TargetSource`] replaying a fixed list of coordinates.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    queue: VecDeque<Coordinate>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Coordinate>>(coords: I) -> Self {
        Self {
            queue: coords.into_iter().collect(),
        }
    }
}

impl TargetSource for ScriptedSource {
    fn next_target(&mut self) -> Option<Coordinate> {
        self.queue.pop_front()
    }
}
