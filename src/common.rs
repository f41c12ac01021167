//! Common types for the game: coordinates, shot outcomes and board errors.

use core::fmt;

/// A cell position on the board. `x` is the row, `y` is the column.
///
/// Axes are signed so that neighbour offsets can step off the board; such
/// coordinates are rejected by [`crate::Board::out_of_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    // 1-based, matching the console input format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x + 1, self.y + 1)
    }
}

/// Result of a shot that was accepted by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// No ship occupies the cell.
    Miss,
    /// A ship was damaged but is still afloat. The shooter moves again.
    Hit,
    /// The last undamaged cell of a ship was hit.
    Sunk,
}

impl ShotOutcome {
    /// Only a plain hit grants the shooter another shot.
    pub fn repeats_turn(self) -> bool {
        matches!(self, ShotOutcome::Hit)
    }
}

/// Errors returned by [`crate::Board::shot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// Either axis lies outside `[0, size)`.
    OutOfBounds(Coordinate),
    /// The cell was already fired at, or revealed around a destroyed ship.
    AlreadyTargeted(Coordinate),
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfBounds(c) => write!(f, "coordinate ({}) is outside the board", c),
            ShotError::AlreadyTargeted(c) => write!(f, "cell ({}) was already targeted", c),
        }
    }
}

/// Errors returned by [`crate::Board::add_ship`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipPlacementError {
    /// A ship cell lies outside the board.
    OutOfBounds(Coordinate),
    /// A ship cell is occupied or touches another ship.
    Overlaps(Coordinate),
}

impl fmt::Display for ShipPlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipPlacementError::OutOfBounds(c) => {
                write!(f, "ship cell ({}) is outside the board", c)
            }
            ShipPlacementError::Overlaps(c) => {
                write!(f, "ship cell ({}) overlaps or touches another ship", c)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShotError {}

#[cfg(feature = "std")]
impl std::error::Error for ShipPlacementError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hit_repeats() {
        assert!(ShotOutcome::Hit.repeats_turn());
        assert!(!ShotOutcome::Sunk.repeats_turn());
        assert!(!ShotOutcome::Miss.repeats_turn());
    }

    #[test]
    fn display_is_one_based() {
        let c = Coordinate::new(0, 4);
        assert_eq!(format!("{}", c), "1 5");
        assert_eq!(c.offset(-1, 1), Coordinate::new(-1, 5));
    }
}
