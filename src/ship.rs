//! Ship geometry and damage tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Cells extend along the `x` axis.
    Horizontal,
    /// Cells extend along the `y` axis.
    Vertical,
}

impl Orientation {
    /// Unit step from one ship cell to the next.
    pub fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A straight ship anchored at its bow.
///
/// The ship is a plain value: it does not know the board it sits on, so it
/// never checks bounds. Its cells are always derived from
/// `(bow, length, orientation)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    bow: Coordinate,
    length: usize,
    orientation: Orientation,
    remaining_hits: usize,
}

impl Ship {
    /// Create an undamaged ship. A `length` of zero is treated as one.
    pub fn new(bow: Coordinate, length: usize, orientation: Orientation) -> Self {
        let length = length.max(1);
        Ship {
            bow,
            length,
            orientation,
            remaining_hits: length,
        }
    }

    pub fn bow(&self) -> Coordinate {
        self.bow
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Undamaged cells left.
    pub fn remaining_hits(&self) -> usize {
        self.remaining_hits
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.remaining_hits == 0
    }

    /// Iterator over the occupied cells, starting at the bow.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let (dx, dy) = self.orientation.step();
        (0..self.length as i32).map(move |i| self.bow.offset(dx * i, dy * i))
    }

    /// The `length` cells of the ship in bow-to-stern order.
    pub fn occupied_cells(&self) -> Vec<Coordinate> {
        self.cells().collect()
    }

    /// Returns `true` if `c` is one of the ship's cells.
    pub fn is_hit_by(&self, c: Coordinate) -> bool {
        let (dx, dy) = self.orientation.step();
        let (ox, oy) = (c.x - self.bow.x, c.y - self.bow.y);
        let along = ox * dx + oy * dy;
        let across = ox * dy + oy * dx;
        across == 0 && along >= 0 && (along as usize) < self.length
    }

    /// Record one hit. Saturates at zero.
    pub(crate) fn register_hit(&mut self) {
        self.remaining_hits = self.remaining_hits.saturating_sub(1);
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ bow: ({}, {}), length: {}, orientation: {:?}, remaining_hits: {} }}",
            self.bow.x, self.bow.y, self.length, self.orientation, self.remaining_hits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_cells_follow_x() {
        let ship = Ship::new(Coordinate::new(1, 2), 3, Orientation::Horizontal);
        assert_eq!(
            ship.occupied_cells(),
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(2, 2),
                Coordinate::new(3, 2)
            ]
        );
    }

    #[test]
    fn hit_test_matches_cells() {
        let ship = Ship::new(Coordinate::new(2, 2), 3, Orientation::Vertical);
        for c in ship.occupied_cells() {
            assert!(ship.is_hit_by(c));
        }
        assert!(!ship.is_hit_by(Coordinate::new(2, 1)));
        assert!(!ship.is_hit_by(Coordinate::new(2, 5)));
        assert!(!ship.is_hit_by(Coordinate::new(3, 3)));
    }

    #[test]
    fn hits_saturate() {
        let mut ship = Ship::new(Coordinate::new(0, 0), 1, Orientation::Vertical);
        assert!(!ship.is_sunk());
        ship.register_hit();
        ship.register_hit();
        assert_eq!(ship.remaining_hits(), 0);
        assert!(ship.is_sunk());
    }
}
