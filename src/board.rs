//! Game board: ship placement, shot resolution and defeat detection.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};

use crate::bitboard::BitBoard;
use crate::common::{Coordinate, ShipPlacementError, ShotError, ShotOutcome};
use crate::ship::Ship;

/// Visible state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship,
    Miss,
    Hit,
    /// Part of a destroyed ship.
    Sunk,
    /// Empty cell revealed around a destroyed ship.
    Contour,
}

/// One side's board.
///
/// During generation the busy set doubles as the no-go zone around placed
/// ships. [`Board::reset_for_play`] clears it; afterwards it only grows
/// through [`Board::shot`].
#[derive(Clone)]
pub struct Board {
    size: usize,
    grid: Vec<Cell>,
    busy: BitBoard,
    ships: Vec<Ship>,
    destroyed_count: usize,
    last_hit_chain: Vec<Coordinate>,
}

impl Board {
    /// Create an empty `size×size` board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            grid: vec![Cell::Empty; size * size],
            busy: BitBoard::new(size),
            ships: Vec::new(),
            destroyed_count: 0,
            last_hit_chain: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order. Destroyed ships stay in the list.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed_count
    }

    /// Hits on the ship currently being damaged, in shot order.
    pub fn last_hit_chain(&self) -> &[Coordinate] {
        &self.last_hit_chain
    }

    pub fn busy(&self) -> &BitBoard {
        &self.busy
    }

    /// True if either axis of `c` falls outside `[0, size)`.
    pub fn out_of_bounds(&self, c: Coordinate) -> bool {
        let n = self.size as i32;
        !(0..n).contains(&c.x) || !(0..n).contains(&c.y)
    }

    /// True if `c` may no longer be targeted or built on.
    /// Out-of-bounds coordinates are never busy.
    pub fn is_busy(&self, c: Coordinate) -> bool {
        !self.out_of_bounds(c) && self.busy.get(c.x as usize, c.y as usize).unwrap_or(false)
    }

    /// Visible state of `c`, or `None` when it is off the board.
    pub fn cell(&self, c: Coordinate) -> Option<Cell> {
        self.index(c).map(|i| self.grid[i])
    }

    fn index(&self, c: Coordinate) -> Option<usize> {
        if self.out_of_bounds(c) {
            None
        } else {
            Some(c.x as usize * self.size + c.y as usize)
        }
    }

    fn set_cell(&mut self, c: Coordinate, cell: Cell) {
        if let Some(i) = self.index(c) {
            self.grid[i] = cell;
        }
    }

    fn mark_busy(&mut self, c: Coordinate) -> bool {
        if self.out_of_bounds(c) {
            return false;
        }
        self.busy.set(c.x as usize, c.y as usize).unwrap_or(false)
    }

    /// In-bounds cells within one step (including diagonals) of the ship.
    fn halo(&self, ship: &Ship) -> Vec<Coordinate> {
        let mut cells = Vec::new();
        for cell in ship.cells() {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let c = cell.offset(dx, dy);
                    if !self.out_of_bounds(c) && !ship.is_hit_by(c) && !cells.contains(&c) {
                        cells.push(c);
                    }
                }
            }
        }
        cells
    }

    /// Place a ship. Fails without touching the board if any of its cells
    /// is off the board or busy (occupied or next to another ship).
    pub fn add_ship(&mut self, ship: Ship) -> Result<(), ShipPlacementError> {
        for c in ship.cells() {
            if self.out_of_bounds(c) {
                trace!("placement rejected at {:?}: out of bounds", c);
                return Err(ShipPlacementError::OutOfBounds(c));
            }
            if self.is_busy(c) {
                trace!("placement rejected at {:?}: busy", c);
                return Err(ShipPlacementError::Overlaps(c));
            }
        }
        for c in ship.cells() {
            self.set_cell(c, Cell::Ship);
            self.mark_busy(c);
        }
        // Reserve the contour without showing it.
        for c in self.halo(&ship) {
            self.mark_busy(c);
        }
        debug!("placed {:?}", ship);
        self.ships.push(ship);
        Ok(())
    }

    /// Drop the placement reservations before play starts. Ships and the
    /// grid are left as they are.
    pub fn reset_for_play(&mut self) {
        self.busy.clear_all();
    }

    /// Fire at `c`.
    ///
    /// A rejected shot leaves the board unchanged.
    pub fn shot(&mut self, c: Coordinate) -> Result<ShotOutcome, ShotError> {
        if self.out_of_bounds(c) {
            return Err(ShotError::OutOfBounds(c));
        }
        if self.is_busy(c) {
            return Err(ShotError::AlreadyTargeted(c));
        }
        self.mark_busy(c);

        let Some(idx) = self.ships.iter().position(|s| s.is_hit_by(c)) else {
            self.set_cell(c, Cell::Miss);
            debug!("shot at {:?}: miss", c);
            return Ok(ShotOutcome::Miss);
        };

        self.ships[idx].register_hit();
        let ship = self.ships[idx];
        if !ship.is_sunk() {
            self.set_cell(c, Cell::Hit);
            self.last_hit_chain.push(c);
            debug!("shot at {:?}: hit, chain {:?}", c, self.last_hit_chain);
            return Ok(ShotOutcome::Hit);
        }

        self.destroyed_count += 1;
        for cell in ship.cells() {
            self.set_cell(cell, Cell::Sunk);
        }
        for h in self.halo(&ship) {
            if self.mark_busy(h) && self.cell(h) == Some(Cell::Empty) {
                self.set_cell(h, Cell::Contour);
            }
        }
        self.last_hit_chain.clear();
        debug!(
            "shot at {:?}: sunk ({} of {} destroyed)",
            c,
            self.destroyed_count,
            self.ships.len()
        );
        Ok(ShotOutcome::Sunk)
    }

    /// All ships destroyed.
    pub fn defeated(&self) -> bool {
        self.destroyed_count == self.ships.len()
    }

    /// The public information an opponent may use to aim.
    pub fn target_view(&self) -> TargetView<'_> {
        TargetView {
            size: self.size,
            busy: &self.busy,
            last_hit_chain: &self.last_hit_chain,
        }
    }

    /// Read-only projection for renderers. With `hide_ships` set, undamaged
    /// ship cells read as empty.
    pub fn view(&self, hide_ships: bool) -> BoardView<'_> {
        BoardView {
            board: self,
            hide_ships,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  busy: {:?},\n  ships: {:?},\n  destroyed: {},\n  last_hit_chain: {:?}\n}}",
            self.size, self.busy, self.ships, self.destroyed_count, self.last_hit_chain
        )
    }
}

/// What the shooter knows about the opponent's board: the board size, the
/// cells that can no longer be targeted and the unresolved hits.
#[derive(Clone, Copy)]
pub struct TargetView<'a> {
    size: usize,
    busy: &'a BitBoard,
    last_hit_chain: &'a [Coordinate],
}

impl<'a> TargetView<'a> {
    pub fn new(size: usize, busy: &'a BitBoard, last_hit_chain: &'a [Coordinate]) -> Self {
        TargetView {
            size,
            busy,
            last_hit_chain,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn last_hit_chain(&self) -> &'a [Coordinate] {
        self.last_hit_chain
    }

    pub fn out_of_bounds(&self, c: Coordinate) -> bool {
        let n = self.size as i32;
        !(0..n).contains(&c.x) || !(0..n).contains(&c.y)
    }

    pub fn is_busy(&self, c: Coordinate) -> bool {
        !self.out_of_bounds(c) && self.busy.get(c.x as usize, c.y as usize).unwrap_or(false)
    }

    /// In bounds and not yet busy.
    pub fn is_open(&self, c: Coordinate) -> bool {
        !self.out_of_bounds(c) && !self.is_busy(c)
    }
}

/// Read-only projection of a board for display.
#[derive(Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    hide_ships: bool,
}

impl BoardView<'_> {
    pub fn size(&self) -> usize {
        self.board.size
    }

    /// Cell at row `x`, column `y` as it should be shown.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        match self.board.cell(Coordinate::new(x as i32, y as i32)) {
            Some(Cell::Ship) if self.hide_ships => Cell::Empty,
            Some(cell) => cell,
            None => Cell::Empty,
        }
    }

    pub fn ships_left(&self) -> usize {
        self.board.ships.len() - self.board.destroyed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::Orientation;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn halo_is_reserved_but_hidden() {
        let mut board = Board::new(6);
        board
            .add_ship(Ship::new(c(2, 2), 2, Orientation::Horizontal))
            .unwrap();
        assert!(board.is_busy(c(1, 1)));
        assert!(board.is_busy(c(4, 3)));
        assert!(!board.is_busy(c(5, 2)));
        assert_eq!(board.cell(c(1, 1)), Some(Cell::Empty));
        assert_eq!(board.busy().count_ones(), 12);
    }

    #[test]
    fn touching_ship_is_rejected() {
        let mut board = Board::new(6);
        board
            .add_ship(Ship::new(c(0, 0), 2, Orientation::Vertical))
            .unwrap();
        let err = board
            .add_ship(Ship::new(c(1, 2), 1, Orientation::Vertical))
            .unwrap_err();
        assert_eq!(err, ShipPlacementError::Overlaps(c(1, 2)));
        assert_eq!(board.ships().len(), 1);
    }

    #[test]
    fn sinking_reveals_contour() {
        let mut board = Board::new(6);
        board
            .add_ship(Ship::new(c(0, 0), 1, Orientation::Vertical))
            .unwrap();
        board.reset_for_play();
        assert!(board.busy().is_empty());
        assert_eq!(board.shot(c(0, 0)), Ok(ShotOutcome::Sunk));
        for h in [c(0, 1), c(1, 0), c(1, 1)] {
            assert_eq!(board.cell(h), Some(Cell::Contour));
            assert_eq!(board.shot(h), Err(ShotError::AlreadyTargeted(h)));
        }
        assert_eq!(board.cell(c(0, 0)), Some(Cell::Sunk));
    }

    #[test]
    fn contour_keeps_earlier_misses() {
        let mut board = Board::new(6);
        board
            .add_ship(Ship::new(c(3, 3), 1, Orientation::Vertical))
            .unwrap();
        board.reset_for_play();
        assert_eq!(board.shot(c(2, 2)), Ok(ShotOutcome::Miss));
        assert_eq!(board.shot(c(3, 3)), Ok(ShotOutcome::Sunk));
        assert_eq!(board.cell(c(2, 2)), Some(Cell::Miss));
        assert_eq!(board.cell(c(4, 4)), Some(Cell::Contour));
    }

    #[test]
    fn hidden_view_masks_ships() {
        let mut board = Board::new(4);
        board
            .add_ship(Ship::new(c(1, 1), 2, Orientation::Vertical))
            .unwrap();
        board.reset_for_play();
        board.shot(c(1, 1)).unwrap();
        let hidden = board.view(true);
        assert_eq!(hidden.cell(1, 1), Cell::Hit);
        assert_eq!(hidden.cell(1, 2), Cell::Empty);
        assert_eq!(board.view(false).cell(1, 2), Cell::Ship);
        assert_eq!(hidden.ships_left(), 1);
    }
}
