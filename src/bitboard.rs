//! A square bitboard whose side length is chosen at runtime.
//!
//! Cells are packed row-major into a vector of unsigned words `T`. The board
//! is used for the busy set, where membership tests and inserts dominate.

use alloc::vec;
use alloc::vec::Vec;
use core::{any, fmt};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column index is out of bounds [0..size).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A `size×size` bitboard stored in words of type `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn word_bits() -> usize {
        T::zero().count_zeros() as usize
    }

    /// Create an empty `size×size` board.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let words = cells.div_ceil(Self::word_bits());
        BitBoard {
            size,
            words: vec![T::zero(); words],
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col). Returns `true` if it was previously clear.
    pub fn set(&mut self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        let mask = T::one() << bit;
        let was_clear = (self.words[word] & mask).is_zero();
        self.words[word] = self.words[word] | mask;
        Ok(was_clear)
    }

    /// Clears the bit at (row, col).
    #[cfg(test)]
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> Result<(usize, usize), BitBoardError> {
        if row >= self.size || col >= self.size {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        let idx = row * self.size + col;
        Ok((idx / Self::word_bits(), idx % Self::word_bits()))
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>({}x{}):", any::type_name::<T>(), self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.get(r, c).unwrap_or(false) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_fresh_bits() {
        let mut bb = BitBoard::<u8>::new(6);
        assert!(bb.is_empty());
        assert_eq!(bb.set(5, 5), Ok(true));
        assert_eq!(bb.set(5, 5), Ok(false));
        assert!(bb.get(5, 5).unwrap());
        assert_eq!(bb.count_ones(), 1);
    }

    #[test]
    fn spans_multiple_words() {
        let mut bb = BitBoard::<u8>::new(4);
        bb.set(0, 1).unwrap();
        bb.set(3, 3).unwrap();
        assert!(bb.get(0, 1).unwrap() && bb.get(3, 3).unwrap());
        assert_eq!(bb.count_ones(), 2);
        bb.clear(0, 1).unwrap();
        assert_eq!(bb.count_ones(), 1);
        bb.clear_all();
        assert!(bb.is_empty());
    }

    #[test]
    fn rejects_out_of_range() {
        let bb = BitBoard::<u64>::new(3);
        assert_eq!(
            bb.get(3, 0),
            Err(BitBoardError::IndexOutOfBounds { row: 3, col: 0 })
        );
    }
}
