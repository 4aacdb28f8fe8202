//! A set of squares packed into 64 bits.
//!
//! Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8. Every move rule returns one of
//! these; membership tests and unions are single instructions and equality
//! does not depend on the order squares were added in.

use crate::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Every square on the board.
    pub const FULL: SquareSet = SquareSet(!0);

    /// Creates a set from raw bits.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        SquareSet(bits)
    }

    /// Creates a set holding a single square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the given square is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Adds a square.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Removes a square.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Returns a copy with the square added.
    #[inline]
    pub const fn with(self, sq: Square) -> Self {
        SquareSet(self.0 | (1u64 << sq.index()))
    }

    /// Pops and returns the lowest square.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let idx = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Square::from_index(idx)
        }
    }

    /// Iterates the squares from a1 towards h8.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self)
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for SquareSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Sub for SquareSet {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & !rhs.0)
    }
}

impl Not for SquareSet {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        SquareSet(!self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the squares of a [`SquareSet`].
pub struct SquareSetIter(SquareSet);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.len();
        (count, Some(count))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter(self)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};
    use proptest::prelude::*;

    #[test]
    fn from_square() {
        let set = SquareSet::from_square(Square::A1);
        assert_eq!(set.bits(), 1);
        assert!(set.contains(Square::A1));
        assert!(!set.contains(Square::B1));
    }

    #[test]
    fn len() {
        assert_eq!(SquareSet::EMPTY.len(), 0);
        assert_eq!(SquareSet::FULL.len(), 64);
        assert!(SquareSet::EMPTY.is_empty());
    }

    #[test]
    fn insert_remove() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::E1);
        set.insert(Square::E1);
        assert_eq!(set.len(), 1);
        set.remove(Square::E1);
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [Square::H8, Square::A1, Square::E1].into_iter().collect();
        let squares: Vec<Square> = set.into_iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E1, Square::H8]);
    }

    #[test]
    fn set_operations() {
        let e4 = Square::new(File::E, Rank::R4);
        let a = SquareSet::from_square(Square::A1).with(e4);
        let b = SquareSet::from_square(e4);
        assert_eq!(a & b, b);
        assert_eq!((a | b).len(), 2);
        assert_eq!(a - b, SquareSet::from_square(Square::A1));
        assert!(!(!a).contains(e4));
    }

    #[test]
    fn pop_first() {
        let mut set = SquareSet::from_bits(0b1010);
        assert_eq!(set.pop_first().map(|s| s.index()), Some(1));
        assert_eq!(set.pop_first().map(|s| s.index()), Some(3));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn debug_lists_squares() {
        let set = SquareSet::from_square(Square::A1).with(Square::H8);
        assert_eq!(format!("{:?}", set), "{Square(a1), Square(h8)}");
    }

    proptest! {
        #[test]
        fn iteration_matches_bits(bits in any::<u64>()) {
            let set = SquareSet::from_bits(bits);
            let squares: Vec<Square> = set.iter().collect();
            prop_assert_eq!(squares.len(), set.len());
            prop_assert!(squares.windows(2).all(|w| w[0].index() < w[1].index()));
            prop_assert_eq!(squares.into_iter().collect::<SquareSet>(), set);
        }
    }
}
