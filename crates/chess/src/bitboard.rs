use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::Square;

/// A set of squares packed into 64 bits (bit 0 = a1, bit 63 = h8)
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// No squares set
    pub const EMPTY: Bitboard = Bitboard(0);
    /// Every square set
    pub const ALL: Bitboard = Bitboard(!0u64);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Back ranks, where no pawn may stand
    pub const BACK_RANKS: Bitboard = Bitboard(Self::RANK_1.0 | Self::RANK_8.0);

    /// Wraps raw bits
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Returns true if no squares are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if any square is set
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns true if the square is set
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.0) & 1 == 1
    }

    /// Sets the given square
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    /// Clears the given square
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.0);
    }

    /// Flips membership of a square; placing and lifting are the same operation
    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= 1u64 << sq.0;
    }

    /// Population count
    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square, or None if empty
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Removes and returns the lowest set square
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Iterates set squares from a1 towards h8
    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// The `index`-th subset of `mask`: bit j of `index` decides whether the
    /// j-th lowest square of the mask is included. Enumerating indices
    /// 0..2^popcount(mask) visits every subset exactly once.
    pub fn subset(mask: Bitboard, index: u64) -> Bitboard {
        let mut subset = Bitboard::EMPTY;
        for (bit, sq) in mask.iter().enumerate() {
            if (index >> bit) & 1 == 1 {
                subset.set(sq);
            }
        }
        subset
    }

    /// Shifts every square one rank up
    #[inline]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    /// Shifts every square one rank down
    #[inline]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }

    /// Shifts every square one file towards h, dropping the h-file
    #[inline]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 << 1) & !Self::FILE_A.0)
    }

    /// Shifts every square one file towards a, dropping the a-file
    #[inline]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & !Self::FILE_H.0)
    }

    /// Diagonal shift up and towards h
    #[inline]
    pub const fn north_east(self) -> Bitboard {
        Bitboard((self.0 << 9) & !Self::FILE_A.0)
    }

    /// Diagonal shift up and towards a
    #[inline]
    pub const fn north_west(self) -> Bitboard {
        Bitboard((self.0 << 7) & !Self::FILE_H.0)
    }

    /// Diagonal shift down and towards h
    #[inline]
    pub const fn south_east(self) -> Bitboard {
        Bitboard((self.0 >> 7) & !Self::FILE_A.0)
    }

    /// Diagonal shift down and towards a
    #[inline]
    pub const fn south_west(self) -> Bitboard {
        Bitboard((self.0 >> 9) & !Self::FILE_H.0)
    }
}

/// Iterator over the set squares of a bitboard, lowest first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.popcount() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

macro_rules! impl_bit_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Bitboard {
            type Output = Bitboard;
            #[inline]
            fn $method(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $op rhs.0)
            }
        }

        impl $assign_trait for Bitboard {
            #[inline]
            fn $assign_method(&mut self, rhs: Bitboard) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bit_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bit_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:016X})", self.0)?;
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for sq in (0..8u8).map(|file| Square(rank * 8 + file)) {
                write!(f, "{} ", if self.contains(sq) { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_contains_and_toggle() {
        let mut bb = Bitboard::EMPTY;
        bb.toggle(Square::E4);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::E5));
        bb.toggle(Square::E4);
        assert!(bb.is_empty());

        bb.set(Square::A1);
        bb.set(Square::A1);
        assert_eq!(bb.popcount(), 1);
        bb.clear(Square::A1);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_bitboard_popcount() {
        assert_eq!(Bitboard::EMPTY.popcount(), 0);
        assert_eq!(Bitboard::ALL.popcount(), 64);
        assert_eq!(Bitboard::FILE_A.popcount(), 8);
        assert_eq!(Bitboard::BACK_RANKS.popcount(), 16);
    }

    #[test]
    fn test_bitboard_iter_ascending() {
        let bb = Square::H8.bitboard() | Square::A1.bitboard() | Square::E4.bitboard();
        let squares: Vec<_> = bb.iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(bb.iter().len(), 3);
    }

    #[test]
    fn test_bitboard_pop_lsb() {
        let mut bb = Square::A1.bitboard() | Square::H8.bitboard();
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::H8));
        assert_eq!(bb.pop_lsb(), None);
    }

    #[test]
    fn test_bitboard_shifts_do_not_wrap() {
        assert_eq!(Square::A1.bitboard().north(), Square::A2.bitboard());
        assert_eq!(Square::A1.bitboard().east(), Square::B1.bitboard());
        assert!(Square::H1.bitboard().east().is_empty());
        assert!(Square::A8.bitboard().west().is_empty());
        assert!(Square::H4.bitboard().north_east().is_empty());
        assert!(Square::A4.bitboard().south_west().is_empty());
    }

    #[test]
    fn test_subset_enumeration() {
        let mask = Square::B2.bitboard() | Square::D4.bitboard() | Square::G7.bitboard();
        assert_eq!(Bitboard::subset(mask, 0), Bitboard::EMPTY);
        assert_eq!(Bitboard::subset(mask, 0b001), Square::B2.bitboard());
        assert_eq!(Bitboard::subset(mask, 0b100), Square::G7.bitboard());
        assert_eq!(Bitboard::subset(mask, 0b111), mask);

        let mut seen: Vec<u64> = (0..8).map(|i| Bitboard::subset(mask, i).0).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_bitboard_operations() {
        let a = Bitboard::FILE_A;
        let b = Bitboard::RANK_1;
        assert_eq!(a & b, Square::A1.bitboard());
        assert_eq!((a | b).popcount(), 15);
        assert_eq!((a ^ b).popcount(), 14);

        let mut c = a;
        c &= !Square::A1.bitboard();
        assert_eq!(c.popcount(), 7);
    }
}
