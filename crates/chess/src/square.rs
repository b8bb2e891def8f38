use std::fmt;
use std::str::FromStr;

use rookery_core::ChessError;

use crate::Bitboard;

/// A board square, numbered rank-major from a1 = 0 to h8 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Square(pub(crate) u8);

macro_rules! named_squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)*
        }
    };
}

named_squares! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// Creates a square from its index, returning None past h8
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from an index the caller knows to be on the board
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 64, "square index out of range");
        Square(index as u8)
    }

    /// Creates a square from file (0-7) and rank (0-7)
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// File index, 0 = a-file
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank index, 0 = rank 1
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Index into 64-entry tables
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Singleton bitboard holding this square
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self.0)
    }

    /// Steps by (file_delta, rank_delta), or None when that leaves the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// All 64 squares from a1 to h8
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    /// Parses coordinate text such as "e4"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Square((rank - b'1') * 8 + (file - b'a')))
            }
            _ => Err(ChessError::InvalidSquare(s.to_string())),
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coords() {
        assert_eq!((Square::A1.file(), Square::A1.rank()), (0, 0));
        assert_eq!((Square::H1.file(), Square::H1.rank()), (7, 0));
        assert_eq!((Square::A8.file(), Square::A8.rank()), (0, 7));
        assert_eq!((Square::E4.file(), Square::E4.rank()), (4, 3));
        assert_eq!(Square::H8.index(), 63);
    }

    #[test]
    fn test_square_from_coords() {
        assert_eq!(Square::from_coords(4, 3), Some(Square::E4));
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
        assert_eq!(Square::new(64), None);
    }

    #[test]
    #[should_panic(expected = "square index out of range")]
    fn test_from_index_rejects_off_board() {
        let _ = Square::from_index(64);
    }

    #[test]
    fn test_square_parse() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::A1));
        assert_eq!("h8".parse::<Square>(), Ok(Square::H8));
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        for bad in ["i1", "a9", "", "a", "e44", "E4"] {
            assert_eq!(
                bad.parse::<Square>(),
                Err(ChessError::InvalidSquare(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!(format!("{:?}", Square::H8), "h8");
    }

    #[test]
    fn test_square_offset() {
        assert_eq!(Square::E4.offset(1, 1), Some(Square::F5));
        assert_eq!(Square::E4.offset(-2, 1), Some(Square::C5));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H4.offset(1, 0), None);
    }

    #[test]
    fn test_all_squares() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[63], Square::H8);
    }
}
