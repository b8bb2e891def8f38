use crate::{Bitboard, Color, Piece, PieceType, Square};

/// Piece placement: twelve piece bitboards plus the derived occupancy sets.
///
/// Mutation goes through [`Board::toggle`] followed by one [`Board::refresh`],
/// so the aggregates are only rebuilt once per move.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Board {
    pieces: [Bitboard; 12],
    by_color: [Bitboard; 2],
    occupied: Bitboard,
}

impl Board {
    /// Flips `piece` on `sq`. Aggregates are stale until [`Board::refresh`].
    #[inline]
    pub(crate) fn toggle(&mut self, piece: Piece, sq: Square) {
        self.pieces[piece.index()].toggle(sq);
    }

    /// Moves `piece` and rebuilds the aggregates
    pub(crate) fn relocate(&mut self, piece: Piece, from: Square, to: Square) {
        self.toggle(piece, from);
        self.toggle(piece, to);
        self.refresh();
    }

    /// Rebuilds per-color and total occupancy from the piece boards
    pub(crate) fn refresh(&mut self) {
        for color in Color::BOTH {
            let start = color.index() * 6;
            self.by_color[color.index()] = self.pieces[start..start + 6]
                .iter()
                .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        }
        self.occupied = self.by_color[0] | self.by_color[1];
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceType) -> Bitboard {
        self.pieces[Piece::new(color, kind).index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied
    }

    /// Kind of the `color` piece on `sq`, if any
    pub fn kind_on(&self, color: Color, sq: Square) -> Option<PieceType> {
        if !self.occupancy(color).contains(sq) {
            return None;
        }
        PieceType::ALL
            .into_iter()
            .find(|&kind| self.pieces(color, kind).contains(sq))
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Color::BOTH
            .into_iter()
            .find_map(|color| self.kind_on(color, sq).map(|kind| Piece::new(color, kind)))
    }

    /// Square of the `color` king; a board without one is corrupt
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color, PieceType::King)
            .lsb()
            .expect("board must hold exactly one king per side")
    }

    /// Checks the placement invariants: disjoint piece boards, aggregates
    /// matching their union, and exactly one king per side
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for bb in self.pieces {
            if (seen & bb).is_not_empty() {
                return false;
            }
            seen |= bb;
        }

        let mut fresh = *self;
        fresh.refresh();
        fresh == *self
            && seen == self.occupied
            && Color::BOTH
                .into_iter()
                .all(|color| self.pieces(color, PieceType::King).popcount() == 1)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square(rank * 8 + file);
                match self.piece_on(sq) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h")
    }
}
