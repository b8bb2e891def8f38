//! Move generation.
//!
//! Pseudo-legal moves are produced from the attack tables, then filtered by
//! playing each one and reading the mover's cached check flag.

use crate::check::check_status;
use crate::movelist::MAX_LEGAL_MOVES;
use crate::{
    attacks, Bitboard, CastleRight, Color, Leaper, Move, MoveKind, MoveList, Piece, PieceType,
    Position, Slider, Square,
};

impl Position {
    /// All legal moves for the side to move. Each entry is tagged with
    /// whether it checks the opponent, see [`MoveList::gives_check`].
    ///
    /// The position is played forward and back for every candidate, and is
    /// left exactly as it was found.
    pub fn generate_legal(&mut self) -> MoveList {
        let us = self.side_to_move;
        let pseudo = self.generate_pseudo_legal();
        let mut legal = MoveList::new();

        for mv in &pseudo {
            self.make_move(mv);
            let checks = self.checks;
            self.unmake_move(mv);

            if !checks.is_in_check(us) {
                legal.push_tagged(mv, checks.is_in_check(us.opposite()));
            }
        }

        debug_assert!(legal.len() <= MAX_LEGAL_MOVES);
        legal
    }

    /// Moves that obey piece movement and occupancy, but may leave the
    /// mover's own king attacked
    pub fn generate_pseudo_legal(&self) -> MoveList {
        let tables = attacks();
        let us = self.side_to_move;
        let friendly = self.board.occupancy(us);
        let enemy = self.board.occupancy(us.opposite());
        let occupied = self.board.occupied();
        let en_passant = self.en_passant.map_or(Bitboard::EMPTY, Square::bitboard);

        let mut list = MoveList::new();
        for kind in PieceType::ALL {
            for from in self.board.pieces(us, kind) {
                let reach = match kind {
                    PieceType::Pawn => {
                        tables.pawn_pushes(us, from, !occupied)
                            | (tables.pawn_attacks(us, from) & (enemy | en_passant))
                    }
                    PieceType::Knight => tables.leaper_attacks(Leaper::Knight, from),
                    PieceType::Bishop => tables.sliding_attacks(Slider::Bishop, from, occupied),
                    PieceType::Rook => tables.sliding_attacks(Slider::Rook, from, occupied),
                    PieceType::Queen => tables.queen_attacks(from, occupied),
                    PieceType::King => {
                        tables.leaper_attacks(Leaper::King, from) | self.castle_targets(us)
                    }
                };

                for to in reach & !friendly {
                    self.serialize(&mut list, kind, from, to);
                }
            }
        }
        list
    }

    /// Turns one destination bit into move records
    fn serialize(&self, list: &mut MoveList, kind: PieceType, from: Square, to: Square) {
        let us = self.side_to_move;
        let capture = self.board.occupied().contains(to);

        if kind == PieceType::Pawn && to.rank() == us.promotion_rank() {
            for piece in PieceType::PROMOTIONS {
                list.push(Move::new(from, to, MoveKind::promotion(piece, capture)));
            }
            return;
        }

        let move_kind = if kind == PieceType::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            MoveKind::DoublePawnPush
        } else if kind == PieceType::Pawn && self.en_passant == Some(to) {
            MoveKind::EnPassant
        } else if kind == PieceType::King && from.file().abs_diff(to.file()) == 2 {
            if to.file() > from.file() {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            }
        } else if capture {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        };
        list.push(Move::new(from, to, move_kind));
    }

    /// Castling destinations for `us`: the right is held, the path is
    /// clear, and the king is safe on its current, transit and final squares
    fn castle_targets(&self, us: Color) -> Bitboard {
        if self.checks.is_in_check(us) {
            return Bitboard::EMPTY;
        }

        let mut targets = Bitboard::EMPTY;
        for right in CastleRight::of(us) {
            if !self.castling.has(right) || (self.board.occupied() & right.path()).is_not_empty()
            {
                continue;
            }
            if self.king_safe_on(us, right.transit()) && self.king_safe_on(us, right.king_to()) {
                targets.set(right.king_to());
            }
        }
        targets
    }

    /// Probes a scratch copy of the board with the king moved to `sq`
    fn king_safe_on(&self, us: Color, sq: Square) -> bool {
        let mut probe = self.board;
        probe.relocate(Piece::new(us, PieceType::King), self.board.king_square(us), sq);
        !check_status(&probe).is_in_check(us)
    }
}
