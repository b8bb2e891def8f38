//! The two state transitions of a position. `unmake_move` is the exact
//! inverse of `make_move` for the same move, down to the history stacks.

use crate::check::check_status;
use crate::{CastleRight, Color, Move, MoveKind, Piece, PieceType, Position, Square};

/// Square of the pawn removed by an en-passant capture: the destination
/// file on the mover's starting rank
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square(mv.from().rank() * 8 + mv.to().file())
}

fn castle_right(color: Color, kind: MoveKind) -> Option<CastleRight> {
    let [kingside, queenside] = CastleRight::of(color);
    match kind {
        MoveKind::CastleKingside => Some(kingside),
        MoveKind::CastleQueenside => Some(queenside),
        _ => None,
    }
}

impl Position {
    /// Plays `mv`, which must come from this position's move generator.
    ///
    /// # Panics
    ///
    /// Panics if the mover or the captured piece is not where `mv` says.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opposite();
        let (from, to) = (mv.from(), mv.to());

        let kind = self
            .board
            .kind_on(us, from)
            .unwrap_or_else(|| panic!("{mv}: no {us} piece on {from}"));
        self.board.toggle(Piece::new(us, kind), from);

        if kind == PieceType::Pawn || mv.is_capture() {
            self.history.push_fifty(self.halfmove_clock, self.ply);
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if mv.is_capture() {
            let target = if mv.is_en_passant() {
                en_passant_victim(mv)
            } else {
                to
            };
            let victim = self
                .board
                .kind_on(them, target)
                .unwrap_or_else(|| panic!("{mv}: nothing to capture on {target}"));
            self.board.toggle(Piece::new(them, victim), target);
            self.history.push_capture(victim);
        }

        for right in CastleRight::ALL {
            if self.castling.has(right) && right.voided_by(from, to) {
                self.castling.clear(right);
                self.history.record_loss(right, self.ply);
            }
        }

        self.en_passant = None;
        if mv.is_double_pawn_push() {
            let skipped = Square((from.0 + to.0) / 2);
            self.en_passant = Some(skipped);
            self.history.push_en_passant(skipped, self.ply + 1);
        }

        if let Some(right) = castle_right(us, mv.kind()) {
            let rook = Piece::new(us, PieceType::Rook);
            self.board.toggle(rook, right.rook_from());
            self.board.toggle(rook, right.rook_to());
        }

        let placed = mv.promotion_piece().unwrap_or(kind);
        self.board.toggle(Piece::new(us, placed), to);

        self.board.refresh();
        self.checks = check_status(&self.board);
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;
        self.ply += 1;
    }

    /// Takes back `mv`, which must be the last move made on this position.
    ///
    /// # Panics
    ///
    /// Panics if no move has been made or `mv` does not match the board.
    pub fn unmake_move(&mut self, mv: Move) {
        self.ply = self
            .ply
            .checked_sub(1)
            .expect("unmake_move called before any make_move");
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        let (from, to) = (mv.from(), mv.to());
        let placed = self
            .board
            .kind_on(us, to)
            .unwrap_or_else(|| panic!("{mv}: no {us} piece on {to} to take back"));
        self.board.toggle(Piece::new(us, placed), to);
        let kind = if mv.is_promotion() {
            PieceType::Pawn
        } else {
            placed
        };
        self.board.toggle(Piece::new(us, kind), from);

        if let Some(right) = castle_right(us, mv.kind()) {
            let rook = Piece::new(us, PieceType::Rook);
            self.board.toggle(rook, right.rook_to());
            self.board.toggle(rook, right.rook_from());
        }

        if mv.is_capture() {
            let target = if mv.is_en_passant() {
                en_passant_victim(mv)
            } else {
                to
            };
            let victim = self.history.pop_capture();
            self.board.toggle(Piece::new(them, victim), target);
        }

        self.halfmove_clock = match self.history.pop_fifty_if(self.ply) {
            Some(clock) => clock,
            None => self.halfmove_clock - 1,
        };

        self.history.pop_en_passant_if(self.ply + 1);
        self.en_passant = self.history.en_passant_at(self.ply);
        self.history.restore_if(self.ply, &mut self.castling);

        self.board.refresh();
        self.checks = check_status(&self.board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(pos: &mut Position, text: &str) -> Move {
        let mv = pos.parse_move(text).unwrap();
        pos.make_move(mv);
        mv
    }

    #[test]
    fn test_quiet_move_and_back() {
        let mut pos = Position::starting();
        let before = pos.clone();

        let mv = play(&mut pos, "g1f3");
        assert_eq!(
            pos.piece_at(Square::F3),
            Some(Piece::new(Color::White, PieceType::Knight))
        );
        assert_eq!(pos.piece_at(Square::G1), None);
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.ply(), 1);

        pos.unmake_move(mv);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_capture_restores_victim() {
        let mut pos = Position::starting();
        pos.play_moves(["e2e4", "d7d5"]).unwrap();
        let before = pos.clone();

        let mv = play(&mut pos, "e4d5");
        assert!(mv.is_capture());
        assert_eq!(pos.pieces(Color::Black, PieceType::Pawn).popcount(), 7);
        assert_eq!(pos.halfmove_clock(), 0);

        pos.unmake_move(mv);
        assert_eq!(pos, before);
        assert_eq!(
            pos.piece_at(Square::D5),
            Some(Piece::new(Color::Black, PieceType::Pawn))
        );
    }

    #[test]
    fn test_en_passant_removes_pawn_behind() {
        let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let before = pos.clone();

        let mv = play(&mut pos, "e5d6");
        assert!(mv.is_en_passant());
        assert_eq!(pos.piece_at(Square::D5), None);
        assert_eq!(
            pos.piece_at(Square::D6),
            Some(Piece::new(Color::White, PieceType::Pawn))
        );
        assert_eq!(pos.en_passant_square(), None);

        pos.unmake_move(mv);
        assert_eq!(pos, before);
        assert_eq!(pos.en_passant_square(), Some(Square::D6));
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        let before = pos.clone();

        let mv = play(&mut pos, "e1g1");
        assert_eq!(mv.kind(), MoveKind::CastleKingside);
        assert_eq!(
            pos.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceType::Rook))
        );
        assert_eq!(pos.piece_at(Square::H1), None);
        assert!(!pos.castling_rights().white_kingside);
        assert!(!pos.castling_rights().white_queenside);
        assert!(pos.castling_rights().black_kingside);
        assert_eq!(pos.halfmove_clock(), 4);

        pos.unmake_move(mv);
        assert_eq!(pos, before);

        let mv = play(&mut pos, "e1c1");
        assert_eq!(
            pos.piece_at(Square::D1),
            Some(Piece::new(Color::White, PieceType::Rook))
        );
        pos.unmake_move(mv);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_capturing_rook_voids_opponent_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = pos.clone();

        let mv = play(&mut pos, "a1a8");
        let rights = pos.castling_rights();
        assert!(!rights.white_queenside);
        assert!(!rights.black_queenside);
        assert!(rights.white_kingside);
        assert!(rights.black_kingside);

        pos.unmake_move(mv);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_promotion_and_underpromotion() {
        let mut pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = pos.clone();

        for (text, piece) in [
            ("a7a8q", PieceType::Queen),
            ("a7a8n", PieceType::Knight),
            ("a7b8r", PieceType::Rook),
            ("a7b8b", PieceType::Bishop),
        ] {
            let mv = play(&mut pos, text);
            assert_eq!(
                pos.piece_at(mv.to()),
                Some(Piece::new(Color::White, piece))
            );
            assert!(pos.pieces(Color::White, PieceType::Pawn).is_empty());
            pos.unmake_move(mv);
            assert_eq!(pos, before);
        }
    }

    #[test]
    fn test_fullmove_advances_after_black() {
        let mut pos = Position::starting();
        let e4 = play(&mut pos, "e2e4");
        assert_eq!(pos.fullmove_number(), 1);
        let e5 = play(&mut pos, "e7e5");
        assert_eq!(pos.fullmove_number(), 2);
        pos.unmake_move(e5);
        assert_eq!(pos.fullmove_number(), 1);
        pos.unmake_move(e4);
        assert_eq!(pos, Position::starting());
    }

    #[test]
    fn test_check_flags_follow_moves() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = play(&mut pos, "a1a8");
        assert!(pos.is_check());
        assert!(pos.check_status().black);
        pos.unmake_move(mv);
        assert!(!pos.check_status().black);
    }

    #[test]
    #[should_panic(expected = "unmake_move called before any make_move")]
    fn test_unmake_at_ply_zero_panics() {
        let mut pos = Position::starting();
        let mv = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        pos.unmake_move(mv);
    }

    #[test]
    #[should_panic(expected = "no White piece on e3")]
    fn test_make_from_empty_square_panics() {
        let mut pos = Position::starting();
        pos.make_move(Move::new(Square::E3, Square::E4, MoveKind::Quiet));
    }
}
