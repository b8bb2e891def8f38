//! Check detection for both kings at once.

use crate::{attacks, Bitboard, Board, Color, Leaper, PieceType, Slider, Square};

/// Which kings are attacked
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Debug)]
pub struct CheckStatus {
    pub white: bool,
    pub black: bool,
}

impl CheckStatus {
    #[inline]
    pub const fn is_in_check(self, color: Color) -> bool {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// Evaluates both kings independently of whose turn it is
pub fn check_status(board: &Board) -> CheckStatus {
    let in_check = |color: Color| {
        attackers(board, board.king_square(color), color.opposite()).is_not_empty()
    };
    CheckStatus {
        white: in_check(Color::White),
        black: in_check(Color::Black),
    }
}

/// All `by` pieces attacking `sq`. Adjacent kings count, so transient
/// boards built while probing castling are judged correctly.
pub fn attackers(board: &Board, sq: Square, by: Color) -> Bitboard {
    let tables = attacks();
    let occupied = board.occupied();
    let queens = board.pieces(by, PieceType::Queen);

    let orthogonal = tables.sliding_attacks(Slider::Rook, sq, occupied)
        & (board.pieces(by, PieceType::Rook) | queens);
    let diagonal = tables.sliding_attacks(Slider::Bishop, sq, occupied)
        & (board.pieces(by, PieceType::Bishop) | queens);
    let knights =
        tables.leaper_attacks(Leaper::Knight, sq) & board.pieces(by, PieceType::Knight);
    // A `by` pawn hits `sq` exactly when a defending pawn on `sq` would hit it back
    let pawns = tables.pawn_attacks(by.opposite(), sq) & board.pieces(by, PieceType::Pawn);
    let king = tables.leaper_attacks(Leaper::King, sq) & board.pieces(by, PieceType::King);

    orthogonal | diagonal | knights | pawns | king
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn board(fen: &str) -> Board {
        *Position::from_fen(fen).unwrap().board()
    }

    #[test]
    fn test_start_position_has_no_checks() {
        let status = check_status(Position::starting().board());
        assert_eq!(status, CheckStatus::default());
    }

    #[test]
    fn test_each_attacker_kind() {
        let cases = [
            ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/4K2r w - - 0 1", true),
            ("4k3/8/8/8/1b6/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/5p2/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/4p3/4K3 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1", true),
            ("4k3/8/8/8/q7/8/2P5/4K3 w - - 0 1", false),
        ];
        for (fen, white_in_check) in cases {
            let status = check_status(&board(fen));
            assert_eq!(status.white, white_in_check, "{fen}");
            assert!(!status.black, "{fen}");
        }
    }

    #[test]
    fn test_black_king_checked_by_white_pawn() {
        let status = check_status(&board("8/8/8/8/8/3k4/4P3/4K3 b - - 0 1"));
        assert!(status.black);
        assert!(!status.white);
        assert!(status.is_in_check(Color::Black));
    }

    #[test]
    fn test_both_sides_reported() {
        // Not reachable by play, but both kings must still be evaluated
        let mut b = Board::default();
        b.toggle(crate::Piece::new(Color::White, PieceType::King), Square::E1);
        b.toggle(crate::Piece::new(Color::Black, PieceType::King), Square::E8);
        b.toggle(crate::Piece::new(Color::White, PieceType::Rook), Square::A8);
        b.toggle(crate::Piece::new(Color::Black, PieceType::Rook), Square::H1);
        b.refresh();
        assert_eq!(check_status(&b), CheckStatus { white: true, black: true });
    }

    #[test]
    fn test_adjacent_kings_attack_each_other() {
        let mut b = Board::default();
        b.toggle(crate::Piece::new(Color::White, PieceType::King), Square::E4);
        b.toggle(crate::Piece::new(Color::Black, PieceType::King), Square::E5);
        b.refresh();
        assert_eq!(attackers(&b, Square::E5, Color::White), Square::E4.bitboard());
        assert_eq!(check_status(&b), CheckStatus { white: true, black: true });
    }
}
