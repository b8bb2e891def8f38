//! Long algebraic move text (`e2e4`, `e7e8q`) resolved against legal moves.

use rookery_core::{ChessError, Result};

use crate::{Move, PieceType, Position, Square};

impl Position {
    /// Resolves coordinate text to the matching legal move.
    ///
    /// Text that is not shaped like a move is [`ChessError::InvalidMove`];
    /// well-formed text with no legal match is [`ChessError::IllegalMove`].
    pub fn parse_move(&mut self, text: &str) -> Result<Move> {
        let invalid = || ChessError::InvalidMove(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }

        let from: Square = text[0..2].parse().map_err(|_| invalid())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c) {
                Some(piece) if PieceType::PROMOTIONS.contains(&piece) && c.is_ascii_lowercase() => {
                    Some(piece)
                }
                _ => return Err(invalid()),
            },
        };

        self.generate_legal()
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
            .ok_or_else(|| ChessError::IllegalMove(text.to_string()))
    }

    /// Plays a sequence of move texts, stopping at the first bad one.
    /// Moves before the failure stay played.
    pub fn play_moves<I, S>(&mut self, moves: I) -> Result<Vec<Move>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        moves
            .into_iter()
            .map(|text| {
                let mv = self.parse_move(text.as_ref())?;
                self.make_move(mv);
                Ok(mv)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveKind;

    #[test]
    fn test_parse_resolves_kind() {
        let mut pos = Position::starting();
        let mv = pos.parse_move("e2e4").unwrap();
        assert_eq!(mv, Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush));

        let mv = pos.parse_move("b1c3").unwrap();
        assert_eq!(mv.kind(), MoveKind::Quiet);
    }

    #[test]
    fn test_parse_promotion_suffix() {
        let mut pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pos.parse_move("b7b8r").unwrap().kind(),
            MoveKind::RookPromotion
        );
        // Promotion without a piece has no legal match
        assert_eq!(
            pos.parse_move("b7b8"),
            Err(ChessError::IllegalMove("b7b8".to_string()))
        );
    }

    #[test]
    fn test_invalid_text() {
        let mut pos = Position::starting();
        for text in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "e7e8k", "e7e8Q", "é2e4"] {
            assert_eq!(
                pos.parse_move(text),
                Err(ChessError::InvalidMove(text.to_string())),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_illegal_text() {
        let mut pos = Position::starting();
        assert_eq!(
            pos.parse_move("e2e5"),
            Err(ChessError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(
            pos.parse_move("e7e5"),
            Err(ChessError::IllegalMove("e7e5".to_string()))
        );
    }

    #[test]
    fn test_play_moves() {
        let mut pos = Position::starting();
        let played = pos
            .play_moves(["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"])
            .unwrap();
        assert_eq!(played.len(), 5);
        assert_eq!(
            pos.to_fen(),
            "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
        );

        for mv in played.into_iter().rev() {
            pos.unmake_move(mv);
        }
        assert_eq!(pos, Position::starting());
    }

    #[test]
    fn test_play_moves_stops_at_error() {
        let mut pos = Position::starting();
        let result = pos.play_moves(["e2e4", "e2e4"]);
        assert_eq!(result, Err(ChessError::IllegalMove("e2e4".to_string())));
        assert_eq!(pos.ply(), 1);
    }
}
