//! FEN decoding and encoding.

use std::fmt::Write;
use std::str::FromStr;

use rookery_core::{ChessError, Result};

use crate::check::check_status;
use crate::{Bitboard, Board, CastleRight, CastlingRights, Color, Piece, PieceType, Position, Square};

impl Position {
    /// Parses Forsyth-Edwards Notation. The halfmove clock and fullmove
    /// number are optional and default to 0 and 1; each must fit in a `u16`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(ChessError::fen(format!(
                "expected 4 to 6 fields, found {}",
                fields.len()
            )));
        }

        let board = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(format!("invalid side to move {other:?}"))),
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            text => Some(
                text.parse::<Square>()
                    .map_err(|_| ChessError::fen(format!("invalid en passant square {text:?}")))?,
            ),
        };

        let halfmove_clock = match fields.get(4) {
            Some(text) => text
                .parse::<u16>()
                .map_err(|_| ChessError::fen(format!("invalid halfmove clock {text:?}")))?,
            None => 0,
        };

        let fullmove_number = match fields.get(5) {
            Some(text) => match text.parse::<u16>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ChessError::fen(format!("invalid fullmove number {text:?}"))),
            },
            None => 1,
        };

        validate(&board, side_to_move, castling, en_passant)?;

        Ok(Position::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            u32::from(halfmove_clock),
            u32::from(fullmove_number),
        ))
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                match self.board.piece_on(Square(rank * 8 + file)) {
                    Some(piece) => {
                        if gap > 0 {
                            let _ = write!(fen, "{gap}");
                            gap = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                let _ = write!(fen, "{gap}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling.is_empty() {
            fen.push('-');
        }
        for (right, letter) in CastleRight::ALL.into_iter().zip(['K', 'Q', 'k', 'q']) {
            if self.castling.has(right) {
                fen.push(letter);
            }
        }

        let en_passant = self.en_passant.map_or("-".to_string(), |sq| sq.to_string());
        let _ = write!(
            fen,
            " {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_number
        );
        fen
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen(s)
    }
}

fn parse_placement(text: &str) -> Result<Board> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen(format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut board = Board::default();
    for (row, rank_text) in ranks.into_iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::fen(format!("invalid piece {c:?}")))?;
                let sq = Square::from_coords(file, rank).ok_or_else(|| {
                    ChessError::fen(format!("rank {} has more than 8 files", rank + 1))
                })?;
                board.toggle(piece, sq);
                file += 1;
            }
            if file > 8 {
                return Err(ChessError::fen(format!("rank {} has more than 8 files", rank + 1)));
            }
        }
        if file != 8 {
            return Err(ChessError::fen(format!("rank {} has {file} files", rank + 1)));
        }
    }
    board.refresh();
    Ok(board)
}

fn parse_castling(text: &str) -> Result<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for c in text.chars() {
        let right = match c {
            'K' => CastleRight::WhiteKingside,
            'Q' => CastleRight::WhiteQueenside,
            'k' => CastleRight::BlackKingside,
            'q' => CastleRight::BlackQueenside,
            _ => return Err(ChessError::fen(format!("invalid castling rights {text:?}"))),
        };
        if rights.has(right) {
            return Err(ChessError::fen(format!("repeated castling right {c:?} in {text:?}")));
        }
        rights.set(right);
    }
    Ok(rights)
}

/// Rejects placements that play could never reach from a legal game
fn validate(
    board: &Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
) -> Result<()> {
    for color in Color::BOTH {
        let kings = board.pieces(color, PieceType::King).popcount();
        if kings != 1 {
            return Err(ChessError::fen(format!("{color} has {kings} kings, expected 1")));
        }
        if (board.pieces(color, PieceType::Pawn) & Bitboard::BACK_RANKS).is_not_empty() {
            return Err(ChessError::fen(format!("{color} pawn on a back rank")));
        }
    }

    for right in CastleRight::ALL.into_iter().filter(|&r| castling.has(r)) {
        let color = right.color();
        if board.kind_on(color, right.king_from()) != Some(PieceType::King)
            || board.kind_on(color, right.rook_from()) != Some(PieceType::Rook)
        {
            return Err(ChessError::fen(format!(
                "castling right {right:?} without king and rook on their home squares"
            )));
        }
    }

    if let Some(sq) = en_passant {
        // The square a pawn of the other side just skipped over
        let them = side_to_move.opposite();
        let expected_rank = them.pawn_start_rank() as i8 + them.forward();
        let pushed = sq.offset(0, them.forward());
        let origin = sq.offset(0, -them.forward());
        let valid = sq.rank() as i8 == expected_rank
            && !board.occupied().contains(sq)
            && pushed.is_some_and(|p| board.kind_on(them, p) == Some(PieceType::Pawn))
            && origin.is_some_and(|o| !board.occupied().contains(o));
        if !valid {
            return Err(ChessError::fen(format!("invalid en passant square {sq}")));
        }
    }

    if check_status(board).is_in_check(side_to_move.opposite()) {
        return Err(ChessError::fen(format!(
            "{} is in check but it is {side_to_move} to move",
            side_to_move.opposite()
        )));
    }

    Ok(())
}
