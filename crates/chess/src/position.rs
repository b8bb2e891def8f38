//! The mutable position: placement, turn, rights, counters and undo history.

use std::fmt;

use crate::check::{attackers, check_status, CheckStatus};
use crate::history::History;
use crate::{Bitboard, Board, Color, Piece, PieceType, Square};

/// One of the four castling privileges
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleRight {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

impl CastleRight {
    pub const ALL: [CastleRight; 4] = [
        CastleRight::WhiteKingside,
        CastleRight::WhiteQueenside,
        CastleRight::BlackKingside,
        CastleRight::BlackQueenside,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn color(self) -> Color {
        match self {
            CastleRight::WhiteKingside | CastleRight::WhiteQueenside => Color::White,
            CastleRight::BlackKingside | CastleRight::BlackQueenside => Color::Black,
        }
    }

    /// The two rights belonging to `color`, kingside first
    pub const fn of(color: Color) -> [CastleRight; 2] {
        match color {
            Color::White => [CastleRight::WhiteKingside, CastleRight::WhiteQueenside],
            Color::Black => [CastleRight::BlackKingside, CastleRight::BlackQueenside],
        }
    }

    pub const fn is_kingside(self) -> bool {
        matches!(self, CastleRight::WhiteKingside | CastleRight::BlackKingside)
    }

    pub const fn king_from(self) -> Square {
        match self.color() {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    pub const fn king_to(self) -> Square {
        match self {
            CastleRight::WhiteKingside => Square::G1,
            CastleRight::WhiteQueenside => Square::C1,
            CastleRight::BlackKingside => Square::G8,
            CastleRight::BlackQueenside => Square::C8,
        }
    }

    /// Square the king crosses; also where the rook lands
    pub const fn transit(self) -> Square {
        match self {
            CastleRight::WhiteKingside => Square::F1,
            CastleRight::WhiteQueenside => Square::D1,
            CastleRight::BlackKingside => Square::F8,
            CastleRight::BlackQueenside => Square::D8,
        }
    }

    pub const fn rook_from(self) -> Square {
        match self {
            CastleRight::WhiteKingside => Square::H1,
            CastleRight::WhiteQueenside => Square::A1,
            CastleRight::BlackKingside => Square::H8,
            CastleRight::BlackQueenside => Square::A8,
        }
    }

    pub const fn rook_to(self) -> Square {
        self.transit()
    }

    /// Squares between king and rook, all of which must be empty
    pub const fn path(self) -> Bitboard {
        match self {
            CastleRight::WhiteKingside => Bitboard(0x0000_0000_0000_0060),
            CastleRight::WhiteQueenside => Bitboard(0x0000_0000_0000_000E),
            CastleRight::BlackKingside => Bitboard(0x6000_0000_0000_0000),
            CastleRight::BlackQueenside => Bitboard(0x0E00_0000_0000_0000),
        }
    }

    /// A move touching the king or rook home square voids the right
    #[inline]
    pub(crate) fn voided_by(self, from: Square, to: Square) -> bool {
        let homes = [self.king_from(), self.rook_from()];
        homes.contains(&from) || homes.contains(&to)
    }
}

/// The four castling flags as named booleans
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Debug)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: Self = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: Self = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    fn flag(&mut self, right: CastleRight) -> &mut bool {
        match right {
            CastleRight::WhiteKingside => &mut self.white_kingside,
            CastleRight::WhiteQueenside => &mut self.white_queenside,
            CastleRight::BlackKingside => &mut self.black_kingside,
            CastleRight::BlackQueenside => &mut self.black_queenside,
        }
    }

    #[inline]
    pub const fn has(self, right: CastleRight) -> bool {
        match right {
            CastleRight::WhiteKingside => self.white_kingside,
            CastleRight::WhiteQueenside => self.white_queenside,
            CastleRight::BlackKingside => self.black_kingside,
            CastleRight::BlackQueenside => self.black_queenside,
        }
    }

    pub fn set(&mut self, right: CastleRight) {
        *self.flag(right) = true;
    }

    pub fn clear(&mut self, right: CastleRight) {
        *self.flag(right) = false;
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Outcome classification of a position
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveDraw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A chess position that is mutated in place by
/// [`make_move`](Position::make_move) and restored exactly by
/// [`unmake_move`](Position::unmake_move).
///
/// Cloning is the way to explore branches concurrently.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    /// Wider than any FEN counter, so a traversal from a decoded position
    /// cannot overflow it
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    /// Half-moves since the game began, derived from the fullmove number
    pub(crate) ply: u32,
    pub(crate) checks: CheckStatus,
    pub(crate) history: History,
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Position {
    /// The standard initial position
    pub fn starting() -> Self {
        let mut board = Board::default();
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let back = Square::from_index(color.back_rank() as usize * 8 + file);
                let pawn = Square::from_index(color.pawn_start_rank() as usize * 8 + file);
                board.toggle(Piece::new(color, kind), back);
                board.toggle(Piece::new(color, PieceType::Pawn), pawn);
            }
        }
        Position::from_parts(board, Color::White, CastlingRights::ALL, None, 0, 1)
    }

    /// Assembles a position from validated parts. The en-passant square is
    /// seeded into history so unmaking the first move brings it back.
    pub(crate) fn from_parts(
        mut board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        board.refresh();
        let ply = 2 * (fullmove_number.max(1) - 1)
            + u32::from(side_to_move == Color::Black);

        let mut history = History::default();
        if let Some(sq) = en_passant {
            history.push_en_passant(sq, ply);
        }

        Position {
            checks: check_status(&board),
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            ply,
            history,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceType) -> Bitboard {
        self.board.pieces(color, kind)
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.board.occupancy(color)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.board.occupied()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.board.king_square(color)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant this ply
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Cached check flags for both sides
    #[inline]
    pub fn check_status(&self) -> CheckStatus {
        self.checks
    }

    /// Whether the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.checks.is_in_check(self.side_to_move)
    }

    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        attackers(&self.board, sq, by).is_not_empty()
    }

    /// Classifies the position. Mate and stalemate take precedence over the
    /// fifty-move rule.
    pub fn status(&mut self) -> GameStatus {
        if self.generate_legal().is_empty() {
            if self.is_check() {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if self.halfmove_clock >= 100 {
            GameStatus::FiftyMoveDraw
        } else {
            GameStatus::Ongoing
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position {{")?;
        writeln!(f, "  FEN: {}", self.to_fen())?;
        writeln!(f, "{:?}", self.board)?;
        writeln!(f, "  Ply: {}, checks: {:?}", self.ply, self.checks)?;
        write!(f, "}}")
    }
}
