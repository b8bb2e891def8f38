//! Move records and their packed 16-bit wire form.
//!
//! Wire layout: `kind(4) | to(6) | from(6)`
//! - Bits 0-5: origin square
//! - Bits 6-11: destination square
//! - Bits 12-15: kind tag (1 and 2 are unassigned)

use std::fmt;

use crate::{PieceType, Square};

/// What a move does beyond relocating a piece
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum MoveKind {
    Quiet = 0,
    Capture = 3,
    CastleKingside = 4,
    DoublePawnPush = 5,
    CastleQueenside = 6,
    EnPassant = 7,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

impl MoveKind {
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`MoveKind::tag`]; unassigned tags yield None
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => MoveKind::Quiet,
            3 => MoveKind::Capture,
            4 => MoveKind::CastleKingside,
            5 => MoveKind::DoublePawnPush,
            6 => MoveKind::CastleQueenside,
            7 => MoveKind::EnPassant,
            8 => MoveKind::KnightPromotion,
            9 => MoveKind::BishopPromotion,
            10 => MoveKind::RookPromotion,
            11 => MoveKind::QueenPromotion,
            12 => MoveKind::KnightPromotionCapture,
            13 => MoveKind::BishopPromotionCapture,
            14 => MoveKind::RookPromotionCapture,
            15 => MoveKind::QueenPromotionCapture,
            _ => return None,
        })
    }

    /// Promotion kind for `piece`; panics for pawns and kings
    pub const fn promotion(piece: PieceType, capture: bool) -> Self {
        match (piece, capture) {
            (PieceType::Knight, false) => MoveKind::KnightPromotion,
            (PieceType::Bishop, false) => MoveKind::BishopPromotion,
            (PieceType::Rook, false) => MoveKind::RookPromotion,
            (PieceType::Queen, false) => MoveKind::QueenPromotion,
            (PieceType::Knight, true) => MoveKind::KnightPromotionCapture,
            (PieceType::Bishop, true) => MoveKind::BishopPromotionCapture,
            (PieceType::Rook, true) => MoveKind::RookPromotionCapture,
            (PieceType::Queen, true) => MoveKind::QueenPromotionCapture,
            (PieceType::Pawn | PieceType::King, _) => panic!("invalid promotion piece"),
        }
    }

    /// Piece a promoting pawn becomes
    pub const fn promotion_piece(self) -> Option<PieceType> {
        match self {
            MoveKind::KnightPromotion | MoveKind::KnightPromotionCapture => Some(PieceType::Knight),
            MoveKind::BishopPromotion | MoveKind::BishopPromotionCapture => Some(PieceType::Bishop),
            MoveKind::RookPromotion | MoveKind::RookPromotionCapture => Some(PieceType::Rook),
            MoveKind::QueenPromotion | MoveKind::QueenPromotionCapture => Some(PieceType::Queen),
            MoveKind::Quiet
            | MoveKind::Capture
            | MoveKind::CastleKingside
            | MoveKind::DoublePawnPush
            | MoveKind::CastleQueenside
            | MoveKind::EnPassant => None,
        }
    }

    /// Removes an enemy piece, en passant included
    pub const fn is_capture(self) -> bool {
        match self {
            MoveKind::Capture
            | MoveKind::EnPassant
            | MoveKind::KnightPromotionCapture
            | MoveKind::BishopPromotionCapture
            | MoveKind::RookPromotionCapture
            | MoveKind::QueenPromotionCapture => true,
            MoveKind::Quiet
            | MoveKind::CastleKingside
            | MoveKind::DoublePawnPush
            | MoveKind::CastleQueenside
            | MoveKind::KnightPromotion
            | MoveKind::BishopPromotion
            | MoveKind::RookPromotion
            | MoveKind::QueenPromotion => false,
        }
    }
}

/// A move as produced by the generator. Plain value, never owned by a position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Placeholder used to fill unused move-list slots
    pub const NULL: Move = Move::new(Square::A1, Square::A1, MoveKind::Quiet);

    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Packs the move into its 16-bit wire form
    #[inline]
    pub const fn encode(self) -> u16 {
        (self.from.0 as u16) | ((self.to.0 as u16) << 6) | ((self.kind.tag() as u16) << 12)
    }

    /// Unpacks a wire value; None when the kind tag is unassigned
    pub const fn decode(bits: u16) -> Option<Self> {
        let from = Square((bits & 0x3F) as u8);
        let to = Square(((bits >> 6) & 0x3F) as u8);
        match MoveKind::from_tag((bits >> 12) as u8) {
            Some(kind) => Some(Move { from, to, kind }),
            None => None,
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.kind.is_capture()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.kind.promotion_piece().is_some()
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        self.kind.promotion_piece()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.kind, MoveKind::DoublePawnPush)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.kind)
    }
}

/// Long algebraic coordinates, e.g. `e2e4` or `a7a8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
