//! Rookery Chess - bitboard move generation with reversible make/unmake
//!
//! A [`Position`] is mutated in place by [`Position::make_move`] and restored
//! exactly by [`Position::unmake_move`]. Legal moves come from
//! [`Position::generate_legal`], which filters pseudo-legal moves by playing
//! each one and reading the cached check flags. Sliding attacks use magic
//! bitboards from the process-wide [`attacks`] tables.
//!
//! FEN and long algebraic move text are decoded at the edges and reported
//! through [`rookery_core::ChessError`].

mod attacks;
mod bitboard;
mod board;
mod check;
mod fen;
mod history;
mod makemove;
mod movegen;
mod movelist;
mod moves;
mod notation;
mod piece;
mod position;
mod square;

pub use attacks::{attacks, AttackTables, Leaper, Slider};
pub use bitboard::{Bitboard, BitboardIter};
pub use board::Board;
pub use check::{attackers, check_status, CheckStatus};
pub use movelist::{MoveList, MAX_LEGAL_MOVES, MAX_MOVES};
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, PieceType};
pub use position::{CastleRight, CastlingRights, GameStatus, Position};
pub use square::Square;
