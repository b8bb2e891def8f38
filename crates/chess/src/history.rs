//! Undo stacks for the state a move destroys.
//!
//! Entries carry the ply they belong to, and unmake only restores an entry
//! whose ply matches the ply being undone. That makes the fifty-move clock
//! and en-passant square recoverable even after consecutive resets.

use crate::{CastleRight, CastlingRights, PieceType, Square};

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub(crate) struct History {
    captures: Vec<PieceType>,
    /// Tagged with the ply at which the capture becomes available
    en_passant: Vec<(Square, u32)>,
    /// Ply of the move that first cleared each right, indexed by [`CastleRight::index`]
    castling_loss: [Option<u32>; 4],
    /// Clock value before a reset, tagged with the resetting move's ply
    fifty: Vec<(u32, u32)>,
}

impl History {
    pub(crate) fn push_capture(&mut self, kind: PieceType) {
        self.captures.push(kind);
    }

    pub(crate) fn pop_capture(&mut self) -> PieceType {
        self.captures
            .pop()
            .expect("unmake of a capture without a recorded victim")
    }

    pub(crate) fn push_en_passant(&mut self, sq: Square, ply: u32) {
        self.en_passant.push((sq, ply));
    }

    /// Drops the top entry if it was available at `ply`
    pub(crate) fn pop_en_passant_if(&mut self, ply: u32) {
        if matches!(self.en_passant.last(), Some(&(_, tag)) if tag == ply) {
            self.en_passant.pop();
        }
    }

    /// En-passant square available at `ply`, if the top entry belongs to it
    pub(crate) fn en_passant_at(&self, ply: u32) -> Option<Square> {
        match self.en_passant.last() {
            Some(&(sq, tag)) if tag == ply => Some(sq),
            _ => None,
        }
    }

    pub(crate) fn push_fifty(&mut self, clock: u32, ply: u32) {
        self.fifty.push((clock, ply));
    }

    /// Clock value saved by the move made at `ply`, if that move reset it
    pub(crate) fn pop_fifty_if(&mut self, ply: u32) -> Option<u32> {
        match self.fifty.last() {
            Some(&(clock, tag)) if tag == ply => {
                self.fifty.pop();
                Some(clock)
            }
            _ => None,
        }
    }

    /// Remembers the ply that cleared `right`; only the first loss counts
    pub(crate) fn record_loss(&mut self, right: CastleRight, ply: u32) {
        self.castling_loss[right.index()].get_or_insert(ply);
    }

    /// Gives back every right that was lost by the move made at `ply`
    pub(crate) fn restore_if(&mut self, ply: u32, rights: &mut CastlingRights) {
        for right in CastleRight::ALL {
            let slot = &mut self.castling_loss[right.index()];
            if *slot == Some(ply) {
                *slot = None;
                rights.set(right);
            }
        }
    }
}
