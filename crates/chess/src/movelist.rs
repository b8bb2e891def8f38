use std::fmt;

use crate::Move;

/// Room for any pseudo-legal list the generator can produce
pub const MAX_MOVES: usize = 256;

/// Most legal moves any reachable chess position has
pub const MAX_LEGAL_MOVES: usize = 218;

/// Fixed-capacity move buffer. Legal lists also record, per entry, whether
/// the move leaves the opponent in check.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    checks: [u64; MAX_MOVES / 64],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            checks: [0; MAX_MOVES / 64],
            len: 0,
        }
    }

    /// Appends a move; overflowing the buffer is a generator bug and panics
    #[inline]
    pub fn push(&mut self, mv: Move) {
        assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn push_tagged(&mut self, mv: Move, gives_check: bool) {
        let i = self.len;
        self.push(mv);
        if gives_check {
            self.checks[i / 64] |= 1 << (i % 64);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Move> {
        self.as_slice().get(index).copied()
    }

    /// Whether the move at `index` checks the opponent. Only meaningful for
    /// lists from [`Position::generate_legal`](crate::Position::generate_legal).
    #[inline]
    pub fn gives_check(&self, index: usize) -> bool {
        assert!(index < self.len, "move index out of range");
        (self.checks[index / 64] >> (index % 64)) & 1 == 1
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Move>> {
        self.as_slice().iter().copied()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Move;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveKind, Square};

    #[test]
    fn test_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let a = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        let b = Move::new(Square::G1, Square::F3, MoveKind::Quiet);
        list.push(a);
        list.push(b);

        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![a, b]);
        assert!(list.contains(b));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn test_check_tags_past_first_word() {
        let mut list = MoveList::new();
        let mv = Move::new(Square::A1, Square::A2, MoveKind::Quiet);
        for i in 0..130 {
            list.push_tagged(mv, i % 65 == 0);
        }
        assert!(list.gives_check(0));
        assert!(!list.gives_check(1));
        assert!(list.gives_check(65));
        assert!(!list.gives_check(129));
    }

    #[test]
    #[should_panic(expected = "move list overflow")]
    fn test_overflow_panics() {
        let mut list = MoveList::new();
        for _ in 0..=MAX_MOVES {
            list.push(Move::NULL);
        }
    }
}
