//! Perft run configuration.

use rookery_chess::Position;
use rookery_core::Result;

/// Settings for a single perft or divide run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerftOptions {
    /// Number of plies to expand below the root.
    pub depth: u32,

    /// Root position as FEN. `None` means the standard starting position.
    pub fen: Option<String>,

    /// Moves in long algebraic notation played from the root before counting.
    pub moves: Vec<String>,

    /// Split the root moves across rayon worker threads.
    pub parallel: bool,
}

impl Default for PerftOptions {
    fn default() -> Self {
        Self {
            depth: 5,
            fen: None,
            moves: Vec::new(),
            parallel: false,
        }
    }
}

impl PerftOptions {
    /// Options counting from the starting position to `depth`.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Use the given FEN as the root position.
    pub fn fen(mut self, fen: impl Into<String>) -> Self {
        self.fen = Some(fen.into());
        self
    }

    /// Replay these moves from the root before counting.
    pub fn moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve the root position: decode the FEN (or start fresh), then
    /// replay the move list.
    pub fn position(&self) -> Result<Position> {
        let mut position = match &self.fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::starting(),
        };
        position.play_moves(&self.moves)?;
        Ok(position)
    }
}
