use thiserror::Error;

/// Errors raised while decoding external chess input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Invalid move text: {0:?}")]
    InvalidMove(String),

    #[error("Illegal move in this position: {0}")]
    IllegalMove(String),
}

impl ChessError {
    /// Shorthand for building an [`ChessError::InvalidFen`] from any message
    pub fn fen(message: impl Into<String>) -> Self {
        ChessError::InvalidFen(message.into())
    }
}

/// Convenience Result type for boundary decoding
pub type Result<T> = std::result::Result<T, ChessError>;
