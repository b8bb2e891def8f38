//! Rookery Core - shared error types
//!
//! The chess core itself never returns errors: its inputs are trusted and a
//! violated precondition is a panic. Errors only arise at the text boundary,
//! where FEN strings and move text are decoded into core types.
//!
//! - [`ChessError`] - everything a boundary decoder can reject
//! - [`Result`] - convenience alias

mod error;

pub use error::{ChessError, Result};
