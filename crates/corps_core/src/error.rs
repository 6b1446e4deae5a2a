//! Error type shared by every rules operation.
//!
//! `OutOfRange` is always a caller bug. `InvalidMove`, `InvalidAttack` and
//! `EmptySource` are recoverable: re-derive the legal actions and retry, or
//! surface the rejection to a human player. A failed operation never leaves
//! the board half-mutated.

use thiserror::Error;

use crate::types::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i32 },

    #[error("invalid move {from} -> {to}")]
    InvalidMove { from: Square, to: Square },

    #[error("invalid attack {from} -> {to}")]
    InvalidAttack { from: Square, to: Square },

    #[error("no piece on {0}")]
    EmptySource(Square),

    #[error("invalid board grids: {0}")]
    InvalidGrid(String),

    #[error("invalid delegation: {0}")]
    InvalidDelegation(String),

    #[error("game is already over")]
    GameOver,
}

pub type EngineResult<T> = Result<T, EngineError>;
