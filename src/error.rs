use thiserror::Error;

use crate::board::Color;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid square notation: {0:?}")]
    BadSquare(String),

    #[error("invalid placement token: {0:?}")]
    BadPlacement(String),

    #[error("square {0} is occupied twice in placement")]
    DoubleOccupancy(String),

    #[error("{0:?} has no king on the board")]
    MissingKing(Color),

    #[error("{0:?} has more than one king on the board")]
    DuplicateKing(Color),

    #[error("{0:?} to move while the opposing king is already in check")]
    OpponentInCheck(Color),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("unknown difficulty {0} (expected 0, 1 or 2)")]
    UnknownDifficulty(u8),

    #[error("invalid argument: {0:?}")]
    BadArgument(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
