// Bounded-depth alpha-beta engine for 5x5x5 Raumschach
pub mod board;
pub mod error;
pub mod perft;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use board::{Board, Color, Coord, Displacement, Piece, PieceKind};
pub use error::{EngineError, Result};
pub use search::{Difficulty, Outcome, Solver, Turn};
