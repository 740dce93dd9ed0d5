//! Raumschach rules: coordinates, pieces and the shared mutable cube the
//! search plays moves on and takes them back from.

pub mod coord;
pub mod piece;
pub mod position;

pub use coord::{Coord, Displacement, BOARD_SIZE, CELLS};
pub use piece::{Color, Piece, PieceKind};
pub use position::{Board, Trial, Undo};
