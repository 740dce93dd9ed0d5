use std::fmt;

use crate::board::{Board, Color, Coord, Displacement, Undo};
use crate::search::eval::Evaluator;

/// A candidate move: origin, displacement and a score. Straight out of the
/// generator the score is the speculative placement delta of the move
/// (White-positive); returned from a search it is the searched score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub score: i32,
    pub from: Coord,
    pub delta: Displacement,
}

impl Turn {
    #[inline]
    pub fn to(&self) -> Coord { self.from + self.delta }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to())
    }
}

/// All legal moves of `color`, most promising first.
pub fn gen_moves(board: &mut Board, color: Color, eval: &Evaluator) -> Vec<Turn> {
    generate(board, color, eval, true)
}

/// Legal captures of `color`, same ordering as `gen_moves`.
pub fn gen_captures(board: &mut Board, color: Color, eval: &Evaluator) -> Vec<Turn> {
    generate(board, color, eval, false)
}

fn generate(board: &mut Board, color: Color, eval: &Evaluator, include_non_captures: bool) -> Vec<Turn> {
    // (captured material, turn)
    let mut scored: Vec<(i32, Turn)> = Vec::with_capacity(64);
    board.for_each_legal(color, include_non_captures, |b, from, delta| {
        let Some(&mover) = b.piece_at(from) else { return false };
        let to = from + delta;
        let victim = b.piece_at(to).copied();
        let mut landed = mover;
        landed.at = to;
        let score = eval.placement(&landed)
            - eval.placement(&mover)
            - victim.map_or(0, |v| eval.placement(&v));
        let gain = victim.map_or(0, |v| eval.weights().weight(v.kind));
        scored.push((gain, Turn { score, from, delta }));
        false
    });

    // Captures first, biggest victim first; then quiet moves by delta in the
    // mover's favour. Stable, so equal keys keep board scan order.
    let sign = color.sign();
    scored.sort_by(|(ga, a), (gb, b)| {
        gb.cmp(ga).then_with(|| (b.score * sign).cmp(&(a.score * sign)))
    });
    scored.into_iter().map(|(_, t)| t).collect()
}

/// Placement change from a promotion recorded in `undo`, read off the board
/// while the move is still applied.
pub(crate) fn promotion_delta(board: &Board, undo: &Undo, eval: &Evaluator) -> i32 {
    if !undo.promoted {
        return 0;
    }
    let mut pawn = undo.moved;
    pawn.at = undo.to;
    match board.piece_at(undo.to) {
        Some(promoted) => eval.placement(promoted) - eval.placement(&pawn),
        None => 0,
    }
}
