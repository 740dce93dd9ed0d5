use crate::board::{Board, Color};
use crate::search::alphabeta::Searcher;
use crate::search::eval::INF;
use crate::search::movegen::{gen_captures, promotion_delta};

impl Searcher {
    /// Full-window quiescence from a static evaluation of `board`.
    pub fn qsearch_eval(&mut self, board: &mut Board, color: Color) -> i32 {
        let stand = self.eval.evaluate(board);
        let depth = self.params().quiescence_depth;
        self.quiescence(board, -INF, INF, color, depth, stand)
    }

    /// Capture-only search past the horizon, fail-hard. `stand_pat` is the
    /// score if `color` declines to capture; children get it updated by the
    /// capture's placement delta.
    pub fn quiescence(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        mut beta: i32,
        color: Color,
        depth: u32,
        stand_pat: i32,
    ) -> i32 {
        self.nodes += 1;
        match color {
            Color::White => {
                if stand_pat >= beta {
                    return beta;
                }
                alpha = alpha.max(stand_pat);
            }
            Color::Black => {
                if stand_pat <= alpha {
                    return alpha;
                }
                beta = beta.min(stand_pat);
            }
        }
        if depth == 0 {
            return stand_pat;
        }

        for turn in gen_captures(board, color, &self.eval) {
            let mut trial = board.trial(turn.from, turn.delta, true);
            let child = stand_pat + turn.score + promotion_delta(&trial, trial.undo(), &self.eval);
            let v = self.quiescence(&mut trial, alpha, beta, color.opposite(), depth - 1, child);
            drop(trial);
            match color {
                Color::White => {
                    alpha = alpha.max(v);
                    if alpha >= beta {
                        return beta;
                    }
                }
                Color::Black => {
                    beta = beta.min(v);
                    if beta <= alpha {
                        return alpha;
                    }
                }
            }
        }
        match color {
            Color::White => alpha,
            Color::Black => beta,
        }
    }
}
