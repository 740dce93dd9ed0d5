use std::fs;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::error::Result;
use crate::search::eval::{EvalWeights, Evaluator, DRAW_SCORE, INF, MATE_SCORE};
use crate::search::movegen::{gen_moves, promotion_delta, Turn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Deepest iteration of iterative deepening.
    pub depth: u32,
    /// Capture plies searched past the horizon.
    pub quiescence_depth: u32,
    pub use_nullmove: bool,
    pub null_reduction: u32,
    pub null_min_depth: u32,
    /// Null move is skipped once this few non-king pieces remain.
    pub endgame_pieces: usize,
    pub use_lmr: bool,
    pub lmr_min_depth: u32,
    /// Moves searched at full depth before reductions start.
    pub lmr_after_moves: usize,
    pub lmr_reduction: u32,
    pub use_aspiration: bool,
    pub aspiration_window: i32,
    pub eval_refinements: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            quiescence_depth: 4,
            use_nullmove: true,
            null_reduction: 2,
            null_min_depth: 3,
            endgame_pieces: 8,
            use_lmr: true,
            lmr_min_depth: 3,
            lmr_after_moves: 4,
            lmr_reduction: 1,
            use_aspiration: true,
            aspiration_window: 50,
            eval_refinements: false,
        }
    }
}

impl SearchParams {
    /// Reads a JSON object; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Plain minimax with alpha-beta: no null move, no reductions, no window.
    pub fn exhaustive(depth: u32) -> Self {
        Self {
            depth,
            use_nullmove: false,
            use_lmr: false,
            use_aspiration: false,
            ..Self::default()
        }
    }
}

/// What a single `solve` call found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Best move with its searched score.
    Move(Turn),
    /// The side to move is mated; the score is -sign(mated side) * INF.
    Checkmate(i32),
    Stalemate,
    /// Horizon reached, value from quiescence.
    Evaluated(i32),
    /// Pruned by the null-move probe.
    Cutoff(i32),
}

impl Verdict {
    pub fn score(&self) -> i32 {
        match *self {
            Verdict::Move(t) => t.score,
            Verdict::Checkmate(s) | Verdict::Evaluated(s) | Verdict::Cutoff(s) => s,
            Verdict::Stalemate => DRAW_SCORE,
        }
    }

    pub fn turn(&self) -> Option<Turn> {
        match *self {
            Verdict::Move(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best: Option<Turn>,
    pub score: i32,
    pub nodes: u64,
    /// Deepest iteration that completed.
    pub depth: u32,
}

pub struct Searcher {
    pub(crate) eval: Evaluator,
    params: SearchParams,
    pub(crate) nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchParams::default(), EvalWeights::default())
    }
}

impl Searcher {
    pub fn new(params: SearchParams, weights: EvalWeights) -> Self {
        let eval = Evaluator::new(weights, params.eval_refinements);
        Self { eval, params, nodes: 0 }
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    pub fn set_depth(&mut self, depth: u32) { self.params.depth = depth.max(1); }

    pub fn evaluator(&self) -> &Evaluator { &self.eval }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// One alpha-beta search of `depth` plies. `score` is the running
    /// estimate of the position, normally `evaluate(board)` at the root.
    /// White maximises, Black minimises. The board is left as it was found.
    pub fn solve(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        color: Color,
        score: i32,
    ) -> Verdict {
        self.search(board, depth, alpha, beta, color, score, 0, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        color: Color,
        score: i32,
        ply: u32,
        allow_null: bool,
    ) -> Verdict {
        self.nodes += 1;
        let in_check = board.is_checked(color);
        if !board.has_legal_move(color) {
            return if in_check {
                Verdict::Checkmate(-color.sign() * MATE_SCORE)
            } else {
                Verdict::Stalemate
            };
        }

        if depth == 0 {
            let stand = self.eval.evaluate(board);
            let q = self.quiescence(board, alpha, beta, color, self.params.quiescence_depth, stand);
            return Verdict::Evaluated(q);
        }

        // Null move: let the opponent move twice. Only tried when the running
        // estimate already reaches the bound for the mover.
        if allow_null
            && self.params.use_nullmove
            && ply > 0
            && depth >= self.params.null_min_depth
            && !in_check
            && board.non_king_count() > self.params.endgame_pieces
        {
            let reaches = match color {
                Color::White => score >= beta,
                Color::Black => score <= alpha,
            };
            if reaches {
                let mut probe = board.clone();
                let probe_score = self.eval.evaluate(&probe);
                let reduced = depth.saturating_sub(1 + self.params.null_reduction);
                let (a, b) = match color {
                    Color::White => (beta - 1, beta),
                    Color::Black => (alpha, alpha + 1),
                };
                let v = self
                    .search(&mut probe, reduced, a, b, color.opposite(), probe_score, ply + 1, false)
                    .score();
                let cut = match color {
                    Color::White => v >= beta,
                    Color::Black => v <= alpha,
                };
                if cut && v.abs() < MATE_SCORE {
                    return Verdict::Cutoff(v);
                }
            }
        }

        let moves = gen_moves(board, color, &self.eval);
        let opponent = color.opposite();
        let mut best: Option<Turn> = None;
        for (idx, turn) in moves.into_iter().enumerate() {
            let is_capture = board.piece_at(turn.to()).is_some();
            let mut trial = board.trial(turn.from, turn.delta, true);
            let child_score = score + turn.score + promotion_delta(&trial, trial.undo(), &self.eval);

            let full = depth - 1;
            let reduce = self.params.use_lmr
                && depth >= self.params.lmr_min_depth
                && idx >= self.params.lmr_after_moves
                && !is_capture
                && !in_check
                && !trial.is_checked(opponent);

            let mut v = if reduce {
                let shallow = full.saturating_sub(self.params.lmr_reduction);
                self.search(&mut trial, shallow, alpha, beta, opponent, child_score, ply + 1, true).score()
            } else {
                self.search(&mut trial, full, alpha, beta, opponent, child_score, ply + 1, true).score()
            };
            if reduce {
                let improves = match color {
                    Color::White => v > alpha,
                    Color::Black => v < beta,
                };
                if improves {
                    trace!("lmr re-search {} at depth {}", turn, depth);
                    v = self.search(&mut trial, full, alpha, beta, opponent, child_score, ply + 1, true).score();
                }
            }
            drop(trial);

            let candidate = Turn { score: v, ..turn };
            match color {
                Color::White => {
                    if best.map_or(true, |b| v > b.score) {
                        best = Some(candidate);
                    }
                    alpha = alpha.max(v);
                    if v >= beta {
                        break;
                    }
                }
                Color::Black => {
                    if best.map_or(true, |b| v < b.score) {
                        best = Some(candidate);
                    }
                    beta = beta.min(v);
                    if v <= alpha {
                        break;
                    }
                }
            }
        }

        match best {
            Some(t) => Verdict::Move(t),
            // has_legal_move said otherwise; treat as a plain evaluation
            None => Verdict::Evaluated(self.eval.evaluate(board)),
        }
    }

    /// A single full-window search at a fixed depth.
    pub fn search_depth(&mut self, board: &mut Board, color: Color, depth: u32) -> SearchResult {
        self.nodes = 0;
        let root = self.eval.evaluate(board);
        let verdict = self.solve(board, depth, -INF, INF, color, root);
        SearchResult { best: verdict.turn(), score: verdict.score(), nodes: self.nodes, depth }
    }

    /// Iterative deepening up to `params.depth`, each iteration inside an
    /// aspiration window around the previous score.
    pub fn search_with_params(&mut self, board: &mut Board, color: Color) -> SearchResult {
        self.nodes = 0;
        let root = self.eval.evaluate(board);
        let mut result = SearchResult { best: None, score: root, nodes: 0, depth: 0 };
        let mut last = root;

        for d in 1..=self.params.depth.max(1) {
            let verdict = if self.params.use_aspiration {
                let window = self.params.aspiration_window.max(1);
                let (alpha, beta) = (last - window, last + window);
                let first = self.solve(board, d, alpha, beta, color, root);
                let s = first.score();
                if s <= alpha {
                    trace!("depth {} failed low at {}, reopening alpha", d, s);
                    self.solve(board, d, -INF, beta, color, root)
                } else if s >= beta {
                    trace!("depth {} failed high at {}, reopening beta", d, s);
                    self.solve(board, d, alpha, INF, color, root)
                } else {
                    first
                }
            } else {
                self.solve(board, d, -INF, INF, color, root)
            };

            result.score = verdict.score();
            result.depth = d;
            match verdict.turn() {
                Some(t) => result.best = Some(t),
                None => {
                    // no move at the root: mate or stalemate
                    result.best = None;
                    break;
                }
            }
            last = result.score;
            debug!(
                "depth {} score {} nodes {} best {}",
                d,
                result.score,
                self.nodes,
                result.best.map(|t| t.to_string()).unwrap_or_else(|| "-".into())
            );
            if last.abs() >= MATE_SCORE {
                break;
            }
        }
        result.nodes = self.nodes;
        result
    }
}
