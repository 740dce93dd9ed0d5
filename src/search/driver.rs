use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color};
use crate::error::{EngineError, Result};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::eval::EvalWeights;
use crate::search::movegen::{gen_moves, Turn};
use crate::search::noise::choose_by_kind;

/// Easy mode plays random kinds while the opponent keeps at least this many pieces.
pub const EASY_MIN_ENEMIES: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Search settings for this level. Easy uses them only after its random
    /// phase ends.
    pub fn params(self) -> SearchParams {
        match self {
            Difficulty::Easy => SearchParams {
                depth: 2,
                quiescence_depth: 2,
                use_nullmove: false,
                use_lmr: false,
                ..SearchParams::default()
            },
            Difficulty::Medium => SearchParams::default(),
            Difficulty::Hard => SearchParams {
                depth: 4,
                quiescence_depth: 6,
                eval_refinements: true,
                ..SearchParams::default()
            },
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            n => Err(EngineError::UnknownDifficulty(n)),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    /// Accepts `0`..`2` or a name.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => match other.parse::<u8>() {
                Ok(n) => Difficulty::try_from(n),
                Err(_) => Err(EngineError::BadArgument(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// The driver's answer for the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Move(Turn),
    Checkmate,
    Stalemate,
}

pub struct Solver {
    difficulty: Difficulty,
    searcher: Searcher,
    rng: SmallRng,
}

impl Solver {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, difficulty.params(), SmallRng::from_entropy())
    }

    /// Reproducible easy-mode picks.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, difficulty.params(), SmallRng::seed_from_u64(seed))
    }

    /// Overrides the difficulty's preset search settings.
    pub fn with_params(difficulty: Difficulty, params: SearchParams, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(difficulty, params, rng)
    }

    fn with_rng(difficulty: Difficulty, params: SearchParams, rng: SmallRng) -> Self {
        Self { difficulty, searcher: Searcher::new(params, EvalWeights::default()), rng }
    }

    pub fn difficulty(&self) -> Difficulty { self.difficulty }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    pub fn set_depth(&mut self, depth: u32) { self.searcher.set_depth(depth); }

    /// Picks a move for `color`. The board is restored before returning.
    pub fn next_move(&mut self, board: &mut Board, color: Color) -> Result<Outcome> {
        board.validate_turn(color)?;
        if !board.has_legal_move(color) {
            let outcome = if board.is_checked(color) { Outcome::Checkmate } else { Outcome::Stalemate };
            info!("{:?} has no legal move: {:?}", color, outcome);
            return Ok(outcome);
        }

        if self.difficulty == Difficulty::Easy && board.count_alive(color.opposite()) >= EASY_MIN_ENEMIES {
            let moves = gen_moves(board, color, self.searcher.evaluator());
            if let Some(turn) = choose_by_kind(board, &moves, &mut self.rng) {
                debug!("easy pick {} out of {} moves", turn, moves.len());
                return Ok(Outcome::Move(turn));
            }
        }

        let result = self.searcher.search_with_params(board, color);
        match result.best {
            Some(turn) => {
                info!(
                    "{} plays {} (score {}, depth {}, nodes {})",
                    self.difficulty, turn, result.score, result.depth, result.nodes
                );
                Ok(Outcome::Move(turn))
            }
            None if board.is_checked(color) => Ok(Outcome::Checkmate),
            None => Ok(Outcome::Stalemate),
        }
    }
}
