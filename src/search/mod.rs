pub mod alphabeta;
pub mod driver;
pub mod eval;
pub mod movegen;
pub mod noise;
pub mod qsearch;

pub use alphabeta::{SearchParams, SearchResult, Searcher, Verdict};
pub use driver::{Difficulty, Outcome, Solver};
pub use eval::{EvalWeights, Evaluator, INF, MATE_SCORE};
pub use movegen::{gen_captures, gen_moves, Turn};
