use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Coord};
use crate::error::{EngineError, Result};
use crate::search::driver::{Difficulty, Outcome, Solver};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub white: Difficulty,
    pub black: Difficulty,
    /// Caps the search depth of both sides when set.
    pub depth: Option<u32>,
    pub seed: u64,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 1, max_plies: 200, white: Difficulty::Medium, black: Difficulty::Medium, depth: None, seed: 42 }
    }
}

/// How a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteMates,
    BlackMates,
    Stalemate,
    /// Ply cap reached.
    Unfinished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: Difficulty,
    pub black: Difficulty,
    /// Moves in `Ab2-Ab3` notation, White first.
    pub moves: Vec<String>,
    pub result: GameResult,
    pub plies: usize,
}

impl GameRecord {
    /// Replays the moves from the start position, checking each is legal.
    pub fn replay(&self) -> Result<Board> {
        let mut board = Board::startpos();
        let mut color = Color::White;
        for mv in &self.moves {
            apply_notation(&mut board, color, mv)?;
            color = color.opposite();
        }
        Ok(board)
    }
}

/// Plays `from-to` for `color` if it is a legal move; pawns reaching the
/// far corner row become queens.
pub fn apply_notation(board: &mut Board, color: Color, mv: &str) -> Result<()> {
    let (from, to) = mv.split_once('-').ok_or_else(|| EngineError::IllegalMove(mv.to_string()))?;
    let from: Coord = from.parse()?;
    let to: Coord = to.parse()?;
    let delta = from.delta_to(to);
    if !board.legal_moves(color).contains(&(from, delta)) {
        return Err(EngineError::IllegalMove(mv.to_string()));
    }
    board.apply(from, delta, true);
    Ok(())
}

/// One game between two solvers from the start position.
pub fn play_game(white: &mut Solver, black: &mut Solver, max_plies: usize) -> Result<GameRecord> {
    let mut board = Board::startpos();
    let mut color = Color::White;
    let mut moves = Vec::new();
    let mut result = GameResult::Unfinished;

    while moves.len() < max_plies {
        let solver = match color {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        match solver.next_move(&mut board, color)? {
            Outcome::Move(turn) => {
                moves.push(turn.to_string());
                board.apply(turn.from, turn.delta, true);
            }
            Outcome::Checkmate => {
                result = match color {
                    Color::White => GameResult::BlackMates,
                    Color::Black => GameResult::WhiteMates,
                };
                break;
            }
            Outcome::Stalemate => {
                result = GameResult::Stalemate;
                break;
            }
        }
        color = color.opposite();
    }
    debug!("game over after {} plies: {:?}", moves.len(), result);
    let plies = moves.len();
    Ok(GameRecord { white: white.difficulty(), black: black.difficulty(), moves, result, plies })
}

/// Plays `params.games` games; `on_game` runs after each one.
pub fn generate_games<F: FnMut(&GameRecord)>(params: &SelfPlayParams, mut on_game: F) -> Result<Vec<GameRecord>> {
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let seed = params.seed.wrapping_add(gi as u64 * 2);
        let mut white = Solver::with_seed(params.white, seed);
        let mut black = Solver::with_seed(params.black, seed.wrapping_add(1));
        if let Some(d) = params.depth {
            white.set_depth(d);
            black.set_depth(d);
        }
        let record = play_game(&mut white, &mut black, params.max_plies)?;
        on_game(&record);
        games.push(record);
    }
    Ok(games)
}

/// Writes one JSON object per line.
pub fn write_records<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let f = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in f.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
