use std::io::{self, BufRead, Write};

use crate::board::{Board, Color};
use crate::error::{EngineError, Result};
use crate::search::driver::{Difficulty, Outcome, Solver};
use crate::selfplay::apply_notation;

/// Line protocol state: the current game and the engine playing it.
pub struct Protocol {
    board: Board,
    side: Color,
    solver: Solver,
}

impl Default for Protocol {
    fn default() -> Self { Self::new(Difficulty::Medium) }
}

impl Protocol {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { board: Board::startpos(), side: Color::White, solver: Solver::new(difficulty) }
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn side_to_move(&self) -> Color { self.side }

    fn cmd_newgame(&mut self) {
        self.board = Board::startpos();
        self.side = Color::White;
    }

    /// `position startpos|placement <tokens..> [turn white|black] [moves m1 m2 ..]`
    fn cmd_position(&mut self, args: &str) -> Result<()> {
        let (setup, moves) = match args.split_once("moves") {
            Some((s, m)) => (s, m),
            None => (args, ""),
        };
        let mut tokens = setup.split_whitespace();
        let (mut board, mut side) = match tokens.next() {
            Some("startpos") => (Board::startpos(), Color::White),
            Some("placement") => {
                let rest: Vec<&str> = tokens.by_ref().collect();
                let (pieces, side) = match rest.iter().position(|&t| t == "turn") {
                    Some(i) => (&rest[..i], parse_color(rest.get(i + 1).copied().unwrap_or(""))?),
                    None => (&rest[..], Color::White),
                };
                (Board::from_placement(&pieces.join(" "))?, side)
            }
            other => return Err(EngineError::BadArgument(other.unwrap_or("").to_string())),
        };
        board.validate_turn(side)?;
        for mv in moves.split_whitespace() {
            apply_notation(&mut board, side, mv)?;
            side = side.opposite();
        }
        self.board = board;
        self.side = side;
        Ok(())
    }

    fn cmd_difficulty(&mut self, args: &str) -> Result<String> {
        let level: Difficulty = args.trim().parse()?;
        self.solver = Solver::new(level);
        Ok(format!("difficulty {}", level))
    }

    /// `go [depth N]`: answers with the chosen move, or `none` and the reason.
    fn cmd_go(&mut self, args: &str) -> Result<String> {
        let mut depth = None;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                let d = tokens.next().unwrap_or("");
                depth = Some(d.parse::<u32>().map_err(|_| EngineError::BadArgument(d.to_string()))?);
            }
        }
        // `depth N` applies to this search only
        let preset = self.solver.searcher().params().depth;
        if let Some(d) = depth {
            self.solver.set_depth(d);
        }
        let outcome = self.solver.next_move(&mut self.board, self.side);
        self.solver.set_depth(preset);
        let reply = match outcome? {
            Outcome::Move(turn) => format!("bestmove {}", turn),
            Outcome::Checkmate => "bestmove none checkmate".to_string(),
            Outcome::Stalemate => "bestmove none stalemate".to_string(),
        };
        Ok(reply)
    }

    fn cmd_show(&self) -> Vec<String> {
        let mut out: Vec<String> = self.board.to_string().lines().map(str::to_string).collect();
        out.push(format!("turn {}", color_name(self.side)));
        out
    }

    /// Handles one command line and returns the reply lines; `None` means quit.
    pub fn handle_line(&mut self, line: &str) -> Option<Vec<String>> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let reply = match cmd {
            "" => Ok(vec![]),
            "quit" => return None,
            "isready" => Ok(vec!["readyok".to_string()]),
            "newgame" => {
                self.cmd_newgame();
                Ok(vec![])
            }
            "position" => self.cmd_position(rest).map(|_| vec![]),
            "difficulty" => self.cmd_difficulty(rest).map(|s| vec![s]),
            "go" => self.cmd_go(rest).map(|s| vec![s]),
            "show" => Ok(self.cmd_show()),
            other => Err(EngineError::BadArgument(other.to_string())),
        };
        Some(reply.unwrap_or_else(|e| vec![format!("error {}", e)]))
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line?;
            match self.handle_line(&line) {
                Some(reply) => {
                    for l in reply {
                        writeln!(stdout, "{}", l)?;
                    }
                    stdout.flush()?;
                }
                None => break,
            }
        }
        Ok(())
    }
}

fn parse_color(s: &str) -> Result<Color> {
    match s {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        other => Err(EngineError::BadArgument(other.to_string())),
    }
}

fn color_name(c: Color) -> &'static str {
    match c {
        Color::White => "white",
        Color::Black => "black",
    }
}
