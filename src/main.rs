use anyhow::Result;
use clap::Parser;
use raumbot::board::{Board, Color};
use raumbot::protocol::Protocol;
use raumbot::search::{Difficulty, Outcome, SearchParams, Solver};
use raumbot::selfplay::apply_notation;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Raumschach against the engine", long_about = None)]
struct Args {
    /// Engine strength: easy, medium, hard (or 0, 1, 2)
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// Operation mode: 'h' for human vs engine, 's' for engine vs itself, 'p' for the line protocol
    #[arg(long, default_value = "h")]
    mode: String,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Starting placement, e.g. "KAc1 kEc5 QBc2"
    #[arg(long)]
    placement: Option<String>,

    /// JSON file overriding the difficulty's search settings
    #[arg(long)]
    params: Option<PathBuf>,

    /// Seed for easy-mode picks
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies
    #[arg(long, default_value_t = 400)]
    max_plies: usize,

    /// Print search timing
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn get_human_move(board: &mut Board, color: Color) -> Result<()> {
    loop {
        print!("Enter your move (e.g., Bb2-Bb3): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            anyhow::bail!("input closed");
        }
        match apply_notation(board, color, input.trim()) {
            Ok(()) => return Ok(()),
            Err(e) => println!("{}", e),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mode = args.mode.chars().next().unwrap_or('h');
    let difficulty: Difficulty = args.difficulty.parse()?;

    if mode == 'p' {
        let mut protocol = Protocol::new(difficulty);
        protocol.run_loop()?;
        return Ok(());
    }

    let human_color = parse_color(&args.color)?;
    let params = match &args.params {
        Some(path) => SearchParams::from_json_file(path)?,
        None => difficulty.params(),
    };
    let mut solver = Solver::with_params(difficulty, params, args.seed);

    let mut board = match &args.placement {
        Some(text) => Board::from_placement(text)?,
        None => Board::startpos(),
    };
    let mut color = Color::White;
    board.validate_turn(color)?;

    for _ in 0..args.max_plies {
        println!("\n{:?}'s turn", color);
        println!("{}", board);

        if mode == 'h' && color == human_color {
            if !board.has_legal_move(color) {
                let verdict = if board.is_checked(color) { "Checkmate" } else { "Stalemate" };
                println!("{}! Game over.", verdict);
                break;
            }
            get_human_move(&mut board, color)?;
        } else {
            let start_time = Instant::now();
            let outcome = solver.next_move(&mut board, color)?;
            if args.verbose {
                println!("elapsed: {:.2}s", start_time.elapsed().as_secs_f32());
            }
            match outcome {
                Outcome::Move(turn) => {
                    println!("Computer plays: {}", turn);
                    board.apply(turn.from, turn.delta, true);
                }
                Outcome::Checkmate => {
                    println!("\nCheckmate! {:?} wins!", color.opposite());
                    break;
                }
                Outcome::Stalemate => {
                    println!("\nGame is a stalemate!");
                    break;
                }
            }
        }
        color = color.opposite();
    }

    Ok(())
}
