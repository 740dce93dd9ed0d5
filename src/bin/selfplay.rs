use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use raumbot::search::Difficulty;
use raumbot::selfplay::{generate_games, write_records, GameResult, SelfPlayParams};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "raumbot-selfplay", about = "Play engine-vs-engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    /// White's difficulty
    #[arg(long, default_value = "medium")]
    white: String,
    /// Black's difficulty
    #[arg(long, default_value = "easy")]
    black: String,
    /// Caps both sides' search depth
    #[arg(long)]
    depth: Option<u32>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/games.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let white: Difficulty = a.white.parse()?;
    let black: Difficulty = a.black.parse()?;
    let params = SelfPlayParams { games: a.games, max_plies: a.max_plies, white, black, depth: a.depth, seed: a.seed };

    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let mut tally = [0usize; 3];
    let games = generate_games(&params, |g| {
        match g.result {
            GameResult::WhiteMates => tally[0] += 1,
            GameResult::BlackMates => tally[1] += 1,
            GameResult::Stalemate | GameResult::Unfinished => tally[2] += 1,
        }
        bar.set_message(format!("{white} {} - {} {black}, {} other", tally[0], tally[1], tally[2]));
        bar.inc(1);
    })?;
    bar.finish();

    write_records(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
