use clap::Parser;
use raumbot::board::{Board, Color};
use raumbot::search::{Difficulty, EvalWeights, SearchParams, Searcher};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "raumbot-bench", version, about = "Benchmark raumbot search speed")]
struct Args {
    /// Placement string or 'startpos'
    #[arg(long, default_value = "startpos")]
    placement: String,

    /// Side to move: 'w' or 'b'
    #[arg(long, default_value = "w")]
    color: String,

    /// Preset to start from
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// Fixed search depth (overrides the preset when > 0)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// JSON file with search settings
    #[arg(long)]
    params: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut board = if args.placement == "startpos" { Board::startpos() } else { Board::from_placement(&args.placement)? };
    let color = if args.color.starts_with('b') { Color::Black } else { Color::White };

    let difficulty: Difficulty = args.difficulty.parse()?;
    let mut p: SearchParams = match &args.params {
        Some(path) => SearchParams::from_json_file(path)?,
        None => difficulty.params(),
    };
    if args.depth > 0 { p.depth = args.depth; }
    let mut s = Searcher::new(p, EvalWeights::default());

    let t0 = Instant::now();
    let res = s.search_with_params(&mut board, color);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!(
        "bestmove={} score={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
        res.best.map(|t| t.to_string()).unwrap_or_else(|| "(none)".to_string()),
        res.score, res.depth, res.nodes, dt.as_secs_f64(), nps
    );
    Ok(())
}
