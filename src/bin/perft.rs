use clap::Parser;
use rayon::prelude::*;
use raumbot::board::{Board, Color};
use raumbot::perft::{divide, perft};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for raumbot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Placement string or "startpos"
    #[arg(value_name = "PLACEMENT", default_value = "startpos")]
    placement: String,
    /// Side to move: 'w' or 'b'
    #[arg(long, default_value = "w")]
    color: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print the count below each root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;
    let color = if args.color.starts_with('b') { Color::Black } else { Color::White };
    let mut base = if args.placement == "startpos" { Board::startpos() } else { Board::from_placement(&args.placement)? };
    base.validate_turn(color)?;

    if args.divide {
        for (mv, n) in divide(&mut base, color, depth) {
            println!("{mv}: {n}");
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            let mut b = base.clone();
            perft(&mut b, color, depth)
        } else {
            let root_moves = base.clone().legal_moves(color);
            root_moves
                .par_iter()
                .map(|&(from, delta)| {
                    let mut b = base.clone();
                    b.apply(from, delta, true);
                    perft(&mut b, color.opposite(), depth - 1)
                })
                .sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
