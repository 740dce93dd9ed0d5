use crate::board::{Board, Color};

/// Counts legal move paths of length `depth`, applying and reverting moves
/// on `board` in place (no cloning).
pub fn perft(board: &mut Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for (from, delta) in board.legal_moves(color) {
        let mut child = board.trial(from, delta, true);
        nodes += if depth == 1 { 1 } else { perft(&mut child, color.opposite(), depth - 1) };
    }
    nodes
}

/// Per root move counts, in board scan order.
pub fn divide(board: &mut Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let mut out = Vec::new();
    for (from, delta) in board.legal_moves(color) {
        let mut child = board.trial(from, delta, true);
        let n = perft(&mut child, color.opposite(), depth.saturating_sub(1));
        out.push((format!("{}-{}", from, from + delta), n));
    }
    out
}
