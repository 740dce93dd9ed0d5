use pretty_assertions::assert_eq;
use raumbot::board::{Board, Color};
use raumbot::search::{EvalWeights, SearchParams, Searcher, MATE_SCORE};
use raumbot::selfplay::apply_notation;

fn positions() -> Vec<(Board, Color)> {
    let mut opened = Board::startpos();
    apply_notation(&mut opened, Color::White, "Bb2-Bb3").unwrap();
    apply_notation(&mut opened, Color::Black, "Dc4-Dc3").unwrap();
    let mut replied = opened.clone();
    apply_notation(&mut replied, Color::White, "Bc2-Bc3").unwrap();
    vec![(Board::startpos(), Color::White), (opened, Color::White), (replied, Color::Black)]
}

/// A one-point window fails on almost every iteration, so both re-search
/// sides run. Late-move reduction with a zero reduction goes through the
/// reduce/re-search path without changing any value.
fn narrow(depth: u32) -> SearchParams {
    SearchParams {
        use_nullmove: false,
        use_lmr: true,
        lmr_min_depth: 1,
        lmr_after_moves: 0,
        lmr_reduction: 0,
        use_aspiration: true,
        aspiration_window: 1,
        ..SearchParams::exhaustive(depth)
    }
}

#[test]
fn deepening_with_a_narrow_window_matches_one_full_window_search() {
    for (board, color) in positions() {
        let mut full = board.clone();
        let mut reference = Searcher::new(SearchParams::exhaustive(2), EvalWeights::default());
        let want = reference.search_depth(&mut full, color, 2);

        let mut b = board.clone();
        let mut deepening = Searcher::new(narrow(2), EvalWeights::default());
        let got = deepening.search_with_params(&mut b, color);

        assert_eq!(got.depth, 2);
        assert!(want.score.abs() < MATE_SCORE);
        assert_eq!(got.score, want.score, "{}", board.placement());
        assert_eq!(got.best, want.best, "{}", board.placement());
        assert_eq!(b, board);
    }
}

#[test]
fn reduced_late_moves_still_answer_legally() {
    for (board, color) in positions() {
        let mut b = board.clone();
        let params = SearchParams { lmr_min_depth: 2, lmr_after_moves: 2, lmr_reduction: 1, ..narrow(2) };
        let mut s = Searcher::new(params, EvalWeights::default());
        let res = s.search_with_params(&mut b, color);
        let best = res.best.expect("a move");
        assert!(b.legal_moves(color).contains(&(best.from, best.delta)));
        assert!(res.score.abs() < MATE_SCORE);
        assert_eq!(b, board);
    }
}
