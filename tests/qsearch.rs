use raumbot::board::{Board, Color};
use raumbot::search::eval::eval_cp;
use raumbot::search::{Searcher, INF};

#[test]
fn qsearch_improves_tactical_position() {
    // White rook can take the loose queen on Ae3
    let mut b = Board::from_placement("KAa1 RAa3 kEe5 qAe3").unwrap();
    let mut s = Searcher::default();
    let stand = eval_cp(&b);
    let qs = s.qsearch_eval(&mut b, Color::White);
    assert!(qs > stand + 500, "qsearch should see the queen capture: qs {qs} vs stand {stand}");
}

#[test]
fn qsearch_helps_black_too() {
    // same picture with the rook and queen swapped in color
    let mut b = Board::from_placement("KAa1 QAa3 kEe5 rAe3").unwrap();
    let mut s = Searcher::default();
    let stand = eval_cp(&b);
    let qs = s.qsearch_eval(&mut b, Color::Black);
    assert!(qs < stand - 500, "qs {qs} vs stand {stand}");
}

#[test]
fn qsearch_equals_standpat_without_captures() {
    let mut b = Board::from_placement("KAa1 kEe5").unwrap();
    let mut s = Searcher::default();
    let stand = eval_cp(&b);
    assert_eq!(s.qsearch_eval(&mut b, Color::White), stand);
    assert_eq!(s.qsearch_eval(&mut b, Color::Black), stand);
}

#[test]
fn qsearch_fails_hard_against_the_window() {
    let mut b = Board::from_placement("KAa1 RAa3 kEe5 qAe3").unwrap();
    let mut s = Searcher::default();
    let stand = eval_cp(&b);
    // stand pat already beats beta
    assert_eq!(s.quiescence(&mut b, -INF, stand - 1, Color::White, 4, stand), stand - 1);
    // capture result is clamped to beta
    assert_eq!(s.quiescence(&mut b, -INF, stand + 10, Color::White, 4, stand), stand + 10);
}

#[test]
fn capture_onto_the_far_corner_row_promotes() {
    // Pawn on De4 takes the rook on Ee5 and becomes a queen
    let mut b = Board::from_placement("KAa1 kAe1 PDe4 rEe5").unwrap();
    let before = b.clone();
    let mut s = Searcher::default();
    let stand = eval_cp(&b);
    let qs = s.qsearch_eval(&mut b, Color::White);
    assert!(qs > stand + 1000, "rook plus promotion: qs {qs} vs stand {stand}");
    assert_eq!(b, before);
}
