use pretty_assertions::assert_eq;
use raumbot::board::{Board, Color};
use raumbot::search::{gen_captures, gen_moves, Difficulty, Evaluator, Searcher, Solver};

const MIDDLEGAME: &str = "KAc1 RAa1 NBb2 QBc2 PBc3 PCd3 kEc5 rEe5 nDd4 qDc4 pDc3 pCb3";

#[test]
fn every_generated_move_reverts_exactly() {
    let mut b = Board::from_placement(MIDDLEGAME).unwrap();
    let before = b.clone();
    for color in [Color::White, Color::Black] {
        for t in gen_moves(&mut b, color, &Evaluator::default()) {
            let undo = b.apply(t.from, t.delta, true);
            b.revert(undo);
            assert_eq!(b, before, "{t}");
        }
    }
}

#[test]
fn generators_leave_the_board_alone() {
    let mut b = Board::from_placement(MIDDLEGAME).unwrap();
    let before = b.clone();
    let e = Evaluator::default();
    gen_moves(&mut b, Color::White, &e);
    gen_captures(&mut b, Color::Black, &e);
    assert_eq!(b, before);
}

#[test]
fn search_leaves_the_board_alone() {
    let mut b = Board::from_placement(MIDDLEGAME).unwrap();
    let before = b.clone();
    let mut s = Searcher::default();
    s.search_depth(&mut b, Color::White, 2);
    assert_eq!(b, before);
    s.qsearch_eval(&mut b, Color::Black);
    assert_eq!(b, before);

    let mut solver = Solver::with_seed(Difficulty::Medium, 5);
    solver.set_depth(2);
    solver.next_move(&mut b, Color::Black).unwrap();
    assert_eq!(b, before);
}
