use pretty_assertions::assert_eq;
use raumbot::board::{Board, Color};
use raumbot::search::{gen_moves, Evaluator};

#[test]
fn generation_is_deterministic() {
    let mut b = Board::from_placement("KAc1 RAa1 NBb2 QBc2 PBc3 PCd3 kEc5 rEe5 nDd4 qDc4 pDc3 pCb3").unwrap();
    let e = Evaluator::default();
    for color in [Color::White, Color::Black] {
        let first = gen_moves(&mut b, color, &e);
        let second = gen_moves(&mut b, color, &e);
        assert_eq!(first, second);
    }
}

#[test]
fn captures_precede_quiet_moves() {
    let mut b = Board::from_placement("KAc1 RAa1 NBb2 QBc2 PBc3 PCd3 kEc5 rEe5 nDd4 qDc4 pDc3 pCb3").unwrap();
    let e = Evaluator::default();
    let moves = gen_moves(&mut b, Color::White, &e);
    let first_quiet = moves.iter().position(|t| b.piece_at(t.to()).is_none()).unwrap_or(moves.len());
    assert!(moves[first_quiet..].iter().all(|t| b.piece_at(t.to()).is_none()));
    assert!(first_quiet > 0, "position has captures");
    let values: Vec<i32> = moves[..first_quiet]
        .iter()
        .map(|t| e.weights().weight(b.piece_at(t.to()).unwrap().kind))
        .collect();
    assert!(values.windows(2).all(|w| w[0] >= w[1]), "{values:?}");
}

#[test]
fn quiet_moves_follow_the_movers_preference() {
    let mut b = Board::startpos();
    let e = Evaluator::default();
    let white = gen_moves(&mut b, Color::White, &e);
    assert!(white.windows(2).all(|w| w[0].score >= w[1].score));
    let black = gen_moves(&mut b, Color::Black, &e);
    assert!(black.windows(2).all(|w| w[0].score <= w[1].score));
}
