use raumbot::board::{Board, Color};
use raumbot::search::{gen_captures, gen_moves, Evaluator};

fn assert_all_legal(placement: &str) {
    let mut b = Board::from_placement(placement).unwrap();
    let e = Evaluator::default();
    for color in [Color::White, Color::Black] {
        let moves = gen_moves(&mut b, color, &e);
        let reference = b.legal_moves(color);
        assert_eq!(moves.len(), reference.len(), "{placement} {color:?}");
        for t in moves {
            let trial = b.trial(t.from, t.delta, true);
            assert!(!trial.is_checked(color), "{t} leaves the {color:?} king in check");
        }
        for t in gen_captures(&mut b, color, &e) {
            assert!(b.piece_at(t.to()).is_some_and(|p| p.color != color), "{t} is not a capture");
        }
    }
}

#[test]
fn startpos_moves_are_legal() {
    assert_all_legal(&Board::startpos().placement());
}

#[test]
fn pinned_pieces_stay_put() {
    // White knight on Ac2 is pinned against its king by the rook on Ac5
    let mut b = Board::from_placement("KAc1 NAc2 rAc5 kEe5").unwrap();
    let moves = gen_moves(&mut b, Color::White, &Evaluator::default());
    assert!(moves.iter().all(|t| t.from.to_string() != "Ac2"));
    assert_all_legal("KAc1 NAc2 rAc5 kEe5");
}

#[test]
fn check_must_be_answered() {
    // Black queen on Cc3 checks the White king on Aa1 along the triagonal
    assert_all_legal("KAa1 RBe1 NAd2 qCc3 kEe5");
    let mut b = Board::from_placement("KAa1 RBe1 NAd2 qCc3 kEe5").unwrap();
    assert!(b.is_checked(Color::White));
    for (from, delta) in b.legal_moves(Color::White) {
        let trial = b.trial(from, delta, true);
        assert!(!trial.is_checked(Color::White));
    }
}
