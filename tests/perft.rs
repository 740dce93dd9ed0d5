use pretty_assertions::assert_eq;
use raumbot::board::{Board, Color};
use raumbot::perft::{divide, perft};

#[test]
fn perft_startpos_small_depths() {
    let mut b = Board::startpos();
    assert_eq!(perft(&mut b, Color::White, 1), 61);
    assert_eq!(perft(&mut b, Color::White, 2), 3615);
}

#[test]
fn perft_is_color_symmetric_on_startpos() {
    let mut b = Board::startpos();
    assert_eq!(perft(&mut b, Color::Black, 2), perft(&mut b, Color::White, 2));
}

#[test]
fn perft_restores_the_board() {
    let mut b = Board::from_placement("KAc1 RAa1 NBb2 QBc2 PBc3 PCd3 kEc5 rEe5 nDd4 qDc4 pDc3 pCb3").unwrap();
    let before = b.clone();
    perft(&mut b, Color::White, 3);
    assert_eq!(b, before);
}

#[test]
fn divide_sums_to_perft() {
    let mut b = Board::startpos();
    let parts = divide(&mut b, Color::White, 2);
    assert_eq!(parts.len(), 61);
    let total: u64 = parts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 3615);
}
