use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, PieceKind};
use crate::search::movegen::Turn;

/// Easy-mode pick: shuffle the legal moves, choose one of the piece kinds
/// that can move uniformly at random, then play the first shuffled move of
/// that kind. Pawns are no likelier than any other kind.
pub fn choose_by_kind<R: Rng + ?Sized>(board: &Board, moves: &[Turn], rng: &mut R) -> Option<Turn> {
    if moves.is_empty() {
        return None;
    }
    let mut pool = moves.to_vec();
    pool.shuffle(rng);

    let kind_of = |t: &Turn| board.piece_at(t.from).map(|p| p.kind);
    let mut kinds: Vec<PieceKind> = pool.iter().filter_map(kind_of).collect();
    kinds.sort();
    kinds.dedup();
    let kind = *kinds.choose(rng)?;
    pool.into_iter().find(|t| kind_of(t) == Some(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::search::eval::Evaluator;
    use crate::search::movegen::gen_moves;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn empty_move_list_yields_none() {
        let board = Board::startpos();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(choose_by_kind(&board, &[], &mut rng).is_none());
    }

    #[test]
    fn picks_are_legal_and_cover_several_kinds() {
        let mut board = Board::startpos();
        let moves = gen_moves(&mut board, Color::White, &Evaluator::default());
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = Vec::new();
        for _ in 0..40 {
            let t = choose_by_kind(&board, &moves, &mut rng).unwrap();
            assert!(moves.contains(&t));
            let kind = board.piece_at(t.from).unwrap().kind;
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert!(seen.len() >= 3, "{seen:?}");
    }
}
