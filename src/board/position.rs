use std::fmt;
use std::ops::{Deref, DerefMut};

use super::coord::{Coord, Displacement, BOARD_SIZE, CELLS};
use super::piece::{pawn_captures, Color, Piece, PieceKind, ALL_DIRECTIONS, KNIGHT_JUMPS, PAWN_ZONE};
use crate::error::{EngineError, Result};

/// Back-rank layouts of the Raumschach start position, files a..e.
const KING_RANK: [PieceKind; 5] =
    [PieceKind::Rook, PieceKind::Knight, PieceKind::King, PieceKind::Knight, PieceKind::Rook];
const QUEEN_RANK: [PieceKind; 5] =
    [PieceKind::Bishop, PieceKind::Unicorn, PieceKind::Queen, PieceKind::Bishop, PieceKind::Unicorn];

/// The cube: 125 cells, each empty or owning exactly one piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
    kings: [Option<Coord>; 2],
}

/// Everything needed to take back one `apply`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub from: Coord,
    pub to: Coord,
    /// The moving piece as it stood before the move (a pawn if it promoted).
    pub moved: Piece,
    /// The captured piece, marked dead.
    pub captured: Option<Piece>,
    pub promoted: bool,
}

impl Default for Board {
    fn default() -> Self { Self::startpos() }
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [None; CELLS], kings: [None, None] }
    }

    /// Raumschach start: White on levels A/B ranks 1-2, Black on levels D/E ranks 4-5.
    pub fn startpos() -> Self {
        let mut b = Self::empty();
        for col in 0..BOARD_SIZE {
            let c = col as usize;
            b.put(Piece::new(KING_RANK[c], Color::White, Coord::new(0, col, 0)));
            b.put(Piece::new(QUEEN_RANK[c], Color::White, Coord::new(0, col, 1)));
            b.put(Piece::new(PieceKind::Pawn, Color::White, Coord::new(1, col, 0)));
            b.put(Piece::new(PieceKind::Pawn, Color::White, Coord::new(1, col, 1)));
            b.put(Piece::new(KING_RANK[c], Color::Black, Coord::new(4, col, 4)));
            b.put(Piece::new(QUEEN_RANK[c], Color::Black, Coord::new(4, col, 3)));
            b.put(Piece::new(PieceKind::Pawn, Color::Black, Coord::new(3, col, 4)));
            b.put(Piece::new(PieceKind::Pawn, Color::Black, Coord::new(3, col, 3)));
        }
        b
    }

    /// Builds a board from whitespace separated tokens such as `KAc1 qEc5 PBb2`:
    /// piece letter (uppercase White) followed by a square.
    pub fn from_placement(text: &str) -> Result<Self> {
        let mut b = Self::empty();
        for tok in text.split_whitespace() {
            let mut chars = tok.chars();
            let letter = chars.next().ok_or_else(|| EngineError::BadPlacement(tok.to_string()))?;
            let kind = PieceKind::from_letter(letter).ok_or_else(|| EngineError::BadPlacement(tok.to_string()))?;
            let color = if letter.is_ascii_uppercase() { Color::White } else { Color::Black };
            let at: Coord = chars.as_str().parse()?;
            if b.cells[at.index()].is_some() {
                return Err(EngineError::DoubleOccupancy(at.to_string()));
            }
            if kind == PieceKind::King && b.kings[color.idx()].is_some() {
                return Err(EngineError::DuplicateKing(color));
            }
            b.put(Piece::new(kind, color, at));
        }
        b.validate()?;
        Ok(b)
    }

    /// Space separated placement tokens, the inverse of `from_placement`.
    pub fn placement(&self) -> String {
        self.occupied().map(|p| p.to_string()).collect::<Vec<_>>().join(" ")
    }

    /// The search requires exactly one king per side.
    pub fn validate(&self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .occupied()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            match kings {
                0 => return Err(EngineError::MissingKing(color)),
                1 => {}
                _ => return Err(EngineError::DuplicateKing(color)),
            }
        }
        Ok(())
    }

    /// `validate` plus the turn rule: the side that just moved cannot have
    /// left its own king in check.
    pub fn validate_turn(&self, to_move: Color) -> Result<()> {
        self.validate()?;
        if self.is_checked(to_move.opposite()) {
            return Err(EngineError::OpponentInCheck(to_move));
        }
        Ok(())
    }

    /// Places a piece, replacing whatever stood there. Setup only.
    pub fn put(&mut self, piece: Piece) {
        if piece.kind == PieceKind::King {
            self.kings[piece.color.idx()] = Some(piece.at);
        }
        self.cells[piece.at.index()] = Some(piece);
    }

    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.cells[at.index()].as_ref()
    }

    /// Location of `color`'s king. Panics on a board that failed `validate`.
    #[inline]
    pub fn king_location(&self, color: Color) -> Coord {
        match self.kings[color.idx()] {
            Some(c) => c,
            None => panic!("{color:?} king missing; validate the board before searching"),
        }
    }

    pub fn occupied(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.occupied().filter(move |p| p.color == color && p.alive)
    }

    pub fn count_alive(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Pieces other than kings, both sides.
    pub fn non_king_count(&self) -> usize {
        self.occupied().filter(|p| p.kind != PieceKind::King).count()
    }

    /// Whether any piece of color `by` attacks `target`. Scans outwards from
    /// the target along every ray and knight jump.
    pub fn is_attacked(&self, target: Coord, by: Color) -> bool {
        self.attacked(target, by, None, &pawn_captures(by))
    }

    /// As `is_attacked`, with the cell `vacated` treated as empty and `by`'s
    /// pawns covering `PAWN_ZONE`.
    pub fn is_covered_vacating(&self, target: Coord, by: Color, vacated: Coord) -> bool {
        self.attacked(target, by, Some(vacated), &PAWN_ZONE)
    }

    fn attacked(&self, target: Coord, by: Color, vacated: Option<Coord>, pawn_steps: &[Displacement]) -> bool {
        for &jump in KNIGHT_JUMPS.iter() {
            let from = target + jump;
            if from.on_board() {
                if let Some(p) = self.piece_at(from) {
                    if p.color == by && p.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }
        for &dir in ALL_DIRECTIONS.iter() {
            let mut at = target + dir;
            let mut dist = 1;
            while at.on_board() {
                if Some(at) == vacated {
                    at = at + dir;
                    dist += 1;
                    continue;
                }
                if let Some(p) = self.piece_at(at) {
                    if p.color == by {
                        let hit = match p.kind {
                            PieceKind::King => dist == 1,
                            PieceKind::Pawn => dist == 1 && pawn_steps.contains(&-dir),
                            PieceKind::Knight => false,
                            slider => slider.slides_along(dir),
                        };
                        if hit {
                            return true;
                        }
                    }
                    break;
                }
                at = at + dir;
                dist += 1;
            }
        }
        false
    }

    #[inline]
    pub fn is_checked(&self, color: Color) -> bool {
        self.is_attacked(self.king_location(color), color.opposite())
    }

    pub fn is_checkmated(&mut self, color: Color) -> bool {
        self.is_checked(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemated(&mut self, color: Color) -> bool {
        !self.is_checked(color) && !self.has_legal_move(color)
    }

    /// Moves the piece on `from` by `delta`. A captured piece is marked dead
    /// and kept in the returned record. With `promote`, a pawn reaching its
    /// promotion cell becomes a queen.
    pub fn apply(&mut self, from: Coord, delta: Displacement, promote: bool) -> Undo {
        let to = from + delta;
        let moved = match self.cells[from.index()].take() {
            Some(p) => p,
            None => panic!("no piece on {from} to move"),
        };
        let captured = self.cells[to.index()].take().map(|mut p| {
            p.alive = false;
            p
        });
        let mut piece = moved;
        piece.at = to;
        if piece.kind == PieceKind::King {
            self.kings[piece.color.idx()] = Some(to);
        }
        if let Some(c) = captured {
            if c.kind == PieceKind::King {
                self.kings[c.color.idx()] = None;
            }
        }
        self.cells[to.index()] = Some(piece);
        let promoted = promote && piece.can_promote() && self.promote(to, PieceKind::Queen).is_some();
        Undo { from, to, moved, captured, promoted }
    }

    /// Exact inverse of `apply`: restores the mover (including a promoted
    /// pawn) and revives the captured piece.
    pub fn revert(&mut self, undo: Undo) {
        self.cells[undo.from.index()] = Some(undo.moved);
        if undo.moved.kind == PieceKind::King {
            self.kings[undo.moved.color.idx()] = Some(undo.from);
        }
        match undo.captured {
            Some(mut p) => {
                p.alive = true;
                if p.kind == PieceKind::King {
                    self.kings[p.color.idx()] = Some(p.at);
                }
                self.cells[undo.to.index()] = Some(p);
            }
            None => self.cells[undo.to.index()] = None,
        }
    }

    /// Replaces the pawn on `at` by a piece of `kind`, returning the pawn.
    pub fn promote(&mut self, at: Coord, kind: PieceKind) -> Option<Piece> {
        let slot = self.cells[at.index()].as_mut()?;
        if slot.kind != PieceKind::Pawn {
            return None;
        }
        let pawn = *slot;
        slot.kind = kind;
        Some(pawn)
    }

    /// Applies a move and hands back a guard that reverts it when dropped.
    pub fn trial(&mut self, from: Coord, delta: Displacement, promote: bool) -> Trial<'_> {
        let undo = self.apply(from, delta, promote);
        Trial { board: self, undo }
    }

    /// Calls `f` for every (origin, displacement) of `color` that does not
    /// leave its own king in check. Returning `true` from `f` stops early.
    pub fn for_each_legal<F: FnMut(&mut Board, Coord, Displacement) -> bool>(
        &mut self,
        color: Color,
        include_non_captures: bool,
        mut f: F,
    ) -> bool {
        for idx in 0..CELLS {
            let piece = match self.cells[idx] {
                Some(p) if p.color == color && p.alive => p,
                _ => continue,
            };
            for delta in piece.legal_displacements(self, include_non_captures) {
                let undo = self.apply(piece.at, delta, false);
                let safe = !self.is_checked(color);
                self.revert(undo);
                if safe && f(self, piece.at, delta) {
                    return true;
                }
            }
        }
        false
    }

    pub fn has_legal_move(&mut self, color: Color) -> bool {
        self.for_each_legal(color, true, |_, _, _| true)
    }

    /// Legal (origin, displacement) pairs in board scan order.
    pub fn legal_moves(&mut self, color: Color) -> Vec<(Coord, Displacement)> {
        let mut out = Vec::new();
        self.for_each_legal(color, true, |_, from, delta| {
            out.push((from, delta));
            false
        });
        out
    }

    /// Point reflection of the geometry with colors swapped: the same
    /// position seen from the other side.
    pub fn mirrored(&self) -> Self {
        let mut b = Self::empty();
        for p in self.occupied() {
            let mut q = *p;
            q.at = p.at.mirrored();
            q.color = p.color.opposite();
            b.put(q);
        }
        b
    }

    /// Colors swapped, geometry untouched.
    pub fn color_flipped(&self) -> Self {
        let mut b = Self::empty();
        for p in self.occupied() {
            let mut q = *p;
            q.color = p.color.opposite();
            b.put(q);
        }
        b
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lvl in (0..BOARD_SIZE).rev() {
            writeln!(f, "Level {}", (b'A' + lvl as u8) as char)?;
            for row in (0..BOARD_SIZE).rev() {
                write!(f, " {} ", row + 1)?;
                for col in 0..BOARD_SIZE {
                    let c = self.piece_at(Coord::new(row, col, lvl)).map_or('.', |p| p.letter());
                    write!(f, "{c} ")?;
                }
                writeln!(f)?;
            }
            writeln!(f, "   a b c d e")?;
        }
        Ok(())
    }
}

/// A move applied to the board for the lifetime of the guard. Nested trials
/// borrow the guard, so they are always reverted innermost first.
pub struct Trial<'a> {
    board: &'a mut Board,
    undo: Undo,
}

impl Trial<'_> {
    pub fn undo(&self) -> &Undo { &self.undo }
}

impl Deref for Trial<'_> {
    type Target = Board;
    fn deref(&self) -> &Board { self.board }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board { self.board }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.revert(self.undo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn startpos_has_twenty_pieces_each() {
        let b = Board::startpos();
        assert_eq!(b.count_alive(Color::White), 20);
        assert_eq!(b.count_alive(Color::Black), 20);
        assert_eq!(b.king_location(Color::White), "Ac1".parse().unwrap());
        assert_eq!(b.king_location(Color::Black), "Ec5".parse().unwrap());
        assert!(b.validate().is_ok());
        assert!(!b.is_checked(Color::White));
        assert!(!b.is_checked(Color::Black));
    }

    #[test]
    fn king_left_en_prise_fails_turn_validation() {
        let b = Board::from_placement("KAa1 RAa5 kAa3 pEe4").unwrap();
        assert!(b.validate().is_ok());
        assert!(matches!(b.validate_turn(Color::White), Err(EngineError::OpponentInCheck(Color::White))));
        assert!(b.validate_turn(Color::Black).is_ok());
    }

    #[test]
    fn placement_roundtrips() {
        let b = Board::startpos();
        let again = Board::from_placement(&b.placement()).unwrap();
        assert_eq!(again, b);
    }

    #[test]
    fn placement_requires_both_kings() {
        assert!(matches!(Board::from_placement("KAa1"), Err(EngineError::MissingKing(Color::Black))));
        assert!(matches!(
            Board::from_placement("KAa1 kEe5 KCc3"),
            Err(EngineError::DuplicateKing(Color::White))
        ));
        assert!(matches!(Board::from_placement("KAa1 kAa1"), Err(EngineError::DoubleOccupancy(_))));
        assert!(matches!(Board::from_placement("XAa1"), Err(EngineError::BadPlacement(_))));
    }

    #[test]
    fn apply_and_revert_restore_capture_and_promotion() {
        let mut b = Board::from_placement("KAa1 kEa1 PDe5").unwrap();
        let before = b.clone();
        let from: Coord = "De5".parse().unwrap();
        let undo = b.apply(from, Displacement::new(0, 0, 1), true);
        assert!(undo.captured.is_none());
        assert!(undo.promoted);
        assert_eq!(b.piece_at("Ee5".parse().unwrap()).map(|p| p.kind), Some(PieceKind::Queen));
        assert!(b.piece_at(from).is_none());
        b.revert(undo);
        assert_eq!(b, before);

        // captures on the promotion cell along (f, 0, f)
        let mut b = Board::from_placement("KAa1 kEa1 PDe4 rEe5").unwrap();
        let before = b.clone();
        let from: Coord = "De4".parse().unwrap();
        let undo = b.apply(from, Displacement::new(1, 0, 1), true);
        let captured = undo.captured.expect("rook captured");
        assert!(!captured.alive);
        assert_eq!(b.piece_at("Ee5".parse().unwrap()).map(|p| p.kind), Some(PieceKind::Queen));
        b.revert(undo);
        assert_eq!(b, before);
    }

    #[test]
    fn trial_guard_reverts_on_drop() {
        let mut b = Board::startpos();
        let before = b.clone();
        {
            let from: Coord = "Ab2".parse().unwrap();
            let mut t = b.trial(from, Displacement::new(1, 0, 0), true);
            assert!(t.piece_at("Ab3".parse().unwrap()).is_some());
            let inner_from: Coord = "Dc4".parse().unwrap();
            let inner = t.trial(inner_from, Displacement::new(-1, 0, 0), true);
            assert!(inner.piece_at("Dc3".parse().unwrap()).is_some());
        }
        assert_eq!(b, before);
    }

    #[test]
    fn reverse_ray_attack_matches_forward_generation() {
        let b = Board::startpos();
        for target in Coord::all() {
            for color in [Color::White, Color::Black] {
                let forward = b.pieces(color).any(|p| {
                    let mut hit = false;
                    p.for_each_reach(&b, |c| hit |= c == target);
                    hit
                });
                assert_eq!(b.is_attacked(target, color), forward, "{target} by {color:?}");
            }
        }
    }

    #[test]
    fn pawn_cover_matches_forward_generation() {
        let b = Board::from_placement("KAa1 kEe5 PBb2 PCc3 pDd4 pCb3").unwrap();
        for target in Coord::all() {
            for color in [Color::White, Color::Black] {
                let forward = b.pieces(color).any(|p| {
                    let mut hit = false;
                    p.for_each_cover(&b, |c| hit |= c == target);
                    hit
                });
                let vacated = b.king_location(color.opposite());
                if target == vacated {
                    continue;
                }
                assert_eq!(b.is_covered_vacating(target, color, vacated), forward, "{target} by {color:?}");
            }
        }
    }

    #[test]
    fn mirrored_swaps_sides() {
        let b = Board::startpos();
        assert_eq!(b.mirrored(), b);
    }
}
