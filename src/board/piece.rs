use std::fmt;

use super::coord::{Coord, Displacement};
use super::position::Board;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// +1 for White, -1 for Black. Scores are always White-positive.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Direction pawns of this color advance along rank and level.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Unicorn,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Unicorn,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Unicorn => 'u',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'u' => Some(PieceKind::Unicorn),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Ray directions for sliders, single steps for the king.
    fn directions(self) -> &'static [Displacement] {
        match self {
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Unicorn => &TRIAGONAL,
            PieceKind::Queen | PieceKind::King => &ALL_DIRECTIONS,
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::Pawn => &[],
        }
    }

    fn slides(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Unicorn | PieceKind::Queen)
    }

    /// Whether a slider of this kind moves along `dir` (a unit ray).
    pub(crate) fn slides_along(self, dir: Displacement) -> bool {
        match self {
            PieceKind::Queen => true,
            PieceKind::Rook => dir.axes() == 1,
            PieceKind::Bishop => dir.axes() == 2,
            PieceKind::Unicorn => dir.axes() == 3,
            _ => false,
        }
    }
}

const fn d(row: i8, col: i8, lvl: i8) -> Displacement {
    Displacement::new(row, col, lvl)
}

pub const ORTHOGONAL: [Displacement; 6] = [
    d(1, 0, 0), d(-1, 0, 0), d(0, 1, 0), d(0, -1, 0), d(0, 0, 1), d(0, 0, -1),
];

pub const DIAGONAL: [Displacement; 12] = [
    d(1, 1, 0), d(1, -1, 0), d(-1, 1, 0), d(-1, -1, 0),
    d(1, 0, 1), d(1, 0, -1), d(-1, 0, 1), d(-1, 0, -1),
    d(0, 1, 1), d(0, 1, -1), d(0, -1, 1), d(0, -1, -1),
];

pub const TRIAGONAL: [Displacement; 8] = [
    d(1, 1, 1), d(1, 1, -1), d(1, -1, 1), d(1, -1, -1),
    d(-1, 1, 1), d(-1, 1, -1), d(-1, -1, 1), d(-1, -1, -1),
];

pub const ALL_DIRECTIONS: [Displacement; 26] = [
    d(1, 0, 0), d(-1, 0, 0), d(0, 1, 0), d(0, -1, 0), d(0, 0, 1), d(0, 0, -1),
    d(1, 1, 0), d(1, -1, 0), d(-1, 1, 0), d(-1, -1, 0),
    d(1, 0, 1), d(1, 0, -1), d(-1, 0, 1), d(-1, 0, -1),
    d(0, 1, 1), d(0, 1, -1), d(0, -1, 1), d(0, -1, -1),
    d(1, 1, 1), d(1, 1, -1), d(1, -1, 1), d(1, -1, -1),
    d(-1, 1, 1), d(-1, 1, -1), d(-1, -1, 1), d(-1, -1, -1),
];

pub const KNIGHT_JUMPS: [Displacement; 24] = [
    d(2, 1, 0), d(2, -1, 0), d(-2, 1, 0), d(-2, -1, 0),
    d(1, 2, 0), d(-1, 2, 0), d(1, -2, 0), d(-1, -2, 0),
    d(2, 0, 1), d(2, 0, -1), d(-2, 0, 1), d(-2, 0, -1),
    d(1, 0, 2), d(-1, 0, 2), d(1, 0, -2), d(-1, 0, -2),
    d(0, 2, 1), d(0, 2, -1), d(0, -2, 1), d(0, -2, -1),
    d(0, 1, 2), d(0, -1, 2), d(0, 1, -2), d(0, -1, -2),
];

/// Quiet pawn steps: straight forward or straight up (for White).
pub fn pawn_pushes(color: Color) -> [Displacement; 2] {
    let f = color.forward();
    [d(f, 0, 0), d(0, 0, f)]
}

/// Pawn capture steps: forward or up, combined with one file sideways, or
/// forward and up together.
pub fn pawn_captures(color: Color) -> [Displacement; 5] {
    let f = color.forward();
    [d(f, 1, 0), d(f, -1, 0), d(0, 1, f), d(0, -1, f), d(f, 0, f)]
}

/// Capture steps of a pawn of either color: White's five, then Black's.
pub const PAWN_ZONE: [Displacement; 10] = [
    d(1, 1, 0), d(1, -1, 0), d(0, 1, 1), d(0, -1, 1), d(1, 0, 1),
    d(-1, 1, 0), d(-1, -1, 0), d(0, 1, -1), d(0, -1, -1), d(-1, 0, -1),
];

/// A piece owned by the board. Captured pieces are kept alive in undo
/// records with `alive == false` so they can be restored exactly.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub alive: bool,
    pub at: Coord,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, at: Coord) -> Self {
        Self { kind, color, alive: true, at }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind { self.kind }
    #[inline]
    pub fn color(&self) -> Color { self.color }
    #[inline]
    pub fn is_alive(&self) -> bool { self.alive }
    #[inline]
    pub fn location(&self) -> Coord { self.at }

    /// Pawn standing on its far rank and far level.
    pub fn can_promote(&self) -> bool {
        if self.kind != PieceKind::Pawn {
            return false;
        }
        match self.color {
            Color::White => self.at.row == 4 && self.at.lvl == 4,
            Color::Black => self.at.row == 0 && self.at.lvl == 0,
        }
    }

    /// Pseudo-legal displacements: the piece's movement shape clipped to the
    /// board and blocked by other pieces. Own-king safety is not checked here.
    pub fn legal_displacements(&self, board: &Board, include_non_captures: bool) -> Vec<Displacement> {
        let mut out = Vec::new();
        self.for_each_displacement(board, include_non_captures, |delta| out.push(delta));
        out
    }

    pub(crate) fn for_each_displacement<F: FnMut(Displacement)>(
        &self,
        board: &Board,
        include_non_captures: bool,
        mut f: F,
    ) {
        if !self.alive {
            return;
        }
        if self.kind == PieceKind::Pawn {
            if include_non_captures {
                for delta in pawn_pushes(self.color) {
                    let to = self.at + delta;
                    if to.on_board() && board.piece_at(to).is_none() {
                        f(delta);
                    }
                }
            }
            for delta in pawn_captures(self.color) {
                let to = self.at + delta;
                if !to.on_board() { continue; }
                if let Some(p) = board.piece_at(to) {
                    if p.color != self.color { f(delta); }
                }
            }
            return;
        }

        let slides = self.kind.slides();
        for &dir in self.kind.directions() {
            let mut step = dir;
            loop {
                let to = self.at + step;
                if !to.on_board() { break; }
                match board.piece_at(to) {
                    None => {
                        if include_non_captures { f(step); }
                    }
                    Some(p) => {
                        if p.color != self.color { f(step); }
                        break;
                    }
                }
                if !slides { break; }
                step = step + dir;
            }
        }
    }

    /// Every cell this piece attacks or defends, whatever occupies it.
    pub(crate) fn for_each_reach<F: FnMut(Coord)>(&self, board: &Board, f: F) {
        self.reach_with(board, &pawn_captures(self.color), f);
    }

    /// As `for_each_reach`, but a pawn covers `PAWN_ZONE`, so the cells do
    /// not depend on which way it faces.
    pub(crate) fn for_each_cover<F: FnMut(Coord)>(&self, board: &Board, f: F) {
        self.reach_with(board, &PAWN_ZONE, f);
    }

    fn reach_with<F: FnMut(Coord)>(&self, board: &Board, pawn_steps: &[Displacement], mut f: F) {
        if self.kind == PieceKind::Pawn {
            for &delta in pawn_steps {
                let to = self.at + delta;
                if to.on_board() { f(to); }
            }
            return;
        }
        let slides = self.kind.slides();
        for &dir in self.kind.directions() {
            let mut to = self.at + dir;
            while to.on_board() {
                f(to);
                if !slides || board.piece_at(to).is_some() { break; }
                to = to + dir;
            }
        }
    }

    pub fn letter(&self) -> char {
        let c = self.kind.letter();
        if self.color == Color::White { c.to_ascii_uppercase() } else { c }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.at)
    }
}
