use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Coord, Piece, PieceKind, CELLS};

// Scores are White-positive. A forced mate is worth exactly INF.
pub const INF: i32 = 10_000_000;
pub const MATE_SCORE: i32 = INF;
pub const DRAW_SCORE: i32 = 0;

/// Static bonus per cell, signed by the occupant's color. Symmetric under the
/// rank/level point reflection so mirrored positions score as exact negatives.
#[rustfmt::skip]
const POSITIONAL: [[[i32; 5]; 5]; 5] = [
    // rank 1
    [[0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0]],
    // rank 2
    [[1, 3, 4, 3, 1], [2, 4, 6, 4, 2], [3, 5, 8, 5, 3], [2, 4, 6, 4, 2], [1, 3, 4, 3, 1]],
    // rank 3
    [[2, 4, 6, 4, 2], [3, 6, 9, 6, 3], [4, 8, 12, 8, 4], [3, 6, 9, 6, 3], [2, 4, 6, 4, 2]],
    // rank 4
    [[1, 3, 4, 3, 1], [2, 4, 6, 4, 2], [3, 5, 8, 5, 3], [2, 4, 6, 4, 2], [1, 3, 4, 3, 1]],
    // rank 5
    [[0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 0, 0, 0]],
];

/// Tunable scoring constants. Everything here is read-only during a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub unicorn: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
    /// Per legal king move.
    pub king_mobility: i32,
    /// Per enemy piece in the 3x3x3 block around the king.
    pub king_danger: i32,
    /// Per level and per file where a side reaches more cells than the other.
    pub level_control: i32,
    /// Per empty cell a side reaches.
    pub space: i32,
    /// Per own piece defended by another.
    pub coordination: i32,
    /// Attacked enemy material is divided by this.
    pub threat_divisor: i32,
    /// Per enemy piece attacked from two or more levels.
    pub multi_layer_bonus: i32,
    /// Refined: per cell of the central 3x3x3 cube a side reaches.
    pub cube_control: i32,
    /// Refined: undefended attacked material is divided by this.
    pub hanging_divisor: i32,
    /// Refined: per extra pawn sharing a file on one level.
    pub doubled_pawn: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 320,
            bishop: 330,
            unicorn: 280,
            rook: 500,
            queen: 900,
            king: 2000,
            king_mobility: 2,
            king_danger: 15,
            level_control: 10,
            space: 1,
            coordination: 4,
            threat_divisor: 10,
            multi_layer_bonus: 8,
            cube_control: 2,
            hanging_divisor: 4,
            doubled_pawn: 12,
        }
    }
}

impl EvalWeights {
    #[inline]
    pub fn weight(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Unicorn => self.unicorn,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

/// Centre affinity: 0 in the middle, more negative towards the edges. Level
/// distance counts most, then rank, then file.
#[inline]
pub fn distance(c: Coord) -> i32 {
    -((c.row as i32 - 2).abs() * 3 + (c.col as i32 - 2).abs() + (c.lvl as i32 - 2).abs() * 5)
}

/// Who reaches which cell, for one side.
struct Reach {
    count: [u8; CELLS],
    /// Bit per level the attackers of a cell stand on.
    levels: [u8; CELLS],
}

impl Reach {
    fn build(board: &Board, color: Color) -> Self {
        let mut r = Reach { count: [0; CELLS], levels: [0; CELLS] };
        for p in board.pieces(color) {
            let bit = 1u8 << p.at.lvl;
            p.for_each_cover(board, |c| {
                let i = c.index();
                r.count[i] = r.count[i].saturating_add(1);
                r.levels[i] |= bit;
            });
        }
        r
    }

    #[inline]
    fn hits(&self, c: Coord) -> bool { self.count[c.index()] > 0 }
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    weights: EvalWeights,
    refinements: bool,
}

impl Evaluator {
    pub fn new(weights: EvalWeights, refinements: bool) -> Self {
        Self { weights, refinements }
    }

    pub fn weights(&self) -> &EvalWeights { &self.weights }

    pub fn refinements(&self) -> bool { self.refinements }

    /// Material plus centre affinity, signed by color. Kings prefer the edges.
    pub fn piece_score(&self, piece: &Piece) -> i32 {
        if !piece.alive {
            return 0;
        }
        let w = self.weights.weight(piece.kind);
        let d = distance(piece.at);
        let v = if piece.kind == PieceKind::King { w - d } else { w + d };
        v * piece.color.sign()
    }

    /// The local part of the evaluation that moves with a piece: piece score
    /// plus the positional table. Search deltas are differences of this.
    #[inline]
    pub fn placement(&self, piece: &Piece) -> i32 {
        if !piece.alive {
            return 0;
        }
        let c = piece.at;
        self.piece_score(piece) + POSITIONAL[c.row as usize][c.col as usize][c.lvl as usize] * piece.color.sign()
    }

    /// Full static evaluation, White-positive. Reads the board only; both
    /// kings must be present.
    pub fn evaluate(&self, board: &Board) -> i32 {
        let mut score: i32 = board.occupied().map(|p| self.placement(p)).sum();

        let white = Reach::build(board, Color::White);
        let black = Reach::build(board, Color::Black);

        score += self.side_terms(board, Color::White, &white, &black);
        score -= self.side_terms(board, Color::Black, &black, &white);
        score += self.control_terms(&white, &black);
        score
    }

    fn side_terms(&self, board: &Board, color: Color, own: &Reach, enemy: &Reach) -> i32 {
        let w = &self.weights;
        let mut s = 0;

        s += w.king_mobility * king_mobility(board, color) as i32;
        s -= w.king_danger * king_danger(board, color) as i32;

        let mut space = 0;
        for c in Coord::all() {
            if board.piece_at(c).is_none() && own.hits(c) {
                space += 1;
            }
        }
        s += w.space * space;

        let mut defended = 0;
        for p in board.pieces(color) {
            if p.kind != PieceKind::King && own.hits(p.at) {
                defended += 1;
            }
        }
        s += w.coordination * defended;

        let mut threatened = 0;
        let mut layered = 0;
        for p in board.pieces(color.opposite()) {
            if p.kind == PieceKind::King || !own.hits(p.at) {
                continue;
            }
            threatened += w.weight(p.kind);
            if own.levels[p.at.index()].count_ones() >= 2 {
                layered += 1;
            }
        }
        if w.threat_divisor > 0 {
            s += threatened / w.threat_divisor;
        }
        s += w.multi_layer_bonus * layered;

        if self.refinements {
            s += self.refined_terms(board, color, own, enemy);
        }
        s
    }

    /// Extra terms used at the hardest difficulty.
    fn refined_terms(&self, board: &Board, color: Color, own: &Reach, enemy: &Reach) -> i32 {
        let w = &self.weights;
        let mut s = 0;

        let mut cube = 0;
        for c in Coord::all() {
            let centre = (1..=3).contains(&c.row) && (1..=3).contains(&c.col) && (1..=3).contains(&c.lvl);
            if centre && own.hits(c) {
                cube += 1;
            }
        }
        s += w.cube_control * cube;

        let mut hanging = 0;
        for p in board.pieces(color) {
            if p.kind != PieceKind::King && enemy.hits(p.at) && !own.hits(p.at) {
                hanging += w.weight(p.kind);
            }
        }
        if w.hanging_divisor > 0 {
            s -= hanging / w.hanging_divisor;
        }

        let mut files = [[0i32; 5]; 5];
        for p in board.pieces(color).filter(|p| p.kind == PieceKind::Pawn) {
            files[p.at.lvl as usize][p.at.col as usize] += 1;
        }
        let doubled: i32 = files.iter().flatten().map(|&n| (n - 1).max(0)).sum();
        s -= w.doubled_pawn * doubled;
        s
    }

    /// Levels and files where one side reaches more cells than the other.
    fn control_terms(&self, white: &Reach, black: &Reach) -> i32 {
        let mut by_level = [[0i32; 2]; 5];
        let mut by_file = [[0i32; 2]; 5];
        for c in Coord::all() {
            let i = c.index();
            by_level[c.lvl as usize][0] += white.count[i] as i32;
            by_level[c.lvl as usize][1] += black.count[i] as i32;
            by_file[c.col as usize][0] += white.count[i] as i32;
            by_file[c.col as usize][1] += black.count[i] as i32;
        }
        let lead = |[w, b]: [i32; 2]| (w > b) as i32 - (b > w) as i32;
        let led: i32 = by_level.iter().chain(by_file.iter()).map(|&x| lead(x)).sum();
        self.weights.level_control * led
    }
}

/// King steps onto cells the enemy does not cover, computed without touching
/// the board: the king's own cell counts as vacated. Enemy pawns cover their
/// capture cells in both directions.
pub fn king_mobility(board: &Board, color: Color) -> usize {
    let at = board.king_location(color);
    let Some(king) = board.piece_at(at) else { return 0 };
    let mut n = 0;
    king.for_each_displacement(board, true, |delta| {
        if !board.is_covered_vacating(at + delta, color.opposite(), at) {
            n += 1;
        }
    });
    n
}

/// Enemy pieces inside the 3x3x3 block centred on the king.
pub fn king_danger(board: &Board, color: Color) -> usize {
    let at = board.king_location(color);
    board
        .pieces(color.opposite())
        .filter(|p| p.at.chebyshev(at) == 1)
        .count()
}

/// Full evaluation with default weights and no refinements.
pub fn eval_cp(board: &Board) -> i32 {
    Evaluator::default().evaluate(board)
}
