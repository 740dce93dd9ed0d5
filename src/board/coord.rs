use std::fmt;
use std::ops::{Add, Mul, Neg};
use std::str::FromStr;

use crate::error::EngineError;

pub const BOARD_SIZE: i8 = 5;
pub const CELLS: usize = 125;

/// A cell of the 5x5x5 cube. `row` is the rank (towards Black), `col` the
/// file and `lvl` the level (A at the bottom, E at the top).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
    pub lvl: i8,
}

impl Coord {
    #[inline]
    pub const fn new(row: i8, col: i8, lvl: i8) -> Self {
        Self { row, col, lvl }
    }

    #[inline]
    pub fn on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row)
            && (0..BOARD_SIZE).contains(&self.col)
            && (0..BOARD_SIZE).contains(&self.lvl)
    }

    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.on_board(), "coordinate off board: {self:?}");
        (self.lvl as usize * 25) + (self.row as usize * 5) + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        let lvl = (idx / 25) as i8;
        let row = ((idx % 25) / 5) as i8;
        let col = (idx % 5) as i8;
        Self { row, col, lvl }
    }

    /// All 125 cells in index order (level, then rank, then file).
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(Coord::from_index)
    }

    /// Point reflection through the centre rank and level; files are kept.
    #[inline]
    pub fn mirrored(self) -> Self {
        Self::new(BOARD_SIZE - 1 - self.row, self.col, BOARD_SIZE - 1 - self.lvl)
    }

    /// Chebyshev distance in three dimensions.
    #[inline]
    pub fn chebyshev(self, other: Coord) -> i8 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
            .max((self.lvl - other.lvl).abs())
    }

    /// Displacement that carries `self` onto `to`.
    #[inline]
    pub fn delta_to(self, to: Coord) -> Displacement {
        Displacement::new(to.row - self.row, to.col - self.col, to.lvl - self.lvl)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lvl = (b'A' + self.lvl as u8) as char;
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{}{}{}", lvl, file, self.row + 1)
    }
}

impl FromStr for Coord {
    type Err = EngineError;

    /// Parses `Ac1` style notation: level letter, file letter, rank digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(EngineError::BadSquare(s.to_string()));
        }
        let lvl = bytes[0].wrapping_sub(b'A') as i8;
        let col = bytes[1].wrapping_sub(b'a') as i8;
        let row = bytes[2].wrapping_sub(b'1') as i8;
        let c = Coord::new(row, col, lvl);
        if c.on_board() { Ok(c) } else { Err(EngineError::BadSquare(s.to_string())) }
    }
}

/// Relative movement of a piece: (Δrow, Δcol, Δlevel).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Displacement {
    pub row: i8,
    pub col: i8,
    pub lvl: i8,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement::new(0, 0, 0);

    #[inline]
    pub const fn new(row: i8, col: i8, lvl: i8) -> Self {
        Self { row, col, lvl }
    }

    /// Number of non-zero components: 1 orthogonal, 2 planar diagonal, 3 triagonal.
    #[inline]
    pub fn axes(self) -> u8 {
        (self.row != 0) as u8 + (self.col != 0) as u8 + (self.lvl != 0) as u8
    }
}

impl Add<Displacement> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Displacement) -> Coord {
        Coord::new(self.row + rhs.row, self.col + rhs.col, self.lvl + rhs.lvl)
    }
}

impl Add for Displacement {
    type Output = Displacement;

    #[inline]
    fn add(self, rhs: Displacement) -> Displacement {
        Displacement::new(self.row + rhs.row, self.col + rhs.col, self.lvl + rhs.lvl)
    }
}

impl Neg for Displacement {
    type Output = Displacement;

    #[inline]
    fn neg(self) -> Displacement {
        Displacement::new(-self.row, -self.col, -self.lvl)
    }
}

impl Mul<i8> for Displacement {
    type Output = Displacement;

    #[inline]
    fn mul(self, k: i8) -> Displacement {
        Displacement::new(self.row * k, self.col * k, self.lvl * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_roundtrips_corners() {
        let a = Coord::from_str("Aa1").unwrap();
        assert_eq!(a, Coord::new(0, 0, 0));
        let e = Coord::from_str("Ee5").unwrap();
        assert_eq!(e, Coord::new(4, 4, 4));
        assert_eq!(format!("{}", Coord::new(0, 2, 1)), "Bc1");
    }

    #[test]
    fn rejects_off_board_notation() {
        assert!(Coord::from_str("Fa1").is_err());
        assert!(Coord::from_str("Af1").is_err());
        assert!(Coord::from_str("Aa6").is_err());
        assert!(Coord::from_str("Aa").is_err());
    }

    #[test]
    fn index_is_a_bijection() {
        for (i, c) in Coord::all().enumerate() {
            assert!(c.on_board());
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        let c = Coord::new(1, 3, 0);
        assert_eq!(c.mirrored(), Coord::new(3, 3, 4));
        assert_eq!(c.mirrored().mirrored(), c);
    }
}
