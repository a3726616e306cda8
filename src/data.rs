use std::convert::TryFrom;
use std::fmt::{self, Debug, Display, Formatter};

use crate::codec::{self, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapCell {
    Wall,
    Floor,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u16,
    pub c: u16,
}

impl Pos {
    pub fn new(r: u16, c: u16) -> Pos {
        Pos { r, c }
    }

    pub fn key(self) -> Key {
        codec::encode(self.r, self.c)
    }

    pub fn from_key(key: Key) -> Pos {
        let (r, c) = codec::decode(key);
        Pos::new(r, c)
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        let dr = (i32::from(self.r) - i32::from(other.r)).abs();
        let dc = (i32::from(self.c) - i32::from(other.c)).abs();
        (dr + dc) as u32
    }

    /// `None` when the result would have a negative or too large coordinate.
    pub fn offset(self, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let r = u16::try_from(i32::from(self.r) + dr).ok()?;
        let c = u16::try_from(i32::from(self.c) + dc).ok()?;
        Some(Pos::new(r, c))
    }
}

impl Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// Order in which successors are generated.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

const DELTAS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Dir {
    /// (row, column)
    pub fn delta(self) -> (i32, i32) {
        DELTAS[self as usize]
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Dir::Up || self == Dir::Down
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Dir::Up => "u",
            Dir::Right => "r",
            Dir::Down => "d",
            Dir::Left => "l",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        let pos = Pos::new(0, 5);
        assert_eq!(pos.offset(Dir::Up), None);
        assert_eq!(pos.offset(Dir::Down), Some(Pos::new(1, 5)));
        assert_eq!(pos.offset(Dir::Left), Some(Pos::new(0, 4)));
        assert_eq!(pos.offset(Dir::Right), Some(Pos::new(0, 6)));
        assert_eq!(Pos::new(3, 0).offset(Dir::Left), None);
        assert_eq!(Pos::new(3, u16::max_value()).offset(Dir::Right), None);
    }

    #[test]
    fn inverse_undoes_offset() {
        let pos = Pos::new(4, 4);
        for &dir in &DIRECTIONS {
            assert_eq!(pos.offset(dir).unwrap().offset(dir.inverse()), Some(pos));
        }
    }

    #[test]
    fn keys() {
        let pos = Pos::new(17, 3);
        assert_eq!(Pos::from_key(pos.key()), pos);
        assert_ne!(Pos::new(1, 2).key(), Pos::new(2, 1).key());
    }

    #[test]
    fn distances() {
        assert_eq!(Pos::new(1, 1).dist(Pos::new(1, 1)), 0);
        assert_eq!(Pos::new(1, 1).dist(Pos::new(4, 5)), 7);
        assert_eq!(Pos::new(4, 5).dist(Pos::new(1, 1)), 7);
    }
}
