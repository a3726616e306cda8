use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u16,
    cols: u16,
}

impl<T> Vec2d<T> {
    pub(crate) fn rows(&self) -> u16 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u16 {
        self.cols
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        pos.r < self.rows && pos.c < self.cols
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self[pos])
        } else {
            None
        }
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn flat_index(&self, pos: Pos) -> usize {
        usize::from(pos.r) * usize::from(self.cols) + usize::from(pos.c)
    }
}

impl<T: Clone> Vec2d<T> {
    /// Pads shorter rows with `pad`. The caller makes sure the sizes fit in `u16`
    /// and that there is at least one cell.
    pub(crate) fn new(grid: &[Vec<T>], pad: T) -> Self {
        let max_cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut data = Vec::with_capacity(grid.len() * max_cols);
        for row in grid {
            data.extend_from_slice(row);
            for _ in row.len()..max_cols {
                data.push(pad.clone());
            }
        }
        Vec2d {
            data,
            rows: grid.len() as u16,
            cols: max_cols as u16,
        }
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        &self.data[self.flat_index(index)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.flat_index(index);
        &mut self.data[index]
    }
}
