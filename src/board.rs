use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Dir, MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::solver::SolverErr;
use crate::vec2d::Vec2d;

/// The static part of a level. Never changes during a search and is only ever
/// passed around by shared reference so independent solves can run in parallel.
///
/// Cells outside the grid behave exactly like walls.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vec2d<MapCell>,
    goals: Vec<Pos>,
}

impl Board {
    /// Shorter rows are padded with floor.
    pub fn new(rows: &[Vec<MapCell>]) -> Result<Self, SolverErr> {
        let max_cols = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        if max_cols == 0 {
            return Err(SolverErr::EmptyBoard);
        }
        if rows.len() > usize::from(u16::max_value()) || max_cols > usize::from(u16::max_value())
        {
            return Err(SolverErr::TooLarge);
        }

        let grid = Vec2d::new(rows, MapCell::Floor);
        let goals = grid
            .positions()
            .filter(|&pos| grid[pos] == MapCell::Goal)
            .collect();
        Ok(Board { grid, goals })
    }

    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.grid.contains(pos)
    }

    pub fn get(&self, pos: Pos) -> Option<MapCell> {
        self.grid.get(pos).cloned()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.get(pos).map_or(true, |cell| cell == MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.get(pos) == Some(MapCell::Goal)
    }

    /// The neighboring cell if it's on the grid (it might still be a wall).
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        pos.offset(dir).filter(|&next| self.contains(next))
    }

    /// Whether the neighbor in `dir` is a wall or off the grid.
    pub fn blocked(&self, pos: Pos, dir: Dir) -> bool {
        self.neighbor(pos, dir).map_or(true, |next| self.is_wall(next))
    }

    pub(crate) fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    pub fn format_with_state<'a, I>(&'a self, agent: Pos, boxes: I) -> MapFormatter<'a>
    where
        I: IntoIterator<Item = Pos>,
    {
        MapFormatter::new(self, agent, boxes.into_iter().collect())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        MapFormatter::write_board(self, None, &[], f)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
