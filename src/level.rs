use std::fmt::{self, Debug, Display, Formatter};

use crate::board::Board;
use crate::data::Pos;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;

/// A loaded level: the board and the initial positions.
/// Not validated beyond what the parser checks, the solver does the rest.
#[derive(Clone)]
pub struct Level {
    pub board: Board,
    pub agent: Pos,
    pub boxes: Vec<Pos>,
}

impl Level {
    pub fn new(board: Board, agent: Pos, boxes: Vec<Pos>) -> Self {
        Level {
            board,
            agent,
            boxes,
        }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.board
            .format_with_state(self.agent, self.boxes.iter().cloned())
    }

    /// The initial board followed by the board after each push,
    /// or after each move if `include_steps` is set.
    pub fn xsb_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.board, self.agent, &self.boxes, moves, include_steps)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
