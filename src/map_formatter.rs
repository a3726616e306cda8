use std::fmt::{self, Debug, Display, Formatter};

use crate::board::Board;
use crate::data::{Contents, MapCell, Pos};

/// Renders a board with an agent and boxes in XSB notation.
pub struct MapFormatter<'a> {
    board: &'a Board,
    agent: Pos,
    boxes: Vec<Pos>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(board: &'a Board, agent: Pos, boxes: Vec<Pos>) -> Self {
        Self {
            board,
            agent,
            boxes,
        }
    }

    pub(crate) fn write_board(
        board: &Board,
        agent: Option<Pos>,
        boxes: &[Pos],
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let grid = board.grid();
        let mut contents = grid.scratchpad_with_default(Contents::Empty);
        for &b in boxes {
            if grid.contains(b) {
                contents[b] = Contents::Box;
            }
        }
        if let Some(agent) = agent {
            if grid.contains(agent) {
                contents[agent] = Contents::Player;
            }
        }

        for r in 0..grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let line_len = (0..grid.cols())
                .rev()
                .map(|c| Pos::new(r, c))
                .find(|&pos| grid[pos] != MapCell::Floor || contents[pos] != Contents::Empty)
                .map_or(0, |pos| pos.c + 1);

            for c in 0..line_len {
                let pos = Pos::new(r, c);
                write!(f, "{}", xsb_char(grid[pos], contents[pos]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn xsb_char(cell: MapCell, contents: Contents) -> char {
    match (cell, contents) {
        (MapCell::Wall, Contents::Empty) => '#',
        // only possible when printing invalid input, show the wall
        (MapCell::Wall, _) => '#',
        (MapCell::Floor, Contents::Empty) => ' ',
        (MapCell::Floor, Contents::Box) => '$',
        (MapCell::Floor, Contents::Player) => '@',
        (MapCell::Goal, Contents::Empty) => '.',
        (MapCell::Goal, Contents::Box) => '*',
        (MapCell::Goal, Contents::Player) => '+',
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Self::write_board(self.board, Some(self.agent), &self.boxes, f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
