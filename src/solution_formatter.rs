use std::fmt::{self, Debug, Display, Formatter};

use crate::board::Board;
use crate::data::Pos;
use crate::moves::Moves;
use crate::state::{BoxSet, PuzzleState};

pub struct SolutionFormatter<'a> {
    board: &'a Board,
    agent: Pos,
    boxes: &'a [Pos],
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        board: &'a Board,
        agent: Pos,
        boxes: &'a [Pos],
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            board,
            agent,
            boxes,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut boxes = BoxSet::new();
        for &b in self.boxes {
            if !boxes.try_insert(b) {
                return writeln!(f, "Multiple boxes at {}", b);
            }
        }
        let mut last_state = PuzzleState::root(self.agent, boxes);
        writeln!(
            f,
            "{}",
            self.board
                .format_with_state(last_state.agent(), last_state.boxes().iter())
        )?;

        for (i, mov) in self.moves.iter().enumerate() {
            // moves from a different level
            let new_state = match last_state.successor(self.board, mov.dir) {
                Some(ref state) if state.last_move() == Some(*mov) => state.detached(),
                _ => return writeln!(f, "Invalid move {} ({})", i + 1, mov),
            };
            if mov.is_push || self.include_steps {
                writeln!(
                    f,
                    "{}",
                    self.board
                        .format_with_state(new_state.agent(), new_state.boxes().iter())
                )?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
