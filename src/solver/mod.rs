pub mod deadlock;
pub mod heuristic;

pub(crate) mod a_star;

use std::collections::BinaryHeap;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;
use typed_arena::Arena;

use crate::board::Board;
use crate::config::SearchConfig;
use crate::data::Pos;
use crate::level::Level;
use crate::moves::Moves;
use crate::state::{BoxSet, PuzzleState};
use crate::Solve;

use self::a_star::SearchNode;
pub use self::a_star::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    EmptyBoard,
    TooLarge,
    AgentOutOfBounds(Pos),
    AgentOnWall(Pos),
    BoxOutOfBounds(Pos),
    BoxOnWall(Pos),
    DuplicateBox(Pos),
    AgentOnBox(Pos),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::EmptyBoard => write!(f, "Empty board"),
            SolverErr::TooLarge => write!(f, "Board larger than 65535 rows or columns"),
            SolverErr::AgentOutOfBounds(pos) => write!(f, "Player outside the board at {}", pos),
            SolverErr::AgentOnWall(pos) => write!(f, "Player on a wall at {}", pos),
            SolverErr::BoxOutOfBounds(pos) => write!(f, "Box outside the board at {}", pos),
            SolverErr::BoxOnWall(pos) => write!(f, "Box on a wall at {}", pos),
            SolverErr::DuplicateBox(pos) => write!(f, "Multiple boxes at {}", pos),
            SolverErr::AgentOnBox(pos) => write!(f, "Player on a box at {}", pos),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    ExpansionLimit,
    FrontierLimit,
    Cancelled,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            StopReason::ExpansionLimit => write!(f, "expansion limit reached"),
            StopReason::FrontierLimit => write!(f, "frontier limit reached"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Running out of a limit is not a proof that there's no solution
/// so it's kept apart from `Unsolvable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Moves),
    Unsolvable,
    Inconclusive(StopReason),
}

pub struct SolverOk {
    pub outcome: Outcome,
    pub stats: Stats,
}

impl SolverOk {
    fn new(outcome: Outcome, stats: Stats) -> Self {
        Self { outcome, stats }
    }

    pub fn moves(&self) -> Option<&Moves> {
        match self.outcome {
            Outcome::Solved(ref moves) => Some(moves),
            _ => None,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved(ref moves) => {
                writeln!(f, "{}", moves)?;
                writeln!(f, "Moves: {}", moves.move_cnt())?;
                writeln!(f, "Pushes: {}", moves.push_cnt())?;
            }
            Outcome::Unsolvable => writeln!(f, "No solution")?,
            Outcome::Inconclusive(reason) => writeln!(f, "Search stopped: {}", reason)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, config: &SearchConfig) -> Result<SolverOk, SolverErr> {
        solve_with_config(&self.board, self.agent, &self.boxes, config)
    }
}

/// Searches without any limits.
///
/// `Ok(None)` means the level was fully explored and has no solution.
pub fn solve(board: &Board, agent: Pos, boxes: &[Pos]) -> Result<Option<Moves>, SolverErr> {
    let solver_ok = solve_with_config(board, agent, boxes, &SearchConfig::default())?;
    match solver_ok.outcome {
        Outcome::Solved(moves) => Ok(Some(moves)),
        Outcome::Unsolvable => Ok(None),
        // no limits, nothing else can stop the search
        Outcome::Inconclusive(reason) => unreachable!("search stopped without limits: {}", reason),
    }
}

pub fn solve_with_config(
    board: &Board,
    agent: Pos,
    boxes: &[Pos],
    config: &SearchConfig,
) -> Result<SolverOk, SolverErr> {
    debug!("Validating level...");
    let box_set = validate(board, agent, boxes)?;
    debug!("Validated level");

    if box_set.len() > board.goals().len() {
        info!(
            "More boxes ({}) than goals ({}), not searching",
            box_set.len(),
            board.goals().len()
        );
        return Ok(SolverOk::new(Outcome::Unsolvable, Stats::new()));
    }

    Ok(search(board, agent, box_set, config))
}

fn validate(board: &Board, agent: Pos, boxes: &[Pos]) -> Result<BoxSet, SolverErr> {
    if !board.contains(agent) {
        return Err(SolverErr::AgentOutOfBounds(agent));
    }
    if board.is_wall(agent) {
        return Err(SolverErr::AgentOnWall(agent));
    }

    let mut box_set = BoxSet::new();
    for &pos in boxes {
        if !board.contains(pos) {
            return Err(SolverErr::BoxOutOfBounds(pos));
        }
        if board.is_wall(pos) {
            return Err(SolverErr::BoxOnWall(pos));
        }
        if !box_set.try_insert(pos) {
            return Err(SolverErr::DuplicateBox(pos));
        }
    }
    if box_set.contains(agent) {
        return Err(SolverErr::AgentOnBox(agent));
    }

    Ok(box_set)
}

fn search(board: &Board, agent: Pos, boxes: BoxSet, config: &SearchConfig) -> SolverOk {
    debug!("Search called");

    // the arena has to outlive everything holding references into it
    let arena = Arena::new();
    let mut stats = Stats::new();
    let mut visited = FnvHashSet::default();
    let mut to_visit = BinaryHeap::new();
    let mut expanded: u64 = 0;

    let root: &PuzzleState<'_> = arena.alloc(PuzzleState::root(agent, boxes));
    let start = SearchNode::new(root, heuristic::estimate(board, agent, root.boxes()));
    stats.add_created(&start);
    to_visit.push(start);

    loop {
        if config.cancelled() {
            debug!("Cancelled after {} expansions", expanded);
            return SolverOk::new(Outcome::Inconclusive(StopReason::Cancelled), stats);
        }
        if config.max_frontier.map_or(false, |max| to_visit.len() > max) {
            debug!("Frontier limit reached with {} open nodes", to_visit.len());
            return SolverOk::new(Outcome::Inconclusive(StopReason::FrontierLimit), stats);
        }

        let cur_node = match to_visit.pop() {
            Some(node) => node,
            None => break,
        };
        let cur = cur_node.state;
        let key = cur.canonical_key();

        if visited.contains(&key) {
            stats.add_reached_duplicate(&cur_node);
            continue;
        }

        if cur.is_goal(board) {
            stats.add_unique_visited(&cur_node);
            debug!("Solved at depth {}, backtracking path", cur.g());
            return SolverOk::new(Outcome::Solved(cur.moves()), stats);
        }

        if deadlock::is_deadlocked(board, cur.boxes()) {
            stats.add_deadlocked(&cur_node);
            continue;
        }

        if config.max_expanded.map_or(false, |max| expanded >= max) {
            debug!("Expansion limit reached after {} expansions", expanded);
            return SolverOk::new(Outcome::Inconclusive(StopReason::ExpansionLimit), stats);
        }

        if stats.add_unique_visited(&cur_node) && config.print_status {
            println!("Visited new depth: {}", cur.g());
            println!("{:?}", stats);
        }
        visited.insert(key);
        expanded += 1;

        for (_, child) in cur.successors(board) {
            if visited.contains(&child.canonical_key()) {
                continue;
            }
            let child: &PuzzleState<'_> = arena.alloc(child);
            let h = heuristic::estimate(board, child.agent(), child.boxes());
            let next_node = SearchNode::new(child, h);
            stats.add_created(&next_node);
            to_visit.push(next_node);
        }
    }

    debug!("Frontier exhausted after {} expansions", expanded);
    SolverOk::new(Outcome::Unsolvable, stats)
}
