use std::fmt::{self, Debug, Formatter};

use fnv::FnvHashMap;

use crate::board::Board;
use crate::codec::Key;
use crate::data::{Dir, Pos, DIRECTIONS};
use crate::moves::{Move, Moves};

/// Box positions keyed by their coordinate key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BoxSet(FnvHashMap<Key, Pos>);

impl BoxSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.0.contains_key(&pos.key())
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.0.contains_key(&key)
    }

    /// Returns false and leaves the set untouched if the cell is already occupied.
    pub fn try_insert(&mut self, pos: Pos) -> bool {
        let key = pos.key();
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, pos);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.0.values().cloned()
    }

    /// Keys in ascending order - independent of insertion order.
    pub fn sorted_keys(&self) -> Vec<Key> {
        let mut keys: Vec<_> = self.0.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Copy of this set with one box moved.
    fn with_pushed(&self, from: Pos, to: Pos) -> BoxSet {
        let mut boxes = self.clone();
        let removed = boxes.0.remove(&from.key());
        assert!(removed.is_some(), "no box to push at {}", from);
        assert!(boxes.try_insert(to), "pushed box onto another box at {}", to);
        boxes
    }
}

impl Debug for BoxSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let positions: Vec<_> = self.sorted_keys().into_iter().map(Pos::from_key).collect();
        write!(f, "{:?}", positions)
    }
}

/// Identifies a state for duplicate detection regardless of how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey {
    agent: Key,
    boxes: Vec<Key>,
}

/// One node of the search tree. Immutable once created,
/// the parent link is set at construction and points into the same arena.
pub struct PuzzleState<'a> {
    agent: Pos,
    boxes: BoxSet,
    g: u32,
    mov: Option<Move>,
    parent: Option<&'a PuzzleState<'a>>,
}

impl<'a> PuzzleState<'a> {
    pub fn root(agent: Pos, boxes: BoxSet) -> Self {
        PuzzleState {
            agent,
            boxes,
            g: 0,
            mov: None,
            parent: None,
        }
    }

    pub fn agent(&self) -> Pos {
        self.agent
    }

    pub fn boxes(&self) -> &BoxSet {
        &self.boxes
    }

    /// Number of moves from the root.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// The move that created this state, `None` for the root.
    pub fn last_move(&self) -> Option<Move> {
        self.mov
    }

    pub fn parent(&self) -> Option<&'a PuzzleState<'a>> {
        self.parent
    }

    /// Moves the agent one cell, pushing a box if there is one in the way.
    /// `None` if the move is illegal.
    pub fn successor(&'a self, board: &Board, dir: Dir) -> Option<PuzzleState<'a>> {
        let new_agent = board.neighbor(self.agent, dir)?;
        if board.is_wall(new_agent) {
            return None;
        }

        if self.boxes.contains(new_agent) {
            // box behind the edge of the grid is the same as behind a wall
            let push_dest = board.neighbor(new_agent, dir)?;
            if board.is_wall(push_dest) || self.boxes.contains(push_dest) {
                return None;
            }
            let boxes = self.boxes.with_pushed(new_agent, push_dest);
            Some(self.child(new_agent, boxes, Move::new(dir, true)))
        } else {
            Some(self.child(new_agent, self.boxes.clone(), Move::new(dir, false)))
        }
    }

    /// Legal moves in the order of `DIRECTIONS`.
    pub fn successors(&'a self, board: &Board) -> Vec<(Dir, PuzzleState<'a>)> {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.successor(board, dir).map(|state| (dir, state)))
            .collect()
    }

    fn child(&'a self, agent: Pos, boxes: BoxSet, mov: Move) -> PuzzleState<'a> {
        PuzzleState {
            agent,
            boxes,
            g: self.g + 1,
            mov: Some(mov),
            parent: Some(self),
        }
    }

    /// All boxes are on goals - not all goals have a box.
    pub fn is_goal(&self, board: &Board) -> bool {
        self.boxes.iter().all(|pos| board.is_goal(pos))
    }

    pub fn canonical_key(&self) -> StateKey {
        StateKey {
            agent: self.agent.key(),
            boxes: self.boxes.sorted_keys(),
        }
    }

    /// Follows parent links back to the root.
    pub fn moves(&self) -> Moves {
        let mut moves = Vec::with_capacity(self.g as usize);
        let mut cur = self;
        while let (Some(mov), Some(parent)) = (cur.mov, cur.parent) {
            moves.push(mov);
            cur = parent;
        }
        moves.reverse();
        Moves::new(moves)
    }

    /// Same position without the history.
    pub fn detached(&self) -> PuzzleState<'static> {
        PuzzleState::root(self.agent, self.boxes.clone())
    }
}

impl Debug for PuzzleState<'_> {
    // parents are left out, the whole chain is usually not wanted
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("agent", &self.agent)
            .field("boxes", &self.boxes)
            .field("g", &self.g)
            .field("mov", &self.mov)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;

    use crate::level::Level;

    fn root(level: &Level) -> PuzzleState<'static> {
        let mut boxes = BoxSet::new();
        for &b in &level.boxes {
            assert!(boxes.try_insert(b));
        }
        PuzzleState::root(level.agent, boxes)
    }

    #[test]
    fn box_set_insertion() {
        let mut boxes = BoxSet::new();
        assert!(boxes.try_insert(Pos::new(1, 2)));
        assert!(boxes.try_insert(Pos::new(2, 1)));
        assert!(!boxes.try_insert(Pos::new(1, 2)));
        assert_eq!(boxes.len(), 2);
        assert!(boxes.contains(Pos::new(2, 1)));
        assert!(!boxes.contains(Pos::new(2, 2)));
        assert_eq!(format!("{:?}", boxes), "[(2, 1), (1, 2)]");
    }

    #[test]
    fn box_set_equality_ignores_order() {
        let mut a = BoxSet::new();
        a.try_insert(Pos::new(1, 1));
        a.try_insert(Pos::new(3, 4));
        let mut b = BoxSet::new();
        b.try_insert(Pos::new(3, 4));
        b.try_insert(Pos::new(1, 1));
        assert_eq!(a, b);
        assert_eq!(a.sorted_keys(), b.sorted_keys());
    }

    #[test]
    fn steps_and_pushes() {
        let level: Level = r"
#######
#  .  #
# @$  #
#######
"
        .parse()
        .unwrap();
        let state = root(&level);
        let succ = state.successors(&level.board);
        let dirs: Vec<_> = succ.iter().map(|&(dir, _)| dir).collect();
        assert_eq!(dirs, vec![Dir::Up, Dir::Right, Dir::Left]);

        let (_, pushed) = &succ[1];
        assert_eq!(pushed.agent(), Pos::new(2, 3));
        assert!(pushed.boxes().contains(Pos::new(2, 4)));
        assert!(!pushed.boxes().contains(Pos::new(2, 3)));
        assert_eq!(pushed.g(), 1);
        assert_eq!(pushed.last_move(), Some(Move::new(Dir::Right, true)));
        assert!(pushed.parent().is_some());

        let (_, stepped) = &succ[0];
        assert_eq!(stepped.agent(), Pos::new(1, 2));
        assert_eq!(stepped.boxes(), state.boxes());
        assert_eq!(stepped.last_move(), Some(Move::new(Dir::Up, false)));

        // parent is untouched
        assert_eq!(state.agent(), Pos::new(2, 2));
        assert!(state.boxes().contains(Pos::new(2, 3)));
    }

    #[test]
    fn blocked_pushes() {
        let level: Level = r"
######
#@$$.#
# $  #
# #  #
######
"
        .parse()
        .unwrap();
        let state = root(&level);
        // box behind box
        assert!(state.successor(&level.board, Dir::Right).is_none());
        assert!(state.successor(&level.board, Dir::Up).is_none());
        assert!(state.successor(&level.board, Dir::Left).is_none());
        assert!(state.successor(&level.board, Dir::Down).is_some());

        let level: Level = "#@$#.".parse().unwrap();
        assert!(root(&level)
            .successor(&level.board, Dir::Right)
            .is_none());
    }

    #[test]
    fn pushing_off_the_grid() {
        let level: Level = "@$".parse().unwrap();
        let state = root(&level);
        assert!(state.successor(&level.board, Dir::Right).is_none());
        assert!(state.successors(&level.board).is_empty());
    }

    #[test]
    fn goal_test() {
        let level: Level = "#@*.#".parse().unwrap();
        assert!(root(&level).is_goal(&level.board));

        let level: Level = "#@$.#".parse().unwrap();
        let state = root(&level);
        assert!(!state.is_goal(&level.board));
        let solved = state.successor(&level.board, Dir::Right).unwrap();
        assert!(solved.is_goal(&level.board));
        for pos in solved.boxes().iter() {
            assert!(level.board.is_goal(pos));
        }
    }

    #[test]
    fn keys_ignore_history() {
        let level: Level = r"
#####
#   #
# @ #
# $.#
#####
"
        .parse()
        .unwrap();
        let state = root(&level);
        let left = state.successor(&level.board, Dir::Left).unwrap();
        let left_right = left.successor(&level.board, Dir::Right).unwrap();
        let right = state.successor(&level.board, Dir::Right).unwrap();
        let right_left = right.successor(&level.board, Dir::Left).unwrap();

        assert_eq!(left_right.canonical_key(), state.canonical_key());
        assert_eq!(left_right.canonical_key(), right_left.canonical_key());
        assert_ne!(left.canonical_key(), right.canonical_key());
        assert_eq!(left_right.g(), 2);
        assert_eq!(left_right.moves().to_string(), "lr");
        assert_eq!(right_left.moves().to_string(), "rl");
        assert!(state.moves().is_empty());

        let detached = right_left.detached();
        assert_eq!(detached.canonical_key(), state.canonical_key());
        assert!(detached.parent().is_none());
        assert_eq!(detached.g(), 0);
    }

    #[test]
    fn successors_stay_legal() {
        let level: Level = r"
#######
#.  # #
#  $$ #
#.$@  #
# .   #
#######
"
        .parse()
        .unwrap();
        let board = &level.board;

        // BFS over the whole state space, detached so states don't borrow each other
        let mut seen = HashSet::new();
        let mut to_visit = VecDeque::new();
        to_visit.push_back(root(&level));
        while let Some(state) = to_visit.pop_front() {
            if !seen.insert(state.canonical_key()) || seen.len() > 5_000 {
                continue;
            }
            for (_, next) in state.successors(board) {
                assert!(!board.is_wall(next.agent()));
                assert!(!next.boxes().contains(next.agent()));
                assert_eq!(next.boxes().len(), level.boxes.len());
                for b in next.boxes().iter() {
                    assert!(!board.is_wall(b));
                }
                assert_eq!(next.agent().dist(state.agent()), 1);
                to_visit.push_back(next.detached());
            }
        }
        assert!(seen.len() > 100);
    }
}
