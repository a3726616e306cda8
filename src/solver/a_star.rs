use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use crate::state::PuzzleState;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    deadlocked_states: Vec<u64>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn total_deadlocked(&self) -> u64 {
        self.deadlocked_states.iter().sum()
    }

    pub(crate) fn add_created(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.created_states, node)
    }

    pub(crate) fn add_unique_visited(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.visited_states, node)
    }

    pub(crate) fn add_reached_duplicate(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.duplicate_states, node)
    }

    pub(crate) fn add_deadlocked(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.deadlocked_states, node)
    }

    /// Returns true if this is the first node at its depth.
    fn add(counts: &mut Vec<u64>, node: &SearchNode<'_>) -> bool {
        let depth = node.state.g() as usize;
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn at(counts: &[u64], depth: usize) -> u64 {
        counts.get(depth).cloned().unwrap_or(0)
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "deadlocked by depth: {:?}", self.deadlocked_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total unique visited: {}", self.total_unique_visited().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_reached_duplicates().separated_string())?;
        writeln!(f, "total deadlocked: {}", self.total_deadlocked().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        let deadlocked = self.total_deadlocked();
        let left = created.saturating_sub(visited + duplicates + deadlocked);
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Deadlocked total: {}", deadlocked.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(f)?;

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates", "Deadlocked", "Unknown (not reached)"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));
        // created is the longest, every other node was created first
        for depth in 0..self.created_states.len() {
            let created = self.created_states[depth];
            let visited = Self::at(&self.visited_states, depth);
            let duplicates = Self::at(&self.duplicate_states, depth);
            let deadlocked = Self::at(&self.deadlocked_states, depth);
            let left = created.saturating_sub(visited + duplicates + deadlocked);
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&created.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&deadlocked.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }
        write!(f, "{}", table)
    }
}

/// Frontier entry. The state itself lives in the search's arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode<'a> {
    pub(crate) state: &'a PuzzleState<'a>,
    pub(crate) h: u32,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn new(state: &'a PuzzleState<'a>, h: u32) -> Self {
        SearchNode { state, h }
    }

    pub(crate) fn cost(&self) -> u32 {
        self.state.g() + self.h
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap - lowest cost first,
        // on ties prefer the deeper node
        other
            .cost()
            .cmp(&self.cost())
            .then_with(|| self.state.g().cmp(&other.state.g()))
    }
}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    use crate::board::Board;
    use crate::data::{Dir, MapCell, Pos};
    use crate::state::BoxSet;

    #[test]
    fn lowest_cost_then_deepest_first() {
        let root = PuzzleState::root(Pos::new(0, 0), BoxSet::new());
        let board = Board::new(&[vec![MapCell::Floor; 4]]).unwrap();
        let child = root.successor(&board, Dir::Right).unwrap();
        let grandchild = child.successor(&board, Dir::Right).unwrap();

        let mut heap = BinaryHeap::new();
        heap.push(SearchNode::new(&root, 5)); // cost 5
        heap.push(SearchNode::new(&child, 2)); // cost 3, g 1
        heap.push(SearchNode::new(&grandchild, 1)); // cost 3, g 2
        heap.push(SearchNode::new(&root, 4)); // cost 4

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|node| (node.cost(), node.state.g()))
            .collect();
        assert_eq!(order, vec![(3, 2), (3, 1), (4, 0), (5, 0)]);
    }

    #[test]
    fn counting_by_depth() {
        let root = PuzzleState::root(Pos::new(0, 0), BoxSet::new());
        let board = Board::new(&[vec![MapCell::Floor; 4]]).unwrap();
        let child = root.successor(&board, Dir::Right).unwrap();
        let grandchild = child.successor(&board, Dir::Right).unwrap();

        let mut stats = Stats::new();
        assert!(stats.add_created(&SearchNode::new(&root, 0)));
        assert!(stats.add_created(&SearchNode::new(&grandchild, 0)));
        assert!(!stats.add_created(&SearchNode::new(&grandchild, 0)));
        assert!(stats.add_unique_visited(&SearchNode::new(&root, 0)));
        assert!(stats.add_reached_duplicate(&SearchNode::new(&child, 0)));
        assert!(stats.add_deadlocked(&SearchNode::new(&grandchild, 0)));

        assert_eq!(stats.created_states, vec![1, 0, 2]);
        assert_eq!(stats.total_created(), 3);
        assert_eq!(stats.total_unique_visited(), 1);
        assert_eq!(stats.total_reached_duplicates(), 1);
        assert_eq!(stats.total_deadlocked(), 1);

        let printed = stats.to_string();
        assert!(printed.contains("States created total: 3"));
        assert!(printed.contains("Deadlocked total: 1"));
        assert!(printed.contains("Created but not reached total: 0"));
    }

    #[test]
    fn formatting_depth_table() {
        let root = PuzzleState::root(Pos::new(0, 0), BoxSet::new());
        let board = Board::new(&[vec![MapCell::Floor; 4]]).unwrap();
        let child = root.successor(&board, Dir::Right).unwrap();

        let mut stats = Stats::new();
        stats.add_created(&SearchNode::new(&root, 0));
        stats.add_unique_visited(&SearchNode::new(&root, 0));
        for _ in 0..1200 {
            stats.add_created(&SearchNode::new(&child, 0));
        }
        stats.add_deadlocked(&SearchNode::new(&child, 0));

        let printed = stats.to_string();
        let table: Vec<Vec<&str>> = printed
            .lines()
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .map(|line| line.split_whitespace().collect())
            .collect();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table[0],
            vec!["Depth", "Created", "Unique", "Duplicates", "Deadlocked", "Unknown", "(not", "reached)"]
        );
        assert_eq!(table[1], vec!["0:", "1", "1", "0", "0", "0"]);
        assert_eq!(table[2], vec!["1:", "1,200", "0", "0", "1", "1,199"]);
    }
}
