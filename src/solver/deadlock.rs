//! Cheap checks for box configurations that can never be solved.
//!
//! Everything here is sound but incomplete: `true` means the position is
//! definitely lost, `false` means nothing. Boxes already on goals are never
//! reported by themselves since they don't need to move.

use fnv::FnvHashSet;

use crate::board::Board;
use crate::codec::Key;
use crate::data::{Dir, Pos, DIRECTIONS};
use crate::state::BoxSet;

const CORNERS: [(Dir, Dir); 4] = [
    (Dir::Up, Dir::Left),
    (Dir::Up, Dir::Right),
    (Dir::Down, Dir::Left),
    (Dir::Down, Dir::Right),
];

pub fn is_deadlocked(board: &Board, boxes: &BoxSet) -> bool {
    for box_pos in boxes.iter() {
        if board.is_goal(box_pos) {
            continue;
        }
        if in_corner(board, box_pos) {
            trace!("corner deadlock at {}", box_pos);
            return true;
        }
        if in_frozen_pair(board, boxes, box_pos) {
            trace!("frozen pair deadlock at {}", box_pos);
            return true;
        }
    }

    frozen_group(board, boxes)
}

fn in_corner(board: &Board, box_pos: Pos) -> bool {
    CORNERS.iter().any(|&(vertical, horizontal)| {
        board.blocked(box_pos, vertical) && board.blocked(box_pos, horizontal)
    })
}

/// A wall on either side makes pushing along that axis impossible:
/// pushing into the wall is illegal and the agent can't stand in it to push away from it.
fn frozen_along(board: &Board, pos: Pos, vertical: bool) -> bool {
    if vertical {
        board.blocked(pos, Dir::Up) || board.blocked(pos, Dir::Down)
    } else {
        board.blocked(pos, Dir::Left) || board.blocked(pos, Dir::Right)
    }
}

/// Two neighboring boxes that can't move along one axis because of walls
/// and block each other along the other axis.
fn in_frozen_pair(board: &Board, boxes: &BoxSet, box_pos: Pos) -> bool {
    for &vertical in &[true, false] {
        if !frozen_along(board, box_pos, vertical) {
            continue;
        }

        // the free axis
        let (side1, side2) = if vertical {
            (Dir::Left, Dir::Right)
        } else {
            (Dir::Up, Dir::Down)
        };
        for &side in &[side1, side2] {
            let other = match board.neighbor(box_pos, side) {
                Some(other) => other,
                None => continue,
            };
            if boxes.contains(other) && frozen_along(board, other, vertical) {
                return true;
            }
        }
    }
    false
}

/// Groups of touching boxes which are not on goals where no box
/// has a legal push, even ignoring boxes outside the group.
fn frozen_group(board: &Board, boxes: &BoxSet) -> bool {
    let mut checked = FnvHashSet::default();

    for box_pos in boxes.iter() {
        let key = box_pos.key();
        if checked.contains(&key) || board.is_goal(box_pos) {
            continue;
        }

        let group = collect_group(board, boxes, box_pos);
        if !group.iter().any(|&key| can_push(board, &group, Pos::from_key(key))) {
            trace!("frozen group deadlock at {}, {} boxes", box_pos, group.len());
            return true;
        }
        checked.extend(group);
    }

    false
}

/// Iterative DFS, a packed level would overflow the stack with recursion.
fn collect_group(board: &Board, boxes: &BoxSet, start: Pos) -> FnvHashSet<Key> {
    let mut group = FnvHashSet::default();
    let mut to_visit = vec![start];

    while let Some(cur) = to_visit.pop() {
        let key = cur.key();
        if group.contains(&key) || !boxes.contains_key(key) || board.is_goal(cur) {
            continue;
        }
        group.insert(key);

        for &dir in &DIRECTIONS {
            if let Some(next) = board.neighbor(cur, dir) {
                to_visit.push(next);
            }
        }
    }

    group
}

fn can_push(board: &Board, group: &FnvHashSet<Key>, box_pos: Pos) -> bool {
    let free = |pos: Option<Pos>| match pos {
        Some(pos) => !board.is_wall(pos) && !group.contains(&pos.key()),
        None => false,
    };

    DIRECTIONS.iter().any(|&dir| {
        let dest = board.neighbor(box_pos, dir);
        let origin = board.neighbor(box_pos, dir.inverse());
        free(dest) && free(origin)
    })
}
