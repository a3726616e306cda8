use crate::board::Board;
use crate::data::Pos;
use crate::state::BoxSet;

/// Less is better. Sum of distances of every box to its closest goal
/// plus the distance from the agent to the closest box that still needs pushing.
///
/// Ignores walls and which side the agent has to push from
/// so it can overestimate on some layouts.
pub fn estimate(board: &Board, agent: Pos, boxes: &BoxSet) -> u32 {
    let mut goal_dist_sum = 0;
    let mut closest_box = None;

    for box_pos in boxes.iter() {
        goal_dist_sum += board
            .goals()
            .iter()
            .map(|&goal| box_pos.dist(goal))
            .min()
            .unwrap_or(0);

        if !board.is_goal(box_pos) {
            let dist = agent.dist(box_pos);
            closest_box = Some(closest_box.map_or(dist, |closest: u32| closest.min(dist)));
        }
    }

    goal_dist_sum + closest_box.unwrap_or(0)
}
