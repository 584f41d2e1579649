use crate::errors::{Error, Result};
use super::GraphNodeMap;


/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>> 
where 
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != usize::MAX {
        // A parent chain longer than the map means the links form a cycle
        if path.len() > node_map.len() {
            return Err(Error::NoPathFound);
        }

        if let Some((node, &(parent_index, _))) = node_map.get_index(current_index) {
            path.push(node.clone());
            current_index = parent_index;
        } else {
            return Err(Error::NoPathFound);
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return Err(Error::NoPathFound);
    }

    Ok(path)
}


/// Index of the cheapest reached node accepted by `goal_fn`
/// Used when the search ran to exhaustion instead of stopping at the goal
pub(crate) fn cheapest_goal<N, C, G>(node_map: &GraphNodeMap<N, C>, goal_fn: G) -> Option<usize>
where
    C: Ord + Copy,
    G: Fn(&N) -> bool,
{
    let mut best: Option<(usize, C)> = None;

    for (index, (node, &(_, cost))) in node_map.iter().enumerate() {
        // seeded entries that were never relaxed are still infinite
        let Some(cost) = cost else {
            continue;
        };
        if !goal_fn(node) {
            continue;
        }
        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((index, cost));
        }
    }

    best.map(|(index, _)| index)
}


/// Turn a finished search into (path, cost)
/// goal_index is the goal popped from the queue, if the search stopped there
pub(crate) fn resolve_path<N, C, G>(node_map: &GraphNodeMap<N, C>, goal_index: Option<usize>, goal_fn: G) -> Result<(Vec<N>, C)>
where
    N: Clone,
    C: Ord + Copy,
    G: Fn(&N) -> bool,
{
    let goal_index = goal_index
        .or_else(|| cheapest_goal(node_map, goal_fn))
        .ok_or(Error::NoPathFound)?;

    let cost = match node_map.get_index(goal_index) {
        Some((_, &(_, Some(cost)))) => cost,
        _ => return Err(Error::NoPathFound),
    };

    Ok((shortest_path(node_map, goal_index)?, cost))
}
