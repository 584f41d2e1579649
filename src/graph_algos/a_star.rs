use crate::errors::{Error, Result};
use super::{GraphNodeMap, SearchOptions, resolve_path};

use std::{
    collections::BinaryHeap,
    hash::Hash,
    fmt::Debug,
    cmp::Ordering
};
use num_traits::{CheckedAdd, SaturatingAdd, Zero};
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::{trace, warn};



/// Node on A* graph
#[derive(Debug)]
struct Node<T> {
    index: usize, // index in the closed_list - maps to the Id of the node
    cost: T, // Cost to reach this node
    f_cost: T, // Total cost = cost + h(n) aka estimated cost
}

impl<T: Ord> Ord for Node<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.cmp(&self.f_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for Node<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for Node<T> {}

/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
#[derive(Debug, Clone, Default)]
pub struct AStar {
    pub options: SearchOptions,
}

impl AStar{

    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// From start Node, traverse through graph until node meets goal criteria
    /// Returns the path from start to goal and its cost
    /// With `stop_at_arrival` the heuristic must be admissible (never overestimate
    /// the true cost to reach the goal) for the path to be optimal.
    /// An exhaustive search is optimal for any non-negative edge costs.
    pub fn plan<N, C, S, IT, NN, H, G>(&self, start: N, seeds: S, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Result<(Vec<N>, C)>
    where
        N: Eq + Hash + Clone + Debug,
        S: IntoIterator<Item = N>,
        NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
        H: Fn(&N) -> C, // heuristic function
        IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
        C: Zero + CheckedAdd + SaturatingAdd + Ord + Copy + Debug,
        G: Fn(&N) -> bool, // node qualifier for goal
        {

        // build_a_star_graph
        let (node_map, goal_index) = self.build_graph(start, seeds, neighbors, heuristic_fn, &goal_fn)?;

        // Return the shortest path
        resolve_path(&node_map, goal_index, goal_fn)
    }


    /// Traverses the graph using A* algorithm
    /// Returns a map of nodes with their smallest costs along with the index of the goal node
    fn build_graph<N, C, S, IT, NN, H, G>(&self, start: N, seeds: S, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Result<(GraphNodeMap<N, C>, Option<usize>)>
    where
        N: Eq + Hash + Clone + Debug,
        S: IntoIterator<Item = N>,
        NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
        IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
        C: Zero + CheckedAdd + SaturatingAdd + Ord + Copy + Debug,
        H: Fn(&N) -> C, // heuristic function
        G: Fn(&N) -> bool // Returns true if goal is met
    {
        // Open List
        // Nodes that need to be evaluated, implemented as priority queue
        // Sorting is done by f_cost (cost + heuristic)
        let mut open_list: BinaryHeap<Node<C>> = BinaryHeap::new();

        // Evaluated nodes, avoids re-evaluating nodes, used to find the final path
        // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the closed_list
        // for the start node, parent_index is set to usize::MAX to indicate it has no parent
        // cost is the true cost (g), the heuristic only orders the open list
        let mut closed_list: GraphNodeMap<N, C> = GraphNodeMap::default();

        // Add the start node to both open & closed list
        let start_estimate = heuristic_fn(&start);
        let start_index = closed_list.insert_full(start, (usize::MAX, Some(Zero::zero()))).0;
        for seed in seeds {
            closed_list.entry(seed).or_insert((usize::MAX, None));
        }
        open_list.push(Node{
            index: start_index,
            cost: Zero::zero(), // This is the cost from the start node
            f_cost: start_estimate, // cost + heuristic
        });

        let mut expansions = 0usize;

        while let Some(Node{index, cost, ..}) = open_list.pop() {

            // fetch current best cost for node
            let Some((node, &(_, Some(c)))) = closed_list.get_index(index) else {
                continue;
            };

            // If cost of new node from BinaryHeap is higher than the best cost, skip it
            // This implies we've already found a better path to this node
            if cost > c {
                continue;
            }

            if let Some(limit) = self.options.max_expansions {
                if expansions >= limit {
                    warn!(limit, "a* expansion budget exhausted");
                    return Err(Error::ExpansionLimit { limit });
                }
            }
            expansions += 1;

            // Check if we've reached the goal
            if self.options.stop_at_arrival && goal_fn(node) {
                trace!(expansions, "a* reached goal");
                return Ok((closed_list, Some(index)));
            }

            // loop over neighbors
            for (neighbor, edge_cost) in neighbors(node).into_iter() {

                // new cost to reach this node = edge cost + node cost
                // This is confirmed cost, not heuristic
                // a sum past C's range is dearer than any representable path
                let Some(new_cost) = c.checked_add(&edge_cost) else {
                    trace!(from = index, "cost overflow, link skipped");
                    continue;
                };

                let neighbor_index: usize;
                // calculate heuristic cost
                let h_cost: C = heuristic_fn(&neighbor);

                match closed_list.entry(neighbor) {
                    Vacant(e) => {
                        // This is the first time we're seeing this neighbor
                        neighbor_index = e.index();
                        e.insert((index, Some(new_cost)));
                    }
                    Occupied(mut e) => {
                        if e.get().1.is_none_or(|best| best > new_cost) {
                            // We've found a better path to this neighbor
                            neighbor_index = e.index();
                            e.insert((index, Some(new_cost)));
                        } else {
                            // The existing path is better, do nothing
                            continue;
                        }
                    }
                }

                trace!(from = index, to = neighbor_index, cost = ?new_cost, estimate = ?h_cost, "relaxed");

                // Only add to the queue if we've found a better path
                open_list.push(Node {
                    index: neighbor_index,
                    cost: new_cost,
                    f_cost: new_cost.saturating_add(&h_cost),
                });
            }
        }

        trace!(expansions, "a* open list exhausted");
        Ok((closed_list, None))
    }
}
