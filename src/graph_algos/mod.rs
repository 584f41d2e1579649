pub mod dijkstra;
pub mod a_star;
mod shortest_path;

use shortest_path::resolve_path;

use crate::collections::FxIndexMap;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start,
///   None for seeded nodes that were never reached (infinitely far)
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, Option<C>)>;


/// Knobs shared by both searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop as soon as a goal node leaves the queue.
    /// When false the whole reachable graph is settled first.
    pub stop_at_arrival: bool,
    /// Give up with `Error::ExpansionLimit` after this many expansions
    pub max_expansions: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            stop_at_arrival: true,
            max_expansions: None,
        }
    }
}

impl SearchOptions {

    /// Settle every reachable node before answering
    pub fn exhaustive() -> Self {
        Self {
            stop_at_arrival: false,
            ..Self::default()
        }
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
