use crate::errors::{Error, Result};
use super::{GraphNodeMap, SearchOptions, resolve_path};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::{CheckedAdd, Zero};
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::{trace, warn};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// seeds: nodes given an explicit infinite distance before the search starts
/// Returns the path from start to goal and its cost
pub fn dijkstra<N, C, S, IT, NN, G>(start: N, seeds: S, neighbors: NN, goal: G, options: &SearchOptions) -> Result<(Vec<N>, C)>
where
    N: Eq + Hash + Clone + Debug,
    S: IntoIterator<Item = N>,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met, or exhausts it
    let (node_map, goal_index) = build_dijkstra_graph(start, seeds, neighbors, &goal, options)?;

    resolve_path(&node_map, goal_index, goal)
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
/// Goal index is None when no goal was popped or `stop_at_arrival` is off
fn build_dijkstra_graph<N, C, S, IT, NN, G>(start: N, seeds: S, neighbors: NN, goal_fn: G, options: &SearchOptions) -> Result<(GraphNodeMap<N, C>, Option<usize>)>
where
    N: Eq + Hash + Clone + Debug,
    S: IntoIterator<Item = N>,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // Dijkstra's algorithm uses a priority queue to always expand the least costly node first
    // We store the cost from the starting node
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // usize is the index in the nodes_map
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    // A missing node and a seeded node both mean "infinitely far", never zero
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    // Add start node to the map and queue
    let start_index = nodes_map.insert_full(start, (usize::MAX, Some(Zero::zero()))).0;
    for seed in seeds {
        nodes_map.entry(seed).or_insert((usize::MAX, None));
    }
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: Zero::zero(), // This is the cost from the start node
    });

    let mut expansions = 0usize;

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, Some(c)))) = nodes_map.get_index(index) else {
            continue;
        };

        // If cost of new node from BinaryHeap is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > c {
            continue;
        }

        if let Some(limit) = options.max_expansions {
            if expansions >= limit {
                warn!(limit, "dijkstra expansion budget exhausted");
                return Err(Error::ExpansionLimit { limit });
            }
        }
        expansions += 1;

        // Check if we've reached the goal
        if options.stop_at_arrival && goal_fn(node) {
            trace!(expansions, "dijkstra reached goal");
            return Ok((nodes_map, Some(index)));
        }

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(node).into_iter() {

            // new cost to reach this node = edge cost + node cost
            // a sum past C's range is dearer than any representable path
            let Some(new_cost) = c.checked_add(&edge_cost) else {
                trace!(from = index, "cost overflow, link skipped");
                continue;
            };

            // Check if we've found a better path to this neighbor
            let neighbor_index;

            match nodes_map.entry(neighbor) {
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

            trace!(from = index, to = neighbor_index, cost = ?new_cost, "relaxed");

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    trace!(expansions, "dijkstra queue exhausted");
    Ok((nodes_map, None))
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - Nodes can contain additional data, but we only need to identify them
/// - ties on cost go to the lower index so runs are reproducible
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Helper function to create a test graph
    fn create_test_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = HashMap::new();

        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]);

        graph.insert("B".to_string(), vec![
            ("D".to_string(), 5),
        ]);

        graph.insert("C".to_string(), vec![
            ("D".to_string(), 1),
        ]);

        graph.insert("D".to_string(), vec![]);

        graph
    }

    // Helper function to create a neighbor function from a graph
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn no_seeds() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_build_dijkstra_graph_simple() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A
        let (result, goal_index) = build_dijkstra_graph(
            "A".to_string(),
            no_seeds(),
            neighbors,
            |node: &String| node == "D", // Goal is to reach node D
            &SearchOptions::default(),
        ).unwrap();

        // Verify costs
        let costs: HashMap<_, _> = result.iter().filter_map(|(node, (_, cost))| cost.map(|cost| (node.clone(), cost))).collect();

        assert_eq!(costs.get("A").unwrap(), &0);
        assert_eq!(costs.get("B").unwrap(), &1);
        assert_eq!(costs.get("C").unwrap(), &3);
        assert_eq!(costs.get("D").unwrap(), &4); // Should be 4 via the A->C->D path
        assert_eq!(goal_index, result.get_index_of("D"));
    }

    #[test]
    fn test_build_dijkstra_graph_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph = HashMap::new();

        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A
        let (result, _) = build_dijkstra_graph(
            "A".to_string(),
            no_seeds(),
            neighbors,
            |node: &String| node == "D",
            &SearchOptions::default(),
        ).unwrap();

        // Verify costs
        let costs: HashMap<_, _> = result.iter().filter_map(|(node, (_, cost))| cost.map(|cost| (node.clone(), cost))).collect();

        assert_eq!(costs.get("A").unwrap(), &0);
        assert_eq!(costs.get("B").unwrap(), &1);
        assert_eq!(costs.get("C").unwrap(), &2);
        assert_eq!(costs.get("D").unwrap(), &4);
    }

    #[test]
    fn test_seeded_nodes_start_infinite() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        // Z is seeded but unreachable, D is seeded and reachable
        let seeds = vec!["Z".to_string(), "D".to_string(), "A".to_string()];
        let (result, _) = build_dijkstra_graph(
            "A".to_string(),
            seeds,
            neighbors,
            |_: &String| false,
            &SearchOptions::exhaustive(),
        ).unwrap();

        assert_eq!(result.get("A"), Some(&(usize::MAX, Some(0))));
        assert_eq!(result.get("Z"), Some(&(usize::MAX, None)));
        assert_eq!(result.get("D").map(|&(_, cost)| cost), Some(Some(4)));
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A to node D
        let (path, cost) = dijkstra(
            "A".to_string(),
            no_seeds(),
            neighbors,
            |node: &String| node == "D",
            &SearchOptions::default(),
        ).unwrap();

        // The expected path is A -> C -> D (the cheapest path)
        assert_eq!(path, vec!["A", "C", "D"].into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(cost, 4);
    }

    #[test]
    fn test_dijkstra_exhaustive_matches_early_exit() {
        let graph = create_test_graph();

        let early = dijkstra("A".to_string(), no_seeds(), create_neighbor_fn(&graph), |node: &String| node == "D", &SearchOptions::default()).unwrap();
        let full = dijkstra("A".to_string(), no_seeds(), create_neighbor_fn(&graph), |node: &String| node == "D", &SearchOptions::exhaustive()).unwrap();

        assert_eq!(early, full);
    }

    #[test]
    fn test_dijkstra_start_is_goal() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let (path, cost) = dijkstra("B".to_string(), no_seeds(), neighbors, |node: &String| node == "B", &SearchOptions::default()).unwrap();

        assert_eq!(path, vec!["B".to_string()]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        // Create a graph with no path to the goal
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]); // D is not connected

        for options in [SearchOptions::default(), SearchOptions::exhaustive()] {
            let neighbors = create_neighbor_fn(&graph);
            // D is seeded, so it sits in the map with an infinite cost
            let result = dijkstra("A".to_string(), vec!["D".to_string()], neighbors, |node: &String| node == "D", &options);

            // Expect a NoPathFound error
            assert!(matches!(result, Err(Error::NoPathFound)));
        }
    }

    #[test]
    fn test_dijkstra_expansion_limit() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let options = SearchOptions::default().with_max_expansions(2);
        let result = dijkstra("A".to_string(), no_seeds(), neighbors, |node: &String| node == "D", &options);

        assert_eq!(result, Err(Error::ExpansionLimit { limit: 2 }));
    }

    #[test]
    fn test_dijkstra_finds_route_at_max_cost() {
        // A -> B -> C overflows u32, the direct link costs exactly u32::MAX
        let half = u32::MAX / 2 + 1;
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("C".to_string(), u32::MAX), ("B".to_string(), half)]);
        graph.insert("B".to_string(), vec![("C".to_string(), half)]);
        graph.insert("C".to_string(), vec![]);

        for options in [SearchOptions::default(), SearchOptions::exhaustive()] {
            let neighbors = create_neighbor_fn(&graph);
            let (path, cost) = dijkstra("A".to_string(), vec!["C".to_string()], neighbors, |node: &String| node == "C", &options).unwrap();

            assert_eq!(path, vec!["A".to_string(), "C".to_string()]);
            assert_eq!(cost, u32::MAX);
        }
    }

    #[test]
    fn test_dijkstra_complex_graph() {
        // Create a more complex graph with multiple paths
        let mut graph = HashMap::new();

        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);

        // Run Dijkstra's algorithm from node A to node F
        let (path, cost) = dijkstra("A".to_string(), no_seeds(), neighbors, |node: &String| node == "F", &SearchOptions::default()).unwrap();

        // Calculate the total cost of the path
        let mut total_cost = 0;
        for i in 0..path.len() - 1 {
            let from = &path[i];
            let to = &path[i + 1];
            let edge_cost = graph.get(from).unwrap()
                .iter()
                .find(|(node, _)| node == to)
                .map(|(_, cost)| *cost)
                .unwrap();
            total_cost += edge_cost;
        }

        // The total cost should be 14 (A->B->D->E->F)
        assert_eq!(total_cost, 14);
        assert_eq!(cost, 14);
    }
}
