//! Shortest routes between cities linked by timed roads.
//!
//! Build a [`CityMap`], wire it with [`CityMap::connect`], then ask a
//! [`PathFinder`] for the cheapest [`Route`] with Dijkstra or A*.

mod collections;
pub mod errors;
pub mod finder;
pub mod geometry;
pub mod graph;
pub mod graph_algos;

pub use collections::FxHashSet;
pub use errors::{Error, Result};
pub use finder::{NO_PATH, PathFinder, Route};
pub use geometry::{Coord, heuristic};
pub use graph::{City, CityId, CityMap, Cost};
pub use graph_algos::SearchOptions;
