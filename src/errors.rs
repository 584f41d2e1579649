use thiserror::Error;

use crate::graph::{CityId, Cost};

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Id does not belong to the city map it was used with.
    #[error("unknown city id {id}")]
    UnknownCity { id: CityId },

    /// Link weights must be non-negative for the searches to be correct.
    #[error("negative weight {weight} between {from} and {to}")]
    NegativeWeight { from: CityId, to: CityId, weight: Cost },

    /// Search popped more entries than `SearchOptions::max_expansions` allows.
    #[error("search stopped after {limit} expansions")]
    ExpansionLimit { limit: usize },

    /// Unable to reconstruct a path to the goal
    #[error("no path found")]
    NoPathFound,
}
