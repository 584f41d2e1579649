use num_traits::{Float, ToPrimitive};
use crate::graph::Cost;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where 
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// 2D integer coordinate of a city
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {

    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another coordinate
    pub fn distance(&self, other: &Coord) -> f64 {
        euclidean(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(other.x),
            f64::from(other.y),
        )
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}


/// A* heuristic between two coordinates, truncated to the edge weight unit
/// Only admissible when every link weight is at least the straight-line
/// distance between its endpoints
pub fn heuristic(from: &Coord, to: &Coord) -> Cost {
    // distance of two i32 points is finite and below i64::MAX
    from.distance(to).trunc().to_i64().unwrap_or(Cost::MAX)
}
