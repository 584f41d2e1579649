use std::fmt;

use crate::collections::FxIndexMap;
use crate::errors::{Error, Result};
use crate::geometry::Coord;

/// Travel time along a link, also the unit of accumulated route cost
pub type Cost = i64;


/// Stable index of a city inside its `CityMap`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityId(usize);

impl CityId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// Named location with a position and weighted links to other cities
#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub name: String,
    pub position: Coord,
    connections: FxIndexMap<CityId, Cost>, // symmetric, only touched by CityMap::connect/disconnect
}

impl City {

    pub fn new(x: i32, y: i32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Coord::new(x, y),
            connections: FxIndexMap::default(),
        }
    }

    /// City at the origin
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(0, 0, name)
    }

    /// Neighbouring cities and the weight of the link to each
    pub fn connections(&self) -> impl Iterator<Item = (CityId, Cost)> + '_ {
        self.connections.iter().map(|(&id, &weight)| (id, weight))
    }

    pub fn degree(&self) -> usize {
        self.connections.len()
    }
}

impl Default for City {
    fn default() -> Self {
        Self::named("Unknown City")
    }
}


/// Arena owning every city; links are stored on both endpoints
#[derive(Clone, Debug, Default)]
pub struct CityMap {
    cities: Vec<City>,
}

impl CityMap {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city, returning its id
    pub fn add(&mut self, city: City) -> CityId {
        self.cities.push(city);
        CityId(self.cities.len() - 1)
    }

    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.get(id.0)
    }

    /// Same as `get` but with an error for ids from another map
    pub fn city(&self, id: CityId) -> Result<&City> {
        self.get(id).ok_or(Error::UnknownCity { id })
    }

    pub fn contains(&self, id: CityId) -> bool {
        id.0 < self.cities.len()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.cities.len()).map(CityId)
    }

    /// First city carrying `name`; names are not required to be unique
    pub fn find_by_name(&self, name: &str) -> Option<CityId> {
        self.cities.iter().position(|city| city.name == name).map(CityId)
    }

    /// Link two cities in both directions, replacing any previous weight
    pub fn connect(&mut self, a: CityId, b: CityId, weight: Cost) -> Result<()> {
        self.city(a)?;
        self.city(b)?;
        if weight < 0 {
            return Err(Error::NegativeWeight { from: a, to: b, weight });
        }

        self.cities[a.0].connections.insert(b, weight);
        self.cities[b.0].connections.insert(a, weight);
        Ok(())
    }

    /// Remove the link between two cities in both directions
    /// Returns false when there was nothing to remove
    pub fn disconnect(&mut self, a: CityId, b: CityId) -> Result<bool> {
        self.city(a)?;
        self.city(b)?;

        // shift_remove keeps the insertion order of the remaining links
        let removed_ab = self.cities[a.0].connections.shift_remove(&b).is_some();
        let removed_ba = self.cities[b.0].connections.shift_remove(&a).is_some();
        Ok(removed_ab || removed_ba)
    }

    /// Weight of the direct link between two cities, if any
    pub fn weight(&self, a: CityId, b: CityId) -> Option<Cost> {
        self.get(a)?.connections.get(&b).copied()
    }

    /// Neighbours of a city; empty for unknown ids
    pub fn neighbours(&self, id: CityId) -> impl Iterator<Item = (CityId, Cost)> + '_ {
        self.get(id).into_iter().flat_map(City::connections)
    }

    /// Sum of link weights along `path`
    /// None if two consecutive cities are not linked or the sum overflows `Cost`
    pub fn path_cost(&self, path: &[CityId]) -> Option<Cost> {
        path.windows(2)
            .try_fold(0, |total: Cost, pair| total.checked_add(self.weight(pair[0], pair[1])?))
    }
}
