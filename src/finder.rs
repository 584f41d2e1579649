use tracing::debug;

use crate::collections::FxHashSet;
use crate::errors::{Error, Result};
use crate::geometry::heuristic;
use crate::graph::{CityId, CityMap, Cost};
use crate::graph_algos::{SearchOptions, a_star::AStar, dijkstra::dijkstra};

/// Route cost reported when the arrival cannot be reached
pub const NO_PATH: Cost = -1;


/// Outcome of a search: cities from departure to arrival and the total cost
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub cities: Vec<CityId>,
    pub cost: Cost, // NO_PATH when unreachable
}

impl Route {

    pub fn not_found() -> Self {
        Self {
            cities: Vec::new(),
            cost: NO_PATH,
        }
    }

    pub fn is_found(&self) -> bool {
        self.cost != NO_PATH
    }

    /// Total cost, None when no path exists
    pub fn cost(&self) -> Option<Cost> {
        self.is_found().then_some(self.cost)
    }

    /// City names along the route, for display
    pub fn city_names<'g>(&self, map: &'g CityMap) -> Vec<&'g str> {
        self.cities
            .iter()
            .filter_map(|&id| map.get(id))
            .map(|city| city.name.as_str())
            .collect()
    }
}


/// Search engine over a borrowed city map
///
/// The active set only decides which cities get an explicit "infinitely far"
/// entry before a search starts. Searches still follow every link a city owns,
/// registered or not, so restricting the set never hides a path.
#[derive(Clone, Debug)]
pub struct PathFinder<'g> {
    map: &'g CityMap,
    active: FxHashSet<CityId>,
    options: SearchOptions,
}

impl<'g> PathFinder<'g> {

    pub fn new(map: &'g CityMap) -> Self {
        Self::with_options(map, SearchOptions::default())
    }

    pub fn with_options(map: &'g CityMap, options: SearchOptions) -> Self {
        Self {
            map,
            active: FxHashSet::default(),
            options,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    /// Register one city; adding it twice changes nothing
    pub fn add_node(&mut self, id: CityId) -> Result<()> {
        self.map.city(id)?;
        self.active.insert(id);
        Ok(())
    }

    /// Replace the active set wholesale
    pub fn set_active_set<I>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = CityId>,
    {
        let active = ids
            .into_iter()
            .map(|id| self.map.city(id).map(|_| id))
            .collect::<Result<FxHashSet<_>>>()?;
        self.active = active;
        Ok(())
    }

    pub fn active_set(&self) -> &FxHashSet<CityId> {
        &self.active
    }

    /// Cheapest route by Dijkstra's algorithm
    pub fn dijkstra(&self, depart: CityId, arrive: CityId) -> Result<Route> {
        self.check_endpoints(depart, arrive)?;
        debug!(%depart, %arrive, active = self.active.len(), "dijkstra search");

        let result = dijkstra(
            depart,
            self.active.iter().copied(),
            |&id: &CityId| self.map.neighbours(id),
            |&id: &CityId| id == arrive,
            &self.options,
        );

        self.finish("dijkstra", result)
    }

    /// Cheapest route by A*, guided by the straight-line distance to the arrival
    pub fn a_star(&self, depart: CityId, arrive: CityId) -> Result<Route> {
        self.check_endpoints(depart, arrive)?;
        let target = self.map.city(arrive)?.position;
        debug!(%depart, %arrive, active = self.active.len(), "a* search");

        let a_star = AStar::new(self.options.clone());
        let result = a_star.plan(
            depart,
            self.active.iter().copied(),
            |&id: &CityId| self.map.neighbours(id),
            |&id: &CityId| {
                self.map
                    .get(id)
                    .map_or(0, |city| heuristic(&city.position, &target))
            },
            |&id: &CityId| id == arrive,
        );

        self.finish("a*", result)
    }

    fn check_endpoints(&self, depart: CityId, arrive: CityId) -> Result<()> {
        self.map.city(depart)?;
        self.map.city(arrive)?;
        Ok(())
    }

    /// Map the generic search outcome onto a route, unreachable becomes NO_PATH
    fn finish(&self, algorithm: &str, result: Result<(Vec<CityId>, Cost)>) -> Result<Route> {
        match result {
            Ok((cities, cost)) => {
                debug!(algorithm, cost, hops = cities.len().saturating_sub(1), "route found");
                Ok(Route { cities, cost })
            }
            Err(Error::NoPathFound) => {
                debug!(algorithm, "no route");
                Ok(Route::not_found())
            }
            Err(e) => Err(e),
        }
    }
}
