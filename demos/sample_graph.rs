//! Builds the five-city sample map and logs a Dijkstra and an A* route.
//!
//! Run with `RUST_LOG=debug cargo run --example sample_graph` to see the
//! search events as well.

use citynav::{City, CityMap, PathFinder, Route};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn describe(route: &Route, map: &CityMap) -> String {
    match route.cost() {
        Some(cost) => format!("{} ({cost} units)", route.city_names(map).join(" -> ")),
        None => "no path".to_string(),
    }
}

fn main() -> citynav::Result<()> {
    init_tracing();

    let mut map = CityMap::new();
    let city1 = map.add(City::new(0, 0, "City1"));
    let city2 = map.add(City::new(1, 1, "City2"));
    let city3 = map.add(City::new(0, 4, "City3"));
    let city4 = map.add(City::new(-1, 5, "City4"));
    let city5 = map.add(City::new(2, 3, "City5"));

    map.connect(city1, city2, 1)?;
    map.connect(city1, city5, 10)?;
    map.connect(city2, city5, 2)?;
    map.connect(city2, city3, 2)?;
    map.connect(city3, city5, 2)?;
    map.connect(city3, city4, 1)?;
    map.connect(city5, city4, 10)?;

    {
        let mut finder = PathFinder::new(&map);
        for id in map.ids() {
            finder.add_node(id)?;
        }

        let route = finder.dijkstra(city1, city3)?;
        info!(route = %describe(&route, &map), "dijkstra City1 -> City3");
    }

    // there is no direct road, so this changes nothing
    map.disconnect(city1, city4)?;

    // the finder borrows the map, so a fresh one picks up the edited topology
    let mut finder = PathFinder::new(&map);
    finder.set_active_set([city1, city4])?;
    let route = finder.a_star(city4, city1)?;
    info!(route = %describe(&route, &map), "a* City4 -> City1 with active set {{City1, City4}}");

    Ok(())
}
