#![allow(dead_code)]

use citynav::{City, CityId, CityMap};

/// The five-city map used throughout the docs
pub struct SampleMap {
    pub map: CityMap,
    pub c1: CityId,
    pub c2: CityId,
    pub c3: CityId,
    pub c4: CityId,
    pub c5: CityId,
}

pub fn sample_map() -> SampleMap {
    let mut map = CityMap::new();
    let c1 = map.add(City::new(0, 0, "City1"));
    let c2 = map.add(City::new(1, 1, "City2"));
    let c3 = map.add(City::new(0, 4, "City3"));
    let c4 = map.add(City::new(-1, 5, "City4"));
    let c5 = map.add(City::new(2, 3, "City5"));

    for (a, b, weight) in [
        (c1, c2, 1),
        (c1, c5, 10),
        (c2, c5, 2),
        (c2, c3, 2),
        (c3, c5, 2),
        (c3, c4, 1),
        (c5, c4, 10),
    ] {
        map.connect(a, b, weight).unwrap();
    }

    SampleMap { map, c1, c2, c3, c4, c5 }
}
