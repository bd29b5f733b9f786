use std::{error::Error, path::Path};

use route_graph::graph::RouteEdge;

/// Road distances in kilometers between ten US cities.
const US_CITIES: [(&str, &str, f64); 30] = [
    ("Los Angeles", "Chicago", 3242.0),
    ("Los Angeles", "Dallas", 2311.0),
    ("Los Angeles", "Phoenix", 598.0),
    ("Los Angeles", "San Antonio", 2175.0),
    ("Los Angeles", "San Diego", 193.0),
    ("San Diego", "Phoenix", 569.0),
    ("San Diego", "Austin", 2090.0),
    ("San Diego", "Houston", 2365.0),
    ("San Diego", "San Antonio", 2050.0),
    ("Phoenix", "New York City", 3873.0),
    ("Phoenix", "Chicago", 2822.0),
    ("Phoenix", "Dallas", 1717.0),
    ("Phoenix", "Austin", 1622.0),
    ("Phoenix", "San Antonio", 1581.0),
    ("San Antonio", "Dallas", 440.0),
    ("San Antonio", "Austin", 127.0),
    ("San Antonio", "Houston", 317.0),
    ("Houston", "Austin", 260.0),
    ("Houston", "Dallas", 384.0),
    ("Houston", "Chicago", 1741.0),
    ("Houston", "Philadelphia", 2484.0),
    ("Houston", "New York City", 2628.0),
    ("Austin", "Philadelphia", 2669.0),
    ("Austin", "Dallas", 313.0),
    ("Dallas", "Philadelphia", 2360.0),
    ("Dallas", "New York City", 2500.0),
    ("Dallas", "Chicago", 1490.0),
    ("Philadelphia", "New York City", 157.0),
    ("Philadelphia", "Chicago", 1223.0),
    ("New York City", "Chicago", 1281.0),
];

pub fn builtin_routes() -> Vec<RouteEdge> {
    US_CITIES.iter().map(|&route| route.into()).collect()
}

/// Reads routes from a CSV file with the header `from,to,distance`.
pub fn import_routes(filename: &Path) -> Result<Vec<RouteEdge>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(filename)?;
    let mut routes = vec![];
    for record in reader.deserialize() {
        let route: RouteEdge = record?;
        routes.push(route);
    }
    log::info!("Imported {} routes from {}.", routes.len(), filename.display());
    Ok(routes)
}

/// The routes of `filename`, or the built-in dataset if no file is given.
pub fn load_routes(filename: Option<&Path>) -> Result<Vec<RouteEdge>, Box<dyn Error>> {
    match filename {
        Some(filename) => import_routes(filename),
        None => Ok(builtin_routes()),
    }
}
