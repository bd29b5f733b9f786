use std::{
    error::Error,
    io::{self, Write},
    path::Path as FilePath,
};

use csv::WriterBuilder;
use route_graph::{
    dijkstra::shortest_paths_from,
    graph::{Connected, Graph, GraphSize, TotalWeight},
    Path, RouteError, RouteGraph,
};
use serde::Serialize;

pub fn write_cities<W: Write>(out: &mut W, graph: &RouteGraph) -> io::Result<()> {
    let labels: Vec<&str> = graph.cities().iter().map(|c| c.label()).collect();
    writeln!(out, "Cities: {}", labels.join(", "))?;
    writeln!(
        out,
        "{} cities, {} routes, total {:.2} ({}), connected: {}",
        graph.n(),
        graph.m(),
        graph.total_weight().as_float(),
        graph.mode(),
        graph.connected()
    )
}

/// Scaled route listing, one route per line.
pub fn write_routes<W: Write>(out: &mut W, graph: &RouteGraph) -> io::Result<()> {
    for route in graph.routes() {
        writeln!(
            out,
            "{:<15} -- {:<15} {:>10.2}",
            route.from.label(),
            route.to.label(),
            route.cost.as_float()
        )?;
    }
    Ok(())
}

pub fn export_routes<P: AsRef<FilePath>>(graph: &RouteGraph, filename: P) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(filename)?;
    for route in graph.routes() {
        writer.serialize(route)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_path<W: Write>(out: &mut W, title: &str, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", path)?;
    writeln!(
        out,
        "Total after transport scaling: {:.2} km (relative travel time)",
        path.cost().as_float()
    )
}

#[derive(Debug, Serialize)]
struct ReachRow<'a> {
    city: &'a str,
    cost: Option<f64>,
}

/// Cheapest cost from `from` to every city of the graph; unreachable cities are marked.
pub fn write_reach<W: Write>(
    out: &mut W,
    graph: &RouteGraph,
    from: &route_graph::City,
) -> Result<(), Box<dyn Error>> {
    let start = graph
        .node_of(from)
        .ok_or_else(|| RouteError::CityNotFound(from.clone()))?;
    let paths = shortest_paths_from(graph, start);

    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(out);
    for (node, city) in graph.cities().iter().enumerate() {
        writer.serialize(ReachRow {
            city: city.label(),
            cost: paths.cost_to(node.into()).map(|c| c.as_float()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_report {
    use route_graph::{shortest_path, City, RouteEdge, TransportMode};

    use super::*;

    fn graph() -> RouteGraph {
        RouteGraph::build(
            &[
                RouteEdge::new("X", "Y", 10.0),
                RouteEdge::new("Y", "Z", 20.0),
                RouteEdge::new("U", "V", 1.0),
            ],
            TransportMode::Plane,
        )
        .unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>),
    {
        let mut out = vec![];
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_cities() {
        let text = render(|out| write_cities(out, &graph()).unwrap());
        assert!(text.starts_with("Cities: U, V, X, Y, Z\n"));
        assert!(text.contains("5 cities, 3 routes, total 15.50 (plane), connected: false"));
    }

    #[test]
    fn test_write_routes() {
        let text = render(|out| write_routes(out, &graph()).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("U "));
        assert!(lines[0].ends_with("0.50"));
        assert!(lines[2].ends_with("10.00"));
    }

    #[test]
    fn test_write_path() {
        let g = graph();
        let path = shortest_path(&g, &City::from("X"), &City::from("Z")).unwrap();
        let text = render(|out| write_path(out, "Fastest route:", &path).unwrap());
        assert_eq!(
            text,
            "Fastest route:\nX -> Y -> Z\nTotal after transport scaling: 15.00 km (relative travel time)\n"
        );
    }

    #[test]
    fn test_write_reach() {
        let g = graph();
        let text = render(|out| write_reach(out, &g, &City::from("X")).unwrap());
        assert_eq!(text, "city\tcost\nU\t\nV\t\nX\t0.0\nY\t5.0\nZ\t15.0\n");

        let mut out = vec![];
        assert!(write_reach(&mut out, &g, &City::from("Q")).is_err());
    }
}
