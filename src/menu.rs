use std::io::{self, BufRead, Write};

use route_graph::{shortest_path, City, RouteEdge, RouteGraph, TourSearch, TransportMode};

use crate::report::{write_path, write_routes};

/// The interactive text menu. Every query builds a fresh model for the chosen transport mode.
pub struct Menu<'r> {
    routes: &'r [RouteEdge],
    search: TourSearch,
}

impl<'r> Menu<'r> {
    pub fn new(routes: &'r [RouteEdge], search: TourSearch) -> Self {
        Menu { routes, search }
    }

    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<()> {
        loop {
            writeln!(out, "\n===== ROUTE PLANNER =====")?;
            writeln!(out, "1. List routes")?;
            writeln!(out, "2. Find the fastest path (Dijkstra)")?;
            writeln!(out, "3. Find the best tour (exhaustive)")?;
            writeln!(out, "4. Quit")?;

            let choice = match prompt(input, out, "Choice (1-4): ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };
            match choice.as_str() {
                "1" | "2" | "3" => {
                    let mode = match self.ask_mode(input, out)? {
                        Some(mode) => mode,
                        None => return Ok(()),
                    };
                    let graph = match RouteGraph::build(self.routes, mode) {
                        Ok(graph) => graph,
                        Err(e) => {
                            writeln!(out, "Cannot build the route graph: {}", e)?;
                            continue;
                        }
                    };
                    let finished = match choice.as_str() {
                        "1" => {
                            write_routes(out, &graph)?;
                            true
                        }
                        "2" => self.ask_path(input, out, &graph)?,
                        _ => self.ask_tour(input, out, &graph)?,
                    };
                    if !finished {
                        return Ok(());
                    }
                }
                "4" => {
                    writeln!(out, "Thank you for using the route planner!")?;
                    return Ok(());
                }
                _ => writeln!(out, "Invalid choice. Please pick 1 - 4.")?,
            }
        }
    }

    fn ask_mode<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<Option<TransportMode>> {
        let name = match prompt(input, out, "\nTransport (car / bus / plane): ")? {
            Some(name) => name,
            None => return Ok(None),
        };
        let mode = match name.parse::<TransportMode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::warn!("{}", e);
                writeln!(out, "Unknown transport mode. Using {}.", TransportMode::default())?;
                TransportMode::default()
            }
        };
        Ok(Some(mode))
    }

    /// Returns `false` if the input ended.
    fn ask_path<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W, graph: &RouteGraph) -> io::Result<bool> {
        let labels: Vec<&str> = graph.cities().iter().map(|c| c.label()).collect();
        writeln!(out, "\nCities: {}", labels.join(", "))?;
        let start = match prompt(input, out, "Start city: ")? {
            Some(start) => City::from(start),
            None => return Ok(false),
        };
        let end = match prompt(input, out, "Destination city: ")? {
            Some(end) => City::from(end),
            None => return Ok(false),
        };
        match shortest_path(graph, &start, &end) {
            Ok(path) => write_path(out, &format!("\nFastest route from {} to {}:", start, end), &path)?,
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(true)
    }

    /// Returns `false` if the input ended.
    fn ask_tour<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W, graph: &RouteGraph) -> io::Result<bool> {
        writeln!(out, "\n[WARNING] The exhaustive tour search can take a long time.")?;
        let answer = match prompt(input, out, "Continue? (y/n): ")? {
            Some(answer) => answer,
            None => return Ok(false),
        };
        if answer.eq_ignore_ascii_case("y") {
            match self.search.best_tour(graph) {
                Ok(tour) => write_path(out, "\nBest tour (exhaustive):", &tour)?,
                Err(e) => writeln!(out, "{}", e)?,
            }
        }
        Ok(true)
    }
}

/// Writes `text` and reads one trimmed line. Returns `None` at the end of the input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
