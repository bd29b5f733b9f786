mod dataset;
mod menu;
mod report;

use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::{Args, Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use indicatif::{ProgressBar, ProgressStyle};
use route_graph::{shortest_path, tsp::DEFAULT_MAX_TOUR_NODES, City, RouteGraph, TourSearch, TransportMode};

use dataset::load_routes;
use menu::Menu;
use report::{export_routes, write_cities, write_path, write_reach, write_routes};

/// Shortest paths and exhaustive tours over a small network of cities.
#[derive(Parser)]
#[clap(name = "routes")]
struct Cli {
    /// CSV file with the columns from,to,distance. Defaults to the built-in US cities.
    #[clap(short, long, global = true, parse(from_os_str))]
    dataset: Option<PathBuf>,

    /// Transport mode scaling every distance: car, bus or plane.
    #[clap(short, long, global = true, default_value = "car")]
    mode: TransportMode,

    /// Print debug output on stderr.
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Additionally write the log to this file.
    #[clap(long, global = true, parse(from_os_str))]
    log: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the cities of the model.
    Cities,
    /// List the scaled routes of the model.
    Routes(Routes),
    /// Find the cheapest path between two cities.
    Path(PathQuery),
    /// Cheapest cost from one city to every other city.
    Reach(Reach),
    /// Find the cheapest tour visiting every city once over direct routes.
    Tour(Tour),
    /// Interactive menu.
    Menu(MenuOptions),
}

#[derive(Args)]
struct Routes {
    /// Export the listing as CSV instead of printing it.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PathQuery {
    start: String,
    end: String,
}

#[derive(Args)]
struct Reach {
    from: String,
}

#[derive(Args)]
struct Tour {
    #[clap(flatten)]
    search: SearchOptions,

    /// Split the enumeration across all cores.
    #[clap(short, long)]
    parallel: bool,
}

#[derive(Args)]
struct MenuOptions {
    #[clap(flatten)]
    search: SearchOptions,
}

#[derive(Args, Clone, Debug)]
struct SearchOptions {
    /// Refuse exhaustive tour searches over more cities than this.
    #[clap(long, default_value_t = DEFAULT_MAX_TOUR_NODES)]
    max_nodes: usize,
}

impl SearchOptions {
    fn tour_search(&self) -> TourSearch {
        TourSearch::with_max_nodes(self.max_nodes)
    }
}

fn set_up_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);

    let stderr = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date}][{level}] {message}",
                date = chrono::Local::now().format("%H:%M:%S"),
                level = colors.color(record.level()),
                message = message
            ));
        })
        .level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .chain(io::stderr());

    let mut dispatch = fern::Dispatch::new().chain(stderr);
    if let Some(log_file) = log_file {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date}][{level}] {message}",
                        date = chrono::Local::now().format("%d.%m.%Y %H:%M:%S"),
                        level = record.level(),
                        message = message
                    ));
                })
                .level(log::LevelFilter::Info)
                .chain(fern::log_file(log_file)?),
        );
    }
    dispatch.apply()?;

    log::debug!("Logger set up!");

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = set_up_logging(cli.verbose, cli.log.as_ref()) {
        eprintln!("Cannot set up logging: {}", e);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(cli, &mut out) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), Box<dyn Error>> {
    let routes = load_routes(cli.dataset.as_deref())?;

    if let Command::Menu(options) = &cli.command {
        let stdin = io::stdin();
        let menu = Menu::new(&routes, options.search.tour_search());
        menu.run(&mut stdin.lock(), out)?;
        return Ok(());
    }

    let graph = RouteGraph::build(&routes, cli.mode)?;
    log::info!(
        "Model for {} with {} cities and {} routes.",
        graph.mode(),
        graph.cities().len(),
        graph.m()
    );

    match cli.command {
        Command::Cities => write_cities(out, &graph)?,
        Command::Routes(listing) => match listing.output {
            Some(output) => {
                export_routes(&graph, &output)?;
                writeln!(out, "Exported {} routes to {}.", graph.m(), output.display())?;
            }
            None => write_routes(out, &graph)?,
        },
        Command::Path(query) => {
            let start = City::from(query.start);
            let end = City::from(query.end);
            let path = shortest_path(&graph, &start, &end)?;
            write_path(out, &format!("Fastest route from {} to {}:", start, end), &path)?;
        }
        Command::Reach(reach) => write_reach(out, &graph, &City::from(reach.from))?,
        Command::Tour(tour) => {
            let search = tour.search.tour_search();

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner().template("{msg} {spinner:.green} [{elapsed_precise}]"),
            );
            pb.enable_steady_tick(80);
            pb.set_message("Enumerating tours");
            let result = if tour.parallel {
                search.best_tour_par(&graph)
            } else {
                search.best_tour(&graph)
            };
            pb.finish_and_clear();

            write_path(out, "Best tour (exhaustive):", &result?)?;
        }
        Command::Menu(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod test_cli {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).map_err(|e| e.to_string())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_path_command() {
        let text = run_args(&["routes", "path", "Dallas", "Austin"]).unwrap();
        assert!(text.starts_with("Fastest route from Dallas to Austin:\nDallas -> Austin\n"));
        assert!(text.contains("313.00 km"));
    }

    #[test]
    fn test_errors_read_as_messages() {
        assert_eq!(
            run_args(&["routes", "path", "Dallas", "Atlantis"]),
            Err("city not found: Atlantis".to_string())
        );
        assert_eq!(
            run_args(&["routes", "--mode", "plane", "tour", "--max-nodes", "3"]),
            Err("exhaustive tour search over 10 cities exceeds the limit of 3".to_string())
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(&["routes", "--mode", "boat", "cities"]).is_err());
    }
}
