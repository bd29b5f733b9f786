use ndarray::Array2;
use rayon::prelude::*;

use crate::{
    cost::Cost,
    error::RouteError,
    graph::{Graph, Node, Path},
};

/// The node bound used by [`best_tour`]. It covers the built-in ten-city dataset.
pub const DEFAULT_MAX_TOUR_NODES: usize = 10;

/// Exhaustive search for the cheapest open tour, i.e. an ordering of all cities in which consecutive cities are
/// joined by a direct route. The tour does not return to its first city.
///
/// Every permutation is enumerated in lexicographic node order (which is the label order of the cities) and
/// rejected as soon as two consecutive cities are not adjacent. The search is factorial in the number of cities,
/// so graphs with more than `max_nodes` cities are refused with [`RouteError::TourTooLarge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourSearch {
    max_nodes: usize,
}

impl Default for TourSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl TourSearch {
    pub fn new() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_TOUR_NODES)
    }

    pub fn with_max_nodes(max_nodes: usize) -> Self {
        TourSearch { max_nodes }
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Finds the cheapest tour. Among tours of equal cost the first one in enumeration order wins.
    pub fn best_tour<'a, G>(&self, graph: &'a G) -> Result<Path, RouteError>
    where
        G: Graph<'a>,
    {
        if let Some(trivial) = self.prepare(graph)? {
            return Ok(trivial);
        }
        let links = DirectLinks::from_graph(graph);

        let best = (0..links.n())
            .filter_map(|first| links.best_with_first(first))
            .min_by(|a, b| a.cmp_enumeration(b));
        self.finish(graph, best)
    }

    /// Same result as [`TourSearch::best_tour`], with the enumeration split by first city across the rayon pool.
    pub fn best_tour_par<'a, G>(&self, graph: &'a G) -> Result<Path, RouteError>
    where
        G: Graph<'a>,
    {
        if let Some(trivial) = self.prepare(graph)? {
            return Ok(trivial);
        }
        let links = DirectLinks::from_graph(graph);

        let best = (0..links.n())
            .into_par_iter()
            .filter_map(|first| links.best_with_first(first))
            .min_by(|a, b| a.cmp_enumeration(b));
        self.finish(graph, best)
    }

    /// Checks the size bound and handles graphs with at most one city.
    fn prepare<'a, G>(&self, graph: &'a G) -> Result<Option<Path>, RouteError>
    where
        G: Graph<'a>,
    {
        let n = graph.n();
        if n > self.max_nodes {
            return Err(RouteError::TourTooLarge {
                nodes: n,
                limit: self.max_nodes,
            });
        }
        log::info!("Starting exhaustive tour search over {} cities.", n);
        Ok(match graph.nodes().next() {
            None => Some(Path::empty()),
            Some(node) if n == 1 => Some(Path::from_nodes(graph, &[node], Cost::zero())),
            Some(_) => None,
        })
    }

    fn finish<'a, G>(&self, graph: &'a G, best: Option<Candidate>) -> Result<Path, RouteError>
    where
        G: Graph<'a>,
    {
        match best {
            Some(candidate) => {
                let nodes: Vec<Node> = candidate.order.into_iter().map(Node::new).collect();
                let tour = Path::from_nodes(graph, &nodes, candidate.cost);
                log::info!("Finished tour search! Best tour costs {}.", tour.cost());
                Ok(tour)
            }
            None => {
                log::info!("Finished tour search! No tour uses direct routes only.");
                Err(RouteError::NoTour { nodes: graph.n() })
            }
        }
    }
}

/// Finds the cheapest open tour with the default node bound.
pub fn best_tour<'a, G>(graph: &'a G) -> Result<Path, RouteError>
where
    G: Graph<'a>,
{
    TourSearch::new().best_tour(graph)
}

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    cost: Cost,
    order: Vec<usize>,
}

impl Candidate {
    /// Orders by cost, then by enumeration position. Candidates of one search differ in their first node.
    fn cmp_enumeration(&self, other: &Candidate) -> std::cmp::Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Dense adjacency matrix of a graph, built once per search.
struct DirectLinks {
    matrix: Array2<Option<Cost>>,
}

impl DirectLinks {
    fn from_graph<'a, G>(graph: &'a G) -> Self
    where
        G: Graph<'a>,
    {
        let n = graph.n();
        let mut matrix = Array2::from_elem((n, n), None);
        for node in graph.nodes() {
            for edge in graph.adjacent(node) {
                matrix[[edge.source().id(), edge.sink().id()]] = Some(edge.cost());
            }
        }
        DirectLinks { matrix }
    }

    fn n(&self) -> usize {
        self.matrix.nrows()
    }

    /// Sums the routes along `order`, giving up at the first pair without a direct route.
    fn walk_cost(&self, order: &[usize]) -> Option<Cost> {
        let mut cost = Cost::zero();
        for pair in order.windows(2) {
            cost += self.matrix[[pair[0], pair[1]]]?;
        }
        Some(cost)
    }

    /// The cheapest tour starting at `first`, enumerating the remaining nodes in lexicographic order.
    fn best_with_first(&self, first: usize) -> Option<Candidate> {
        let mut order: Vec<usize> = Some(first)
            .into_iter()
            .chain((0..self.n()).filter(|&n| n != first))
            .collect();

        let mut best: Option<Candidate> = None;
        let mut permutations: u64 = 0;
        loop {
            permutations += 1;
            if let Some(cost) = self.walk_cost(&order) {
                if best.as_ref().map_or(true, |b| cost < b.cost) {
                    best = Some(Candidate {
                        cost,
                        order: order.clone(),
                    });
                }
            }
            if !next_permutation(&mut order[1..]) {
                break;
            }
        }
        log::debug!(
            "Evaluated {} permutations starting at node {}.",
            permutations,
            first
        );
        best
    }
}

/// Rearranges `items` into the next permutation in lexicographic order. Returns `false` once the last permutation
/// was reached, leaving `items` untouched.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

#[cfg(test)]
mod test_tsp {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        graph::{City, GraphSize, RouteEdge, RouteGraph},
        transport::TransportMode,
    };

    fn build(routes: &[RouteEdge]) -> RouteGraph {
        RouteGraph::build(routes, TransportMode::Car).unwrap()
    }

    fn labels(path: &Path) -> Vec<&str> {
        path.cities().iter().map(|c| c.label()).collect()
    }

    #[test]
    fn test_next_permutation() {
        let mut items = vec![0, 1, 2];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0]
            ]
        );
        assert_eq!(items, vec![2, 1, 0]);
        assert!(!next_permutation(&mut []));
        assert!(!next_permutation(&mut [4]));
    }

    ///  A --1-- B
    ///   \     /
    ///    1   1
    ///     \ /
    ///      C
    #[test]
    fn test_triangle() {
        let graph = build(&[
            RouteEdge::new("A", "B", 1.0),
            RouteEdge::new("A", "C", 1.0),
            RouteEdge::new("B", "C", 1.0),
        ]);
        let tour = best_tour(&graph).unwrap();
        assert_eq!(tour.len(), 3);
        assert_eq!(tour.cost(), 2.into());
        assert_eq!(labels(&tour), vec!["A", "B", "C"]);
    }

    ///   X --10-- Y --20-- Z
    #[test]
    fn test_path_graph_has_one_tour() {
        let routes = vec![RouteEdge::new("X", "Y", 10.0), RouteEdge::new("Y", "Z", 20.0)];
        let tour = best_tour(&build(&routes)).unwrap();
        assert_eq!(labels(&tour), vec!["X", "Y", "Z"]);
        assert_eq!(tour.cost(), 30.into());

        let bus = RouteGraph::build(&routes, TransportMode::Bus).unwrap();
        let tour = best_tour(&bus).unwrap();
        assert_eq!(labels(&tour), vec!["X", "Y", "Z"]);
        assert_eq!(tour.cost(), Cost::new(10.0 * 1.2) + Cost::new(20.0 * 1.2));
    }

    ///      B
    ///      |
    ///  C - A - D
    #[test]
    fn test_star_has_no_tour() {
        let graph = build(&[
            RouteEdge::new("A", "B", 1.0),
            RouteEdge::new("A", "C", 1.0),
            RouteEdge::new("A", "D", 1.0),
        ]);
        assert_eq!(best_tour(&graph), Err(RouteError::NoTour { nodes: 4 }));
        assert_eq!(
            TourSearch::new().best_tour_par(&graph),
            Err(RouteError::NoTour { nodes: 4 })
        );
    }

    #[test]
    fn test_disconnected_has_no_tour() {
        let graph = build(&[RouteEdge::new("A", "B", 1.0), RouteEdge::new("C", "D", 1.0)]);
        assert_eq!(best_tour(&graph), Err(RouteError::NoTour { nodes: 4 }));
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty = build(&[]);
        assert_eq!(best_tour(&empty), Ok(Path::empty()));
        assert_eq!(TourSearch::new().best_tour_par(&empty), Ok(Path::empty()));

        let two = build(&[RouteEdge::new("A", "B", 0.0)]);
        let tour = best_tour(&two).unwrap();
        assert_eq!(labels(&tour), vec!["A", "B"]);
        assert_eq!(tour.cost(), Cost::zero());
    }

    #[test]
    fn test_size_bound() {
        let graph = build(&[
            RouteEdge::new("A", "B", 1.0),
            RouteEdge::new("B", "C", 1.0),
            RouteEdge::new("C", "D", 1.0),
        ]);
        let search = TourSearch::with_max_nodes(3);
        assert_eq!(search.max_nodes(), 3);
        assert_eq!(
            search.best_tour(&graph),
            Err(RouteError::TourTooLarge { nodes: 4, limit: 3 })
        );
        assert_eq!(
            search.best_tour_par(&graph),
            Err(RouteError::TourTooLarge { nodes: 4, limit: 3 })
        );
        assert!(TourSearch::with_max_nodes(4).best_tour(&graph).is_ok());
    }

    ///  A --1-- B --1-- C --1-- D
    ///  |               |
    ///  +------10-------+
    #[test]
    fn test_only_direct_routes() {
        let graph = build(&[
            RouteEdge::new("A", "B", 1.0),
            RouteEdge::new("B", "C", 1.0),
            RouteEdge::new("A", "C", 10.0),
            RouteEdge::new("C", "D", 1.0),
        ]);
        let tour = best_tour(&graph).unwrap();
        assert_eq!(labels(&tour), vec!["A", "B", "C", "D"]);
        assert_eq!(tour.cost(), 3.into());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        let labels = ["a", "b", "c", "d", "e", "f", "g"];
        for _ in 0..20 {
            let mut routes = vec![];
            for i in 0..labels.len() {
                for j in i + 1..labels.len() {
                    if rng.gen_bool(0.5) {
                        routes.push(RouteEdge::new(labels[i], labels[j], rng.gen_range(1..9) as f64));
                    }
                }
            }
            let graph = build(&routes);
            let sequential = best_tour(&graph);
            assert_eq!(TourSearch::new().best_tour_par(&graph), sequential);

            if let Ok(tour) = sequential {
                assert_eq!(tour.len(), graph.n());
                let mut cities: Vec<City> = tour.cities().to_vec();
                cities.sort();
                assert_eq!(cities, graph.cities());

                let nodes: Vec<Node> = tour.cities().iter().map(|c| graph.node_of(c).unwrap()).collect();
                assert_eq!(Path::with_cost_from(&graph, &nodes).map(|p| p.cost()), Some(tour.cost()));
            }
        }
    }

    ///  A --1e308-- B
    ///   \         /
    ///    1   1e308
    ///     \ /
    ///      C
    #[test]
    fn test_huge_distances() {
        let graph = build(&[
            RouteEdge::new("A", "B", 1e308),
            RouteEdge::new("B", "C", 1e308),
            RouteEdge::new("A", "C", 1.0),
        ]);
        let tour = best_tour(&graph).unwrap();
        assert_eq!(labels(&tour), vec!["A", "C", "B"]);
        assert_eq!(tour.cost(), Cost::new(1e308));
        assert_eq!(TourSearch::new().best_tour_par(&graph), Ok(tour));
    }

    /// Four cities of the built-in dataset, fully connected.
    #[test]
    fn test_texas() {
        let graph = build(&[
            RouteEdge::new("San Antonio", "Dallas", 440.0),
            RouteEdge::new("San Antonio", "Austin", 127.0),
            RouteEdge::new("San Antonio", "Houston", 317.0),
            RouteEdge::new("Houston", "Austin", 260.0),
            RouteEdge::new("Houston", "Dallas", 384.0),
            RouteEdge::new("Austin", "Dallas", 313.0),
        ]);
        let tour = best_tour(&graph).unwrap();
        assert_eq!(tour.cost(), 757.into());
        assert_eq!(labels(&tour), vec!["Dallas", "Austin", "San Antonio", "Houston"]);
    }
}
