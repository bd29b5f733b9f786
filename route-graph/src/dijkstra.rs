use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;
use fixedbitset::FixedBitSet;

use crate::{
    cost::Cost,
    error::RouteError,
    graph::{City, Graph, Node, Path},
};

/// A tentative distance in the frontier of Dijkstra's algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Frontier {
    cost: Cost,
    node: Node,
}

/// Orders the heap so that the cheapest entry is popped first and equal costs pop the smaller node first.
struct CheapestFirst;

impl Compare<Frontier> for CheapestFirst {
    fn compare(&self, l: &Frontier, r: &Frontier) -> Ordering {
        r.cost.cmp(&l.cost).then(r.node.cmp(&l.node))
    }
}

/// Computes a cheapest path from `start` to `end`.
///
/// Fails with [`RouteError::CityNotFound`] if one of the cities is not part of the graph and with
/// [`RouteError::NoPath`] if `end` cannot be reached from `start`.
pub fn shortest_path<'a, G>(graph: &'a G, start: &City, end: &City) -> Result<Path, RouteError>
where
    G: Graph<'a>,
{
    let n1 = graph
        .node_of(start)
        .ok_or_else(|| RouteError::CityNotFound(start.clone()))?;
    let n2 = graph
        .node_of(end)
        .ok_or_else(|| RouteError::CityNotFound(end.clone()))?;

    let paths = shortest_paths_to(graph, n1, &[n2]);
    match (paths.cost_to(n2), paths.path_to(n2)) {
        (Some(cost), Some(nodes)) => Ok(Path::from_nodes(graph, &nodes, cost)),
        _ => Err(RouteError::NoPath {
            start: start.clone(),
            end: end.clone(),
        }),
    }
}

/// Single-source shortest paths from `node` to every reachable node.
pub fn shortest_paths_from<'a, G>(graph: &'a G, node: Node) -> Paths
where
    G: Graph<'a>,
{
    let goals: Vec<Node> = graph.nodes().collect();
    shortest_paths_to(graph, node, &goals)
}

/// Dijkstra's algorithm from `node`, stopping as soon as all `goals` are settled.
pub fn shortest_paths_to<'a, G>(graph: &'a G, node: Node, goals: &[Node]) -> Paths
where
    G: Graph<'a>,
{
    let n = graph.n();
    if !graph.contains_node(node) {
        return Paths::empty(node);
    }

    let mut to_visit = FixedBitSet::with_capacity(n);
    for goal in goals.iter().filter(|g| graph.contains_node(**g)) {
        to_visit.insert(goal.id());
    }
    let mut remaining = to_visit.count_ones(..);

    let mut costs: Vec<Option<Cost>> = vec![None; n];
    let mut prev: Vec<Option<Node>> = vec![None; n];
    let mut settled = FixedBitSet::with_capacity(n);

    costs[node.id()] = Some(Cost::zero());

    let mut heap = BinaryHeap::from_vec_cmp(
        vec![Frontier {
            cost: Cost::zero(),
            node,
        }],
        CheapestFirst,
    );
    while let Some(Frontier { cost, node: u }) = heap.pop() {
        if settled.put(u.id()) {
            // stale entry of a node that was settled with a smaller cost
            continue;
        }
        log::trace!("Settled {} at cost {}", u, cost);

        if to_visit.contains(u.id()) {
            to_visit.set(u.id(), false);
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for edge in graph.adjacent(u) {
            let v = edge.sink();
            if settled.contains(v.id()) {
                continue;
            }
            let update = cost + edge.cost();
            let dist_v = &mut costs[v.id()];
            if dist_v.map_or(true, |dist| update < dist) {
                *dist_v = Some(update);
                prev[v.id()] = Some(u);
                heap.push(Frontier {
                    cost: update,
                    node: v,
                });
            }
        }
    }

    Paths {
        node,
        costs,
        prev,
        settled,
    }
}

/// The result of a shortest path computation from a single start node.
#[derive(Debug, Clone)]
pub struct Paths {
    node: Node,
    costs: Vec<Option<Cost>>,
    prev: Vec<Option<Node>>,
    settled: FixedBitSet,
}

impl Paths {
    fn empty(node: Node) -> Self {
        Self {
            node,
            costs: vec![],
            prev: vec![],
            settled: FixedBitSet::with_capacity(0),
        }
    }

    /// The cost of a cheapest path to `n2`, if `n2` was reached and settled.
    pub fn cost_to(&self, n2: Node) -> Option<Cost> {
        if self.settled.contains(n2.id()) {
            self.costs[n2.id()]
        } else {
            None
        }
    }

    /// A cheapest path from the start node to `n2`, if `n2` was reached and settled.
    pub fn path_to(&self, n2: Node) -> Option<Vec<Node>> {
        if !self.settled.contains(n2.id()) {
            return None;
        }
        let mut path = vec![n2];
        let mut n = n2;
        while n != self.node {
            n = self.prev[n.id()]?;
            path.push(n);
        }
        path.reverse();
        Some(path)
    }
}
