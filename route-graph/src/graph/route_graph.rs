use std::collections::hash_map;

use rustc_hash::FxHashMap;

use crate::{
    error::{InvalidEdgeReason, RouteError},
    transport::TransportMode,
    Cost,
};

use super::{
    Adjacency, City, CityIndex, Edge, Edges, Graph, GraphSize, Neighbors, Node, Nodes, RouteEdge,
    TotalWeight, WeightedRoute,
};

/// Adjacency-list based graph representation for undirected weighted route networks.
///
/// A model is built once for a transport mode and never changes afterwards; every edge cost is the base
/// distance multiplied with the coefficient of that mode.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    mode: TransportMode,
    index: CityIndex,
    /// Maps each node (by id) to its neighbors with the corresponding edge costs.
    adj_list: Vec<FxHashMap<Node, Cost>>,
}

impl RouteGraph {
    /// Builds the model of `routes` for `mode`. The node set is the union of all route endpoints.
    pub fn build(routes: &[RouteEdge], mode: TransportMode) -> Result<Self, RouteError> {
        for route in routes {
            route.validate()?;
        }

        let index = CityIndex::init(
            routes
                .iter()
                .flat_map(|route| vec![route.from.clone(), route.to.clone()]),
        );
        let node_of = |city: &City| {
            index
                .get(city)
                .ok_or_else(|| RouteError::CityNotFound(city.clone()))
        };

        let coefficient = mode.coefficient();
        let mut adj_list: Vec<FxHashMap<Node, Cost>> = vec![FxHashMap::default(); index.len()];
        for route in routes {
            let source = node_of(&route.from)?;
            let sink = node_of(&route.to)?;
            if adj_list[source.id()].contains_key(&sink) {
                return Err(route.invalid(InvalidEdgeReason::Duplicate));
            }
            let cost = Cost::new(route.distance * coefficient);
            if !cost.is_finite() {
                return Err(route.invalid(InvalidEdgeReason::ScaledOverflow(route.distance)));
            }
            adj_list[source.id()].insert(sink, cost);
            adj_list[sink.id()].insert(source, cost);
        }

        log::debug!(
            "Built route graph for {} with {} cities and {} routes.",
            mode,
            index.len(),
            routes.len()
        );

        Ok(RouteGraph {
            mode,
            index,
            adj_list,
        })
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// All cities of the model in lexicographic order.
    pub fn cities(&self) -> &[City] {
        self.index.cities()
    }

    pub fn m(&self) -> usize {
        self.adj_list.iter().map(|edges| edges.len()).sum::<usize>() / 2
    }

    /// Lists every scaled edge once, sorted by the labels of its endpoints.
    pub fn routes(&self) -> Vec<WeightedRoute> {
        let mut routes: Vec<WeightedRoute> = self
            .edges()
            .map(|edge| WeightedRoute {
                from: self.city(edge.source()).clone(),
                to: self.city(edge.sink()).clone(),
                cost: edge.cost(),
            })
            .collect();
        routes.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));
        routes
    }
}

impl GraphSize for RouteGraph {
    fn n(&self) -> usize {
        self.adj_list.len()
    }
}

/// The routes leaving one node, each seen from that node.
pub struct AdjacencyIter<'a> {
    source: Node,
    links: Option<hash_map::Iter<'a, Node, Cost>>,
}

impl<'a> Iterator for AdjacencyIter<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let (&sink, &cost) = self.links.as_mut()?.next()?;
        Some(Edge::new(source, sink, cost))
    }
}

impl<'a> Adjacency<'a> for RouteGraph {
    type AdjacencyIter = AdjacencyIter<'a>;

    fn adjacent(&'a self, node: Node) -> Self::AdjacencyIter {
        AdjacencyIter {
            source: node,
            links: self.adj_list.get(node.id()).map(|links| links.iter()),
        }
    }
}

pub struct NeighborIter<'a>(AdjacencyIter<'a>);

impl<'a> Iterator for NeighborIter<'a> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|edge| edge.sink())
    }
}

impl<'a> Neighbors<'a> for RouteGraph {
    type NeighborIter = NeighborIter<'a>;

    fn neighbors(&'a self, node: Node) -> Self::NeighborIter {
        NeighborIter(self.adjacent(node))
    }
}

impl<'a> Nodes<'a> for RouteGraph {
    type NodeIter = std::iter::Map<std::ops::Range<usize>, fn(usize) -> Node>;

    fn nodes(&'a self) -> Self::NodeIter {
        (0..self.adj_list.len()).map(Node::new as fn(usize) -> Node)
    }
}

/// Every route once, reported from its endpoint with the smaller id.
pub struct EdgeIter<'a> {
    graph: &'a RouteGraph,
    sources: std::ops::Range<usize>,
    current: Option<AdjacencyIter<'a>>,
}

impl<'a> Iterator for EdgeIter<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.current.as_mut().and_then(Iterator::next) {
                Some(edge) if edge.source() < edge.sink() => return Some(edge),
                Some(_) => {}
                None => {
                    let source = Node::new(self.sources.next()?);
                    self.current = Some(self.graph.adjacent(source));
                }
            }
        }
    }
}

impl<'a> Edges<'a> for RouteGraph {
    type EdgeIter = EdgeIter<'a>;

    fn edges(&'a self) -> Self::EdgeIter {
        EdgeIter {
            graph: self,
            sources: 0..self.adj_list.len(),
            current: None,
        }
    }
}

impl<'a> Graph<'a> for RouteGraph {
    fn contains_node(&self, node: Node) -> bool {
        node.id() < self.adj_list.len()
    }

    fn edge_cost(&self, node1: Node, node2: Node) -> Option<Cost> {
        self.adj_list
            .get(node1.id())
            .and_then(|edges| edges.get(&node2).copied())
    }

    fn contains_edge(&self, node1: Node, node2: Node) -> bool {
        self.edge_cost(node1, node2).is_some()
    }

    fn city(&self, node: Node) -> &City {
        &self.index[node]
    }

    fn node_of(&self, city: &City) -> Option<Node> {
        self.index.get(city)
    }
}

impl TotalWeight for RouteGraph {
    fn total_weight(&self) -> Cost {
        self.edges().map(|edge| edge.cost()).sum()
    }
}
