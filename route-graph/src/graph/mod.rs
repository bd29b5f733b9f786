mod edge;
mod index;
mod node;
mod path;
mod route_graph;

use std::fmt::Debug;

pub use edge::{Edge, RouteEdge, WeightedRoute};
pub use index::CityIndex;
pub use node::{City, Node};
pub use path::Path;
pub use route_graph::RouteGraph;

use crate::Cost;

pub trait Graph<'a>: Adjacency<'a> + Neighbors<'a> + GraphSize + Nodes<'a> + Debug {
    fn contains_node(&self, node: Node) -> bool;

    /// Returns the cost of an edge between two nodes if such exists.
    fn edge_cost(&self, node1: Node, node2: Node) -> Option<Cost>;

    fn contains_edge(&self, node1: Node, node2: Node) -> bool;

    /// The city a node stands for. Panics if the node does not belong to the graph.
    fn city(&self, node: Node) -> &City;

    fn node_of(&self, city: &City) -> Option<Node>;
}

pub trait Connected<'a>: Component<'a> + Nodes<'a> + GraphSize {
    /// Whether every node can be reached from every other node. Graphs without nodes are connected.
    fn connected(&'a self) -> bool {
        match self.nodes().next() {
            Some(start) => self.component_of(start).len() == self.n(),
            None => true,
        }
    }
}

impl<'a, G> Connected<'a> for G where G: Component<'a> + Nodes<'a> + GraphSize {}

pub trait Neighbors<'a> {
    type NeighborIter: Iterator<Item = Node>;

    fn neighbors(&'a self, node: Node) -> Self::NeighborIter;
}

pub trait Nodes<'a> {
    type NodeIter: Iterator<Item = Node>;

    fn nodes(&'a self) -> Self::NodeIter;
}

pub trait Edges<'a> {
    type EdgeIter: Iterator<Item = Edge>;

    fn edges(&'a self) -> Self::EdgeIter;
}

pub trait Adjacency<'a> {
    type AdjacencyIter: Iterator<Item = Edge>;

    fn adjacent(&'a self, node: Node) -> Self::AdjacencyIter;
}

pub trait Component<'a> {
    /// All nodes reachable from `node`, in ascending order.
    fn component_of(&'a self, node: Node) -> Vec<Node>;
}

pub trait GraphSize {
    fn n(&self) -> usize;
}

impl<'a, G> Component<'a> for G
where
    G: Neighbors<'a> + GraphSize,
{
    fn component_of(&'a self, component: Node) -> Vec<Node> {
        let mut fixed_nodes = fixedbitset::FixedBitSet::with_capacity(self.n().max(component.id() + 1));
        let mut stack: Vec<Node> = vec![component];
        while let Some(node) = stack.pop() {
            if fixed_nodes.put(node.id()) {
                continue;
            }
            for n in self.neighbors(node) {
                if !fixed_nodes.contains(n.id()) {
                    stack.push(n)
                }
            }
        }
        fixed_nodes.ones().map(Node::new).collect()
    }
}

pub trait TotalWeight {
    fn total_weight(&self) -> Cost;
}
