use std::fmt;

use serde::Serialize;

use crate::Cost;

use super::{City, Graph, Node};

/// A path in a route graph: consecutive cities are joined by a route and `cost` is the sum of the traversed routes.
///
/// A tour is a path that visits every city of its graph exactly once. Only the tour of an empty graph is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    cities: Vec<City>,
    cost: Cost,
}

impl IntoIterator for Path {
    type Item = City;
    type IntoIter = std::vec::IntoIter<City>;

    fn into_iter(self) -> Self::IntoIter {
        self.cities.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a City;
    type IntoIter = std::slice::Iter<'a, City>;

    fn into_iter(self) -> Self::IntoIter {
        self.cities.iter()
    }
}

impl Path {
    pub fn empty() -> Self {
        Self {
            cities: vec![],
            cost: Cost::zero(),
        }
    }

    pub fn single(city: City) -> Self {
        Self {
            cities: vec![city],
            cost: Cost::zero(),
        }
    }

    pub fn new(cities: Vec<City>, cost: Cost) -> Self {
        Self { cities, cost }
    }

    /// Translates a node sequence of `graph` into cities.
    pub fn from_nodes<'a, G>(graph: &'a G, nodes: &[Node], cost: Cost) -> Self
    where
        G: Graph<'a>,
    {
        Self::new(nodes.iter().map(|&n| graph.city(n).clone()).collect(), cost)
    }

    /// Walks `nodes` along direct routes of `graph`. Returns `None` as soon as two consecutive nodes are not adjacent.
    pub fn with_cost_from<'a, G>(graph: &'a G, nodes: &[Node]) -> Option<Self>
    where
        G: Graph<'a>,
    {
        let mut cost = Cost::zero();
        for e in nodes.windows(2) {
            cost += graph.edge_cost(e[0], e[1])?;
        }
        Some(Self::from_nodes(graph, nodes, cost))
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn cities(&self) -> &[City] {
        self.cities.as_slice()
    }

    pub fn first(&self) -> Option<&City> {
        self.cities.first()
    }

    pub fn last(&self) -> Option<&City> {
        self.cities.last()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.cities.iter().map(|c| c.label()).collect();
        write!(f, "{}", labels.join(" -> "))
    }
}
