use serde::{Deserialize, Serialize};

use crate::{
    error::{InvalidEdgeReason, RouteError},
    Cost,
};

use super::{City, Node};

/// An edge in a graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    cost: Cost,
    source: Node,
    sink: Node,
}

impl Edge {
    pub fn new(source: Node, sink: Node, cost: Cost) -> Self {
        Edge { source, sink, cost }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn sink(&self) -> Node {
        self.sink
    }
}

/// An undirected route between two cities with its base distance in kilometers.
///
/// This is the raw input of a model; the distance is not yet scaled by a transport mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub from: City,
    pub to: City,
    pub distance: f64,
}

impl RouteEdge {
    pub fn new(from: impl Into<City>, to: impl Into<City>, distance: f64) -> Self {
        RouteEdge {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }

    pub fn validate(&self) -> Result<(), RouteError> {
        let reason = if self.from.label().is_empty() || self.to.label().is_empty() {
            InvalidEdgeReason::EmptyLabel
        } else if self.from == self.to {
            InvalidEdgeReason::SelfLoop
        } else if !self.distance.is_finite() {
            InvalidEdgeReason::NonFiniteDistance(self.distance)
        } else if self.distance < 0.0 {
            InvalidEdgeReason::NegativeDistance(self.distance)
        } else {
            return Ok(());
        };
        Err(self.invalid(reason))
    }

    pub(crate) fn invalid(&self, reason: InvalidEdgeReason) -> RouteError {
        RouteError::InvalidEdge {
            first: self.from.label().to_string(),
            second: self.to.label().to_string(),
            reason,
        }
    }
}

impl<A, B> From<(A, B, f64)> for RouteEdge
where
    A: Into<City>,
    B: Into<City>,
{
    fn from(input: (A, B, f64)) -> Self {
        RouteEdge::new(input.0, input.1, input.2)
    }
}

/// A scaled edge of a model as seen by listing and export consumers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeightedRoute {
    pub from: City,
    pub to: City,
    pub cost: Cost,
}
