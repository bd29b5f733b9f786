//! Errors reported by model construction and the routing algorithms.

use thiserror::Error;

use crate::graph::City;

pub type Result<T> = std::result::Result<T, RouteError>;

/// Why a route was rejected when building a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidEdgeReason {
    #[error("city label is empty")]
    EmptyLabel,

    #[error("route connects a city to itself")]
    SelfLoop,

    #[error("distance {0} is negative")]
    NegativeDistance(f64),

    #[error("distance {0} is not finite")]
    NonFiniteDistance(f64),

    #[error("distance {0} overflows when scaled by the transport mode")]
    ScaledOverflow(f64),

    #[error("route between these cities is listed more than once")]
    Duplicate,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("invalid route '{first}' -- '{second}': {reason}")]
    InvalidEdge {
        first: String,
        second: String,
        reason: InvalidEdgeReason,
    },

    #[error("city not found: {0}")]
    CityNotFound(City),

    #[error("no path from {start} to {end}")]
    NoPath { start: City, end: City },

    #[error("no tour visits all {nodes} cities using direct routes only")]
    NoTour { nodes: usize },

    #[error("exhaustive tour search over {nodes} cities exceeds the limit of {limit}")]
    TourTooLarge { nodes: usize, limit: usize },
}
