pub mod cost;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod transport;
pub mod tsp;

pub use cost::Cost;
pub use dijkstra::shortest_path;
pub use error::{InvalidEdgeReason, Result, RouteError};
pub use graph::{City, Path, RouteEdge, RouteGraph};
pub use transport::TransportMode;
pub use tsp::{best_tour, TourSearch};
