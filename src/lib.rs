//! # Butterfly-walk Library
//!
//! Shortest walking routes over road networks loaded from delimited
//! road-segment data, computed with the Bellman-Ford distance table.
//!
//! ## Features
//!
//! - **Any schema**: columns are picked by header name or position
//! - **Deterministic**: vertex indices follow first appearance in the input,
//!   and ties between equally short roads resolve to the first stored road
//! - **Immutable graphs**: build once, query as often as needed
//! - **Parallel relaxation**: optional rayon-backed column relaxation
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use butterfly_walk::{load_graph, LoaderConfig, ShortestPathEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = load_graph("roads.csv", &LoaderConfig::default())?;
//!
//!     let engine = ShortestPathEngine::new(&graph);
//!     let table = engine.compute_distances(53980)?;
//!     let route = engine.reconstruct_path(30783, &table)?;
//!
//!     println!("{route}");
//!     Ok(())
//! }
//! ```
//!
//! ## Building a graph in memory
//!
//! ```rust
//! use butterfly_walk::{GraphBuilder, RoadRecord, Route};
//!
//! let graph = GraphBuilder::ingest(vec![
//!     RoadRecord::new(1, 2, "Main St", 2.0),
//!     RoadRecord::new(2, 3, "Oak St", 3.0),
//! ])
//! .unwrap();
//!
//! let route = butterfly_walk::shortest_route(&graph, 1, 3).unwrap();
//! assert_eq!(route.street_names(), vec!["Main St", "Oak St"]);
//! assert_eq!(route.total_distance(), Some(5.0));
//! ```

pub use crate::core::config::{LoaderConfig, Preset};
pub use crate::core::engine::{DistanceTable, EngineOptions, ProgressCallback, ShortestPathEngine};
pub use crate::core::error::{Error, RecordField, Result};
pub use crate::core::graph::{Edge, Graph, GraphBuilder, Road, VertexId};
pub use crate::core::loader::{load_graph, read_graph};
pub use crate::core::record::{ColumnMapping, ColumnRef, ResolvedColumns, RoadRecord};
pub use crate::core::route::{Route, RouteLeg};

pub mod core;

/// Shortest route between two intersections with default engine options
///
/// # Examples
/// ```rust
/// # use butterfly_walk::{GraphBuilder, RoadRecord};
/// let graph = GraphBuilder::ingest(vec![RoadRecord::new(7, 8, "Elm St", 1.5)]).unwrap();
/// let route = butterfly_walk::shortest_route(&graph, 7, 8).unwrap();
/// assert!(route.is_found());
/// ```
pub fn shortest_route(graph: &Graph, from: VertexId, to: VertexId) -> Result<Route> {
    let engine = ShortestPathEngine::new(graph);
    // Fail fast on an unknown destination before filling an N x N table
    graph.require_index(to)?;
    let table = engine.compute_distances(from)?;
    engine.reconstruct_path(to, &table)
}
