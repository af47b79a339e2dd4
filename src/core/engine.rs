//! Bellman-Ford shortest paths over a road [`Graph`]
//!
//! The engine fills an `N x N` table where entry `[v][k]` is the shortest
//! distance from the source to `v` using at most `k` roads, then walks the
//! table backward to recover the roads of a route.
//!
//! Relaxation never touches the graph. The "stay put" option of the
//! recurrence is the `table[v][k - 1]` term, and since every road is stored
//! in both directions the edges entering `v` are read from `v`'s own
//! adjacency list.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::core::error::{Error, Result};
use crate::core::graph::{Graph, VertexId};
use crate::core::route::{Route, RouteLeg};

/// Progress callback, called with (columns done, columns total)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Options for distance computation
#[derive(Clone, Default)]
pub struct EngineOptions {
    /// Relax the vertices of each column on the rayon thread pool
    pub parallel: bool,

    /// Optional progress callback
    pub progress: Option<ProgressCallback>,
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("parallel", &self.parallel)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Source-rooted Bellman-Ford table
///
/// Stored column by column so that each edge budget `k` is one contiguous
/// slice.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    source: VertexId,
    vertices: usize,
    data: Vec<f64>,
}

impl DistanceTable {
    /// External id of the vertex the table is rooted at
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Shortest distance to dense index `vertex` using at most `k` roads
    ///
    /// # Panics
    /// Panics if `vertex` or `k` is not below `vertex_count()`.
    pub fn get(&self, vertex: usize, k: usize) -> f64 {
        self.data[k * self.vertices + vertex]
    }

    /// All distances for edge budget `k`, by dense index
    ///
    /// # Panics
    /// Panics if `k >= vertex_count()`.
    pub fn column(&self, k: usize) -> &[f64] {
        &self.data[k * self.vertices..(k + 1) * self.vertices]
    }

    /// True shortest distance to dense index `vertex` (last column)
    pub fn shortest(&self, vertex: usize) -> f64 {
        self.get(vertex, self.vertices - 1)
    }

    /// True shortest distance to an external id
    pub fn distance_to(&self, graph: &Graph, id: VertexId) -> Result<f64> {
        let index = graph.require_index(id)?;
        if graph.vertex_count() != self.vertices {
            return Err(mismatch(graph, self));
        }
        Ok(self.shortest(index))
    }
}

fn mismatch(graph: &Graph, table: &DistanceTable) -> Error {
    Error::InvalidInput(format!(
        "distance table covers {} vertices but the graph has {}",
        table.vertices,
        graph.vertex_count()
    ))
}

/// Query engine over an immutable graph
#[derive(Debug)]
pub struct ShortestPathEngine<'g> {
    graph: &'g Graph,
    options: EngineOptions,
}

impl<'g> ShortestPathEngine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_options(graph, EngineOptions::default())
    }

    pub fn with_options(graph: &'g Graph, options: EngineOptions) -> Self {
        Self { graph, options }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Fill the distance table rooted at `source`
    ///
    /// Column `k` is computed from the finished column `k - 1` only. Once a
    /// column repeats its predecessor, the remaining columns are copies.
    pub fn compute_distances(&self, source: VertexId) -> Result<DistanceTable> {
        let start = self.graph.require_index(source)?;
        let n = self.graph.vertex_count();
        let total = n.saturating_sub(1) as u64;

        let mut data = vec![f64::INFINITY; n * n];
        data[start] = 0.0;

        let mut converged = false;
        for k in 1..n {
            let (done, rest) = data.split_at_mut(k * n);
            let previous = &done[(k - 1) * n..];
            let current = &mut rest[..n];

            if converged {
                current.copy_from_slice(previous);
            } else {
                self.relax_column(previous, current);
                if *current == *previous {
                    debug!("Distances from {source} settled after {} roads", k - 1);
                    converged = true;
                }
            }

            if let Some(ref progress) = self.options.progress {
                progress(k as u64, total);
            }
        }

        Ok(DistanceTable {
            source,
            vertices: n,
            data,
        })
    }

    fn relax_column(&self, previous: &[f64], current: &mut [f64]) {
        let graph = self.graph;
        if self.options.parallel {
            current
                .par_iter_mut()
                .enumerate()
                .for_each(|(v, slot)| *slot = relax_vertex(graph, previous, v));
        } else {
            for (v, slot) in current.iter_mut().enumerate() {
                *slot = relax_vertex(graph, previous, v);
            }
        }
    }

    /// Recover the roads from the table's source to `destination`
    ///
    /// Walks from `destination` at the last column toward column 0. When the
    /// distance is unchanged from the previous column no road is used;
    /// otherwise the first edge of the vertex's stored adjacency list that
    /// accounts for the distance is taken. Picking the first match keeps the
    /// result deterministic when several roads tie.
    pub fn reconstruct_path(&self, destination: VertexId, table: &DistanceTable) -> Result<Route> {
        let graph = self.graph;
        let mut v = graph.require_index(destination)?;
        if table.vertex_count() != graph.vertex_count() || !graph.contains(table.source()) {
            return Err(mismatch(graph, table));
        }

        let source = table.source();
        let last = table.vertex_count() - 1;
        if table.get(v, last).is_infinite() {
            return Ok(Route::NoPath {
                source,
                destination,
            });
        }

        let mut legs = Vec::new();
        let mut k = last;
        while k > 0 {
            let here = table.get(v, k);
            if here == table.get(v, k - 1) {
                k -= 1;
                continue;
            }

            let edge = graph
                .edges(v)
                .iter()
                .find(|edge| table.get(edge.to, k - 1) + edge.distance == here)
                .ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "distance table from {source} does not match the graph at vertex {}",
                        graph.vertex_id(v)
                    ))
                })?;

            legs.push(RouteLeg {
                from: graph.vertex_id(edge.to),
                to: graph.vertex_id(edge.from),
                name: edge.name.clone(),
                distance: edge.distance,
            });
            v = edge.to;
            k -= 1;
        }
        legs.reverse();

        // Summed in travel order, matching how the table accumulated it
        let total_distance = legs.iter().fold(0.0, |acc, leg| acc + leg.distance);

        Ok(Route::Found {
            source,
            destination,
            legs,
            total_distance,
        })
    }
}

fn relax_vertex(graph: &Graph, previous: &[f64], v: usize) -> f64 {
    graph.edges(v).iter().fold(previous[v], |best, edge| {
        let candidate = previous[edge.to] + edge.distance;
        if candidate < best {
            candidate
        } else {
            best
        }
    })
}
