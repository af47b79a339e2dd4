//! Road graph construction
//!
//! [`GraphBuilder`] accumulates road records privately and hands out an
//! immutable [`Graph`] once ingestion is complete. Every road segment becomes
//! two directed edges, and every distinct external vertex id gets a dense
//! index in `0..N` in order of first appearance.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::core::record::RoadRecord;

/// External intersection id, as found in the input data
pub type VertexId = i64;

/// Directed edge between two dense vertex indices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub name: String,
    pub distance: f64,
}

/// Directed road between two external vertex ids
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub start: VertexId,
    pub end: VertexId,
    pub name: String,
    pub distance: f64,
}

/// Immutable road network
///
/// Adjacency is stored per dense index. For every edge `u -> v` the graph
/// also holds `v -> u` with the same name and distance, and no edge starts
/// and ends at the same vertex.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    ids: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
}

impl Graph {
    /// Number of distinct vertices (`N`)
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of stored directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|adj| adj.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Dense index of an external id
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Dense index of an external id, or `UnknownVertex`
    pub fn require_index(&self, id: VertexId) -> Result<usize> {
        self.index_of(id).ok_or(Error::UnknownVertex(id))
    }

    /// External id of a dense index
    ///
    /// # Panics
    /// Panics if `index >= vertex_count()`.
    pub fn vertex_id(&self, index: usize) -> VertexId {
        self.ids[index]
    }

    /// External ids in dense index order
    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.ids
    }

    /// Outgoing edges of a dense index, in insertion order
    ///
    /// # Panics
    /// Panics if `index >= vertex_count()`.
    pub fn edges(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Outgoing roads of an external id, in insertion order
    pub fn roads(&self, id: VertexId) -> Result<Vec<Road>> {
        let index = self.require_index(id)?;
        Ok(self.adjacency[index]
            .iter()
            .map(|edge| self.to_road(edge))
            .collect())
    }

    pub(crate) fn to_road(&self, edge: &Edge) -> Road {
        Road {
            start: self.ids[edge.from],
            end: self.ids[edge.to],
            name: edge.name.clone(),
            distance: edge.distance,
        }
    }
}

/// Accumulates road records into a [`Graph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<Edge>>,
    ids: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
    roads_seen: usize,
    duplicates: usize,
    loops: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a stream of parsed records
    ///
    /// Stops at the first error; no partial graph is returned.
    pub fn ingest<I>(records: I) -> Result<Graph>
    where
        I: IntoIterator<Item = Result<RoadRecord>>,
    {
        let mut builder = Self::new();
        for record in records {
            builder.add_road(record?)?;
        }
        Ok(builder.build())
    }

    /// Add one bidirectional road segment
    ///
    /// Rejects a negative or non-finite distance before touching any state.
    pub fn add_road(&mut self, record: RoadRecord) -> Result<()> {
        if !record.distance.is_finite() || record.distance < 0.0 {
            return Err(Error::InvalidInput(format!(
                "road '{}' from {} to {} has invalid distance {}",
                record.label, record.start, record.end, record.distance
            )));
        }
        self.roads_seen += 1;

        let a = self.intern(record.start);
        let b = self.intern(record.end);

        if a == b {
            debug!(
                "Skipping loop road '{}' at vertex {}",
                record.label, record.start
            );
            self.loops += 1;
            return Ok(());
        }

        self.insert(Edge {
            from: a,
            to: b,
            name: record.label.clone(),
            distance: record.distance,
        });
        self.insert(Edge {
            from: b,
            to: a,
            name: record.label,
            distance: record.distance,
        });
        Ok(())
    }

    /// Freeze the accumulated state into an immutable graph
    pub fn build(self) -> Graph {
        let graph = Graph {
            adjacency: self.adjacency,
            ids: self.ids,
            index: self.index,
        };

        info!(
            "Built graph: {} vertices, {} directed edges from {} roads ({} duplicate edges, {} loop roads skipped)",
            graph.vertex_count(),
            graph.edge_count(),
            self.roads_seen,
            self.duplicates,
            self.loops
        );

        graph
    }

    fn intern(&mut self, id: VertexId) -> usize {
        if let Some(&index) = self.index.get(&id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(id);
        self.index.insert(id, index);
        self.adjacency.push(Vec::new());
        index
    }

    fn insert(&mut self, edge: Edge) {
        let list = &mut self.adjacency[edge.from];
        if list.contains(&edge) {
            self.duplicates += 1;
        } else {
            list.push(edge);
        }
    }
}
