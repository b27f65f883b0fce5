use std::fmt;

use serde::Serialize;

use crate::engine::{shortest_path, PathOutcome};
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use crate::matrix::AdjacencyMatrix;

/// Origin/destination pair handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryRequest {
    pub origin: VertexId,
    pub destination: VertexId,
}

impl QueryRequest {
    pub fn new(origin: VertexId, destination: VertexId) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// Immutable graph and matrix pair.
///
/// Snapshots are shared through `Arc` and never modified; loading or
/// appending produces a new snapshot with a higher generation.
#[derive(Debug)]
pub struct Snapshot {
    graph: Graph,
    matrix: AdjacencyMatrix,
    generation: u64,
}

impl Snapshot {
    pub fn new(graph: Graph, generation: u64) -> Self {
        let matrix = AdjacencyMatrix::build(&graph);
        Self {
            graph,
            matrix,
            generation,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the engine against this snapshot's matrix.
    pub fn query(&self, request: QueryRequest) -> Result<PathOutcome> {
        shortest_path(&self.matrix, request.origin, request.destination)
    }
}
