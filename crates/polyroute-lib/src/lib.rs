//! polyroute library entry points.
//!
//! This crate parses poly graph descriptions, derives a dense adjacency
//! matrix, runs the shortest-path engine, and tracks origin/destination
//! selection in an explicit [`Session`]. Presentation layers (the CLI or any
//! other front-end) should only depend on the items exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod output;
pub mod poly;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use dispatch::{CompletedQuery, QueryDispatcher, QueryStatus, QueryTicket};
pub use engine::{explore, shortest_path, Leg, PathOutcome, PathResult, ShortestPathTree};
pub use error::{Error, Result};
pub use graph::{Bounds, Edge, Graph, Vertex, VertexId};
pub use matrix::AdjacencyMatrix;
pub use output::{PathStep, PathSummary, SummaryRenderMode, SummaryStatus};
pub use poly::{
    load_poly, parse_poly, resolve_graph_path, to_poly_string, write_poly, GRAPH_PATH_ENV,
};
pub use selection::{SelectionChange, SelectionController, SelectionState};
pub use session::{ClickOutcome, QueryReport, Session};
pub use snapshot::{QueryRequest, Snapshot};
