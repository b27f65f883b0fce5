//! Interaction session owning the loaded graph and the current selection.
//!
//! A presentation layer keeps one [`Session`] and routes every user action
//! through it: loading a poly source, appending vertices, clicking vertices
//! and resetting the selection.
//!
//! # Example
//!
//! ```
//! use polyroute_lib::Session;
//!
//! let mut session = Session::new();
//! session.load_str("2 2 0 1\n0 0 0\n1 3 4\n1 1\n0 0 1 0\n")?;
//! session.click(Some(0))?;
//! let outcome = session.click(Some(1))?;
//! let report = outcome.report.expect("pair completed");
//! assert_eq!(report.outcome.path().map(|p| p.total_cost), Some(5.0));
//! # Ok::<(), polyroute_lib::Error>(())
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::engine::PathOutcome;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::poly::{load_poly, parse_poly};
use crate::selection::{SelectionChange, SelectionController, SelectionState};
use crate::snapshot::{QueryRequest, Snapshot};

/// Query outcome tagged with the request and the snapshot it ran against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub request: QueryRequest,
    pub generation: u64,
    pub outcome: PathOutcome,
}

/// Result of feeding a click into the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub change: SelectionChange,
    /// Present when the click completed a pair and the engine ran inline.
    pub report: Option<QueryReport>,
}

/// Owner of the current graph snapshot, selection state and latest result.
#[derive(Debug, Default)]
pub struct Session {
    snapshot: Option<Arc<Snapshot>>,
    selection: SelectionController,
    last_report: Option<QueryReport>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, if a graph has been loaded.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.snapshot.as_deref().map(Snapshot::graph)
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn last_report(&self) -> Option<&QueryReport> {
        self.last_report.as_ref()
    }

    /// Request matching the completed pair, if any.
    pub fn pending_request(&self) -> Option<QueryRequest> {
        match self.selection.state() {
            SelectionState::PairSet {
                origin,
                destination,
            } => Some(QueryRequest::new(origin, destination)),
            _ => None,
        }
    }

    /// Parse poly text and replace the current graph.
    ///
    /// On error the previous graph, selection and result are left untouched.
    pub fn load_str(&mut self, source: &str) -> Result<Arc<Snapshot>> {
        let graph = parse_poly(source)?;
        Ok(self.install(graph))
    }

    /// Load a poly file and replace the current graph.
    ///
    /// On error the previous graph, selection and result are left untouched.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<Snapshot>> {
        let graph = load_poly(path)?;
        Ok(self.install(graph))
    }

    /// Replace the current graph with `graph`, resetting the selection.
    pub fn install(&mut self, graph: Graph) -> Arc<Snapshot> {
        let snapshot = self.swap_snapshot(graph);
        self.selection.reset();
        self.last_report = None;
        snapshot
    }

    /// Append a vertex at `(x, y)` and rebuild the matrix.
    ///
    /// Starts from an empty graph when nothing is loaded. The selection and
    /// any computed path are kept since the new vertex has no edges; a kept
    /// report is moved to the new snapshot's generation.
    pub fn append_vertex(&mut self, x: f64, y: f64) -> Result<VertexId> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidCoordinate { x, y });
        }
        let mut graph = self
            .snapshot
            .as_deref()
            .map(|snapshot| snapshot.graph().clone())
            .unwrap_or_default();
        let id = graph.push_vertex(x, y);
        let snapshot = self.swap_snapshot(graph);
        if let Some(report) = self.last_report.as_mut() {
            report.generation = snapshot.generation();
        }
        tracing::info!(vertex = id, x, y, "appended vertex");
        Ok(id)
    }

    /// Advance the selection without running the engine.
    ///
    /// Use this when queries are dispatched elsewhere; pair completion is
    /// reported through [`SelectionChange::PairCompleted`].
    pub fn select(&mut self, vertex: Option<VertexId>) -> Result<SelectionChange> {
        self.validate_click(vertex)?;
        let change = self.selection.click(vertex);
        if change.discards_path() || matches!(change, SelectionChange::PairCompleted { .. }) {
            self.last_report = None;
        }
        Ok(change)
    }

    /// Feed a vertex click and run the engine when a pair completes.
    pub fn click(&mut self, vertex: Option<VertexId>) -> Result<ClickOutcome> {
        let change = self.select(vertex)?;
        let report = match change {
            SelectionChange::PairCompleted {
                origin,
                destination,
            } => {
                let snapshot = self.require_snapshot()?;
                let request = QueryRequest::new(origin, destination);
                let outcome = snapshot.query(request)?;
                let report = QueryReport {
                    request,
                    generation: snapshot.generation(),
                    outcome,
                };
                self.last_report = Some(report.clone());
                Some(report)
            }
            _ => None,
        };
        Ok(ClickOutcome { change, report })
    }

    /// Resolve a point to the nearest vertex within `radius` and click it.
    ///
    /// A point over empty space is a no-op click.
    pub fn pick(&mut self, x: f64, y: f64, radius: f64) -> Result<ClickOutcome> {
        let snapshot = self.require_snapshot()?;
        let vertex = snapshot.graph().vertex_at(x, y, radius);
        self.click(vertex)
    }

    /// Store a result computed outside the session.
    ///
    /// Returns `false` and drops the report when it no longer matches the
    /// current pair or graph.
    pub fn record_report(&mut self, report: QueryReport) -> bool {
        let current_generation = self.snapshot.as_deref().map(Snapshot::generation);
        if self.pending_request() != Some(report.request)
            || current_generation != Some(report.generation)
        {
            tracing::debug!(request = %report.request, "dropping stale query report");
            return false;
        }
        self.last_report = Some(report);
        true
    }

    /// Clear the selection and any computed path.
    pub fn reset(&mut self) -> SelectionChange {
        self.last_report = None;
        self.selection.reset()
    }

    fn swap_snapshot(&mut self, graph: Graph) -> Arc<Snapshot> {
        self.generation += 1;
        let snapshot = Arc::new(Snapshot::new(graph, self.generation));
        self.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    fn require_snapshot(&self) -> Result<Arc<Snapshot>> {
        self.snapshot
            .clone()
            .ok_or_else(|| Error::invalid_selection("no graph loaded"))
    }

    fn validate_click(&self, vertex: Option<VertexId>) -> Result<()> {
        let snapshot = self.require_snapshot()?;
        if let Some(id) = vertex {
            let count = snapshot.graph().vertex_count();
            if id >= count {
                return Err(Error::invalid_selection(format!(
                    "vertex {id} is outside the graph ({count} vertices)"
                )));
            }
        }
        Ok(())
    }
}
