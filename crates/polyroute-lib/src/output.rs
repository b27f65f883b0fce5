use std::fmt::Write;

use serde::Serialize;

use crate::engine::PathOutcome;
use crate::error::Result;
use crate::graph::VertexId;
use crate::snapshot::{QueryRequest, Snapshot};

/// Presentation style for turning a [`PathSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRenderMode {
    /// Multi-line report with cost, settled count, coordinates and timing.
    Report,
    /// Single line with the vertex chain.
    Compact,
}

/// Whether a path was found.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Found,
    NotReachable,
}

/// Vertex along a summarized path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    /// Weight of the hop arriving at this vertex; `None` for the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_cost: Option<f64>,
}

/// Structured representation of a query outcome that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub status: SummaryStatus,
    pub origin: VertexId,
    pub destination: VertexId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices_settled: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
    pub hops: usize,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Resolve vertex coordinates and hop weights for `outcome`.
    pub fn new(snapshot: &Snapshot, request: QueryRequest, outcome: &PathOutcome) -> Self {
        let Some(result) = outcome.path() else {
            return Self {
                status: SummaryStatus::NotReachable,
                origin: request.origin,
                destination: request.destination,
                total_cost: None,
                vertices_settled: None,
                elapsed_ms: None,
                hops: 0,
                steps: Vec::new(),
            };
        };

        let graph = snapshot.graph();
        let matrix = snapshot.matrix();
        let steps = result
            .path
            .iter()
            .enumerate()
            .filter_map(|(index, &id)| {
                let vertex = graph.vertex(id)?;
                let leg_cost = index
                    .checked_sub(1)
                    .and_then(|prev| matrix.weight(result.path[prev], id));
                Some(PathStep {
                    index,
                    id,
                    x: vertex.x,
                    y: vertex.y,
                    leg_cost,
                })
            })
            .collect();

        Self {
            status: SummaryStatus::Found,
            origin: request.origin,
            destination: request.destination,
            total_cost: Some(result.total_cost),
            vertices_settled: Some(result.vertices_settled),
            elapsed_ms: Some(result.elapsed.as_secs_f64() * 1_000.0),
            hops: result.hop_count(),
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: SummaryRenderMode) -> String {
        match (self.status, mode) {
            (SummaryStatus::NotReachable, _) => format!(
                "No path exists between {} and {}\n",
                self.origin, self.destination
            ),
            (SummaryStatus::Found, SummaryRenderMode::Report) => self.render_report(),
            (SummaryStatus::Found, SummaryRenderMode::Compact) => self.render_compact(),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn render_report(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Total cost: {:.2} units",
            self.total_cost.unwrap_or_default()
        );
        let _ = writeln!(
            buffer,
            "Vertices settled: {}",
            self.vertices_settled.unwrap_or_default()
        );
        let _ = writeln!(buffer, "Path (origin to destination):");
        for step in &self.steps {
            let _ = writeln!(buffer, "{} (x={:.3}, y={:.3})", step.id, step.x, step.y);
        }
        let _ = writeln!(
            buffer,
            "Elapsed: {:.4} s",
            self.elapsed_ms.unwrap_or_default() / 1_000.0
        );
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!(
            "{joined} (cost {:.2}, {} hops)\n",
            self.total_cost.unwrap_or_default(),
            self.hops
        )
    }
}
