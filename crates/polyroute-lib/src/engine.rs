//! Dense Dijkstra over an [`AdjacencyMatrix`].
//!
//! The matrix is already O(V²), so the search keeps a plain distance array
//! and picks the next vertex with a linear scan instead of a heap. Ties go to
//! the lowest vertex id and relaxations only replace a predecessor on a
//! strictly cheaper cost, which makes the chosen path deterministic for a
//! fixed vertex ordering.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::VertexId;
use crate::matrix::AdjacencyMatrix;

/// Lowest-cost path between two vertices plus search statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Vertex ids from origin to destination, both included.
    pub path: Vec<VertexId>,
    pub total_cost: f64,
    /// Vertices expanded before the destination was reached.
    ///
    /// The count is scoped to the destination: the search stops as soon as
    /// the destination is the closest unsettled vertex, so vertices that a
    /// full single-source run would settle afterwards are not included.
    pub vertices_settled: usize,
    /// Wall time of the scan and relax loop.
    pub elapsed: Duration,
}

impl PathResult {
    /// Number of edges along the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Per-hop weights looked up in `matrix`.
    pub fn legs(&self, matrix: &AdjacencyMatrix) -> Vec<Leg> {
        self.path
            .windows(2)
            .map(|pair| Leg {
                from: pair[0],
                to: pair[1],
                weight: matrix.weight(pair[0], pair[1]),
            })
            .collect()
    }
}

/// Single hop of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Option<f64>,
}

/// Outcome of a valid shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(PathResult),
    /// No path exists from origin to destination.
    NotReachable,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&PathResult> {
        match self {
            PathOutcome::Found(result) => Some(result),
            PathOutcome::NotReachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }
}

/// Complete single-source search state, used for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub origin: VertexId,
    distances: Vec<f64>,
    predecessors: Vec<Option<VertexId>>,
    settle_order: Vec<VertexId>,
}

impl ShortestPathTree {
    /// Final distance to `vertex`, `None` when unreachable.
    pub fn distance(&self, vertex: VertexId) -> Option<f64> {
        self.distances
            .get(vertex)
            .copied()
            .filter(|d| d.is_finite())
    }

    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessors.get(vertex).copied().flatten()
    }

    /// Vertices in the order they were settled.
    pub fn settle_order(&self) -> &[VertexId] {
        &self.settle_order
    }

    /// Path from the origin to `vertex`, if reachable.
    pub fn path_to(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        self.distance(vertex)?;
        reconstruct_path(&self.predecessors, self.origin, vertex)
    }
}

/// Compute the lowest-cost path from `origin` to `destination`.
///
/// Returns [`Error::InvalidSelection`] when either id is out of range or both
/// are equal.
pub fn shortest_path(
    matrix: &AdjacencyMatrix,
    origin: VertexId,
    destination: VertexId,
) -> Result<PathOutcome> {
    check_vertex(matrix, origin, "origin")?;
    check_vertex(matrix, destination, "destination")?;
    if origin == destination {
        return Err(Error::invalid_selection(format!(
            "origin and destination are both vertex {origin}"
        )));
    }

    let started = Instant::now();
    let search = run_search(matrix, origin, Some(destination));
    let elapsed = started.elapsed();

    if !search.distances[destination].is_finite() {
        tracing::debug!(
            origin,
            destination,
            settled = search.settle_order.len(),
            "destination not reachable"
        );
        return Ok(PathOutcome::NotReachable);
    }

    let path = reconstruct_path(&search.predecessors, origin, destination).ok_or_else(|| {
        Error::invalid_selection(format!("no predecessor chain from {destination} to {origin}"))
    })?;
    let result = PathResult {
        path,
        total_cost: search.distances[destination],
        vertices_settled: search.settle_order.len(),
        elapsed,
    };

    tracing::debug!(
        origin,
        destination,
        cost = result.total_cost,
        settled = result.vertices_settled,
        elapsed_us = elapsed.as_micros() as u64,
        "shortest path computed"
    );

    Ok(PathOutcome::Found(result))
}

/// Settle every vertex reachable from `origin` and return the full tree.
pub fn explore(matrix: &AdjacencyMatrix, origin: VertexId) -> Result<ShortestPathTree> {
    check_vertex(matrix, origin, "origin")?;
    let search = run_search(matrix, origin, None);
    Ok(ShortestPathTree {
        origin,
        distances: search.distances,
        predecessors: search.predecessors,
        settle_order: search.settle_order,
    })
}

fn check_vertex(matrix: &AdjacencyMatrix, vertex: VertexId, role: &str) -> Result<()> {
    if vertex >= matrix.size() {
        return Err(Error::invalid_selection(format!(
            "{role} {vertex} is outside the graph ({} vertices)",
            matrix.size()
        )));
    }
    Ok(())
}

struct SearchState {
    distances: Vec<f64>,
    predecessors: Vec<Option<VertexId>>,
    settle_order: Vec<VertexId>,
}

fn run_search(
    matrix: &AdjacencyMatrix,
    origin: VertexId,
    stop_at: Option<VertexId>,
) -> SearchState {
    let size = matrix.size();
    let mut distances = vec![f64::INFINITY; size];
    let mut predecessors = vec![None; size];
    let mut settled = vec![false; size];
    let mut settle_order = Vec::new();

    distances[origin] = 0.0;

    for _ in 0..size {
        let Some(current) = closest_unsettled(&distances, &settled) else {
            break;
        };
        // The destination's distance is final once it is the closest candidate.
        if stop_at == Some(current) {
            break;
        }

        settled[current] = true;
        settle_order.push(current);

        let base = distances[current];
        for next in 0..size {
            if settled[next] {
                continue;
            }
            let weight = matrix.raw_weight(current, next);
            if !weight.is_finite() {
                continue;
            }
            let candidate = base + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                predecessors[next] = Some(current);
            }
        }
    }

    SearchState {
        distances,
        predecessors,
        settle_order,
    }
}

fn closest_unsettled(distances: &[f64], settled: &[bool]) -> Option<VertexId> {
    let mut best: Option<(VertexId, f64)> = None;
    for (vertex, &distance) in distances.iter().enumerate() {
        if settled[vertex] || !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((vertex, distance)),
        }
    }
    best.map(|(vertex, _)| vertex)
}

fn reconstruct_path(
    predecessors: &[Option<VertexId>],
    origin: VertexId,
    goal: VertexId,
) -> Option<Vec<VertexId>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != origin {
        current = predecessors[current]?;
        path.push(current);
        if path.len() > predecessors.len() {
            return None;
        }
    }
    path.reverse();
    Some(path)
}
