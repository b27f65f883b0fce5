use serde::Serialize;

use crate::error::{Error, Result};

/// Index of a vertex within its graph. Equal to the vertex's position in the
/// vertex sequence.
pub type VertexId = usize;

/// Point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    /// Calculate the Euclidean distance to another vertex.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Connection between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub origin: VertexId,
    pub destination: VertexId,
    /// `true` when the edge may only be traversed from `origin` to `destination`.
    pub directed: bool,
}

/// Axis-aligned extent of a graph's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Planar graph loaded from a poly source.
///
/// Vertex ids always match their index and every edge endpoint refers to an
/// existing vertex; both invariants are enforced by the only mutators,
/// [`Graph::push_vertex`] and [`Graph::add_edge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Lookup a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Append a vertex and return its id.
    pub fn push_vertex(&mut self, x: f64, y: f64) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex { id, x, y });
        id
    }

    /// Add an edge between two existing vertices.
    pub fn add_edge(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        directed: bool,
    ) -> Result<()> {
        for id in [origin, destination] {
            if id >= self.vertices.len() {
                return Err(Error::UnknownVertex {
                    id,
                    count: self.vertices.len(),
                });
            }
        }
        self.edges.push(Edge {
            origin,
            destination,
            directed,
        });
        Ok(())
    }

    /// Euclidean distance between two vertices, if both exist.
    pub fn distance(&self, a: VertexId, b: VertexId) -> Option<f64> {
        let a = self.vertices.get(a)?;
        let b = self.vertices.get(b)?;
        Some(a.distance_to(b))
    }

    /// Extent of all vertices, or `None` for an empty graph.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let initial = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.vertices.iter().fold(initial, |b, v| Bounds {
            min_x: b.min_x.min(v.x),
            min_y: b.min_y.min(v.y),
            max_x: b.max_x.max(v.x),
            max_y: b.max_y.max(v.y),
        }))
    }

    /// Resolve a point to a vertex lying within `radius` of it.
    ///
    /// Vertices are scanned in id order and the first hit wins, so overlapping
    /// vertices resolve to the lowest id.
    pub fn vertex_at(&self, x: f64, y: f64, radius: f64) -> Option<VertexId> {
        let limit = radius * radius;
        self.vertices
            .iter()
            .find(|v| {
                let dx = v.x - x;
                let dy = v.y - y;
                dx * dx + dy * dy <= limit
            })
            .map(|v| v.id)
    }
}
