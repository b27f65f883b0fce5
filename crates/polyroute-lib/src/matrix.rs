use crate::graph::{Graph, VertexId};

/// Dense N×N weight table derived from a [`Graph`].
///
/// Entries hold the Euclidean length of the edge licensing that direction;
/// everything else, including the diagonal, is unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Build the matrix from scratch for `graph`.
    pub fn build(graph: &Graph) -> Self {
        let size = graph.vertex_count();
        let mut matrix = Self {
            size,
            weights: vec![f64::INFINITY; size * size],
        };

        for edge in graph.edges() {
            if edge.origin == edge.destination {
                tracing::warn!(vertex = edge.origin, "ignoring self-loop edge");
                continue;
            }
            let Some(weight) = graph.distance(edge.origin, edge.destination) else {
                continue;
            };
            matrix.set(edge.origin, edge.destination, weight);
            if !edge.directed {
                matrix.set(edge.destination, edge.origin, weight);
            }
        }

        matrix
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight of the `origin → destination` entry, `None` when unreachable or
    /// out of range.
    pub fn weight(&self, origin: VertexId, destination: VertexId) -> Option<f64> {
        if origin >= self.size || destination >= self.size {
            return None;
        }
        let weight = self.weights[origin * self.size + destination];
        weight.is_finite().then_some(weight)
    }

    /// Reachable neighbours of `origin` in ascending id order.
    pub fn neighbours(&self, origin: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        let row: &[f64] = if origin < self.size {
            &self.weights[origin * self.size..(origin + 1) * self.size]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|(_, weight)| weight.is_finite())
            .map(|(target, weight)| (target, *weight))
    }

    /// Count of reachable entries.
    pub fn reachable_entries(&self) -> usize {
        self.weights.iter().filter(|w| w.is_finite()).count()
    }

    pub(crate) fn raw_weight(&self, origin: VertexId, destination: VertexId) -> f64 {
        self.weights[origin * self.size + destination]
    }

    fn set(&mut self, origin: VertexId, destination: VertexId, weight: f64) {
        self.weights[origin * self.size + destination] = weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.push_vertex(0.0, 0.0);
        graph.push_vertex(3.0, 4.0);
        graph.push_vertex(6.0, 8.0);
        graph.add_edge(0, 1, false).unwrap();
        graph.add_edge(1, 2, true).unwrap();
        graph
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let matrix = AdjacencyMatrix::build(&sample());
        assert_eq!(matrix.weight(0, 1), Some(5.0));
        assert_eq!(matrix.weight(1, 0), Some(5.0));
    }

    #[test]
    fn directed_edges_only_fill_one_direction() {
        let matrix = AdjacencyMatrix::build(&sample());
        assert_eq!(matrix.weight(1, 2), Some(5.0));
        assert_eq!(matrix.weight(2, 1), None);
    }

    #[test]
    fn diagonal_stays_unreachable_even_with_self_loop() {
        let mut graph = sample();
        graph.add_edge(2, 2, false).unwrap();
        let matrix = AdjacencyMatrix::build(&graph);
        for v in 0..matrix.size() {
            assert_eq!(matrix.weight(v, v), None);
        }
        assert_eq!(matrix.reachable_entries(), 3);
    }

    #[test]
    fn neighbours_are_ascending() {
        let mut graph = sample();
        graph.add_edge(1, 0, true).unwrap();
        let matrix = AdjacencyMatrix::build(&graph);
        let targets: Vec<_> = matrix.neighbours(1).map(|(v, _)| v).collect();
        assert_eq!(targets, vec![0, 2]);
        assert_eq!(matrix.neighbours(42).count(), 0);
    }

    #[test]
    fn empty_graph_builds_empty_matrix() {
        let matrix = AdjacencyMatrix::build(&Graph::new());
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.weight(0, 0), None);
    }
}
