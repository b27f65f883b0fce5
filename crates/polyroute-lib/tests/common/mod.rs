//! Common test utilities and fixture helpers.
//!
//! Fixtures live in `docs/fixtures`; random graphs are seeded so every run
//! sees the same inputs.

use std::path::PathBuf;

use polyroute_lib::{load_poly, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[allow(dead_code)]
/// Path to the fixtures directory shared by the workspace.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
/// Path to a named fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

#[allow(dead_code)]
/// Four vertices on a 10×10 square joined in a ring by undirected edges.
pub fn ring() -> Graph {
    load_poly(&fixture_path("ring.poly")).expect("ring fixture loads")
}

/// Seeded random graph with `vertices` points and roughly `edges` edges,
/// about a third of them directed.
#[allow(dead_code)]
pub fn random_graph(seed: u64, vertices: usize, edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    for _ in 0..vertices {
        graph.push_vertex(rng.gen_range(0.0..1_000.0), rng.gen_range(0.0..1_000.0));
    }
    if vertices < 2 {
        return graph;
    }
    for _ in 0..edges {
        let origin = rng.gen_range(0..vertices);
        let destination = rng.gen_range(0..vertices);
        if origin == destination {
            continue;
        }
        let directed = rng.gen_bool(1.0 / 3.0);
        graph
            .add_edge(origin, destination, directed)
            .expect("endpoints in range");
    }
    graph
}
