use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use polyroute_lib::{shortest_path, AdjacencyMatrix, Graph};
use std::hint::black_box;

const SIDE: usize = 40;

/// Square grid with undirected edges between horizontal and vertical
/// neighbours.
fn grid(side: usize) -> Graph {
    let mut graph = Graph::new();
    for row in 0..side {
        for col in 0..side {
            graph.push_vertex(col as f64 * 10.0, row as f64 * 10.0);
        }
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                graph.add_edge(id, id + 1, false).expect("grid vertex");
            }
            if row + 1 < side {
                graph.add_edge(id, id + side, false).expect("grid vertex");
            }
        }
    }
    graph
}

static GRID: Lazy<Graph> = Lazy::new(|| grid(SIDE));
static MATRIX: Lazy<AdjacencyMatrix> = Lazy::new(|| AdjacencyMatrix::build(&GRID));

fn benchmark_engine(c: &mut Criterion) {
    let matrix = &*MATRIX;
    let far_corner = SIDE * SIDE - 1;

    c.bench_function("build_matrix_grid_40", |b| {
        b.iter(|| black_box(AdjacencyMatrix::build(&GRID).size()));
    });

    c.bench_function("shortest_path_grid_corner_to_corner", |b| {
        b.iter(|| {
            let outcome = shortest_path(matrix, 0, far_corner).expect("valid query");
            black_box(outcome.is_reachable())
        });
    });

    c.bench_function("shortest_path_grid_adjacent", |b| {
        b.iter(|| {
            let outcome = shortest_path(matrix, 0, 1).expect("valid query");
            black_box(outcome.is_reachable())
        });
    });
}

criterion_group!(benches, benchmark_engine);
criterion_main!(benches);
