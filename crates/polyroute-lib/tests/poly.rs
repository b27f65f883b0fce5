mod common;

use std::collections::HashSet;
use std::fs;

use polyroute_lib::{load_poly, parse_poly, to_poly_string, write_poly, AdjacencyMatrix, Error};
use tempfile::tempdir;

use common::{fixture_path, random_graph, ring};

#[test]
fn ring_fixture_loads() {
    let graph = ring();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.vertex(3).map(|v| (v.x, v.y)), Some((0.0, 10.0)));
}

#[test]
fn truncated_vertex_list_is_a_format_error() {
    let err = load_poly(&fixture_path("truncated.poly")).expect_err("only two vertex lines");
    match err {
        Error::Format { line, message } => {
            assert_eq!(line, 4);
            assert!(message.contains("vertex line"), "{message}");
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn random_graphs_survive_a_round_trip() {
    for seed in 0..20 {
        let graph = random_graph(seed, 1 + (seed as usize * 7) % 40, 60);
        let parsed = parse_poly(&to_poly_string(&graph)).expect("writer output parses");

        assert_eq!(parsed.vertices(), graph.vertices(), "seed {seed}");
        let original: HashSet<_> = graph.edges().iter().copied().collect();
        let reparsed: HashSet<_> = parsed.edges().iter().copied().collect();
        assert_eq!(original, reparsed, "seed {seed}");
    }
}

#[test]
fn written_file_loads_back() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("copy.poly");
    let graph = random_graph(42, 25, 50);

    let file = fs::File::create(&path).expect("create file");
    write_poly(&graph, file).expect("write poly");

    assert_eq!(load_poly(&path).expect("load copy"), graph);
}

#[test]
fn matrix_entries_follow_edge_licences() {
    for seed in 0..5 {
        let graph = random_graph(seed, 30, 80);
        let matrix = AdjacencyMatrix::build(&graph);

        let mut licensed = HashSet::new();
        for edge in graph.edges() {
            licensed.insert((edge.origin, edge.destination));
            if !edge.directed {
                licensed.insert((edge.destination, edge.origin));
            }
        }

        for o in 0..graph.vertex_count() {
            for d in 0..graph.vertex_count() {
                let weight = matrix.weight(o, d);
                if o != d && licensed.contains(&(o, d)) {
                    assert_eq!(weight, graph.distance(o, d), "seed {seed} ({o},{d})");
                } else {
                    assert_eq!(weight, None, "seed {seed} ({o},{d})");
                }
            }
        }
    }
}

#[test]
fn unreadable_source_is_an_io_error() {
    let dir = tempdir().expect("create temp dir");
    // A directory exists but cannot be read as a file.
    let err = load_poly(dir.path()).expect_err("directory is not a poly file");
    assert!(matches!(err, Error::Io(_)));
}
