//! Reader and writer for the poly graph format.
//!
//! ```text
//! <vertexCount> <ignored> <ignored> <ignored>
//! <id> <x> <y>                                  (vertexCount lines)
//! <edgeCount> <ignored>
//! <edgeId> <origin> <destination> <direction>   (edgeCount lines)
//! ```
//!
//! A direction of `0` marks an undirected edge; any other value is directed
//! from origin to destination. The edge list may be followed by a single
//! holes-count line, which is skipped. Any other content after the edges is
//! rejected.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Environment variable consulted when no graph path is passed explicitly.
pub const GRAPH_PATH_ENV: &str = "POLYROUTE_GRAPH";

/// Resolve the poly file to load: the explicit path wins, then `POLYROUTE_GRAPH`.
pub fn resolve_graph_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env::var_os(GRAPH_PATH_ENV) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(Error::GraphPathUnset),
    }
}

/// Read and parse a poly file from disk.
pub fn load_poly(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let source = fs::read_to_string(path)?;
    let graph = parse_poly(&source)?;
    tracing::info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded poly graph"
    );
    Ok(graph)
}

/// Parse poly text into a new [`Graph`].
///
/// Nothing is returned unless the whole source is valid.
pub fn parse_poly(source: &str) -> Result<Graph> {
    let mut lines = LineCursor::new(source);
    let mut graph = Graph::new();

    let (line, fields) = lines.next_record("vertex header")?;
    if fields.len() < 4 {
        return Err(Error::format(
            line,
            format!("vertex header needs 4 fields, found {}", fields.len()),
        ));
    }
    let vertex_count: usize = parse_field(line, &fields, 0, "vertex count")?;

    for index in 0..vertex_count {
        let (line, fields) = lines.next_record("vertex line")?;
        expect_fields(line, &fields, 3, "vertex")?;
        let id: usize = parse_field(line, &fields, 0, "vertex id")?;
        if id != index {
            return Err(Error::format(
                line,
                format!("vertex id {id} does not match its position {index}"),
            ));
        }
        let x = parse_coordinate(line, &fields, 1, "x")?;
        let y = parse_coordinate(line, &fields, 2, "y")?;
        graph.push_vertex(x, y);
    }

    let (line, fields) = lines.next_record("edge header")?;
    if fields.len() != 2 {
        return Err(Error::format(
            line,
            format!("edge header needs 2 fields, found {}", fields.len()),
        ));
    }
    let edge_count: usize = parse_field(line, &fields, 0, "edge count")?;

    for _ in 0..edge_count {
        let (line, fields) = lines.next_record("edge line")?;
        expect_fields(line, &fields, 4, "edge")?;
        let origin: usize = parse_field(line, &fields, 1, "edge origin")?;
        let destination: usize = parse_field(line, &fields, 2, "edge destination")?;
        let direction: i64 = parse_field(line, &fields, 3, "edge direction")?;
        graph
            .add_edge(origin, destination, direction != 0)
            .map_err(|err| Error::format(line, err.to_string()))?;
    }

    if let Some((line, fields)) = lines.next_nonblank() {
        expect_fields(line, &fields, 1, "holes count")?;
        parse_field::<usize>(line, &fields, 0, "holes count")?;
    }
    if let Some((line, _)) = lines.next_nonblank() {
        return Err(Error::format(line, "unexpected content after the edge list"));
    }

    Ok(graph)
}

/// Serialize a graph using the poly layout.
pub fn write_poly<W: Write>(graph: &Graph, mut out: W) -> Result<()> {
    writeln!(out, "{}\t2\t0\t1", graph.vertex_count())?;
    for vertex in graph.vertices() {
        writeln!(out, "{}\t{}\t{}", vertex.id, vertex.x, vertex.y)?;
    }
    writeln!(out, "{}\t1", graph.edge_count())?;
    for (index, edge) in graph.edges().iter().enumerate() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            index,
            edge.origin,
            edge.destination,
            u8::from(edge.directed)
        )?;
    }
    writeln!(out, "0")?;
    Ok(())
}

/// Serialize a graph into an owned poly string.
pub fn to_poly_string(graph: &Graph) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_poly(graph, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Iterates over non-blank lines while tracking 1-based line numbers.
struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            consumed: 0,
        }
    }

    fn next_nonblank(&mut self) -> Option<(usize, Vec<&'a str>)> {
        for raw in self.lines.by_ref() {
            self.consumed += 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if !fields.is_empty() {
                return Some((self.consumed, fields));
            }
        }
        None
    }

    fn next_record(&mut self, expected: &str) -> Result<(usize, Vec<&'a str>)> {
        match self.next_nonblank() {
            Some(record) => Ok(record),
            None => Err(Error::format(
                self.consumed + 1,
                format!("unexpected end of input, expected {expected}"),
            )),
        }
    }
}

fn expect_fields(line: usize, fields: &[&str], expected: usize, kind: &str) -> Result<()> {
    if fields.len() != expected {
        return Err(Error::format(
            line,
            format!("{kind} line needs {expected} fields, found {}", fields.len()),
        ));
    }
    Ok(())
}

fn parse_field<T: FromStr>(line: usize, fields: &[&str], index: usize, name: &str) -> Result<T> {
    fields[index]
        .parse()
        .map_err(|_| Error::format(line, format!("{name} '{}' is not valid", fields[index])))
}

fn parse_coordinate(line: usize, fields: &[&str], index: usize, name: &str) -> Result<f64> {
    let value: f64 = parse_field(line, fields, index, name)?;
    if !value.is_finite() {
        return Err(Error::format(line, format!("{name} must be finite")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = concat!(
        "4 2 0 1\n0 0 0\n1 10 0\n2 10 10\n3 0 10\n",
        "4 1\n0 0 1 0\n1 1 2 0\n2 2 3 0\n3 3 0 0\n",
    );

    fn format_line(err: Error) -> usize {
        match err {
            Error::Format { line, .. } => line,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn parses_square() {
        let graph = parse_poly(SQUARE).expect("valid poly");
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.vertex(2).map(|v| (v.x, v.y)), Some((10.0, 10.0)));
        assert!(graph.edges().iter().all(|e| !e.directed));
    }

    #[test]
    fn any_nonzero_direction_is_directed() {
        let graph = parse_poly("2 2 0 1\n0 0 0\n1 1 0\n2 1\n0 0 1 1\n1 1 0 -7\n").unwrap();
        assert!(graph.edges().iter().all(|e| e.directed));
    }

    #[test]
    fn accepts_tabs_blank_lines_and_trailing_sections() {
        let source = "2\t2\t0\t1\n\n0\t0.5\t1.5\n1\t2.0\t3.0\n1\t1\n0\t0\t1\t0\n0\n";
        let graph = parse_poly(source).expect("valid poly");
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn short_vertex_header_is_rejected() {
        let err = parse_poly("4 2 0\n").expect_err("header too short");
        assert_eq!(format_line(err), 1);
    }

    #[test]
    fn vertex_line_with_extra_field_names_line() {
        let err = parse_poly("2 2 0 1\n0 0 0\n1 1 0 9\n").expect_err("extra field");
        assert_eq!(format_line(err), 3);
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let err = parse_poly("1 2 0 1\n0 abc 0\n0 1\n").expect_err("bad x");
        assert!(err.to_string().contains("'abc'"));
        assert_eq!(format_line(err), 2);
    }

    #[test]
    fn missing_vertex_lines_are_rejected() {
        let err = parse_poly("3 2 0 1\n0 0 0\n1 1 1\n").expect_err("only two vertices");
        assert_eq!(format_line(err), 4);
    }

    #[test]
    fn out_of_order_vertex_id_is_rejected() {
        let err = parse_poly("2 2 0 1\n1 0 0\n0 1 1\n0 1\n").expect_err("ids swapped");
        assert_eq!(format_line(err), 2);
    }

    #[test]
    fn edge_to_unknown_vertex_is_rejected() {
        let err = parse_poly("2 2 0 1\n0 0 0\n1 1 1\n1 1\n0 0 5 0\n").expect_err("vertex 5");
        assert_eq!(format_line(err), 5);
    }

    #[test]
    fn short_edge_header_is_rejected() {
        let err = parse_poly("1 2 0 1\n0 0 0\n3\n").expect_err("edge header");
        assert_eq!(format_line(err), 3);
    }

    #[test]
    fn edge_header_with_extra_field_is_rejected() {
        let err = parse_poly("1 2 0 1\n0 0 0\n0 1 7\n").expect_err("edge header");
        assert_eq!(format_line(err), 3);
    }

    #[test]
    fn missing_vertex_line_cannot_swallow_the_edges() {
        // Line 4 reads as the third vertex, so the first edge line lands
        // where the edge header belongs.
        let source = "3 2 0 1\n0 0 0\n1 10 0\n2 1 0\n0 0 1 0\n1 1 2 0\n";
        let err = parse_poly(source).expect_err("edges shifted into the header");
        assert_eq!(format_line(err), 5);
    }

    #[test]
    fn edge_line_with_missing_field_is_rejected() {
        let err = parse_poly("2 2 0 1\n0 0 0\n1 1 1\n1 1\n0 0 1\n").expect_err("three fields");
        assert!(err.to_string().contains("edge line needs 4 fields"));
        assert_eq!(format_line(err), 5);
    }

    #[test]
    fn non_numeric_direction_is_rejected() {
        let err = parse_poly("2 2 0 1\n0 0 0\n1 1 1\n1 1\n0 0 1 x\n").expect_err("direction");
        assert!(err.to_string().contains("'x'"));
        assert_eq!(format_line(err), 5);
    }

    #[test]
    fn content_after_holes_count_is_rejected() {
        let source = format!("{SQUARE}0\n3 3 3\n");
        let err = parse_poly(&source).expect_err("extra record");
        assert_eq!(format_line(err), 12);

        let source = format!("{SQUARE}\n0 1\n");
        let err = parse_poly(&source).expect_err("holes line with two fields");
        assert_eq!(format_line(err), 12);
    }

    #[test]
    fn writer_output_parses_back() {
        let graph = parse_poly(SQUARE).unwrap();
        let text = to_poly_string(&graph);
        assert!(text.starts_with("4\t2\t0\t1\n"));
        assert_eq!(parse_poly(&text).unwrap(), graph);
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let explicit = Path::new("/tmp/explicit.poly");
        let resolved = resolve_graph_path(Some(explicit)).unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn missing_file_reports_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_poly(&dir.path().join("absent.poly")).expect_err("missing");
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }
}
