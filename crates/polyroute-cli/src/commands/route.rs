//! Route command handler for computing a single shortest path.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use polyroute_cli::output::{format_elapsed, render_summary, OutputFormat};
use polyroute_cli::terminal::ColorPalette;
use polyroute_lib::{PathSummary, QueryRequest, VertexId};

use super::load_session;

/// Arguments for the route command.
#[derive(Debug, Clone, Copy)]
pub struct RouteCommandArgs {
    /// Origin vertex id.
    pub from: VertexId,
    /// Destination vertex id.
    pub to: VertexId,
}

/// Load the graph, run one query and print the result.
///
/// An unreachable destination is reported, not treated as a failure.
pub fn handle_route(
    graph: Option<&Path>,
    args: RouteCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let started = Instant::now();
    let (session, _) = load_session(graph)?;
    let snapshot = session
        .snapshot()
        .context("graph disappeared after loading")?;

    let request = QueryRequest::new(args.from, args.to);
    let outcome = snapshot
        .query(request)
        .with_context(|| format!("cannot route {request}"))?;
    let summary = PathSummary::new(&snapshot, request, &outcome);
    print!("{}", render_summary(&summary, format, palette)?);

    if format == OutputFormat::Text {
        println!(
            "\n{}Completed in {}{}",
            palette.gray,
            format_elapsed(started.elapsed()),
            palette.reset
        );
    }
    Ok(())
}
