//! `export` command: re-serialize the loaded graph as poly text.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use polyroute_lib::write_poly;

use super::load_session;

/// Write the graph to `output`, or to stdout when no path is given.
pub fn handle_export(graph: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let (session, source) = load_session(graph)?;
    let graph = session.graph().context("graph disappeared after loading")?;

    match output {
        Some(target) => {
            let file = File::create(target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            let mut writer = BufWriter::new(file);
            write_poly(graph, &mut writer)
                .with_context(|| format!("failed to write {}", target.display()))?;
            writer.flush()?;
            tracing::info!(
                source = %source.display(),
                target = %target.display(),
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                "exported graph"
            );
            eprintln!("Wrote {}", target.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_poly(graph, &mut handle).context("failed to write graph to stdout")?;
            handle.flush()?;
        }
    }
    Ok(())
}
