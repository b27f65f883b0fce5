// Handlers for the CLI subcommands.
//
// main.rs parses arguments and dispatches here; each module owns one
// subcommand.

pub mod export;
pub mod info;
pub mod interactive;
pub mod route;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use polyroute_lib::{resolve_graph_path, Session};

/// Resolve the graph path and load it into a fresh session.
pub(crate) fn load_session(graph: Option<&Path>) -> Result<(Session, PathBuf)> {
    let path = resolve_graph_path(graph).context("failed to locate the graph source")?;
    let mut session = Session::new();
    session
        .load_path(&path)
        .with_context(|| format!("failed to load graph from {}", path.display()))?;
    Ok((session, path))
}
