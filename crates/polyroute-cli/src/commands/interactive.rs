//! `interactive` command: line-driven origin/destination selection.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use polyroute_cli::output::OutputFormat;
use polyroute_cli::shell::InteractiveShell;
use polyroute_cli::terminal::ColorPalette;
use polyroute_lib::{resolve_graph_path, Error as LibError, Session};

use super::load_session;

/// Start the shell on stdin/stdout.
///
/// A graph is loaded up front when one is configured; otherwise the session
/// starts empty and waits for `load` or `add`.
pub fn handle_interactive(
    graph: Option<&Path>,
    background: bool,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let session = match resolve_graph_path(graph) {
        Ok(_) => load_session(graph)?.0,
        Err(LibError::GraphPathUnset) => Session::new(),
        Err(err) => return Err(err).context("failed to locate the graph source"),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "polyroute interactive ({} queries); type 'help' for commands",
        if background { "background" } else { "inline" }
    )?;

    if background {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to start the query runtime")?;
        let mut shell =
            InteractiveShell::with_background(session, runtime.handle().clone(), format, palette);
        shell.run(stdin.lock(), &mut out)
    } else {
        let mut shell = InteractiveShell::new(session, format, palette);
        shell.run(stdin.lock(), &mut out)
    }
}
