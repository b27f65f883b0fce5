//! `info` command: graph counts and extent.

use std::path::Path;

use anyhow::{Context, Result};

use polyroute_cli::output::{GraphInfo, OutputFormat};
use polyroute_cli::terminal::ColorPalette;

use super::load_session;

pub fn handle_info(
    graph: Option<&Path>,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let (session, path) = load_session(graph)?;
    let snapshot = session
        .snapshot()
        .context("graph disappeared after loading")?;

    if format != OutputFormat::Json {
        println!("Graph: {}", path.display());
    }
    print!("{}", GraphInfo::from_snapshot(&snapshot).render(format, palette)?);
    Ok(())
}
