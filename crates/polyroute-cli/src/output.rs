//! Output formatting for query results and graph statistics.
//!
//! Text output is meant for people at a terminal, JSON output for scripts.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use polyroute_lib::{
    Bounds, PathSummary, SelectionState, Snapshot, SummaryRenderMode, SummaryStatus,
};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Single-line vertex chain with cost.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Render a path summary in the requested format.
pub fn render_summary(
    summary: &PathSummary,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = summary.to_json().context("failed to serialize path summary")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Compact => Ok(summary.render(SummaryRenderMode::Compact)),
        OutputFormat::Text => {
            let tag = match summary.status {
                SummaryStatus::Found => format!("{} FOUND {}", palette.tag_found, palette.reset),
                SummaryStatus::NotReachable => {
                    format!("{} NO PATH {}", palette.tag_missing, palette.reset)
                }
            };
            Ok(format!(
                "{tag} {bold}{} -> {}{reset}\n{}",
                summary.origin,
                summary.destination,
                summary.render(SummaryRenderMode::Report),
                bold = palette.white_bold,
                reset = palette.reset,
            ))
        }
    }
}

/// Counts and extent of a loaded graph.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphInfo {
    pub generation: u64,
    pub vertices: usize,
    pub edges: usize,
    pub directed_edges: usize,
    /// Number of ordered vertex pairs with a finite matrix weight.
    pub reachable_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl GraphInfo {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let graph = snapshot.graph();
        Self {
            generation: snapshot.generation(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            directed_edges: graph.edges().iter().filter(|edge| edge.directed).count(),
            reachable_entries: snapshot.matrix().reachable_entries(),
            bounds: graph.bounds(),
        }
    }

    /// Render the statistics in the requested format.
    pub fn render(&self, format: OutputFormat, palette: &ColorPalette) -> Result<String> {
        if format == OutputFormat::Json {
            let mut json =
                serde_json::to_string_pretty(self).context("failed to serialize graph info")?;
            json.push('\n');
            return Ok(json);
        }

        let mut text = format!(
            "Vertices: {bold}{}{reset}\nEdges: {bold}{}{reset} ({} directed)\nMatrix entries: {}\n",
            self.vertices,
            self.edges,
            self.directed_edges,
            self.reachable_entries,
            bold = palette.white_bold,
            reset = palette.reset,
        );
        match self.bounds {
            Some(bounds) => text.push_str(&format!(
                "Bounds: {cyan}x {:.3}..{:.3}, y {:.3}..{:.3}{reset}\n",
                bounds.min_x,
                bounds.max_x,
                bounds.min_y,
                bounds.max_y,
                cyan = palette.cyan,
                reset = palette.reset,
            )),
            None => text.push_str("Bounds: (empty graph)\n"),
        }
        Ok(text)
    }
}

/// One-line description of the selection for interactive prompts.
pub fn describe_selection(state: SelectionState) -> String {
    format!("selection: {state}")
}

/// Render an elapsed duration the way the footer shows it.
pub fn format_elapsed(elapsed: Duration) -> String {
    let elapsed_ms = elapsed.as_millis();
    if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}
