mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use polyroute_cli::logging::{init_logging, LoggingConfig};
use polyroute_cli::output::OutputFormat;
use polyroute_cli::terminal::ColorPalette;
use polyroute_lib::{VertexId, GRAPH_PATH_ENV};

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load poly graphs and query shortest paths")]
struct Cli {
    /// Path to the poly graph file.
    #[arg(long, global = true, env = GRAPH_PATH_ENV)]
    graph: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors even when the terminal supports them.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print vertex and edge counts and the bounding box.
    Info,
    /// Compute the shortest path between two vertex ids.
    Route {
        /// Origin vertex id.
        #[arg(long = "from")]
        from: VertexId,
        /// Destination vertex id.
        #[arg(long = "to")]
        to: VertexId,
    },
    /// Write the graph back out in poly format.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Read selection commands from stdin.
    Interactive {
        /// Run queries on a background worker while reading input.
        #[arg(long)]
        background: bool,
    },
}

impl Command {
    fn default_log_level(&self) -> &'static str {
        match self {
            Command::Interactive { .. } => "info",
            _ => "warn",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env(cli.command.default_log_level()));

    let palette = if cli.no_color {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    };
    let graph = cli.graph.as_deref();

    match cli.command {
        Command::Info => commands::info::handle_info(graph, cli.format, &palette),
        Command::Route { from, to } => commands::route::handle_route(
            graph,
            RouteCommandArgs { from, to },
            cli.format,
            &palette,
        ),
        Command::Export { output } => commands::export::handle_export(graph, output.as_deref()),
        Command::Interactive { background } => {
            commands::interactive::handle_interactive(graph, background, cli.format, palette)
        }
    }
}
