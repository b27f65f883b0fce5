//! polyroute CLI library.
//!
//! Presentation layer for the `polyroute` binary: logging setup, terminal
//! styling, output formatting and the interactive shell. All graph and query
//! behavior comes from `polyroute_lib`.

pub mod logging;
pub mod output;
pub mod repl;
pub mod shell;
pub mod terminal;
