//! Interactive session driver.
//!
//! [`InteractiveShell`] feeds parsed line commands into a [`Session`]. In
//! background mode completed pairs are handed to a [`QueryDispatcher`] and
//! the shell keeps reading input while the engine runs; finished results are
//! picked up after every command or on `wait`.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tokio::runtime::Handle;

use polyroute_lib::{
    ClickOutcome, PathSummary, QueryDispatcher, QueryReport, QueryRequest, QueryStatus,
    QueryTicket, SelectionChange, Session, VertexId,
};

use crate::output::{describe_selection, render_summary, GraphInfo, OutputFormat};
use crate::repl::{parse_command, ReplCommand, HELP};
use crate::terminal::ColorPalette;

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct Background {
    runtime: Handle,
    dispatcher: QueryDispatcher,
    pending: Option<QueryTicket>,
    shown_token: u64,
}

/// Line-driven front-end over a [`Session`].
pub struct InteractiveShell {
    session: Session,
    background: Option<Background>,
    format: OutputFormat,
    palette: ColorPalette,
}

impl InteractiveShell {
    /// Shell that runs every query inline.
    pub fn new(session: Session, format: OutputFormat, palette: ColorPalette) -> Self {
        Self {
            session,
            background: None,
            format,
            palette,
        }
    }

    /// Shell that dispatches queries onto `runtime`.
    pub fn with_background(
        session: Session,
        runtime: Handle,
        format: OutputFormat,
        palette: ColorPalette,
    ) -> Self {
        let dispatcher = QueryDispatcher::new(runtime.clone());
        Self {
            session,
            background: Some(Background {
                runtime,
                dispatcher,
                pending: None,
                shown_token: 0,
            }),
            format,
            palette,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only I/O failures
    /// on `input` or `out` end the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command input")?;
            let flow = match parse_command(&line) {
                Ok(Some(command)) => self.execute(command, out)?,
                Ok(None) => Flow::Continue,
                Err(err) => {
                    writeln!(out, "error: {err:#}")?;
                    Flow::Continue
                }
            };
            self.collect(out)?;
            if flow == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Execute a single command.
    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> Result<Flow> {
        tracing::debug!(?command, "executing interactive command");
        if let Err(err) = self.dispatch(command.clone(), out) {
            writeln!(out, "error: {err:#}")?;
        }
        Ok(match command {
            ReplCommand::Quit => Flow::Quit,
            _ => Flow::Continue,
        })
    }

    fn dispatch<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> Result<()> {
        match command {
            ReplCommand::Load(path) => self.load(&path, out),
            ReplCommand::Click(id) => self.click(Some(id), out),
            ReplCommand::Miss => self.click(None, out),
            ReplCommand::Pick { x, y, radius } => self.pick(x, y, radius, out),
            ReplCommand::Add { x, y } => self.add(x, y, out),
            ReplCommand::Reset => {
                self.session.reset();
                self.invalidate();
                writeln!(out, "selection cleared")?;
                Ok(())
            }
            ReplCommand::Status => self.status(out),
            ReplCommand::Info => self.info(out),
            ReplCommand::Wait => self.wait(out),
            ReplCommand::Help => {
                write!(out, "{HELP}")?;
                Ok(())
            }
            ReplCommand::Quit => Ok(()),
        }
    }

    fn load<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<()> {
        let snapshot = self
            .session
            .load_path(path)
            .with_context(|| format!("failed to load graph from {}", path.display()))?;
        self.invalidate();
        writeln!(
            out,
            "loaded {} vertices and {} edges from {}",
            snapshot.graph().vertex_count(),
            snapshot.graph().edge_count(),
            path.display()
        )?;
        Ok(())
    }

    fn click<W: Write>(&mut self, vertex: Option<VertexId>, out: &mut W) -> Result<()> {
        if self.background.is_some() {
            let change = self.session.select(vertex)?;
            self.announce(change, out)?;
            self.after_background_change(change, out)
        } else {
            let outcome = self.session.click(vertex)?;
            self.show_click(outcome, out)
        }
    }

    fn pick<W: Write>(&mut self, x: f64, y: f64, radius: f64, out: &mut W) -> Result<()> {
        if self.background.is_some() {
            let vertex = self
                .session
                .graph()
                .and_then(|graph| graph.vertex_at(x, y, radius));
            self.click(vertex, out)
        } else {
            let outcome = self.session.pick(x, y, radius)?;
            self.show_click(outcome, out)
        }
    }

    fn add<W: Write>(&mut self, x: f64, y: f64, out: &mut W) -> Result<()> {
        let id = self.session.append_vertex(x, y)?;
        writeln!(out, "added vertex {id} at ({x}, {y})")?;

        // The new snapshot has a fresh generation, so a query still running
        // against the old one can no longer be recorded.
        if self.background.is_some() && self.session.last_report().is_none() {
            if let Some(request) = self.session.pending_request() {
                self.submit(request.origin, request.destination, out)?;
            }
        }
        Ok(())
    }

    fn status<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", describe_selection(self.session.state()))?;
        match self.session.last_report().cloned() {
            Some(report) => self.print_report(&report, out),
            None => {
                if let Some(request) = self.session.pending_request() {
                    writeln!(out, "query {request} still running")?;
                }
                Ok(())
            }
        }
    }

    fn info<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.session.snapshot() {
            Some(snapshot) => {
                let text = GraphInfo::from_snapshot(&snapshot).render(self.format, &self.palette)?;
                write!(out, "{text}")?;
            }
            None => writeln!(out, "no graph loaded")?,
        }
        Ok(())
    }

    fn wait<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(background) = self.background.as_mut() else {
            writeln!(out, "queries run inline; nothing to wait for")?;
            return Ok(());
        };
        let Some(ticket) = background.pending.take() else {
            writeln!(out, "no query running")?;
            return Ok(());
        };
        let token = ticket.token;
        let status = background.runtime.block_on(ticket.wait())?;
        if status == QueryStatus::Stale {
            writeln!(out, "query #{token} was superseded")?;
        }
        Ok(())
    }

    fn announce<W: Write>(&self, change: SelectionChange, out: &mut W) -> Result<()> {
        match change {
            SelectionChange::Ignored => writeln!(out, "no vertex there")?,
            SelectionChange::OriginSet { origin, restarted } => {
                if restarted {
                    writeln!(out, "previous path cleared")?;
                }
                writeln!(out, "origin set to {origin}")?;
            }
            SelectionChange::OriginCleared { origin } => writeln!(out, "origin {origin} cleared")?,
            SelectionChange::PairCompleted { destination, .. } => {
                writeln!(out, "destination set to {destination}")?;
            }
            SelectionChange::Reset => writeln!(out, "selection cleared")?,
        }
        Ok(())
    }

    fn show_click<W: Write>(&mut self, outcome: ClickOutcome, out: &mut W) -> Result<()> {
        self.announce(outcome.change, out)?;
        match outcome.report {
            Some(report) => self.print_report(&report, out),
            None => Ok(()),
        }
    }

    fn after_background_change<W: Write>(
        &mut self,
        change: SelectionChange,
        out: &mut W,
    ) -> Result<()> {
        match change {
            SelectionChange::PairCompleted {
                origin,
                destination,
            } => self.submit(origin, destination, out),
            change if change.discards_path() => {
                self.invalidate();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn submit<W: Write>(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        out: &mut W,
    ) -> Result<()> {
        let Some(snapshot) = self.session.snapshot() else {
            return Ok(());
        };
        let Some(background) = self.background.as_mut() else {
            return Ok(());
        };
        let request = QueryRequest::new(origin, destination);
        let ticket = background.dispatcher.submit(snapshot, request);
        writeln!(out, "query #{} submitted ({request})", ticket.token)?;
        background.pending = Some(ticket);
        Ok(())
    }

    fn invalidate(&mut self) {
        if let Some(background) = self.background.as_mut() {
            background.dispatcher.invalidate();
            background.pending = None;
        }
    }

    /// Record and print a background result that has not been shown yet.
    fn collect<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(background) = self.background.as_mut() else {
            return Ok(());
        };
        let Some(completed) = background.dispatcher.latest() else {
            return Ok(());
        };
        if completed.token <= background.shown_token {
            return Ok(());
        }
        background.shown_token = completed.token;
        if background
            .pending
            .as_ref()
            .is_some_and(|ticket| ticket.token == completed.token)
        {
            background.pending = None;
        }

        match &completed.outcome {
            Ok(outcome) => {
                let report = QueryReport {
                    request: completed.request,
                    generation: completed.generation,
                    outcome: outcome.clone(),
                };
                if self.session.record_report(report.clone()) {
                    self.print_report(&report, out)?;
                }
            }
            Err(err) => writeln!(out, "error: query {} failed: {err}", completed.request)?,
        }
        Ok(())
    }

    fn print_report<W: Write>(&self, report: &QueryReport, out: &mut W) -> Result<()> {
        let Some(snapshot) = self.session.snapshot() else {
            return Ok(());
        };
        let summary = PathSummary::new(&snapshot, report.request, &report.outcome);
        let text = render_summary(&summary, self.format, &self.palette)?;
        write!(out, "{text}")?;
        Ok(())
    }
}
