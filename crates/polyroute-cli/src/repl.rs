//! Line command grammar for `polyroute interactive`.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use polyroute_lib::VertexId;

/// Radius used by `pick` when none is given.
pub const DEFAULT_PICK_RADIUS: f64 = 3.0;

pub const HELP: &str = "\
commands:
  load PATH          replace the graph with a poly file
  click ID           click the vertex with this id
  pick X Y [RADIUS]  click whatever vertex lies within RADIUS of (X, Y)
  miss               click empty space
  add X Y            append a vertex without edges
  reset              clear the selection and any path
  status             show the selection and the latest path
  info               show graph statistics
  wait               block until the running background query finishes
  help               show this text
  quit               leave the session
";

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Load(PathBuf),
    Click(VertexId),
    Pick { x: f64, y: f64, radius: f64 },
    Miss,
    Add { x: f64, y: f64 },
    Reset,
    Status,
    Info,
    Wait,
    Help,
    Quit,
}

/// Parse one input line.
///
/// Blank lines and lines starting with `#` yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match keyword.as_str() {
        "load" => {
            let path = line
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .filter(|rest| !rest.is_empty())
                .ok_or_else(|| anyhow!("usage: load PATH"))?;
            ReplCommand::Load(PathBuf::from(path))
        }
        "click" => {
            expect_args(&args, 1, "click ID")?;
            let id = args[0]
                .parse::<VertexId>()
                .with_context(|| format!("'{}' is not a vertex id", args[0]))?;
            ReplCommand::Click(id)
        }
        "pick" => {
            if args.len() != 2 && args.len() != 3 {
                bail!("usage: pick X Y [RADIUS]");
            }
            let radius = match args.get(2) {
                Some(raw) => parse_number(raw)?,
                None => DEFAULT_PICK_RADIUS,
            };
            if radius < 0.0 {
                bail!("pick radius must not be negative");
            }
            ReplCommand::Pick {
                x: parse_number(args[0])?,
                y: parse_number(args[1])?,
                radius,
            }
        }
        "add" => {
            expect_args(&args, 2, "add X Y")?;
            ReplCommand::Add {
                x: parse_number(args[0])?,
                y: parse_number(args[1])?,
            }
        }
        "miss" => bare(&args, ReplCommand::Miss, "miss")?,
        "reset" => bare(&args, ReplCommand::Reset, "reset")?,
        "status" => bare(&args, ReplCommand::Status, "status")?,
        "info" => bare(&args, ReplCommand::Info, "info")?,
        "wait" => bare(&args, ReplCommand::Wait, "wait")?,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    };
    Ok(Some(command))
}

fn expect_args(args: &[&str], count: usize, usage: &str) -> Result<()> {
    if args.len() != count {
        bail!("usage: {usage}");
    }
    Ok(())
}

fn bare(args: &[&str], command: ReplCommand, usage: &str) -> Result<ReplCommand> {
    expect_args(args, 0, usage)?;
    Ok(command)
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("'{raw}' is not a number"))
}
