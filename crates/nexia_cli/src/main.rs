//! Headless command-line front end.
//!
//! # Responsibility
//! - Drive `nexia_core::Session` from one-shot shell commands.
//! - Keep output line-oriented and stable for scripting.

mod commands;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use nexia_core::{default_log_level, init_logging, Point};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nexia", about = "Nexia notebook engine CLI", version)]
struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "NEXIA_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core health and version
    Info,

    /// Create an empty notebook file
    New {
        file: PathBuf,
        /// Notebook name; defaults to "Untitled"
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a note and print its id
    Add {
        file: PathBuf,
        title: String,
        #[arg(long)]
        content: Option<String>,
        /// Canvas position as `X,Y`
        #[arg(long, value_parser = parse_point)]
        at: Option<Point>,
    },

    /// List notes in insertion order
    List {
        file: PathBuf,
    },

    /// Link two notes
    Link {
        file: PathBuf,
        from: String,
        to: String,
    },

    /// Remove a link between two notes
    Unlink {
        file: PathBuf,
        from: String,
        to: String,
    },

    /// Delete a note and every link touching it
    Remove {
        file: PathBuf,
        id: String,
    },

    /// Case-insensitive search over titles and content
    Search {
        file: PathBuf,
        query: String,
    },
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got `{value}`"))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid X `{x}`: {err}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid Y `{y}`: {err}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    match cli.command {
        Command::Info => commands::info(),
        Command::New { file, name } => commands::new_notebook(&file, name),
        Command::Add {
            file,
            title,
            content,
            at,
        } => commands::add(&file, title, content, at),
        Command::List { file } => commands::list(&file),
        Command::Link { file, from, to } => commands::link(&file, from, to),
        Command::Unlink { file, from, to } => commands::unlink(&file, from, to),
        Command::Remove { file, id } => commands::remove(&file, id),
        Command::Search { file, query } => commands::search(&file, query),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_point;
    use nexia_core::Point;

    #[test]
    fn parse_point_accepts_spaced_pairs() {
        assert_eq!(parse_point("1.5, -2").unwrap(), Point::new(1.5, -2.0));
    }

    #[test]
    fn parse_point_rejects_missing_comma() {
        assert!(parse_point("12").unwrap_err().contains("X,Y"));
    }
}
