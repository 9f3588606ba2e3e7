//! CLI command definitions using clap

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Automatic start/completed/cancelled dates for Markdown task status edits
#[derive(Parser, Debug)]
#[command(name = "autodate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON); defaults to the user config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Change a task's status in a Markdown file and update its dates
    SetStatus {
        /// Markdown file
        file: PathBuf,

        /// Line number of the task (1-based)
        #[arg(short, long)]
        line: usize,

        /// New status character, e.g. x, /, -
        #[arg(short, long, value_parser = parse_status)]
        status: char,

        /// Timestamp to date annotations with (YYYY-MM-DD[THH:MM:SS])
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,

        /// Write the result back instead of printing the line
        #[arg(short, long)]
        write: bool,
    },

    /// Show the date operations a status change would plan for a line
    Plan {
        /// Status before the change
        #[arg(long, value_parser = parse_status)]
        from: char,

        /// Status after the change
        #[arg(long, value_parser = parse_status)]
        to: char,

        /// The task line after the change
        line: String,
    },
}

fn parse_status(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("Status must be a single character: {:?}", s)),
    }
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(timestamp);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid timestamp: {}", e))?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("Invalid timestamp: {}", s))
}
