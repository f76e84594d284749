//! Command-line interface for the `paddock` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::Verbosity;

/// paddock - F1 for Dummies, in your terminal
///
/// Browse the page interactively, export it as SVG, or dump the bundled
/// datasets as JSON.
#[derive(Debug, Parser)]
#[command(name = "paddock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a configuration file (default: ./paddock.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use the light palette regardless of configuration
    #[arg(long, global = true)]
    pub light: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Default, Subcommand)]
pub enum Command {
    /// Open the interactive terminal browser (default)
    #[default]
    Browse,

    /// Write one SVG per section plus the whole page
    Export(ExportArgs),

    /// Print a bundled dataset as JSON
    Dump(DumpArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory, created if missing
    #[arg(short, long, value_name = "DIR", default_value = "paddock-export")]
    pub out: PathBuf,

    /// Page width in pixels
    #[arg(short, long, default_value_t = 1280.0)]
    pub width: f64,

    /// Viewport height in pixels (sizes the hero banner)
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Dataset name; every dataset when omitted
    pub name: Option<String>,

    /// Emit compact single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// Verbosity from flags, or `None` to defer to the config file.
    #[must_use]
    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.quiet {
            return Some(Verbosity::Quiet);
        }
        match self.verbose {
            0 => None,
            1 => Some(Verbosity::Verbose),
            _ => Some(Verbosity::Trace),
        }
    }
}
