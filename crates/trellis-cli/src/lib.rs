//! The `trellis` command line: generate code from saved layouts and model
//! lists, and replay editing commands against a saved session.

pub mod commands;
pub mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "trellis", author, version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./trellis.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity; repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to read documents from.
#[derive(Debug, Clone, clap::Args)]
pub struct Source {
    /// JSON file holding the document
    #[arg(short, long, conflicts_with = "state")]
    pub input: Option<PathBuf>,

    /// Session directory written by `trellis edit`
    #[arg(short, long)]
    pub state: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a React function component from a layout
    React {
        #[command(flatten)]
        source: Source,
        /// Output directory; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Exported component name
        #[arg(long)]
        name: Option<String>,
    },
    /// Generate a Vue single-file component from a layout
    Vue {
        #[command(flatten)]
        source: Source,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Generate an Express + Mongoose server from a model list
    Express {
        #[command(flatten)]
        source: Source,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        mongo_url: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate Django models, serializers, views and urls from a model list
    Django {
        #[command(flatten)]
        source: Source,
        /// JSON file holding database settings
        #[arg(long)]
        database: Option<PathBuf>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        app_name: Option<String>,
    },
    /// Apply a JSON array of layout commands to a session directory
    Edit {
        /// Session directory
        #[arg(short, long)]
        state: PathBuf,
        /// JSON file with an array of commands
        #[arg(long)]
        commands: PathBuf,
        /// Use counter ids (`column-1`, `component-2`) instead of random ones
        #[arg(long)]
        sequential_ids: bool,
    },
    /// Forget everything stored in a session directory
    Reset {
        #[arg(short, long)]
        state: PathBuf,
    },
}
