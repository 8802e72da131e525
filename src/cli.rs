//! CLI definitions for VoicePath.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// VoicePath CLI.
#[derive(Parser)]
#[command(name = "voicepath")]
#[command(about = "Voice-driven browser path replay and contribution recording")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replay a stored path in a live browser
    Replay {
        /// Path JSON file to replay
        #[arg(long, conflicts_with = "query", required_unless_present = "query")]
        file: Option<PathBuf>,

        /// Search the path service and replay the best match
        #[arg(long)]
        query: Option<String>,

        /// Restrict the search to one site
        #[arg(long, requires = "query")]
        domain: Option<String>,
    },

    /// Record an interaction stream as a contribution
    Record {
        /// Task the recorded steps accomplish
        #[arg(long)]
        task: String,

        /// JSON-lines file of observed events (default: stdin)
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Classify an error message and show its recovery policy
    Classify {
        /// Error message to classify
        message: String,

        /// Operation the error occurred in
        #[arg(long, default_value = "cli")]
        context: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
