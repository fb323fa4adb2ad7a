//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Session transcripts and AI-powered summaries
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an AI summary from a session transcript
    Summarize {
        /// Transcript file with "Speaker: text" lines (stdin when omitted)
        file: Option<PathBuf>,

        /// Backend session identifier (generated when omitted)
        #[arg(short, long)]
        session_id: Option<String>,

        /// Video room name for backend persistence
        #[arg(short, long)]
        room: Option<String>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
