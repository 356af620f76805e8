//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub const DEFAULT_INSTRUCTION: &str = "Summarize the meeting into key points, decisions and action items.";

/// recap - Meeting transcript summaries, mailed out
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
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,

        /// Never call the LLM, synthesize summaries locally
        #[arg(long)]
        mock: bool,
    },

    /// Summarize a transcript file (or stdin)
    Summarize {
        /// Transcript file; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Instruction passed along with the transcript
        #[arg(short, long, default_value = DEFAULT_INSTRUCTION)]
        instruction: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Never call the LLM, synthesize the summary locally
        #[arg(long)]
        mock: bool,
    },

    /// Mail a summary to one or more recipients
    Send {
        /// Summary JSON file (either a summary or a {"summary": ...} response)
        #[arg(short, long)]
        summary: PathBuf,

        /// Recipient address (repeatable)
        #[arg(short, long = "to", required = true)]
        to: Vec<String>,

        /// Text file with edited points, one per line
        #[arg(short, long)]
        points: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
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
