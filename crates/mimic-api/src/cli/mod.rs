//! CLI command definitions for the `mimic` binary.

pub mod ask;
pub mod chat;
pub mod model;
pub mod train;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A chat bot that remembers what it said and learns from it.
#[derive(Parser)]
#[command(name = "mimic", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml and the memory file.
    #[arg(long, global = true, env = "MIMIC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP adapter.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Chat from the terminal, one message per line.
    Chat {
        /// Channel the console messages are posted to.
        #[arg(long)]
        channel: String,
    },

    /// Ask the model a single question.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Show which model the bot is running.
    Model,

    /// Retrain the local model from the memory file.
    Train,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::parse_from(["mimic", "ask", "how", "are", "you"]);
        match cli.command {
            Commands::Ask { question } => assert_eq!(question.join(" "), "how are you"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mimic", "train", "--json", "-vv", "--data-dir", "/tmp/m"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/m")));
        assert!(matches!(cli.command, Commands::Train));
    }
}
