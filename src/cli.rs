//! Command-line interface definition for Banter
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat command and chat-history management.

use clap::{Parser, Subcommand};

/// Banter - local chat playground with a simulated streaming assistant
///
/// Chats live entirely on this machine; assistant replies are synthesized
/// locally by replaying a fixed text chunk by chunk.
#[derive(Parser, Debug, Clone)]
#[command(name = "banter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the chats database path
    #[arg(long, env = "BANTER_STORE_PATH")]
    pub storage_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Banter
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive chat session
    Chat,

    /// Manage stored chats
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// Chat-history management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List all stored chats
    List,

    /// Print the full message thread of a chat
    Show {
        /// Chat id (full UUID or unique prefix)
        id: String,
    },

    /// Rename a chat
    Rename {
        /// Chat id (full UUID or unique prefix)
        id: String,

        /// New title
        title: String,
    },

    /// Delete a chat
    Delete {
        /// Chat id (full UUID or unique prefix)
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_command() {
        let cli = Cli::parse_from(["banter", "chat"]);
        assert!(matches!(cli.command, Commands::Chat));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_history_list() {
        let cli = Cli::parse_from(["banter", "history", "list"]);
        match cli.command {
            Commands::History { command } => assert!(matches!(command, HistoryCommand::List)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_rename() {
        let cli = Cli::parse_from(["banter", "history", "rename", "abcd1234", "My Chat"]);
        match cli.command {
            Commands::History {
                command: HistoryCommand::Rename { id, title },
            } => {
                assert_eq!(id, "abcd1234");
                assert_eq!(title, "My Chat");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_storage_path_flag() {
        let cli = Cli::parse_from(["banter", "--storage-path", "/tmp/x.db", "chat"]);
        assert_eq!(cli.storage_path.as_deref(), Some("/tmp/x.db"));
    }
}
