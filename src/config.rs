//! Configuration management for Banter
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file with CLI overrides. Every field has a
//! default, so the application runs with no config file at all.

use crate::cli::Cli;
use crate::error::{BanterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Banter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Simulated assistant reply settings
    #[serde(default)]
    pub reply: ReplyConfig,

    /// Typing-rhythm settings for the streaming simulator
    #[serde(default)]
    pub typing: TypingConfig,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// The canned reply the simulator streams back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Full text of the simulated reply
    #[serde(default = "default_reply_text")]
    pub text: String,
}

fn default_reply_text() -> String {
    "This is a simulated streaming response. I am a local mock that \
looks like a real assistant.\n\n\
Here's a code block example:\n\
```rust\n\
let hello = \"world\";\n\
println!(\"{hello}\");\n\
```\n\n\
And some list items:\n\
- Item 1\n\
- Item 2\n\
- Item 3\n\n\
I can simulate token-by-token generation to match the feel of a real LLM."
        .to_string()
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            text: default_reply_text(),
        }
    }
}

/// Delay parameters for the streaming simulator
///
/// The first-chunk delay emulates network latency; the per-chunk range
/// emulates variable typing speed. None of these carry a functional
/// contract beyond "some delay occurs".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    /// Fixed delay before the first chunk, in milliseconds
    #[serde(default = "default_first_chunk_delay_ms")]
    pub first_chunk_delay_ms: u64,

    /// Lower bound of the per-chunk delay, in milliseconds
    #[serde(default = "default_min_chunk_delay_ms")]
    pub min_chunk_delay_ms: u64,

    /// Upper bound of the per-chunk delay, in milliseconds
    #[serde(default = "default_max_chunk_delay_ms")]
    pub max_chunk_delay_ms: u64,
}

fn default_first_chunk_delay_ms() -> u64 {
    500
}

fn default_min_chunk_delay_ms() -> u64 {
    30
}

fn default_max_chunk_delay_ms() -> u64 {
    80
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            first_chunk_delay_ms: default_first_chunk_delay_ms(),
            min_chunk_delay_ms: default_min_chunk_delay_ms(),
            max_chunk_delay_ms: default_max_chunk_delay_ms(),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Optional path to the chats database; defaults to the user data dir
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file with CLI overrides applied
    ///
    /// A missing file is not an error: defaults are used. A present but
    /// unparseable file is an error, since silently ignoring an explicit
    /// config would be surprising.
    pub fn load<P: AsRef<Path>>(path: P, cli: &Cli) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| BanterError::Config(format!("Failed to read {:?}: {}", path, e)))?;
            serde_yaml::from_str::<Config>(&contents)
                .map_err(|e| BanterError::Config(format!("Failed to parse {:?}: {}", path, e)))?
        } else {
            tracing::debug!("no config file at {:?}, using defaults", path);
            Config::default()
        };

        if let Some(storage_path) = &cli.storage_path {
            config.storage.path = Some(storage_path.clone());
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a [`BanterError::Config`] if the reply text is empty or the
    /// per-chunk delay range is inverted.
    pub fn validate(&self) -> Result<()> {
        if self.reply.text.trim().is_empty() {
            return Err(BanterError::Config("reply.text must not be empty".into()).into());
        }
        if self.typing.min_chunk_delay_ms > self.typing.max_chunk_delay_ms {
            return Err(BanterError::Config(format!(
                "typing.min_chunk_delay_ms ({}) exceeds typing.max_chunk_delay_ms ({})",
                self.typing.min_chunk_delay_ms, self.typing.max_chunk_delay_ms
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["banter"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.typing.first_chunk_delay_ms, 500);
        assert_eq!(config.typing.min_chunk_delay_ms, 30);
        assert_eq!(config.typing.max_chunk_delay_ms, 80);
        assert!(!config.reply.text.is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("/definitely/not/here.yaml", &cli(&["chat"])).unwrap();
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_in_defaults() {
        let mut file = NamedTempFile::new().expect("tempfile failed");
        writeln!(file, "typing:\n  first_chunk_delay_ms: 5").expect("write failed");

        let config = Config::load(file.path(), &cli(&["chat"])).unwrap();
        assert_eq!(config.typing.first_chunk_delay_ms, 5);
        assert_eq!(config.typing.min_chunk_delay_ms, 30);
        assert!(!config.reply.text.is_empty());
    }

    #[test]
    fn test_unparseable_yaml_is_an_error() {
        let mut file = NamedTempFile::new().expect("tempfile failed");
        writeln!(file, "typing: [not a map").expect("write failed");
        assert!(Config::load(file.path(), &cli(&["chat"])).is_err());
    }

    #[test]
    fn test_cli_storage_path_overrides_file() {
        let mut file = NamedTempFile::new().expect("tempfile failed");
        writeln!(file, "storage:\n  path: /from/file.db").expect("write failed");

        let config = Config::load(
            file.path(),
            &cli(&["--storage-path", "/from/cli.db", "chat"]),
        )
        .unwrap();
        assert_eq!(config.storage.path.as_deref(), Some("/from/cli.db"));
    }

    #[test]
    fn test_empty_reply_text_fails_validation() {
        let mut config = Config::default();
        config.reply.text = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_delay_range_fails_validation() {
        let mut config = Config::default();
        config.typing.min_chunk_delay_ms = 100;
        config.typing.max_chunk_delay_ms = 50;
        assert!(config.validate().is_err());
    }
}
