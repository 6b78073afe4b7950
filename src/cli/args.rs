//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::phonetic::KeyLevel;

/// Top-level command line
#[derive(Parser)]
#[command(name = "mlphone")]
#[command(about = "Phonetic keys for Malayalam words")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute phonetic keys (reads one word per line from stdin if no words are given)
    Keys {
        /// Words to hash
        words: Vec<String>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Only print the key at this level (0/broad, 1/hard, 2/full)
        #[arg(short, long)]
        level: Option<KeyLevel>,
    },

    /// Check whether two words sound alike
    Compare {
        /// First word
        first: String,

        /// Second word
        second: String,

        /// Compare only at this level (0/broad, 1/hard, 2/full)
        #[arg(short, long)]
        level: Option<KeyLevel>,
    },

    /// Show the segment stream after every pipeline step
    Explain {
        /// Word to trace
        word: String,
    },

    /// Print the glyph tables
    Tables,

    /// Show or change persistent settings
    Config {
        /// Show the current configuration and its file path
        #[arg(long)]
        show: bool,

        /// Set default key level
        #[arg(long)]
        set_level: Option<KeyLevel>,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Enable or disable colored output
        #[arg(long)]
        set_color: Option<bool>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// How `keys` output is rendered
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
