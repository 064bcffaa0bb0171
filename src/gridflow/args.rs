use clap::{Parser, Subcommand};
use gridflow::model::Theme;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridflow")]
#[command(about = "Inspect and edit plain-text notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show note statistics
    #[command(alias = "st")]
    Stats {
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List regex matches as line:column
    #[command(alias = "s")]
    Search {
        file: PathBuf,

        pattern: String,

        /// Match case exactly
        #[arg(short, long)]
        case_sensitive: bool,
    },

    /// Replace regex matches and save the file
    #[command(alias = "r")]
    Replace {
        file: PathBuf,

        pattern: String,

        /// Replacement text; $1, ${name} expand capture groups
        replacement: String,

        /// Replace every match instead of the first
        #[arg(short, long)]
        all: bool,

        /// Match case exactly
        #[arg(short, long)]
        case_sensitive: bool,

        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the note as a JSON export
    Export {
        file: PathBuf,

        /// Note title
        #[arg(long)]
        title: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// light or dark; defaults to the configured theme
        #[arg(long)]
        theme: Option<Theme>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (auto-save-interval-ms, max-history, theme, case-sensitive)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
