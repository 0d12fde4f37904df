//! Command-line interface for SmartWalk

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// SmartWalk - list files the way your ignore files say
#[derive(Parser)]
#[command(
    name = "smartwalk",
    version,
    about = "A filesystem walker honoring hierarchical, gitignore-style ignore files",
    long_about = "SmartWalk lists the files below a directory while honoring ignore files placed at any level of the tree, without needing a version-control binary."
)]
pub struct Cli {
    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output besides the listing itself
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto", global = true)]
    pub color: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List files below a directory
    Walk {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Name of the ignore files (default: .gitignore, or walk.ignore_file)
        #[arg(long, env = "SMARTWALK_IGNORE_FILE")]
        ignore_file: Option<String>,

        /// Do not read ignore files at all (wins over --ignore-file)
        #[arg(long)]
        no_ignore_file: bool,

        /// Also list ignored files
        #[arg(short = 'i', long)]
        list_ignored: bool,

        /// List ignored files only
        #[arg(short = 'I', long)]
        ignored_only: bool,

        /// Do not list ignored files, even if the configuration says so
        #[arg(long)]
        no_list_ignored: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Print walk statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Explain whether paths are ignored and by which rule
    Check {
        /// Paths to check, relative to the root
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Root directory of the tree
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Name of the ignore files (default: .gitignore, or walk.ignore_file)
        #[arg(long, env = "SMARTWALK_IGNORE_FILE")]
        ignore_file: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get and set global configuration
    Config {
        /// Configuration key to get/set
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Unset a configuration value
        #[arg(long)]
        unset: bool,

        /// Show global configuration file location
        #[arg(long)]
        show_origin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_walk_defaults() {
        let cli = Cli::parse_from(["smartwalk", "walk"]);
        match cli.command {
            Commands::Walk {
                path,
                no_ignore_file,
                list_ignored,
                ignored_only,
                ..
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(!no_ignore_file && !list_ignored && !ignored_only);
            },
            _ => panic!("expected walk"),
        }
    }

    #[test]
    fn test_walk_flags() {
        let cli = Cli::parse_from([
            "smartwalk",
            "-q",
            "walk",
            "tree",
            "--ignore-file",
            ".npmignore",
            "-I",
            "--json",
        ]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Walk {
                path,
                ignore_file,
                ignored_only,
                json,
                ..
            } => {
                assert_eq!(path, PathBuf::from("tree"));
                assert_eq!(ignore_file.as_deref(), Some(".npmignore"));
                assert!(ignored_only && json);
            },
            _ => panic!("expected walk"),
        }
    }
}
