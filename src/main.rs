//! SmartWalk CLI
//!
//! Command-line interface for the SmartWalk ignore-aware walker.

use anyhow::Result;
use clap::Parser;
use smartwalk::cli::commands::{self, walk::WalkArgs};
use smartwalk::cli::context::CliContext;
use smartwalk::cli::{Cli, Commands};
use smartwalk::config::GlobalConfig;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the listing
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // an explicit --color wins over output.color
    let color = match cli.color.as_str() {
        "auto" => GlobalConfig::load()
            .ok()
            .and_then(|config| config.output.color)
            .unwrap_or_else(|| cli.color.clone()),
        other => other.to_string(),
    };
    match color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {},
    }

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
    });

    // Execute the command
    match cli.command {
        Commands::Walk {
            path,
            ignore_file,
            no_ignore_file,
            list_ignored,
            ignored_only,
            no_list_ignored,
            json,
            stats,
        } => commands::walk::execute(WalkArgs {
            path,
            ignore_file,
            no_ignore_file,
            list_ignored,
            ignored_only,
            no_list_ignored,
            json,
            stats,
        }),
        Commands::Check {
            paths,
            root,
            ignore_file,
            json,
        } => commands::check::execute(paths, root, ignore_file, json),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
            json,
        } => commands::config::execute(key, value, list, unset, show_origin, json),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
