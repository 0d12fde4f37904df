//! Walk command: list files honoring ignore files

use crate::cli::context::CliContext;
use crate::config::GlobalConfig;
use crate::ignore::{WalkOptions, Walker};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the walk command
#[derive(Debug)]
pub struct WalkArgs {
    pub path: PathBuf,
    pub ignore_file: Option<String>,
    pub no_ignore_file: bool,
    pub list_ignored: bool,
    pub ignored_only: bool,
    pub no_list_ignored: bool,
    pub json: bool,
    pub stats: bool,
}

impl WalkArgs {
    /// Fill unset options from the global configuration
    pub fn to_options(&self, config: &GlobalConfig) -> WalkOptions {
        let ignore_file = if self.no_ignore_file {
            None
        } else {
            Some(
                self.ignore_file
                    .clone()
                    .unwrap_or_else(|| config.ignore_file().to_string()),
            )
        };

        // --no-list-ignored only silences the configured defaults
        let configured = |value: Option<bool>| !self.no_list_ignored && value.unwrap_or(false);

        WalkOptions::new(&self.path)
            .ignore_file(ignore_file.as_deref())
            .list_ignored(self.list_ignored || configured(config.walk.list_ignored))
            .list_ignored_only(self.ignored_only || configured(config.walk.list_ignored_only))
    }
}

/// Execute the walk command
pub fn execute(args: WalkArgs) -> Result<()> {
    let config = GlobalConfig::load()?;
    let options = args.to_options(&config);
    let json = args.json || config.output.json.unwrap_or(false);

    let mut walk = Walker::new(options)
        .walk()
        .with_context(|| format!("Cannot walk {}", args.path.display()))?;

    if json {
        let paths = walk
            .by_ref()
            .map(|p| p.map(|p| p.display().to_string()))
            .collect::<crate::core::error::Result<Vec<_>>>()?;
        let mut output = json!({ "paths": paths });
        if args.stats {
            output["stats"] = serde_json::to_value(walk.stats())?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in walk.by_ref() {
        writeln!(out, "{}", path?.display())?;
    }
    out.flush()?;

    if (args.stats || CliContext::is_verbose()) && !CliContext::is_quiet() {
        let stats = walk.stats();
        eprintln!("{}", "Walk statistics".green().bold());
        eprintln!("  • Directories visited: {}", stats.directories_visited.to_string().cyan());
        eprintln!("  • Directories pruned: {}", stats.directories_pruned.to_string().cyan());
        eprintln!("  • Files seen: {}", stats.files_seen.to_string().cyan());
        eprintln!("  • Files ignored: {}", stats.files_ignored.to_string().cyan());
        eprintln!("  • Ignore files loaded: {}", stats.rule_files_loaded.to_string().cyan());
    }

    Ok(())
}
