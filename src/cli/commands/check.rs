//! Check command: explain the ignore verdict for individual paths

use crate::config::GlobalConfig;
use crate::ignore::{IgnoreChecker, IgnoreResult};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Execute the check command
pub fn execute(
    paths: Vec<PathBuf>,
    root: PathBuf,
    ignore_file: Option<String>,
    json: bool,
) -> Result<()> {
    let config = GlobalConfig::load()?;
    let ignore_file = ignore_file.unwrap_or_else(|| config.ignore_file().to_string());
    let json = json || config.output.json.unwrap_or(false);

    let checker = IgnoreChecker::new(&root, ignore_file)
        .with_context(|| format!("Cannot check paths below {}", root.display()))?;

    let mut results = Vec::new();
    for path in &paths {
        let verdict = checker
            .check(path)
            .with_context(|| format!("Failed to check {}", path.display()))?;
        if json {
            results.push(verdict_json(path, &verdict));
        } else {
            print_verdict(path, &verdict);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn verdict_label(verdict: &IgnoreResult) -> &'static str {
    match verdict {
        IgnoreResult::Ignored(_) => "ignored",
        IgnoreResult::Included => "included",
        IgnoreResult::IncludedByNegation(_) => "included by negation",
    }
}

fn verdict_json(path: &Path, verdict: &IgnoreResult) -> serde_json::Value {
    let rule = verdict.rule().map(|m| {
        json!({
            "source": m.source.display().to_string(),
            "line": m.line_number,
            "pattern": m.original,
        })
    });
    json!({
        "path": path.display().to_string(),
        "ignored": verdict.is_ignored(),
        "status": verdict_label(verdict),
        "rule": rule,
    })
}

fn print_verdict(path: &Path, verdict: &IgnoreResult) {
    let label = match verdict {
        IgnoreResult::Ignored(_) => verdict_label(verdict).red(),
        _ => verdict_label(verdict).green(),
    };
    match verdict.rule() {
        Some(rule) => println!("{}: {} ({})", path.display(), label, rule.to_string().dimmed()),
        None => println!("{}: {}", path.display(), label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::RuleMatch;

    #[test]
    fn test_verdict_json() {
        let verdict = IgnoreResult::Ignored(RuleMatch {
            source: PathBuf::from("root/.gitignore"),
            line_number: 3,
            original: "*.log".to_string(),
        });
        let value = verdict_json(Path::new("app.log"), &verdict);
        assert_eq!(value["ignored"], json!(true));
        assert_eq!(value["rule"]["line"], json!(3));
        assert_eq!(value["rule"]["pattern"], json!("*.log"));

        let value = verdict_json(Path::new("main.rs"), &IgnoreResult::Included);
        assert_eq!(value["status"], json!("included"));
        assert!(value["rule"].is_null());
    }
}
