//! Configuration command implementation

use crate::config::{ConfigKey, ConfigValue, GlobalConfig};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load()?;

    if show_origin {
        let config_path = GlobalConfig::get_config_path()?;
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        print_usage(json);
        return Ok(());
    };

    let config_key = ConfigKey::from_str(&key_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(&config_key);
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "unset",
                    "key": key_str,
                    "status": "success"
                })
            );
        } else {
            println!("{} {}", "✓".green(), format!("Unset {}", key_str).bold());
        }
    } else if let Some(value_str) = value {
        config.set(config_key, parse_config_value(&value_str))?;
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "set",
                    "key": key_str,
                    "value": value_str,
                    "status": "success"
                })
            );
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else if let Some(value) = config.get(&config_key) {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "key": key_str,
                    "value": value.to_string()
                })
            );
        } else {
            println!("{}", value);
        }
    } else if json {
        println!(
            "{}",
            serde_json::json!({
                "key": key_str,
                "value": null,
                "error": "not set"
            })
        );
    } else {
        eprintln!(
            "{}",
            format!("Configuration key '{}' is not set", key_str).yellow()
        );
        return Err(anyhow::anyhow!("Configuration key not found"));
    }

    Ok(())
}

fn print_usage(json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "error": "No configuration key specified",
                "usage": "smartwalk config <key> [value] or --list"
            })
        );
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!("{}", "═".repeat(40));
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "smartwalk config <key>".cyan());
    println!("  {} Set value", "smartwalk config <key> <value>".cyan());
    println!("  {} List all", "smartwalk config --list".cyan());
    println!("  {} Unset value", "smartwalk config --unset <key>".cyan());
    println!();
    println!("{}", "Common keys:".bold());
    println!("  {} Ignore file name", "walk.ignore_file".green());
    println!("  {} Also list ignored files", "walk.list_ignored".green());
    println!("  {} List ignored files only", "walk.list_ignored_only".green());
    println!("  {} JSON output by default", "output.json".green());
    println!("  {} Color output", "output.color".green());
}

/// List all configuration values
fn list_configuration(config: &GlobalConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let config_map: std::collections::BTreeMap<String, String> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&config_map)?);
    } else if entries.is_empty() {
        println!("{}", "No configuration values set".yellow());
        println!();
        println!("{}", "To set configuration:".bold());
        println!("  {}", "smartwalk config walk.ignore_file .backupignore".cyan());
    } else {
        println!("{}", "Global Configuration".green().bold());
        println!("{}", "═".repeat(40));
        println!();

        for (key, value) in entries {
            println!("{} = {}", key.bold(), value.cyan());
        }
    }

    Ok(())
}

/// Parse a string value into appropriate ConfigValue
fn parse_config_value(value_str: &str) -> ConfigValue {
    // Try to parse as number
    if let Ok(num) = value_str.parse::<i64>() {
        return ConfigValue::Number(num);
    }

    // Try to parse as boolean
    match value_str.to_lowercase().as_str() {
        "true" | "yes" | "on" => return ConfigValue::Boolean(true),
        "false" | "no" | "off" => return ConfigValue::Boolean(false),
        _ => {},
    }

    // Default to string
    ConfigValue::String(value_str.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_value() {
        assert!(matches!(parse_config_value("123"), ConfigValue::Number(123)));
        assert!(matches!(parse_config_value("true"), ConfigValue::Boolean(true)));
        assert!(matches!(parse_config_value("off"), ConfigValue::Boolean(false)));
        assert!(matches!(parse_config_value(".gitignore"), ConfigValue::String(_)));
    }
}
