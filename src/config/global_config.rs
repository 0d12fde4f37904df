//! Global configuration management
//!
//! Provides walk defaults stored in ~/.smartwalk/config.toml

use crate::core::error::{Result, WalkError};
use crate::core::types::DEFAULT_IGNORE_FILE;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SMARTWALK_HOME";

/// Global configuration for SmartWalk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Walk defaults
    #[serde(default)]
    pub walk: WalkConfig,
    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,
    /// Custom configuration values
    #[serde(flatten)]
    pub custom: HashMap<String, ConfigValue>,
}

/// Defaults for `smartwalk walk`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Name of the ignore file
    pub ignore_file: Option<String>,
    /// Also list ignored files
    pub list_ignored: Option<bool>,
    /// List ignored files only
    pub list_ignored_only: Option<bool>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print JSON instead of plain lines
    pub json: Option<bool>,
    /// Color output: auto, always, never
    pub color: Option<String>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

/// Configuration key for setting values
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigKey {
    WalkIgnoreFile,
    WalkListIgnored,
    WalkListIgnoredOnly,
    OutputJson,
    OutputColor,
    Custom(String),
}

impl ConfigKey {
    pub fn from_str(key: &str) -> Option<Self> {
        match key {
            "walk.ignore_file" => Some(ConfigKey::WalkIgnoreFile),
            "walk.list_ignored" => Some(ConfigKey::WalkListIgnored),
            "walk.list_ignored_only" => Some(ConfigKey::WalkListIgnoredOnly),
            "output.json" => Some(ConfigKey::OutputJson),
            "output.color" => Some(ConfigKey::OutputColor),
            "" => None,
            _ => Some(ConfigKey::Custom(key.to_string())),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            ConfigKey::WalkIgnoreFile => "walk.ignore_file",
            ConfigKey::WalkListIgnored => "walk.list_ignored",
            ConfigKey::WalkListIgnoredOnly => "walk.list_ignored_only",
            ConfigKey::OutputJson => "output.json",
            ConfigKey::OutputColor => "output.color",
            ConfigKey::Custom(key) => key,
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| WalkError::io(&config_path, e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| WalkError::configuration(format!("Failed to parse global config: {}", e)))
    }

    /// Save global configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WalkError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| WalkError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content).map_err(|e| WalkError::io(&config_path, e))?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir).join("config.toml"));
        }

        let user_dirs = UserDirs::new().ok_or(WalkError::HomeDirectoryNotFound)?;

        let config_dir = user_dirs.home_dir().join(".smartwalk");
        Ok(config_dir.join("config.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: &ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::WalkIgnoreFile => self
                .walk
                .ignore_file
                .as_ref()
                .map(|s| ConfigValue::String(s.clone())),
            ConfigKey::WalkListIgnored => self.walk.list_ignored.map(ConfigValue::Boolean),
            ConfigKey::WalkListIgnoredOnly => {
                self.walk.list_ignored_only.map(ConfigValue::Boolean)
            },
            ConfigKey::OutputJson => self.output.json.map(ConfigValue::Boolean),
            ConfigKey::OutputColor => self
                .output
                .color
                .as_ref()
                .map(|s| ConfigValue::String(s.clone())),
            ConfigKey::Custom(key) => self.custom.get(key).cloned(),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match key {
            ConfigKey::WalkIgnoreFile => {
                if let ConfigValue::String(name) = value {
                    if name.is_empty() || name.contains('/') {
                        return Err(WalkError::configuration(
                            "walk.ignore_file must be a plain file name",
                        ));
                    }
                    self.walk.ignore_file = Some(name);
                } else {
                    return Err(WalkError::configuration("walk.ignore_file must be a string"));
                }
            },
            ConfigKey::WalkListIgnored => {
                if let ConfigValue::Boolean(enabled) = value {
                    self.walk.list_ignored = Some(enabled);
                } else {
                    return Err(WalkError::configuration("walk.list_ignored must be a boolean"));
                }
            },
            ConfigKey::WalkListIgnoredOnly => {
                if let ConfigValue::Boolean(enabled) = value {
                    self.walk.list_ignored_only = Some(enabled);
                } else {
                    return Err(WalkError::configuration(
                        "walk.list_ignored_only must be a boolean",
                    ));
                }
            },
            ConfigKey::OutputJson => {
                if let ConfigValue::Boolean(enabled) = value {
                    self.output.json = Some(enabled);
                } else {
                    return Err(WalkError::configuration("output.json must be a boolean"));
                }
            },
            ConfigKey::OutputColor => match value {
                ConfigValue::String(color)
                    if matches!(color.as_str(), "auto" | "always" | "never") =>
                {
                    self.output.color = Some(color);
                },
                _ => {
                    return Err(WalkError::configuration(
                        "output.color must be one of: auto, always, never",
                    ));
                },
            },
            ConfigKey::Custom(key_name) => {
                self.custom.insert(key_name, value);
            },
        }
        Ok(())
    }

    /// Unset a configuration value
    pub fn unset(&mut self, key: &ConfigKey) {
        match key {
            ConfigKey::WalkIgnoreFile => self.walk.ignore_file = None,
            ConfigKey::WalkListIgnored => self.walk.list_ignored = None,
            ConfigKey::WalkListIgnoredOnly => self.walk.list_ignored_only = None,
            ConfigKey::OutputJson => self.output.json = None,
            ConfigKey::OutputColor => self.output.color = None,
            ConfigKey::Custom(key_name) => {
                self.custom.remove(key_name);
            },
        }
    }

    /// List all configuration values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();

        if let Some(ignore_file) = &self.walk.ignore_file {
            entries.push(("walk.ignore_file".to_string(), ignore_file.clone()));
        }
        if let Some(list_ignored) = self.walk.list_ignored {
            entries.push(("walk.list_ignored".to_string(), list_ignored.to_string()));
        }
        if let Some(only) = self.walk.list_ignored_only {
            entries.push(("walk.list_ignored_only".to_string(), only.to_string()));
        }
        if let Some(json) = self.output.json {
            entries.push(("output.json".to_string(), json.to_string()));
        }
        if let Some(color) = &self.output.color {
            entries.push(("output.color".to_string(), color.clone()));
        }

        for (key, value) in &self.custom {
            entries.push((key.clone(), value.to_string()));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Ignore file name to use when none is given on the command line
    pub fn ignore_file(&self) -> &str {
        self.walk
            .ignore_file
            .as_deref()
            .unwrap_or(DEFAULT_IGNORE_FILE)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            walk: WalkConfig {
                ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
                list_ignored: None,
                list_ignored_only: None,
            },
            output: OutputConfig {
                json: None,
                color: Some("auto".to_string()),
            },
            custom: HashMap::new(),
        }
    }
}

impl ConfigValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation_and_defaults() {
        let config = GlobalConfig::default();

        assert_eq!(config.walk.ignore_file, Some(".gitignore".to_string()));
        assert_eq!(config.ignore_file(), ".gitignore");
        assert!(config.walk.list_ignored.is_none());
        assert_eq!(config.output.color, Some("auto".to_string()));
    }

    #[test]
    fn test_config_set_and_get() -> Result<()> {
        let mut config = GlobalConfig::default();

        config.set(
            ConfigKey::WalkIgnoreFile,
            ConfigValue::String(".backupignore".to_string()),
        )?;
        config.set(ConfigKey::WalkListIgnored, ConfigValue::Boolean(true))?;

        assert_eq!(config.ignore_file(), ".backupignore");
        assert_eq!(
            config.get(&ConfigKey::WalkListIgnored),
            Some(ConfigValue::Boolean(true))
        );

        Ok(())
    }

    #[test]
    fn test_config_set_rejects_wrong_types() {
        let mut config = GlobalConfig::default();

        assert!(config
            .set(ConfigKey::WalkListIgnored, ConfigValue::String("yes".into()))
            .is_err());
        assert!(config
            .set(ConfigKey::WalkIgnoreFile, ConfigValue::String("a/b".into()))
            .is_err());
        assert!(config
            .set(ConfigKey::OutputColor, ConfigValue::String("purple".into()))
            .is_err());
    }

    #[test]
    fn test_config_list_and_unset() -> Result<()> {
        let mut config = GlobalConfig::default();

        config.set(ConfigKey::OutputJson, ConfigValue::Boolean(true))?;
        config.set(
            ConfigKey::from_str("custom.depth").unwrap(),
            ConfigValue::Number(3),
        )?;

        let entries = config.list();
        assert!(entries.iter().any(|(k, v)| k == "output.json" && v == "true"));
        assert!(entries.iter().any(|(k, v)| k == "custom.depth" && v == "3"));
        assert!(entries.windows(2).all(|w| w[0].0 <= w[1].0));

        config.unset(&ConfigKey::OutputJson);
        assert!(config.get(&ConfigKey::OutputJson).is_none());

        Ok(())
    }

    #[test]
    fn test_config_toml_round_trip() -> Result<()> {
        let config = GlobalConfig::from_toml(
            "[walk]\nignore_file = \".npmignore\"\nlist_ignored = true\n",
        )?;
        assert_eq!(config.ignore_file(), ".npmignore");
        assert_eq!(config.walk.list_ignored, Some(true));
        assert!(config.output.color.is_none());

        assert!(GlobalConfig::from_toml("walk = 3").is_err());
        Ok(())
    }

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            ConfigKey::from_str("walk.ignore_file"),
            Some(ConfigKey::WalkIgnoreFile)
        );
        assert!(matches!(
            ConfigKey::from_str("custom.key"),
            Some(ConfigKey::Custom(_))
        ));
        assert_eq!(ConfigKey::from_str(""), None);
        assert_eq!(ConfigKey::OutputColor.to_str(), "output.color");
    }
}
