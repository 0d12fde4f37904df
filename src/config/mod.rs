//! Configuration for SmartWalk
//!
//! Global walk defaults stored in ~/.smartwalk/config.toml, and the policy
//! based merging of configuration contents found at several tree levels.

pub mod global_config;
pub mod merge;

// Re-export commonly used items
pub use global_config::{ConfigKey, ConfigValue, GlobalConfig};
pub use merge::{merge, MergeContent, MergePolicy, MergeValue};
