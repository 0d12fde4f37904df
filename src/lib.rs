//! SmartWalk - an ignore-aware filesystem walker
//!
//! SmartWalk enumerates the files below a directory while honoring
//! gitignore-style ignore files placed at any level of the tree. It is meant
//! for backup, packaging and indexing tools that must skip the same files a
//! version-control system would, without running one.
//!
//! # Core Features
//!
//! - **Pattern translation**: `*`, `**`, `?`, `[...]`, `[!...]`, leading `/`,
//!   `*/` and `**/`, trailing `/` for directory-only rules
//! - **Hierarchical rules**: deeper ignore files override their ancestors,
//!   later lines override earlier ones, `!` re-includes
//! - **Lazy traversal**: a deterministic, single-pass iterator that prunes
//!   ignored directories when their content is not needed
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use smartwalk::{WalkOptions, Walker};
//!
//! let walk = Walker::new(WalkOptions::new("./my-project")).walk()?;
//! for path in walk {
//!     println!("{}", path?.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;

// Re-export commonly used types
pub use self::core::{
    error::{Result, WalkError},
    types::{Probe, DEFAULT_IGNORE_FILE, VCS_DIRECTORIES},
};

pub use ignore::{
    walk, IgnoreChecker, IgnoreResult, RuleMatch, RuleSet, RuleStack, Walk, WalkOptions,
    WalkStats, Walker,
};

pub use config::{merge, GlobalConfig, MergeContent, MergePolicy};

/// Current version of SmartWalk
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
