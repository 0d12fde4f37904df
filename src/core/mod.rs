//! Core types for SmartWalk
//!
//! Error handling and the small value types shared by the ignore engine,
//! the configuration layer and the CLI.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{WalkError, Result};
pub use types::{Probe, DEFAULT_IGNORE_FILE, VCS_DIRECTORIES};
