//! Ignore file support
//!
//! This module turns gitignore-style files found anywhere in a tree into
//! path matchers, keeps the set of files in scope while a walk descends and
//! backtracks, and decides for each path whether it is ignored. Rules in a
//! deeper directory override those of its ancestors, and later lines
//! override earlier ones, so `!pattern` can re-include what a broader rule
//! excluded.

pub mod checker;
pub mod parser;
pub mod scanner;

// Re-export commonly used items
pub use checker::{IgnoreChecker, IgnoreResult, RuleMatch, RuleStack};
pub use parser::{translate_pattern, PathMatcher, RegexMatcher, Rule, RuleSet};
pub use scanner::{walk, Walk, WalkOptions, WalkStats, Walker};
