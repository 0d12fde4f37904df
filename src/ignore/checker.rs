//! Hierarchical rule resolution: the stack of ignore files in scope

use crate::core::error::{Result, WalkError};
use crate::core::types::{normalize_base, Probe, VCS_DIRECTORIES};
use crate::ignore::parser::{Rule, RuleSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// The rule that decided an ignore check
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    /// Ignore file declaring the rule
    pub source: PathBuf,
    pub line_number: usize,
    pub original: String,
}

impl RuleMatch {
    fn new(set: &RuleSet, rule: &Rule) -> Self {
        Self {
            source: set.source().to_path_buf(),
            line_number: rule.line_number,
            original: rule.original.clone(),
        }
    }
}

impl fmt::Display for RuleMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source.display(),
            self.line_number,
            self.original
        )
    }
}

/// Result of ignore checking
#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreResult {
    /// Path should be ignored
    Ignored(RuleMatch),
    /// No rule matched
    Included,
    /// The deciding rule is a negation (`!pattern`)
    IncludedByNegation(RuleMatch),
}

impl IgnoreResult {
    pub fn is_ignored(&self) -> bool {
        matches!(self, IgnoreResult::Ignored(_))
    }

    /// The rule that decided, if any
    pub fn rule(&self) -> Option<&RuleMatch> {
        match self {
            IgnoreResult::Ignored(m) | IgnoreResult::IncludedByNegation(m) => Some(m),
            IgnoreResult::Included => None,
        }
    }
}

/// Rule sets in scope for the directory being visited.
///
/// Entries are ordered from the shallowest declaring directory to the
/// deepest, and every entry's directory is an ancestor-or-self of the
/// current directory.
#[derive(Debug, Default)]
pub struct RuleStack {
    entries: Vec<RuleSet>,
}

impl RuleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the stack to `dir`, dropping rule sets of abandoned subtrees.
    ///
    /// Returns how many rule sets were dropped.
    pub fn enter(&mut self, dir: &Path) -> usize {
        let mut dropped = 0;
        while let Some(top) = self.entries.last() {
            if dir.starts_with(top.base_dir()) {
                break;
            }
            debug!("Leaving rules of {}", top.source().display());
            self.entries.pop();
            dropped += 1;
        }
        dropped
    }

    /// Put a freshly loaded rule set on top of the stack.
    ///
    /// A set already registered for the same directory is replaced.
    pub fn push(&mut self, set: RuleSet) {
        if let Some(top) = self.entries.last() {
            if top.base_dir() == set.base_dir() {
                self.entries.pop();
            }
        }
        debug_assert!(self
            .entries
            .last()
            .map_or(true, |top| set.base_dir().starts_with(top.base_dir())));
        self.entries.push(set);
    }

    /// Decide whether `probe` is ignored.
    ///
    /// Deeper ignore files win over shallower ones, later lines over
    /// earlier ones; the first matching rule decides.
    pub fn resolve(&self, probe: &Probe) -> IgnoreResult {
        for set in self.entries.iter().rev() {
            for rule in set.rules().iter().rev() {
                if rule.matches(probe) {
                    let found = RuleMatch::new(set, rule);
                    trace!("{} \t {}", found, probe);
                    return if rule.negated {
                        IgnoreResult::IncludedByNegation(found)
                    } else {
                        IgnoreResult::Ignored(found)
                    };
                }
            }
        }
        IgnoreResult::Included
    }

    pub fn is_ignored(&self, probe: &Probe) -> bool {
        self.resolve(probe).is_ignored()
    }

    /// Directories whose rules are currently in scope, shallowest first
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|set| set.base_dir())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rules in scope
    pub fn rule_count(&self) -> usize {
        self.entries.iter().map(|set| set.len()).sum()
    }
}

/// Load the ignore file of `dir` onto `stack`, if there is one.
///
/// Returns whether a file was loaded. An entry that exists but cannot be
/// read, a dangling symlink included, is an error.
pub(crate) fn load_dir_rules(stack: &mut RuleStack, dir: &Path, ignore_file: &str) -> Result<bool> {
    let path = dir.join(ignore_file);
    match fs::symlink_metadata(&path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(WalkError::io(&path, e)),
        Ok(_) if path.is_dir() => return Ok(false),
        Ok(_) => {},
    }
    let set = RuleSet::from_file(dir, &path)?;
    debug!("Loaded {} rules from {}", set.len(), path.display());
    stack.push(set);
    Ok(true)
}

/// One-shot ignore checks for individual paths below a root directory.
///
/// Each check loads the ignore files along the path from the root, exactly
/// as a walk reaching that path would, including the effect of an ignored
/// parent directory.
#[derive(Debug)]
pub struct IgnoreChecker {
    root: PathBuf,
    ignore_file: String,
}

impl IgnoreChecker {
    pub fn new(root: &Path, ignore_file: impl Into<String>) -> Result<Self> {
        if !root.is_dir() {
            return Err(WalkError::not_a_directory(root));
        }
        Ok(Self {
            root: normalize_base(root),
            ignore_file: ignore_file.into(),
        })
    }

    /// Check a path given relative to the root (or already prefixed by it).
    ///
    /// Paths that leave the root, through `..` or by being absolute
    /// elsewhere, are rejected.
    pub fn check(&self, path: &Path) -> Result<IgnoreResult> {
        let relative = match path.strip_prefix(&self.root) {
            Ok(relative) => relative,
            Err(_) if path.has_root() => return Err(WalkError::outside_root(path, &self.root)),
            Err(_) => path,
        };

        let mut components = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => components.push(name),
                Component::CurDir => {},
                _ => return Err(WalkError::outside_root(path, &self.root)),
            }
        }

        let target = self.root.join(relative);
        let is_dir = target.is_dir();

        let mut stack = RuleStack::new();
        let mut current = self.root.clone();
        load_dir_rules(&mut stack, &current, &self.ignore_file)?;

        let Some((last, parents)) = components.split_last() else {
            return Ok(IgnoreResult::Included);
        };

        for component in parents {
            current.push(component);
            if is_vcs_dir(&current) {
                return Ok(IgnoreResult::Included);
            }
            // an ignored parent takes its whole subtree with it
            let verdict = stack.resolve(&Probe::dir(&current));
            if verdict.is_ignored() {
                return Ok(verdict);
            }
            stack.enter(&current);
            load_dir_rules(&mut stack, &current, &self.ignore_file)?;
        }

        current.push(last);
        let probe = if is_dir {
            Probe::dir(&current)
        } else {
            Probe::file(&current)
        };
        Ok(stack.resolve(&probe))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_vcs_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| VCS_DIRECTORIES.contains(&n))
}
