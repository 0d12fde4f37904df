//! Hierarchical configuration merging
//!
//! When configuration files are found at several levels of a tree, the
//! content of a deeper file is combined with what was accumulated from its
//! ancestors according to a [`MergePolicy`].

use crate::core::error::{Result, WalkError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a newer configuration combines with the accumulated one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Last file in the hierarchy is the new configuration
    Override,
    /// Append each file's content
    Concatenate,
    /// Dictionary based, values already present are kept
    DictBased,
    /// Dictionary based, the last value found wins
    DictBasedOverride,
    /// Dictionary based, present values become `old + new`
    DictBasedAppend,
    /// Ignore-file lines: ancestors first, so deeper lines win
    GitIgnoreLike,
}

impl MergePolicy {
    pub const ALL: [MergePolicy; 6] = [
        MergePolicy::Override,
        MergePolicy::Concatenate,
        MergePolicy::DictBased,
        MergePolicy::DictBasedOverride,
        MergePolicy::DictBasedAppend,
        MergePolicy::GitIgnoreLike,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MergePolicy::Override => "Override",
            MergePolicy::Concatenate => "Concatenate",
            MergePolicy::DictBased => "DictBased",
            MergePolicy::DictBasedOverride => "DictBasedOverride",
            MergePolicy::DictBasedAppend => "DictBasedAppend",
            MergePolicy::GitIgnoreLike => "GitIgnoreLike",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergePolicy {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| WalkError::UnknownPolicy { name: s.to_string() })
    }
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MergeValue {
    Number(i64),
    Text(String),
    List(Vec<MergeValue>),
}

/// Configuration content: raw text or an ordered key/value map
#[derive(Debug, Clone, PartialEq)]
pub enum MergeContent {
    Text(String),
    Map(IndexMap<String, MergeValue>),
}

/// Combine `base` (accumulated so far) with `new` (found deeper)
pub fn merge(base: &MergeContent, new: &MergeContent, policy: MergePolicy) -> Result<MergeContent> {
    let mismatch = || WalkError::MergeTypeMismatch {
        policy: policy.to_string(),
    };

    match policy {
        MergePolicy::Override => Ok(new.clone()),
        MergePolicy::Concatenate => match (base, new) {
            (MergeContent::Text(a), MergeContent::Text(b)) => {
                Ok(MergeContent::Text(format!("{}\n{}", a, b)))
            },
            _ => Err(mismatch()),
        },
        MergePolicy::GitIgnoreLike => match (base, new) {
            (MergeContent::Text(a), MergeContent::Text(b)) => {
                let lines: Vec<&str> = a.lines().chain(b.lines()).collect();
                Ok(MergeContent::Text(lines.join("\n")))
            },
            _ => Err(mismatch()),
        },
        MergePolicy::DictBased | MergePolicy::DictBasedOverride | MergePolicy::DictBasedAppend => {
            let (MergeContent::Map(a), MergeContent::Map(b)) = (base, new) else {
                return Err(mismatch());
            };
            let mut result = a.clone();
            for (key, value) in b {
                if let Some(existing) = result.get_mut(key) {
                    match policy {
                        MergePolicy::DictBasedOverride => *existing = value.clone(),
                        MergePolicy::DictBasedAppend => {
                            *existing = append(key, existing, value)?.ok_or_else(mismatch)?;
                        },
                        _ => {},
                    }
                } else {
                    result.insert(key.clone(), value.clone());
                }
            }
            Ok(MergeContent::Map(result))
        },
    }
}

/// `old + new`, or `None` when the kinds differ
fn append(key: &str, old: &MergeValue, new: &MergeValue) -> Result<Option<MergeValue>> {
    let value = match (old, new) {
        (MergeValue::Number(a), MergeValue::Number(b)) => {
            let sum = a.checked_add(*b).ok_or_else(|| WalkError::MergeOverflow {
                key: key.to_string(),
            })?;
            Some(MergeValue::Number(sum))
        },
        (MergeValue::Text(a), MergeValue::Text(b)) => Some(MergeValue::Text(format!("{}{}", a, b))),
        (MergeValue::List(a), MergeValue::List(b)) => {
            Some(MergeValue::List(a.iter().chain(b).cloned().collect()))
        },
        _ => None,
    };
    Ok(value)
}
