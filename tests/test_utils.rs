//! Test utilities for SmartWalk tests

#![allow(dead_code)]

use smartwalk::{Walk, WalkOptions, Walker};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway directory tree with automatic cleanup
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    /// Create a new empty tree
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and its parent directories) with some content
    pub fn file(&self, rel: &str) -> anyhow::Result<PathBuf> {
        self.write(rel, "content")
    }

    /// Create a file with the given content
    pub fn write(&self, rel: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a directory
    pub fn dir(&self, rel: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(rel);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Options for walking this tree with `.gitignore` files
    pub fn options(&self) -> WalkOptions {
        WalkOptions::new(self.path())
    }

    /// Walk and return paths relative to the root, in yield order
    pub fn walk(&self, options: WalkOptions) -> anyhow::Result<Vec<String>> {
        let walk = Walker::new(options).walk()?;
        self.relative(walk)
    }

    /// Collect a walk into root-relative strings
    pub fn relative(&self, mut walk: Walk) -> anyhow::Result<Vec<String>> {
        self.relative_from(&mut walk)
    }

    /// Like [`TestTree::relative`], leaving the walk around for its stats
    pub fn relative_from(&self, walk: &mut Walk) -> anyhow::Result<Vec<String>> {
        let mut paths = Vec::new();
        for path in walk {
            let path = path?;
            paths.push(
                path.strip_prefix(self.path())?
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        Ok(paths)
    }
}
