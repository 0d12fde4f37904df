//! Core data types for SmartWalk

use std::fmt;
use std::path::{Path, PathBuf};

/// Marker file name used when the caller does not pick one
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Version-control metadata directories, never descended into
pub const VCS_DIRECTORIES: [&str; 3] = [".git", ".svn", ".bzr"];

/// A candidate path rendered the way ignore rules see it.
///
/// Directories are probed with a trailing `/` so that directory-only rules
/// (`build/`) match them, files are probed as-is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Probe(String);

impl Probe {
    /// Probe a file (or any non-directory entry)
    pub fn file(path: &Path) -> Self {
        Probe(path_string(path))
    }

    /// Probe a directory
    pub fn dir(path: &Path) -> Self {
        let mut s = path_string(path);
        s.push('/');
        Probe(s)
    }

    /// Build a probe from an already rendered string
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Probe(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dir(&self) -> bool {
        self.0.ends_with('/')
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe({})", self.0)
    }
}

/// Render a path with `/` separators and no trailing separator.
///
/// The filesystem root renders as the empty string so that `root + "/"`
/// stays a valid prefix.
pub fn path_string(path: &Path) -> String {
    let s = path.to_string_lossy();
    s.trim_end_matches('/').to_string()
}

/// Normalize a user supplied base directory (drops trailing separators and
/// interior `.` components).
pub fn normalize_base(path: &Path) -> PathBuf {
    let normalized: PathBuf = path.components().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_rendering() {
        assert_eq!(Probe::file(Path::new("root/item")).as_str(), "root/item");
        assert_eq!(Probe::dir(Path::new("root/item")).as_str(), "root/item/");
        assert!(Probe::dir(Path::new("root/item")).is_dir());
        assert!(!Probe::file(Path::new("root/item")).is_dir());
    }

    #[test]
    fn test_path_string_trims_separators() {
        assert_eq!(path_string(Path::new("root/")), "root");
        assert_eq!(path_string(Path::new("/")), "");
        assert_eq!(path_string(Path::new("a/b")), "a/b");
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(Path::new("root/")), PathBuf::from("root"));
        assert_eq!(normalize_base(Path::new("./root")), PathBuf::from("./root"));
        assert_eq!(normalize_base(Path::new("")), PathBuf::from("."));
    }
}
