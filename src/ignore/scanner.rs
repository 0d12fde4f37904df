//! Lazy directory walker honoring hierarchical ignore files

use crate::core::error::{Result, WalkError};
use crate::core::types::{normalize_base, Probe, DEFAULT_IGNORE_FILE, VCS_DIRECTORIES};
use crate::ignore::checker::{load_dir_rules, RuleStack};
use serde::Serialize;
use std::ffi::OsString;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What to walk and what to report
#[derive(Debug, Clone)]
pub struct WalkOptions {
    base_dir: PathBuf,
    ignore_file: Option<String>,
    list_ignored: bool,
    list_ignored_only: bool,
}

impl WalkOptions {
    /// Walk `base_dir` with `.gitignore` files, reporting non-ignored files
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            list_ignored: false,
            list_ignored_only: false,
        }
    }

    /// Set the ignore file name; `None` disables ignore processing
    pub fn ignore_file(mut self, name: Option<&str>) -> Self {
        self.ignore_file = name.map(str::to_string);
        self
    }

    /// Also report ignored files (disables pruning)
    pub fn list_ignored(mut self, list: bool) -> Self {
        self.list_ignored = list;
        self
    }

    /// Report ignored files only; implies [`WalkOptions::list_ignored`]
    pub fn list_ignored_only(mut self, only: bool) -> Self {
        self.list_ignored_only = only;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn ignore_file_name(&self) -> Option<&str> {
        self.ignore_file.as_deref()
    }

    /// Whether ignored files end up in the output
    pub fn reports_ignored(&self) -> bool {
        self.list_ignored || self.list_ignored_only
    }
}

/// Counters describing a walk so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalkStats {
    pub directories_visited: usize,
    pub files_seen: usize,
    pub files_ignored: usize,
    pub directories_pruned: usize,
    pub rule_files_loaded: usize,
}

/// Entry point for walking a directory tree
#[derive(Debug, Clone)]
pub struct Walker {
    options: WalkOptions,
}

impl Walker {
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// Start a walk.
    ///
    /// Fails before anything is read if the base directory is missing or is
    /// not a directory.
    pub fn walk(&self) -> Result<Walk> {
        if !self.options.base_dir.is_dir() {
            return Err(WalkError::not_a_directory(&self.options.base_dir));
        }

        let mut options = self.options.clone();
        options.base_dir = normalize_base(&options.base_dir);
        let base = options.base_dir.clone();

        Ok(Walk {
            options,
            rules: RuleStack::new(),
            pending: vec![base],
            current: None,
            stats: WalkStats::default(),
            finished: false,
        })
    }
}

/// Walk `base_dir`, see [`WalkOptions`] for the meaning of the flags
pub fn walk(
    base_dir: impl Into<PathBuf>,
    ignore_file: Option<&str>,
    list_ignored: bool,
    list_ignored_only: bool,
) -> Result<Walk> {
    Walker::new(
        WalkOptions::new(base_dir)
            .ignore_file(ignore_file)
            .list_ignored(list_ignored)
            .list_ignored_only(list_ignored_only),
    )
    .walk()
}

/// Files of the directory currently being reported
#[derive(Debug)]
struct DirVisit {
    dir: PathBuf,
    files: std::vec::IntoIter<OsString>,
}

/// A running walk: a single-pass iterator over resolved file paths.
///
/// Directories are visited top-down; within a directory files come first,
/// sorted by name, then each subdirectory in name order. After an error is
/// returned the iterator yields nothing more.
#[derive(Debug)]
pub struct Walk {
    options: WalkOptions,
    rules: RuleStack,
    /// Directories still to visit, the next one on top
    pending: Vec<PathBuf>,
    current: Option<DirVisit>,
    stats: WalkStats,
    finished: bool,
}

impl Walk {
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Read `dir`, update the rule stack and queue its subdirectories
    fn visit(&mut self, dir: PathBuf) -> Result<()> {
        let DirEntries {
            mut files,
            mut subdirs,
            linked_dirs,
        } = read_entries(&dir)?;
        self.stats.directories_visited += 1;

        subdirs.retain(|name| !is_vcs_name(name));

        self.rules.enter(&dir);
        if let Some(ignore_file) = &self.options.ignore_file {
            if files.iter().any(|name| name == ignore_file.as_str())
                && load_dir_rules(&mut self.rules, &dir, ignore_file)?
            {
                self.stats.rule_files_loaded += 1;
            }
            files.retain(|name| name != ignore_file.as_str());
        }

        if !self.options.reports_ignored() {
            let rules = &self.rules;
            let stats = &mut self.stats;
            subdirs.retain(|name| {
                let path = dir.join(name);
                let verdict = rules.resolve(&Probe::dir(&path));
                if verdict.is_ignored() {
                    debug!("Pruning {}", path.display());
                    stats.directories_pruned += 1;
                    return false;
                }
                true
            });
        }

        // linked directories are probed as directories, never reported or followed
        for name in &linked_dirs {
            let path = dir.join(name);
            if !self.options.reports_ignored() && self.rules.is_ignored(&Probe::dir(&path)) {
                self.stats.directories_pruned += 1;
            }
            debug!("Not following linked directory {}", path.display());
        }

        self.pending
            .extend(subdirs.into_iter().rev().map(|name| dir.join(name)));
        self.current = Some(DirVisit {
            dir,
            files: files.into_iter(),
        });
        Ok(())
    }
}

impl Iterator for Walk {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(visit) = self.current.as_mut() {
                for name in visit.files.by_ref() {
                    let path = visit.dir.join(name);
                    self.stats.files_seen += 1;

                    if self.rules.is_ignored(&Probe::file(&path)) {
                        self.stats.files_ignored += 1;
                        if self.options.reports_ignored() {
                            return Some(Ok(path));
                        }
                    } else if !self.options.list_ignored_only {
                        return Some(Ok(path));
                    }
                }
                self.current = None;
            }

            let Some(dir) = self.pending.pop() else {
                self.finished = true;
                return None;
            };

            if let Err(e) = self.visit(dir) {
                self.finished = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

impl FusedIterator for Walk {}

/// Entries of one directory, each list sorted by name
#[derive(Debug, Default)]
struct DirEntries {
    files: Vec<OsString>,
    subdirs: Vec<OsString>,
    /// Symlinks resolving to a directory
    linked_dirs: Vec<OsString>,
}

/// List one directory.
///
/// Symlinks are not followed; one pointing at a directory is classified as
/// a linked directory, any other non-directory entry counts as a file.
fn read_entries(dir: &Path) -> Result<DirEntries> {
    let mut entries = DirEntries::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            WalkError::Io {
                path,
                source: e.into(),
            }
        })?;

        let name = entry.file_name().to_os_string();
        if entry.file_type().is_dir() {
            entries.subdirs.push(name);
        } else if entry.path_is_symlink() && entry.path().is_dir() {
            entries.linked_dirs.push(name);
        } else {
            entries.files.push(name);
        }
    }

    Ok(entries)
}

fn is_vcs_name(name: &OsString) -> bool {
    name.to_str()
        .map_or(false, |n| VCS_DIRECTORIES.contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    fn relative(root: &Path, walk: Walk) -> Vec<String> {
        walk.map(|p| {
            p.unwrap()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
    }

    #[test]
    fn test_files_before_subdirectories() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "b.txt");
        touch(root, "a/z.txt");
        touch(root, "a/y/x.txt");
        touch(root, "c.txt");

        let walk = Walker::new(WalkOptions::new(root)).walk()?;
        assert_eq!(
            relative(root, walk),
            vec!["b.txt", "c.txt", "a/z.txt", "a/y/x.txt"]
        );
        Ok(())
    }

    #[test]
    fn test_marker_file_is_not_reported() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "keep.txt");
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        touch(root, "drop.log");

        let all = walk(root, Some(".gitignore"), true, false)?;
        assert_eq!(relative(root, all), vec!["drop.log", "keep.txt"]);
        Ok(())
    }

    #[test]
    fn test_vcs_directories_skipped() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, ".git/config");
        touch(root, ".svn/entries");
        touch(root, ".bzr/branch");
        touch(root, "src/main.rs");

        let walk = walk(root, None, true, false)?;
        assert_eq!(relative(root, walk), vec!["src/main.rs"]);
        Ok(())
    }

    #[test]
    fn test_pruning_counts() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();
        touch(root, "target/debug/app");
        touch(root, "src/lib.rs");

        let mut walk = walk(root, Some(".gitignore"), false, false)?;
        let first = walk.next().unwrap()?;
        assert!(first.ends_with("src/lib.rs"));
        assert!(walk.next().is_none());

        let stats = walk.stats();
        assert_eq!(stats.directories_pruned, 1);
        assert_eq!(stats.rule_files_loaded, 1);
        assert_eq!(stats.directories_visited, 2);

        // reporting ignored files visits everything
        let walk = walk_all(root)?;
        assert_eq!(relative(root, walk), vec!["src/lib.rs", "target/debug/app"]);
        Ok(())
    }

    fn walk_all(root: &Path) -> Result<Walk> {
        walk(root, Some(".gitignore"), true, false)
    }

    #[test]
    fn test_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = walk(&missing, Some(".gitignore"), false, false).unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory { .. }));

        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(walk(&file, Some(".gitignore"), false, false).is_err());
    }

    #[test]
    fn test_options_flags() {
        let options = WalkOptions::new("root").list_ignored_only(true);
        assert!(options.reports_ignored());
        assert_eq!(options.ignore_file_name(), Some(".gitignore"));

        let options = WalkOptions::new("root").ignore_file(None);
        assert!(!options.reports_ignored());
        assert_eq!(options.ignore_file_name(), None);
    }
}
