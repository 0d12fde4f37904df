//! Ignore file parser: pattern translation and rule loading

use crate::core::error::{Result, WalkError};
use crate::core::types::{path_string, Probe};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that can decide whether a rendered path matches a rule.
///
/// The rest of the engine only ever sees this trait, never the regex.
pub trait PathMatcher: fmt::Debug + Send + Sync {
    /// Test a candidate path string (left-anchored)
    fn matches(&self, candidate: &str) -> bool;

    /// Source of the compiled expression, for diagnostics
    fn as_str(&self) -> &str;
}

/// A [`PathMatcher`] backed by a compiled regular expression
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }
}

impl PathMatcher for RegexMatcher {
    fn matches(&self, candidate: &str) -> bool {
        // every translated expression starts with `^`
        self.regex.is_match(candidate)
    }

    fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Translate one ignore pattern declared in `declaring_dir` into a matcher.
///
/// The pattern must already be stripped of comments, surrounding whitespace
/// and the `!` negation marker. Bracket expressions accept a leading `]` and
/// POSIX classes like `[:alpha:]`; only an unclosed one makes this fail.
pub fn translate_pattern(pattern: &str, declaring_dir: &Path) -> Result<RegexMatcher> {
    let source = pattern_to_regex(pattern, &path_string(declaring_dir));
    debug!("Converted '{}' into '{}'", pattern, source);

    RegexMatcher::new(&source).map_err(|source| WalkError::PatternCompile {
        pattern: pattern.to_string(),
        source,
    })
}

/// Build the regular expression source for a pattern anchored at `root`
pub fn pattern_to_regex(pattern: &str, root: &str) -> String {
    let root = regex::escape(root);

    let (mut result, body) = if let Some(rest) = pattern.strip_prefix("**/") {
        (format!("^{}(?:/.*)?/", root), rest)
    } else if let Some(rest) = pattern.strip_prefix("*/") {
        (format!("^{}/[^/]*/", root), rest)
    } else if let Some(rest) = pattern.strip_prefix('/') {
        (format!("^{}/", root), rest)
    } else {
        ("^.*/".to_string(), pattern)
    };

    translate_body(body, &mut result);

    // A trailing separator stays open so `dir/` also covers what is below it
    if !result.ends_with('/') {
        result.push('$');
    }
    result
}

fn translate_body(body: &str, out: &mut String) {
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            },
            '*' => out.push_str("[^/]*"),
            '?' => out.push('.'),
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    out.push('^');
                }
                // a `]` right after the opening bracket is a member
                if chars.peek() == Some(&']') {
                    chars.next();
                    out.push_str("\\]");
                }
                // copied up to the closing bracket; an unclosed class is left
                // for the regex compiler to reject
                while let Some(inner) = chars.next() {
                    match inner {
                        '[' if chars.peek() == Some(&':') => {
                            out.push('[');
                            for posix in chars.by_ref() {
                                out.push(posix);
                                if posix == ']' {
                                    break;
                                }
                            }
                        },
                        '[' => out.push_str("\\["),
                        ']' => {
                            out.push(']');
                            break;
                        },
                        other => out.push(other),
                    }
                }
            },
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            },
        }
    }
}

/// One parsed line of an ignore file
#[derive(Debug)]
pub struct Rule {
    /// 1-based line number in the ignore file
    pub line_number: usize,
    /// The line as written, without trailing whitespace
    pub original: String,
    /// Compiled matcher for the pattern
    pub matcher: Box<dyn PathMatcher>,
    /// Whether the line started with `!`
    pub negated: bool,
}

impl Rule {
    pub fn matches(&self, probe: &Probe) -> bool {
        self.matcher.matches(probe.as_str())
    }
}

/// All rules declared by one ignore file, in file order
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
    /// The directory containing the ignore file
    base_dir: PathBuf,
    /// The ignore file itself
    source: PathBuf,
}

impl RuleSet {
    /// Load the ignore file `ignore_file` declared in `declaring_dir`.
    ///
    /// The file is read in full and closed before any pattern is compiled.
    pub fn from_file(declaring_dir: &Path, ignore_file: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(ignore_file).map_err(|e| WalkError::io(ignore_file, e))?;

        Self::from_content(&content, declaring_dir, ignore_file)
    }

    /// Parse ignore file content as if it lived at `source` in `declaring_dir`
    pub fn from_content(content: &str, declaring_dir: &Path, source: &Path) -> Result<Self> {
        let mut rules = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let Some((negated, pattern)) = parse_line(line) else {
                continue;
            };

            let matcher =
                translate_pattern(pattern, declaring_dir).map_err(|e| WalkError::InvalidRule {
                    file: source.to_path_buf(),
                    line: index + 1,
                    source: Box::new(e),
                })?;

            rules.push(Rule {
                line_number: index + 1,
                original: line.trim_end().to_string(),
                matcher: Box::new(matcher),
                negated,
            });
        }

        Ok(Self {
            rules,
            base_dir: declaring_dir.to_path_buf(),
            source: source.to_path_buf(),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the ignore file these rules came from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Split a raw line into (negated, pattern), or `None` for blank/comment lines
fn parse_line(line: &str) -> Option<(bool, &str)> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
    .trim();

    if line.is_empty() {
        return None;
    }

    let (negated, pattern) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    if pattern.is_empty() {
        return None;
    }

    Some((negated, pattern))
}
