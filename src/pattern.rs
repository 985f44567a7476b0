//! Compiled content patterns
//!
//! A pattern such as `./app/src/**/*.rs` is split into a literal walk root
//! (`<base>/app/src`) and a glob remainder (`**/*.rs`) that is matched against
//! paths relative to that root. Patterns without glob metacharacters name a
//! single file. Brace groups (`*.{rs,html}`) are expanded into one pattern per
//! alternative before compiling, since `glob` has no alternation.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use scanset::pattern::ContentPattern;
//!
//! let p = ContentPattern::compile("./src/**/*.rs", Path::new("/repo")).unwrap();
//! assert_eq!(p.root(), Path::new("/repo/src"));
//! assert!(p.matches(Path::new("/repo/src/a/b.rs")));
//! assert!(!p.matches(Path::new("/repo/src/a/b.txt")));
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::PatternError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A pattern anchored at a base directory
#[derive(Debug, Clone)]
pub struct ContentPattern {
    /// Original pattern string
    raw: String,

    /// Directory (or file, for literal patterns) the walk starts from
    root: PathBuf,

    /// Remainder matched relative to `root`; `None` for literal patterns
    glob: Option<Pattern>,
}

impl ContentPattern {
    /// Compile `raw` against `base`
    ///
    /// Absolute patterns ignore `base`. A leading `./` is dropped and `..`
    /// is resolved lexically.
    pub fn compile(raw: &str, base: &Path) -> Result<Self, PatternError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Invalid {
                pattern: raw.to_string(),
                message: "empty pattern".to_string(),
            });
        }

        let normalized = to_slashes(trimmed);
        let segments: Vec<&str> = normalized.split('/').collect();
        let split = segments.iter().position(|s| has_glob_meta(s)).unwrap_or(segments.len());

        let literal = segments[..split].join("/");
        let root = if literal.is_empty() {
            // "/**" style patterns have an empty first segment
            if normalized.starts_with('/') {
                PathBuf::from("/")
            } else {
                base.to_path_buf()
            }
        } else {
            base.join(&literal)
        };

        let glob = if split < segments.len() {
            let remainder = segments[split..].join("/");
            let pattern = Pattern::new(&remainder).map_err(|e| PatternError::Invalid {
                pattern: raw.to_string(),
                message: e.to_string(),
            })?;
            Some(pattern)
        } else {
            None
        };

        Ok(Self {
            raw: raw.to_string(),
            root: normalize_lexically(&root),
            glob,
        })
    }

    /// Expand brace groups in `raw`, then compile every alternative
    ///
    /// Alternatives keep their written order.
    pub fn compile_all(raw: &str, base: &Path) -> Result<Vec<Self>, PatternError> {
        expand_braces(raw)?.iter().map(|expanded| Self::compile(expanded, base)).collect()
    }

    /// Original pattern string
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Directory the walk starts from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the pattern names a single file
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.glob.is_none()
    }

    /// Deepest directory level a match can sit at, if bounded
    ///
    /// A remainder of `*.rs` is bounded at 1, `*/b.rs` at 2, anything with `**` is unbounded.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        let glob = self.glob.as_ref()?;
        let text = glob.as_str();
        if text.contains("**") {
            return None;
        }
        Some(text.split('/').count())
    }

    /// Replace the root with its canonical form when it exists
    ///
    /// Keeps absolute-path equality stable when the root goes through a
    /// symlink. A root that cannot be canonicalized is left untouched.
    pub fn canonicalize_root(&mut self) {
        if let Ok(canonical) = fs::canonicalize(&self.root) {
            self.root = canonical;
        }
    }

    /// Check whether an absolute path is selected by this pattern
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        self.matches_relative(relative)
    }

    /// Check a path given relative to [`root`](Self::root)
    #[must_use]
    pub fn matches_relative(&self, relative: &Path) -> bool {
        match &self.glob {
            None => relative.as_os_str().is_empty(),
            Some(glob) => {
                if relative.as_os_str().is_empty() {
                    return false;
                }
                let text = to_slashes(&relative.to_string_lossy());
                glob.matches_with(&text, MATCH_OPTIONS)
            },
        }
    }
}

/// Check if a path segment contains glob metacharacters
fn has_glob_meta(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

/// Expand `{a,b}` groups, nested groups included
///
/// A pattern without braces comes back unchanged. Unbalanced braces are a
/// [`PatternError::Invalid`].
pub fn expand_braces(raw: &str) -> Result<Vec<String>, PatternError> {
    let mut out = Vec::new();
    expand_into(raw, raw, &mut out)?;
    Ok(out)
}

fn expand_into(text: &str, raw: &str, out: &mut Vec<String>) -> Result<(), PatternError> {
    let invalid = |message: &str| PatternError::Invalid {
        pattern: raw.to_string(),
        message: message.to_string(),
    };

    let Some(open) = text.find('{') else {
        if text.contains('}') {
            return Err(invalid("unmatched '}'"));
        }
        out.push(text.to_string());
        return Ok(());
    };
    if text[..open].contains('}') {
        return Err(invalid("unmatched '}'"));
    }

    let mut depth = 0usize;
    let mut close = None;
    let mut commas = Vec::new();
    for (offset, c) in text[open..].char_indices() {
        let at = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(at);
                    break;
                }
            },
            ',' if depth == 1 => commas.push(at),
            _ => {},
        }
    }
    let close = close.ok_or_else(|| invalid("unclosed '{'"))?;

    let (prefix, suffix) = (&text[..open], &text[close + 1..]);
    let mut start = open + 1;
    for end in commas.into_iter().chain(std::iter::once(close)) {
        let alternative = &text[start..end];
        expand_into(&format!("{prefix}{alternative}{suffix}"), raw, out)?;
        start = end + 1;
    }
    Ok(())
}

/// Use `/` as the only separator
///
/// Only Windows treats `\` as a separator; elsewhere it is an ordinary
/// file name character.
#[cfg(windows)]
fn to_slashes(text: &str) -> String {
    text.replace('\\', "/")
}

#[cfg(not(windows))]
fn to_slashes(text: &str) -> String {
    text.to_string()
}

/// Drop `.` components and fold `..` into their parent without touching the
/// filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            },
            other => out.push(other),
        }
    }
    out
}
