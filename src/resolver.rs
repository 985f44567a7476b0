//! Resolver - expands content declarations into the files to scan
//!
//! The resolver takes declarations in input order, expands each of their
//! patterns against the declaration's base directory, and collects the
//! matches into a [`ResolvedFileSet`]. Every file is recorded by its
//! canonical path, so a file reached by several patterns, or through a
//! symlink, keeps the position of its first match.
//!
//! # Examples
//!
//! ```no_run
//! use scanset::models::ContentDeclaration;
//! use scanset::resolver::{BaseDirs, GlobSetResolver};
//!
//! let resolver = GlobSetResolver::current_dir().unwrap();
//! let declarations = vec![ContentDeclaration::relative(["./src/**/*.rs"])];
//! let mut base_dirs = BaseDirs::new();
//! base_dirs.insert(0, "app");
//! let files = resolver.resolve(&declarations, &base_dirs).unwrap();
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{ConfigError, PatternError, ResolveError};
use crate::models::{ContentDeclaration, ResolvedFileSet};
use crate::pattern::ContentPattern;

/// Walk behaviour shared by every declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Follow symbolic links while walking
    pub follow_links: bool,

    /// Descend into and match dot-prefixed entries below a walk root
    pub include_hidden: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
        }
    }
}

/// Base directory per declaration, keyed by the declaration's input position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseDirs {
    dirs: HashMap<usize, PathBuf>,
}

impl BaseDirs {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory of declaration `index`
    pub fn insert(&mut self, index: usize, dir: impl Into<PathBuf>) {
        self.dirs.insert(index, dir.into());
    }

    /// Base directory of declaration `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.dirs.get(&index).map(PathBuf::as_path)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<(usize, P)> for BaseDirs {
    fn from_iter<I: IntoIterator<Item = (usize, P)>>(iter: I) -> Self {
        Self {
            dirs: iter.into_iter().map(|(i, p)| (i, p.into())).collect(),
        }
    }
}

/// A declaration whose base directory has been checked and whose patterns
/// have been compiled
#[derive(Debug)]
struct CompiledDeclaration {
    base: PathBuf,
    includes: Vec<ContentPattern>,
    excludes: Vec<ContentPattern>,
}

/// Resolver for turning declarations into a file list
///
/// Holds no state between calls; every [`resolve`](Self::resolve) walks the
/// filesystem afresh.
#[derive(Debug, Clone)]
pub struct GlobSetResolver {
    /// Directory non-relative declarations resolve against
    cwd: PathBuf,

    /// Walk behaviour
    options: ResolveOptions,
}

impl GlobSetResolver {
    /// Create a resolver whose non-relative declarations resolve against `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            options: ResolveOptions::default(),
        }
    }

    /// Create a resolver at the current working directory
    pub fn current_dir() -> Result<Self, ResolveError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    /// Replace the walk options
    #[must_use]
    pub const fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Directory non-relative declarations resolve against
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Walk options in effect
    #[must_use]
    pub const fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Validate declarations without touching anything but their base
    /// directories
    ///
    /// Fails on the first invalid declaration, in input order.
    pub fn validate(
        &self,
        declarations: &[ContentDeclaration],
        base_dirs: &BaseDirs,
    ) -> Result<(), ResolveError> {
        self.compile(declarations, base_dirs).map(|_| ())
    }

    /// Resolve declarations into an ordered, duplicate-free file list
    ///
    /// Every declaration is validated before any directory is walked, so a
    /// misconfiguration never yields a partial result.
    pub fn resolve(
        &self,
        declarations: &[ContentDeclaration],
        base_dirs: &BaseDirs,
    ) -> Result<ResolvedFileSet, ResolveError> {
        let compiled = self.compile(declarations, base_dirs)?;
        let mut files = ResolvedFileSet::new();

        for (index, declaration) in compiled.iter().enumerate() {
            let mut added = 0;
            for pattern in &declaration.includes {
                let matches = self.expand(pattern)?;
                debug!(
                    "declaration {index}: '{}' matched {} file(s) under {}",
                    pattern.raw(),
                    matches.len(),
                    pattern.root().display()
                );
                added += files.extend(
                    matches
                        .into_iter()
                        .filter(|path| !declaration.excludes.iter().any(|ex| ex.matches(path))),
                );
            }
            debug!(
                "declaration {index} ({}): {added} new file(s)",
                declaration.base.display()
            );
        }

        info!(
            "resolved {} file(s) from {} declaration(s)",
            files.len(),
            declarations.len()
        );
        Ok(files)
    }

    /// Directories whose contents can change a resolution result
    ///
    /// One entry per include pattern root, or its nearest existing ancestor
    /// when the root is not there yet. Roots nested inside another root are
    /// dropped, since watches are recursive.
    pub fn watch_roots(
        &self,
        declarations: &[ContentDeclaration],
        base_dirs: &BaseDirs,
    ) -> Result<Vec<PathBuf>, ResolveError> {
        let mut roots: Vec<PathBuf> = Vec::new();
        for declaration in self.compile(declarations, base_dirs)? {
            for pattern in &declaration.includes {
                let start = if pattern.is_literal() {
                    pattern.root().parent().unwrap_or(&declaration.base)
                } else {
                    pattern.root()
                };
                let dir = start.ancestors().find(|dir| dir.is_dir()).unwrap_or(&declaration.base);

                if roots.iter().any(|root| dir.starts_with(root)) {
                    continue;
                }
                roots.retain(|root| !root.starts_with(dir));
                roots.push(dir.to_path_buf());
            }
        }
        Ok(roots)
    }

    /// Check base directories and compile patterns for every declaration
    fn compile(
        &self,
        declarations: &[ContentDeclaration],
        base_dirs: &BaseDirs,
    ) -> Result<Vec<CompiledDeclaration>, ResolveError> {
        let mut compiled = Vec::with_capacity(declarations.len());

        for (index, declaration) in declarations.iter().enumerate() {
            declaration.validate(index)?;

            let base = if declaration.relative {
                let dir = base_dirs.get(index).ok_or(ConfigError::MissingBaseDir { index })?;
                Self::check_dir(dir)?
            } else {
                Self::check_dir(&self.cwd)?
            };

            let includes = Self::compile_patterns(declaration.includes(), &base)?;
            let excludes = Self::compile_patterns(declaration.excludes(), &base)?;

            compiled.push(CompiledDeclaration {
                base,
                includes,
                excludes,
            });
        }

        Ok(compiled)
    }

    /// Compile raw patterns with canonical roots, one per brace alternative
    fn compile_patterns<'a>(
        patterns: impl Iterator<Item = &'a str>,
        base: &Path,
    ) -> Result<Vec<ContentPattern>, PatternError> {
        let mut compiled = Vec::new();
        for raw in patterns {
            for mut pattern in ContentPattern::compile_all(raw, base)? {
                pattern.canonicalize_root();
                compiled.push(pattern);
            }
        }
        Ok(compiled)
    }

    /// Find all files matching one pattern, in sorted traversal order
    ///
    /// Paths come back canonical, so a file reached through a symlinked
    /// directory is the same path as its target.
    fn expand(&self, pattern: &ContentPattern) -> Result<Vec<PathBuf>, ResolveError> {
        let root = pattern.root();

        if !root.exists() {
            warn!("pattern '{}' has no match root: {}", pattern.raw(), root.display());
            return Ok(Vec::new());
        }

        if pattern.is_literal() {
            return Ok(if root.is_file() {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let mut walker =
            WalkDir::new(root).follow_links(self.options.follow_links).sort_by_file_name();
        if let Some(depth) = pattern.max_depth() {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.options.include_hidden;
        let mut matches = Vec::new();
        for entry in walker.into_iter().filter_entry(|e| {
            // Don't filter the root directory itself
            e.depth() == 0 || include_hidden || !Self::is_hidden(e)
        }) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if pattern.matches_relative(relative) {
                matches.push(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
            }
        }

        Ok(matches)
    }

    /// Require an existing directory and return its canonical path
    fn check_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
        if !dir.exists() {
            return Err(ConfigError::BaseDirNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(ConfigError::NotADirectory(dir.to_path_buf()));
        }
        fs::canonicalize(dir).map_err(|_| ConfigError::BaseDirNotFound(dir.to_path_buf()))
    }

    /// Check if an entry is hidden (starts with .)
    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
    }
}
