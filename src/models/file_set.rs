//! Resolved file set
//!
//! Ordered, duplicate-free list of absolute paths. Position is fixed by the
//! first insertion; later duplicates are ignored.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The files a style engine should scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedFileSet {
    paths: Vec<PathBuf>,
    #[serde(skip)]
    seen: HashSet<PathBuf>,
}

impl ResolvedFileSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already present
    ///
    /// Returns `true` if the path was added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    /// Append every path, keeping first-seen order
    ///
    /// Returns the number of paths that were new.
    pub fn extend<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.insert(path) {
                added += 1;
            }
        }
        added
    }

    /// Check whether a path is present
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.seen.contains(path.as_ref())
    }

    /// Number of paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Paths in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Consume into the ordered path list
    #[must_use]
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl<'a> IntoIterator for &'a ResolvedFileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResolvedFileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl FromIterator<PathBuf> for ResolvedFileSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
