//! Content declaration model
//!
//! A declaration says: "scan these files for class names."
//! It is built once from static configuration and never mutated.

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Prefix marking an exclusion pattern
pub const EXCLUDE_PREFIX: char = '!';

/// A set of glob patterns plus the flag controlling how they are anchored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDeclaration {
    /// Resolve patterns against the declaration's originating directory
    /// instead of the process working directory
    #[serde(default)]
    pub relative: bool,

    /// Glob patterns (e.g., "./src/**/*.rs"); `!` prefix excludes
    pub files: Vec<String>,
}

impl ContentDeclaration {
    /// Create a declaration
    #[must_use]
    pub fn new<I, S>(relative: bool, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relative,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a declaration anchored at its originating directory
    #[must_use]
    pub fn relative<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(true, files)
    }

    /// Patterns that select files, in declaration order
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|p| p.trim()).filter(|p| !p.starts_with(EXCLUDE_PREFIX))
    }

    /// Patterns that remove files, with the `!` stripped
    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.files.iter().filter_map(|p| p.trim().strip_prefix(EXCLUDE_PREFIX))
    }

    /// Check the structural invariants of the pattern list
    ///
    /// `index` is the declaration's position in its input, used for reporting.
    pub fn validate(&self, index: usize) -> Result<(), PatternError> {
        if self.files.is_empty() {
            return Err(PatternError::EmptyFiles { index });
        }

        let blank = self.files.iter().any(|p| {
            let p = p.trim();
            p.is_empty()
                || p.strip_prefix(EXCLUDE_PREFIX).is_some_and(|rest| rest.trim().is_empty())
        });
        if blank {
            return Err(PatternError::BlankPattern { index });
        }

        if self.includes().next().is_none() {
            return Err(PatternError::OnlyExclusions { index });
        }

        Ok(())
    }
}
