//! Error taxonomy for content resolution
//!
//! Two classes of static misconfiguration are distinguished:
//! - [`ConfigError`] - structural problems (missing or invalid base directory,
//!   unreadable configuration files)
//! - [`PatternError`] - empty or malformed glob patterns
//!
//! Both surface through [`ResolveError`] and are never retried.

use std::path::PathBuf;

use thiserror::Error;

/// Structural configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A relative declaration has no base directory
    #[error("declaration {index} is relative but no base directory was supplied")]
    MissingBaseDir {
        /// Position of the declaration in the input
        index: usize,
    },

    /// Base directory does not exist
    #[error("base directory does not exist: {0}")]
    BaseDirNotFound(PathBuf),

    /// Base directory is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Configuration file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// The configuration file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("cannot parse {path}: {message}")]
    Parse {
        /// The configuration file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Configuration file has no `content` section
    #[error("no content declaration in {0}")]
    MissingContent(PathBuf),

    /// No configuration files were found or given
    #[error("no configuration files found")]
    NoConfigFiles,
}

/// Empty or malformed pattern lists
#[derive(Debug, Error)]
pub enum PatternError {
    /// Declaration has an empty `files` list
    #[error("declaration {index} has no file patterns")]
    EmptyFiles {
        /// Position of the declaration in the input
        index: usize,
    },

    /// A pattern string is empty or whitespace
    #[error("declaration {index} contains a blank pattern")]
    BlankPattern {
        /// Position of the declaration in the input
        index: usize,
    },

    /// Declaration contains only `!` exclusions
    #[error("declaration {index} has only exclusion patterns")]
    OnlyExclusions {
        /// Position of the declaration in the input
        index: usize,
    },

    /// Glob syntax error
    #[error("invalid glob pattern '{pattern}': {message}")]
    Invalid {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        message: String,
    },
}

/// Errors that can occur during resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Misconfiguration of declarations or base directories
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid pattern list
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Error walking directory tree
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error during file operations
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Whether this is a [`ConfigError`]
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this is a [`PatternError`]
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}
