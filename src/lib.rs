//! scanset - resolve content-source declarations for utility-CSS builds
//!
//! A style engine scans source files for class names. This library turns the
//! declarations that say which files to scan (`relative` flag plus glob
//! patterns) into an ordered, duplicate-free list of absolute paths.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pattern;
pub mod resolver;
#[cfg(feature = "watch")]
pub mod watch;

pub use error::{ConfigError, PatternError, ResolveError};
pub use models::{ContentDeclaration, ResolvedFileSet};
pub use resolver::{BaseDirs, GlobSetResolver, ResolveOptions};
