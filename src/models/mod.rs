//! Data models for scanset
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`ContentDeclaration`] - "scan files matching these patterns"
//! - [`ResolvedFileSet`] - the ordered, duplicate-free result of resolution

mod declaration;
mod file_set;

pub use declaration::{ContentDeclaration, EXCLUDE_PREFIX};
pub use file_set::ResolvedFileSet;
