//! Resolve command - print the files to scan

use std::path::PathBuf;

use scanset::output::{OutputMode, ResolveReport};
use scanset::resolver::GlobSetResolver;

use super::load_config;

/// Resolve all declarations and print the result
pub fn resolve(configs: &[PathBuf], mode: OutputMode) -> anyhow::Result<()> {
    let loaded = load_config(configs)?;
    let resolver = GlobSetResolver::current_dir()?.with_options(loaded.options);

    let files = resolver.resolve(&loaded.declarations, &loaded.base_dirs)?;

    ResolveReport::new(&files, loaded.declarations.len(), &loaded.sources).render(mode);
    Ok(())
}
