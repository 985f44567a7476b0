//! Check command - validate declarations without walking

use std::path::PathBuf;

use scanset::output::{CheckReport, OutputMode};
use scanset::resolver::GlobSetResolver;

use super::load_config;

/// Validate configuration and report problems
pub fn check(configs: &[PathBuf], mode: OutputMode) -> anyhow::Result<()> {
    let loaded = load_config(configs)?;
    let resolver = GlobSetResolver::current_dir()?.with_options(loaded.options);

    let error = resolver.validate(&loaded.declarations, &loaded.base_dirs).err();
    let valid = error.is_none();

    let report = CheckReport {
        valid,
        declarations: loaded.declarations.len(),
        patterns: loaded.declarations.iter().map(|d| d.files.len()).sum(),
        sources: loaded.sources.iter().map(|p| p.display().to_string()).collect(),
        error: error.map(|e| e.to_string()),
    };
    report.render(mode);

    if !valid {
        std::process::exit(1);
    }

    Ok(())
}
