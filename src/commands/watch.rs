//! Watch command - resolve again on every change

use std::path::PathBuf;
use std::time::Duration;

use log::error;
use scanset::output::{OperationResult, OutputMode, ResolveReport};
use scanset::resolver::GlobSetResolver;
use scanset::watch::{ContentWatcher, watch_loop};

use super::load_config;

/// Print a fresh result each time the watched directories change
pub fn watch(configs: &[PathBuf], debounce_ms: u64, mode: OutputMode) -> anyhow::Result<()> {
    let loaded = load_config(configs)?;
    let resolver = GlobSetResolver::current_dir()?.with_options(loaded.options);

    let mut watcher = ContentWatcher::new(Duration::from_millis(debounce_ms))?;
    for root in resolver.watch_roots(&loaded.declarations, &loaded.base_dirs)? {
        watcher.watch_directory(&root)?;
    }

    OperationResult {
        success: true,
        message: format!("Watching {} director(ies)", watcher.watched().len()),
    }
    .render(mode);

    watch_loop(&resolver, &loaded.declarations, &loaded.base_dirs, &watcher, |result| {
        match result {
            Ok(files) => {
                ResolveReport::new(&files, loaded.declarations.len(), &loaded.sources).render(mode);
            },
            Err(e) => error!("{e}"),
        }
        true
    });

    Ok(())
}
