//! Re-resolve on filesystem change
//!
//! [`ContentWatcher`] watches the base directories of a declaration set and
//! hands out debounced batches of changed paths. [`watch_loop`] resolves once
//! up front and again after every batch. Events that arrive while a
//! resolution runs are folded into the next batch, so each reported result
//! reflects the newest filesystem state and stale intermediate states are
//! skipped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::Duration;

use log::{debug, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::ResolveError;
use crate::models::{ContentDeclaration, ResolvedFileSet};
use crate::resolver::{BaseDirs, GlobSetResolver};

/// Filesystem watcher producing debounced change batches
pub struct ContentWatcher {
    watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    debounce: Duration,
    watched: Vec<PathBuf>,
}

impl ContentWatcher {
    /// Create a watcher; changes closer together than `debounce` form one batch
    pub fn new(debounce: Duration) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            receiver: rx,
            debounce,
            watched: Vec::new(),
        })
    }

    /// Recursively watch a directory
    pub fn watch_directory(&mut self, path: &Path) -> notify::Result<()> {
        self.watcher.watch(path, RecursiveMode::Recursive)?;
        self.watched.push(path.to_path_buf());
        Ok(())
    }

    /// Directories currently watched
    #[must_use]
    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }

    /// Block until something changes, then collect everything that changes
    /// within the debounce window
    ///
    /// Returns `None` once the watcher is gone.
    pub fn next_batch(&self) -> Option<Vec<PathBuf>> {
        let mut changed = Vec::new();

        while changed.is_empty() {
            let event = self.receiver.recv().ok()?;
            Self::collect(event, &mut changed);
        }

        loop {
            match self.receiver.recv_timeout(self.debounce) {
                Ok(event) => Self::collect(event, &mut changed),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }

        changed.sort();
        changed.dedup();
        Some(changed)
    }

    fn collect(event: notify::Result<Event>, changed: &mut Vec<PathBuf>) {
        match event {
            Ok(event) => {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                changed.extend(event.paths);
            },
            Err(e) => warn!("watch error: {e}"),
        }
    }
}

impl fmt::Debug for ContentWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentWatcher")
            .field("debounce", &self.debounce)
            .field("watched", &self.watched)
            .finish_non_exhaustive()
    }
}

/// Resolve now and after every change batch until `on_result` returns `false`
///
/// Each resolution is independent. Errors go to `on_result` like results do
/// and do not end the loop.
pub fn watch_loop<F>(
    resolver: &GlobSetResolver,
    declarations: &[ContentDeclaration],
    base_dirs: &BaseDirs,
    watcher: &ContentWatcher,
    mut on_result: F,
) where
    F: FnMut(Result<ResolvedFileSet, ResolveError>) -> bool,
{
    if !on_result(resolver.resolve(declarations, base_dirs)) {
        return;
    }

    while let Some(changed) = watcher.next_batch() {
        debug!("{} path(s) changed, resolving again", changed.len());
        if !on_result(resolver.resolve(declarations, base_dirs)) {
            return;
        }
    }
}
