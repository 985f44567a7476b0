//! Command implementations

mod check;
mod resolve;
#[cfg(feature = "watch")]
mod watch;

use std::path::PathBuf;

use anyhow::Context;
use scanset::config::{self, LoadedConfig};

pub use check::check;
pub use resolve::resolve;
#[cfg(feature = "watch")]
pub use watch::watch;

/// Load the given configuration files, or discover them from the working
/// directory when none are given
fn load_config(configs: &[PathBuf]) -> anyhow::Result<LoadedConfig> {
    let paths = if configs.is_empty() {
        let cwd = std::env::current_dir()?;
        config::discover(&cwd)
    } else {
        configs.to_vec()
    };

    config::load_all(&paths).context("failed to load configuration")
}
