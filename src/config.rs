//! Configuration loading
//!
//! A configuration file declares which sources are scanned for class names.
//! TOML is the native format (`scanset.toml`); files ending in `.json` are read
//! as JSON with the same shape:
//!
//! ```toml
//! [content]
//! relative = true
//! files = ["./src/**/*.rs"]
//!
//! [scan]
//! follow_links = true
//! include_hidden = false
//! ```
//!
//! `content` may also be a bare list of patterns (resolved against the working
//! directory) or a list of declaration tables. Keys such as `theme` and
//! `plugins` belong to the style engine and are ignored.
//!
//! Each file contributes its own declarations, anchored at the directory that
//! holds it. Files are never merged: a workspace root config and a
//! sub-application config stay two independent declarations.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::ContentDeclaration;
use crate::resolver::{BaseDirs, ResolveOptions};

/// Default configuration filename
pub const CONFIG_FILE: &str = "scanset.toml";

/// One configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Content declarations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSpec>,

    /// Walk settings
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Accepted shapes of the `content` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentSpec {
    /// `{ relative = true, files = [...] }`
    Single(ContentDeclaration),
    /// `[{ relative = true, files = [...] }, ...]`
    Many(Vec<ContentDeclaration>),
    /// `["./src/**/*.rs", ...]`
    Files(Vec<String>),
}

impl ContentSpec {
    /// Flatten into declarations, preserving order
    #[must_use]
    pub fn into_declarations(self) -> Vec<ContentDeclaration> {
        match self {
            Self::Single(declaration) => vec![declaration],
            Self::Many(declarations) => declarations,
            Self::Files(files) => vec![ContentDeclaration::new(false, files)],
        }
    }
}

/// Optional walk settings; unset keys keep the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Follow symbolic links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_links: Option<bool>,

    /// Include dot-prefixed entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_hidden: Option<bool>,
}

impl ScanSettings {
    /// Overlay the keys that are set onto `options`
    #[must_use]
    pub fn apply(self, mut options: ResolveOptions) -> ResolveOptions {
        if let Some(follow_links) = self.follow_links {
            options.follow_links = follow_links;
        }
        if let Some(include_hidden) = self.include_hidden {
            options.include_hidden = include_hidden;
        }
        options
    }
}

/// Declarations gathered from one or more files, ready for the resolver
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Declarations in load order
    pub declarations: Vec<ContentDeclaration>,

    /// Originating directory of each declaration
    pub base_dirs: BaseDirs,

    /// Walk settings, later files overriding earlier ones
    pub options: ResolveOptions,

    /// Files that were loaded, in order
    pub sources: Vec<PathBuf>,
}

/// Parse configuration text; `json` selects the JSON reader
pub fn parse_str(content: &str, json: bool) -> Result<ScanConfig, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Load one configuration file
pub fn load_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_str(&content, json).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Load several configuration files into independent declarations
///
/// Each declaration's base directory is the absolute directory containing
/// the file it came from.
pub fn load_all(paths: &[PathBuf]) -> Result<LoadedConfig, ConfigError> {
    if paths.is_empty() {
        return Err(ConfigError::NoConfigFiles);
    }

    let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
        path: PathBuf::from("."),
        source,
    })?;

    let mut loaded = LoadedConfig::default();
    for path in paths {
        let config = load_file(path)?;
        let content = config.content.ok_or_else(|| ConfigError::MissingContent(path.clone()))?;

        let origin = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let origin = cwd.join(origin);

        for declaration in content.into_declarations() {
            loaded.base_dirs.insert(loaded.declarations.len(), origin.clone());
            loaded.declarations.push(declaration);
        }
        loaded.options = config.scan.apply(loaded.options);
        loaded.sources.push(path.clone());

        debug!("loaded {} ({} declaration(s) so far)", path.display(), loaded.declarations.len());
    }

    Ok(loaded)
}

/// Find all configuration files from `from` up to the repository root
///
/// Stops at a directory containing `.git` or at the filesystem root. The
/// result is ordered root first.
#[must_use]
pub fn discover(from: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut current = from.to_path_buf();

    // Normalize: if it's a file, start from parent
    if current.is_file() {
        current = current.parent().unwrap_or(from).to_path_buf();
    }

    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            files.push(candidate);
        }

        if current.join(".git").exists() {
            break;
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    files.reverse();
    files
}
