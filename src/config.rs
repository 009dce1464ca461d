//! Loader configuration
//!
//! A small TOML-backed description of where templates live and which
//! extension pattern shorthand expands to. `templates` and `partials` must
//! exist; a `source_dir`, when given, contributes `_macros` and `_layouts`
//! subdirectories only if they are present on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::LoaderError;
use crate::loader::FilesystemLoader;
use crate::template::{PathSet, MAIN_NAMESPACE};

/// Default extension appended to pattern shorthand references
pub const DEFAULT_EXTENSION: &str = "twig";

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Directories and options the loader is built from
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Directory holding the engine's own view templates
    pub templates: PathBuf,
    /// Directory holding pattern partials
    pub partials: PathBuf,
    /// Optional source root probed for `_macros` and `_layouts` subdirectories
    pub source_dir: Option<PathBuf>,
    /// Extension appended to pattern shorthand (no leading dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl LoaderConfig {
    /// Create a configuration from the two required directories
    pub fn new(templates: impl Into<PathBuf>, partials: impl Into<PathBuf>) -> Self {
        Self {
            templates: templates.into(),
            partials: partials.into(),
            source_dir: None,
            extension: default_extension(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the source root probed for `_macros` and `_layouts`
    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(source_dir.into());
        self
    }

    /// Set the extension appended to pattern shorthand
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Build the ordered search path set for the main namespace
    ///
    /// Order matters: templates first, then partials, then the optional
    /// `_macros` and `_layouts` directories. The optional directories are
    /// skipped silently when absent; the required two fail with
    /// [`LoaderError::DirectoryNotFound`].
    pub fn build_paths(&self) -> Result<PathSet, LoaderError> {
        let mut paths = PathSet::new();
        paths.add_path(&self.templates, MAIN_NAMESPACE)?;
        paths.add_path(&self.partials, MAIN_NAMESPACE)?;

        if let Some(source_dir) = &self.source_dir {
            for optional in ["_macros", "_layouts"] {
                let dir = source_dir.join(optional);
                if dir.is_dir() {
                    paths.add_path(&dir, MAIN_NAMESPACE)?;
                } else {
                    debug!(dir = %dir.display(), "optional template directory absent, skipping");
                }
            }
        }
        Ok(paths)
    }

    /// Build a ready-to-use filesystem loader from this configuration
    pub fn build(&self) -> Result<FilesystemLoader, LoaderError> {
        let paths = self.build_paths()?;
        Ok(FilesystemLoader::new(paths, self.extension.clone()))
    }
}
