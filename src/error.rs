//! Error types for template resolution and loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or loading a template
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Name contains a NUL byte or traverses above the search root
    #[error("unsafe template name {name:?}: {reason}")]
    UnsafeName { name: String, reason: String },

    /// `@namespace` prefix without a following `/`
    #[error("malformed namespaced name {name:?}: expected \"@namespace/path\"")]
    MalformedNamespace { name: String },

    /// Referenced namespace has no registered search paths
    #[error("unknown template namespace {namespace:?}")]
    UnknownNamespace { namespace: String },

    /// A directory handed to the path set does not exist
    #[error("search path is not a directory: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Every search path was scanned without a hit
    #[error("template {name:?} not found (looked in: {})", format_searched(.searched))]
    TemplateNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    /// Resolved file disappeared or became unreadable
    #[error("error reading template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoaderError {
    /// True for the "no such template under the current configuration" family
    /// that `exists()` converts to `false` instead of propagating.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LoaderError::TemplateNotFound { .. } | LoaderError::UnknownNamespace { .. }
        )
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "<no search paths registered>".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
