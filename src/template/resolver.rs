//! Template resolution - maps symbolic names to absolute file paths
//!
//! Orchestrates pattern expansion, normalization, safety validation,
//! namespace routing, and the ordered search-path scan, memoizing successful
//! resolutions until the path set changes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, trace};

use crate::error::LoaderError;
use crate::pattern::{FileExpander, PatternExpander};

use super::name::{normalize, split_namespace, validate};
use super::paths::PathSet;

/// Resolves requested template names to absolute file paths
///
/// Owns the [`PathSet`] so that every mutation of the search paths clears the
/// resolution cache: a memoized path is only trusted while the priority order
/// it was found under still holds. Invalidation is wholesale rather than
/// per-entry, an accepted simplicity tradeoff.
///
/// Lookups take `&self` (the cache sits behind a read-write lock, hits being
/// far more common than mutations); path mutations take `&mut self`.
pub struct TemplateResolver {
    paths: PathSet,
    expander: Box<dyn PatternExpander + Send + Sync>,
    cache: RwLock<HashMap<String, PathBuf>>,
}

impl std::fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl TemplateResolver {
    /// Create a resolver over a path set, expanding shorthand with the given
    /// fixed extension
    pub fn new(paths: PathSet, extension: impl Into<String>) -> Self {
        Self::with_expander(paths, Box::new(FileExpander::new(extension)))
    }

    /// Create a resolver with a custom pattern-name expander
    pub fn with_expander(
        paths: PathSet,
        expander: Box<dyn PatternExpander + Send + Sync>,
    ) -> Self {
        Self {
            paths,
            expander,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying search path set
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Replace the ordered search list for a namespace
    pub fn set_paths<I, P>(&mut self, paths: I, namespace: &str) -> Result<(), LoaderError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<std::path::Path>,
    {
        self.paths.set_paths(paths, namespace)?;
        self.invalidate();
        Ok(())
    }

    /// Append a search directory (lowest priority) and invalidate the cache
    pub fn add_path(
        &mut self,
        path: impl AsRef<std::path::Path>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        self.paths.add_path(path, namespace)?;
        self.invalidate();
        Ok(())
    }

    /// Prepend a search directory (highest priority) and invalidate the cache
    pub fn prepend_path(
        &mut self,
        path: impl AsRef<std::path::Path>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        self.paths.prepend_path(path, namespace)?;
        self.invalidate();
        Ok(())
    }

    /// Number of memoized resolutions currently held
    pub fn cached(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Resolve a requested name to the absolute path of the first matching
    /// file in registration order
    pub fn find(&self, name: &str) -> Result<PathBuf, LoaderError> {
        let expanded = self.expander.expand(name);
        let normalized = normalize(&expanded);

        // A name resolved under the current path set is trusted until the
        // next mutation, so a hit skips validation and the directory scan.
        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&normalized) {
                trace!(name = %normalized, path = %hit.display(), "resolution cache hit");
                return Ok(hit.clone());
            }
        }

        let (namespace, short_name) = split_namespace(&normalized)?;
        validate(short_name)?;

        if !self.paths.has_namespace(namespace) {
            return Err(LoaderError::UnknownNamespace {
                namespace: namespace.to_string(),
            });
        }

        let searched = self.paths.paths(namespace);
        for dir in searched {
            let candidate = dir.join(short_name);
            trace!(candidate = %candidate.display(), "probing search path");
            if candidate.is_file() {
                debug!(name = %normalized, path = %candidate.display(), "template resolved");
                if let Ok(mut cache) = self.cache.write() {
                    cache.insert(normalized, candidate.clone());
                }
                return Ok(candidate);
            }
        }

        Err(LoaderError::TemplateNotFound {
            name: normalized,
            searched: searched.to_vec(),
        })
    }

    fn invalidate(&mut self) {
        if let Ok(mut cache) = self.cache.write() {
            if !cache.is_empty() {
                debug!(entries = cache.len(), "resolution cache cleared");
            }
            cache.clear();
        }
    }
}
