//! Engine-facing template loading
//!
//! A template engine talks to the filesystem through the [`Loader`] trait:
//! fetch a template's source, use its resolved path as a compile-cache key,
//! probe for existence, and check freshness against a compiled timestamp.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::LoaderError;
use crate::template::{PathSet, TemplateResolver, MAIN_NAMESPACE};

/// The loader surface a template engine consumes
pub trait Loader {
    /// Resolve a name and read the template source fully
    fn get_source(&self, name: &str) -> Result<String, LoaderError>;

    /// The resolved absolute path, usable as a compiled-template cache key
    fn cache_key(&self, name: &str) -> Result<PathBuf, LoaderError>;

    /// Whether a name resolves under the current search paths
    ///
    /// The not-found family becomes `Ok(false)`; unsafe or malformed names
    /// and read errors still propagate.
    fn exists(&self, name: &str) -> Result<bool, LoaderError>;

    /// True iff the resolved file was last modified at or before `since`
    ///
    /// The engine uses this to decide whether a compiled template built at
    /// `since` can be reused.
    fn is_fresh(&self, name: &str, since: SystemTime) -> Result<bool, LoaderError>;
}

/// Filesystem-backed loader built around a [`TemplateResolver`]
#[derive(Debug)]
pub struct FilesystemLoader {
    resolver: TemplateResolver,
}

impl FilesystemLoader {
    /// Create a loader over a path set, expanding pattern shorthand with the
    /// given fixed extension
    pub fn new(paths: PathSet, extension: impl Into<String>) -> Self {
        Self {
            resolver: TemplateResolver::new(paths, extension),
        }
    }

    /// Create a loader around an already-configured resolver
    pub fn with_resolver(resolver: TemplateResolver) -> Self {
        Self { resolver }
    }

    /// The resolver behind this loader
    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Replace the ordered search list for a namespace
    pub fn set_paths<I, P>(&mut self, paths: I, namespace: &str) -> Result<(), LoaderError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.resolver.set_paths(paths, namespace)
    }

    /// Append a search directory to the main namespace (lowest priority)
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<(), LoaderError> {
        self.resolver.add_path(path, MAIN_NAMESPACE)
    }

    /// Append a search directory to a namespace (lowest priority)
    pub fn add_namespaced_path(
        &mut self,
        path: impl AsRef<Path>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        self.resolver.add_path(path, namespace)
    }

    /// Prepend a search directory to a namespace (highest priority)
    pub fn prepend_path(
        &mut self,
        path: impl AsRef<Path>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        self.resolver.prepend_path(path, namespace)
    }
}

impl Loader for FilesystemLoader {
    fn get_source(&self, name: &str) -> Result<String, LoaderError> {
        let path = self.resolver.find(name)?;
        debug!(name, path = %path.display(), "loading template source");
        std::fs::read_to_string(&path).map_err(|source| LoaderError::Io { path, source })
    }

    fn cache_key(&self, name: &str) -> Result<PathBuf, LoaderError> {
        self.resolver.find(name)
    }

    fn exists(&self, name: &str) -> Result<bool, LoaderError> {
        match self.resolver.find(name) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn is_fresh(&self, name: &str, since: SystemTime) -> Result<bool, LoaderError> {
        let path = self.resolver.find(name)?;
        let metadata =
            std::fs::metadata(&path).map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            })?;
        let modified = metadata
            .modified()
            .map_err(|source| LoaderError::Io { path, source })?;
        Ok(modified <= since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn loader_with_button() -> (tempfile::TempDir, FilesystemLoader) {
        let dir = tempdir().expect("Should create tempdir");
        fs::write(dir.path().join("button.twig"), "<button>{{ label }}</button>")
            .expect("Should write file");

        let mut paths = PathSet::new();
        paths.add_path(dir.path(), MAIN_NAMESPACE).expect("Should add");
        let loader = FilesystemLoader::new(paths, "twig");
        (dir, loader)
    }

    #[test]
    fn test_get_source_reads_file() {
        let (_dir, loader) = loader_with_button();
        let source = loader.get_source("button").expect("Should load");
        assert_eq!(source, "<button>{{ label }}</button>");
    }

    #[test]
    fn test_cache_key_is_resolved_path() {
        let (dir, loader) = loader_with_button();
        let key = loader.cache_key("button.twig").expect("Should resolve");
        assert_eq!(key, dir.path().join("button.twig"));
    }

    #[test]
    fn test_exists() {
        let (_dir, loader) = loader_with_button();
        assert!(loader.exists("button").expect("Should probe"));
        assert!(!loader.exists("missing.twig").expect("Should probe"));
        assert!(!loader.exists("@plugin/button.twig").expect("Should probe"));
    }

    #[test]
    fn test_exists_propagates_unsafe_names() {
        let (_dir, loader) = loader_with_button();
        let err = loader
            .exists("../../etc/passwd")
            .expect_err("Should propagate unsafe name");
        assert!(matches!(err, LoaderError::UnsafeName { .. }));
    }

    #[test]
    fn test_is_fresh() {
        let (_dir, loader) = loader_with_button();
        let now = SystemTime::now();

        // A file written before `now` is fresh relative to it.
        assert!(loader
            .is_fresh("button.twig", now + Duration::from_secs(60))
            .expect("Should stat"));
        // And stale relative to a timestamp before it was written.
        assert!(!loader
            .is_fresh("button.twig", now - Duration::from_secs(3600))
            .expect("Should stat"));
    }

    #[test]
    fn test_get_source_missing_template() {
        let (_dir, loader) = loader_with_button();
        let err = loader
            .get_source("missing.twig")
            .expect_err("Should fail on missing template");
        assert!(matches!(err, LoaderError::TemplateNotFound { .. }));
    }
}
