//! Ordered, namespace-keyed search path collection

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoaderError;

use super::name::MAIN_NAMESPACE;

/// An ordered, namespace-keyed collection of directories to search
///
/// Insertion order is search priority: the first directory containing a
/// requested file wins. Every mutation bumps a generation counter so that
/// downstream resolution caches can tell their entries went stale.
#[derive(Debug, Default)]
pub struct PathSet {
    paths: HashMap<String, Vec<PathBuf>>,
    generation: u64,
}

impl PathSet {
    /// Create an empty path set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire ordered list for a namespace
    pub fn set_paths<I, P>(&mut self, paths: I, namespace: &str) -> Result<(), LoaderError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut checked = Vec::new();
        for path in paths {
            checked.push(check_directory(path.as_ref())?);
        }
        self.paths.insert(namespace.to_string(), checked);
        self.bump();
        Ok(())
    }

    /// Append a directory at the end of a namespace's list (lowest priority)
    pub fn add_path(&mut self, path: impl AsRef<Path>, namespace: &str) -> Result<(), LoaderError> {
        let path = check_directory(path.as_ref())?;
        self.paths.entry(namespace.to_string()).or_default().push(path);
        self.bump();
        Ok(())
    }

    /// Insert a directory at the front of a namespace's list (highest priority)
    ///
    /// Later-registered override directories win over earlier base directories
    /// without disturbing the priority among the base directories themselves.
    pub fn prepend_path(
        &mut self,
        path: impl AsRef<Path>,
        namespace: &str,
    ) -> Result<(), LoaderError> {
        let path = check_directory(path.as_ref())?;
        self.paths
            .entry(namespace.to_string())
            .or_default()
            .insert(0, path);
        self.bump();
        Ok(())
    }

    /// Ordered search directories for a namespace (empty for unknown namespaces)
    pub fn paths(&self, namespace: &str) -> &[PathBuf] {
        self.paths.get(namespace).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Search directories for the main namespace
    pub fn main_paths(&self) -> &[PathBuf] {
        self.paths(MAIN_NAMESPACE)
    }

    /// All registered namespace keys
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// True once a namespace has at least one registered directory
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.paths.get(namespace).is_some_and(|p| !p.is_empty())
    }

    /// Monotonic counter bumped on every mutation
    ///
    /// Resolution caches record the generation they were filled under and
    /// treat a mismatch as a wholesale invalidation signal.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "search paths changed");
    }
}

/// Validate that a registered path is an existing directory, stripping
/// trailing separators so joined candidate paths stay canonical.
fn check_directory(path: &Path) -> Result<PathBuf, LoaderError> {
    let display = path.to_string_lossy();
    let trimmed = display.trim_end_matches(['/', '\\']);
    let path = if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    };
    if !path.is_dir() {
        return Err(LoaderError::DirectoryNotFound { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_add_path_preserves_order() {
        let a = tempdir().expect("Should create tempdir");
        let b = tempdir().expect("Should create tempdir");

        let mut set = PathSet::new();
        set.add_path(a.path(), MAIN_NAMESPACE).expect("Should add");
        set.add_path(b.path(), MAIN_NAMESPACE).expect("Should add");

        assert_eq!(set.main_paths(), &[a.path().to_path_buf(), b.path().to_path_buf()]);
    }

    #[test]
    fn test_prepend_path_wins_priority() {
        let a = tempdir().expect("Should create tempdir");
        let b = tempdir().expect("Should create tempdir");

        let mut set = PathSet::new();
        set.add_path(a.path(), MAIN_NAMESPACE).expect("Should add");
        set.prepend_path(b.path(), MAIN_NAMESPACE).expect("Should prepend");

        assert_eq!(set.main_paths()[0], b.path());
        assert_eq!(set.main_paths()[1], a.path());
    }

    #[test]
    fn test_prepend_into_empty_namespace() {
        let a = tempdir().expect("Should create tempdir");

        let mut set = PathSet::new();
        set.prepend_path(a.path(), "plugin").expect("Should prepend");

        assert_eq!(set.paths("plugin"), &[a.path().to_path_buf()]);
    }

    #[test]
    fn test_set_paths_replaces_list() {
        let a = tempdir().expect("Should create tempdir");
        let b = tempdir().expect("Should create tempdir");

        let mut set = PathSet::new();
        set.add_path(a.path(), MAIN_NAMESPACE).expect("Should add");
        set.set_paths([b.path()], MAIN_NAMESPACE).expect("Should replace");

        assert_eq!(set.main_paths(), &[b.path().to_path_buf()]);
    }

    #[test]
    fn test_missing_directory_rejected() {
        let mut set = PathSet::new();
        let err = set
            .add_path("/definitely/not/a/real/dir", MAIN_NAMESPACE)
            .expect_err("Should reject missing directory");
        assert!(matches!(err, LoaderError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_trailing_separators_stripped() {
        let a = tempdir().expect("Should create tempdir");
        let with_slash = format!("{}/", a.path().display());

        let mut set = PathSet::new();
        set.add_path(&with_slash, MAIN_NAMESPACE).expect("Should add");

        assert_eq!(set.main_paths()[0], a.path());
    }

    #[test]
    fn test_unknown_namespace_is_empty_not_error() {
        let set = PathSet::new();
        assert!(set.paths("nowhere").is_empty());
        assert!(!set.has_namespace("nowhere"));
    }

    #[test]
    fn test_generation_bumps_on_every_mutation() {
        let a = tempdir().expect("Should create tempdir");

        let mut set = PathSet::new();
        let g0 = set.generation();
        set.add_path(a.path(), MAIN_NAMESPACE).expect("Should add");
        let g1 = set.generation();
        set.prepend_path(a.path(), MAIN_NAMESPACE).expect("Should prepend");
        let g2 = set.generation();

        assert!(g1 > g0);
        assert!(g2 > g1);
    }
}
