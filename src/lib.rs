//! Pattern Loader - template-name resolution and loading for pattern-based
//! template engines
//!
//! Given a symbolic template reference - possibly namespaced
//! (`@plugin/button.twig`), possibly a pattern shorthand with style-modifier
//! and parameter suffixes (`button(primary, label:Save)`) - this library
//! locates the matching source file among an ordered set of search
//! directories, reads it, and gives the calling engine the freshness signals
//! it needs for compiled-template caching.
//!
//! # Example
//!
//! ```rust
//! use pattern_loader::{FilesystemLoader, Loader, PathSet, MAIN_NAMESPACE};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("button.twig"), "<button/>").unwrap();
//!
//! let mut paths = PathSet::new();
//! paths.add_path(dir.path(), MAIN_NAMESPACE).unwrap();
//!
//! let loader = FilesystemLoader::new(paths, "twig");
//! assert_eq!(loader.get_source("button").unwrap(), "<button/>");
//! assert!(!loader.exists("missing.twig").unwrap());
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pattern;
pub mod template;

pub use config::{ConfigError, LoaderConfig, DEFAULT_EXTENSION};
pub use error::LoaderError;
pub use loader::{FilesystemLoader, Loader};
pub use pattern::{FileExpander, PatternExpander, PatternReference};
pub use template::{normalize, PathSet, TemplateResolver, MAIN_NAMESPACE};
