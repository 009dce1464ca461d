//! Template name resolution
//!
//! This module maps symbolic template references to files on disk: names are
//! canonicalized, checked against traversal above the search root, routed to a
//! namespace, and searched across that namespace's ordered directories.
//!
//! # Example
//!
//! ```rust
//! use pattern_loader::template::normalize;
//!
//! assert_eq!(normalize(r"atoms\\button.twig"), "atoms/button.twig");
//! ```

mod name;
mod paths;
mod resolver;

pub use name::{normalize, split_namespace, validate, MAIN_NAMESPACE};
pub use paths::PathSet;
pub use resolver::TemplateResolver;
