//! Pattern shorthand references and their expansion into filenames
//!
//! Pattern-based engines let templates include one another through a short
//! symbolic name instead of a filesystem path: `atoms-button`, optionally with
//! a style modifier selecting a visual variant and a list of parameters passed
//! to the pattern, as in `atoms-button:hover(label: Save)`. The resolver
//! funnels both reference styles (raw paths and pattern shorthand) through a
//! single [`PatternExpander`], so engines with richer pattern dictionaries can
//! swap in their own name-to-file mapping.

/// A parsed pattern shorthand reference
///
/// Transient: produced and consumed within a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternReference {
    /// The pattern's own identifier, e.g. `atoms-button`
    pub partial: String,
    /// Optional suffix selecting a visual variant of the pattern
    pub style_modifier: Option<String>,
    /// Ordered, opaque parameter strings passed to the pattern
    pub parameters: Vec<String>,
}

impl PatternReference {
    /// Parse a requested name into its shorthand parts
    ///
    /// Grammar: `partial[:modifier][(arg, arg, ...)]`. Inside the parens the
    /// first colon-free argument is taken as the style modifier when none was
    /// given via `:`; every other argument is kept verbatim as a parameter.
    /// A name with no shorthand syntax parses to just its partial.
    pub fn parse(name: &str) -> Self {
        let (head, args) = match name.split_once('(') {
            Some((head, rest)) => {
                let inner = rest.strip_suffix(')').unwrap_or(rest);
                (head.trim(), split_arguments(inner))
            }
            None => (name.trim(), Vec::new()),
        };

        let (partial, mut style_modifier) = match head.split_once(':') {
            Some((partial, modifier)) => (partial.to_string(), Some(modifier.to_string())),
            None => (head.to_string(), None),
        };

        let mut parameters = Vec::new();
        for arg in args {
            if style_modifier.is_none() && !arg.contains(':') {
                style_modifier = Some(arg);
            } else {
                parameters.push(arg);
            }
        }

        Self {
            partial,
            style_modifier,
            parameters,
        }
    }

    /// True when the original name carried no shorthand syntax at all
    ///
    /// Plain filesystem-style references (a path separator or an extension
    /// dot, and no parenthesized arguments) pass through expansion unchanged.
    pub fn is_plain_path(&self) -> bool {
        self.style_modifier.is_none()
            && self.parameters.is_empty()
            && (self.partial.contains('/') || last_segment_has_extension(&self.partial))
    }
}

fn split_arguments(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn last_segment_has_extension(partial: &str) -> bool {
    let segment = partial.rsplit(['/', '\\']).next().unwrap_or(partial);
    // A leading dot alone ("." / ".hidden") is not an extension.
    segment.char_indices().any(|(i, c)| i > 0 && c == '.')
}

/// Maps a requested template name to a concrete relative filename
///
/// The resolver consumes this interface only; the engine supplies the
/// implementation. [`FileExpander`] covers the common case of appending a
/// fixed extension to the pattern's partial name.
pub trait PatternExpander {
    /// Expand a requested name into the relative filename searched on disk
    fn expand(&self, name: &str) -> String;
}

/// Default expander: shorthand becomes `partial.extension`, plain paths pass
/// through untouched
#[derive(Debug, Clone)]
pub struct FileExpander {
    extension: String,
}

impl FileExpander {
    /// Create an expander with a fixed file extension (no leading dot)
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// The fixed extension appended to shorthand references
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl PatternExpander for FileExpander {
    fn expand(&self, name: &str) -> String {
        let reference = PatternReference::parse(name);
        if reference.is_plain_path() {
            return name.to_string();
        }
        format!("{}.{}", reference.partial, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bare_partial() {
        let r = PatternReference::parse("atoms-button");
        assert_eq!(r.partial, "atoms-button");
        assert_eq!(r.style_modifier, None);
        assert!(r.parameters.is_empty());
    }

    #[test]
    fn test_parse_modifier_and_parameters() {
        let r = PatternReference::parse("button(primary, label:Save)");
        assert_eq!(r.partial, "button");
        assert_eq!(r.style_modifier.as_deref(), Some("primary"));
        assert_eq!(r.parameters, vec!["label:Save".to_string()]);
    }

    #[test]
    fn test_parse_colon_modifier() {
        let r = PatternReference::parse("atoms-button:hover");
        assert_eq!(r.partial, "atoms-button");
        assert_eq!(r.style_modifier.as_deref(), Some("hover"));
    }

    #[test]
    fn test_parse_colon_modifier_with_parameters() {
        let r = PatternReference::parse("atoms-button:hover(label: Go, count: 2)");
        assert_eq!(r.partial, "atoms-button");
        assert_eq!(r.style_modifier.as_deref(), Some("hover"));
        assert_eq!(
            r.parameters,
            vec!["label: Go".to_string(), "count: 2".to_string()]
        );
    }

    #[test]
    fn test_parse_parameters_only() {
        let r = PatternReference::parse("button(label:Save)");
        assert_eq!(r.style_modifier, None);
        assert_eq!(r.parameters, vec!["label:Save".to_string()]);
    }

    #[test]
    fn test_plain_path_detection() {
        assert!(PatternReference::parse("button.twig").is_plain_path());
        assert!(PatternReference::parse("molecules/comment").is_plain_path());
        assert!(!PatternReference::parse("button").is_plain_path());
        assert!(!PatternReference::parse("button(primary)").is_plain_path());
        assert!(!PatternReference::parse(".hidden").is_plain_path());
    }

    #[test]
    fn test_file_expander_shorthand() {
        let expander = FileExpander::new("twig");
        assert_eq!(expander.expand("button"), "button.twig");
        assert_eq!(expander.expand("button(primary, label:Save)"), "button.twig");
        assert_eq!(expander.expand("atoms-button:hover"), "atoms-button.twig");
    }

    #[test]
    fn test_file_expander_plain_passthrough() {
        let expander = FileExpander::new("twig");
        assert_eq!(expander.expand("button.twig"), "button.twig");
        assert_eq!(
            expander.expand("molecules/comment.twig"),
            "molecules/comment.twig"
        );
    }
}
