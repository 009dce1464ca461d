//! Template name canonicalization, safety validation, and namespace routing

use crate::error::LoaderError;

/// Namespace used when a name carries no `@namespace/` prefix
pub const MAIN_NAMESPACE: &str = "__main__";

/// Canonicalize a requested template name into slash-separated form
///
/// Backslash separators become forward slashes and runs of consecutive
/// slashes collapse to one. Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_slash = false;
    for c in name.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

/// Reject names that could escape the search root
///
/// Fails on embedded NUL bytes (filesystem APIs truncate at NUL) and on any
/// name whose `..`-adjusted depth goes negative while walking its segments.
/// Must be called on the short name, after namespace stripping.
pub fn validate(name: &str) -> Result<(), LoaderError> {
    if name.contains('\0') {
        return Err(LoaderError::UnsafeName {
            name: name.replace('\0', "\\0"),
            reason: "name contains a NUL byte".to_string(),
        });
    }

    let stripped = name.strip_prefix('/').unwrap_or(name);
    let mut depth: i32 = 0;
    for segment in stripped.split('/') {
        match segment {
            ".." => {
                depth -= 1;
                if depth < 0 {
                    return Err(LoaderError::UnsafeName {
                        name: name.to_string(),
                        reason: "path escapes the search root".to_string(),
                    });
                }
            }
            "." | "" => {}
            _ => depth += 1,
        }
    }
    Ok(())
}

/// Split a name into its namespace and the short name searched on disk
///
/// `@ns/rest` routes to `("ns", "rest")`; a bare `@ns` with no `/` is
/// malformed; everything else falls into [`MAIN_NAMESPACE`].
pub fn split_namespace(name: &str) -> Result<(&str, &str), LoaderError> {
    let Some(suffix) = name.strip_prefix('@') else {
        return Ok((MAIN_NAMESPACE, name));
    };
    match suffix.split_once('/') {
        Some((namespace, short)) => Ok((namespace, short)),
        None => Err(LoaderError::MalformedNamespace {
            name: name.to_string(),
        }),
    }
}
