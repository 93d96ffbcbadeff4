//! Classification of host scope labels.
//!
//! A scope label is a space-delimited list of dotted scope identifiers active at a position,
//! outermost first, e.g. `"source.rust meta.block comment.line.double-slash"`.

fn has_root(label: &str, root: &str) -> bool {
    label
        .split_whitespace()
        .any(|scope| scope.split('.').next() == Some(root))
}

/// Returns `true` if any scope in `label` is rooted at `comment`.
pub fn has_comment_scope(label: &str) -> bool {
    has_root(label, "comment")
}

/// Returns `true` if any scope in `label` is rooted at `string`.
pub fn has_string_scope(label: &str) -> bool {
    has_root(label, "string")
}

/// Comment or string: positions whose delimiters are transparent to matching.
pub fn is_comment_or_string(label: &str) -> bool {
    has_comment_scope(label) || has_string_scope(label)
}

/// Returns `true` if `scope` matches `selector` on dot-separated component boundaries.
///
/// `meta.function` matches `meta.function` and `meta.function.rust`, but not
/// `meta.functional`.
pub fn scope_matches_selector(scope: &str, selector: &str) -> bool {
    match scope.strip_prefix(selector) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Number of scopes in `label` that match `selector`.
pub fn count_matching(label: &str, selector: &str) -> usize {
    label
        .split_whitespace()
        .filter(|scope| scope_matches_selector(scope, selector))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_and_string_roots() {
        assert!(has_comment_scope("source.rust comment.line.double-slash"));
        assert!(has_string_scope("source.js string.quoted.double"));
        assert!(!has_comment_scope("source.rust meta.block"));
        assert!(!has_string_scope("source.rust meta.string-like"));
        assert!(!has_comment_scope("source.commentary"));
        assert!(is_comment_or_string("string"));
        assert!(!is_comment_or_string(""));
    }

    #[test]
    fn test_selector_matching() {
        assert!(scope_matches_selector("meta.function", "meta.function"));
        assert!(scope_matches_selector("meta.function.rust", "meta.function"));
        assert!(!scope_matches_selector("meta.functional", "meta.function"));
        assert_eq!(
            count_matching("source.rust meta.block meta.block meta.function", "meta.block"),
            2
        );
    }
}
