//! Ordering-spec parser.
//!
//! Turns the flat column-token list from the command line into an explicit
//! [`OrderingSpec`]. The `...` marker splits the list:
//!
//! ```text
//! id slug ... created_at updated_at
//! ──┬────  ┬  ─────┬─────────────
//!   │      │       │
//!   │      │       └── back: pinned to the end of the table
//!   │      └── marker
//!   └── front: pinned to the start of the table
//! ```
//!
//! No marker means every token is a front column; a leading marker means
//! every token is a back column. The marker never reaches the resolver.

/// The token separating front columns from back columns.
pub const MARKER: &str = "...";

/// The user's reorder request, split into explicit placement lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingSpec {
    /// Columns pinned to the start of the table, in the order given.
    pub front: Vec<String>,
    /// Columns pinned to the end of the table, in the order given.
    pub back: Vec<String>,
    /// Columns to leave untouched, as a deduplicated set.
    pub excluded: Vec<String>,
}

impl OrderingSpec {
    /// Build a spec from the raw column tokens and `--exclude` flags.
    ///
    /// Tokens before the first `...` become `front`, tokens after it become
    /// `back`. Additional markers are ignored. Repeated `--exclude` names are
    /// deduplicated; order of first appearance is kept for error messages.
    pub fn from_args<S: AsRef<str>>(tokens: &[S], excluded: &[S]) -> Self {
        let mut front = Vec::new();
        let mut back = Vec::new();
        let mut seen_marker = false;

        for token in tokens {
            let token = token.as_ref();
            if token == MARKER {
                seen_marker = true;
            } else if seen_marker {
                back.push(token.to_string());
            } else {
                front.push(token.to_string());
            }
        }

        let mut dedup = Vec::new();
        for name in excluded {
            let name = name.as_ref();
            if !dedup.iter().any(|n| n == name) {
                dedup.push(name.to_string());
            }
        }

        Self {
            front,
            back,
            excluded: dedup,
        }
    }

    /// True when no placement was requested at all (the no-op path).
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty() && self.excluded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_marker_all_front() {
        let spec = OrderingSpec::from_args(&["a", "b", "c"], &[]);
        assert_eq!(spec.front, vec!["a", "b", "c"]);
        assert!(spec.back.is_empty());
    }

    #[test]
    fn test_marker_splits_front_and_back() {
        let spec = OrderingSpec::from_args(&["id", "slug", "...", "created_at"], &[]);
        assert_eq!(spec.front, vec!["id", "slug"]);
        assert_eq!(spec.back, vec!["created_at"]);
    }

    #[test]
    fn test_leading_marker_all_back() {
        let spec = OrderingSpec::from_args(&["...", "a", "b"], &[]);
        assert!(spec.front.is_empty());
        assert_eq!(spec.back, vec!["a", "b"]);
    }

    #[test]
    fn test_extra_markers_ignored() {
        let spec = OrderingSpec::from_args(&["a", "...", "b", "...", "c"], &[]);
        assert_eq!(spec.front, vec!["a"]);
        assert_eq!(spec.back, vec!["b", "c"]);
    }

    #[test]
    fn test_trailing_marker_empty_back() {
        let spec = OrderingSpec::from_args(&["a", "b", "..."], &[]);
        assert_eq!(spec.front, vec!["a", "b"]);
        assert!(spec.back.is_empty());
    }

    #[test]
    fn test_excluded_deduplicated() {
        let spec = OrderingSpec::from_args(&[], &["x", "y", "x"]);
        assert_eq!(spec.excluded, vec!["x", "y"]);
    }

    #[test]
    fn test_empty_spec() {
        let spec = OrderingSpec::from_args::<&str>(&[], &[]);
        assert!(spec.is_empty());

        let spec = OrderingSpec::from_args(&["..."], &[]);
        assert!(spec.is_empty());
    }

    #[test]
    fn test_exclude_only_is_not_empty() {
        let spec = OrderingSpec::from_args(&[], &["x"]);
        assert!(!spec.is_empty());
    }
}
