//! Column-order resolution.
//!
//! The core of the tool: given the table's current columns and an
//! [`OrderingSpec`], compute the final total order. Front columns come first
//! in the user's order, back columns last in the user's order, and everything
//! not mentioned keeps its original relative position in between. Excluded
//! columns are absent from the result; [`pin_excluded`] reinserts them at
//! their original ordinal position when the physical rebuild is assembled.
//!
//! Pure functions, no side effects.

use crate::error::{Placement, ReorderError, ReorderResult};
use crate::parser::OrderingSpec;
use crate::schema::Column;

/// Resolve the final column order for a table.
///
/// Fails fast on the first invalid request: duplicate names within a
/// placement list, a name claimed by two placements, or names that do not
/// exist in the table (all unknown names are reported together). Name
/// matching is case-sensitive, exactly as the catalog reports them.
///
/// An empty spec yields [`ReorderError::NoOpRequested`]; the caller is
/// expected to list the current columns instead.
pub fn resolve(current: &[Column], spec: &OrderingSpec) -> ReorderResult<Vec<Column>> {
    if spec.is_empty() {
        return Err(ReorderError::NoOpRequested);
    }

    check_duplicates(&spec.front, Placement::Front)?;
    check_duplicates(&spec.back, Placement::Back)?;
    check_conflicts(spec)?;
    check_known(current, spec)?;

    let placed = |col: &Column| {
        spec.front.contains(&col.name)
            || spec.back.contains(&col.name)
            || spec.excluded.contains(&col.name)
    };

    let mut result = Vec::with_capacity(current.len());
    for name in &spec.front {
        if let Some(col) = current.iter().find(|c| &c.name == name) {
            result.push(col.clone());
        }
    }
    for col in current {
        if !placed(col) {
            result.push(col.clone());
        }
    }
    for name in &spec.back {
        if let Some(col) = current.iter().find(|c| &c.name == name) {
            result.push(col.clone());
        }
    }

    Ok(result)
}

/// Reinsert excluded columns at their original ordinal position.
///
/// `resolved` is the output of [`resolve`] for the same `current` and spec.
/// Each excluded column goes back to the index it occupied in `current`
/// (clamped to the end), so exclusion means "do not move this column", never
/// "drop it".
pub fn pin_excluded(current: &[Column], resolved: &[Column], excluded: &[String]) -> Vec<Column> {
    let mut result = resolved.to_vec();
    for (index, col) in current.iter().enumerate() {
        if excluded.iter().any(|name| name == &col.name) {
            result.insert(index.min(result.len()), col.clone());
        }
    }
    result
}

fn check_duplicates(names: &[String], placement: Placement) -> ReorderResult<()> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(ReorderError::duplicate(name, placement));
        }
    }
    Ok(())
}

fn check_conflicts(spec: &OrderingSpec) -> ReorderResult<()> {
    for name in &spec.front {
        if spec.back.contains(name) {
            return Err(ReorderError::conflict(name, Placement::Front, Placement::Back));
        }
        if spec.excluded.contains(name) {
            return Err(ReorderError::conflict(
                name,
                Placement::Front,
                Placement::Excluded,
            ));
        }
    }
    for name in &spec.back {
        if spec.excluded.contains(name) {
            return Err(ReorderError::conflict(
                name,
                Placement::Back,
                Placement::Excluded,
            ));
        }
    }
    Ok(())
}

fn check_known(current: &[Column], spec: &OrderingSpec) -> ReorderResult<()> {
    let unknown: Vec<String> = spec
        .front
        .iter()
        .chain(&spec.back)
        .chain(&spec.excluded)
        .filter(|name| !current.iter().any(|c| &c.name == *name))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ReorderError::UnknownColumns(unknown))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn table(names: &[&str]) -> Vec<Column> {
        names.iter().map(|n| Column::new(*n, "text")).collect()
    }

    fn names(cols: &[Column]) -> Vec<&str> {
        cols.iter().map(|c| c.name.as_str()).collect()
    }

    fn spec(front: &[&str], back: &[&str], excluded: &[&str]) -> OrderingSpec {
        OrderingSpec {
            front: front.iter().map(|s| s.to_string()).collect(),
            back: back.iter().map(|s| s.to_string()).collect(),
            excluded: excluded.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_front_and_back() {
        let current = table(&["author", "year_published", "title", "id"]);
        let result = resolve(&current, &spec(&["id"], &["year_published"], &[])).unwrap();
        assert_eq!(names(&result), vec!["id", "author", "title", "year_published"]);
    }

    #[test]
    fn test_front_only_user_order_wins() {
        let current = table(&["a", "b", "c", "d"]);
        let result = resolve(&current, &spec(&["c", "a"], &[], &[])).unwrap();
        assert_eq!(names(&result), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_back_only() {
        let current = table(&["a", "b", "c", "d"]);
        let result = resolve(&current, &spec(&[], &["a", "b", "c"], &[])).unwrap();
        assert_eq!(names(&result), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn test_middle_keeps_relative_order() {
        let current = table(&["a", "b", "c", "d", "e", "f"]);
        let result = resolve(&current, &spec(&["e"], &["b"], &[])).unwrap();
        assert_eq!(names(&result), vec!["e", "a", "c", "d", "f", "b"]);
    }

    #[test]
    fn test_excluded_dropped_from_result() {
        let current = table(&["a", "b", "c", "d"]);
        let result = resolve(&current, &spec(&["d"], &[], &["b"])).unwrap();
        assert_eq!(names(&result), vec!["d", "a", "c"]);
    }

    #[test]
    fn test_permutation_of_current_minus_excluded() {
        let current = table(&["a", "b", "c", "d", "e"]);
        let result = resolve(&current, &spec(&["d", "b"], &["a"], &["c"])).unwrap();
        let mut got = names(&result);
        got.sort_unstable();
        assert_eq!(got, vec!["a", "b", "d", "e"]);
        assert_eq!(result.len(), current.len() - 1);
    }

    #[test]
    fn test_idempotent() {
        let current = table(&["a", "b", "c", "d", "e"]);
        let s = spec(&["c", "a"], &["b"], &[]);
        let once = resolve(&current, &s).unwrap();
        let twice = resolve(&once, &s).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_spec_is_noop() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&[], &[], &[])).unwrap_err();
        assert!(matches!(err, ReorderError::NoOpRequested));
    }

    #[test]
    fn test_unknown_column() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&["x"], &[], &[])).unwrap_err();
        match err {
            ReorderError::UnknownColumns(cols) => assert_eq!(cols, vec!["x"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_columns_all_reported() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&["x", "a"], &["y"], &["z"])).unwrap_err();
        match err {
            ReorderError::UnknownColumns(cols) => assert_eq!(cols, vec!["x", "y", "z"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_conflicting_placement() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&["a"], &["a"], &[])).unwrap_err();
        match err {
            ReorderError::ConflictingPlacement { name, first, second } => {
                assert_eq!(name, "a");
                assert_eq!(first, Placement::Front);
                assert_eq!(second, Placement::Back);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_front_exclude_conflict() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&["a"], &[], &["a"])).unwrap_err();
        assert!(matches!(
            err,
            ReorderError::ConflictingPlacement {
                second: Placement::Excluded,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_in_front() {
        let current = table(&["a", "b"]);
        let err = resolve(&current, &spec(&["a", "a"], &[], &[])).unwrap_err();
        match err {
            ReorderError::DuplicateColumn { name, placement } => {
                assert_eq!(name, "a");
                assert_eq!(placement, Placement::Front);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_case_sensitive_matching() {
        let current = table(&["Id", "name"]);
        let err = resolve(&current, &spec(&["id"], &[], &[])).unwrap_err();
        assert!(matches!(err, ReorderError::UnknownColumns(_)));
    }

    #[test]
    fn test_pin_excluded_keeps_position() {
        let current = table(&["a", "b", "c", "d"]);
        let s = spec(&["d"], &[], &["b"]);
        let resolved = resolve(&current, &s).unwrap();
        let pinned = pin_excluded(&current, &resolved, &s.excluded);
        assert_eq!(names(&pinned), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_pin_excluded_last_column_stays_last() {
        let current = table(&["a", "b", "c"]);
        let s = spec(&["b"], &[], &["c"]);
        let resolved = resolve(&current, &s).unwrap();
        let pinned = pin_excluded(&current, &resolved, &s.excluded);
        assert_eq!(names(&pinned), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_pin_excluded_multiple() {
        let current = table(&["a", "b", "c", "d", "e"]);
        let s = spec(&["e"], &[], &["b", "d"]);
        let resolved = resolve(&current, &s).unwrap();
        let pinned = pin_excluded(&current, &resolved, &s.excluded);
        assert_eq!(names(&pinned), vec!["e", "b", "a", "d", "c"]);
    }
}
