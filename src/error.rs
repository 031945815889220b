//! Error types for pg-reorder.

use thiserror::Error;

/// Where the user asked a column to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
    Excluded,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
            Self::Excluded => write!(f, "excluded"),
        }
    }
}

/// The main error type for reorder operations.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// Referenced column names that do not exist in the table.
    #[error("Unknown column(s): {}", .0.join(", "))]
    UnknownColumns(Vec<String>),

    /// A column requested in more than one placement.
    #[error("Conflicting placement for column '{name}': listed as both {first} and {second}")]
    ConflictingPlacement {
        name: String,
        first: Placement,
        second: Placement,
    },

    /// A column repeated within the same placement list.
    #[error("Duplicate column '{name}' in {placement} list")]
    DuplicateColumn { name: String, placement: Placement },

    /// No columns were requested; the caller should list columns and stop.
    #[error("No columns specified; nothing to reorder")]
    NoOpRequested,

    /// The table has no columns in the catalog, i.e. it does not exist.
    #[error("Could not find table {schema}.{table}")]
    TableNotFound { schema: String, table: String },

    /// Database error, surfaced verbatim.
    #[error("Database error: {0}")]
    Database(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReorderError {
    /// Create a duplicate-column error for the given placement list.
    pub fn duplicate(name: impl Into<String>, placement: Placement) -> Self {
        Self::DuplicateColumn {
            name: name.into(),
            placement,
        }
    }

    /// Create a conflicting-placement error.
    pub fn conflict(name: impl Into<String>, first: Placement, second: Placement) -> Self {
        Self::ConflictingPlacement {
            name: name.into(),
            first,
            second,
        }
    }
}

/// Result type alias for reorder operations.
pub type ReorderResult<T> = Result<T, ReorderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_columns_display() {
        let err = ReorderError::UnknownColumns(vec!["x".into(), "y".into()]);
        assert_eq!(err.to_string(), "Unknown column(s): x, y");
    }

    #[test]
    fn test_conflict_display() {
        let err = ReorderError::conflict("id", Placement::Front, Placement::Back);
        assert_eq!(
            err.to_string(),
            "Conflicting placement for column 'id': listed as both front and back"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = ReorderError::duplicate("title", Placement::Back);
        assert_eq!(err.to_string(), "Duplicate column 'title' in back list");
    }
}
