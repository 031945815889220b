//! # pg-reorder — Reorder PostgreSQL table columns
//!
//! PostgreSQL has no `ALTER TABLE ... REORDER COLUMNS`; changing the physical
//! column order means rebuilding the table. pg-reorder computes the target
//! order from a partial request and emits the rebuild migration.
//!
//! ## Quick Example
//!
//! ```rust
//! use pg_reorder::prelude::*;
//!
//! let current = vec![
//!     Column::new("author", "text"),
//!     Column::new("year_published", "integer"),
//!     Column::new("title", "text"),
//!     Column::new("id", "integer"),
//! ];
//!
//! // "id ... year_published" on the command line:
//! let spec = OrderingSpec::from_args(&["id", "...", "year_published"], &[]);
//! let ordered = resolve(&current, &spec).unwrap();
//!
//! let names: Vec<_> = ordered.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["id", "author", "title", "year_published"]);
//! ```
//!
//! ## Placement rules
//!
//! | Request                | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `a b c`                | pin a, b, c to the start, in that order   |
//! | `a b ... c`            | a, b to the start; c to the end           |
//! | `... a b c`            | a, b, c to the end                        |
//! | `--exclude x`          | leave x exactly where it is               |
//! | (no columns)           | list the current columns, change nothing  |
//!
//! Columns not mentioned keep their original relative order in the middle.

pub mod error;
pub mod migration;
pub mod parser;
pub mod resolver;
pub mod schema;

pub mod prelude {
    pub use crate::error::{Placement, ReorderError, ReorderResult};
    pub use crate::migration::migration_sql;
    pub use crate::parser::OrderingSpec;
    pub use crate::resolver::{pin_excluded, resolve};
    pub use crate::schema::{connect, Column, ConnectParams, TableInfo};
}

pub use resolver::resolve;
