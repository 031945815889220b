//! PostgreSQL metadata access.
//!
//! Reads the current shape of a table from the system catalogs: its columns
//! (in physical order), its own constraints, foreign keys on other tables
//! that reference it, and its non-primary-key indexes. Everything the
//! migration emitter needs to rebuild the table is gathered here in one
//! [`TableInfo`].

use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row;

use crate::error::{ReorderError, ReorderResult};

/// Connection parameters, threaded through explicitly (no global pool).
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

/// Open a small connection pool for the given parameters.
pub async fn connect(params: &ConnectParams) -> ReorderResult<PgPool> {
    let mut options = PgConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .database(&params.database);

    if let Some(password) = &params.password {
        options = options.password(password);
    }

    PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .map_err(|e| ReorderError::Connection(e.to_string()))
}

/// A column as currently defined, in physical order.
///
/// `sql_type` comes from `pg_catalog.format_type`, so precision and scale are
/// part of the string (e.g. `numeric(10,2)`). It is carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub sql_type: String,
    pub not_null: bool,
    pub default: Option<String>,
}

impl Column {
    /// A column with just a name and type, everything else defaulted.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            default: None,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// A constraint owned by the table (primary key, unique, check, foreign key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: String,
    /// Full definition as printed by `pg_get_constraintdef`.
    pub definition: String,
}

/// A foreign key on another table that references this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub schema: String,
    pub table: String,
    pub constraint: String,
    /// Full definition as printed by `pg_get_constraintdef`.
    pub definition: String,
}

/// A non-primary-key index on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    /// Full `CREATE INDEX` statement as printed by `pg_get_indexdef`.
    pub definition: String,
}

/// Everything known about a table that a rebuild has to preserve.
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub schema: String,
    pub table: String,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<Index>,
}

impl TableInfo {
    /// Load the table's metadata from the system catalogs.
    ///
    /// Fails with [`ReorderError::TableNotFound`] when the catalogs report no
    /// columns for the schema-qualified name.
    pub async fn load(pool: &PgPool, schema: &str, table: &str) -> ReorderResult<Self> {
        let columns = fetch_columns(pool, schema, table).await?;
        if columns.is_empty() {
            return Err(ReorderError::TableNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            });
        }

        Ok(Self {
            schema: schema.to_string(),
            table: table.to_string(),
            columns,
            constraints: fetch_constraints(pool, schema, table).await?,
            foreign_keys: fetch_foreign_keys(pool, schema, table).await?,
            indexes: fetch_indexes(pool, schema, table).await?,
        })
    }

    /// The schema-qualified table name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

async fn fetch_columns(pool: &PgPool, schema: &str, table: &str) -> ReorderResult<Vec<Column>> {
    let rows = sqlx::query(
        r#"
        SELECT a.attname AS name,
               pg_catalog.format_type(a.atttypid, a.atttypmod) AS sql_type,
               a.attnotnull AS not_null,
               pg_catalog.pg_get_expr(d.adbin, d.adrelid) AS default_expr
        FROM pg_catalog.pg_attribute a
        JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
        LEFT JOIN pg_catalog.pg_attrdef d
               ON d.adrelid = a.attrelid AND d.adnum = a.attnum
        WHERE n.nspname = $1
          AND c.relname = $2
          AND a.attnum > 0
          AND NOT a.attisdropped
        ORDER BY a.attnum
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|e| ReorderError::Database(e.to_string()))?;

    rows.iter()
        .map(|row| {
            Ok(Column {
                name: row.try_get("name")?,
                sql_type: row.try_get("sql_type")?,
                not_null: row.try_get("not_null")?,
                default: row.try_get("default_expr")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| ReorderError::Database(e.to_string()))
}

async fn fetch_constraints(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> ReorderResult<Vec<Constraint>> {
    let rows = sqlx::query(
        r#"
        SELECT con.conname AS name,
               pg_catalog.pg_get_constraintdef(con.oid) AS definition
        FROM pg_catalog.pg_constraint con
        JOIN pg_catalog.pg_class c ON c.oid = con.conrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
        WHERE n.nspname = $1
          AND c.relname = $2
          AND con.contype IN ('p', 'u', 'c', 'f')
        ORDER BY con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|e| ReorderError::Database(e.to_string()))?;

    rows.iter()
        .map(|row| {
            Ok(Constraint {
                name: row.try_get("name")?,
                definition: row.try_get("definition")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| ReorderError::Database(e.to_string()))
}

async fn fetch_foreign_keys(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> ReorderResult<Vec<ForeignKey>> {
    let rows = sqlx::query(
        r#"
        SELECT ln.nspname AS "schema",
               lc.relname AS "table",
               con.conname AS "constraint",
               pg_catalog.pg_get_constraintdef(con.oid) AS definition
        FROM pg_catalog.pg_constraint con
        JOIN pg_catalog.pg_class fc ON fc.oid = con.confrelid
        JOIN pg_catalog.pg_namespace fn ON fn.oid = fc.relnamespace
        JOIN pg_catalog.pg_class lc ON lc.oid = con.conrelid
        JOIN pg_catalog.pg_namespace ln ON ln.oid = lc.relnamespace
        WHERE con.contype = 'f'
          AND fn.nspname = $1
          AND fc.relname = $2
        ORDER BY con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|e| ReorderError::Database(e.to_string()))?;

    rows.iter()
        .map(|row| {
            Ok(ForeignKey {
                schema: row.try_get("schema")?,
                table: row.try_get("table")?,
                constraint: row.try_get("constraint")?,
                definition: row.try_get("definition")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| ReorderError::Database(e.to_string()))
}

async fn fetch_indexes(pool: &PgPool, schema: &str, table: &str) -> ReorderResult<Vec<Index>> {
    let rows = sqlx::query(
        r#"
        SELECT i.relname AS name,
               pg_catalog.pg_get_indexdef(i.oid) AS definition
        FROM pg_catalog.pg_index x
        JOIN pg_catalog.pg_class c ON c.oid = x.indrelid
        JOIN pg_catalog.pg_class i ON i.oid = x.indexrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
        WHERE n.nspname = $1
          AND c.relname = $2
          AND NOT x.indisprimary
        ORDER BY i.relname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|e| ReorderError::Database(e.to_string()))?;

    rows.iter()
        .map(|row| {
            Ok(Index {
                name: row.try_get("name")?,
                definition: row.try_get("definition")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| ReorderError::Database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_display() {
        let col = Column::new("title", "character varying(200)");
        assert_eq!(col.to_string(), "title character varying(200)");

        let col = Column {
            name: "id".into(),
            sql_type: "integer".into(),
            not_null: true,
            default: Some("nextval('books_id_seq'::regclass)".into()),
        };
        assert_eq!(
            col.to_string(),
            "id integer DEFAULT nextval('books_id_seq'::regclass) NOT NULL"
        );
    }
}
