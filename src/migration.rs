//! Migration SQL emitter.
//!
//! Turns a resolved column order into the script that rebuilds the table.
//! PostgreSQL has no `ALTER TABLE ... REORDER`, so the rebuild goes through a
//! staging table: copy the data in the new column order, drop the old table,
//! rename, then restore everything the copy lost (NOT NULL, defaults,
//! constraints, referencing foreign keys, indexes). The whole script runs in
//! one transaction.
//!
//! The emitter only produces text; nothing here touches the database.

use crate::schema::{Column, TableInfo};

/// Generate the full rebuild script for `table`, with columns in `ordered`.
///
/// `ordered` is the final physical order, including any pinned excluded
/// columns. The output ends with a trailing newline.
pub fn migration_sql(table: &TableInfo, ordered: &[Column]) -> String {
    let qualified = table.qualified_name();
    let staging = format!("{}.{}_migration", table.schema, table.table);
    let column_list = ordered
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut sections: Vec<String> = Vec::new();

    sections.push(format!(
        "-- Rebuild {qualified} with columns reordered\nBEGIN;"
    ));

    sections.push(format!(
        "-- Create new table with data from old one\n\
         CREATE TABLE {staging} AS\n\
         SELECT {column_list}\n\
         FROM {qualified};"
    ));

    let not_nulls: Vec<String> = ordered
        .iter()
        .filter(|c| c.not_null)
        .map(|c| format!("ALTER TABLE {staging}\nALTER COLUMN {} SET NOT NULL;", c.name))
        .collect();
    if !not_nulls.is_empty() {
        sections.push(format!(
            "-- Restore NOT NULL constraints\n{}",
            not_nulls.join("\n")
        ));
    }

    let defaults: Vec<String> = ordered
        .iter()
        .filter_map(|c| {
            c.default.as_ref().map(|expr| {
                format!(
                    "ALTER TABLE {staging}\nALTER COLUMN {} SET DEFAULT {expr};",
                    c.name
                )
            })
        })
        .collect();
    if !defaults.is_empty() {
        sections.push(format!(
            "-- Restore column defaults\n{}",
            defaults.join("\n")
        ));
    }

    if !table.foreign_keys.is_empty() {
        let drops: Vec<String> = table
            .foreign_keys
            .iter()
            .map(|fk| {
                format!(
                    "ALTER TABLE {}.{}\nDROP CONSTRAINT {};",
                    fk.schema, fk.table, fk.constraint
                )
            })
            .collect();
        sections.push(format!(
            "-- Drop foreign keys referencing the old table\n{}",
            drops.join("\n")
        ));
    }

    sections.push(format!("-- Drop the old table\nDROP TABLE {qualified};"));

    sections.push(format!(
        "-- Rename new table\nALTER TABLE {staging} RENAME TO {};",
        table.table
    ));

    if !table.constraints.is_empty() {
        let adds: Vec<String> = table
            .constraints
            .iter()
            .map(|con| {
                format!(
                    "ALTER TABLE {qualified}\nADD CONSTRAINT {} {};",
                    con.name, con.definition
                )
            })
            .collect();
        sections.push(format!("-- Add constraints back\n{}", adds.join("\n")));
    }

    if !table.foreign_keys.is_empty() {
        let adds: Vec<String> = table
            .foreign_keys
            .iter()
            .map(|fk| {
                format!(
                    "ALTER TABLE {}.{}\nADD CONSTRAINT {} {};",
                    fk.schema, fk.table, fk.constraint, fk.definition
                )
            })
            .collect();
        sections.push(format!("-- Add foreign keys back\n{}", adds.join("\n")));
    }

    if !table.indexes.is_empty() {
        let creates: Vec<String> = table
            .indexes
            .iter()
            .map(|ix| format!("{};", ix.definition))
            .collect();
        sections.push(format!("-- Recreate indexes\n{}", creates.join("\n")));
    }

    sections.push("COMMIT;".to_string());

    let mut sql = sections.join("\n\n");
    sql.push('\n');
    sql
}
