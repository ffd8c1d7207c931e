//! Shared DDL builders.
//!
//! Statement shapes common to every dialect; the dialect only supplies
//! quoting, type text and the primary-key form through [`SqlGenerator`].

use super::traits::SqlGenerator;
use crate::ast::Value;
use crate::error::{SchemerError, SchemerResult};
use crate::migrate::{Column, Index, Table, require_identifier};

/// Render a default literal: always single-quoted, `NULL` for null.
pub fn format_default(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        other => format!("'{}'", other.literal_text().replace('\'', "''")),
    }
}

/// `"name" TYPE[ NOT NULL][ DEFAULT 'v']`, or the primary-key form.
pub fn column_definition<G: SqlGenerator + ?Sized>(generator: &G, column: &Column) -> String {
    let name = generator.quote_identifier(&column.name);
    if column.primary && column.col_type.is_auto_increment_candidate() {
        return format!("{} {}", name, generator.auto_increment_key(&column.col_type));
    }

    let mut line = format!("{} {}", name, generator.column_type(column));
    if column.primary {
        line.push_str(" PRIMARY KEY");
    } else if !column.nullable {
        line.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        line.push_str(" DEFAULT ");
        line.push_str(&format_default(default));
    }
    line
}

/// Generate CREATE TABLE SQL, followed by one CREATE INDEX per table index.
pub fn build_create_table<G: SqlGenerator + ?Sized>(
    generator: &G,
    table: &Table,
) -> SchemerResult<String> {
    require_identifier("table.name", &table.name)?;
    for column in &table.columns {
        require_identifier("column.name", &column.name)?;
        column.check()?;
    }
    let keys: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.primary)
        .map(|c| c.name.as_str())
        .collect();
    if keys.len() > 1 {
        return Err(SchemerError::validation(
            table.name.clone(),
            format!("more than one primary key column: {}", keys.join(", ")),
        ));
    }

    let defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| column_definition(generator, c))
        .collect();

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n){};",
        generator.quote_identifier(&table.name),
        defs.join(",\n"),
        generator.create_table_suffix()
    );
    for index in &table.indexes {
        sql.push('\n');
        sql.push_str(&build_create_index(generator, index)?);
    }
    Ok(sql)
}

pub fn build_drop_table<G: SqlGenerator + ?Sized>(
    generator: &G,
    table: &Table,
) -> SchemerResult<String> {
    require_identifier("table.name", &table.name)?;
    Ok(format!(
        "DROP TABLE IF EXISTS {};",
        generator.quote_identifier(&table.name)
    ))
}

/// `tables` is `[old, new]`; any other count is an arity error.
pub fn build_rename_table<G: SqlGenerator + ?Sized>(
    generator: &G,
    tables: &[Table],
) -> SchemerResult<String> {
    let [from, to] = tables else {
        return Err(SchemerError::Arity {
            operation: "RenameTable",
            expected: 2,
            received: tables.len(),
        });
    };
    require_identifier("table.from", &from.name)?;
    require_identifier("table.to", &to.name)?;
    Ok(format!(
        "ALTER TABLE {} RENAME TO {};",
        generator.quote_identifier(&from.name),
        generator.quote_identifier(&to.name)
    ))
}

pub fn build_add_column<G: SqlGenerator + ?Sized>(
    generator: &G,
    table: &str,
    column: &Column,
) -> SchemerResult<String> {
    require_identifier("table.name", table)?;
    require_identifier("column.name", &column.name)?;
    column.check()?;
    Ok(format!(
        "ALTER TABLE {} ADD COLUMN {};",
        generator.quote_identifier(table),
        column_definition(generator, column)
    ))
}

pub fn build_drop_column<G: SqlGenerator + ?Sized>(
    generator: &G,
    table: &str,
    column: &str,
) -> SchemerResult<String> {
    require_identifier("table.name", table)?;
    require_identifier("column.name", column)?;
    Ok(format!(
        "ALTER TABLE {} DROP COLUMN {};",
        generator.quote_identifier(table),
        generator.quote_identifier(column)
    ))
}

pub fn build_rename_column<G: SqlGenerator + ?Sized>(
    generator: &G,
    table: &str,
    from: &str,
    to: &str,
) -> SchemerResult<String> {
    require_identifier("table.name", table)?;
    require_identifier("column.from", from)?;
    require_identifier("column.to", to)?;
    Ok(format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {};",
        generator.quote_identifier(table),
        generator.quote_identifier(from),
        generator.quote_identifier(to)
    ))
}

/// Generate CREATE INDEX SQL. The column list is left unquoted.
pub fn build_create_index<G: SqlGenerator + ?Sized>(
    generator: &G,
    index: &Index,
) -> SchemerResult<String> {
    if index.columns.is_empty() {
        return Err(SchemerError::validation(
            format!("index.{}", index.name),
            "at least one column is required",
        ));
    }
    require_identifier("index.name", &index.name)?;
    require_identifier("index.table", &index.table)?;

    let unique = if index.unique { "UNIQUE " } else { "" };
    Ok(format!(
        "CREATE {}INDEX {} ON {} ({});",
        unique,
        generator.quote_identifier(&index.name),
        generator.quote_identifier(&index.table),
        index.columns.join(", ")
    ))
}

pub fn build_drop_index<G: SqlGenerator + ?Sized>(
    generator: &G,
    name: &str,
) -> SchemerResult<String> {
    require_identifier("index.name", name)?;
    Ok(format!(
        "DROP INDEX IF EXISTS {};",
        generator.quote_identifier(name)
    ))
}

pub fn build_rename_index<G: SqlGenerator + ?Sized>(
    generator: &G,
    from: &str,
    to: &str,
) -> SchemerResult<String> {
    require_identifier("index.from", from)?;
    require_identifier("index.to", to)?;
    Ok(format!(
        "ALTER INDEX {} RENAME TO {};",
        generator.quote_identifier(from),
        generator.quote_identifier(to)
    ))
}
