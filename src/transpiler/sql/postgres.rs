use crate::error::SchemerResult;
use crate::migrate::{Column, ColumnType, Index, Table};
use crate::transpiler::ddl;
use crate::transpiler::traits::{SqlGenerator, Translator};

/// PostgreSQL translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresTranslator;

impl PostgresTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlGenerator for PostgresTranslator {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name)
    }

    fn column_type(&self, column: &Column) -> String {
        match &column.col_type {
            ColumnType::String => format!("VARCHAR ({})", column.size.unwrap_or(255)),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Integer => "integer".to_string(),
            ColumnType::BigInt => "bigint".to_string(),
            ColumnType::Float => "float".to_string(),
            ColumnType::Decimal => match (column.precision, column.scale) {
                (Some(p), Some(s)) => format!("decimal ({}, {})", p, s),
                (Some(p), None) => format!("decimal ({})", p),
                _ => "decimal".to_string(),
            },
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Timestamp => "timestamp".to_string(),
            ColumnType::Timestamptz => "timestamptz".to_string(),
            ColumnType::Date => "date".to_string(),
            ColumnType::Uuid => "UUID".to_string(),
            ColumnType::Json => "json".to_string(),
            ColumnType::Jsonb => "jsonb".to_string(),
            ColumnType::Blob => "bytea".to_string(),
            ColumnType::Raw(text) => text.clone(),
        }
    }

    fn auto_increment_key(&self, col_type: &ColumnType) -> String {
        match col_type {
            ColumnType::BigInt => "BIGSERIAL PRIMARY KEY".to_string(),
            _ => "SERIAL PRIMARY KEY".to_string(),
        }
    }
}

impl Translator for PostgresTranslator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn create_table(&self, table: &Table) -> SchemerResult<String> {
        ddl::build_create_table(self, table)
    }

    fn drop_table(&self, table: &Table) -> SchemerResult<String> {
        ddl::build_drop_table(self, table)
    }

    fn rename_table(&self, tables: &[Table]) -> SchemerResult<String> {
        ddl::build_rename_table(self, tables)
    }

    fn add_column(&self, table: &str, column: &Column) -> SchemerResult<String> {
        ddl::build_add_column(self, table, column)
    }

    fn drop_column(&self, table: &str, column: &str) -> SchemerResult<String> {
        ddl::build_drop_column(self, table, column)
    }

    fn rename_column(&self, table: &str, from: &str, to: &str) -> SchemerResult<String> {
        ddl::build_rename_column(self, table, from, to)
    }

    fn add_index(&self, index: &Index) -> SchemerResult<String> {
        ddl::build_create_index(self, index)
    }

    fn drop_index(&self, name: &str) -> SchemerResult<String> {
        ddl::build_drop_index(self, name)
    }

    fn rename_index(&self, from: &str, to: &str) -> SchemerResult<String> {
        ddl::build_rename_index(self, from, to)
    }
}
