use crate::ast::Value;
use crate::error::{SchemerError, SchemerResult};
use crate::migrate::{Column, ColumnType, Index, Table};
use crate::transpiler::ddl;
use crate::transpiler::traits::{SqlGenerator, Translator};

/// SQLite translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteTranslator;

impl SqliteTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlGenerator for SqliteTranslator {
    fn quote_identifier(&self, id: &str) -> String {
        format!("\"{}\"", id)
    }

    // SQLite type affinity: sizes and precision are not enforced.
    fn column_type(&self, column: &Column) -> String {
        match &column.col_type {
            ColumnType::String | ColumnType::Text => "TEXT".to_string(),
            ColumnType::Integer | ColumnType::BigInt => "INTEGER".to_string(),
            ColumnType::Float => "REAL".to_string(),
            ColumnType::Decimal => "NUMERIC".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Timestamp | ColumnType::Timestamptz => "DATETIME".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Uuid | ColumnType::Json | ColumnType::Jsonb => "TEXT".to_string(),
            ColumnType::Blob => "BLOB".to_string(),
            ColumnType::Raw(text) => text.clone(),
        }
    }

    fn auto_increment_key(&self, _col_type: &ColumnType) -> String {
        "INTEGER PRIMARY KEY AUTOINCREMENT".to_string()
    }
}

impl Translator for SqliteTranslator {
    fn name(&self) -> &'static str {
        "sqlite"
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
        if column.primary {
            return Err(SchemerError::translation(
                self.name(),
                "AddColumn",
                format!("cannot add PRIMARY KEY column '{}' to an existing table", column.name),
            ));
        }
        if !column.nullable && matches!(column.default, None | Some(Value::Null)) {
            return Err(SchemerError::translation(
                self.name(),
                "AddColumn",
                format!("NOT NULL column '{}' needs a default value", column.name),
            ));
        }
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

    fn rename_index(&self, _from: &str, _to: &str) -> SchemerResult<String> {
        Err(SchemerError::translation(
            self.name(),
            "RenameIndex",
            "SQLite has no index rename; drop and recreate the index",
        ))
    }
}
