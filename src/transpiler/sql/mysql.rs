use crate::ast::Value;
use crate::error::{SchemerError, SchemerResult};
use crate::migrate::{Column, ColumnType, Index, Table};
use crate::transpiler::ddl;
use crate::transpiler::traits::{SqlGenerator, Translator};

/// MySQL translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlTranslator;

impl MysqlTranslator {
    pub fn new() -> Self {
        Self
    }

    /// MySQL accepts no literal DEFAULT on TEXT, BLOB or JSON columns.
    fn check_default(&self, operation: &'static str, column: &Column) -> SchemerResult<()> {
        let literal = matches!(&column.default, Some(v) if *v != Value::Null);
        let unsupported = matches!(
            column.col_type,
            ColumnType::Text | ColumnType::Blob | ColumnType::Json | ColumnType::Jsonb
        );
        if literal && unsupported {
            return Err(SchemerError::translation(
                self.name(),
                operation,
                format!(
                    "{} column '{}' cannot have a literal default",
                    column.col_type, column.name
                ),
            ));
        }
        Ok(())
    }
}

impl SqlGenerator for MysqlTranslator {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name)
    }

    fn column_type(&self, column: &Column) -> String {
        match &column.col_type {
            ColumnType::String => format!("VARCHAR ({})", column.size.unwrap_or(255)),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::Decimal => match (column.precision, column.scale) {
                (Some(p), Some(s)) => format!("DECIMAL ({}, {})", p, s),
                (Some(p), None) => format!("DECIMAL ({})", p),
                _ => "DECIMAL".to_string(),
            },
            ColumnType::Boolean => "BOOL".to_string(),
            ColumnType::Timestamp => "DATETIME".to_string(),
            ColumnType::Timestamptz => "TIMESTAMP".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Uuid => "char(36)".to_string(),
            ColumnType::Json | ColumnType::Jsonb => "JSON".to_string(),
            ColumnType::Blob => "BLOB".to_string(),
            ColumnType::Raw(text) => text.clone(),
        }
    }

    fn auto_increment_key(&self, col_type: &ColumnType) -> String {
        match col_type {
            ColumnType::BigInt => "BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY".to_string(),
            _ => "INTEGER NOT NULL AUTO_INCREMENT PRIMARY KEY".to_string(),
        }
    }

    fn create_table_suffix(&self) -> &str {
        " ENGINE=InnoDB"
    }
}

impl Translator for MysqlTranslator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn create_table(&self, table: &Table) -> SchemerResult<String> {
        for column in &table.columns {
            self.check_default("CreateTable", column)?;
        }
        ddl::build_create_table(self, table)
    }

    fn drop_table(&self, table: &Table) -> SchemerResult<String> {
        ddl::build_drop_table(self, table)
    }

    fn rename_table(&self, tables: &[Table]) -> SchemerResult<String> {
        ddl::build_rename_table(self, tables)
    }

    fn add_column(&self, table: &str, column: &Column) -> SchemerResult<String> {
        self.check_default("AddColumn", column)?;
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

    // MySQL index names are scoped to a table; these operations carry none.
    fn drop_index(&self, _name: &str) -> SchemerResult<String> {
        Err(SchemerError::translation(
            self.name(),
            "DropIndex",
            "MySQL requires the table name to drop an index",
        ))
    }

    fn rename_index(&self, _from: &str, _to: &str) -> SchemerResult<String> {
        Err(SchemerError::translation(
            self.name(),
            "RenameIndex",
            "MySQL requires the table name to rename an index",
        ))
    }
}
