//! Transpiler traits.

use crate::error::SchemerResult;
use crate::migrate::{Column, ColumnType, Index, Table};

/// Trait for dialect-specific SQL primitives.
///
/// The shared builders in [`super::ddl`] compose full statements from these.
pub trait SqlGenerator {
    /// Quote an identifier (table, column or index name).
    fn quote_identifier(&self, name: &str) -> String;
    /// Type text for a column, including size or precision.
    fn column_type(&self, column: &Column) -> String;
    /// Type and key clause for an auto-incrementing primary key of the given type.
    fn auto_increment_key(&self, col_type: &ColumnType) -> String;
    /// Text appended after the closing parenthesis of CREATE TABLE.
    fn create_table_suffix(&self) -> &str {
        ""
    }
}

/// Renders each migration operation as DDL for one dialect.
///
/// Implementations are stateless and shared freely across threads.
pub trait Translator: Send + Sync {
    /// Dialect name, as used in error messages and on the command line.
    fn name(&self) -> &'static str;
    fn create_table(&self, table: &Table) -> SchemerResult<String>;
    fn drop_table(&self, table: &Table) -> SchemerResult<String>;
    /// `tables` must hold exactly the old and the new table.
    fn rename_table(&self, tables: &[Table]) -> SchemerResult<String>;
    fn add_column(&self, table: &str, column: &Column) -> SchemerResult<String>;
    fn drop_column(&self, table: &str, column: &str) -> SchemerResult<String>;
    fn rename_column(&self, table: &str, from: &str, to: &str) -> SchemerResult<String>;
    fn add_index(&self, index: &Index) -> SchemerResult<String>;
    fn drop_index(&self, name: &str) -> SchemerResult<String>;
    fn rename_index(&self, from: &str, to: &str) -> SchemerResult<String>;
}
