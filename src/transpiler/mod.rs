//! DDL Transpiler for migration operations.
//!
//! Converts evaluated [`Operation`]s into dialect-specific DDL strings.

pub mod ddl;
pub mod dialect;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::error::SchemerResult;
use crate::migrate::Operation;
pub use dialect::Dialect;
pub use sql::{MysqlTranslator, PostgresTranslator, SqliteTranslator};
pub use traits::{SqlGenerator, Translator};

/// Trait for converting operations to DDL.
pub trait ToDdl {
    /// Render with the given translator.
    fn to_ddl(&self, translator: &dyn Translator) -> SchemerResult<String>;
}

impl ToDdl for Operation {
    fn to_ddl(&self, translator: &dyn Translator) -> SchemerResult<String> {
        match self {
            Operation::CreateTable(table) => translator.create_table(table),
            Operation::DropTable(table) => translator.drop_table(table),
            Operation::RenameTable { tables } => translator.rename_table(tables),
            Operation::AddColumn { table, column } => translator.add_column(table, column),
            Operation::DropColumn { table, column } => translator.drop_column(table, column),
            Operation::RenameColumn { table, from, to } => {
                translator.rename_column(table, from, to)
            }
            Operation::AddIndex(index) => translator.add_index(index),
            Operation::DropIndex { name } => translator.drop_index(name),
            Operation::RenameIndex { from, to } => translator.rename_index(from, to),
        }
    }
}
