//! Schema-change operations recorded by the evaluator.

use serde::Serialize;

use super::schema::{Column, Index, Table};

/// One schema change, in dialect-neutral form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateTable(Table),
    DropTable(Table),
    /// Old and new table, in that order.
    RenameTable { tables: Vec<Table> },
    AddColumn { table: String, column: Column },
    DropColumn { table: String, column: String },
    RenameColumn { table: String, from: String, to: String },
    AddIndex(Index),
    DropIndex { name: String },
    RenameIndex { from: String, to: String },
}

impl Operation {
    /// Name of the operation, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTable(_) => "CreateTable",
            Operation::DropTable(_) => "DropTable",
            Operation::RenameTable { .. } => "RenameTable",
            Operation::AddColumn { .. } => "AddColumn",
            Operation::DropColumn { .. } => "DropColumn",
            Operation::RenameColumn { .. } => "RenameColumn",
            Operation::AddIndex(_) => "AddIndex",
            Operation::DropIndex { .. } => "DropIndex",
            Operation::RenameIndex { .. } => "RenameIndex",
        }
    }

    /// One-line human description, used by `explain`.
    pub fn summary(&self) -> String {
        match self {
            Operation::CreateTable(t) => format!(
                "create table {} ({} columns, {} indexes)",
                t.name,
                t.columns.len(),
                t.indexes.len()
            ),
            Operation::DropTable(t) => format!("drop table {}", t.name),
            Operation::RenameTable { tables } => match tables.as_slice() {
                [from, to] => format!("rename table {} to {}", from.name, to.name),
                other => format!("rename table ({} tables)", other.len()),
            },
            Operation::AddColumn { table, column } => {
                format!("add column {}.{} ({})", table, column.name, column.col_type)
            }
            Operation::DropColumn { table, column } => {
                format!("drop column {}.{}", table, column)
            }
            Operation::RenameColumn { table, from, to } => {
                format!("rename column {}.{} to {}", table, from, to)
            }
            Operation::AddIndex(idx) => format!(
                "add {}index {} on {} ({})",
                if idx.unique { "unique " } else { "" },
                idx.name,
                idx.table,
                idx.columns.join(", ")
            ),
            Operation::DropIndex { name } => format!("drop index {}", name),
            Operation::RenameIndex { from, to } => format!("rename index {} to {}", from, to),
        }
    }
}
