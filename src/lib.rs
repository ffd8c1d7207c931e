//! # schemer: database-agnostic schema migrations
//!
//! Write a migration once in a small script language, render it as DDL for
//! PostgreSQL, MySQL or SQLite.
//!
//! ## Quick Example
//!
//! ```
//! use schemer::transpiler::PostgresTranslator;
//!
//! let sql = schemer::to_sql(
//!     r#"add_index("users", ["first_name", "last_name"], {"unique": true})"#,
//!     &PostgresTranslator,
//! )
//! .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"CREATE UNIQUE INDEX "users_first_name_last_name_idx" ON "users" (first_name, last_name);"#
//! );
//! ```
//!
//! ## Constructs
//!
//! | Call                                   | Effect              |
//! |----------------------------------------|---------------------|
//! | `create_table(name, [opts], func(t))`  | CREATE TABLE        |
//! | `drop_table(name)`                     | DROP TABLE          |
//! | `rename_table(old, new)`               | rename a table      |
//! | `add_column(table, col, type, [opts])` | add a column        |
//! | `drop_column(table, col)`              | drop a column       |
//! | `rename_column(table, old, new)`       | rename a column     |
//! | `add_index(table, cols, [opts])`       | CREATE INDEX        |
//! | `drop_index(name)`                     | DROP INDEX          |
//! | `rename_index(old, new)`               | rename an index     |

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod migrate;
pub mod parser;
pub mod transpiler;

pub mod prelude {
    pub use crate::engine::{PartialTranslation, run, translate_operations};
    pub use crate::error::*;
    pub use crate::eval::{evaluate, evaluate_str};
    pub use crate::migrate::{Column, ColumnType, Index, Operation, Options, Table};
    pub use crate::parser::parse;
    pub use crate::transpiler::{Dialect, ToDdl, Translator};
}

/// Parse a migration script into its syntax tree.
///
/// # Example
///
/// ```
/// let script = schemer::parse(r#"drop_table("users")"#).unwrap();
/// assert_eq!(script.statements.len(), 1);
/// ```
pub fn parse(input: &str) -> error::SchemerResult<ast::Script> {
    parser::parse(input)
}

/// Evaluate and translate a script, discarding any partial output on error.
pub fn to_sql(script: &str, translator: &dyn transpiler::Translator) -> error::SchemerResult<String> {
    engine::run(script, translator).map_err(|partial| partial.error)
}
