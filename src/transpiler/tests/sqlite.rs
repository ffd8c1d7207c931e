//! SQLite DDL tests.

use pretty_assertions::assert_eq;

use super::{USERS, ddl};
use crate::ast::Value;
use crate::error::SchemerError;
use crate::migrate::{Column, ColumnType};
use crate::transpiler::{SqliteTranslator, Translator};

const LITE: SqliteTranslator = SqliteTranslator;

#[test]
fn test_create_table() {
    let expected = r#"CREATE TABLE IF NOT EXISTS "users" (
"id" INTEGER PRIMARY KEY AUTOINCREMENT,
"created_at" DATETIME NOT NULL,
"updated_at" DATETIME NOT NULL,
"first_name" TEXT NOT NULL,
"last_name" TEXT NOT NULL,
"email" TEXT NOT NULL,
"permissions" TEXT,
"age" INTEGER DEFAULT '40'
);"#;
    assert_eq!(ddl(&LITE, USERS), expected);
}

#[test]
fn test_index_statements() {
    let script = r#"
    add_index("users", "email", {"unique": true})
    drop_index("users_email_idx")
    "#;
    let expected = r#"CREATE UNIQUE INDEX "users_email_idx" ON "users" (email);
DROP INDEX IF EXISTS "users_email_idx";"#;
    assert_eq!(ddl(&LITE, script), expected);
}

#[test]
fn test_add_column_with_default() {
    assert_eq!(
        ddl(
            &LITE,
            r#"add_column("users", "score", "float", {"default": 1.5})"#
        ),
        r#"ALTER TABLE "users" ADD COLUMN "score" REAL NOT NULL DEFAULT '1.5';"#
    );
}

#[test]
fn test_add_not_null_column_without_default() {
    let column = Column::build("score", ColumnType::Float);
    let err = LITE.add_column("users", &column).unwrap_err();
    assert!(matches!(
        err,
        SchemerError::Translation {
            dialect: "sqlite",
            operation: "AddColumn",
            ..
        }
    ));
    assert!(LITE.add_column("users", &column.nullable()).is_ok());
}

#[test]
fn test_add_primary_key_column() {
    let column = Column::build("id", ColumnType::Integer).primary_key();
    assert!(LITE.add_column("users", &column).is_err());
}

#[test]
fn test_rename_index_unsupported() {
    let err = LITE.rename_index("old_ix", "new_ix").unwrap_err();
    assert_eq!(
        err.to_string(),
        "sqlite cannot translate RenameIndex: SQLite has no index rename; drop and recreate the index"
    );
}

#[test]
fn test_add_not_null_column_with_null_default() {
    let column = Column::build("score", ColumnType::Float).default_value(Value::Null);
    let err = LITE.add_column("users", &column).unwrap_err();
    assert!(matches!(
        err,
        SchemerError::Translation {
            operation: "AddColumn",
            ..
        }
    ));
}

