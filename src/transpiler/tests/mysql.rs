//! MySQL DDL tests.

use pretty_assertions::assert_eq;

use super::{USERS, ddl};
use crate::error::SchemerError;
use crate::eval::evaluate_str;
use crate::transpiler::{MysqlTranslator, ToDdl, Translator};

const MY: MysqlTranslator = MysqlTranslator;

#[test]
fn test_create_table() {
    let expected = "CREATE TABLE IF NOT EXISTS `users` (
`id` INTEGER NOT NULL AUTO_INCREMENT PRIMARY KEY,
`created_at` DATETIME NOT NULL,
`updated_at` DATETIME NOT NULL,
`first_name` VARCHAR (255) NOT NULL,
`last_name` VARCHAR (255) NOT NULL,
`email` VARCHAR (20) NOT NULL,
`permissions` JSON,
`age` INTEGER DEFAULT '40'
) ENGINE=InnoDB;";
    assert_eq!(ddl(&MY, USERS), expected);
}

#[test]
fn test_type_mapping() {
    let script = r#"create_table("things", {"timestamps": false}, func(t) {
        t.Column("id", "uuid", {"primary": true})
        t.Column("active", "bool", {"default": true})
        t.Column("seen_at", "timestamptz", {"null": true})
        t.Column("amount", "decimal", {"precision": 8})
        t.Column("body", "blob", {"null": true})
    })"#;
    let expected = "CREATE TABLE IF NOT EXISTS `things` (
`id` char(36) PRIMARY KEY,
`active` BOOL NOT NULL DEFAULT 'true',
`seen_at` TIMESTAMP,
`amount` DECIMAL (8) NOT NULL,
`body` BLOB
) ENGINE=InnoDB;";
    assert_eq!(ddl(&MY, script), expected);
}

#[test]
fn test_alter_statements() {
    let script = r#"
    rename_table("users", "people")
    add_column("people", "nickname", "string", {"size": 40, "null": true})
    drop_column("people", "age")
    rename_column("people", "email", "mail")
    add_index("people", ["first_name", "last_name"], {"unique": true})
    drop_table("people")
    "#;
    let expected = "ALTER TABLE `users` RENAME TO `people`;
ALTER TABLE `people` ADD COLUMN `nickname` VARCHAR (40);
ALTER TABLE `people` DROP COLUMN `age`;
ALTER TABLE `people` RENAME COLUMN `email` TO `mail`;
CREATE UNIQUE INDEX `people_first_name_last_name_idx` ON `people` (first_name, last_name);
DROP TABLE IF EXISTS `people`;";
    assert_eq!(ddl(&MY, script), expected);
}

#[test]
fn test_index_operations_need_table() {
    let err = MY.drop_index("my_idx").unwrap_err();
    assert!(matches!(
        err,
        SchemerError::Translation {
            dialect: "mysql",
            operation: "DropIndex",
            ..
        }
    ));
    let err = MY.rename_index("old_ix", "new_ix").unwrap_err();
    assert!(matches!(
        err,
        SchemerError::Translation {
            operation: "RenameIndex",
            ..
        }
    ));
}

#[test]
fn test_literal_default_on_text_columns() {
    let err = evaluate_str(r#"add_column("posts", "body", "text", {"default": "none"})"#)
        .unwrap()
        .remove(0)
        .to_ddl(&MY)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "mysql cannot translate AddColumn: text column 'body' cannot have a literal default"
    );

    let err = evaluate_str(
        r#"create_table("posts", func(t) {
            t.Column("meta", "json", {"default": "{}"})
        })"#,
    )
    .unwrap()
    .remove(0)
    .to_ddl(&MY)
    .unwrap_err();
    assert!(matches!(
        err,
        SchemerError::Translation {
            operation: "CreateTable",
            ..
        }
    ));

    assert_eq!(
        ddl(
            &MY,
            r#"add_column("posts", "body", "text", {"null": true, "default": null})"#
        ),
        "ALTER TABLE `posts` ADD COLUMN `body` TEXT DEFAULT NULL;"
    );
}

