//! Translation engine for schemer.
//!
//! Runs a script end to end: evaluate it, then hand each operation to a
//! [`Translator`] in order. The first failure stops the run and carries the
//! DDL produced up to that point.

use thiserror::Error;

use crate::error::SchemerError;
use crate::eval;
use crate::migrate::Operation;
use crate::transpiler::{ToDdl, Translator};

/// A failed run: the error plus every statement produced before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PartialTranslation {
    /// Statements emitted before the failure, newline-joined. Empty when
    /// the script itself did not evaluate.
    pub sql: String,
    #[source]
    pub error: SchemerError,
}

impl PartialTranslation {
    fn new(statements: &[String], error: SchemerError) -> Self {
        Self {
            sql: statements.join("\n"),
            error,
        }
    }
}

/// Evaluate `script` and translate every operation.
///
/// # Example
///
/// ```
/// use schemer::engine::run;
/// use schemer::transpiler::PostgresTranslator;
///
/// let sql = run(r#"drop_table("users")"#, &PostgresTranslator).unwrap();
/// assert_eq!(sql, r#"DROP TABLE IF EXISTS "users";"#);
/// ```
pub fn run(script: &str, translator: &dyn Translator) -> Result<String, PartialTranslation> {
    let operations = eval::evaluate_str(script).map_err(|e| PartialTranslation::new(&[], e))?;
    translate_operations(&operations, translator)
}

/// Translate already evaluated operations, in order.
pub fn translate_operations(
    operations: &[Operation],
    translator: &dyn Translator,
) -> Result<String, PartialTranslation> {
    let mut statements = Vec::with_capacity(operations.len());
    for op in operations {
        match op.to_ddl(translator) {
            Ok(sql) => {
                tracing::debug!(dialect = translator.name(), op = op.name(), "translated");
                statements.push(sql);
            }
            Err(error) => {
                tracing::debug!(
                    dialect = translator.name(),
                    op = op.name(),
                    done = statements.len(),
                    %error,
                    "translation stopped"
                );
                return Err(PartialTranslation::new(&statements, error));
            }
        }
    }
    Ok(statements.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::{MysqlTranslator, PostgresTranslator};

    #[test]
    fn test_joins_statements() {
        let sql = run(
            r#"drop_table("a")
            drop_index("a_idx")"#,
            &PostgresTranslator,
        )
        .unwrap();
        assert_eq!(sql, "DROP TABLE IF EXISTS \"a\";\nDROP INDEX IF EXISTS \"a_idx\";");
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(run("", &PostgresTranslator).unwrap(), "");
    }

    #[test]
    fn test_partial_output_on_translation_error() {
        let err = run(
            r#"drop_table("a")
            drop_column("b", "c")
            drop_index("b_idx")
            drop_table("never")"#,
            &MysqlTranslator,
        )
        .unwrap_err();
        assert_eq!(
            err.sql,
            "DROP TABLE IF EXISTS `a`;\nALTER TABLE `b` DROP COLUMN `c`;"
        );
        assert!(matches!(err.error, SchemerError::Translation { .. }));
    }

    #[test]
    fn test_evaluation_error_has_no_output() {
        let err = run("drop_table(\"a\")\nexplode()", &PostgresTranslator).unwrap_err();
        assert_eq!(err.sql, "");
        assert!(err.error.is_dsl());
        assert!(err.to_string().starts_with("DSL error in explode (line 2)"));
    }

    #[test]
    fn test_arity_error_from_operations() {
        let ops = vec![Operation::RenameTable { tables: vec![] }];
        let err = translate_operations(&ops, &PostgresTranslator).unwrap_err();
        assert!(matches!(err.error, SchemerError::Arity { received: 0, .. }));
    }
}
