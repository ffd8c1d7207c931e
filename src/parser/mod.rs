//! Migration script parser using nom.
//!
//! Parses script text into the syntax tree in [`crate::ast`].
//!
//! # Syntax Overview
//!
//! ```text
//! create_table("users", func(t) {
//! ─────┬────── ───┬───  ────┬───
//!      │          │         └── Block: receives the table builder
//!      │          └── Literal arguments (string, number, bool, array, object)
//!      └── Construct name
//!     t.Column("email", "string", {"size": 20})
//! })
//! ```

pub mod grammar;
pub mod tokens;

use nom::error::{VerboseError, VerboseErrorKind};

use crate::ast::Script;
use crate::error::{SchemerError, SchemerResult};
use grammar::Grammar;

/// Parse a complete migration script.
pub fn parse(source: &str) -> SchemerResult<Script> {
    let grammar = Grammar::new(source);

    match grammar.script(source) {
        Ok((_, parsed)) => {
            tracing::trace!(statements = parsed.len(), "parsed migration script");
            let (lines, statements) = parsed.into_iter().unzip();
            Ok(Script { statements, lines })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(source, &e)),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error_at(
            source,
            source.len(),
            "unexpected end of script".to_string(),
        )),
    }
}

/// Convert nom's error trace into a positioned syntax error.
///
/// The innermost context wins; without one the deepest error names what was expected.
fn syntax_error(source: &str, e: &VerboseError<&str>) -> SchemerError {
    let context = e.errors.iter().find_map(|(input, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some((*input, ctx.to_string())),
        _ => None,
    });

    let (input, expected) = match context {
        Some(found) => found,
        None => match e.errors.first() {
            Some((input, VerboseErrorKind::Char(c))) => (*input, format!("expected '{}'", c)),
            Some((input, _)) => (*input, "unexpected input".to_string()),
            None => (source, "unexpected input".to_string()),
        },
    };

    let message = format!("{}, found {}", expected, describe(input));
    syntax_error_at(source, source.len() - input.len(), message)
}

fn syntax_error_at(source: &str, offset: usize, message: String) -> SchemerError {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before, |nl| &before[nl + 1..])
        .chars()
        .count()
        + 1;
    SchemerError::Syntax {
        line,
        column,
        message,
    }
}

/// Describe what the parser ran into: a quoted snippet or end of script.
fn describe(input: &str) -> String {
    let snippet: String = input
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(12)
        .collect();
    if snippet.is_empty() {
        if input.is_empty() {
            "end of script".to_string()
        } else {
            "end of line".to_string()
        }
    } else {
        format!("'{}'", snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Value};

    #[test]
    fn test_parse_multiple_statements() {
        let script = parse(
            r#"
            // drop the old table first
            drop_table("people");
            rename_table("users", "people")
            add_index("people", "email", {"unique": true})
            "#,
        )
        .unwrap();
        assert_eq!(script.statements.len(), 3);
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse("  \n // nothing here\n").unwrap().statements.is_empty());
    }

    #[test]
    fn test_create_table_block() {
        let script = parse(
            r#"create_table("users", func(t) {
                t.Column("email", "string", {"size": 20})
            })"#,
        )
        .unwrap();
        let Expr::Call(call) = &script.statements[0] else {
            panic!("expected call");
        };
        assert_eq!(call.args[0], Expr::Literal(Value::String("users".into())));
        assert!(matches!(&call.args[1], Expr::Func(f) if f.body.len() == 1));
    }

    #[test]
    fn test_missing_paren_position() {
        let err = parse("drop_table(\"users\"\n").unwrap_err();
        match err {
            SchemerError::Syntax { line, message, .. } => {
                assert_eq!(line, 2);
                assert_eq!(message, "expected ',' or ')', found end of script");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("drop_table(\"users)").unwrap_err();
        match err {
            SchemerError::Syntax {
                line,
                column,
                message,
            } => {
                assert_eq!((line, column), (1, 12));
                assert!(message.starts_with("unterminated string literal"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_statement() {
        let err = parse("drop_table(\"a\")\n  )").unwrap_err();
        match err {
            SchemerError::Syntax {
                line,
                column,
                message,
            } => {
                assert_eq!((line, column), (2, 3));
                assert_eq!(message, "expected a statement, found ')'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_block_brace() {
        let err = parse("create_table(\"users\", func(t) t.Column(\"a\", \"text\"))").unwrap_err();
        assert!(err.to_string().contains("expected '{' to open the block"));
    }

    #[test]
    fn test_deep_nesting_is_a_syntax_error() {
        let depth = 5000;
        let src = format!("drop_table({}\"x\"{})", "[".repeat(depth), "]".repeat(depth));
        match parse(&src).unwrap_err() {
            SchemerError::Syntax { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.starts_with("nesting too deep"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
