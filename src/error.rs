//! Error types for schemer.

use thiserror::Error;

/// The main error type for schemer operations.
#[derive(Debug, Error)]
pub enum SchemerError {
    /// The script text does not follow the DSL grammar.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A well-formed call that does not match any construct or its argument shapes.
    #[error("DSL error in {construct} (line {line}): {message}")]
    Dsl {
        construct: String,
        line: usize,
        message: String,
    },

    /// A semantically invalid table, column or index.
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// An operation received the wrong number of values.
    #[error("{operation} expects exactly {expected} values, got {received}")]
    Arity {
        operation: &'static str,
        expected: usize,
        received: usize,
    },

    /// The dialect has no rendering for this operation.
    #[error("{dialect} cannot translate {operation}: {message}")]
    Translation {
        dialect: &'static str,
        operation: &'static str,
        message: String,
    },

    /// Dialect name not recognized.
    #[error("Unknown dialect: '{0}'. Expected: postgres, mysql, or sqlite")]
    UnknownDialect(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchemerError {
    /// Create a DSL error for the given construct.
    pub fn dsl(construct: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Dsl {
            construct: construct.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a validation error naming the offending field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a translation error for a dialect gap.
    pub fn translation(
        dialect: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Translation {
            dialect,
            operation,
            message: message.into(),
        }
    }

    /// True for errors caused by the script itself (syntax or construct misuse).
    pub fn is_dsl(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Dsl { .. })
    }
}

/// Result type alias for schemer operations.
pub type SchemerResult<T> = Result<T, SchemerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemerError::Syntax {
            line: 2,
            column: 7,
            message: "expected ')'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at line 2, column 7: expected ')'"
        );
    }

    #[test]
    fn test_arity_display() {
        let err = SchemerError::Arity {
            operation: "RenameTable",
            expected: 2,
            received: 0,
        };
        assert_eq!(err.to_string(), "RenameTable expects exactly 2 values, got 0");
    }

    #[test]
    fn test_dsl_classification() {
        assert!(SchemerError::dsl("drop_table", 1, "bad").is_dsl());
        assert!(!SchemerError::validation("name", "empty").is_dsl());
        assert!(!SchemerError::translation("mysql", "DropIndex", "no table").is_dsl());
    }
}
