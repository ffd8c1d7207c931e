use std::fmt;
use std::str::FromStr;

use crate::error::SchemerError;
use crate::transpiler::sql::{MysqlTranslator, PostgresTranslator, SqliteTranslator};
use crate::transpiler::traits::Translator;

/// Supported SQL Dialects.
///
/// There is no default: callers always pick the target explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySQL,
    SQLite,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Postgres, Dialect::MySQL, Dialect::SQLite];

    pub fn translator(&self) -> Box<dyn Translator> {
        match self {
            Dialect::Postgres => Box::new(PostgresTranslator),
            Dialect::MySQL => Box::new(MysqlTranslator),
            Dialect::SQLite => Box::new(SqliteTranslator),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = SchemerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySQL),
            "sqlite" | "sqlite3" => Ok(Dialect::SQLite),
            _ => Err(SchemerError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("sqlite3".parse::<Dialect>().unwrap(), Dialect::SQLite);
        assert!(matches!(
            "oracle".parse::<Dialect>(),
            Err(SchemerError::UnknownDialect(name)) if name == "oracle"
        ));
    }

    #[test]
    fn test_translator_names_match() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.translator().name(), dialect.name());
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
        }
    }
}
