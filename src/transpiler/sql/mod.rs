//! Dialect translators.

pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use mysql::MysqlTranslator;
pub use postgres::PostgresTranslator;
pub use sqlite::SqliteTranslator;
