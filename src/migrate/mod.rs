//! Schemer Migration Model
//!
//! Dialect-neutral description of schema changes.
//!
//! ## Key Types
//! - [`Table`], [`Column`], [`Index`]: validated schema objects
//! - [`Options`]: the raw option map a script attaches to them
//! - [`Operation`]: one recorded schema change
//!
//! ## Example
//! ```
//! use schemer::migrate::{Column, ColumnType, Table};
//!
//! let mut users = Table::new("users").unwrap();
//! users.add_column(Column::build("email", ColumnType::String).size(20)).unwrap();
//! assert_eq!(users.columns.len(), 1);
//! ```

pub mod operation;
pub mod options;
pub mod schema;
pub mod types;

pub use operation::Operation;
pub use options::Options;
pub use schema::{COLUMN_OPTIONS, Column, INDEX_OPTIONS, Index, TABLE_OPTIONS, Table, require_identifier};
pub use types::ColumnType;
