//! Tables, columns and indexes.
//!
//! Values are built once while evaluating a script and handed to a
//! translator; constructors validate and normalize their options.

use serde::Serialize;

use super::options::Options;
use super::types::ColumnType;
use crate::ast::Value;
use crate::error::{SchemerError, SchemerResult};

/// Option keys accepted on a column.
pub const COLUMN_OPTIONS: &[&str] = &[
    "null",
    "default",
    "size",
    "limit",
    "primary",
    "raw",
    "precision",
    "scale",
];

/// Option keys accepted on an index.
pub const INDEX_OPTIONS: &[&str] = &["unique", "name"];

/// Option keys accepted on `create_table`.
pub const TABLE_OPTIONS: &[&str] = &["timestamps"];

/// Fail with a validation error if an identifier is empty.
pub fn require_identifier(field: &str, value: &str) -> SchemerResult<()> {
    if value.is_empty() {
        return Err(SchemerError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub options: Options,
}

/// A column definition with normalized options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub col_type: ColumnType,
    /// `false` renders NOT NULL.
    pub nullable: bool,
    pub default: Option<Value>,
    /// Length for `string` columns.
    pub size: Option<u32>,
    /// Precision and scale for `decimal` columns.
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub primary: bool,
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Index {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> SchemerResult<Self> {
        let name = name.into();
        require_identifier("table.name", &name)?;
        Ok(Self {
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
            options: Options::new(),
        })
    }

    /// Create an empty table carrying `create_table` options.
    pub fn with_options(name: impl Into<String>, options: Options) -> SchemerResult<Self> {
        let mut table = Self::new(name)?;
        options.ensure_known(&table.name, TABLE_OPTIONS)?;
        options.bool(&table.name, "timestamps")?;
        table.options = options;
        Ok(table)
    }

    /// Whether `created_at`/`updated_at` should be added. On unless disabled.
    pub fn timestamps(&self) -> bool {
        self.options
            .get("timestamps")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary)
    }

    /// Append a column; names must be unique and only one column may be the primary key.
    pub fn add_column(&mut self, column: Column) -> SchemerResult<()> {
        if self.column(&column.name).is_some() {
            return Err(SchemerError::validation(
                format!("{}.{}", self.name, column.name),
                "duplicate column name",
            ));
        }
        if let Some(key) = self.primary_key().filter(|_| column.primary) {
            return Err(SchemerError::validation(
                self.name.clone(),
                format!(
                    "more than one primary key column: '{}' and '{}'",
                    key.name, column.name
                ),
            ));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append an index over columns of this table.
    pub fn add_index(&mut self, index: Index) -> SchemerResult<()> {
        if index.table != self.name {
            return Err(SchemerError::validation(
                format!("index.{}", index.name),
                format!("belongs to '{}', not '{}'", index.table, self.name),
            ));
        }
        if let Some(missing) = index.columns.iter().find(|c| self.column(c).is_none()) {
            return Err(SchemerError::validation(
                format!("index.{}", index.name),
                format!("unknown column '{}'", missing),
            ));
        }
        self.indexes.push(index);
        Ok(())
    }
}

impl Column {
    /// Build a column from a DSL type name and options.
    ///
    /// Unknown type names fail unless the options carry `"raw": true`.
    pub fn new(name: impl Into<String>, col_type: &str, options: &Options) -> SchemerResult<Self> {
        let name = name.into();
        require_identifier("column.name", &name)?;
        options.ensure_known(&name, COLUMN_OPTIONS)?;

        let col_type = if options.bool(&name, "raw")?.unwrap_or(false) {
            require_identifier(&format!("{}.type", name), col_type)?;
            ColumnType::Raw(col_type.to_string())
        } else {
            ColumnType::from_name(col_type).ok_or_else(|| {
                SchemerError::validation(
                    format!("{}.type", name),
                    format!(
                        "unknown column type '{}'; pass {{\"raw\": true}} to use it verbatim",
                        col_type
                    ),
                )
            })?
        };

        let size = match (
            options.positive_int(&name, "size")?,
            options.positive_int(&name, "limit")?,
        ) {
            (Some(size), Some(limit)) if size != limit => {
                return Err(SchemerError::validation(
                    format!("{}.size", name),
                    format!("size {} conflicts with limit {}", size, limit),
                ));
            }
            (size, limit) => size.or(limit),
        };
        if size.is_some() && col_type != ColumnType::String {
            return Err(SchemerError::validation(
                format!("{}.size", name),
                format!("size only applies to string columns, not {}", col_type),
            ));
        }

        let precision = options.positive_int(&name, "precision")?;
        let scale = options.non_negative_int(&name, "scale")?;
        if (precision.is_some() || scale.is_some()) && col_type != ColumnType::Decimal {
            return Err(SchemerError::validation(
                format!("{}.precision", name),
                format!("precision and scale only apply to decimal columns, not {}", col_type),
            ));
        }
        match (precision, scale) {
            (None, Some(_)) => {
                return Err(SchemerError::validation(
                    format!("{}.scale", name),
                    "scale requires precision",
                ));
            }
            (Some(p), Some(s)) if s > p => {
                return Err(SchemerError::validation(
                    format!("{}.scale", name),
                    format!("scale {} exceeds precision {}", s, p),
                ));
            }
            _ => {}
        }

        let nullable = options.bool(&name, "null")?.unwrap_or(false);
        let primary = options.bool(&name, "primary")?.unwrap_or(false);
        if primary && nullable {
            return Err(SchemerError::validation(
                format!("{}.null", name),
                "a primary key column cannot be nullable",
            ));
        }

        let default = match options.get("default") {
            Some(value) => Some(check_default(&name, &col_type, value)?),
            None => None,
        };

        let column = Self {
            name,
            col_type,
            nullable,
            default,
            size,
            precision,
            scale,
            primary,
        };
        column.check()?;
        Ok(column)
    }

    /// Reject option combinations no dialect can render faithfully.
    pub fn check(&self) -> SchemerResult<()> {
        match &self.default {
            Some(_) if self.primary && self.col_type.is_auto_increment_candidate() => {
                Err(SchemerError::validation(
                    format!("{}.default", self.name),
                    "an auto-increment primary key cannot have a default",
                ))
            }
            Some(Value::Null) if !self.nullable => Err(SchemerError::validation(
                format!("{}.default", self.name),
                "null default on a NOT NULL column; add {\"null\": true}",
            )),
            _ => Ok(()),
        }
    }

    /// Start a NOT NULL column of a known type, for programmatic construction.
    pub fn build(name: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
            nullable: false,
            default: None,
            size: None,
            precision: None,
            scale: None,
            primary: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Check a default literal against the column type.
fn check_default(column: &str, col_type: &ColumnType, value: &Value) -> SchemerResult<Value> {
    let field = format!("{}.default", column);
    let mismatch = |expected: &str| {
        SchemerError::validation(
            field.clone(),
            format!(
                "expected {} for a {} column, got {}",
                expected,
                col_type,
                value.shape()
            ),
        )
    };

    if !value.is_scalar() {
        return Err(mismatch("a scalar literal"));
    }
    match (col_type, value) {
        (_, Value::Null) => {}
        (t, Value::Int(_) | Value::Float(_)) if t.is_numeric() => {}
        (t, Value::String(s)) if t.is_numeric() => {
            if s.trim().parse::<f64>().is_err() {
                return Err(SchemerError::validation(
                    format!("{}.default", column),
                    format!("'{}' is not a number", s),
                ));
            }
        }
        (t, _) if t.is_numeric() => return Err(mismatch("a number")),
        (ColumnType::Boolean, Value::Bool(_)) => {}
        (ColumnType::Boolean, Value::String(s)) if s == "true" || s == "false" => {}
        (ColumnType::Boolean, _) => return Err(mismatch("a boolean")),
        _ => {}
    }
    Ok(value.clone())
}

impl Index {
    /// Build an index; the name defaults to `<table>_<col1>_..._<colN>_idx`.
    pub fn new(
        table: impl Into<String>,
        columns: Vec<String>,
        options: &Options,
    ) -> SchemerResult<Self> {
        let table = table.into();
        require_identifier("index.table", &table)?;
        if columns.is_empty() {
            return Err(SchemerError::validation(
                "index.columns",
                "at least one column is required",
            ));
        }
        for column in &columns {
            require_identifier("index.columns", column)?;
        }
        options.ensure_known("index", INDEX_OPTIONS)?;

        let unique = options.bool("index", "unique")?.unwrap_or(false);
        let name = match options.string("index", "name")? {
            Some(name) => name.to_string(),
            None => Self::default_name(&table, &columns),
        };

        Ok(Self {
            name,
            table,
            columns,
            unique,
        })
    }

    pub fn default_name(table: &str, columns: &[String]) -> String {
        format!("{}_{}_idx", table, columns.join("_"))
    }
}
