//! Column types
//!
//! The dialect-neutral type enumeration. Dialects map each member to their
//! own type text; `Raw` is emitted verbatim.

use serde::Serialize;
use std::fmt;

/// Column type enum.
///
/// Every migration column resolves to one of these; unknown type names are
/// rejected unless the column is explicitly marked raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Sized character data, VARCHAR-like.
    String,
    /// Unbounded text.
    Text,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    /// Floating point.
    Float,
    /// Exact numeric.
    Decimal,
    Boolean,
    /// Timestamp without time zone.
    Timestamp,
    /// Timestamp with time zone.
    Timestamptz,
    Date,
    Uuid,
    Json,
    Jsonb,
    /// Binary data.
    Blob,
    /// Dialect-specific type text, passed through untouched.
    Raw(String),
}

impl ColumnType {
    /// Parse a DSL type name. Case-insensitive, accepts common aliases.
    ///
    /// Returns `None` for unknown names; callers decide whether a raw
    /// passthrough is allowed.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "string" | "varchar" => Some(Self::String),
            "text" => Some(Self::Text),
            "integer" | "int" => Some(Self::Integer),
            "bigint" => Some(Self::BigInt),
            "float" | "double" => Some(Self::Float),
            "decimal" | "numeric" => Some(Self::Decimal),
            "boolean" | "bool" => Some(Self::Boolean),
            "timestamp" | "datetime" => Some(Self::Timestamp),
            "timestamptz" => Some(Self::Timestamptz),
            "date" => Some(Self::Date),
            "uuid" => Some(Self::Uuid),
            "json" => Some(Self::Json),
            "jsonb" => Some(Self::Jsonb),
            "blob" | "binary" | "bytea" => Some(Self::Blob),
            _ => None,
        }
    }

    /// Types whose values are numbers.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::BigInt | Self::Float | Self::Decimal
        )
    }

    /// Types a dialect can render as an auto-incrementing key.
    pub const fn is_auto_increment_candidate(&self) -> bool {
        matches!(self, Self::Integer | Self::BigInt)
    }

    /// Canonical DSL name, used in error messages and `explain` output.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Timestamptz => "timestamptz",
            Self::Date => "date",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Blob => "blob",
            Self::Raw(text) => text,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
