//! Option maps attached to tables, columns and indexes.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::ast::Value;
use crate::error::{SchemerError, SchemerResult};

/// String-keyed option map, as written in a script's object literal.
///
/// Getters validate the value's shape and report the offending field as
/// `<owner>.<key>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reject keys outside `allowed`.
    pub fn ensure_known(&self, owner: &str, allowed: &[&str]) -> SchemerResult<()> {
        match self.0.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(key) => Err(SchemerError::validation(
                format!("{}.{}", owner, key),
                format!(
                    "unknown option '{}', expected one of: {}",
                    key,
                    allowed.join(", ")
                ),
            )),
            None => Ok(()),
        }
    }

    /// Boolean option; absent is `None`.
    pub fn bool(&self, owner: &str, key: &str) -> SchemerResult<Option<bool>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(shape_error(owner, key, "boolean", other)),
        }
    }

    /// Non-empty string option; absent is `None`.
    pub fn string(&self, owner: &str, key: &str) -> SchemerResult<Option<&str>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Err(SchemerError::validation(
                format!("{}.{}", owner, key),
                "must not be empty",
            )),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(shape_error(owner, key, "string", other)),
        }
    }

    /// Positive integer option. A float with no fractional part counts as an integer.
    pub fn positive_int(&self, owner: &str, key: &str) -> SchemerResult<Option<u32>> {
        self.whole_number(owner, key, 1)
    }

    /// Integer option that may be zero.
    pub fn non_negative_int(&self, owner: &str, key: &str) -> SchemerResult<Option<u32>> {
        self.whole_number(owner, key, 0)
    }

    fn whole_number(&self, owner: &str, key: &str, min: u32) -> SchemerResult<Option<u32>> {
        let field = || format!("{}.{}", owner, key);
        let n = match self.0.get(key) {
            None => return Ok(None),
            Some(Value::Int(n)) => *n,
            Some(Value::Float(f)) if f.fract() == 0.0 && f.is_finite() => *f as i64,
            Some(Value::Float(f)) => {
                return Err(SchemerError::validation(
                    field(),
                    format!("expected a whole number, got {}", f),
                ));
            }
            Some(other) => return Err(shape_error(owner, key, "number", other)),
        };
        match u32::try_from(n) {
            Ok(n) if n >= min => Ok(Some(n)),
            _ => Err(SchemerError::validation(
                field(),
                format!("expected a number of at least {}, got {}", min, n),
            )),
        }
    }
}

fn shape_error(owner: &str, key: &str, expected: &str, got: &Value) -> SchemerError {
    SchemerError::validation(
        format!("{}.{}", owner, key),
        format!("expected {}, got {}", expected, got.shape()),
    )
}

impl From<BTreeMap<String, Value>> for Options {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
