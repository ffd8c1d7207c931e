//! Syntax tree for migration scripts.
//!
//! The parser produces a [`Script`]; the evaluator walks it and records
//! operations. Nothing here knows about tables or SQL.

pub mod values;

use std::collections::BTreeMap;

pub use values::Value;

/// A parsed migration script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    /// Statements in source order.
    pub statements: Vec<Expr>,
    /// 1-based starting line of each statement.
    pub lines: Vec<usize>,
}

/// An expression in the script language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Scalar literal: string, number, boolean or null.
    Literal(Value),
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `{"key": value}`, keys kept in source order.
    Object(Vec<(String, Expr)>),
    /// Bare (possibly dotted) name, e.g. `t` or `t.Column`.
    Ident(String),
    /// `name(args)` or `receiver.method(args)`
    Call(Call),
    /// `func(t) { ... }`
    Func(Func),
}

/// A function-call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Dotted callee path: `["create_table"]` or `["t", "Column"]`.
    pub callee: Vec<String>,
    pub args: Vec<Expr>,
    /// 1-based source line of the callee.
    pub line: usize,
}

/// An anonymous function literal used as a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub params: Vec<String>,
    pub body: Vec<Expr>,
    pub line: usize,
}

/// Why an expression could not be reduced to a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralError {
    /// A non-literal expression of the given shape was found.
    NotLiteral(&'static str),
    /// An object literal repeats a key.
    DuplicateKey(String),
}

impl Call {
    /// Callee path joined with dots.
    pub fn name(&self) -> String {
        self.callee.join(".")
    }
}

impl Expr {
    /// Name of the expression's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Expr::Literal(v) => v.shape(),
            Expr::Array(_) => "array",
            Expr::Object(_) => "object",
            Expr::Ident(_) => "identifier",
            Expr::Call(_) => "call",
            Expr::Func(_) => "block",
        }
    }

    /// Reduce a literal tree to a [`Value`].
    pub fn to_value(&self) -> Result<Value, LiteralError> {
        match self {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Array(items) => items
                .iter()
                .map(Expr::to_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expr::Object(entries) => {
                let mut map = BTreeMap::new();
                for (key, expr) in entries {
                    let value = expr.to_value()?;
                    if map.insert(key.clone(), value).is_some() {
                        return Err(LiteralError::DuplicateKey(key.clone()));
                    }
                }
                Ok(Value::Object(map))
            }
            other => Err(LiteralError::NotLiteral(other.shape())),
        }
    }
}
