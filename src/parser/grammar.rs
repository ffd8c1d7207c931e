//! Expression grammar for migration scripts.
//!
//! A strict subset of a JS-like expression language: literals, arrays,
//! objects, dotted names, calls and `func(t) { ... }` blocks.

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, opt},
    error::{context, VerboseError, VerboseErrorKind},
    multi::separated_list1,
    sequence::{pair, preceded},
};

use std::cell::Cell;

use super::tokens::*;
use crate::ast::*;

/// Deepest allowed nesting of arrays, objects, calls and blocks.
pub const MAX_DEPTH: usize = 64;

/// Turn a recoverable error into a failure once the parser has committed to a branch.
fn commit<E>(e: nom::Err<E>) -> nom::Err<E> {
    match e {
        nom::Err::Error(e) => nom::Err::Failure(e),
        other => other,
    }
}

fn closing_context(close: char) -> &'static str {
    match close {
        ')' => "expected ',' or ')'",
        ']' => "expected ',' or ']'",
        _ => "expected ',' or '}'",
    }
}

/// Grammar over one source text; keeps the source to compute line numbers.
pub struct Grammar<'s> {
    source: &'s str,
    depth: Cell<usize>,
}

impl<'s> Grammar<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            depth: Cell::new(0),
        }
    }

    /// 1-based line of the position where `input` starts.
    pub fn line_of(&self, input: &str) -> usize {
        let offset = self.source.len() - input.len();
        self.source[..offset].matches('\n').count() + 1
    }

    /// Parse a whole script: statements until end of input, each with its line.
    pub fn script(&self, input: &'s str) -> PResult<'s, Vec<(usize, Expr)>> {
        let (mut input, _) = ws_or_comment(input)?;
        let mut statements = Vec::new();
        while !input.is_empty() {
            let line = self.line_of(input);
            let (rest, stmt) = self.statement(input, "expected a statement")?;
            statements.push((line, stmt));
            input = rest;
        }
        Ok((input, statements))
    }

    /// One expression statement, with an optional `;` and trailing whitespace.
    fn statement(&self, input: &'s str, expected: &'static str) -> PResult<'s, Expr> {
        let (input, expr) = context(expected, |i| self.expr(i))(input)?;
        let (input, _) = ws_or_comment(input)?;
        let (input, _) = opt(pair(sym(';'), ws_or_comment))(input)?;
        Ok((input, expr))
    }

    pub fn expr(&self, input: &'s str) -> PResult<'s, Expr> {
        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            return Err(nom::Err::Failure(VerboseError {
                errors: vec![(input, VerboseErrorKind::Context("nesting too deep"))],
            }));
        }
        self.depth.set(depth + 1);
        let result = self.expr_inner(input);
        self.depth.set(depth);
        result
    }

    fn expr_inner(&self, input: &'s str) -> PResult<'s, Expr> {
        alt((
            |i| self.func(i),
            map(|i| self.array(i), Expr::Array),
            map(|i| self.object(i), Expr::Object),
            map(parse_string, |s| Expr::Literal(Value::String(s))),
            map(parse_number, Expr::Literal),
            |i| self.path_or_call(i),
        ))(input)
    }

    /// `name`, `a.b`, `true`/`false`/`null`, or a call on any of the paths.
    fn path_or_call(&self, input: &'s str) -> PResult<'s, Expr> {
        let line = self.line_of(input);
        let (input, path) = separated_list1(sym('.'), parse_identifier)(input)?;

        if let [single] = path.as_slice() {
            let keyword = match *single {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                "null" => Some(Value::Null),
                _ => None,
            };
            if let Some(v) = keyword {
                return Ok((input, Expr::Literal(v)));
            }
        }

        let (input, open) = opt(preceded(ws_or_comment, sym('(')))(input)?;
        let callee: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        if open.is_none() {
            return Ok((input, Expr::Ident(callee.join("."))));
        }

        let (input, args) = self.list(input, ')', |i| self.expr(i))?;
        Ok((input, Expr::Call(Call { callee, args, line })))
    }

    /// `func(t) { ... }` or `function(t) { ... }`
    fn func(&self, input: &'s str) -> PResult<'s, Expr> {
        let line = self.line_of(input);
        let (input, _) = alt((tag::<_, _, VerboseError<&str>>("function"), tag("func")))(input)?;
        let (input, _) = word_end(input)?;
        let (input, _) = ws_or_comment(input)?;
        let (input, _) = sym('(')(input)?;

        let (input, params) = self.list(input, ')', |i| {
            map(parse_identifier, str::to_string)(i)
        })?;
        let (input, _) = ws_or_comment(input)?;
        let (input, _) = context("expected '{' to open the block", sym('{'))(input)
            .map_err(commit)?;
        let (input, body) = self.block_body(input)?;

        Ok((input, Expr::Func(Func { params, body, line })))
    }

    /// Statements up to and including the closing `}`.
    fn block_body(&self, input: &'s str) -> PResult<'s, Vec<Expr>> {
        let (mut input, _) = ws_or_comment(input)?;
        let mut body = Vec::new();
        loop {
            if let Ok((rest, _)) = sym('}')(input) {
                return Ok((rest, body));
            }
            let (rest, stmt) = self
                .statement(input, "expected a statement or '}'")
                .map_err(commit)?;
            body.push(stmt);
            input = rest;
        }
    }

    fn array(&self, input: &'s str) -> PResult<'s, Vec<Expr>> {
        let (input, _) = sym('[')(input)?;
        self.list(input, ']', |i| self.expr(i))
    }

    fn object(&self, input: &'s str) -> PResult<'s, Vec<(String, Expr)>> {
        let (input, _) = sym('{')(input)?;
        self.list(input, '}', |i| self.entry(i))
    }

    /// `"key": value` or `key: value`
    fn entry(&self, input: &'s str) -> PResult<'s, (String, Expr)> {
        let (input, key) = context(
            "expected an object key",
            alt((parse_string, map(parse_identifier, str::to_string))),
        )(input)?;
        let (input, _) = ws_or_comment(input)?;
        let (input, _) = context("expected ':' after object key", sym(':'))(input)
            .map_err(commit)?;
        let (input, _) = ws_or_comment(input)?;
        let (input, value) = context("expected a value", |i| self.expr(i))(input)
            .map_err(commit)?;
        Ok((input, (key, value)))
    }

    /// Comma-separated items after an opening bracket, through `close`.
    /// Trailing commas are allowed.
    fn list<T, F>(&self, input: &'s str, close: char, mut item: F) -> PResult<'s, Vec<T>>
    where
        F: FnMut(&'s str) -> PResult<'s, T>,
    {
        let (mut input, _) = ws_or_comment(input)?;
        let mut items = Vec::new();
        loop {
            if let Ok((rest, _)) = sym(close)(input) {
                return Ok((rest, items));
            }
            let (rest, it) = context("expected an expression", &mut item)(input).map_err(commit)?;
            items.push(it);

            let (rest, _) = ws_or_comment(rest)?;
            if let Ok((rest, _)) = sym(',')(rest) {
                let (rest, _) = ws_or_comment(rest)?;
                input = rest;
                continue;
            }
            let (rest, _) = context(closing_context(close), sym(close))(rest).map_err(commit)?;
            return Ok((rest, items));
        }
    }
}
