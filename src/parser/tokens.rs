use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{char, digit1, multispace1, not_line_ending, one_of, satisfy},
    combinator::{cut, not, opt, recognize, value},
    error::{context, ContextError, ErrorKind, ParseError, VerboseError},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::ast::Value;

/// Parser result carrying nom's verbose error so failures can name what was expected.
pub type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parse whitespace or comments.
pub fn ws_or_comment(input: &str) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            parse_line_comment,
            parse_block_comment,
        ))),
    )(input)
}

/// Parse a single comment line (`// ...`, `-- ...` or `# ...`).
pub fn parse_line_comment(input: &str) -> PResult<'_, ()> {
    value(
        (),
        pair(alt((tag("//"), tag("--"), tag("#"))), not_line_ending),
    )(input)
}

/// Parse a `/* ... */` comment.
pub fn parse_block_comment(input: &str) -> PResult<'_, ()> {
    value(
        (),
        preceded(
            tag("/*"),
            cut(context(
                "unterminated block comment",
                terminated(take_until("*/"), tag("*/")),
            )),
        ),
    )(input)
}

/// Match a single character.
pub fn sym<'a>(c: char) -> impl FnMut(&'a str) -> PResult<'a, char> {
    char(c)
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Succeeds without consuming when the next character cannot continue an identifier.
pub fn word_end(input: &str) -> PResult<'_, ()> {
    not(satisfy(is_ident_char))(input)
}

/// Parse an identifier: a letter or underscore followed by letters, digits or underscores.
pub fn parse_identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

/// Parse a number (integer, float or exponent form).
pub fn parse_number(input: &str) -> PResult<'_, Value> {
    let (input, num_str) = recognize_number(input)?;

    let is_float = num_str.contains(['.', 'e', 'E']);
    let number = match num_str.parse::<i64>() {
        Ok(n) if !is_float => Value::Int(n),
        _ => Value::Float(num_str.parse().unwrap_or(f64::MAX)),
    };
    Ok((input, number))
}

fn recognize_number(input: &str) -> PResult<'_, &str> {
    recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// Parse a single- or double-quoted string with backslash escapes.
pub fn parse_string(input: &str) -> PResult<'_, String> {
    let quote = match input.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => {
            return Err(nom::Err::Error(VerboseError::from_char(
                input, '"',
            )))
        }
    };

    let body = &input[1..];
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => return Ok((&body[i + 1..], out)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '0')) => out.push('\0'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            '\n' => break,
            c => out.push(c),
        }
    }

    Err(nom::Err::Failure(VerboseError::add_context(
        input,
        "unterminated string literal",
        VerboseError::from_error_kind(input, ErrorKind::Char),
    )))
}
