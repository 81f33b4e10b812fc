//! Parser for the encoded list-of-objects fields found in the source tables.
//!
//! Accepts both JSON (`[{"id": 28, "name": "Action"}]`) and Python literal
//! syntax (`[{'id': 28, 'name': 'Action'}]`), since the tables in the wild use
//! either. Parsing is strict: the whole input must be a single literal.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, pair, separated_pair, terminated, tuple},
    Finish, IResult,
};

type ParseResult<'a, T> = IResult<&'a str, T>;

/// Deepest list/dict nesting accepted before the input is rejected
pub const MAX_DEPTH: usize = 64;

/// A parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    /// Lists and tuples
    List(Vec<Literal>),
    /// Key/value pairs in source order
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a string key in a dict literal
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed literal at byte {offset} ({kind})")]
pub struct LiteralError {
    pub offset: usize,
    pub kind: String,
}

/// Parse a complete literal, surrounding whitespace allowed
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    all_consuming(ws(|i| literal(i, 0)))(input)
        .finish()
        .map(|(_, literal)| literal)
        .map_err(|e| LiteralError {
            offset: input.len() - e.input.len(),
            kind: format!("{:?}", e.code),
        })
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn literal(input: &str, depth: usize) -> ParseResult<'_, Literal> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    alt((
        map(quoted_string, Literal::Str),
        number,
        keyword,
        map(|i| sequence(i, '[', ']', depth), Literal::List),
        map(|i| sequence(i, '(', ')', depth), Literal::List),
        |i| dict(i, depth),
    ))(input)
}

fn keyword(input: &str) -> ParseResult<'_, Literal> {
    alt((
        value(Literal::Bool(true), alt((tag("True"), tag("true")))),
        value(Literal::Bool(false), alt((tag("False"), tag("false")))),
        value(Literal::None, alt((tag("None"), tag("null")))),
    ))(input)
}

fn number(input: &str) -> ParseResult<'_, Literal> {
    let (rest, text) = recognize(tuple((
        opt(one_of("+-")),
        digit1,
        opt(pair(char('.'), digit0)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;

    if let Ok(n) = text.parse::<i64>() {
        return Ok((rest, Literal::Int(n)));
    }
    match text.parse::<f64>() {
        Ok(f) => Ok((rest, Literal::Float(f))),
        Err(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Float))),
    }
}

/// Single- or double-quoted string with backslash escapes
fn quoted_string(input: &str) -> ParseResult<'_, String> {
    let quote = match input.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };

    let mut out = String::new();
    let mut chars = input.char_indices().skip(1);
    while let Some((idx, c)) = chars.next() {
        if c == quote {
            return Ok((&input[idx + c.len_utf8()..], out));
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, escaped)) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'u' => match unicode_escape(&mut chars) {
                Some(ch) => out.push(ch),
                None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Escaped))),
            },
            other => out.push(other),
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Eof)))
}

fn unicode_escape(chars: &mut impl Iterator<Item = (usize, char)>) -> Option<char> {
    let high = hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }
    // High surrogate must be followed by an escaped low surrogate
    match (chars.next(), chars.next()) {
        (Some((_, '\\')), Some((_, 'u'))) => {
            let low = hex4(chars)?;
            if !(0xDC00..0xE000).contains(&low) {
                return None;
            }
            char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
        }
        _ => None,
    }
}

fn hex4(chars: &mut impl Iterator<Item = (usize, char)>) -> Option<u32> {
    let digits: String = chars.take(4).map(|(_, c)| c).collect();
    if digits.len() != 4 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

fn sequence(input: &str, open: char, close: char, depth: usize) -> ParseResult<'_, Vec<Literal>> {
    delimited(
        char(open),
        terminated(
            separated_list0(char(','), ws(|i| literal(i, depth + 1))),
            pair(opt(char(',')), multispace0),
        ),
        char(close),
    )(input)
}

fn dict(input: &str, depth: usize) -> ParseResult<'_, Literal> {
    map(
        delimited(
            char('{'),
            terminated(
                separated_list0(
                    char(','),
                    separated_pair(
                        ws(|i| literal(i, depth + 1)),
                        char(':'),
                        ws(|i| literal(i, depth + 1)),
                    ),
                ),
                pair(opt(char(',')), multispace0),
            ),
            char('}'),
        ),
        Literal::Dict,
    )(input)
}
