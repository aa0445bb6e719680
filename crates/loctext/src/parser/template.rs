//! Expression parser using winnow.
//!
//! Parses a single resource string into an [`Expression`]. Handles:
//! - Literal text (a lone `$` is literal)
//! - `${name(args)}` call spans and bare `${_N}` positional spans
//! - The `$${` escape for a literal `${`
//! - Nested calls, either bare `outer(inner())` or wrapped `outer(${inner()})`

use super::ast::{Arg, Call, Expression, Node};
use super::error::ParseError;
use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, delimited, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_while};

/// Parse a resource string into a compiled expression.
pub fn parse_template(input: &str) -> Result<Expression, ParseError> {
    let mut remaining = input;
    match expression(&mut remaining) {
        Ok(expr) if remaining.is_empty() => Ok(expr),
        Ok(_) => Err(ParseError::at(
            input,
            remaining,
            format!(
                "unexpected character: '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        )),
        Err(e) => Err(ParseError::at(input, remaining, format!("parse error: {e}"))),
    }
}

/// Parse a complete expression into nodes.
fn expression(input: &mut &str) -> ModalResult<Expression> {
    let nodes: Vec<Node> = repeat(0.., node).parse_next(input)?;
    Ok(Expression {
        nodes: merge_literals(nodes),
    })
}

/// Merge adjacent Text nodes into single nodes.
fn merge_literals(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Node::Text(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single node (escape, interpolation, or literal run).
fn node(input: &mut &str) -> ModalResult<Node> {
    alt((escape_sequence, interpolation, literal_run, lone_dollar)).parse_next(input)
}

/// Parse the escape `$${` -> `${`.
fn escape_sequence(input: &mut &str) -> ModalResult<Node> {
    "$${".value(Node::Text("${".to_string())).parse_next(input)
}

/// Parse a run of text containing no `$`.
fn literal_run(input: &mut &str) -> ModalResult<Node> {
    take_while(1.., |c: char| c != '$')
        .map(|s: &str| Node::Text(s.to_string()))
        .parse_next(input)
}

/// A `$` that does not open a span.
fn lone_dollar(input: &mut &str) -> ModalResult<Node> {
    '$'.value(Node::Text("$".to_string())).parse_next(input)
}

/// Parse an interpolation: `${ call }` or `${ _N }`.
///
/// Once `${` is seen the span must be well formed.
fn interpolation(input: &mut &str) -> ModalResult<Node> {
    preceded(
        "${",
        cut_err(delimited(
            ws,
            alt((positional.map(Node::Positional), call.map(Node::Call))),
            (ws, close_brace),
        )),
    )
    .context(StrContext::Label("interpolation"))
    .parse_next(input)
}

fn close_brace(input: &mut &str) -> ModalResult<char> {
    '}'.context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)
}

/// Parse a call: `name(arg, ...)`.
fn call(input: &mut &str) -> ModalResult<Call> {
    let name = identifier(input)?;
    ws(input)?;
    '('.parse_next(input)?;
    let args: Vec<Arg> = cut_err(terminated(
        delimited(ws, separated(0.., arg, (ws, ',', ws)), ws),
        ')'.context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
    ))
    .context(StrContext::Label("argument list"))
    .parse_next(input)?;

    Ok(Call {
        name: name.to_string(),
        args,
    })
}

/// Parse a single call argument.
fn arg(input: &mut &str) -> ModalResult<Arg> {
    alt((
        nested_call.map(Arg::Call),
        string_literal.map(Arg::Str),
        positional.map(Arg::Positional),
        number,
        boolean.map(Arg::Bool),
        call.map(Arg::Call),
    ))
    .parse_next(input)
}

/// Parse a wrapped nested call: `${ call }` in argument position.
fn nested_call(input: &mut &str) -> ModalResult<Call> {
    preceded("${", cut_err(delimited(ws, call, (ws, close_brace)))).parse_next(input)
}

/// Parse a positional reference: `_N` with `N >= 1`.
fn positional(input: &mut &str) -> ModalResult<usize> {
    terminated(
        preceded('_', digit1).try_map(|digits: &str| digits.parse::<usize>()),
        not(one_of(is_ident_cont)),
    )
    .verify(|n: &usize| *n >= 1)
    .parse_next(input)
}

/// Parse an integer or decimal literal.
fn number(input: &mut &str) -> ModalResult<Arg> {
    let text = terminated(
        (opt('-'), digit1, opt(('.', digit1))).take(),
        not(one_of(is_ident_cont)),
    )
    .parse_next(input)?;

    let parsed = if text.contains('.') {
        text.parse::<f64>().ok().map(Arg::Float)
    } else {
        text.parse::<i64>().ok().map(Arg::Int)
    };
    parsed.ok_or_else(|| ErrMode::Cut(ContextError::new()))
}

/// Parse `true` or `false` (not the prefix of a longer identifier or a call).
fn boolean(input: &mut &str) -> ModalResult<bool> {
    terminated(
        alt(("true".value(true), "false".value(false))),
        not(one_of(|c: char| is_ident_cont(c) || c == '(')),
    )
    .parse_next(input)
}

/// Parse a double-quoted string literal with `\` escapes.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., string_char).fold(String::new, |mut acc, c| {
                acc.push(c);
                acc
            }),
            '"'.context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
        )),
    )
    .parse_next(input)
}

fn string_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', escaped_char), none_of(['"', '\\']))).parse_next(input)
}

fn escaped_char(input: &mut &str) -> ModalResult<char> {
    alt((
        'n'.value('\n'),
        't'.value('\t'),
        'r'.value('\r'),
        '"',
        '\\',
        '$',
    ))
    .parse_next(input)
}

/// Parse an identifier: an ASCII letter followed by letters, digits or `_`.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., is_ident_cont),
    )
        .take()
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
