//! Resource file parser.
//!
//! Resource files use a small HCL-like block format:
//!
//! ```text
//! # comment
//! locale {
//!     ability {
//!         name = "Ability"
//!         gain = ["${name(_1)} feels stronger.", "${name(_1)} grows."]
//!     }
//! }
//! ```
//!
//! Entries are `key = value` or `key { ... }`. Values are strings, lists of
//! strings, nested blocks, numbers, or booleans. `${ ... }` spans inside a
//! string are copied verbatim, quotes included, for the expression parser.

use std::str;

use tracing::debug;
use winnow::ascii::digit1;
use winnow::combinator::{
    alt, cut_err, not, opt, peek, preceded, repeat, separated, terminated,
};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of, take_until, take_while};

use super::ast::{ConfigEntry, ConfigTree, ConfigValue, Leaf};
use super::error::ParseError;

/// Key prefix every flattened leaf is rooted at.
pub const ROOT_KEY: &str = "core.locale";

/// Name of the mandatory top-level block.
pub const LOCALE_BLOCK: &str = "locale";

/// Parse raw resource bytes.
pub fn parse_config(bytes: &[u8]) -> Result<ConfigTree, ParseError> {
    let input = str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
    parse_config_str(input)
}

/// Parse a resource file that is already text.
pub fn parse_config_str(input: &str) -> Result<ConfigTree, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut remaining = input;
    match file(&mut remaining) {
        Ok(entries) => {
            if remaining.is_empty() {
                Ok(ConfigTree { entries })
            } else {
                Err(ParseError::at(
                    input,
                    remaining,
                    format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                ))
            }
        }
        Err(e) => Err(ParseError::at(input, remaining, format!("parse error: {e}"))),
    }
}

impl ConfigTree {
    /// The entries of the single top-level `locale` block.
    pub fn locale_root(&self) -> Result<&[ConfigEntry], ParseError> {
        let mut roots = self
            .entries
            .iter()
            .filter(|entry| entry.key == LOCALE_BLOCK);
        let Some(root) = roots.next() else {
            return Err(ParseError::MissingLocale);
        };
        if roots.next().is_some() {
            return Err(ParseError::DuplicateLocale);
        }
        match &root.value {
            ConfigValue::Block(entries) => Ok(entries),
            _ => Err(ParseError::MissingLocale),
        }
    }

    /// Flatten the `locale` block into `(dotted key, leaf)` pairs.
    ///
    /// Walks depth-first in source order. Keys are rooted at [`ROOT_KEY`].
    /// Numbers and booleans carry no text and are skipped.
    pub fn flatten(&self) -> Result<Vec<(String, Leaf)>, ParseError> {
        let root = self.locale_root()?;
        let mut leaves = Vec::new();
        flatten_block(root, ROOT_KEY, &mut leaves);
        Ok(leaves)
    }
}

fn flatten_block(entries: &[ConfigEntry], prefix: &str, out: &mut Vec<(String, Leaf)>) {
    for entry in entries {
        let key = format!("{prefix}.{}", entry.key);
        match &entry.value {
            ConfigValue::String(text) => out.push((key, Leaf::Text(text.clone()))),
            ConfigValue::List(items) => out.push((key, Leaf::List(items.clone()))),
            ConfigValue::Block(children) => flatten_block(children, &key, out),
            ConfigValue::Number(_) | ConfigValue::Bool(_) => {
                debug!(%key, "skipping non-text resource value");
            }
        }
    }
}

/// Parse an entire file into top-level entries.
fn file(input: &mut &str) -> ModalResult<Vec<ConfigEntry>> {
    skip_ws_and_comments(input)?;
    repeat(0.., terminated(entry, entry_separator)).parse_next(input)
}

/// Skip whitespace and comments.
fn skip_ws_and_comments(input: &mut &str) -> ModalResult<()> {
    let _: Vec<()> = repeat(
        0..,
        alt((ws_only.void(), line_comment.void(), block_comment.void())),
    )
    .parse_next(input)?;
    Ok(())
}

/// Whitespace and comments after an entry, with an optional comma.
fn entry_separator(input: &mut &str) -> ModalResult<()> {
    skip_ws_and_comments(input)?;
    opt((',', skip_ws_and_comments)).void().parse_next(input)
}

fn ws_only<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., char::is_whitespace).parse_next(input)
}

/// Parse a line comment: `# ...` or `// ...`.
fn line_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded(alt(("#", "//")), take_while(0.., |c| c != '\n')).parse_next(input)
}

/// Parse a block comment: `/* ... */`.
fn block_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    preceded("/*", terminated(take_until(0.., "*/"), "*/")).parse_next(input)
}

/// Parse one entry: `key = value` or `key { ... }`.
fn entry(input: &mut &str) -> ModalResult<ConfigEntry> {
    let key = key(input)?;
    skip_ws_and_comments(input)?;
    let value = cut_err(alt((
        preceded(('=', skip_ws_and_comments), value),
        block.map(ConfigValue::Block),
    )))
    .context(StrContext::Label("entry value"))
    .parse_next(input)?;

    Ok(ConfigEntry { key, value })
}

/// Parse an entry key: a bare identifier or a quoted string.
///
/// A quoted key may hold spaces but not `.`, which would make its flattened
/// path ambiguous with a nested block.
fn key(input: &mut &str) -> ModalResult<String> {
    alt((
        identifier.map(str::to_owned),
        preceded(
            peek('"'),
            cut_err(
                quoted_string
                    .verify(|key: &str| !key.is_empty() && !key.contains('.'))
                    .context(StrContext::Expected(StrContextValue::Description(
                        "non-empty key without '.'",
                    ))),
            ),
        ),
    ))
    .parse_next(input)
}

fn value(input: &mut &str) -> ModalResult<ConfigValue> {
    alt((
        quoted_string.map(ConfigValue::String),
        list.map(ConfigValue::List),
        block.map(ConfigValue::Block),
        number.map(ConfigValue::Number),
        boolean.map(ConfigValue::Bool),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "string, list, block, number or boolean",
    )))
    .parse_next(input)
}

/// Parse a block: `{ entry* }`.
fn block(input: &mut &str) -> ModalResult<Vec<ConfigEntry>> {
    preceded(
        ('{', skip_ws_and_comments),
        cut_err(terminated(
            repeat(0.., terminated(entry, entry_separator)),
            '}'.context(StrContext::Expected(StrContextValue::CharLiteral('}'))),
        )),
    )
    .context(StrContext::Label("block"))
    .parse_next(input)
}

/// Parse a list of strings: `[ "a", "b", ]`.
fn list(input: &mut &str) -> ModalResult<Vec<String>> {
    preceded(
        ('[', skip_ws_and_comments),
        cut_err(terminated(
            separated(
                0..,
                terminated(quoted_string, skip_ws_and_comments),
                (',', skip_ws_and_comments),
            ),
            (
                opt((',', skip_ws_and_comments)),
                ']'.context(StrContext::Expected(StrContextValue::CharLiteral(']'))),
            ),
        )),
    )
    .context(StrContext::Label("list"))
    .parse_next(input)
}

/// A piece of string content.
enum Piece<'i> {
    Raw(&'i str),
    Owned(String),
    Char(char),
}

impl Piece<'_> {
    fn push_onto(self, acc: &mut String) {
        match self {
            Piece::Raw(raw) => acc.push_str(raw),
            Piece::Owned(text) => acc.push_str(&text),
            Piece::Char(c) => acc.push(c),
        }
    }
}

/// Parse a double-quoted string, decoding escapes outside `${}` spans.
fn quoted_string(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., string_piece).fold(String::new, |mut acc, piece: Piece<'_>| {
                piece.push_onto(&mut acc);
                acc
            }),
            '"'.context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
        )),
    )
    .context(StrContext::Label("string"))
    .parse_next(input)
}

fn string_piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((
        raw_span.map(Piece::Owned),
        escaped_span_opener.map(Piece::Raw),
        preceded('\\', escaped_char).map(Piece::Char),
        none_of(['"', '\\', '\n']).map(Piece::Char),
    ))
    .parse_next(input)
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

/// `\${` stays literal: it becomes the expression parser's `$${` escape.
fn escaped_span_opener<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    terminated("\\$", peek('{')).value("$$").parse_next(input)
}

/// Parse a `${ ... }` span, balancing nested spans and quotes.
///
/// The span is kept as written except for `\"`, which becomes `"` so that
/// `"${f(\"x\")}"` and `"${f("x")}"` compile to the same expression.
fn raw_span(input: &mut &str) -> ModalResult<String> {
    preceded(
        "${",
        terminated(
            repeat(0.., span_part).fold(
                || String::from("${"),
                |mut acc, piece: Piece<'_>| {
                    piece.push_onto(&mut acc);
                    acc
                },
            ),
            '}',
        ),
    )
    .map(|mut span: String| {
        span.push('}');
        span
    })
    .parse_next(input)
}

fn span_part<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((
        raw_span.map(Piece::Owned),
        raw_quoted.map(Piece::Raw),
        escaped_quoted.map(Piece::Owned),
        ('\\', none_of('\n')).take().map(Piece::Raw),
        none_of(['{', '}', '"', '\n']).map(Piece::Char),
    ))
    .parse_next(input)
}

/// A quoted string inside a span, kept as written.
fn raw_quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        '"',
        repeat::<_, _, (), _, _>(
            0..,
            alt((('\\', any).void(), none_of(['"', '\\', '\n']).void())),
        ),
        '"',
    )
        .take()
        .parse_next(input)
}

/// A string inside a span written with escaped quotes, `\"...\"`. Other
/// escapes in its body are left for the expression parser.
fn escaped_quoted(input: &mut &str) -> ModalResult<String> {
    preceded(
        "\\\"",
        terminated(
            repeat(
                0..,
                alt((
                    ('\\', none_of(['"', '\n'])).take(),
                    take_while(1.., |c: char| !matches!(c, '\\' | '"' | '\n')),
                )),
            )
            .fold(String::new, |mut acc, chunk: &str| {
                acc.push_str(chunk);
                acc
            }),
            "\\\"",
        ),
    )
    .map(|body: String| format!("\"{body}\""))
    .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f64> {
    terminated(
        (opt('-'), digit1, opt(('.', digit1))).take(),
        not(one_of(is_ident_cont)),
    )
    .try_map(|text: &str| text.parse::<f64>())
    .parse_next(input)
}

fn boolean(input: &mut &str) -> ModalResult<bool> {
    terminated(
        alt(("true".value(true), "false".value(false))),
        not(one_of(is_ident_cont)),
    )
    .parse_next(input)
}

/// Parse a bare key: a letter or `_`, then letters, digits, `_` or `-`.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_cont),
    )
        .take()
        .parse_next(input)
}

fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
