//! Miette diagnostic wrapper for resource parse errors.
//!
//! The miette derive reads the struct fields in generated code, which rustc
//! reports as unused assignments.
#![allow(unused_assignments)]

use std::path::Path;

use loctext::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A resource file error pointing at the offending span.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(loctext::resource))]
pub struct LocDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl LocDiagnostic {
    /// Locates `err` inside `content`, the text of the file at `path`.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (line, column, message, help) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, format!("syntax error: {message}"), None),
            ParseError::UnexpectedEof { line, column } => (
                *line,
                *column,
                "unexpected end of file".to_string(),
                Some("check for an unclosed block, list or string".to_string()),
            ),
            ParseError::InvalidUtf8 => (1, 1, "invalid UTF-8".to_string(), None),
            ParseError::MissingLocale | ParseError::DuplicateLocale => (
                1,
                1,
                err.to_string(),
                Some("every resource file needs exactly one top-level `locale { ... }` block".to_string()),
            ),
        };

        LocDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (byte_offset(content, line, column), 1).into(),
            message,
            help,
        }
    }
}

/// Convert a 1-based line and character column to a byte offset, clamped to
/// the content length.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let within_line: usize = content
        .get(line_start..)
        .unwrap_or_default()
        .chars()
        .take(column.saturating_sub(1))
        .map(char::len_utf8)
        .sum();
    (line_start + within_line).min(content.len())
}
