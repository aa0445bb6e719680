//! Parse error types for resource files and expressions.

use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },

    /// Invalid UTF-8 in input.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,

    /// The mandatory top-level `locale` block is absent.
    #[error("\"locale\" object not found")]
    MissingLocale,

    /// More than one top-level `locale` block.
    #[error("duplicate \"locale\" object")]
    DuplicateLocale,
}

impl ParseError {
    /// Builds a positioned error from the original input and the unconsumed
    /// remainder at the failure point.
    pub(crate) fn at(original: &str, remaining: &str, message: impl Into<String>) -> Self {
        let (line, column) = calculate_position(original, remaining);
        if remaining.is_empty() {
            ParseError::UnexpectedEof { line, column }
        } else {
            ParseError::Syntax {
                line,
                column,
                message: message.into(),
            }
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}
