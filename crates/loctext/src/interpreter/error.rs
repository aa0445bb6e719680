//! Error types for loading and evaluation.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

/// Errors that abort loading a locale.
///
/// Any of these leaves the store empty: a locale is loaded completely or not
/// at all.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a resource directory or file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Block-format syntax error, or a missing `locale` root block.
    #[error("{path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Malformed `${}` interpolation in a leaf string.
    #[error("{path}: invalid interpolation in '{key}': {reason}")]
    TemplateParse {
        path: PathBuf,
        key: String,
        reason: String,
    },

    /// A key defined twice while duplicates are rejected.
    #[error("duplicate key '{key}' in '{second}' (first defined in '{first}')")]
    DuplicateKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The script fallback refused a file.
    #[error("failed to load script '{path}': {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Internal evaluation failures. These never reach the caller of a lookup;
/// the affected span renders as an empty string.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    /// Cyclic key reference detected while resolving positional keys.
    #[error("cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Maximum key nesting depth exceeded.
    #[error("maximum recursion depth exceeded")]
    MaxDepthExceeded,
}

/// A builtin could not use its arguments.
///
/// The dispatcher renders the unknown-function placeholder instead.
#[derive(Debug, Error, PartialEq)]
pub enum BuiltinError {
    #[error("argument {index} must be {expected}, got '{got}'")]
    Coercion {
        index: usize,
        expected: &'static str,
        got: String,
    },
}

/// A finding from [`Store::lint`](crate::Store::lint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// A call whose name no builtin table knows for the active language.
    UnknownFunction {
        key: String,
        name: String,
        suggestions: Vec<String>,
    },
}

impl Display for LintWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LintWarning::UnknownFunction {
                key,
                name,
                suggestions,
            } => {
                write!(f, "'{key}': unknown function '{name}'")?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean: {}?)", suggestions.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Names from `available` close to `target`, closest first, at most three.
pub fn compute_suggestions<'a>(
    target: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if target.len() > 3 { 2 } else { 1 };
    let mut scored: Vec<(usize, &str)> = available
        .into_iter()
        .map(|name| (levenshtein(target, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_unstable();
    scored.dedup();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
