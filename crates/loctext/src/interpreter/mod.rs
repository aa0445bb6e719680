//! Loading and rendering of localized text.
//!
//! The [`Store`] compiles resource files into entries and renders them. Call
//! spans are evaluated against the [`BuiltinRegistry`] table selected by the
//! subject of each lookup.

mod builtins;
mod context;
mod error;
mod evaluator;
mod fallback;
mod lint;
mod plural;
mod registry;
mod store;

pub use builtins::optional_bool;
pub use context::EvalContext;
pub use error::{BuiltinError, EvalError, LintWarning, LoadError, compute_suggestions};
pub use evaluator::{dispatch, eval_expression, unknown_function};
pub use fallback::{RawText, ScriptFallback};
pub use lint::lint_entry;
pub use plural::{is_singular, plural_category};
pub use registry::{ArglessFn, BoolFn, BuiltinRegistry, BuiltinResult, CharacterFn, ItemFn, Table};
pub use store::{
    DEFAULT_MAX_DEPTH, DEFAULT_RESOURCE_ROOT, DuplicatePolicy, Entry, RESOURCE_EXTENSION,
    SCRIPT_EXTENSION, Store,
};
