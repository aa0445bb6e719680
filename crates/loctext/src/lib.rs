pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    BuiltinError, BuiltinRegistry, DuplicatePolicy, Entry, EvalContext, EvalError, LintWarning,
    LoadError, RawText, ScriptFallback, Store, compute_suggestions, unknown_function,
};
pub use parser::{Expression, ParseError, parse_config, parse_template};
pub use types::{
    Character, Gender, Item, Language, LanguageFlag, SharedRng, Subject, SubjectKind, Value,
};
