//! Expression evaluation and builtin dispatch.
//!
//! Evaluation never fails. Text nodes are copied, call nodes are replaced by
//! the builtin's result, and anything that cannot be resolved degrades to
//! visible but harmless output:
//! - unknown function -> `<unknown function (NAME)>`
//! - builtin argument coercion failure -> the same placeholder
//! - missing positional value -> empty string

use tracing::{Level, debug, enabled};

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::registry::BuiltinRegistry;
use crate::interpreter::{EvalContext, Store};
use crate::parser::ast::{Arg, Call, Expression, Node};
use crate::types::{Language, Subject, Value};

/// The placeholder rendered for a call that cannot be dispatched.
pub fn unknown_function(name: &str) -> String {
    format!("<unknown function ({name})>")
}

/// Evaluate an expression against a subject.
///
/// The active language is read from the store's flag here, once per
/// evaluation, so a language switch takes effect without recompiling.
pub fn eval_expression(
    expr: &Expression,
    subject: Subject<'_>,
    ctx: &mut EvalContext<'_>,
    store: &Store,
) -> String {
    let language = store.language();
    let mut output = String::new();
    for node in &expr.nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Call(call) => {
                output.push_str(&eval_call(call, subject, ctx, store, language));
            }
            Node::Positional(n) => {
                let value = bind_positional(*n, subject, ctx, store, language);
                output.push_str(&value.to_string());
            }
        }
    }
    output
}

/// Evaluate a call: arguments innermost first, then dispatch.
fn eval_call(
    call: &Call,
    subject: Subject<'_>,
    ctx: &mut EvalContext<'_>,
    store: &Store,
    language: Language,
) -> String {
    let args: Vec<Value> = call
        .args
        .iter()
        .map(|arg| eval_arg(arg, subject, ctx, store, language))
        .collect();
    dispatch(&call.name, &args, subject, store.builtins(), language)
}

fn eval_arg(
    arg: &Arg,
    subject: Subject<'_>,
    ctx: &mut EvalContext<'_>,
    store: &Store,
    language: Language,
) -> Value {
    match arg {
        Arg::Call(inner) => Value::String(eval_call(inner, subject, ctx, store, language)),
        Arg::Str(s) => Value::String(s.clone()),
        Arg::Int(n) => Value::Int(*n),
        Arg::Float(f) => Value::Float(*f),
        Arg::Bool(b) => Value::Bool(*b),
        Arg::Positional(n) => bind_positional(*n, subject, ctx, store, language),
    }
}

/// Bind `_n`.
///
/// `_1` is the addressee: the subject itself for a boolean, otherwise the
/// `name` builtin of the subject's table (`you` with no subject). Higher
/// positionals come from the caller; keys among them are rendered through
/// the store with the same subject.
fn bind_positional(
    n: usize,
    subject: Subject<'_>,
    ctx: &mut EvalContext<'_>,
    store: &Store,
    language: Language,
) -> Value {
    if n == 1 {
        return match subject {
            Subject::Bool(value) => Value::Bool(value),
            Subject::None => Value::String(dispatch("you", &[], subject, store.builtins(), language)),
            Subject::Character(_) | Subject::Item(_) => {
                Value::String(dispatch("name", &[], subject, store.builtins(), language))
            }
        };
    }
    match ctx.positional(n) {
        Some(Value::Key(key)) => Value::String(store.render_nested(key, subject, ctx)),
        Some(value) => value.clone(),
        None => {
            debug!(positional = n, "no value bound to positional");
            Value::String(String::new())
        }
    }
}

/// Dispatch a call by name against the table selected by the subject.
pub fn dispatch(
    name: &str,
    args: &[Value],
    subject: Subject<'_>,
    builtins: &BuiltinRegistry,
    language: Language,
) -> String {
    let result = match subject {
        Subject::None => builtins.argless.get(name, language).map(|f| f(args, language)),
        Subject::Bool(value) => builtins
            .boolean
            .get(name, language)
            .map(|f| f(args, value, language)),
        Subject::Character(chara) => builtins
            .character
            .get(name, language)
            .map(|f| f(args, chara, language)),
        Subject::Item(item) => builtins
            .item
            .get(name, language)
            .map(|f| f(args, item, language)),
    };

    match result {
        Some(Ok(text)) => text,
        Some(Err(err)) => {
            debug!(function = name, %err, "builtin rejected its arguments");
            unknown_function(name)
        }
        None => {
            if enabled!(Level::DEBUG) {
                let kind = subject.kind();
                let suggestions = compute_suggestions(name, builtins.names(kind, language));
                debug!(function = name, ?kind, %language, ?suggestions, "unknown function");
            }
            unknown_function(name)
        }
    }
}
