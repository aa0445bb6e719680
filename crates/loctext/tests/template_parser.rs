//! Integration tests for expression parsing.

use loctext::parser::{Arg, Call, Node, ParseError, parse_template};

fn call(name: &str, args: Vec<Arg>) -> Call {
    Call {
        name: name.into(),
        args,
    }
}

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn test_pure_literal() {
    let expr = parse_template("Hello, world!").unwrap();
    assert_eq!(expr.nodes, vec![Node::Text("Hello, world!".into())]);
    assert!(expr.is_literal());
}

#[test]
fn test_empty_string() {
    let expr = parse_template("").unwrap();
    assert_eq!(expr.nodes, vec![]);
}

#[test]
fn test_dollar_without_brace_is_literal() {
    let expr = parse_template("$100 or $$").unwrap();
    assert_eq!(expr.nodes, vec![Node::Text("$100 or $$".into())]);
}

#[test]
fn test_escaped_opener_merges_with_text() {
    let expr = parse_template("write $${name} here").unwrap();
    assert_eq!(expr.nodes, vec![Node::Text("write ${name} here".into())]);
}

// =============================================================================
// Calls
// =============================================================================

#[test]
fn test_call_between_text() {
    let expr = parse_template("${name(_1)} hit ${him(_1)}.").unwrap();
    assert_eq!(
        expr.nodes,
        vec![
            Node::Call(call("name", vec![Arg::Positional(1)])),
            Node::Text(" hit ".into()),
            Node::Call(call("him", vec![Arg::Positional(1)])),
            Node::Text(".".into()),
        ]
    );
    assert!(!expr.is_literal());
}

#[test]
fn test_call_without_arguments() {
    let expr = parse_template("${you()}").unwrap();
    assert_eq!(expr.nodes, vec![Node::Call(call("you", vec![]))]);
}

#[test]
fn test_literal_arguments() {
    let expr = parse_template(r#"${f("a \"b\"", 3, -2.5, false)}"#).unwrap();
    assert_eq!(
        expr.nodes,
        vec![Node::Call(call(
            "f",
            vec![
                Arg::Str("a \"b\"".into()),
                Arg::Int(3),
                Arg::Float(-2.5),
                Arg::Bool(false),
            ]
        ))]
    );
}

#[test]
fn test_nested_call_forms_are_equivalent() {
    let wrapped = parse_template("${s(_1, ${is_e()})}").unwrap();
    let bare = parse_template("${s(_1, is_e())}").unwrap();
    assert_eq!(wrapped, bare);
    assert_eq!(
        bare.nodes,
        vec![Node::Call(call(
            "s",
            vec![Arg::Positional(1), Arg::Call(call("is_e", vec![]))]
        ))]
    );
}

#[test]
fn test_walk_calls_visits_nested_calls() {
    let expr = parse_template("${a(b(c()))} ${d()}").unwrap();
    let mut names = Vec::new();
    expr.walk_calls(&mut |call| names.push(call.name.clone()));
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_positional_span() {
    let expr = parse_template("${_2} of ${ _3 }").unwrap();
    assert_eq!(
        expr.nodes,
        vec![
            Node::Positional(2),
            Node::Text(" of ".into()),
            Node::Positional(3),
        ]
    );
}

#[test]
fn test_unknown_names_parse() {
    assert!(parse_template("${frobnicate(1)}").is_ok());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unterminated_span_fails() {
    assert!(matches!(
        parse_template("a ${you()"),
        Err(ParseError::UnexpectedEof { .. } | ParseError::Syntax { .. })
    ));
}

#[test]
fn test_missing_close_paren_fails() {
    assert!(parse_template("${name(_1}").is_err());
}

#[test]
fn test_positional_zero_fails() {
    assert!(parse_template("${_0}").is_err());
}

#[test]
fn test_bad_argument_fails() {
    assert!(parse_template("${f(#)}").is_err());
}

#[test]
fn test_empty_span_fails() {
    assert!(parse_template("${}").is_err());
}

#[test]
fn test_error_position_counts_characters() {
    let err = parse_template("あい\n  ${f(}").unwrap_err();
    match err {
        ParseError::Syntax { line, .. } | ParseError::UnexpectedEof { line, .. } => {
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
