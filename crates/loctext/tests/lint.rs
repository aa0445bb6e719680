//! Tests for the unknown-function lint.

use loctext::{Language, LanguageFlag, LintWarning, Store};

const RESOURCES: &str = r#"
locale {
    fine   = "${name(_1)} ${you()}"
    typo   = ["${nmae(_1)}", "${he(_1)} ${frobnicate()}"]
    nested = "${s(_1, ${is_e()})}"
    topic  = "${kare_wa(_1)}"
}
"#;

fn lint_in(language: Language) -> Vec<LintWarning> {
    let mut store = Store::builder()
        .language(LanguageFlag::new(language))
        .build();
    store.load_str("lint.hcl", RESOURCES).unwrap();
    store.lint()
}

fn names(warnings: &[LintWarning]) -> Vec<(&str, &str)> {
    warnings
        .iter()
        .map(|warning| match warning {
            LintWarning::UnknownFunction { key, name, .. } => (key.as_str(), name.as_str()),
        })
        .collect()
}

#[test]
fn english_findings_are_ordered_by_key() {
    let warnings = lint_in(Language::English);
    assert_eq!(
        names(&warnings),
        vec![
            ("core.locale.nested", "is_e"),
            ("core.locale.topic", "kare_wa"),
            ("core.locale.typo", "frobnicate"),
            ("core.locale.typo", "nmae"),
        ]
    );
}

#[test]
fn japanese_findings_follow_the_language() {
    let warnings = lint_in(Language::Japanese);
    assert_eq!(
        names(&warnings),
        vec![
            ("core.locale.nested", "is_e"),
            ("core.locale.typo", "frobnicate"),
            ("core.locale.typo", "he"),
            ("core.locale.typo", "nmae"),
        ]
    );
}

#[test]
fn warning_display_includes_suggestions() {
    let warnings = lint_in(Language::English);
    let typo = warnings
        .iter()
        .find(|warning| matches!(warning, LintWarning::UnknownFunction { name, .. } if name == "nmae"))
        .unwrap();
    assert_eq!(
        typo.to_string(),
        "'core.locale.typo': unknown function 'nmae' (did you mean: name?)"
    );
}

#[test]
fn clean_store_has_no_findings() {
    let mut store = Store::new();
    store
        .load_str("clean.hcl", r#"locale { a = "${you()}" }"#)
        .unwrap();
    assert!(store.lint().is_empty());
}
