//! Static checks over compiled entries.
//!
//! Unknown function names never fail a lookup; they render a placeholder.
//! Linting finds them ahead of time.

use std::collections::BTreeSet;

use crate::interpreter::error::{LintWarning, compute_suggestions};
use crate::interpreter::registry::BuiltinRegistry;
use crate::interpreter::store::{Entry, Store};
use crate::types::{Language, SubjectKind};

impl Store {
    /// Report every call whose name resolves in no builtin table for the
    /// active language. Findings are ordered by key.
    pub fn lint(&self) -> Vec<LintWarning> {
        let language = self.language();
        let mut warnings = Vec::new();
        for key in self.keys() {
            if let Some(entry) = self.get(key) {
                warnings.extend(lint_entry(key, entry, self.builtins(), language));
            }
        }
        warnings
    }
}

/// Lint a single entry. Each unknown name is reported once per entry.
pub fn lint_entry(
    key: &str,
    entry: &Entry,
    builtins: &BuiltinRegistry,
    language: Language,
) -> Vec<LintWarning> {
    let mut unknown = BTreeSet::new();
    for expr in entry.expressions() {
        expr.walk_calls(&mut |call| {
            if !builtins.has_any(&call.name, language) {
                unknown.insert(call.name.as_str());
            }
        });
    }
    if unknown.is_empty() {
        return Vec::new();
    }

    let known: BTreeSet<&str> = SubjectKind::ALL
        .iter()
        .flat_map(|kind| builtins.names(*kind, language))
        .collect();
    unknown
        .into_iter()
        .map(|name| LintWarning::UnknownFunction {
            key: key.to_string(),
            name: name.to_string(),
            suggestions: compute_suggestions(name, known.iter().copied()),
        })
        .collect()
}
