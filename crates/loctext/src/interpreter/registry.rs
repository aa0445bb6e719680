//! Builtin registry: one name -> function table per subject kind.
//!
//! Each table holds universal entries, available in every language, and
//! language-specific entries that exist only while that language is active.
//! Language-specific entries take precedence over universal ones.

use std::collections::BTreeMap;

use crate::interpreter::BuiltinError;
use crate::types::{Character, Item, Language, SubjectKind, Value};

/// A builtin result: text, or an argument problem that renders as the
/// unknown-function placeholder.
pub type BuiltinResult = Result<String, BuiltinError>;

/// Builtin with no subject.
pub type ArglessFn = fn(&[Value], Language) -> BuiltinResult;

/// Builtin over a boolean subject.
pub type BoolFn = fn(&[Value], bool, Language) -> BuiltinResult;

/// Builtin over a character-like subject.
pub type CharacterFn = fn(&[Value], &dyn Character, Language) -> BuiltinResult;

/// Builtin over an item-like subject.
pub type ItemFn = fn(&[Value], &dyn Item, Language) -> BuiltinResult;

/// A name -> function table with per-language entries.
#[derive(Debug, Clone)]
pub struct Table<F> {
    universal: BTreeMap<String, F>,
    language_specific: BTreeMap<Language, BTreeMap<String, F>>,
}

impl<F: Copy> Table<F> {
    pub fn new() -> Self {
        Self {
            universal: BTreeMap::new(),
            language_specific: BTreeMap::new(),
        }
    }

    /// Get a function by name for a language.
    ///
    /// Checks language-specific entries first, then falls back to universal.
    pub fn get(&self, name: &str, language: Language) -> Option<F> {
        self.language_specific
            .get(&language)
            .and_then(|entries| entries.get(name))
            .or_else(|| self.universal.get(name))
            .copied()
    }

    pub fn contains(&self, name: &str, language: Language) -> bool {
        self.get(name, language).is_some()
    }

    /// Register a function for every language.
    pub fn insert_universal(&mut self, name: impl Into<String>, f: F) {
        self.universal.insert(name.into(), f);
    }

    /// Register a function that exists only while `language` is active.
    pub fn insert(&mut self, language: Language, name: impl Into<String>, f: F) {
        self.language_specific
            .entry(language)
            .or_default()
            .insert(name.into(), f);
    }

    /// Names visible for a language, sorted and deduplicated.
    pub fn names(&self, language: Language) -> Vec<&str> {
        let mut names: Vec<&str> = self.universal.keys().map(String::as_str).collect();
        if let Some(entries) = self.language_specific.get(&language) {
            names.extend(entries.keys().map(String::as_str));
        }
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<F: Copy> Default for Table<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four dispatch tables.
///
/// [`BuiltinRegistry::default`] is the standard set; use
/// [`BuiltinRegistry::empty`] to start from nothing.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    pub argless: Table<ArglessFn>,
    pub boolean: Table<BoolFn>,
    pub character: Table<CharacterFn>,
    pub item: Table<ItemFn>,
}

impl BuiltinRegistry {
    /// A registry with no builtins at all.
    pub fn empty() -> Self {
        Self {
            argless: Table::new(),
            boolean: Table::new(),
            character: Table::new(),
            item: Table::new(),
        }
    }

    /// Check whether `name` resolves in the table for `kind`.
    pub fn has(&self, kind: SubjectKind, name: &str, language: Language) -> bool {
        match kind {
            SubjectKind::None => self.argless.contains(name, language),
            SubjectKind::Bool => self.boolean.contains(name, language),
            SubjectKind::Character => self.character.contains(name, language),
            SubjectKind::Item => self.item.contains(name, language),
        }
    }

    /// Check whether `name` resolves in any table.
    pub fn has_any(&self, name: &str, language: Language) -> bool {
        SubjectKind::ALL
            .iter()
            .any(|kind| self.has(*kind, name, language))
    }

    /// Names visible in the table for `kind`.
    pub fn names(&self, kind: SubjectKind, language: Language) -> Vec<&str> {
        match kind {
            SubjectKind::None => self.argless.names(language),
            SubjectKind::Bool => self.boolean.names(language),
            SubjectKind::Character => self.character.names(language),
            SubjectKind::Item => self.item.names(language),
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
