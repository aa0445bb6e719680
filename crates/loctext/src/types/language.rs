use std::cell::Cell;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::rc::Rc;

/// A language with its own builtin table entries.
///
/// Locale directories are named by code (`en`, `jp`, ...). Codes without
/// language-specific builtins map to [`Language::Other`], which still gets
/// every universal builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
    Other,
}

impl Language {
    /// Parses a locale directory name (case-insensitive, tolerant of region
    /// tags such as `en-US`).
    pub fn from_code(code: &str) -> Self {
        let normalized = code.trim().to_ascii_lowercase();
        let primary = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match primary {
            "en" => Language::English,
            "jp" | "ja" => Language::Japanese,
            _ => Language::Other,
        }
    }

    /// Canonical code, also used to pick CLDR plural rules.
    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Other => "und",
        }
    }

    pub fn is_japanese(self) -> bool {
        self == Language::Japanese
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

/// Shared handle to the process-wide active language.
///
/// Clones observe the same flag, so a host can keep one handle and flip the
/// language while stores and dispatchers read it at every evaluation.
#[derive(Debug, Clone, Default)]
pub struct LanguageFlag(Rc<Cell<Language>>);

impl LanguageFlag {
    pub fn new(language: Language) -> Self {
        Self(Rc::new(Cell::new(language)))
    }

    pub fn get(&self) -> Language {
        self.0.get()
    }

    pub fn set(&self, language: Language) {
        self.0.set(language);
    }
}

impl From<Language> for LanguageFlag {
    fn from(language: Language) -> Self {
        Self::new(language)
    }
}
