//! CLDR plural categories for item verb agreement.
//!
//! Item builtins choose "is"/"are" and "does"/"do" from the plural category
//! of the stack size instead of comparing against 1, so zero and other
//! counts follow the language's own rules.

use std::cell::RefCell;
use std::collections::BTreeMap;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::Language;

thread_local! {
    /// Cardinal rules, built on first use per language.
    static RULES: RefCell<BTreeMap<Language, PluralRules>> = const { RefCell::new(BTreeMap::new()) };
}

/// Locale whose bundled rules apply. Languages without their own builtins
/// use English rules.
fn rules_locale(language: Language) -> Locale {
    match language {
        Language::Japanese => locale!("ja"),
        Language::English | Language::Other => locale!("en"),
    }
}

/// Plural category of `n` in `language`.
///
/// ```
/// use icu_plurals::PluralCategory;
/// use loctext::Language;
/// use loctext::interpreter::plural_category;
///
/// assert_eq!(plural_category(Language::English, 1), PluralCategory::One);
/// assert_eq!(plural_category(Language::English, 0), PluralCategory::Other);
/// assert_eq!(plural_category(Language::Japanese, 1), PluralCategory::Other);
/// ```
pub fn plural_category(language: Language, n: i64) -> PluralCategory {
    RULES.with_borrow_mut(|rules| {
        rules
            .entry(language)
            .or_insert_with(|| {
                PluralRules::try_new(
                    rules_locale(language).into(),
                    PluralRuleType::Cardinal.into(),
                )
                .expect("rules for bundled locales are compiled in")
            })
            .category_for(n)
    })
}

/// Whether `n` takes singular agreement in `language`.
pub fn is_singular(language: Language, n: i64) -> bool {
    plural_category(language, n) == PluralCategory::One
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_singular_is_exactly_one() {
        assert!(is_singular(Language::English, 1));
        assert!(!is_singular(Language::English, 0));
        assert!(!is_singular(Language::English, 2));
        assert!(!is_singular(Language::English, -5));
    }

    #[test]
    fn other_languages_use_english_rules() {
        assert!(is_singular(Language::Other, 1));
    }

    #[test]
    fn japanese_has_no_singular() {
        assert!(!is_singular(Language::Japanese, 1));
    }
}
