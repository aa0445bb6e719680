//! The standard builtin tables.
//!
//! The player is the addressee of every message, so it is rendered in the
//! second person. Characters the player cannot see are rendered as "it" or
//! "something" by the visibility-aware builtins.

use crate::interpreter::plural::is_singular;
use crate::interpreter::registry::{BuiltinRegistry, BuiltinResult};
use crate::interpreter::BuiltinError;
use crate::types::{Character, Gender, Item, Language, Value};

impl BuiltinRegistry {
    /// The standard builtins.
    ///
    /// | Table | Universal | English | Japanese |
    /// |---|---|---|---|
    /// | argless | `you`, `space_if_needed` | | |
    /// | boolean | `s`, `is` | | |
    /// | character | `name`, `basename`, `he2`, `his2`, `him2` | `he`, `his`, `him`, `s`, `is`, `have`, `himself`, `his_owned`, `name_nojob` | `kare_wa` |
    /// | item | `name`, `basename` | `is`, `s`, `does` | |
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        registry.argless.insert_universal("you", you);
        registry
            .argless
            .insert_universal("space_if_needed", space_if_needed);

        registry.boolean.insert_universal("s", bool_s);
        registry.boolean.insert_universal("is", bool_is);

        let character = &mut registry.character;
        character.insert_universal("name", chara_name);
        character.insert_universal("basename", chara_basename);
        character.insert_universal("he2", he2);
        character.insert_universal("his2", his2);
        character.insert_universal("him2", him2);

        let en = Language::English;
        character.insert(en, "he", he);
        character.insert(en, "his", his);
        character.insert(en, "him", him);
        character.insert(en, "s", chara_s);
        character.insert(en, "is", chara_is);
        character.insert(en, "have", chara_have);
        character.insert(en, "himself", himself);
        character.insert(en, "his_owned", his_owned);
        character.insert(en, "name_nojob", name_nojob);

        character.insert(Language::Japanese, "kare_wa", kare_wa);

        registry.item.insert_universal("name", item_name);
        registry.item.insert_universal("basename", item_basename);
        registry.item.insert(en, "is", item_is);
        registry.item.insert(en, "s", item_s);
        registry.item.insert(en, "does", item_does);

        registry
    }
}

/// Optional boolean argument at `index`. Absent means `None`.
pub fn optional_bool(args: &[Value], index: usize) -> Result<Option<bool>, BuiltinError> {
    match args.get(index) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| BuiltinError::Coercion {
                index,
                expected: "a boolean",
                got: value.to_string(),
            }),
    }
}

fn addressee(language: Language) -> &'static str {
    if language.is_japanese() {
        "あなた"
    } else {
        "you"
    }
}

/// Verb suffix: none for the addressee, `s`/`es` for a third person.
fn verb_suffix(is_addressee: bool, needs_e: bool) -> String {
    match (is_addressee, needs_e) {
        (true, _) => String::new(),
        (false, true) => "es".to_string(),
        (false, false) => "s".to_string(),
    }
}

// Argless

fn you(_args: &[Value], language: Language) -> BuiltinResult {
    Ok(addressee(language).to_string())
}

fn space_if_needed(_args: &[Value], language: Language) -> BuiltinResult {
    Ok(if language.is_japanese() { "" } else { " " }.to_string())
}

// Boolean: `true` reads as the addressee.

fn bool_s(args: &[Value], value: bool, _language: Language) -> BuiltinResult {
    let needs_e = optional_bool(args, 1)?.unwrap_or(false);
    Ok(verb_suffix(value, needs_e))
}

fn bool_is(_args: &[Value], value: bool, _language: Language) -> BuiltinResult {
    Ok(if value { "are" } else { "is" }.to_string())
}

// Character

#[derive(Clone, Copy)]
enum Case {
    Subject,
    Possessive,
    Object,
    Reflexive,
}

fn display_name(chara: &dyn Character, language: Language) -> String {
    if chara.is_player() {
        addressee(language).to_string()
    } else if !chara.is_visible() {
        if language.is_japanese() { "何か" } else { "something" }.to_string()
    } else {
        chara.name()
    }
}

fn english_pronoun(chara: &dyn Character, case: Case, check_visibility: bool) -> &'static str {
    if chara.is_player() {
        return match case {
            Case::Subject | Case::Object => "you",
            Case::Possessive => "your",
            Case::Reflexive => "yourself",
        };
    }
    if check_visibility && !chara.is_visible() {
        return match case {
            Case::Subject | Case::Object => "it",
            Case::Possessive => "its",
            Case::Reflexive => "itself",
        };
    }
    match (chara.gender(), case) {
        (Gender::Male, Case::Subject) => "he",
        (Gender::Male, Case::Possessive) => "his",
        (Gender::Male, Case::Object) => "him",
        (Gender::Male, Case::Reflexive) => "himself",
        (Gender::Female, Case::Subject) => "she",
        (Gender::Female, Case::Possessive | Case::Object) => "her",
        (Gender::Female, Case::Reflexive) => "herself",
    }
}

fn japanese_pronoun(chara: &dyn Character, case: Case) -> String {
    let base = if chara.is_player() {
        "あなた"
    } else {
        match chara.gender() {
            Gender::Male => "彼",
            Gender::Female => "彼女",
        }
    };
    match case {
        Case::Possessive => format!("{base}の"),
        Case::Reflexive => format!("{base}自身"),
        Case::Subject | Case::Object => base.to_string(),
    }
}

/// Pronoun that ignores visibility, translated in Japanese.
fn plain_pronoun(chara: &dyn Character, case: Case, language: Language) -> String {
    if language.is_japanese() {
        japanese_pronoun(chara, case)
    } else {
        english_pronoun(chara, case, false).to_string()
    }
}

fn chara_name(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    Ok(display_name(chara, language))
}

fn chara_basename(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(chara.base_name())
}

fn he2(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    Ok(plain_pronoun(chara, Case::Subject, language))
}

fn his2(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    Ok(plain_pronoun(chara, Case::Possessive, language))
}

fn him2(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    Ok(plain_pronoun(chara, Case::Object, language))
}

fn he(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(english_pronoun(chara, Case::Subject, true).to_string())
}

fn his(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(english_pronoun(chara, Case::Possessive, true).to_string())
}

fn him(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(english_pronoun(chara, Case::Object, true).to_string())
}

fn himself(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(english_pronoun(chara, Case::Reflexive, true).to_string())
}

fn chara_s(args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    let needs_e = optional_bool(args, 1)?.unwrap_or(false);
    Ok(verb_suffix(chara.is_player(), needs_e))
}

fn chara_is(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(if chara.is_player() { "are" } else { "is" }.to_string())
}

fn chara_have(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(if chara.is_player() { "have" } else { "has" }.to_string())
}

fn his_owned(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    if chara.is_player() {
        Ok("your".to_string())
    } else {
        Ok(format!("{}'s", display_name(chara, language)))
    }
}

fn name_nojob(_args: &[Value], chara: &dyn Character, _language: Language) -> BuiltinResult {
    Ok(chara.name_without_job())
}

/// Topic form: omitted for the addressee, `<name>は` otherwise.
fn kare_wa(_args: &[Value], chara: &dyn Character, language: Language) -> BuiltinResult {
    if chara.is_player() {
        Ok(String::new())
    } else {
        Ok(format!("{}は", display_name(chara, language)))
    }
}

// Item

fn is_single(item: &dyn Item) -> bool {
    is_singular(Language::English, item.count())
}

fn item_name(_args: &[Value], item: &dyn Item, _language: Language) -> BuiltinResult {
    Ok(item.name())
}

fn item_basename(_args: &[Value], item: &dyn Item, _language: Language) -> BuiltinResult {
    Ok(item.base_name())
}

fn item_is(_args: &[Value], item: &dyn Item, _language: Language) -> BuiltinResult {
    Ok(if is_single(item) { "is" } else { "are" }.to_string())
}

fn item_s(_args: &[Value], item: &dyn Item, _language: Language) -> BuiltinResult {
    Ok(if is_single(item) { "s" } else { "" }.to_string())
}

fn item_does(_args: &[Value], item: &dyn Item, _language: Language) -> BuiltinResult {
    Ok(if is_single(item) { "does" } else { "do" }.to_string())
}
